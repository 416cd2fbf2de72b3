//! Expression productions and operator precedence

use std::sync::Arc;

use super::Parser;
use crate::ast::{
    BinaryOperator, Expr, FunctionCall, If, Lambda, LambdaParam, Literal, LiteralValue, Stmt,
    Symbol, Tuple, Vector,
};
use crate::error::ParseError;
use crate::lexer::TokenKind;

/// Maps a token to the comparison operator it spells, if any.
fn comparison_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::EqualEqual => Some(BinaryOperator::Eq),
        TokenKind::BangEqual => Some(BinaryOperator::NotEq),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEq),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEq),
        _ => None,
    }
}

fn additive_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        _ => None,
    }
}

fn multiplicative_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Rem),
        _ => None,
    }
}

/// Splice the piped value in as the first argument of the right-hand side.
///
/// `a |> f(b)` becomes `f(a, b)`; `a |> f` becomes `f(a)`.
fn desugar_pipe(piped: Expr, target: Expr) -> Expr {
    match target {
        Expr::FunctionCall(FunctionCall { function, mut args }) => {
            args.insert(0, piped);
            Expr::FunctionCall(FunctionCall { function, args })
        }
        callee => Expr::call(callee, vec![piped]),
    }
}

impl Parser {
    /// Entry point for a full expression.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_pipe()
    }

    /// `or ("|>" or)*`
    fn parse_pipe(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_or()?;
        while self.eat(&TokenKind::Pipe) {
            let target = self.parse_or()?;
            left = desugar_pipe(left, target);
        }
        Ok(left)
    }

    /// `and ("or" and)*`
    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let right = self.parse_and()?;
            left = Expr::binary(left, BinaryOperator::Or, right);
        }
        Ok(left)
    }

    /// `comparison ("and" comparison)*`
    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        while self.eat(&TokenKind::And) {
            let right = self.parse_comparison()?;
            left = Expr::binary(left, BinaryOperator::And, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        while let Some(op) = comparison_operator(self.peek_kind()) {
            self.advance();
            let right = self.parse_additive()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = additive_operator(self.peek_kind()) {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = multiplicative_operator(self.peek_kind()) {
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    /// Prefix `-`. Folds into numeric literals, otherwise `0 - operand`.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        self.nested(|parser| {
            if !parser.eat(&TokenKind::Minus) {
                return parser.parse_power();
            }
            let operand = parser.parse_unary()?;
            Ok(match operand {
                Expr::Literal(Literal {
                    value: LiteralValue::Int(n),
                }) => Expr::int(-n),
                Expr::Literal(Literal {
                    value: LiteralValue::Float(n),
                }) => Expr::float(-n),
                other => Expr::binary(Expr::int(0), BinaryOperator::Sub, other),
            })
        })
    }

    /// `postfix ("^" unary)?`, right-associative through the recursion.
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_postfix()?;
        if self.eat(&TokenKind::Caret) {
            let exponent = self.parse_unary()?;
            return Ok(Expr::binary(base, BinaryOperator::Pow, exponent));
        }
        Ok(base)
    }

    /// `primary ("(" args ")")*` where the `(` sits on the callee's line.
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            let same_line = match self.previous_span() {
                Some(prev) => prev.line == self.peek().span.line,
                None => true,
            };
            if !(self.check(&TokenKind::LParen) && same_line) {
                return Ok(expr);
            }
            self.advance();
            let args = self.parse_delimited(TokenKind::RParen)?;
            expr = Expr::call(expr, args);
        }
    }

    /// Comma-separated expressions up to `close`, trailing comma allowed.
    /// The opening delimiter is already consumed.
    fn parse_delimited(&mut self, close: TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        while !self.check(&close) {
            items.push(self.parse_expr()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(close)?;
        Ok(items)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Integer(n) => {
                self.advance();
                Ok(Expr::int(n))
            }
            TokenKind::Float(n) => {
                self.advance();
                Ok(Expr::float(n))
            }
            TokenKind::String(s) => {
                self.advance();
                Ok(Expr::string(s))
            }
            TokenKind::InterpolatedStringLiteral(raw) => {
                self.advance();
                self.parse_interpolated(&raw, token.span)
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(match name.as_str() {
                    "true" => literal(LiteralValue::Bool(true)),
                    "false" => literal(LiteralValue::Bool(false)),
                    "nil" => literal(LiteralValue::Nil),
                    _ => self.parse_name(name)?,
                })
            }
            TokenKind::ModuleRef => {
                self.advance();
                self.parse_name(TokenKind::ModuleRef.lexeme().to_string())
            }
            TokenKind::Symbol(name) => {
                self.advance();
                Ok(Expr::Symbol(Symbol { name }))
            }
            TokenKind::LambdaPlaceholder(name) => {
                self.advance();
                self.record_placeholder(&name);
                Ok(Expr::LambdaParam(LambdaParam { name }))
            }
            TokenKind::Tilde => {
                self.advance();
                self.parse_lambda()
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBrace => {
                self.advance();
                let elements = self.parse_delimited(TokenKind::RBrace)?;
                Ok(Expr::Tuple(Tuple { elements }))
            }
            TokenKind::LBracket => {
                self.advance();
                let elements = self.parse_delimited(TokenKind::RBracket)?;
                Ok(Expr::Vector(Vector { elements }))
            }
            TokenKind::If => {
                self.advance();
                self.parse_if()
            }
            TokenKind::Function => {
                self.advance();
                Ok(Expr::Function(self.parse_function()?))
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// A name, or `name.member` when followed by a dot and an identifier.
    fn parse_name(&mut self, name: String) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Dot) {
            self.advance();
            let member = self.expect_identifier("function name after `.`")?;
            return Ok(Expr::qualified(name, member));
        }
        Ok(Expr::ident(name))
    }

    /// `"~" expr`, with the `~` already consumed.
    fn parse_lambda(&mut self) -> Result<Expr, ParseError> {
        self.lambda_scopes.push(Vec::new());
        let body = self.parse_expr();
        let params = self.lambda_scopes.pop().unwrap_or_default();
        Ok(Expr::Lambda(Lambda {
            body: Arc::new(body?),
            params,
        }))
    }

    /// `"if" expr block ("else" (if | block))?`, with `if` already consumed.
    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        let condition = self.parse_expr()?;
        let then_branch = self.parse_block()?;
        let else_branch = if self.eat(&TokenKind::Else) {
            if self.eat(&TokenKind::If) {
                Some(vec![Stmt::Expr(self.parse_if()?)])
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };
        Ok(Expr::If(If {
            condition: Box::new(condition),
            then_branch,
            else_branch,
        }))
    }
}

fn literal(value: LiteralValue) -> Expr {
    Expr::Literal(Literal { value })
}
