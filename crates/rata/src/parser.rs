//! Recursive-descent parser: tokens to [`ast`](crate::ast)
//!
//! One production per node kind; binary expressions use precedence
//! climbing (loosest to tightest):
//!
//! ```text
//! pipe        a |> f(b)          desugared to f(a, b)
//! or          a or b
//! and         a and b
//! comparison  == != < <= > >=
//! additive    + -
//! mult.       * / %
//! unary       -a
//! power       a ^ b              right-associative
//! postfix     f(args)
//! primary     literals, names, tuples, vectors, if, function, lambda
//! ```
//!
//! The first structural mismatch aborts the whole unit; there is no
//! recovery.

mod expr;
mod interpolation;
mod stmt;

use crate::ast::{Expr, Module, Stmt};
use crate::config::with_stack;
use crate::error::ParseError;
use crate::lexer::{Span, Token, TokenKind};

/// Deepest expression nesting accepted before parsing gives up.
const MAX_NESTING: usize = 256;

/// Parse a full source unit: `library` imports followed by `module Name { ... }`.
pub fn parse(tokens: Vec<Token>) -> Result<Module, ParseError> {
    let mut parser = Parser::new(tokens);
    let module = parser.parse_module()?;
    parser.expect_eof()?;
    Ok(module)
}

/// Parse a bare statement list (REPL mode, no enclosing `module`).
pub fn parse_repl(tokens: Vec<Token>) -> Result<Vec<Stmt>, ParseError> {
    let mut parser = Parser::new(tokens);
    let mut stmts = Vec::new();
    loop {
        parser.skip_separators();
        if parser.check(&TokenKind::Eof) {
            return Ok(stmts);
        }
        stmts.push(parser.parse_statement()?);
    }
}

/// Parse a single expression that must span the whole token sequence.
pub fn parse_expression(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr()?;
    parser.expect_eof()?;
    Ok(expr)
}

/// Parser state: the token buffer, a cursor, and the placeholder names
/// collected for each lambda currently being parsed (innermost last).
pub(crate) struct Parser {
    tokens: Vec<Token>,
    current: usize,
    lambda_scopes: Vec<Vec<String>>,
    depth: usize,
}

impl Parser {
    pub(crate) fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof) {
            let span = tokens.last().map(|t| t.span).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, span));
        }
        Self {
            tokens,
            current: 0,
            lambda_scopes: Vec::new(),
            depth: 0,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Cursor
    // ═══════════════════════════════════════════════════════════════════

    fn peek(&self) -> &Token {
        // The buffer always ends with Eof and the cursor never passes it.
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn peek_nth_kind(&self, n: usize) -> &TokenKind {
        let index = (self.current + n).min(self.tokens.len() - 1);
        &self.tokens[index].kind
    }

    fn previous_span(&self) -> Option<Span> {
        self.current
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(format!("`{}`", kind.lexeme())))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String, ParseError> {
        match self.peek_kind().clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn expect_eof(&mut self) -> Result<(), ParseError> {
        self.skip_separators();
        if self.check(&TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    fn skip_separators(&mut self) {
        while self.eat(&TokenKind::Semicolon) {}
    }

    /// Error describing the current token as unexpected.
    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let token = self.peek();
        ParseError::new(expected, token.kind.to_string(), token.span)
    }

    /// Run one nested production, failing past [`MAX_NESTING`] levels.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.unexpected("shallower nesting"));
        }
        self.depth += 1;
        let result = with_stack(|| parse(self));
        self.depth -= 1;
        result
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lambda Placeholder Scopes
    // ═══════════════════════════════════════════════════════════════════

    fn record_placeholder(&mut self, name: &str) {
        if let Some(scope) = self.lambda_scopes.last_mut() {
            if !scope.iter().any(|n| n == name) {
                scope.push(name.to_string());
            }
        }
    }
}
