//! Module, import, block and statement productions

use std::sync::Arc;

use super::Parser;
use crate::ast::{
    Assignment, Docstring, Function, LibraryImport, Module, Parameter, Return, Stmt,
};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl Parser {
    /// `library_import* "module" IDENT block`
    pub(super) fn parse_module(&mut self) -> Result<Module, ParseError> {
        let mut imports = Vec::new();
        loop {
            self.skip_separators();
            if !self.check(&TokenKind::Library) {
                break;
            }
            imports.push(self.parse_library_import()?);
        }

        self.expect(TokenKind::Module)?;
        let name = self.expect_identifier("module name")?;
        let (docstring, body) = split_docstring(self.parse_block()?);

        Ok(Module {
            name,
            imports,
            docstring,
            body,
        })
    }

    /// `"library" IDENT ("as" IDENT)?`
    fn parse_library_import(&mut self) -> Result<LibraryImport, ParseError> {
        self.expect(TokenKind::Library)?;
        let module_name = self.expect_identifier("library name")?;
        let alias = if self.eat(&TokenKind::As) {
            Some(self.expect_identifier("alias name")?)
        } else {
            None
        };
        Ok(LibraryImport { module_name, alias })
    }

    /// `"{" statement* "}"`
    pub(super) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        loop {
            self.skip_separators();
            match self.peek_kind() {
                TokenKind::RBrace => {
                    self.advance();
                    return Ok(stmts);
                }
                TokenKind::Eof => return Err(self.unexpected("`}`")),
                _ => stmts.push(self.parse_statement()?),
            }
        }
    }

    /// Assignment, `return`, free docstring, or expression.
    pub(super) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let stmt = match self.peek_kind().clone() {
            TokenKind::Return => {
                self.advance();
                Stmt::Return(Return {
                    value: self.parse_expr()?,
                })
            }
            TokenKind::Docstring(content) => {
                self.advance();
                Stmt::Docstring(Docstring { content })
            }
            TokenKind::Identifier(name) if self.peek_nth_kind(1) == &TokenKind::Assign => {
                self.advance();
                self.advance();
                Stmt::Assignment(Assignment {
                    name,
                    value: self.parse_expr()?,
                })
            }
            _ => Stmt::Expr(self.parse_expr()?),
        };
        self.skip_separators();
        Ok(stmt)
    }

    /// `"function" "(" params ")" block`, with the `function` keyword
    /// already consumed.
    pub(super) fn parse_function(&mut self) -> Result<Function, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            params.push(self.parse_parameter()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;

        // Lambda placeholders never leak across a function boundary.
        let saved_scopes = std::mem::take(&mut self.lambda_scopes);
        let block = self.parse_block();
        self.lambda_scopes = saved_scopes;
        let (docstring, body) = split_docstring(block?);

        Ok(Function {
            params,
            body: Arc::new(body),
            docstring,
        })
    }

    /// `IDENT (":" IDENT)?`; `n:Int` lexes as a symbol and is accepted too.
    fn parse_parameter(&mut self) -> Result<Parameter, ParseError> {
        let name = self.expect_identifier("parameter name")?;
        let type_name = match self.peek_kind().clone() {
            TokenKind::Colon => {
                self.advance();
                Some(self.expect_identifier("type name")?)
            }
            TokenKind::Symbol(type_name) => {
                self.advance();
                Some(type_name)
            }
            _ => None,
        };
        Ok(Parameter { name, type_name })
    }
}

/// Detach a leading docstring statement from a body.
fn split_docstring(mut body: Vec<Stmt>) -> (Option<String>, Vec<Stmt>) {
    if matches!(body.first(), Some(Stmt::Docstring(_))) {
        if let Stmt::Docstring(doc) = body.remove(0) {
            return (Some(doc.content), body);
        }
    }
    (None, body)
}
