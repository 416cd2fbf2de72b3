//! Splitting `f"..."` literals into text and embedded expressions

use super::Parser;
use crate::ast::{Expr, InterpolatedString, StringPart};
use crate::error::ParseError;
use crate::lexer::{tokenize, Span};

impl Parser {
    /// Split the raw text of an interpolated string literal.
    ///
    /// Every top-level `{...}` run is tokenized and parsed as an expression.
    /// Placeholders inside the runs register with the enclosing lambda.
    pub(super) fn parse_interpolated(&mut self, raw: &str, span: Span) -> Result<Expr, ParseError> {
        let chars: Vec<char> = raw.chars().collect();
        let mut parts = Vec::new();
        let mut text = String::new();
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '\\' => {
                    let escaped = chars.get(i + 1).copied().ok_or_else(|| {
                        ParseError::new("escape sequence", "end of string", span)
                    })?;
                    text.push(unescape(escaped).ok_or_else(|| {
                        ParseError::new("escape sequence", format!("`\\{}`", escaped), span)
                    })?);
                    i += 2;
                }
                '{' => {
                    let close = matching_brace(&chars, i).ok_or_else(|| {
                        ParseError::new("`}` closing interpolation", "end of string", span)
                    })?;
                    let source: String = chars[i + 1..close].iter().collect();
                    if source.trim().is_empty() {
                        return Err(ParseError::new(
                            "expression inside `{}`",
                            "empty interpolation",
                            span,
                        ));
                    }
                    if !text.is_empty() {
                        parts.push(StringPart::Literal(std::mem::take(&mut text)));
                    }
                    parts.push(StringPart::Expr(self.parse_embedded(&source, span)?));
                    i = close + 1;
                }
                '}' => {
                    return Err(ParseError::new(
                        "text or `{`",
                        "unbalanced `}` in interpolated string",
                        span,
                    ))
                }
                c => {
                    text.push(c);
                    i += 1;
                }
            }
        }

        if !text.is_empty() {
            parts.push(StringPart::Literal(text));
        }
        Ok(Expr::InterpolatedString(InterpolatedString { parts }))
    }

    /// Parse one `{...}` run with a sub-parser that shares this parser's
    /// lambda scopes. Errors are reported at the string literal's position.
    fn parse_embedded(&mut self, source: &str, span: Span) -> Result<Expr, ParseError> {
        let tokens = tokenize(source).map_err(|err| {
            ParseError::new("valid interpolation expression", err.message, span)
        })?;

        let mut sub = Parser::new(tokens);
        sub.lambda_scopes = std::mem::take(&mut self.lambda_scopes);
        sub.depth = self.depth;
        let parsed = sub.parse_expr().and_then(|expr| {
            sub.expect_eof()?;
            Ok(expr)
        });
        self.lambda_scopes = std::mem::take(&mut sub.lambda_scopes);

        parsed.map_err(|err| ParseError {
            position: Some(span),
            ..err
        })
    }
}

fn unescape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        '{' => Some('{'),
        '}' => Some('}'),
        _ => None,
    }
}

/// Index of the `}` closing the `{` at `open`, skipping nested braces and
/// quoted strings.
fn matching_brace(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < chars.len() {
        match chars[i] {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            '"' => {
                i += 1;
                while i < chars.len() && chars[i] != '"' {
                    if chars[i] == '\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;
    use pretty_assertions::assert_eq;

    fn parts(src: &str) -> Vec<StringPart> {
        match parse_expression(tokenize(src).unwrap()).unwrap() {
            Expr::InterpolatedString(s) => s.parts,
            other => panic!("Expected InterpolatedString, got {:?}", other),
        }
    }

    #[test]
    fn test_escaped_braces_are_text() {
        assert_eq!(
            parts(r#"f"\{literal\} {x}""#),
            vec![
                StringPart::Literal("{literal} ".to_string()),
                StringPart::Expr(Expr::ident("x")),
            ]
        );
    }

    #[test]
    fn test_nested_string_with_brace() {
        assert_eq!(
            parts(r#"f"{Maps.get(m, "}")}""#),
            vec![StringPart::Expr(Expr::call(
                Expr::qualified("Maps", "get"),
                vec![Expr::ident("m"), Expr::string("}")]
            ))]
        );
    }

    #[test]
    fn test_tuple_inside_interpolation() {
        assert_eq!(parts(r#"f"{ {1} }""#).len(), 1);
    }

    #[test]
    fn test_empty_interpolation_is_error() {
        let err = parse_expression(tokenize(r#"f"a {} b""#).unwrap()).unwrap_err();
        assert_eq!(err.found, "empty interpolation");
        assert_eq!(err.position, Some(Span::new(1, 1)));
    }

    #[test]
    fn test_lone_close_brace_is_error() {
        assert!(parse_expression(tokenize(r#"f"a } b""#).unwrap()).is_err());
    }

    #[test]
    fn test_placeholder_in_interpolation_belongs_to_lambda() {
        match parse_expression(tokenize(r#"~ f"<{.x}>""#).unwrap()).unwrap() {
            Expr::Lambda(lambda) => assert_eq!(lambda.params, vec!["x"]),
            other => panic!("Expected Lambda, got {:?}", other),
        }
    }
}
