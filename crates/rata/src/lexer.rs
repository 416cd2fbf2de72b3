//! Tokenizer: source text to a flat token sequence
//!
//! A single left-to-right scan. Whitespace and `#` comments only separate
//! tokens and are dropped. Interpolated strings are kept raw; splitting their
//! `{expr}` segments is the parser's job.

use std::fmt;

use crate::error::LexError;

/// A source position (1-indexed line and column, counted in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Line number
    pub line: usize,
    /// Column number
    pub column: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The kind (and payload) of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ═══════════════════════════════════════════════════════════════════
    // Literals and names
    // ═══════════════════════════════════════════════════════════════════
    /// `42`
    Integer(i64),
    /// `3.14`
    Float(f64),
    /// `"text"` with escapes already processed
    String(String),
    /// `f"sum: {a + b}"`, raw text between the quotes
    InterpolatedStringLiteral(String),
    /// `"""..."""`, trimmed per line
    Docstring(String),
    /// `name`
    Identifier(String),
    /// `:name`
    Symbol(String),
    /// `.name` inside a lambda body
    LambdaPlaceholder(String),
    /// `__module__`
    ModuleRef,

    // ═══════════════════════════════════════════════════════════════════
    // Keywords
    // ═══════════════════════════════════════════════════════════════════
    /// `module`
    Module,
    /// `function`
    Function,
    /// `if`
    If,
    /// `else`
    Else,
    /// `return`
    Return,
    /// `library`
    Library,
    /// `as`
    As,
    /// `and`
    And,
    /// `or`
    Or,

    // ═══════════════════════════════════════════════════════════════════
    // Punctuation
    // ═══════════════════════════════════════════════════════════════════
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `.`
    Dot,
    /// `;`
    Semicolon,

    // ═══════════════════════════════════════════════════════════════════
    // Operators
    // ═══════════════════════════════════════════════════════════════════
    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `^`
    Caret,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `|>`
    Pipe,
    /// `~`
    Tilde,

    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Integer(n) => write!(f, "integer `{}`", n),
            TokenKind::Float(n) => write!(f, "float `{}`", n),
            TokenKind::String(s) => write!(f, "string {:?}", s),
            TokenKind::InterpolatedStringLiteral(s) => write!(f, "interpolated string f\"{}\"", s),
            TokenKind::Docstring(_) => write!(f, "docstring"),
            TokenKind::Identifier(name) => write!(f, "identifier `{}`", name),
            TokenKind::Symbol(name) => write!(f, "symbol `:{}`", name),
            TokenKind::LambdaPlaceholder(name) => write!(f, "placeholder `.{}`", name),
            TokenKind::Eof => write!(f, "end of input"),
            other => write!(f, "`{}`", other.lexeme()),
        }
    }
}

impl TokenKind {
    /// Fixed source text of keywords, punctuation and operators.
    pub fn lexeme(&self) -> &'static str {
        match self {
            TokenKind::ModuleRef => "__module__",
            TokenKind::Module => "module",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::Library => "library",
            TokenKind::As => "as",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::EqualEqual => "==",
            TokenKind::BangEqual => "!=",
            TokenKind::Pipe => "|>",
            TokenKind::Tilde => "~",
            _ => "",
        }
    }
}

/// A token with the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was lexed
    pub kind: TokenKind,
    /// Where it starts
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Tokenize a whole source unit. The result always ends with `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "module" => TokenKind::Module,
        "function" => TokenKind::Function,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "return" => TokenKind::Return,
        "library" => TokenKind::Library,
        "as" => TokenKind::As,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "__module__" => TokenKind::ModuleRef,
        _ => return None,
    };
    Some(kind)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            input: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn current(&self) -> char {
        self.peek_ahead(0)
    }

    fn peek_ahead(&self, n: usize) -> char {
        self.input.get(self.position + n).copied().unwrap_or('\0')
    }

    fn previous(&self) -> Option<char> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.input.get(i).copied())
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn advance(&mut self) -> char {
        let c = self.current();
        if !self.is_eof() {
            self.position += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }

    fn push(&mut self, kind: TokenKind, span: Span) {
        self.tokens.push(Token::new(kind, span));
    }

    fn error(&self, span: Span, message: impl Into<String>, snippet: String) -> LexError {
        LexError {
            line: span.line,
            column: span.column,
            message: message.into(),
            snippet,
        }
    }

    fn snippet_from(&self, start: usize) -> String {
        self.input[start.min(self.input.len())..]
            .iter()
            .take_while(|c| !c.is_whitespace())
            .take(12)
            .collect()
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        loop {
            self.skip_whitespace_and_comments();
            if self.is_eof() {
                let span = self.span();
                self.push(TokenKind::Eof, span);
                return Ok(self.tokens);
            }
            self.next_token()?;
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while !self.is_eof() && self.current().is_whitespace() {
                self.advance();
            }
            if self.current() == '#' {
                while !self.is_eof() && self.current() != '\n' {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<(), LexError> {
        let span = self.span();
        let c = self.current();

        if c.is_ascii_digit() {
            return self.read_number(span);
        }
        if c == 'f' && self.peek_ahead(1) == '"' {
            self.advance();
            return self.read_interpolated(span);
        }
        if is_ident_start(c) {
            let word = self.read_ident();
            let kind = keyword(&word).unwrap_or(TokenKind::Identifier(word));
            self.push(kind, span);
            return Ok(());
        }
        if c == '"' {
            if self.peek_ahead(1) == '"' && self.peek_ahead(2) == '"' {
                return self.read_docstring(span);
            }
            return self.read_string(span);
        }

        match c {
            ':' if is_ident_start(self.peek_ahead(1)) => {
                self.advance();
                let name = self.read_ident();
                self.push(TokenKind::Symbol(name), span);
            }
            '.' if is_ident_start(self.peek_ahead(1)) && !self.follows_operand() => {
                self.advance();
                let name = self.read_ident();
                self.push(TokenKind::LambdaPlaceholder(name), span);
            }
            _ => {
                let kind = self.read_operator(span)?;
                self.push(kind, span);
            }
        }
        Ok(())
    }

    /// A `.` directly after a name or closing delimiter is member access,
    /// not a placeholder.
    fn follows_operand(&self) -> bool {
        matches!(self.previous(), Some(p) if is_ident_char(p) || matches!(p, ')' | ']' | '}'))
    }

    fn read_operator(&mut self, span: Span) -> Result<TokenKind, LexError> {
        let c = self.current();
        let next = self.peek_ahead(1);
        let (kind, width) = match (c, next) {
            ('<', '=') => (TokenKind::LessEqual, 2),
            ('>', '=') => (TokenKind::GreaterEqual, 2),
            ('=', '=') => (TokenKind::EqualEqual, 2),
            ('!', '=') => (TokenKind::BangEqual, 2),
            ('|', '>') => (TokenKind::Pipe, 2),
            ('{', _) => (TokenKind::LBrace, 1),
            ('}', _) => (TokenKind::RBrace, 1),
            ('(', _) => (TokenKind::LParen, 1),
            (')', _) => (TokenKind::RParen, 1),
            ('[', _) => (TokenKind::LBracket, 1),
            (']', _) => (TokenKind::RBracket, 1),
            (',', _) => (TokenKind::Comma, 1),
            (':', _) => (TokenKind::Colon, 1),
            ('.', _) => (TokenKind::Dot, 1),
            (';', _) => (TokenKind::Semicolon, 1),
            ('=', _) => (TokenKind::Assign, 1),
            ('+', _) => (TokenKind::Plus, 1),
            ('-', _) => (TokenKind::Minus, 1),
            ('*', _) => (TokenKind::Star, 1),
            ('/', _) => (TokenKind::Slash, 1),
            ('%', _) => (TokenKind::Percent, 1),
            ('^', _) => (TokenKind::Caret, 1),
            ('<', _) => (TokenKind::Less, 1),
            ('>', _) => (TokenKind::Greater, 1),
            ('~', _) => (TokenKind::Tilde, 1),
            _ => {
                return Err(self.error(
                    span,
                    "unrecognized character",
                    self.snippet_from(self.position),
                ))
            }
        };
        for _ in 0..width {
            self.advance();
        }
        Ok(kind)
    }

    fn read_ident(&mut self) -> String {
        let mut word = String::new();
        while is_ident_char(self.current()) {
            word.push(self.advance());
        }
        if self.current() == '?' {
            word.push(self.advance());
        }
        word
    }

    fn read_number(&mut self, span: Span) -> Result<(), LexError> {
        let start = self.position;
        let mut text = String::new();
        while self.current().is_ascii_digit() {
            text.push(self.advance());
        }

        let is_float = self.current() == '.' && self.peek_ahead(1).is_ascii_digit();
        if is_float {
            text.push(self.advance());
            while self.current().is_ascii_digit() {
                text.push(self.advance());
            }
            let value = text.parse::<f64>().map_err(|_| {
                self.error(span, "invalid float literal", self.snippet_from(start))
            })?;
            self.push(TokenKind::Float(value), span);
        } else {
            let value = text.parse::<i64>().map_err(|_| {
                self.error(span, "integer literal too large", self.snippet_from(start))
            })?;
            self.push(TokenKind::Integer(value), span);
        }

        if is_ident_start(self.current()) {
            return Err(self.error(
                span,
                "invalid numeric literal",
                self.snippet_from(start),
            ));
        }
        Ok(())
    }

    fn read_string(&mut self, span: Span) -> Result<(), LexError> {
        let start = self.position;
        self.advance(); // opening quote
        let mut content = String::new();

        loop {
            if self.is_eof() {
                return Err(self.error(span, "unterminated string", self.snippet_from(start)));
            }
            match self.advance() {
                '"' => break,
                '\\' => {
                    let escape_span = self.span();
                    let escaped = self.advance();
                    content.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '\\' => '\\',
                        '"' => '"',
                        '{' => '{',
                        '}' => '}',
                        '\0' if self.is_eof() => {
                            return Err(self.error(
                                span,
                                "unterminated string",
                                self.snippet_from(start),
                            ))
                        }
                        other => {
                            return Err(self.error(
                                escape_span,
                                "unknown escape sequence",
                                format!("\\{}", other),
                            ))
                        }
                    });
                }
                c => content.push(c),
            }
        }

        self.push(TokenKind::String(content), span);
        Ok(())
    }

    /// Scan `"..."` after the `f` prefix, keeping the text raw.
    ///
    /// Quotes inside `{...}` belong to nested string literals and do not
    /// terminate the outer literal.
    fn read_interpolated(&mut self, span: Span) -> Result<(), LexError> {
        let start = self.position;
        self.advance(); // opening quote
        let mut raw = String::new();
        let mut depth = 0usize;

        loop {
            if self.is_eof() {
                return Err(self.error(
                    span,
                    "unterminated interpolated string",
                    self.snippet_from(start),
                ));
            }
            let c = self.advance();
            match c {
                '"' if depth == 0 => break,
                '\\' => {
                    raw.push(c);
                    if self.is_eof() {
                        continue;
                    }
                    raw.push(self.advance());
                }
                '{' => {
                    depth += 1;
                    raw.push(c);
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    raw.push(c);
                }
                '"' => {
                    // nested string literal inside an embedded expression
                    raw.push(c);
                    loop {
                        if self.is_eof() {
                            return Err(self.error(
                                span,
                                "unterminated string in interpolation",
                                self.snippet_from(start),
                            ));
                        }
                        let inner = self.advance();
                        raw.push(inner);
                        if inner == '\\' && !self.is_eof() {
                            raw.push(self.advance());
                        } else if inner == '"' {
                            break;
                        }
                    }
                }
                _ => raw.push(c),
            }
        }

        self.push(TokenKind::InterpolatedStringLiteral(raw), span);
        Ok(())
    }

    fn read_docstring(&mut self, span: Span) -> Result<(), LexError> {
        let start = self.position;
        for _ in 0..3 {
            self.advance();
        }
        let mut content = String::new();
        loop {
            if self.is_eof() {
                return Err(self.error(span, "unterminated docstring", self.snippet_from(start)));
            }
            if self.current() == '"' && self.peek_ahead(1) == '"' && self.peek_ahead(2) == '"' {
                for _ in 0..3 {
                    self.advance();
                }
                break;
            }
            content.push(self.advance());
        }
        self.push(TokenKind::Docstring(trim_docstring(&content)), span);
        Ok(())
    }
}

/// Trim every line and drop leading/trailing blank lines.
pub fn trim_docstring(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().map(str::trim).collect();
    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.to_string())
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("42 3.5 7"),
            vec![
                TokenKind::Integer(42),
                TokenKind::Float(3.5),
                TokenKind::Integer(7),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_integer_then_dot_call_is_not_float() {
        assert_eq!(
            kinds("1.x"),
            vec![TokenKind::Integer(1), TokenKind::Dot, ident("x"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("module function if else return library as modules"),
            vec![
                TokenKind::Module,
                TokenKind::Function,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Return,
                TokenKind::Library,
                TokenKind::As,
                ident("modules"),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_module_ref() {
        assert_eq!(
            kinds("__module__.f"),
            vec![TokenKind::ModuleRef, TokenKind::Dot, ident("f"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_comments_are_dropped() {
        assert_eq!(
            kinds("x # the x\n# whole line\ny"),
            vec![ident("x"), ident("y"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#""a\n\"b\"\\""#),
            vec![TokenKind::String("a\n\"b\"\\".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("x = \"abc").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 5);
        assert_eq!(err.message, "unterminated string");
    }

    #[test]
    fn test_unrecognized_character_position() {
        let err = tokenize("a = 1\nb = @foo").unwrap_err();
        assert_eq!((err.line, err.column), (2, 5));
        assert_eq!(err.snippet, "@foo");
    }

    #[test]
    fn test_symbol_and_colon() {
        assert_eq!(
            kinds(":ok n: Int"),
            vec![
                TokenKind::Symbol("ok".to_string()),
                ident("n"),
                TokenKind::Colon,
                ident("Int"),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lambda_placeholders() {
        assert_eq!(
            kinds("~ .x * .y"),
            vec![
                TokenKind::Tilde,
                TokenKind::LambdaPlaceholder("x".to_string()),
                TokenKind::Star,
                TokenKind::LambdaPlaceholder("y".to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_qualified_name_is_dot() {
        assert_eq!(
            kinds("Enum.map(.x)"),
            vec![
                ident("Enum"),
                TokenKind::Dot,
                ident("map"),
                TokenKind::LParen,
                TokenKind::LambdaPlaceholder("x".to_string()),
                TokenKind::RParen,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("|> <= >= == != < > = ^ ~"),
            vec![
                TokenKind::Pipe,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Assign,
                TokenKind::Caret,
                TokenKind::Tilde,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_interpolated_string_kept_raw() {
        assert_eq!(
            kinds(r#"f"sum: {Maps.get(m, "k}")} done""#),
            vec![
                TokenKind::InterpolatedStringLiteral(r#"sum: {Maps.get(m, "k}")} done"#.to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_f_identifier_is_not_interpolation() {
        assert_eq!(kinds("f(1)")[0], ident("f"));
    }

    #[test]
    fn test_docstring_trimmed() {
        assert_eq!(
            kinds("\"\"\"\n   Adds things.\n   Returns a number.\n\"\"\""),
            vec![
                TokenKind::Docstring("Adds things.\nReturns a number.".to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_spans_track_lines() {
        let tokens = tokenize("a\n  b").unwrap();
        assert_eq!(tokens[0].span, Span::new(1, 1));
        assert_eq!(tokens[1].span, Span::new(2, 3));
    }
}
