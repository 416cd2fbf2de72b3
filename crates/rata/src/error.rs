//! Error types for lexing, parsing and evaluation

use thiserror::Error;

use crate::lexer::Span;
use crate::value::Value;

/// An unrecognized character sequence or unterminated literal.
///
/// Lexing does not recover: the whole source unit must be discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Lex error at {line}:{column}: {message} near `{snippet}`")]
pub struct LexError {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (1-indexed)
    pub column: usize,

    /// What went wrong
    pub message: String,

    /// The offending source text
    pub snippet: String,
}

impl LexError {
    /// Source location of the failure.
    pub fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }
}

/// The first structural mismatch found by the parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Parse error{}: expected {expected}, found {found}", fmt_position(.position))]
pub struct ParseError {
    /// What the grammar required at this point
    pub expected: String,

    /// What was actually there
    pub found: String,

    /// Where it was found (`None` only for synthetic errors)
    pub position: Option<Span>,
}

impl ParseError {
    /// Create a parse error at a position.
    pub fn new(expected: impl Into<String>, found: impl Into<String>, position: Span) -> Self {
        Self {
            expected: expected.into(),
            found: found.into(),
            position: Some(position),
        }
    }
}

fn fmt_position(position: &Option<Span>) -> String {
    match position {
        Some(span) => format!(" at {}", span),
        None => String::new(),
    }
}

/// A runtime fault. Terminal for the current top-level statement only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalFault {
    /// Identifier not bound in the context
    #[error("Unbound name: `{name}`")]
    UnboundName {
        /// The unresolved name
        name: String,
    },

    /// A `.name` placeholder evaluated outside a lambda call
    #[error("Unbound lambda parameter: `.{name}`")]
    UnboundLambdaParam {
        /// The placeholder name (without the dot)
        name: String,
    },

    /// Wrong number of arguments for a closure or lambda
    #[error("Arity mismatch calling {name}: expected {expected} argument(s), got {got}")]
    ArityMismatch {
        /// Callee description
        name: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// No registered native or module entry for this module/function/arity
    #[error("Unknown function: {module}.{name}/{arity}")]
    UnknownFunction {
        /// Module the lookup was made in
        module: String,
        /// Function name
        name: String,
        /// Argument count of the attempted call
        arity: usize,
    },

    /// A qualified reference or import to a module nobody registered
    #[error("Unknown module: {name}")]
    UnknownModule {
        /// Module name or alias
        name: String,
    },

    /// The native bridge returned a failure
    #[error("Native error: {message}")]
    NativeError {
        /// Failure message from the native function
        message: String,
    },

    /// Operand kinds unsuitable for an operator
    #[error("Type mismatch: cannot apply `{op}` to {left} and {right}")]
    TypeMismatch {
        /// Operator
        op: String,
        /// Left operand type
        left: String,
        /// Right operand type
        right: String,
    },

    /// Integer or float division/remainder by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Checked integer arithmetic overflowed
    #[error("Integer overflow")]
    IntegerOverflow,

    /// Call depth exceeded the configured limit
    #[error("Stack overflow: call depth {depth} exceeds limit {max}")]
    StackOverflow {
        /// Depth reached
        depth: usize,
        /// Configured limit
        max: usize,
    },

    /// Attempt to call a value that is not a function
    #[error("Not callable: value of type {type_name}")]
    NotCallable {
        /// Type of the value
        type_name: String,
    },
}

impl EvalFault {
    /// Build a `TypeMismatch` from the offending operand values.
    pub fn type_mismatch(op: &str, left: &Value, right: &Value) -> Self {
        EvalFault::TypeMismatch {
            op: op.to_string(),
            left: left.type_name().to_string(),
            right: right.type_name().to_string(),
        }
    }
}

/// Any failure of the lex → parse → evaluate pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Lexing failed
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Parsing failed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Evaluation faulted
    #[error(transparent)]
    Eval(#[from] EvalFault),
}

impl Error {
    /// Short error kind for reporting: `lex`, `parse` or `eval`.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Lex(_) => "lex",
            Error::Parse(_) => "parse",
            Error::Eval(_) => "eval",
        }
    }

    /// Source location, when one is known.
    pub fn location(&self) -> Option<Span> {
        match self {
            Error::Lex(e) => Some(e.span()),
            Error::Parse(e) => e.position,
            Error::Eval(_) => None,
        }
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_display() {
        let err = LexError {
            line: 2,
            column: 5,
            message: "unexpected character".to_string(),
            snippet: "@".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Lex error at 2:5: unexpected character near `@`"
        );
    }

    #[test]
    fn test_parse_error_display_with_position() {
        let err = ParseError::new("`}`", "end of input", Span::new(3, 1));
        assert_eq!(
            err.to_string(),
            "Parse error at 3:1: expected `}`, found end of input"
        );
    }

    #[test]
    fn test_error_kind_and_location() {
        let lex: Error = LexError {
            line: 1,
            column: 2,
            message: "x".to_string(),
            snippet: "x".to_string(),
        }
        .into();
        assert_eq!(lex.kind(), "lex");
        assert_eq!(lex.location(), Some(Span::new(1, 2)));

        let eval: Error = EvalFault::DivisionByZero.into();
        assert_eq!(eval.kind(), "eval");
        assert_eq!(eval.location(), None);
    }

    #[test]
    fn test_type_mismatch_names_operands() {
        let fault = EvalFault::type_mismatch("+", &Value::Int(1), &Value::string("a"));
        assert_eq!(
            fault.to_string(),
            "Type mismatch: cannot apply `+` to integer and string"
        );
    }
}
