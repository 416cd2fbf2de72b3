//! # Rata
//!
//! A small pipe-oriented scripting language for data transformation.
//!
//! Source text flows through three stages:
//!
//! - **Lexer** ([`lexer`]): characters to positioned tokens
//! - **Parser** ([`parser`]): tokens to the [`ast`]
//! - **Evaluator** ([`eval`]): a tree-walking interpreter over an immutable
//!   [`Context`]
//!
//! Library calls such as `Enum.map` or `Math.sqrt` cross the Host Function
//! Bridge ([`native`]), a registry of native modules keyed by module, name
//! and arity. [`Session`] drives statements one at a time and rolls a
//! failing statement's bindings back.
//!
//! ```
//! use rata::{Session, Value};
//!
//! let mut session = Session::default();
//! session.eval_line("double = ~ .x * 2").unwrap();
//! let total = session.eval_line("[1, 2, 3] |> Enum.map(double) |> Enum.sum()").unwrap();
//! assert_eq!(total, Value::Int(12));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod config;
pub mod context;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod native;
pub mod parser;
pub mod session;
pub mod value;

// Re-export main types
pub use config::EvalConfig;
pub use context::Context;
pub use error::{Error, EvalFault, LexError, ParseError, Result};
pub use eval::{eval_block, ControlFlow, Evaluate, Evaluator};
pub use lexer::{tokenize, Span, Token, TokenKind};
pub use native::{Invoke, NativeRegistry, NativeResult};
pub use parser::{parse, parse_expression, parse_repl};
pub use session::Session;
pub use value::{Closure, ClosureBody, HashableValue, NativeRef, Value};

/// Rata version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
