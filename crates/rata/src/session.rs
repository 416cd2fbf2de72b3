//! Statement driver with per-statement rollback
//!
//! A [`Session`] owns the current [`Context`] and an [`Evaluator`]. Each
//! statement runs against the current context and its result context is
//! adopted only when it succeeds, so a fault leaves the session exactly as
//! it was before the failing statement.

use std::sync::Arc;

use tracing::warn;

use crate::config::EvalConfig;
use crate::context::Context;
use crate::error::Result;
use crate::eval::Evaluator;
use crate::lexer::tokenize;
use crate::native::NativeRegistry;
use crate::parser::{parse, parse_repl};
use crate::value::Value;

/// An interactive or scripted evaluation session.
#[derive(Debug, Clone)]
pub struct Session {
    evaluator: Evaluator,
    context: Context,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EvalConfig::default())
    }
}

impl Session {
    /// Session over the standard native registry.
    pub fn new(config: EvalConfig) -> Self {
        Self::with_registry(Arc::new(NativeRegistry::standard()), config)
    }

    /// Session over a caller-supplied registry.
    pub fn with_registry(registry: Arc<NativeRegistry>, config: EvalConfig) -> Self {
        Self {
            evaluator: Evaluator::new(registry, config),
            context: Context::new(),
        }
    }

    /// Current bindings, aliases and modules.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Evaluate one REPL line: zero or more statements.
    ///
    /// Returns the value of the last statement (`nil` for an empty line).
    /// Statements before a failing one keep their bindings.
    pub fn eval_line(&mut self, source: &str) -> Result<Value> {
        let stmts = parse_repl(tokenize(source)?)?;

        let mut last_value = Value::Nil;
        for stmt in &stmts {
            match self.evaluator.eval(stmt, &self.context) {
                Ok((value, next)) => {
                    last_value = value;
                    self.context = next;
                }
                Err(fault) => {
                    warn!(error = %fault, "statement failed; bindings rolled back");
                    return Err(fault.into());
                }
            }
        }
        Ok(last_value)
    }

    /// Evaluate a full `module` source unit and adopt its resulting context.
    pub fn run_script(&mut self, source: &str) -> Result<Context> {
        let module = parse(tokenize(source)?)?;
        let (_, context) = self.evaluator.eval_module(&module, &self.context)?;
        self.context = context;
        Ok(self.context.clone())
    }
}
