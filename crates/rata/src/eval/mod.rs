//! Tree-walking evaluation
//!
//! Expressions implement [`Evaluate`]; statements thread a [`Context`]
//! forward and are driven by [`Evaluator::eval`]. Early `return` travels
//! on the error channel as [`ControlFlow::Return`] and is caught at the
//! nearest function or lambda call.

pub mod binary;
pub mod call;
pub mod control;
pub mod function;
pub mod if_expr;
pub mod interpolation;
pub mod literal;
pub mod module;
pub mod path;
pub mod stmt;

use std::sync::Arc;

use tracing::debug;

use crate::ast::{Expr, Module, Stmt};
use crate::config::{with_stack, EvalConfig};
use crate::context::Context;
use crate::error::EvalFault;
use crate::native::NativeRegistry;
use crate::value::Value;

pub use control::ControlFlow;
pub use if_expr::eval_block;

/// Trait for evaluating AST nodes to values.
///
/// This is the core abstraction for the tree-walking interpreter.
/// Each expression node type implements this trait.
pub trait Evaluate {
    /// Evaluate this node in the given context.
    fn eval(&self, ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow>;
}

/// The evaluator: native registry, configuration, and current call depth.
///
/// Holds no bindings of its own; every binding lives in the [`Context`]
/// passed in and returned.
#[derive(Debug, Clone)]
pub struct Evaluator {
    registry: Arc<NativeRegistry>,
    config: EvalConfig,
    depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(Arc::new(NativeRegistry::standard()), EvalConfig::default())
    }
}

impl Evaluator {
    /// Create an evaluator over a shared native registry.
    pub fn new(registry: Arc<NativeRegistry>, config: EvalConfig) -> Self {
        Self {
            registry,
            config,
            depth: 0,
        }
    }

    /// The native registry.
    pub fn registry(&self) -> &Arc<NativeRegistry> {
        &self.registry
    }

    /// The active configuration.
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Current closure call depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Evaluate one top-level statement, returning its value and the
    /// possibly extended context.
    ///
    /// A `return` at top level yields its value with the context unchanged.
    pub fn eval(&mut self, stmt: &Stmt, ctx: &Context) -> Result<(Value, Context), EvalFault> {
        debug!(statement = stmt_kind_name(stmt), "evaluating statement");
        match stmt::exec(stmt, self, ctx) {
            Ok(result) => Ok(result),
            Err(ControlFlow::Return { value }) => Ok((value, ctx.clone())),
            Err(ControlFlow::Fault(fault)) => Err(fault),
        }
    }

    /// Evaluate a standalone expression.
    pub fn eval_expr(&mut self, expr: &Expr, ctx: &Context) -> Result<Value, EvalFault> {
        expr.eval(self, ctx).or_else(ControlFlow::into_result)
    }

    /// Evaluate a whole `module` unit. See [`module`] for the steps.
    pub fn eval_module(
        &mut self,
        module: &Module,
        ctx: &Context,
    ) -> Result<(Value, Context), EvalFault> {
        module::eval_module(module, self, ctx)
    }

    /// Call any callable value with already-evaluated arguments.
    pub fn call(&mut self, callee: &Value, args: Vec<Value>) -> Result<Value, EvalFault> {
        call::call_value(self, callee, args)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Expr {
    fn eval(&self, ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow> {
        with_stack(|| match self {
            Expr::Literal(expr) => expr.eval(ev, ctx),
            Expr::Symbol(expr) => expr.eval(ev, ctx),
            Expr::Tuple(expr) => expr.eval(ev, ctx),
            Expr::Vector(expr) => expr.eval(ev, ctx),

            Expr::Identifier(expr) => expr.eval(ev, ctx),
            Expr::QualifiedIdentifier(expr) => expr.eval(ev, ctx),
            Expr::LambdaParam(expr) => expr.eval(ev, ctx),

            Expr::BinaryOp(expr) => expr.eval(ev, ctx),
            Expr::If(expr) => expr.eval(ev, ctx),
            Expr::FunctionCall(expr) => expr.eval(ev, ctx),

            Expr::Function(expr) => expr.eval(ev, ctx),
            Expr::Lambda(expr) => expr.eval(ev, ctx),

            Expr::InterpolatedString(expr) => expr.eval(ev, ctx),
        })
    }
}

/// Get a human-readable name for a statement kind.
fn stmt_kind_name(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Assignment(_) => "assignment",
        Stmt::Return(_) => "return",
        Stmt::Docstring(_) => "docstring",
        Stmt::Expr(_) => "expression",
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Source-level helpers for evaluator unit tests.

    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse_repl;

    /// Evaluate REPL-style source with a fresh evaluator; value of the last statement.
    pub fn run(source: &str) -> Result<Value, EvalFault> {
        run_with(&mut Evaluator::default(), source)
    }

    /// Evaluate REPL-style source with `ev`, threading one context through.
    pub fn run_with(ev: &mut Evaluator, source: &str) -> Result<Value, EvalFault> {
        let tokens = tokenize(source).expect("source should lex");
        let stmts = parse_repl(tokens).expect("source should parse");
        let mut ctx = Context::new();
        let mut last = Value::Nil;
        for stmt in &stmts {
            let (value, next) = ev.eval(stmt, &ctx)?;
            last = value;
            ctx = next;
        }
        Ok(last)
    }
}
