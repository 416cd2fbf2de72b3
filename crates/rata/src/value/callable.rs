//! Callable value types: closures, lambdas and native references

use std::fmt;
use std::sync::Arc;

use crate::ast::{Expr, Stmt};
use crate::context::Context;

/// What a closure runs when called.
#[derive(Debug, Clone)]
pub enum ClosureBody {
    /// `function(...) { ... }`: a statement list honouring `return`
    Function(Arc<Vec<Stmt>>),

    /// `~ expr`: a single expression; parameters live in the placeholder scope
    Lambda(Arc<Expr>),
}

/// A function value: parameters, body and the context it was created in.
///
/// The captured context is a persistent snapshot; later rebinding in the
/// defining scope never reaches it.
#[derive(Clone)]
pub struct Closure {
    /// Parameter names (ordinary names or placeholder names)
    pub params: Vec<String>,

    /// Body to evaluate
    pub body: ClosureBody,

    /// Context at creation time
    pub captured: Context,

    /// Name the closure was first assigned to; rebound to the closure
    /// itself on every call so it can recurse
    pub name: Option<String>,
}

impl Closure {
    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether this closure came from a `~` lambda.
    pub fn is_lambda(&self) -> bool {
        matches!(self.body, ClosureBody::Lambda(_))
    }

    /// A copy carrying `name` as its self-reference.
    pub fn named(&self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self.clone()
        }
    }

    /// Label used in arity errors and traces.
    pub fn describe(&self) -> String {
        match (&self.name, self.is_lambda()) {
            (Some(name), _) => format!("{}/{}", name, self.arity()),
            (None, true) => format!("lambda/{}", self.arity()),
            (None, false) => format!("function/{}", self.arity()),
        }
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("lambda", &self.is_lambda())
            .finish()
    }
}

/// A `Module.function` reference into the native registry.
///
/// Arity is resolved when the reference is called.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NativeRef {
    /// Registered module name
    pub module: String,

    /// Function name within the module
    pub name: String,
}

impl NativeRef {
    /// Create a native reference.
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }
}
