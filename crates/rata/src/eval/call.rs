//! Function call evaluation

use std::sync::Arc;

use tracing::trace;

use crate::ast::{Expr, FunctionCall};
use crate::context::Context;
use crate::error::EvalFault;
use crate::native::{Invoke, NativeResult, PRELUDE_MODULE};
use crate::value::{Closure, ClosureBody, NativeRef, Value};

use super::literal::eval_elements;
use super::path::resolve_qualified;
use super::{eval_block, ControlFlow, Evaluate, Evaluator};

impl Evaluate for FunctionCall {
    fn eval(&self, ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow> {
        let callee = match self.function.as_ref() {
            // Unbound bare names fall back to the prelude
            Expr::Identifier(id)
                if !ctx.contains(&id.name)
                    && ev.registry().has_function(PRELUDE_MODULE, &id.name) =>
            {
                Value::Native(NativeRef::new(PRELUDE_MODULE, id.name.as_str()))
            }
            Expr::QualifiedIdentifier(q) => {
                resolve_qualified(ev, ctx, &q.module, &q.name, self.args.len())?
            }
            other => other.eval(ev, ctx)?,
        };

        let args = eval_elements(&self.args, ev, ctx)?;

        Ok(call_value(ev, &callee, args)?)
    }
}

/// Call a value as a function.
///
/// # Errors
///
/// Returns `NotCallable` if the value is not a closure or native reference,
/// `ArityMismatch` if a closure gets the wrong number of arguments, and
/// `UnknownFunction` if no native is registered at this arity.
pub fn call_value(ev: &mut Evaluator, callee: &Value, args: Vec<Value>) -> Result<Value, EvalFault> {
    match callee {
        Value::Closure(closure) => call_closure(ev, closure, args),
        Value::Native(native) => call_native(ev, native, args),
        other => Err(EvalFault::NotCallable {
            type_name: other.type_name().to_string(),
        }),
    }
}

/// Call a closure.
fn call_closure(
    ev: &mut Evaluator,
    closure: &Arc<Closure>,
    args: Vec<Value>,
) -> Result<Value, EvalFault> {
    // Check arity
    if args.len() != closure.arity() {
        return Err(EvalFault::ArityMismatch {
            name: closure.describe(),
            expected: closure.arity(),
            got: args.len(),
        });
    }

    // Track call depth (stack overflow protection)
    let max = ev.config.max_call_depth;
    if ev.depth >= max {
        return Err(EvalFault::StackOverflow {
            depth: ev.depth + 1,
            max,
        });
    }
    if ev.config.trace {
        trace!(callee = %closure.describe(), depth = ev.depth + 1, "calling closure");
    }

    ev.depth += 1;
    let result = run_closure(ev, closure, args);
    ev.depth -= 1;

    result
}

fn run_closure(
    ev: &mut Evaluator,
    closure: &Arc<Closure>,
    args: Vec<Value>,
) -> Result<Value, EvalFault> {
    let mut scope = closure.captured.clone();
    if let Some(name) = &closure.name {
        scope = scope.bind(name.as_str(), Value::Closure(closure.clone()));
    }

    let result = match &closure.body {
        ClosureBody::Function(body) => {
            for (param, arg) in closure.params.iter().zip(args) {
                scope = scope.bind(param.as_str(), arg);
            }
            eval_block(body, ev, &scope)
        }
        ClosureBody::Lambda(body) => {
            let params = closure.params.iter().cloned().zip(args).collect();
            body.eval(ev, &scope.with_lambda_params(params))
        }
    };

    // Handle return control flow
    result.or_else(ControlFlow::into_result)
}

/// Call a native function through the registry.
fn call_native(ev: &mut Evaluator, native: &NativeRef, args: Vec<Value>) -> Result<Value, EvalFault> {
    let func = ev
        .registry()
        .lookup(&native.module, &native.name, args.len())
        .map(|entry| entry.func.clone())
        .ok_or_else(|| EvalFault::UnknownFunction {
            module: native.module.clone(),
            name: native.name.clone(),
            arity: args.len(),
        })?;

    if ev.config.trace {
        trace!(module = %native.module, function = %native.name, arity = args.len(), "calling native");
    }

    func(&args, ev).map_err(|message| EvalFault::NativeError { message })
}

impl Invoke for Evaluator {
    fn invoke(&mut self, callee: &Value, args: Vec<Value>) -> NativeResult {
        call_value(self, callee, args).map_err(|fault| fault.to_string())
    }
}
