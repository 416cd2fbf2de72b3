//! Name resolution: identifiers, placeholders and qualified references

use crate::ast::{Identifier, LambdaParam, QualifiedIdentifier};
use crate::context::Context;
use crate::error::EvalFault;
use crate::value::{NativeRef, Value};

use super::{ControlFlow, Evaluate, Evaluator};

/// Binding holding the name of the module being evaluated.
pub const MODULE_REF: &str = "__module__";

impl Evaluate for Identifier {
    fn eval(&self, _ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow> {
        ctx.lookup(&self.name).cloned().ok_or_else(|| {
            EvalFault::UnboundName {
                name: self.name.clone(),
            }
            .into()
        })
    }
}

impl Evaluate for LambdaParam {
    fn eval(&self, _ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow> {
        ctx.lambda_param(&self.name).cloned().ok_or_else(|| {
            EvalFault::UnboundLambdaParam {
                name: self.name.clone(),
            }
            .into()
        })
    }
}

impl Evaluate for QualifiedIdentifier {
    fn eval(&self, ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow> {
        Ok(resolve_qualified(ev, ctx, &self.module, &self.name, 0)?)
    }
}

/// Resolve `module.name` to a value.
///
/// Lookup order: `__module__` (the current context, then the module it
/// names), alias table, user modules, native registry. `arity` only feeds
/// the `UnknownFunction` fault; natives resolve their arity at call time.
pub fn resolve_qualified(
    ev: &Evaluator,
    ctx: &Context,
    module: &str,
    name: &str,
    arity: usize,
) -> Result<Value, EvalFault> {
    if module == MODULE_REF {
        return resolve_in_current_module(ctx, name, arity);
    }

    let target = ctx.resolve_alias(module).unwrap_or(module);

    if let Some(bindings) = ctx.module(target) {
        return bindings
            .get(name)
            .cloned()
            .ok_or_else(|| unknown_function(target, name, arity));
    }

    if ev.registry().has_module(target) {
        if ev.registry().has_function(target, name) {
            return Ok(Value::Native(NativeRef::new(target, name)));
        }
        return Err(unknown_function(target, name, arity));
    }

    Err(EvalFault::UnknownModule {
        name: module.to_string(),
    })
}

fn resolve_in_current_module(ctx: &Context, name: &str, arity: usize) -> Result<Value, EvalFault> {
    if let Some(value) = ctx.lookup(name) {
        return Ok(value.clone());
    }
    let current = match ctx.lookup(MODULE_REF) {
        Some(Value::Str(module)) => module.to_string(),
        _ => {
            return Err(EvalFault::UnboundName {
                name: MODULE_REF.to_string(),
            })
        }
    };
    ctx.module(&current)
        .and_then(|bindings| bindings.get(name).cloned())
        .ok_or_else(|| unknown_function(&current, name, arity))
}

fn unknown_function(module: &str, name: &str, arity: usize) -> EvalFault {
    EvalFault::UnknownFunction {
        module: module.to_string(),
        name: name.to_string(),
        arity,
    }
}
