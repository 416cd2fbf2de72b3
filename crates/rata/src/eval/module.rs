//! Module evaluation
//!
//! A source unit runs in four steps:
//!
//! 1. every `library X [as Y]` import is checked against the native
//!    registry and the user modules already in the context, and its alias
//!    recorded;
//! 2. `__module__` is bound to the module name;
//! 3. the body runs statement by statement, threading the context; a
//!    top-level `return` ends the module early with its value;
//! 4. the bindings the body produced are registered as a user module so
//!    later code can call `Name.f(...)`.

use tracing::{debug, info};

use crate::ast::{LibraryImport, Module};
use crate::context::Context;
use crate::error::EvalFault;
use crate::value::Value;

use super::path::MODULE_REF;
use super::{stmt, ControlFlow, Evaluator};

/// Evaluate a module, returning its final value and the context with the
/// module registered.
pub fn eval_module(
    module: &Module,
    ev: &mut Evaluator,
    ctx: &Context,
) -> Result<(Value, Context), EvalFault> {
    let mut scope = ctx.clone();
    for import in &module.imports {
        scope = resolve_import(import, ev, &scope)?;
    }
    scope = scope.bind(MODULE_REF, Value::string(module.name.as_str()));

    let mut last_value = Value::Nil;
    for s in &module.body {
        match stmt::exec(s, ev, &scope) {
            Ok((value, next)) => {
                last_value = value;
                scope = next;
            }
            Err(ControlFlow::Return { value }) => {
                last_value = value;
                break;
            }
            Err(ControlFlow::Fault(fault)) => return Err(fault),
        }
    }

    let exports = scope.identifier_map().without(MODULE_REF);
    info!(module = %module.name, bindings = exports.len(), "module loaded");

    let scope = scope.with_module(module.name.as_str(), exports);
    Ok((last_value, scope))
}

fn resolve_import(
    import: &LibraryImport,
    ev: &Evaluator,
    ctx: &Context,
) -> Result<Context, EvalFault> {
    let name = &import.module_name;
    if !ev.registry().has_module(name) && !ctx.has_module(name) {
        return Err(EvalFault::UnknownModule { name: name.clone() });
    }

    match &import.alias {
        Some(alias) => {
            debug!(module = %name, alias = %alias, "library imported");
            Ok(ctx.with_alias(alias.as_str(), name.as_str()))
        }
        None => {
            debug!(module = %name, "library imported");
            Ok(ctx.clone())
        }
    }
}
