//! `Core`: the prelude module, also reachable through unqualified calls

use super::{expect_str, Invoke, NativeRegistry, NativeResult, PRELUDE_MODULE};
use crate::value::Value;

pub(super) fn register(registry: &mut NativeRegistry) {
    // Conversion and inspection
    registry.register(PRELUDE_MODULE, "to_string", 1, core_to_string);
    registry.register(PRELUDE_MODULE, "inspect", 1, core_inspect);
    registry.register(PRELUDE_MODULE, "type_of", 1, core_type_of);
    registry.register(PRELUDE_MODULE, "print", 1, core_print);

    // Predicates
    registry.register(PRELUDE_MODULE, "is_nil", 1, core_is_nil);
    registry.register(PRELUDE_MODULE, "not", 1, core_not);

    // Exception records
    registry.register(PRELUDE_MODULE, "is_exception", 1, core_is_exception);
    registry.register(PRELUDE_MODULE, "exception", 2, core_exception);
    registry.register(PRELUDE_MODULE, "error", 1, core_error);
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Function Implementations
// ═══════════════════════════════════════════════════════════════════════

fn core_to_string(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    Ok(Value::string(args[0].to_string()))
}

fn core_inspect(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    Ok(Value::string(format!("{:?}", args[0])))
}

fn core_type_of(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    Ok(Value::string(args[0].type_name()))
}

fn core_print(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    println!("{}", args[0]);
    Ok(Value::ok())
}

fn core_is_nil(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    Ok(Value::Bool(args[0].is_nil()))
}

fn core_not(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    Ok(Value::Bool(!args[0].is_truthy()))
}

fn core_is_exception(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    Ok(Value::Bool(args[0].is_exception()))
}

/// `exception(kind, message)`; `kind` may be a symbol or a string.
fn core_exception(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let kind = match &args[0] {
        Value::Symbol(name) => name.to_string(),
        other => expect_str(other, "Core.exception kind")?.to_string(),
    };
    let message = args[1].to_string();
    Ok(Value::exception(kind, message))
}

fn core_error(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    Ok(Value::exception("error", args[0].to_string()))
}
