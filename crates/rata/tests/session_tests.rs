//! Session driver and Host Function Bridge tests

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rata::*;

fn session_with_boom() -> Session {
    let mut registry = NativeRegistry::standard();
    registry.register("Test", "boom", 0, |_, _| Err("boom".to_string()));
    registry.register("Test", "count", -1, |args, _| Ok(Value::Int(args.len() as i64)));
    registry.register("Test", "twice", 1, |args, invoke| {
        let once = invoke.invoke(&args[0], vec![])?;
        let again = invoke.invoke(&args[0], vec![])?;
        Ok(Value::tuple(vec![once, again]))
    });
    Session::with_registry(Arc::new(registry), EvalConfig::default())
}

// ═══════════════════════════════════════════════════════════════════════
// Native Bridge
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_native_failure_unwraps_to_fault() {
    let mut session = session_with_boom();
    assert_eq!(
        session.eval_line("x = Test.boom()"),
        Err(Error::Eval(EvalFault::NativeError {
            message: "boom".to_string()
        }))
    );
    assert!(!session.context().contains("x"));
}

#[test]
fn test_variadic_native() {
    let mut session = session_with_boom();
    assert_eq!(session.eval_line("Test.count()"), Ok(Value::Int(0)));
    assert_eq!(session.eval_line("Test.count(1, 2, 3)"), Ok(Value::Int(3)));
}

#[test]
fn test_native_invokes_closure() {
    let mut session = session_with_boom();
    assert_eq!(
        session.eval_line("Test.twice(function() { :hi })"),
        Ok(Value::tuple(vec![Value::symbol("hi"), Value::symbol("hi")]))
    );
}

#[test]
fn test_callback_fault_reaches_native_as_message() {
    let mut session = Session::default();
    let result = session.eval_line("Enum.map([1, 0], ~ 1 / .x)");
    match result {
        Err(Error::Eval(EvalFault::NativeError { message })) => {
            assert!(message.contains("Division by zero"), "{}", message)
        }
        other => panic!("expected native error, got {:?}", other),
    }
}

#[test]
fn test_custom_module_importable() {
    let mut session = session_with_boom();
    let ctx = session
        .run_script("library Test as T\nmodule App {\n  n = T.count(1, 2)\n}")
        .expect("script runs");
    assert_eq!(ctx.lookup("n"), Some(&Value::Int(2)));
}

// ═══════════════════════════════════════════════════════════════════════
// Session Rollback
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_fault_keeps_previous_context() {
    let mut session = Session::default();
    session.eval_line("total = 10").expect("bind");
    assert!(session.eval_line("total = total + missing").is_err());
    assert_eq!(session.eval_line("total"), Ok(Value::Int(10)));
}

#[test]
fn test_lex_error_reports_location() {
    let mut session = Session::default();
    let err = session.eval_line("x = 1 @ 2").expect_err("lex error");
    assert_eq!(err.kind(), "lex");
    assert_eq!(err.location(), Some(Span::new(1, 7)));
}

#[test]
fn test_parse_error_reports_location() {
    let mut session = Session::default();
    let err = session.eval_line("f(1,").expect_err("parse error");
    assert_eq!(err.kind(), "parse");
    assert!(err.location().is_some());
}

#[test]
fn test_stack_overflow_is_recoverable() {
    let mut session = Session::new(EvalConfig::with_max_call_depth(50));
    session
        .eval_line("down = function(n) { down(n + 1) }")
        .expect("bind");
    assert_eq!(
        session.eval_line("down(0)"),
        Err(Error::Eval(EvalFault::StackOverflow { depth: 51, max: 50 }))
    );
    assert_eq!(session.eval_line("1 + 1"), Ok(Value::Int(2)));
}

#[test]
fn test_deep_recursion_at_default_limit() {
    let mut session = Session::default();
    session
        .eval_line("down = function(n) { if n <= 0 { 0 } else { 1 + down(n - 1) } }")
        .expect("bind");
    assert_eq!(session.eval_line("down(900)"), Ok(Value::Int(900)));
    assert_eq!(session.eval_line("down(999)"), Ok(Value::Int(999)));
    assert_eq!(
        session.eval_line("down(5000)"),
        Err(Error::Eval(EvalFault::StackOverflow {
            depth: 1001,
            max: 1000
        }))
    );
}

#[test]
fn test_deep_recursion_through_native_callbacks() {
    let mut session = Session::default();
    session
        .eval_line("nest = function(n) { if n <= 0 { 0 } else { Enum.sum(Enum.map([n], ~ nest(.x - 1) + 1)) } }")
        .expect("bind");
    assert_eq!(session.eval_line("nest(400)"), Ok(Value::Int(400)));
}

#[test]
fn test_script_then_repl_calls() {
    let mut session = Session::default();
    session
        .run_script(
            "library Enum\n\
             module Stats2 {\n\
               \"\"\"Averages.\"\"\"\n\
               mean = function(xs) { Enum.sum(xs) / Enum.count(xs) }\n\
             }",
        )
        .expect("script runs");
    assert_eq!(
        session.eval_line("Stats2.mean([1, 2, 3])"),
        Ok(Value::Float(2.0))
    );
}

#[test]
fn test_unknown_import_rejects_script() {
    let mut session = Session::default();
    let err = session
        .run_script("library Ghost\nmodule M { 1 }")
        .expect_err("unknown import");
    assert_eq!(
        err,
        Error::Eval(EvalFault::UnknownModule {
            name: "Ghost".to_string()
        })
    );
    assert!(session.context().module_names().is_empty());
}
