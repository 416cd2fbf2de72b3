//! Statement execution

use std::sync::Arc;

use crate::ast::Stmt;
use crate::context::Context;
use crate::value::Value;

use super::{ControlFlow, Evaluate, Evaluator};

/// Execute one statement, returning its value and the context that
/// follows it.
///
/// Only assignments extend the context. Assigning an unnamed closure
/// names it, so the body can call itself by that name.
pub fn exec(stmt: &Stmt, ev: &mut Evaluator, ctx: &Context) -> Result<(Value, Context), ControlFlow> {
    match stmt {
        Stmt::Assignment(assign) => {
            let value = match assign.value.eval(ev, ctx)? {
                Value::Closure(closure) if closure.name.is_none() => {
                    Value::Closure(Arc::new(closure.named(assign.name.as_str())))
                }
                other => other,
            };
            let next = ctx.bind(assign.name.as_str(), value.clone());
            Ok((value, next))
        }
        Stmt::Return(ret) => {
            let value = ret.value.eval(ev, ctx)?;
            Err(ControlFlow::return_value(value))
        }
        Stmt::Docstring(_) => Ok((Value::Nil, ctx.clone())),
        Stmt::Expr(expr) => Ok((expr.eval(ev, ctx)?, ctx.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Assignment, Docstring, Expr, Return};
    use crate::eval::testing::run;

    #[test]
    fn test_assignment_binds_and_yields_value() {
        let mut ev = Evaluator::default();
        let stmt = Stmt::Assignment(Assignment {
            name: "x".to_string(),
            value: Expr::int(4),
        });
        let (value, ctx) = exec(&stmt, &mut ev, &Context::new()).expect("assignment");
        assert_eq!(value, Value::Int(4));
        assert_eq!(ctx.lookup("x"), Some(&Value::Int(4)));
    }

    #[test]
    fn test_return_unwinds() {
        let mut ev = Evaluator::default();
        let stmt = Stmt::Return(Return {
            value: Expr::int(1),
        });
        assert_eq!(
            exec(&stmt, &mut ev, &Context::new()),
            Err(ControlFlow::return_value(Value::Int(1)))
        );
    }

    #[test]
    fn test_docstring_is_nil() {
        let mut ev = Evaluator::default();
        let stmt = Stmt::Docstring(Docstring {
            content: "notes".to_string(),
        });
        let (value, _) = exec(&stmt, &mut ev, &Context::new()).expect("docstring");
        assert_eq!(value, Value::Nil);
    }

    #[test]
    fn test_assignment_names_closure() {
        match run("double = ~ .n * 2\ndouble") {
            Ok(Value::Closure(closure)) => assert_eq!(closure.describe(), "double/1"),
            other => panic!("expected closure, got {:?}", other),
        }
    }

    #[test]
    fn test_rebinding_keeps_original_name() {
        match run("f = function() { 1 }\ng = f\ng") {
            Ok(Value::Closure(closure)) => assert_eq!(closure.name.as_deref(), Some("f")),
            other => panic!("expected closure, got {:?}", other),
        }
    }
}
