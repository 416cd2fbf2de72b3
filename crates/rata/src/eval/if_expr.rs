//! If expression and block evaluation

use crate::ast::{If, Stmt};
use crate::context::Context;
use crate::value::Value;

use super::{stmt, ControlFlow, Evaluate, Evaluator};

impl Evaluate for If {
    fn eval(&self, ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow> {
        let cond = self.condition.eval(ev, ctx)?;

        if cond.is_truthy() {
            eval_block(&self.then_branch, ev, ctx)
        } else if let Some(else_branch) = &self.else_branch {
            eval_block(else_branch, ev, ctx)
        } else {
            // No else branch
            Ok(Value::Nil)
        }
    }
}

/// Evaluate a block, returning the value of the last statement.
///
/// Bindings made inside the block extend a private copy of `ctx` and are
/// gone once the block finishes. An empty block yields `nil`.
pub fn eval_block(stmts: &[Stmt], ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow> {
    let mut scope = ctx.clone();
    let mut last_value = Value::Nil;

    for s in stmts {
        let (value, next) = stmt::exec(s, ev, &scope)?;
        last_value = value;
        scope = next;
    }

    Ok(last_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Assignment, Expr};

    fn if_expr(condition: Expr, then: i64, otherwise: Option<i64>) -> If {
        If {
            condition: Box::new(condition),
            then_branch: vec![Stmt::Expr(Expr::int(then))],
            else_branch: otherwise.map(|n| vec![Stmt::Expr(Expr::int(n))]),
        }
    }

    #[test]
    fn test_truthy_takes_then_branch() {
        let mut ev = Evaluator::default();
        let expr = if_expr(Expr::string("yes"), 1, Some(2));
        assert_eq!(expr.eval(&mut ev, &Context::new()), Ok(Value::Int(1)));
    }

    #[test]
    fn test_falsy_takes_else_branch() {
        let mut ev = Evaluator::default();
        let expr = if_expr(Expr::int(0), 1, Some(2));
        assert_eq!(expr.eval(&mut ev, &Context::new()), Ok(Value::Int(2)));
    }

    #[test]
    fn test_missing_else_is_nil() {
        let mut ev = Evaluator::default();
        let expr = if_expr(Expr::string(""), 1, None);
        assert_eq!(expr.eval(&mut ev, &Context::new()), Ok(Value::Nil));
    }

    #[test]
    fn test_block_bindings_do_not_leak() {
        let mut ev = Evaluator::default();
        let ctx = Context::new();
        let block = vec![
            Stmt::Assignment(Assignment {
                name: "x".to_string(),
                value: Expr::int(5),
            }),
            Stmt::Expr(Expr::ident("x")),
        ];
        assert_eq!(eval_block(&block, &mut ev, &ctx), Ok(Value::Int(5)));
        assert!(!ctx.contains("x"));
    }

    #[test]
    fn test_empty_block_is_nil() {
        let mut ev = Evaluator::default();
        assert_eq!(eval_block(&[], &mut ev, &Context::new()), Ok(Value::Nil));
    }
}
