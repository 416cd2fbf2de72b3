//! Literal and structural constructor evaluation

use crate::ast::{Expr, Literal, LiteralValue, Symbol, Tuple, Vector};
use crate::context::Context;
use crate::value::Value;

use super::{ControlFlow, Evaluate, Evaluator};

impl Evaluate for Literal {
    fn eval(&self, _ev: &mut Evaluator, _ctx: &Context) -> Result<Value, ControlFlow> {
        Ok(eval_lit(&self.value))
    }
}

/// Convert a literal payload to a Value.
pub fn eval_lit(lit: &LiteralValue) -> Value {
    match lit {
        LiteralValue::Int(n) => Value::Int(*n),
        LiteralValue::Float(n) => Value::Float(*n),
        LiteralValue::Str(s) => Value::string(s.as_str()),
        LiteralValue::Bool(b) => Value::Bool(*b),
        LiteralValue::Nil => Value::Nil,
    }
}

impl Evaluate for Symbol {
    fn eval(&self, _ev: &mut Evaluator, _ctx: &Context) -> Result<Value, ControlFlow> {
        Ok(Value::symbol(self.name.as_str()))
    }
}

impl Evaluate for Tuple {
    fn eval(&self, ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow> {
        Ok(Value::tuple(eval_elements(&self.elements, ev, ctx)?))
    }
}

impl Evaluate for Vector {
    fn eval(&self, ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow> {
        Ok(Value::vector(eval_elements(&self.elements, ev, ctx)?))
    }
}

/// Evaluate expressions left to right.
pub(crate) fn eval_elements(
    elements: &[Expr],
    ev: &mut Evaluator,
    ctx: &Context,
) -> Result<Vec<Value>, ControlFlow> {
    elements.iter().map(|e| e.eval(ev, ctx)).collect()
}
