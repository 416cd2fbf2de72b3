//! Function and lambda literals: both evaluate to closures

use crate::ast::{Function, Lambda};
use crate::context::Context;
use crate::value::{Closure, ClosureBody, Value};

use super::{ControlFlow, Evaluate, Evaluator};

impl Evaluate for Function {
    fn eval(&self, _ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow> {
        Ok(Closure {
            params: self.params.iter().map(|p| p.name.clone()).collect(),
            body: ClosureBody::Function(self.body.clone()),
            captured: ctx.clone(),
            name: None,
        }
        .into())
    }
}

impl Evaluate for Lambda {
    fn eval(&self, _ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow> {
        Ok(Closure {
            params: self.params.clone(),
            body: ClosureBody::Lambda(self.body.clone()),
            captured: ctx.clone(),
            name: None,
        }
        .into())
    }
}
