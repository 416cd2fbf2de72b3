//! Binary operation evaluation

use std::cmp::Ordering;

use crate::ast::{BinaryOp, BinaryOperator, Expr};
use crate::context::Context;
use crate::error::EvalFault;
use crate::value::Value;

use super::{ControlFlow, Evaluate, Evaluator};

impl Evaluate for BinaryOp {
    fn eval(&self, ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow> {
        // Short-circuit evaluation for and/or
        match self.operator {
            BinaryOperator::And => return eval_and(&self.left, &self.right, ev, ctx),
            BinaryOperator::Or => return eval_or(&self.left, &self.right, ev, ctx),
            _ => {}
        }

        let left = self.left.eval(ev, ctx)?;
        let right = self.right.eval(ev, ctx)?;
        Ok(apply(self.operator, &left, &right)?)
    }
}

/// Apply a strict (non short-circuit) operator to evaluated operands.
pub fn apply(op: BinaryOperator, left: &Value, right: &Value) -> Result<Value, EvalFault> {
    match op {
        // Arithmetic
        BinaryOperator::Add => eval_add(left, right),
        BinaryOperator::Sub => eval_sub(left, right),
        BinaryOperator::Mul => eval_mul(left, right),
        BinaryOperator::Div => eval_div(left, right),
        BinaryOperator::Rem => eval_rem(left, right),
        BinaryOperator::Pow => eval_pow(left, right),

        // Comparison
        BinaryOperator::Eq => Ok(Value::Bool(left == right)),
        BinaryOperator::NotEq => Ok(Value::Bool(left != right)),
        BinaryOperator::Less => compare(op, left, right, Ordering::is_lt),
        BinaryOperator::LessEq => compare(op, left, right, Ordering::is_le),
        BinaryOperator::Greater => compare(op, left, right, Ordering::is_gt),
        BinaryOperator::GreaterEq => compare(op, left, right, Ordering::is_ge),

        // Logical operators on already-evaluated operands
        BinaryOperator::And => Ok(if left.is_truthy() {
            right.clone()
        } else {
            left.clone()
        }),
        BinaryOperator::Or => Ok(if left.is_truthy() {
            left.clone()
        } else {
            right.clone()
        }),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Logical Operations
// ═══════════════════════════════════════════════════════════════════════

/// `a and b`: `a` when falsy, otherwise `b`; `b` is skipped when falsy.
fn eval_and(
    left: &Expr,
    right: &Expr,
    ev: &mut Evaluator,
    ctx: &Context,
) -> Result<Value, ControlFlow> {
    let left = left.eval(ev, ctx)?;
    if !left.is_truthy() {
        return Ok(left);
    }
    right.eval(ev, ctx)
}

/// `a or b`: `a` when truthy, otherwise `b`.
fn eval_or(
    left: &Expr,
    right: &Expr,
    ev: &mut Evaluator,
    ctx: &Context,
) -> Result<Value, ControlFlow> {
    let left = left.eval(ev, ctx)?;
    if left.is_truthy() {
        return Ok(left);
    }
    right.eval(ev, ctx)
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic Operations
// ═══════════════════════════════════════════════════════════════════════

/// Checked integer arithmetic, float arithmetic otherwise. Mixed operands
/// promote to float.
macro_rules! impl_arithmetic {
    ($name:ident, $checked:ident, $op:tt, $op_str:expr) => {
        fn $name(left: &Value, right: &Value) -> Result<Value, EvalFault> {
            match (left, right) {
                (Value::Int(a), Value::Int(b)) => a
                    .$checked(*b)
                    .map(Value::Int)
                    .ok_or(EvalFault::IntegerOverflow),
                (a, b) => match (a.as_f64(), b.as_f64()) {
                    (Some(x), Some(y)) => Ok(Value::Float(x $op y)),
                    _ => Err(EvalFault::type_mismatch($op_str, left, right)),
                },
            }
        }
    };
}

impl_arithmetic!(eval_numeric_add, checked_add, +, "+");
impl_arithmetic!(eval_sub, checked_sub, -, "-");
impl_arithmetic!(eval_mul, checked_mul, *, "*");

/// `+` also concatenates strings and vectors.
fn eval_add(left: &Value, right: &Value) -> Result<Value, EvalFault> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        (Value::Vector(a), Value::Vector(b)) => {
            Ok(Value::vector(a.iter().chain(b.iter()).cloned().collect()))
        }
        _ => eval_numeric_add(left, right),
    }
}

/// `/` always produces a float.
fn eval_div(left: &Value, right: &Value) -> Result<Value, EvalFault> {
    match (left.as_f64(), right.as_f64()) {
        (Some(_), Some(y)) if y == 0.0 => Err(EvalFault::DivisionByZero),
        (Some(x), Some(y)) => Ok(Value::Float(x / y)),
        _ => Err(EvalFault::type_mismatch("/", left, right)),
    }
}

fn eval_rem(left: &Value, right: &Value) -> Result<Value, EvalFault> {
    match (left, right) {
        (Value::Int(_), Value::Int(0)) => Err(EvalFault::DivisionByZero),
        (Value::Int(a), Value::Int(b)) => a
            .checked_rem(*b)
            .map(Value::Int)
            .ok_or(EvalFault::IntegerOverflow),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(_), Some(y)) if y == 0.0 => Err(EvalFault::DivisionByZero),
            (Some(x), Some(y)) => Ok(Value::Float(x % y)),
            _ => Err(EvalFault::type_mismatch("%", left, right)),
        },
    }
}

/// Integer base with a non-negative integer exponent stays an integer.
fn eval_pow(left: &Value, right: &Value) -> Result<Value, EvalFault> {
    if let (Value::Int(base), Value::Int(exp)) = (left, right) {
        if let Ok(small) = u32::try_from(*exp) {
            return base
                .checked_pow(small)
                .map(Value::Int)
                .ok_or(EvalFault::IntegerOverflow);
        }
        if *exp > 0 {
            // Past u32 only 0, 1 and -1 stay in range
            return match *base {
                0 | 1 => Ok(Value::Int(*base)),
                -1 if *exp % 2 == 0 => Ok(Value::Int(1)),
                -1 => Ok(Value::Int(-1)),
                _ => Err(EvalFault::IntegerOverflow),
            };
        }
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(x), Some(y)) => Ok(Value::Float(x.powf(y))),
        _ => Err(EvalFault::type_mismatch("^", left, right)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Comparison Operations
// ═══════════════════════════════════════════════════════════════════════

fn compare(
    op: BinaryOperator,
    left: &Value,
    right: &Value,
    test: fn(Ordering) -> bool,
) -> Result<Value, EvalFault> {
    left.compare(right)
        .map(|ordering| Value::Bool(test(ordering)))
        .ok_or_else(|| EvalFault::type_mismatch(op.as_str(), left, right))
}
