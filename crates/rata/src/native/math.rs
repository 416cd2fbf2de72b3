//! `Math`: numeric helpers

use super::{expect_number, Invoke, NativeRegistry, NativeResult};
use crate::value::Value;

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register("Math", "abs", 1, math_abs);
    registry.register("Math", "sqrt", 1, math_sqrt);
    registry.register("Math", "pow", 2, math_pow);
    registry.register("Math", "floor", 1, |args, _| round_with(args, "Math.floor", f64::floor));
    registry.register("Math", "ceil", 1, |args, _| round_with(args, "Math.ceil", f64::ceil));
    registry.register("Math", "round", 1, |args, _| round_with(args, "Math.round", f64::round));
    registry.register("Math", "max", 2, math_max);
    registry.register("Math", "min", 2, math_min);
    registry.register("Math", "pi", 0, |_, _| Ok(Value::Float(std::f64::consts::PI)));
}

fn math_abs(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    match &args[0] {
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| "Math.abs: integer overflow".to_string()),
        other => Ok(Value::Float(expect_number(other, "Math.abs")?.abs())),
    }
}

fn math_sqrt(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let n = expect_number(&args[0], "Math.sqrt")?;
    if n < 0.0 {
        return Err(format!("Math.sqrt: negative argument {}", n));
    }
    Ok(Value::Float(n.sqrt()))
}

fn math_pow(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let base = expect_number(&args[0], "Math.pow")?;
    let exponent = expect_number(&args[1], "Math.pow")?;
    Ok(Value::Float(base.powf(exponent)))
}

/// Integers pass through; floats are rounded and converted back to integers.
fn round_with(args: &[Value], what: &str, op: fn(f64) -> f64) -> NativeResult {
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        other => {
            let rounded = op(expect_number(other, what)?);
            if !rounded.is_finite() || rounded.abs() >= i64::MAX as f64 {
                return Err(format!("{}: {} does not fit an integer", what, rounded));
            }
            Ok(Value::Int(rounded as i64))
        }
    }
}

fn math_max(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let (a, b) = (expect_number(&args[0], "Math.max")?, expect_number(&args[1], "Math.max")?);
    Ok(if b > a { args[1].clone() } else { args[0].clone() })
}

fn math_min(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let (a, b) = (expect_number(&args[0], "Math.min")?, expect_number(&args[1], "Math.min")?);
    Ok(if b < a { args[1].clone() } else { args[0].clone() })
}

#[cfg(test)]
mod tests {
    use super::super::testing::call;
    use super::*;

    #[test]
    fn test_abs_keeps_kind() {
        assert_eq!(call("Math", "abs", vec![Value::Int(-3)]), Ok(Value::Int(3)));
        assert_eq!(call("Math", "abs", vec![Value::Float(-1.5)]), Ok(Value::Float(1.5)));
    }

    #[test]
    fn test_sqrt_negative_fails() {
        assert_eq!(call("Math", "sqrt", vec![Value::Int(9)]), Ok(Value::Float(3.0)));
        assert!(call("Math", "sqrt", vec![Value::Int(-1)]).is_err());
    }

    #[test]
    fn test_rounding_yields_integers() {
        assert_eq!(call("Math", "floor", vec![Value::Float(2.7)]), Ok(Value::Int(2)));
        assert_eq!(call("Math", "ceil", vec![Value::Float(2.1)]), Ok(Value::Int(3)));
        assert_eq!(call("Math", "round", vec![Value::Float(2.5)]), Ok(Value::Int(3)));
    }

    #[test]
    fn test_max_min_return_original_value() {
        assert_eq!(
            call("Math", "max", vec![Value::Int(2), Value::Float(1.5)]),
            Ok(Value::Int(2))
        );
        assert_eq!(
            call("Math", "min", vec![Value::Int(2), Value::Float(1.5)]),
            Ok(Value::Float(1.5))
        );
    }

    #[test]
    fn test_non_number_is_failure() {
        let err = call("Math", "abs", vec![Value::string("x")]).unwrap_err();
        assert_eq!(err, "Math.abs: expected a number, got string");
    }
}
