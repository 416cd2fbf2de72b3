//! `Enum`: higher-order operations over any enumerable value
//!
//! Callbacks go through [`Invoke`], so user closures, lambdas and native
//! references all work as the function argument.

use std::cmp::Ordering;

use super::{expect_int, expect_list, expect_str, Invoke, NativeRegistry, NativeResult};
use crate::value::{range_len, Value};

pub(super) fn register(registry: &mut NativeRegistry) {
    // Higher-order
    registry.register("Enum", "map", 2, enum_map);
    registry.register("Enum", "filter", 2, enum_filter);
    registry.register("Enum", "reduce", 3, enum_reduce);
    registry.register("Enum", "any", 2, enum_any);
    registry.register("Enum", "all", 2, enum_all);

    // Aggregation and shaping
    registry.register("Enum", "sum", 1, enum_sum);
    registry.register("Enum", "count", 1, enum_count);
    registry.register("Enum", "sort", 1, enum_sort);
    registry.register("Enum", "join", 2, enum_join);
    registry.register("Enum", "range", 2, enum_range);
}

fn enum_map(args: &[Value], invoke: &mut dyn Invoke) -> NativeResult {
    let items = expect_list(&args[0], "Enum.map")?;
    let mapped = items
        .into_iter()
        .map(|item| invoke.invoke(&args[1], vec![item]))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::vector(mapped))
}

fn enum_filter(args: &[Value], invoke: &mut dyn Invoke) -> NativeResult {
    let mut kept = Vec::new();
    for item in expect_list(&args[0], "Enum.filter")? {
        if invoke.invoke(&args[1], vec![item.clone()])?.is_truthy() {
            kept.push(item);
        }
    }
    Ok(Value::vector(kept))
}

/// `reduce(xs, acc, f)` calls `f(item, acc)` for each item.
fn enum_reduce(args: &[Value], invoke: &mut dyn Invoke) -> NativeResult {
    let mut acc = args[1].clone();
    for item in expect_list(&args[0], "Enum.reduce")? {
        acc = invoke.invoke(&args[2], vec![item, acc])?;
    }
    Ok(acc)
}

fn enum_any(args: &[Value], invoke: &mut dyn Invoke) -> NativeResult {
    for item in expect_list(&args[0], "Enum.any")? {
        if invoke.invoke(&args[1], vec![item])?.is_truthy() {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

fn enum_all(args: &[Value], invoke: &mut dyn Invoke) -> NativeResult {
    for item in expect_list(&args[0], "Enum.all")? {
        if !invoke.invoke(&args[1], vec![item])?.is_truthy() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

/// Integer sum while every item is an integer; float once any float appears.
fn enum_sum(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    if let Value::Range(start, end) = args[0] {
        return range_sum(start, end);
    }
    let mut int_total: i64 = 0;
    let mut float_total = 0.0;
    let mut saw_float = false;
    for item in expect_list(&args[0], "Enum.sum")? {
        match item {
            Value::Int(n) if saw_float => float_total += n as f64,
            Value::Int(n) => {
                int_total = int_total
                    .checked_add(n)
                    .ok_or_else(|| "Enum.sum: integer overflow".to_string())?;
            }
            Value::Float(n) => {
                saw_float = true;
                float_total += n;
            }
            other => {
                return Err(format!(
                    "Enum.sum: expected numbers, got {}",
                    other.type_name()
                ))
            }
        }
    }
    if saw_float {
        Ok(Value::Float(int_total as f64 + float_total))
    } else {
        Ok(Value::Int(int_total))
    }
}

/// Closed form `n * (start + end) / 2`; the product is always even.
fn range_sum(start: i64, end: i64) -> NativeResult {
    let n = i128::from(range_len(start, end));
    (i128::from(start) + i128::from(end))
        .checked_mul(n)
        .and_then(|twice| i64::try_from(twice / 2).ok())
        .map(Value::Int)
        .ok_or_else(|| "Enum.sum: integer overflow".to_string())
}

fn enum_count(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let len = match args[0] {
        Value::Range(start, end) => range_len(start, end),
        ref other => expect_list(other, "Enum.count")?.len() as u64,
    };
    i64::try_from(len)
        .map(Value::Int)
        .map_err(|_| "Enum.count: integer overflow".to_string())
}

fn enum_sort(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let mut items = expect_list(&args[0], "Enum.sort")?;
    let mut incomparable = None;
    items.sort_by(|a, b| {
        a.compare(b).unwrap_or_else(|| {
            incomparable.get_or_insert((a.type_name(), b.type_name()));
            Ordering::Equal
        })
    });
    match incomparable {
        Some((left, right)) => Err(format!("Enum.sort: cannot compare {} and {}", left, right)),
        None => Ok(Value::vector(items)),
    }
}

fn enum_join(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let separator = expect_str(&args[1], "Enum.join")?;
    let parts: Vec<String> = expect_list(&args[0], "Enum.join")?
        .iter()
        .map(Value::to_string)
        .collect();
    Ok(Value::string(parts.join(separator)))
}

fn enum_range(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    Ok(Value::Range(
        expect_int(&args[0], "Enum.range")?,
        expect_int(&args[1], "Enum.range")?,
    ))
}
