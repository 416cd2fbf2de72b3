//! `List`: vector construction and access

use super::{expect_int, expect_list, Invoke, NativeRegistry, NativeResult};
use crate::value::Value;

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register("List", "new", 0, |_, _| Ok(Value::vector(Vec::new())));
    registry.register("List", "length", 1, list_length);
    registry.register("List", "first", 1, list_first);
    registry.register("List", "last", 1, list_last);
    registry.register("List", "at", 2, list_at);
    registry.register("List", "append", 2, list_append);
    registry.register("List", "concat", 2, list_concat);
    registry.register("List", "reverse", 1, list_reverse);
}

fn list_length(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let items = expect_list(&args[0], "List.length")?;
    Ok(Value::Int(items.len() as i64))
}

fn list_first(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let items = expect_list(&args[0], "List.first")?;
    Ok(items.first().cloned().unwrap_or(Value::Nil))
}

fn list_last(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let items = expect_list(&args[0], "List.last")?;
    Ok(items.last().cloned().unwrap_or(Value::Nil))
}

/// Zero-based; negative indices count from the end; out of range is `nil`.
fn list_at(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let items = expect_list(&args[0], "List.at")?;
    let index = expect_int(&args[1], "List.at")?;
    let resolved = if index < 0 {
        items.len() as i64 + index
    } else {
        index
    };
    Ok(usize::try_from(resolved)
        .ok()
        .and_then(|i| items.get(i).cloned())
        .unwrap_or(Value::Nil))
}

fn list_append(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let mut items = expect_list(&args[0], "List.append")?;
    items.push(args[1].clone());
    Ok(Value::vector(items))
}

fn list_concat(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let mut items = expect_list(&args[0], "List.concat")?;
    items.extend(expect_list(&args[1], "List.concat")?);
    Ok(Value::vector(items))
}

fn list_reverse(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let mut items = expect_list(&args[0], "List.reverse")?;
    items.reverse();
    Ok(Value::vector(items))
}

#[cfg(test)]
mod tests {
    use super::super::testing::call;
    use super::*;

    fn ints(ns: &[i64]) -> Value {
        Value::vector(ns.iter().copied().map(Value::Int).collect())
    }

    #[test]
    fn test_access() {
        assert_eq!(call("List", "length", vec![ints(&[1, 2, 3])]), Ok(Value::Int(3)));
        assert_eq!(call("List", "first", vec![ints(&[])]), Ok(Value::Nil));
        assert_eq!(call("List", "last", vec![ints(&[1, 2])]), Ok(Value::Int(2)));
        assert_eq!(
            call("List", "at", vec![ints(&[1, 2, 3]), Value::Int(-1)]),
            Ok(Value::Int(3))
        );
        assert_eq!(
            call("List", "at", vec![ints(&[1]), Value::Int(5)]),
            Ok(Value::Nil)
        );
    }

    #[test]
    fn test_building() {
        assert_eq!(
            call("List", "append", vec![ints(&[1]), Value::Int(2)]),
            Ok(ints(&[1, 2]))
        );
        assert_eq!(
            call("List", "concat", vec![ints(&[1]), Value::Range(2, 3)]),
            Ok(ints(&[1, 2, 3]))
        );
        assert_eq!(call("List", "reverse", vec![ints(&[1, 2])]), Ok(ints(&[2, 1])));
    }

    #[test]
    fn test_length_of_scalar_fails() {
        assert!(call("List", "length", vec![Value::Int(1)]).is_err());
    }
}
