//! `Set`: insertion-ordered sets

use indexmap::IndexSet;

use super::{expect_list, expect_set, Invoke, NativeRegistry, NativeResult};
use crate::value::{HashableValue, Value};

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register("Set", "new", 0, |_, _| Ok(Value::set(IndexSet::new())));
    registry.register("Set", "from_list", 1, set_from_list);
    registry.register("Set", "put", 2, set_put);
    registry.register("Set", "member", 2, set_member);
    registry.register("Set", "size", 1, set_size);
    registry.register("Set", "to_list", 1, set_to_list);

    // Set algebra
    registry.register("Set", "union", 2, |args, _| {
        combine(args, "Set.union", |a, b| a.union(b).cloned().collect())
    });
    registry.register("Set", "intersection", 2, |args, _| {
        combine(args, "Set.intersection", |a, b| a.intersection(b).cloned().collect())
    });
    registry.register("Set", "difference", 2, |args, _| {
        combine(args, "Set.difference", |a, b| a.difference(b).cloned().collect())
    });
}

fn set_from_list(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let members = expect_list(&args[0], "Set.from_list")?
        .into_iter()
        .map(HashableValue)
        .collect();
    Ok(Value::set(members))
}

fn set_put(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let mut set = expect_set(&args[0], "Set.put")?.clone();
    set.insert(HashableValue(args[1].clone()));
    Ok(Value::set(set))
}

fn set_member(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let set = expect_set(&args[0], "Set.member")?;
    Ok(Value::Bool(set.contains(&HashableValue(args[1].clone()))))
}

fn set_size(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    Ok(Value::Int(expect_set(&args[0], "Set.size")?.len() as i64))
}

fn set_to_list(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let set = expect_set(&args[0], "Set.to_list")?;
    Ok(Value::vector(set.iter().map(|m| m.0.clone()).collect()))
}

fn combine(
    args: &[Value],
    what: &str,
    op: impl Fn(&IndexSet<HashableValue>, &IndexSet<HashableValue>) -> IndexSet<HashableValue>,
) -> NativeResult {
    let a = expect_set(&args[0], what)?;
    let b = expect_set(&args[1], what)?;
    Ok(Value::set(op(a, b)))
}

#[cfg(test)]
mod tests {
    use super::super::testing::call;
    use super::*;

    fn set_of(ns: &[i64]) -> Value {
        let list = Value::vector(ns.iter().copied().map(Value::Int).collect());
        call("Set", "from_list", vec![list]).unwrap()
    }

    #[test]
    fn test_from_list_dedups() {
        assert_eq!(call("Set", "size", vec![set_of(&[1, 1, 2])]), Ok(Value::Int(2)));
        assert_eq!(
            call("Set", "to_list", vec![set_of(&[2, 1, 2])]),
            Ok(Value::vector(vec![Value::Int(2), Value::Int(1)]))
        );
    }

    #[test]
    fn test_membership() {
        let s = call("Set", "put", vec![set_of(&[1]), Value::Int(5)]).unwrap();
        assert_eq!(call("Set", "member", vec![s.clone(), Value::Int(5)]), Ok(Value::Bool(true)));
        assert_eq!(call("Set", "member", vec![s, Value::Int(9)]), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_algebra() {
        let (a, b) = (set_of(&[1, 2, 3]), set_of(&[2, 3, 4]));
        assert_eq!(call("Set", "union", vec![a.clone(), b.clone()]), Ok(set_of(&[1, 2, 3, 4])));
        assert_eq!(
            call("Set", "intersection", vec![a.clone(), b.clone()]),
            Ok(set_of(&[2, 3]))
        );
        assert_eq!(call("Set", "difference", vec![a, b]), Ok(set_of(&[1])));
    }
}
