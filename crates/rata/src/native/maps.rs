//! `Maps`: persistent map operations (every update returns a new map)

use indexmap::IndexMap;

use super::{expect_map, Invoke, NativeRegistry, NativeResult};
use crate::value::{HashableValue, Value};

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register("Maps", "new", 0, |_, _| Ok(Value::map(IndexMap::new())));
    registry.register("Maps", "put", 3, maps_put);
    registry.register("Maps", "get", 2, |args, _| maps_get(&args[0], &args[1], Value::Nil));
    registry.register("Maps", "get", 3, |args, _| {
        maps_get(&args[0], &args[1], args[2].clone())
    });
    registry.register("Maps", "has_key", 2, maps_has_key);
    registry.register("Maps", "delete", 2, maps_delete);
    registry.register("Maps", "keys", 1, maps_keys);
    registry.register("Maps", "values", 1, maps_values);
    registry.register("Maps", "size", 1, maps_size);
}

fn key(value: &Value) -> HashableValue {
    HashableValue(value.clone())
}

fn maps_put(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let mut map = expect_map(&args[0], "Maps.put")?.clone();
    map.insert(key(&args[1]), args[2].clone());
    Ok(Value::map(map))
}

fn maps_get(map: &Value, k: &Value, default: Value) -> NativeResult {
    let map = expect_map(map, "Maps.get")?;
    Ok(map.get(&key(k)).cloned().unwrap_or(default))
}

fn maps_has_key(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let map = expect_map(&args[0], "Maps.has_key")?;
    Ok(Value::Bool(map.contains_key(&key(&args[1]))))
}

fn maps_delete(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let mut map = expect_map(&args[0], "Maps.delete")?.clone();
    map.shift_remove(&key(&args[1]));
    Ok(Value::map(map))
}

fn maps_keys(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let map = expect_map(&args[0], "Maps.keys")?;
    Ok(Value::vector(map.keys().map(|k| k.0.clone()).collect()))
}

fn maps_values(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let map = expect_map(&args[0], "Maps.values")?;
    Ok(Value::vector(map.values().cloned().collect()))
}

fn maps_size(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    Ok(Value::Int(expect_map(&args[0], "Maps.size")?.len() as i64))
}

#[cfg(test)]
mod tests {
    use super::super::testing::call;
    use super::*;

    fn sample() -> Value {
        let m = call("Maps", "new", vec![]).unwrap();
        let m = call("Maps", "put", vec![m, Value::symbol("a"), Value::Int(1)]).unwrap();
        call("Maps", "put", vec![m, Value::string("b"), Value::Int(2)]).unwrap()
    }

    #[test]
    fn test_put_and_get() {
        let m = sample();
        assert_eq!(
            call("Maps", "get", vec![m.clone(), Value::symbol("a")]),
            Ok(Value::Int(1))
        );
        assert_eq!(
            call("Maps", "get", vec![m.clone(), Value::symbol("zz")]),
            Ok(Value::Nil)
        );
        assert_eq!(
            call("Maps", "get", vec![m, Value::symbol("zz"), Value::Int(0)]),
            Ok(Value::Int(0))
        );
    }

    #[test]
    fn test_put_does_not_touch_original() {
        let m = sample();
        let bigger = call("Maps", "put", vec![m.clone(), Value::Int(3), Value::Int(3)]).unwrap();
        assert_eq!(call("Maps", "size", vec![m]), Ok(Value::Int(2)));
        assert_eq!(call("Maps", "size", vec![bigger]), Ok(Value::Int(3)));
    }

    #[test]
    fn test_keys_values_delete() {
        let m = sample();
        assert_eq!(
            call("Maps", "keys", vec![m.clone()]),
            Ok(Value::vector(vec![Value::symbol("a"), Value::string("b")]))
        );
        assert_eq!(
            call("Maps", "values", vec![m.clone()]),
            Ok(Value::vector(vec![Value::Int(1), Value::Int(2)]))
        );
        let smaller = call("Maps", "delete", vec![m, Value::symbol("a")]).unwrap();
        assert_eq!(
            call("Maps", "has_key", vec![smaller, Value::symbol("a")]),
            Ok(Value::Bool(false))
        );
    }
}
