//! `Json`: encoding and decoding through serde_json

use indexmap::IndexMap;

use super::{expect_str, Invoke, NativeRegistry, NativeResult};
use crate::value::{HashableValue, Value};

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register("Json", "encode", 1, json_encode);
    registry.register("Json", "decode", 1, json_decode);
}

fn json_encode(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    serde_json::to_string(&args[0])
        .map(Value::string)
        .map_err(|e| format!("Json.encode: {}", e))
}

fn json_decode(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let text = expect_str(&args[0], "Json.decode")?;
    let parsed: serde_json::Value =
        serde_json::from_str(text).map_err(|e| format!("Json.decode: {}", e))?;
    Ok(from_json(parsed))
}

/// Objects become maps with string keys; integral numbers stay integers.
fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Nil,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::string(s),
        serde_json::Value::Array(items) => {
            Value::vector(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(fields) => {
            let entries: IndexMap<HashableValue, Value> = fields
                .into_iter()
                .map(|(k, v)| (HashableValue(Value::string(k)), from_json(v)))
                .collect();
            Value::map(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::call;
    use super::*;

    #[test]
    fn test_decode_object() {
        let decoded = call(
            "Json",
            "decode",
            vec![Value::string(r#"{"n": 1, "xs": [1.5, null, true]}"#)],
        )
        .unwrap();
        assert_eq!(
            call("Maps", "get", vec![decoded.clone(), Value::string("n")]),
            Ok(Value::Int(1))
        );
        assert_eq!(
            call("Maps", "get", vec![decoded, Value::string("xs")]),
            Ok(Value::vector(vec![
                Value::Float(1.5),
                Value::Nil,
                Value::Bool(true)
            ]))
        );
    }

    #[test]
    fn test_encode_tuple_as_array() {
        assert_eq!(
            call(
                "Json",
                "encode",
                vec![Value::tuple(vec![Value::symbol("ok"), Value::Int(1)])]
            ),
            Ok(Value::string(r#"["ok",1]"#))
        );
    }

    #[test]
    fn test_decode_invalid_is_failure() {
        let err = call("Json", "decode", vec![Value::string("{nope")]).unwrap_err();
        assert!(err.starts_with("Json.decode:"), "{}", err);
    }
}
