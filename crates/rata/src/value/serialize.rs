//! serde serialization for Value (used by `Json.encode`)

use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};

use super::{range_len, Value, MAX_RANGE_ELEMENTS};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Nil => serializer.serialize_unit(),
            Value::Str(s) | Value::Symbol(s) => serializer.serialize_str(s),
            Value::Vector(items) | Value::Tuple(items) => serializer.collect_seq(items.iter()),
            Value::Set(set) => serializer.collect_seq(set.iter().map(|k| &k.0)),
            Value::Range(start, end) => match self.elements() {
                Some(items) => serializer.collect_seq(items),
                None => Err(S::Error::custom(format!(
                    "range of {} elements exceeds the limit of {}",
                    range_len(*start, *end),
                    MAX_RANGE_ELEMENTS
                ))),
            },
            // JSON object keys must be strings
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(&k.0.to_string(), v)?;
                }
                out.end()
            }
            Value::Exception(e) => {
                let mut out = serializer.serialize_map(Some(2))?;
                out.serialize_entry("kind", &e.kind)?;
                out.serialize_entry("message", &e.message)?;
                out.end()
            }
            Value::Closure(_) | Value::Native(_) => serializer.serialize_str(&self.to_string()),
        }
    }
}
