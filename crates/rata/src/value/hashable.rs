//! Hashable wrapper for Value to enable use as map keys and set members

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::Value;

/// A wrapper for Value that implements Hash and Eq.
///
/// Key equality is stricter than `==` on values: `1` and `1.0` are
/// distinct keys, and floats compare by bit pattern. Callables hash by
/// identity.
#[derive(Debug, Clone)]
pub struct HashableValue(pub Value);

impl HashableValue {
    /// Borrow the wrapped value.
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Unwrap into the value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for HashableValue {
    fn from(value: Value) -> Self {
        HashableValue(value)
    }
}

impl Hash for HashableValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    std::mem::discriminant(value).hash(state);

    match value {
        Value::Nil => {}
        Value::Int(n) => n.hash(state),
        Value::Float(n) => n.to_bits().hash(state),
        Value::Bool(b) => b.hash(state),
        Value::Range(start, end) => {
            start.hash(state);
            end.hash(state);
        }
        Value::Str(s) | Value::Symbol(s) => s.hash(state),
        Value::Vector(items) | Value::Tuple(items) => {
            items.len().hash(state);
            for item in items.iter() {
                hash_value(item, state);
            }
        }
        // Order-independent containers: length only, equality does the rest
        Value::Map(map) => map.len().hash(state),
        Value::Set(set) => set.len().hash(state),
        Value::Closure(c) => (Arc::as_ptr(c) as usize).hash(state),
        Value::Native(n) => n.hash(state),
        Value::Exception(e) => e.hash(state),
    }
}

/// Same-variant structural equality.
fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        (Value::Vector(x), Value::Vector(y)) | (Value::Tuple(x), Value::Tuple(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| strict_eq(l, r))
        }
        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(k, v)| y.get(k).is_some_and(|other| strict_eq(v, other)))
        }
        _ => std::mem::discriminant(a) == std::mem::discriminant(b) && a == b,
    }
}

impl PartialEq for HashableValue {
    fn eq(&self, other: &Self) -> bool {
        strict_eq(&self.0, &other.0)
    }
}

impl Eq for HashableValue {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_int_and_float_are_distinct_keys() {
        let mut keys = HashSet::new();
        keys.insert(HashableValue(Value::Int(1)));
        keys.insert(HashableValue(Value::Float(1.0)));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_structural_keys() {
        let a = HashableValue(Value::tuple(vec![Value::symbol("ok"), Value::Int(1)]));
        let b = HashableValue(Value::tuple(vec![Value::symbol("ok"), Value::Int(1)]));
        assert_eq!(a, b);

        let mut keys = HashSet::new();
        keys.insert(a);
        assert!(keys.contains(&b));
    }

    #[test]
    fn test_string_and_symbol_differ() {
        assert_ne!(
            HashableValue(Value::string("ok")),
            HashableValue(Value::symbol("ok"))
        );
    }
}
