//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::cmp::Ordering;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Arc::new(s.into()))
    }

    /// Create a symbol value (name without the colon)
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(Arc::new(name.into()))
    }

    /// Create a vector value
    pub fn vector(items: Vec<Value>) -> Self {
        Value::Vector(Arc::new(items))
    }

    /// Create a tuple value
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Arc::new(items))
    }

    /// Create a map value
    pub fn map(entries: IndexMap<HashableValue, Value>) -> Self {
        Value::Map(Arc::new(entries))
    }

    /// Create a set value
    pub fn set(members: IndexSet<HashableValue>) -> Self {
        Value::Set(Arc::new(members))
    }

    /// Create an exception record
    pub fn exception(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Value::Exception(Arc::new(ExceptionRecord {
            kind: kind.into(),
            message: message.into(),
        }))
    }

    /// The `:ok` symbol
    pub fn ok() -> Self {
        Value::symbol("ok")
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// Type name as shown in fault messages and by `Core.type_of`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Nil => "nil",
            Value::Range(..) => "range",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Vector(_) => "vector",
            Value::Tuple(_) => "tuple",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
            Value::Closure(_) => "function",
            Value::Native(_) => "native",
            Value::Exception(_) => "exception",
        }
    }

    /// Truthiness: `nil`, `false`, `0`, `0.0` and `""` are falsy.
    /// Empty collections are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Check if value is `nil`
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Check if value is an integer or a float
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Check if value can be called
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Closure(_) | Value::Native(_))
    }

    /// Check if value is an exception record
    pub fn is_exception(&self) -> bool {
        matches!(self, Value::Exception(_))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors
    // ═══════════════════════════════════════════════════════════════════

    /// Get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as f64, promoting integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as &str (strings only)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Elements of any enumerable value: vectors, tuples, ranges, sets,
    /// and maps (as `{key, value}` tuples).
    ///
    /// Ranges longer than [`MAX_RANGE_ELEMENTS`] are not enumerable.
    pub fn elements(&self) -> Option<Vec<Value>> {
        match self {
            Value::Vector(items) | Value::Tuple(items) => Some(items.as_ref().clone()),
            Value::Range(start, end) if range_len(*start, *end) <= MAX_RANGE_ELEMENTS => {
                Some(range_values(*start, *end))
            }
            Value::Range(..) => None,
            Value::Set(set) => Some(set.iter().map(|k| k.0.clone()).collect()),
            Value::Map(map) => Some(
                map.iter()
                    .map(|(k, v)| Value::tuple(vec![k.0.clone(), v.clone()]))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Ordering for `<`, `<=`, `>`, `>=`: numbers (mixed) and strings.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (a, b) if a.is_number() && b.is_number() => a.as_f64()?.partial_cmp(&b.as_f64()?),
            _ => None,
        }
    }
}

/// Largest range that will be materialized element by element.
pub const MAX_RANGE_ELEMENTS: u64 = 10_000_000;

/// Number of integers in an inclusive range, in either direction.
pub fn range_len(start: i64, end: i64) -> u64 {
    start.abs_diff(end).saturating_add(1)
}

/// Materialize an inclusive range; descending when `start > end`.
fn range_values(start: i64, end: i64) -> Vec<Value> {
    if start <= end {
        (start..=end).map(Value::Int).collect()
    } else {
        (end..=start).rev().map(Value::Int).collect()
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::vector(items)
    }
}

impl From<Closure> for Value {
    fn from(closure: Closure) -> Self {
        Value::Closure(Arc::new(closure))
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Range(a1, a2), Value::Range(b1, b2)) => a1 == b1 && a2 == b2,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            // Closures compare by identity
            (Value::Closure(a), Value::Closure(b)) => Arc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => a == b,
            (Value::Exception(a), Value::Exception(b)) => a == b,
            _ => false,
        }
    }
}
