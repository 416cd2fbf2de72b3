//! Display and Debug implementations for Value
//!
//! `Debug` is the inspect form (strings quoted). `Display` is the
//! `to_string` form used by interpolation: identical except that a
//! top-level string prints its raw contents.

use std::fmt;

use super::*;

fn write_seq(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl Iterator<Item = impl fmt::Debug>,
    close: &str,
) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}", item)?;
    }
    write!(f, "{}", close)
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{:?}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Nil => write!(f, "nil"),
            Value::Range(start, end) => write!(f, "{}..{}", start, end),

            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::Symbol(s) => write!(f, ":{}", s),

            Value::Vector(items) => write_seq(f, "[", items.iter(), "]"),
            Value::Tuple(items) => write_seq(f, "{", items.iter(), "}"),
            Value::Set(set) => write_seq(f, "#{", set.iter().map(|k| &k.0), "}"),

            Value::Map(map) => {
                write!(f, "%{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?} => {:?}", k.0, v)?;
                }
                write!(f, "}}")
            }

            Value::Closure(c) => match &c.name {
                Some(name) => write!(f, "<function {}/{}>", name, c.arity()),
                None if c.is_lambda() => write!(f, "<lambda/{}>", c.arity()),
                None => write!(f, "<function/{}>", c.arity()),
            },
            Value::Native(n) => write!(f, "<native {}.{}>", n.module, n.name),
            Value::Exception(e) => write!(
                f,
                "%Exception{{kind: {:?}, message: {:?}}}",
                e.kind, e.message
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            other => write!(f, "{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_scalars() {
        assert_eq!(Value::Int(14).to_string(), "14");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(0.25).to_string(), "0.25");
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::symbol("ok").to_string(), ":ok");
        assert_eq!(Value::Range(1, 5).to_string(), "1..5");
    }

    #[test]
    fn test_string_raw_at_top_level_quoted_inside() {
        assert_eq!(Value::string("hi").to_string(), "hi");
        assert_eq!(format!("{:?}", Value::string("hi")), "\"hi\"");
        assert_eq!(
            Value::vector(vec![Value::Int(1), Value::string("a")]).to_string(),
            "[1, \"a\"]"
        );
    }

    #[test]
    fn test_tuple_and_map() {
        assert_eq!(
            Value::tuple(vec![Value::symbol("ok"), Value::Int(1)]).to_string(),
            "{:ok, 1}"
        );

        let mut entries = IndexMap::new();
        entries.insert(HashableValue(Value::string("a")), Value::Int(1));
        assert_eq!(Value::map(entries).to_string(), "%{\"a\" => 1}");
    }

    #[test]
    fn test_exception() {
        assert_eq!(
            Value::exception("io", "missing").to_string(),
            "%Exception{kind: \"io\", message: \"missing\"}"
        );
    }
}
