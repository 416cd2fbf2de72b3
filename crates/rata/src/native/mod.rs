//! Host Function Bridge: the registry of native modules
//!
//! Every native entry returns a tagged pair (`Ok(value)` or
//! `Err(message)`); the evaluator unwraps success and turns failure into
//! [`EvalFault::NativeError`](crate::error::EvalFault::NativeError).
//! Entries are keyed by `(module, name, arity)`.

mod enum_;
mod json;
mod list;
mod log;
mod maps;
mod math;
mod prelude;
mod set;
mod stats;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::value::{range_len, HashableValue, Value, MAX_RANGE_ELEMENTS};

/// Module whose functions are callable without qualification.
pub const PRELUDE_MODULE: &str = "Core";

/// Tagged success/failure result of a native call.
pub type NativeResult = Result<Value, String>;

/// Type alias for native function pointers to reduce complexity
pub type NativeFn = Arc<dyn Fn(&[Value], &mut dyn Invoke) -> NativeResult + Send + Sync>;

/// Callback into the evaluator, for higher-order natives like `Enum.map`.
///
/// A fault raised inside the callback comes back as `Err(message)`.
pub trait Invoke {
    /// Call `callee` with `args`.
    fn invoke(&mut self, callee: &Value, args: Vec<Value>) -> NativeResult;
}

/// A registered native function.
#[derive(Clone)]
pub struct NativeEntry {
    /// Module name
    pub module: String,

    /// Function name (for display/debugging)
    pub name: String,

    /// Arity (-1 for variadic)
    pub arity: i32,

    /// The actual function pointer
    pub func: NativeFn,
}

impl fmt::Debug for NativeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeEntry({}.{}/{})", self.module, self.name, self.arity)
    }
}

/// Arity-indexed function tables for every native module.
///
/// Built once at startup and shared read-only behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct NativeRegistry {
    fixed: HashMap<(String, String, usize), NativeEntry>,
    variadic: HashMap<(String, String), NativeEntry>,
    modules: IndexMap<String, Vec<(String, i32)>>,
}

impl NativeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every reference module: Core, Math, List, Enum, Maps,
    /// Set, Stats, Json and Log.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        prelude::register(&mut registry);
        math::register(&mut registry);
        list::register(&mut registry);
        enum_::register(&mut registry);
        maps::register(&mut registry);
        set::register(&mut registry);
        stats::register(&mut registry);
        json::register(&mut registry);
        log::register(&mut registry);
        registry
    }

    /// Register `module.name` with a fixed arity, or `-1` for variadic.
    ///
    /// A later registration for the same key replaces the earlier one.
    pub fn register<F>(&mut self, module: &str, name: &str, arity: i32, func: F)
    where
        F: Fn(&[Value], &mut dyn Invoke) -> NativeResult + Send + Sync + 'static,
    {
        let entry = NativeEntry {
            module: module.to_string(),
            name: name.to_string(),
            arity,
            func: Arc::new(func),
        };
        match usize::try_from(arity) {
            Ok(n) => {
                self.fixed
                    .insert((module.to_string(), name.to_string(), n), entry);
            }
            Err(_) => {
                self.variadic
                    .insert((module.to_string(), name.to_string()), entry);
            }
        }

        let functions = self.modules.entry(module.to_string()).or_default();
        if !functions.iter().any(|(n, a)| n == name && *a == arity) {
            functions.push((name.to_string(), arity));
        }
    }

    /// Find the entry for a call with `arity` arguments. Exact-arity entries
    /// win over variadic ones.
    pub fn lookup(&self, module: &str, name: &str, arity: usize) -> Option<&NativeEntry> {
        self.fixed
            .get(&(module.to_string(), name.to_string(), arity))
            .or_else(|| self.variadic.get(&(module.to_string(), name.to_string())))
    }

    /// Whether any function is registered under `module`.
    pub fn has_module(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// Whether `module.name` exists at any arity.
    pub fn has_function(&self, module: &str, name: &str) -> bool {
        self.modules
            .get(module)
            .is_some_and(|fns| fns.iter().any(|(n, _)| n == name))
    }

    /// Registered module names in registration order.
    pub fn modules(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    /// `(name, arity)` pairs registered under `module`.
    pub fn functions(&self, module: &str) -> Vec<(&str, i32)> {
        self.modules
            .get(module)
            .map(|fns| fns.iter().map(|(n, a)| (n.as_str(), *a)).collect())
            .unwrap_or_default()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Argument Helpers
// ═══════════════════════════════════════════════════════════════════════

pub(crate) fn expect_number(value: &Value, what: &str) -> Result<f64, String> {
    value
        .as_f64()
        .ok_or_else(|| format!("{}: expected a number, got {}", what, value.type_name()))
}

pub(crate) fn expect_int(value: &Value, what: &str) -> Result<i64, String> {
    value
        .as_int()
        .ok_or_else(|| format!("{}: expected an integer, got {}", what, value.type_name()))
}

pub(crate) fn expect_str<'a>(value: &'a Value, what: &str) -> Result<&'a str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("{}: expected a string, got {}", what, value.type_name()))
}

pub(crate) fn expect_list(value: &Value, what: &str) -> Result<Vec<Value>, String> {
    if let Value::Range(start, end) = value {
        let len = range_len(*start, *end);
        if len > MAX_RANGE_ELEMENTS {
            return Err(format!(
                "{}: range of {} elements is too large to enumerate (limit {})",
                what, len, MAX_RANGE_ELEMENTS
            ));
        }
    }
    value
        .elements()
        .ok_or_else(|| format!("{}: expected a collection, got {}", what, value.type_name()))
}

pub(crate) fn expect_map<'a>(
    value: &'a Value,
    what: &str,
) -> Result<&'a IndexMap<HashableValue, Value>, String> {
    match value {
        Value::Map(map) => Ok(map),
        other => Err(format!("{}: expected a map, got {}", what, other.type_name())),
    }
}

pub(crate) fn expect_set<'a>(
    value: &'a Value,
    what: &str,
) -> Result<&'a IndexSet<HashableValue>, String> {
    match value {
        Value::Set(set) => Ok(set),
        other => Err(format!("{}: expected a set, got {}", what, other.type_name())),
    }
}

/// Collect a slice of numbers as f64, failing on the first non-number.
pub(crate) fn numbers(items: &[Value], what: &str) -> Result<Vec<f64>, String> {
    items.iter().map(|v| expect_number(v, what)).collect()
}

#[cfg(test)]
pub(crate) mod testing {
    //! A callback stub for exercising natives without an evaluator.

    use super::*;

    /// Calls natives directly; treats closures as unsupported.
    pub struct DirectInvoke<'a>(pub &'a NativeRegistry);

    impl Invoke for DirectInvoke<'_> {
        fn invoke(&mut self, callee: &Value, args: Vec<Value>) -> NativeResult {
            match callee {
                Value::Native(r) => {
                    let entry = self
                        .0
                        .lookup(&r.module, &r.name, args.len())
                        .ok_or_else(|| format!("no {}.{}", r.module, r.name))?
                        .clone();
                    (entry.func)(&args, self)
                }
                other => Err(format!("cannot invoke {}", other.type_name())),
            }
        }
    }

    /// Call `module.name(args)` on the standard registry.
    pub fn call(module: &str, name: &str, args: Vec<Value>) -> NativeResult {
        let registry = NativeRegistry::standard();
        let entry = registry
            .lookup(module, name, args.len())
            .ok_or_else(|| format!("no {}.{}/{}", module, name, args.len()))?
            .clone();
        let mut invoke = DirectInvoke(&registry);
        (entry.func)(&args, &mut invoke)
    }
}
