//! Value representation for runtime values

mod callable;
mod display;
mod hashable;
mod impls;
mod serialize;

pub use callable::{Closure, ClosureBody, NativeRef};
pub use hashable::HashableValue;
pub use impls::{range_len, MAX_RANGE_ELEMENTS};

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

/// Runtime value representation for the Rata evaluator.
///
/// Values are organized into three tiers:
/// - Tier 1: Inline scalars (no allocation)
/// - Tier 2: Heap-allocated compound data (Arc-wrapped, cheap to clone)
/// - Tier 3: Callables and exception records
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Tier 1: Inline Scalars
    // ═══════════════════════════════════════════════════════════════════
    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// Boolean: `true` or `false`
    Bool(bool),

    /// `nil`
    Nil,

    /// Inclusive integer range `start..end`
    Range(i64, i64),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 2: Heap-Allocated Compound Types
    // ═══════════════════════════════════════════════════════════════════
    /// UTF-8 string
    Str(Arc<String>),

    /// `:name`
    Symbol(Arc<String>),

    /// Ordered sequence (the language's list type)
    Vector(Arc<Vec<Value>>),

    /// Fixed-arity heterogeneous tuple `{a, b}`
    Tuple(Arc<Vec<Value>>),

    /// Insertion-ordered map
    Map(Arc<IndexMap<HashableValue, Value>>),

    /// Insertion-ordered set
    Set(Arc<IndexSet<HashableValue>>),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 3: Callables and Records
    // ═══════════════════════════════════════════════════════════════════
    /// User function or placeholder lambda with its captured context
    Closure(Arc<Closure>),

    /// Reference to a registered native function
    Native(NativeRef),

    /// Exception record `{kind, message}`; ordinary data, never raised
    Exception(Arc<ExceptionRecord>),
}

/// Structured failure value built by `Core.exception/2` and friends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExceptionRecord {
    /// Failure category
    pub kind: String,

    /// Human-readable description
    pub message: String,
}
