//! Persistent, immutable binding context threaded through evaluation

use std::fmt;

use im::HashMap;

use crate::value::Value;

/// Bindings of one evaluated user module.
pub type ModuleBindings = HashMap<String, Value>;

/// The binding environment.
///
/// Every "mutation" returns a new context that shares structure with the
/// old one, so holding a snapshot (as closures do) costs a pointer copy and
/// never observes later bindings.
///
/// A context carries four namespaces:
/// - ordinary identifier bindings
/// - the placeholder scope of the active lambda invocation (`.x`)
/// - `library ... as alias` entries
/// - user modules registered by evaluating a `module` unit
///
/// # Example
///
/// ```
/// use rata::{Context, Value};
///
/// let base = Context::new().bind("x", Value::Int(1));
/// let shadowed = base.bind("x", Value::Int(2));
///
/// assert_eq!(shadowed.lookup("x"), Some(&Value::Int(2)));
/// assert_eq!(base.lookup("x"), Some(&Value::Int(1))); // untouched
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct Context {
    bindings: HashMap<String, Value>,
    lambda_params: HashMap<String, Value>,
    aliases: HashMap<String, String>,
    modules: HashMap<String, ModuleBindings>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Identifier Bindings
    // ═══════════════════════════════════════════════════════════════════

    /// A new context with `name` bound to `value`, shadowing any previous
    /// binding of the same name.
    pub fn bind(&self, name: impl Into<String>, value: Value) -> Self {
        Self {
            bindings: self.bindings.update(name.into(), value),
            ..self.clone()
        }
    }

    /// Look up an identifier.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of identifier bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether there are no identifier bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Identifier bindings sorted by name.
    pub fn bindings(&self) -> Vec<(&str, &Value)> {
        let mut out: Vec<_> = self
            .bindings
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// The raw identifier map, as registered for a module.
    pub fn identifier_map(&self) -> &HashMap<String, Value> {
        &self.bindings
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lambda Placeholder Scope
    // ═══════════════════════════════════════════════════════════════════

    /// A new context whose placeholder scope is exactly `params`.
    ///
    /// The previous placeholder scope is replaced, not layered: an inner
    /// lambda never sees the outer lambda's `.x`.
    pub fn with_lambda_params(&self, params: HashMap<String, Value>) -> Self {
        Self {
            lambda_params: params,
            ..self.clone()
        }
    }

    /// Look up a placeholder bound by the active lambda call.
    pub fn lambda_param(&self, name: &str) -> Option<&Value> {
        self.lambda_params.get(name)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Aliases and Modules
    // ═══════════════════════════════════════════════════════════════════

    /// A new context where `alias` refers to `module`.
    pub fn with_alias(&self, alias: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            aliases: self.aliases.update(alias.into(), module.into()),
            ..self.clone()
        }
    }

    /// The module an alias stands for.
    pub fn resolve_alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// A new context with a user module registered under `name`.
    pub fn with_module(&self, name: impl Into<String>, bindings: ModuleBindings) -> Self {
        Self {
            modules: self.modules.update(name.into(), bindings),
            ..self.clone()
        }
    }

    /// Bindings of a registered user module.
    pub fn module(&self, name: &str) -> Option<&ModuleBindings> {
        self.modules.get(name)
    }

    /// Whether a user module is registered under `name`.
    pub fn has_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Names of registered user modules, sorted.
    pub fn module_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.bindings().into_iter().map(|(k, _)| k).collect();
        f.debug_struct("Context")
            .field("bindings", &names)
            .field("modules", &self.module_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_does_not_mutate_parent() {
        let parent = Context::new().bind("x", Value::Int(1));
        let child = parent.bind("y", Value::Int(2));

        assert!(child.contains("x"));
        assert!(child.contains("y"));
        assert!(!parent.contains("y"));
        assert_eq!(parent.len(), 1);
    }

    #[test]
    fn test_lambda_scope_is_replaced() {
        let outer = Context::new().with_lambda_params(HashMap::unit("x".to_string(), Value::Int(1)));
        let inner = outer.with_lambda_params(HashMap::unit("y".to_string(), Value::Int(2)));

        assert_eq!(outer.lambda_param("x"), Some(&Value::Int(1)));
        assert_eq!(inner.lambda_param("x"), None);
        assert_eq!(inner.lambda_param("y"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_aliases_and_modules() {
        let module = HashMap::unit("f".to_string(), Value::Int(1));
        let ctx = Context::new()
            .with_module("Util", module)
            .with_alias("U", "Util");

        assert_eq!(ctx.resolve_alias("U"), Some("Util"));
        assert!(ctx.has_module("Util"));
        assert_eq!(ctx.module("Util").and_then(|m| m.get("f")), Some(&Value::Int(1)));
        assert_eq!(ctx.module_names(), vec!["Util"]);
    }

    #[test]
    fn test_bindings_sorted() {
        let ctx = Context::new()
            .bind("b", Value::Int(2))
            .bind("a", Value::Int(1));
        let names: Vec<&str> = ctx.bindings().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
