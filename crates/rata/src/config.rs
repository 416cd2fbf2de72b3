//! Evaluation configuration

/// Free stack below which a new segment is allocated.
const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each stack segment allocated on demand.
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, moving onto a fresh heap-allocated stack segment first when
/// the current one is nearly exhausted. Recursive parsing and evaluation
/// go through here, so script depth is bounded by `max_call_depth` rather
/// than by the host thread's stack size.
pub(crate) fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, f)
}

/// Limits and switches for evaluation.
///
/// Carried by the [`Evaluator`](crate::eval::Evaluator) and controls
/// behavior like recursion limits and call tracing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum call depth (stack overflow protection)
    pub max_call_depth: usize,

    /// Emit a `trace` event for every closure and native call
    pub trace: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_call_depth: 1000,
            trace: false,
        }
    }
}

impl EvalConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with a custom call depth limit.
    pub fn with_max_call_depth(max_depth: usize) -> Self {
        Self {
            max_call_depth: max_depth,
            ..Default::default()
        }
    }

    /// Enable or disable call tracing.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EvalConfig::new();
        assert_eq!(config.max_call_depth, 1000);
        assert!(!config.trace);
    }

    #[test]
    fn test_builders() {
        let config = EvalConfig::with_max_call_depth(50).with_trace(true);
        assert_eq!(config.max_call_depth, 50);
        assert!(config.trace);
    }
}
