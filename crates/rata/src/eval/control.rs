//! Control flow mechanism for early return and faults

use crate::error::EvalFault;
use crate::value::Value;

/// Non-local exit from expression evaluation.
///
/// Travels on the `Err` side of `Result<Value, ControlFlow>` so that `?`
/// unwinds nested expressions, blocks and branches in one step.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    /// `return value`; caught by the enclosing function or lambda call.
    Return {
        /// Value to return from the function
        value: Value,
    },

    /// A runtime fault; terminal for the current top-level statement.
    Fault(EvalFault),
}

impl ControlFlow {
    /// Create a return.
    pub fn return_value(value: Value) -> Self {
        ControlFlow::Return { value }
    }

    /// Resolve at a call boundary: a return becomes the call's value.
    pub fn into_result(self) -> Result<Value, EvalFault> {
        match self {
            ControlFlow::Return { value } => Ok(value),
            ControlFlow::Fault(fault) => Err(fault),
        }
    }
}

impl From<EvalFault> for ControlFlow {
    fn from(fault: EvalFault) -> Self {
        ControlFlow::Fault(fault)
    }
}
