//! `Log`: script messages as tracing events under `rata::script`

use tracing::{debug, error, info, warn};

use super::{Invoke, NativeRegistry, NativeResult};
use crate::value::Value;

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register("Log", "debug", 1, log_debug);
    registry.register("Log", "info", 1, log_info);
    registry.register("Log", "warn", 1, log_warn);
    registry.register("Log", "error", 1, log_error);
}

fn log_debug(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    debug!(target: "rata::script", "{}", args[0]);
    Ok(Value::ok())
}

fn log_info(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    info!(target: "rata::script", "{}", args[0]);
    Ok(Value::ok())
}

fn log_warn(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    warn!(target: "rata::script", "{}", args[0]);
    Ok(Value::ok())
}

fn log_error(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    error!(target: "rata::script", "{}", args[0]);
    Ok(Value::ok())
}
