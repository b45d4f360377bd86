//! Environment-driven activation: `enable_if`, `disable_if`, `bypass_if`.
//!
//! Each field names an environment variable; only whether it is set matters.
//! Resolution produces a new config holding the operators that would actually
//! run, with `bypass` folded in. An explicit `bypass` always wins over
//! `bypass_if`.

use super::{DagConfig, OperatorConfig};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConditionError {
    #[error("operator '{operator}' specified both `enable_if` and `disable_if`")]
    ConflictingConditions { operator: String },
}

/// Apply activation conditions using `lookup` to read variables.
///
/// Pass `|name| std::env::var(name).ok()` for the process environment.
pub fn resolve_conditions<F>(config: &DagConfig, lookup: F) -> Result<DagConfig, ConditionError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut op = Vec::with_capacity(config.op.len());

    for raw in &config.op {
        if raw.enable_if.is_some() && raw.disable_if.is_some() {
            return Err(ConditionError::ConflictingConditions {
                operator: raw.name.clone(),
            });
        }

        let mut resolved = raw.clone();
        if resolved.bypass.is_none() {
            if let Some(var) = &raw.bypass_if {
                if let Some(value) = lookup(var) {
                    resolved.bypass = Some(true);
                    tracing::info!(operator = %raw.name, var = %var, value = %value, "bypassed by env");
                }
            }
        }

        if is_enabled(raw, &lookup) {
            op.push(resolved);
        } else {
            tracing::info!(operator = %raw.name, "disabled");
        }
    }

    Ok(DagConfig { op })
}

fn is_enabled<F>(op: &OperatorConfig, lookup: &F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match (&op.enable_if, &op.disable_if) {
        (Some(var), _) => lookup(var).is_some(),
        (None, Some(var)) => lookup(var).is_none(),
        (None, None) => true,
    }
}
