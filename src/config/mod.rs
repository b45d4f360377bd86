//! DAG description (dag.json): operators wired through named channels.
//!
//! JSON shape:
//! {
//!   "op": [
//!     {
//!       "name": "detector",              // required
//!       "algorithm": "YoloDetector",     // or "group": { "op": [{ "algorithm": "...", "bypass": false }] }
//!       "bypass": false,
//!       "bypass_if": "SKIP_DETECTOR",    // optional, env var name
//!       "enable_if": "WITH_CAMERA",      // optional, env var name (exclusive with disable_if)
//!       "trigger": ["camera_frame"],     // ordering-only dependencies
//!       "input": ["camera_frame", "lidar_cloud"],
//!       "input_offset": [0, -1],         // shorter than input => missing entries are 0
//!       "latest": ["ego_pose"],          // consume most recent value
//!       "output": [{ "event": "obstacles", "data": "...", "type": "...", "hz": 10 }]
//!     }
//!   ]
//! }
//!
//! Everything except `name` may be omitted.

pub mod condition;

pub use condition::{ConditionError, resolve_conditions};

use crate::Result;
use crate::diagnostics;

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DagConfig {
    #[serde(default)]
    pub op: Vec<OperatorConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OperatorConfig {
    pub name: String,

    #[serde(default)]
    pub algorithm: String,

    #[serde(default)]
    pub group: Option<GroupConfig>,

    /// `None` when the field is absent, which lets `bypass_if` decide.
    #[serde(default)]
    pub bypass: Option<bool>,

    #[serde(default)]
    pub trigger: Vec<String>,

    #[serde(default)]
    pub input: Vec<String>,

    #[serde(default)]
    pub input_offset: Vec<i32>,

    #[serde(default)]
    pub latest: Vec<String>,

    #[serde(default)]
    pub output: Vec<OutputConfig>,

    #[serde(default)]
    pub enable_if: Option<String>,

    #[serde(default)]
    pub disable_if: Option<String>,

    #[serde(default)]
    pub bypass_if: Option<String>,
}

/// Ordered sub-algorithms run inside a single operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GroupConfig {
    #[serde(default)]
    pub op: Vec<GroupMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GroupMember {
    #[serde(default)]
    pub algorithm: String,

    #[serde(default)]
    pub bypass: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub event: String,

    #[serde(default)]
    pub data: String,

    #[serde(default, rename = "type")]
    pub data_type: String,

    /// 0 means "not set".
    #[serde(default)]
    pub hz: u32,
}

/// What an operator runs, after resolving `algorithm` against `group`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm<'a> {
    Single(&'a str),
    Group(&'a [GroupMember]),
    Unset,
}

impl OperatorConfig {
    pub fn is_bypassed(&self) -> bool {
        self.bypass.unwrap_or(false)
    }

    /// A non-empty `algorithm` takes precedence over `group`.
    pub fn algorithm(&self) -> Algorithm<'_> {
        if !self.algorithm.is_empty() {
            return Algorithm::Single(&self.algorithm);
        }
        match &self.group {
            Some(group) if !group.op.is_empty() => Algorithm::Group(&group.op),
            _ => Algorithm::Unset,
        }
    }

    /// Identity of the operator node: `{name}_{algorithm}`.
    pub fn node_key(&self) -> String {
        format!("{}_{}", self.name, self.algorithm)
    }

    /// Offset of the `index`-th input; positions past `input_offset` read as 0.
    pub fn input_offset_at(&self, index: usize) -> i32 {
        self.input_offset.get(index).copied().unwrap_or(0)
    }
}

impl OutputConfig {
    /// `field: value` lines for every field that is set, in schema order.
    pub fn descriptors(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(4);
        if !self.event.is_empty() {
            out.push(format!("event: {}", self.event));
        }
        if !self.data.is_empty() {
            out.push(format!("data: {}", self.data));
        }
        if !self.data_type.is_empty() {
            out.push(format!("type: {}", self.data_type));
        }
        if self.hz != 0 {
            out.push(format!("hz: {}", self.hz));
        }
        out
    }
}

/// Parse a DAG description from its JSON text.
pub fn parse_config(text: &str) -> Result<DagConfig> {
    serde_json::from_str(text)
        .with_context(|| diagnostics::error_message("cannot parse DAG description"))
}

/// Read and parse a DAG description file.
pub fn load_config(path: impl AsRef<Path>) -> Result<DagConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| {
        diagnostics::error_message(format!("read DAG description {}", path.display()))
    })?;
    let config = parse_config(&text).with_context(|| {
        diagnostics::error_message(format!("invalid DAG description {}", path.display()))
    })?;
    tracing::debug!(path = %path.display(), operators = config.op.len(), "loaded DAG description");
    Ok(config)
}
