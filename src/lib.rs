//! Render a DAG description (operators wired through named channels) as a diagram.
//!
//! Pipeline: [`config`] model → [`graph::build`] → [`render`] (DOT text, then
//! optionally the Graphviz layout engine).

pub mod config;
pub mod diagnostics;
pub mod graph;
pub mod render;
pub mod style;

pub use config::{DagConfig, OperatorConfig, OutputConfig};
pub use graph::{AbstractGraph, BuildError, build};

pub type Result<T> = anyhow::Result<T>;
