//! Hand the abstract graph to a layout engine.
//!
//! DOT text is produced in-process; every other format goes through the
//! Graphviz `dot` executable.

pub mod dot;
pub mod engine;

pub use dot::{DotBuilder, to_dot};
pub use engine::LayoutEngine;

use crate::graph::AbstractGraph;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot infer an output format from '{}' (expected an extension such as .png, .svg or .dot)", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("failed to start layout engine '{}'", program.display())]
    EngineSpawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("layout engine '{}' exited with {status}: {stderr}", program.display())]
    EngineFailed {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Layout direction (Graphviz `rankdir`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RankDir {
    #[default]
    #[value(name = "TB")]
    TopBottom,
    #[value(name = "LR")]
    LeftRight,
    #[value(name = "BT")]
    BottomTop,
    #[value(name = "RL")]
    RightLeft,
}

impl RankDir {
    pub fn as_str(self) -> &'static str {
        match self {
            RankDir::TopBottom => "TB",
            RankDir::LeftRight => "LR",
            RankDir::BottomTop => "BT",
            RankDir::RightLeft => "RL",
        }
    }
}

/// What to produce for a given destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raw DOT text, no layout engine involved.
    Dot,
    /// Any `-T` format understood by the layout engine (png, svg, pdf, ...).
    Engine(String),
}

impl OutputFormat {
    /// Pick the format from the extension after the last dot.
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| RenderError::UnknownFormat {
                path: path.to_path_buf(),
            })?;

        Ok(match ext.to_ascii_lowercase().as_str() {
            "dot" | "gv" => OutputFormat::Dot,
            other => OutputFormat::Engine(other.to_string()),
        })
    }
}

/// Encode `graph` in `format`.
pub fn render(
    graph: &AbstractGraph,
    rankdir: RankDir,
    format: &OutputFormat,
    engine: &LayoutEngine,
) -> Result<Vec<u8>, RenderError> {
    let dot = to_dot(graph, rankdir);
    match format {
        OutputFormat::Dot => Ok(dot.into_bytes()),
        OutputFormat::Engine(target) => engine.render(&dot, target),
    }
}

/// Render to `path`, choosing the format from its extension.
pub fn render_to_path(
    graph: &AbstractGraph,
    rankdir: RankDir,
    path: &Path,
    engine: &LayoutEngine,
) -> Result<(), RenderError> {
    let format = OutputFormat::from_path(path)?;
    let bytes = render(graph, rankdir, &format, engine)?;
    std::fs::write(path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "diagram written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::graph::build;
    use pretty_assertions::assert_eq;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/dag.dot")).unwrap(),
            OutputFormat::Dot
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("dag.GV")).unwrap(),
            OutputFormat::Dot
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("dag.v1.png")).unwrap(),
            OutputFormat::Engine("png".to_string())
        );
    }

    #[test]
    fn format_requires_extension() {
        let err = OutputFormat::from_path(Path::new("dag")).unwrap_err();
        assert!(matches!(err, RenderError::UnknownFormat { .. }));
    }

    #[test]
    fn dot_format_skips_the_engine() {
        let graph = build(&parse_config(r#"{ "op": [{ "name": "A" }] }"#).unwrap()).unwrap();
        let engine = LayoutEngine::new("/nonexistent/dot-binary");
        let bytes = render(&graph, RankDir::TopBottom, &OutputFormat::Dot, &engine).unwrap();
        assert_eq!(bytes, to_dot(&graph, RankDir::TopBottom).into_bytes());
    }

    #[test]
    fn render_to_path_writes_dot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dag.dot");
        let graph = build(&parse_config(r#"{ "op": [{ "name": "A" }] }"#).unwrap()).unwrap();

        render_to_path(&graph, RankDir::LeftRight, &path, &LayoutEngine::default()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("digraph DagNet {"));
        assert!(written.contains("rankdir=\"LR\";"));
    }
}
