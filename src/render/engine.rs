//! Graphviz `dot` subprocess: DOT on stdin, encoded diagram on stdout.

use super::RenderError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

pub const DEFAULT_PROGRAM: &str = "dot";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEngine {
    program: PathBuf,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl LayoutEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run `program -T{format}` over `dot` and return its stdout.
    pub fn render(&self, dot: &str, format: &str) -> Result<Vec<u8>, RenderError> {
        tracing::debug!(program = %self.program.display(), format, "running layout engine");

        let mut child = Command::new(&self.program)
            .arg(format!("-T{format}"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::EngineSpawn {
                program: self.program.clone(),
                source,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("layout engine stdin unavailable"))?;

        // Feed stdin from a separate thread so a large graph cannot fill both pipes.
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(dot.as_bytes()));
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (written, output)
        });

        let output = output?;
        if !output.status.success() {
            return Err(RenderError::EngineFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written?;

        Ok(output.stdout)
    }
}
