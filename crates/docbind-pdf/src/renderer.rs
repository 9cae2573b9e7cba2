//! PDF rendering of the assembled document.

use std::path::Path;
use std::process::{Command, ExitStatus};

use docbind_config::RendererConfig;

/// Error returned when the renderer cannot produce the PDF.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The renderer executable could not be started.
    #[error("Failed to run renderer `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The renderer exited unsuccessfully.
    #[error("Render failed: `{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Turns an assembled (X)HTML document into a PDF.
pub trait Renderer {
    /// Render `source` into `dest`, blocking until done.
    fn render(&self, source: &Path, dest: &Path) -> Result<(), RenderError>;
}

/// Renderer running an external command as
/// `<command> <source> -o <dest> [-v]`.
#[derive(Clone, Debug)]
pub struct ExternalRenderer {
    command: String,
    verbose: bool,
}

impl ExternalRenderer {
    #[must_use]
    pub fn new(command: impl Into<String>, verbose: bool) -> Self {
        Self {
            command: command.into(),
            verbose,
        }
    }

    #[must_use]
    pub fn from_config(config: &RendererConfig) -> Self {
        Self::new(&config.command, config.verbose)
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    fn build_command(&self, source: &Path, dest: &Path) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.arg(source).arg("-o").arg(dest);
        if self.verbose {
            cmd.arg("-v");
        }
        cmd
    }
}

impl Renderer for ExternalRenderer {
    fn render(&self, source: &Path, dest: &Path) -> Result<(), RenderError> {
        tracing::info!(
            command = %self.command,
            source = %source.display(),
            dest = %dest.display(),
            "Running renderer"
        );
        let status = self
            .build_command(source, dest)
            .status()
            .map_err(|source| RenderError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        tracing::debug!(%status, "Renderer exited");
        if !status.success() {
            return Err(RenderError::Failed {
                command: self.command.clone(),
                status,
            });
        }
        Ok(())
    }
}
