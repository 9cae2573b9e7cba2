//! `docbind pdf` command implementation.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::Args;
use docbind_config::{CliSettings, Config};
use docbind_pdf::{ExternalRenderer, generate_pdf};
use docbind_symbols::JsonSymbolSource;

use crate::error::CliError;
use crate::output::Output;

const INDEX_PAGE: &str = "index.html";

/// Arguments for the pdf command.
#[derive(Args)]
pub(crate) struct PdfArgs {
    /// Directory containing one `<module-fqn>.html` fragment per module.
    fragment_dir: PathBuf,

    /// Destination PDF file.
    #[arg(short, long)]
    output: PathBuf,

    /// Symbol metadata directory (default: <FRAGMENT_DIR>/symbols).
    #[arg(long)]
    symbols: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover docbind.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document title (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Use a package-shaped table of contents (overrides config).
    #[arg(long)]
    nested_toc: bool,

    /// Base URL for links leaving the document (overrides config).
    #[arg(long, env = "DOCBIND_SYMLINK")]
    symlink: Option<String>,

    /// Renderer executable (overrides config).
    #[arg(long, env = "DOCBIND_RENDERER")]
    renderer: Option<String>,

    /// Keep the assembled document and its assets in this directory.
    #[arg(long)]
    keep_html: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl PdfArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            pdf_title: self.title.clone(),
            nested_toc: self.nested_toc.then_some(true),
            symlink: self.symlink.clone(),
            renderer_command: self.renderer.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let fragments = discover_fragments(&self.fragment_dir)?;
        if fragments.is_empty() {
            return Err(CliError::Validation(format!(
                "No HTML fragments found in {}",
                self.fragment_dir.display()
            )));
        }
        output.field(
            "Fragments",
            format!("{} in {}", fragments.len(), self.fragment_dir.display()),
        );

        let symbols_dir = self
            .symbols
            .unwrap_or_else(|| self.fragment_dir.join("symbols"));
        if !symbols_dir.is_dir() {
            output.warning(&format!(
                "Symbol directory {} not found, bookmarks and index will only list modules",
                symbols_dir.display()
            ));
        }
        let symbols = JsonSymbolSource::new(symbols_dir);
        let renderer = ExternalRenderer::from_config(&config.renderer);

        // Held until the renderer exits; dropping it removes the staging files.
        let temp_dir;
        let staging = if let Some(dir) = &self.keep_html {
            std::fs::create_dir_all(dir)?;
            dir.clone()
        } else {
            temp_dir = tempfile::tempdir()?;
            temp_dir.path().to_path_buf()
        };
        tracing::debug!(staging = %staging.display(), "Using staging directory");

        let document = generate_pdf(
            &config,
            &fragments,
            &symbols,
            &renderer,
            &staging,
            &self.output,
        )?;

        if self.keep_html.is_some() {
            output.field("Document", document.display());
        }
        output.success(&format!("PDF written to {}", self.output.display()));
        Ok(())
    }
}

/// List `*.html` files directly inside `dir`, sorted by path.
///
/// `index.html` is the generator's own landing page and never a module.
fn discover_fragments(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let dir_str = dir.to_str().ok_or_else(|| {
        CliError::Validation(format!("Fragment directory is not valid UTF-8: {}", dir.display()))
    })?;
    let pattern = format!("{}/*.html", glob::Pattern::escape(dir_str));

    let mut fragments = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| CliError::Io(e.into()))?;
        if path.is_file() && path.file_name() != Some(OsStr::new(INDEX_PAGE)) {
            fragments.push(path);
        }
    }
    fragments.sort();
    Ok(fragments)
}
