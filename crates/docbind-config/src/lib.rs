//! Configuration management for docbind.
//!
//! Parses `docbind.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `pdf.pdf_title`
//! - `pdf.author`
//! - `pdf.symlink`
//! - `renderer.command`

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override document title.
    pub pdf_title: Option<String>,
    /// Override nested table of contents flag.
    pub nested_toc: Option<bool>,
    /// Override base URL for absolute cross-references.
    pub symlink: Option<String>,
    /// Override renderer executable.
    pub renderer_command: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docbind.toml";

/// Timestamp format used when `creation_date` is left unset.
const CREATION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S+00:00";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document assembly options.
    pub pdf: PdfConfig,
    /// External renderer options.
    pub renderer: RendererConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Output markup flavor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Flavor {
    /// Plain HTML, no doctype.
    #[default]
    Html,
    /// XHTML 1.0 Strict with the XHTML namespace.
    Xhtml,
}

impl Flavor {
    /// File extension of the assembled document.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Xhtml => "xhtml",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => f.write_str("HTML"),
            Self::Xhtml => f.write_str("XHTML"),
        }
    }
}

impl<'de> Deserialize<'de> for Flavor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "xhtml" => Ok(Self::Xhtml),
            other => Err(serde::de::Error::custom(format!(
                "x_html must be HTML or XHTML, got '{other}'"
            ))),
        }
    }
}

/// Document assembly configuration (`[pdf]` section).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Document title (`<title>` and PDF metadata).
    pub pdf_title: String,
    /// Heading shown on the cover page.
    pub cover_title: String,
    /// ISO-8601 creation date. Current UTC time when unset.
    pub creation_date: Option<String>,
    /// Author metadata.
    pub author: String,
    /// Subject metadata.
    pub subject: String,
    /// Keywords metadata.
    pub keywords: String,
    /// Generator metadata.
    pub generator: String,
    /// Markup flavor of the assembled document.
    pub x_html: Flavor,
    /// Stylesheet filename referenced from the document head.
    pub css_file: String,
    /// Base URL prefixed to links that leave the merged document.
    pub symlink: String,
    /// Package-shaped table of contents instead of a flat module list.
    pub nested_toc: bool,
    /// Markup injected before the module list in the table of contents.
    pub first_toc: String,
    /// Markup injected after the module list in the table of contents.
    pub last_toc: String,
    /// Files concatenated before the module pages.
    pub before_files: Vec<PathBuf>,
    /// Files concatenated after the module pages.
    pub after_files: Vec<PathBuf>,
    /// Modules that start on a new page.
    pub newpage_modules: Vec<String>,
    /// Custom stylesheet staged instead of the built-in one.
    pub stylesheet: Option<PathBuf>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            pdf_title: String::new(),
            cover_title: "Cover Title".to_owned(),
            creation_date: None,
            author: String::new(),
            subject: "Programming API".to_owned(),
            keywords: "D programming language".to_owned(),
            generator: "dil D compiler".to_owned(),
            x_html: Flavor::Html,
            css_file: "pdf.css".to_owned(),
            symlink: String::new(),
            nested_toc: false,
            first_toc: String::new(),
            last_toc: String::new(),
            before_files: Vec::new(),
            after_files: Vec::new(),
            newpage_modules: Vec::new(),
            stylesheet: None,
        }
    }
}

impl PdfConfig {
    /// Creation date to embed in the document.
    ///
    /// Falls back to the current UTC time when no date is configured.
    #[must_use]
    pub fn resolved_creation_date(&self) -> String {
        match &self.creation_date {
            Some(date) if !date.is_empty() => date.clone(),
            _ => chrono::Utc::now().format(CREATION_DATE_FORMAT).to_string(),
        }
    }
}

/// External renderer configuration (`[renderer]` section).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Renderer executable.
    pub command: String,
    /// Pass the verbosity flag to the renderer.
    pub verbose: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: "prince".to_owned(),
            verbose: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`pdf.symlink`").
        field: String,
        /// Error message (e.g., "${`DOCS_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docbind.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(title) = &settings.pdf_title {
            self.pdf.pdf_title.clone_from(title);
        }
        if let Some(nested_toc) = settings.nested_toc {
            self.pdf.nested_toc = nested_toc;
        }
        if let Some(symlink) = &settings.symlink {
            self.pdf.symlink.clone_from(symlink);
        }
        if let Some(command) = &settings.renderer_command {
            self.renderer.command.clone_from(command);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_pdf()?;
        require_non_empty(&self.renderer.command, "renderer.command")?;
        Ok(())
    }

    fn validate_pdf(&self) -> Result<(), ConfigError> {
        let css_file = &self.pdf.css_file;
        require_non_empty(css_file, "pdf.css_file")?;
        if css_file.contains(['/', '\\']) || css_file == ".." || css_file == "." {
            return Err(ConfigError::Validation(format!(
                "pdf.css_file must be a plain file name, got '{css_file}'"
            )));
        }

        if let Some(date) = self.pdf.creation_date.as_deref()
            && !date.is_empty()
            && chrono::DateTime::parse_from_rfc3339(date).is_err()
        {
            return Err(ConfigError::Validation(format!(
                "pdf.creation_date is not an ISO-8601 timestamp: '{date}'"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.pdf.pdf_title = expand::expand_env(&self.pdf.pdf_title, "pdf.pdf_title")?;
        self.pdf.author = expand::expand_env(&self.pdf.author, "pdf.author")?;
        self.pdf.symlink = expand::expand_env(&self.pdf.symlink, "pdf.symlink")?;
        self.renderer.command = expand::expand_env(&self.renderer.command, "renderer.command")?;
        Ok(())
    }

    /// Resolve relative include and stylesheet paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |paths: &mut [PathBuf]| {
            for path in paths.iter_mut() {
                if path.is_relative() {
                    *path = config_dir.join(&*path);
                }
            }
        };
        resolve(&mut self.pdf.before_files);
        resolve(&mut self.pdf.after_files);

        if let Some(stylesheet) = &mut self.pdf.stylesheet
            && stylesheet.is_relative()
        {
            *stylesheet = config_dir.join(&*stylesheet);
        }
    }
}
