//! Page-break rules spliced into the staged stylesheet.

use std::fs;
use std::path::Path;

use crate::error::AssembleError;

/// Placeholder replaced by the page-break rules.
pub const PAGE_BREAKS_PLACEHOLDER: &str = "/*MODULE_PAGE_BREAKS*/";

/// One `page-break-before` rule per module, joined by newlines.
#[must_use]
pub fn page_break_rules(modules: &[String]) -> String {
    modules
        .iter()
        .map(|fqn| format!(r#"h1.module[id="m-{fqn}"] {{ page-break-before: always; }}"#))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace the placeholder in `css` with page-break rules for `modules`.
#[must_use]
pub fn splice_page_breaks(css: &str, modules: &[String]) -> String {
    css.replace(PAGE_BREAKS_PLACEHOLDER, &page_break_rules(modules))
}

/// Rewrite the stylesheet at `path` in place with page-break rules.
///
/// Does nothing when `modules` is empty.
pub fn apply_page_breaks(path: &Path, modules: &[String]) -> Result<(), AssembleError> {
    if modules.is_empty() {
        return Ok(());
    }
    let css = fs::read_to_string(path).map_err(|source| AssembleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !css.contains(PAGE_BREAKS_PLACEHOLDER) {
        tracing::warn!(path = %path.display(), "Stylesheet has no page-break placeholder");
    }
    fs::write(path, splice_page_breaks(&css, modules)).map_err(|source| AssembleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(modules = modules.len(), "Spliced page-break rules");
    Ok(())
}
