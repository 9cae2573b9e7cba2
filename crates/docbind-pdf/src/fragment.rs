//! Per-module HTML fragment helpers.

use std::path::Path;

/// Marker opening the module body inside a fragment.
const BODY_START: &str = r#"<div class="module">"#;

/// Marker of the page footer following the module body.
const BODY_END: &str = r#"<div id="kandil-footer">"#;

/// Module fqn of a fragment named `<module-fqn>.html`.
///
/// Returns `None` when the path has no usable file stem.
#[must_use]
pub fn module_fqn_from_path(path: &Path) -> Option<&str> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
}

/// Slice of a fragment holding the module body.
///
/// Starts at the first `<div class="module">` and stops before the last
/// `<div id="kandil-footer">`. A missing start marker starts the slice at the
/// beginning; a missing end marker, or one before the start, runs it to the
/// end.
#[must_use]
pub fn extract_module_body(html: &str) -> &str {
    let start = html.find(BODY_START).unwrap_or(0);
    let end = html
        .rfind(BODY_END)
        .filter(|&end| end >= start)
        .unwrap_or(html.len());
    &html[start..end]
}
