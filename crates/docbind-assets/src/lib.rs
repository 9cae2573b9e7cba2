//! Support files staged next to the assembled document.
//!
//! The renderer resolves the stylesheet and the table-of-contents icons
//! relative to the assembled document, so they are copied into the staging
//! directory before assembly:
//!
//! - `<css_file>`: the built-in print stylesheet or a custom one
//! - `img/icon_module.svg`, `img/icon_package.svg`
//!
//! The built-in files are compiled into the binary via `rust-embed`.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Embedded default assets.
#[derive(rust_embed::RustEmbed)]
#[folder = "assets"]
#[prefix = ""]
struct Assets;

/// Name of the built-in stylesheet.
pub const DEFAULT_STYLESHEET: &str = "pdf.css";

/// Icons referenced by the nested table of contents.
pub const ICONS: [&str; 2] = ["img/icon_module.svg", "img/icon_package.svg"];

/// Error returned when staging assets fails.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// An embedded asset is missing from the build.
    #[error("Embedded asset not found: {0}")]
    Missing(String),
    /// Copying or writing a file failed.
    #[error("Failed to stage {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Get an embedded asset by path (relative to `assets/`).
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    Assets::get(path).map(|f| f.data)
}

/// Iterate all embedded asset paths.
pub fn iter() -> impl Iterator<Item = Cow<'static, str>> {
    Assets::iter()
}

/// Copy the stylesheet and icons into `dest`.
///
/// The stylesheet is written as `css_file`. When `stylesheet` is given it is
/// copied instead of the built-in one. Returns the staged stylesheet path.
pub fn install(
    dest: &Path,
    css_file: &str,
    stylesheet: Option<&Path>,
) -> Result<PathBuf, AssetError> {
    let css_path = dest.join(css_file);
    match stylesheet {
        Some(custom) => {
            fs::copy(custom, &css_path).map_err(|source| AssetError::Io {
                path: custom.to_path_buf(),
                source,
            })?;
        }
        None => write_embedded(DEFAULT_STYLESHEET, &css_path)?,
    }

    let img_dir = dest.join("img");
    fs::create_dir_all(&img_dir).map_err(|source| AssetError::Io {
        path: img_dir.clone(),
        source,
    })?;
    for icon in ICONS {
        write_embedded(icon, &dest.join(icon))?;
    }

    tracing::debug!(dest = %dest.display(), css = css_file, "Staged assets");
    Ok(css_path)
}

fn write_embedded(name: &str, target: &Path) -> Result<(), AssetError> {
    let data = get(name).ok_or_else(|| AssetError::Missing(name.to_owned()))?;
    fs::write(target, data).map_err(|source| AssetError::Io {
        path: target.to_path_buf(),
        source,
    })
}
