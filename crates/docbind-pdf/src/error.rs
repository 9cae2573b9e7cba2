//! Error type for document assembly.

use std::path::PathBuf;

use docbind_assets::AssetError;
use docbind_symbols::SymbolError;

use crate::renderer::RenderError;

/// Error returned when assembling or rendering a document fails.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    /// Reading a fragment or writing the document failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A configured before/after file does not exist.
    #[error("Included file not found: {}", .0.display())]
    MissingInclude(PathBuf),
    /// A fragment path has no module name.
    #[error("Cannot derive a module name from {}", .0.display())]
    InvalidFragmentName(PathBuf),
    /// Symbol metadata exists but is malformed.
    #[error(transparent)]
    Symbols(#[from] SymbolError),
    /// Staging the stylesheet or icons failed.
    #[error(transparent)]
    Assets(#[from] AssetError),
    /// The renderer failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}
