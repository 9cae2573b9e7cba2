//! JSON file backend for symbol metadata.

use std::path::{Path, PathBuf};

use crate::source::{ModuleSymbols, SymbolError, SymbolSource};
use crate::symbol::SymbolNode;

/// Reads symbol trees from `<dir>/<module-fqn>.json`.
///
/// A missing file means the module has no metadata and is not an error.
#[derive(Clone, Debug)]
pub struct JsonSymbolSource {
    dir: PathBuf,
}

impl JsonSymbolSource {
    /// Create a source reading from the given directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the metadata files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, module_fqn: &str) -> PathBuf {
        self.dir.join(format!("{module_fqn}.json"))
    }
}

impl SymbolSource for JsonSymbolSource {
    fn module_symbols(&self, module_fqn: &str) -> Result<Option<ModuleSymbols>, SymbolError> {
        let path = self.path_for(module_fqn);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(module = module_fqn, path = %path.display(), "No symbol metadata");
                return Ok(None);
            }
            Err(source) => return Err(SymbolError::Io { path, source }),
        };

        let node: SymbolNode =
            serde_json::from_str(&content).map_err(|source| SymbolError::Parse {
                path: path.clone(),
                source,
            })?;

        Ok(Some(ModuleSymbols::from_node(module_fqn, &node)))
    }
}
