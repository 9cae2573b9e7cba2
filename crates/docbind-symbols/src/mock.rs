//! Mock symbol source for testing.
//!
//! Provides [`MockSymbolSource`] for unit testing without metadata files.

use std::collections::HashMap;

use crate::source::{ModuleSymbols, SymbolError, SymbolSource};
use crate::symbol::SymbolNode;

/// In-memory symbol source.
///
/// # Example
///
/// ```ignore
/// use docbind_symbols::{MockSymbolSource, SymbolKind, SymbolNode};
///
/// let source = MockSymbolSource::new().with_module(
///     "pkg.mod",
///     SymbolNode::new("mod", SymbolKind::Module)
///         .with_sub(vec![SymbolNode::new("Foo", SymbolKind::Class)]),
/// );
/// ```
#[derive(Debug, Default)]
pub struct MockSymbolSource {
    modules: HashMap<String, ModuleSymbols>,
}

impl MockSymbolSource {
    /// Create a source without any metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the symbol tree of a module.
    #[must_use]
    pub fn with_module(mut self, module_fqn: impl Into<String>, root: SymbolNode) -> Self {
        let module_fqn = module_fqn.into();
        let symbols = ModuleSymbols::from_node(&module_fqn, &root);
        self.modules.insert(module_fqn, symbols);
        self
    }
}

impl SymbolSource for MockSymbolSource {
    fn module_symbols(&self, module_fqn: &str) -> Result<Option<ModuleSymbols>, SymbolError> {
        Ok(self.modules.get(module_fqn).cloned())
    }
}
