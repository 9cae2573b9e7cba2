//! Symbol source trait and per-module symbol tables.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::symbol::{Symbol, SymbolKind, SymbolNode};

/// Error returned when symbol metadata exists but cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum SymbolError {
    /// Metadata file could not be read.
    #[error("Failed to read symbols from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Metadata file is not valid JSON for a symbol tree.
    #[error("Invalid symbol metadata in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Queryable source of per-module symbol metadata.
///
/// Implementations return `Ok(None)` when a module simply has no metadata;
/// callers treat that as an empty symbol table.
pub trait SymbolSource: Send + Sync {
    /// Load the symbol table of the module with the given fqn.
    fn module_symbols(&self, module_fqn: &str) -> Result<Option<ModuleSymbols>, SymbolError>;
}

/// Symbols declared in one module.
///
/// Holds the module's symbol tree (rooted at the module itself), a lookup by
/// in-module qualified name (`Outer.inner`), and the symbols grouped by kind
/// in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleSymbols {
    root: Symbol,
    by_name: BTreeMap<String, Symbol>,
    by_kind: BTreeMap<SymbolKind, Vec<Symbol>>,
}

impl ModuleSymbols {
    /// Empty table for a module without metadata.
    #[must_use]
    pub fn empty(module_fqn: &str) -> Self {
        Self {
            root: Symbol {
                name: short_name(module_fqn).to_owned(),
                link: format!("#m-{module_fqn}"),
                kind: SymbolKind::Module,
                sub: Vec::new(),
            },
            by_name: BTreeMap::new(),
            by_kind: BTreeMap::new(),
        }
    }

    /// Build the table from a metadata tree rooted at the module symbol.
    ///
    /// Links default to `#m-<module-fqn>:<qualified-name>`, matching the
    /// anchor names produced by link rewriting.
    #[must_use]
    pub fn from_node(module_fqn: &str, node: &SymbolNode) -> Self {
        let mut table = Self::empty(module_fqn);
        if !node.name.is_empty() {
            table.root.name.clone_from(&node.name);
        }
        if let Some(link) = &node.link {
            table.root.link.clone_from(link);
        }

        let mut sub = Vec::with_capacity(node.sub.len());
        for child in &node.sub {
            sub.push(table.convert(module_fqn, "", child));
        }
        table.root.sub = sub;
        table
    }

    /// Convert one node, registering it (pre-order) in the lookups.
    fn convert(&mut self, module_fqn: &str, parent: &str, node: &SymbolNode) -> Symbol {
        let qualified = if parent.is_empty() {
            node.name.clone()
        } else {
            format!("{parent}.{}", node.name)
        };
        let link = node
            .link
            .clone()
            .unwrap_or_else(|| format!("#m-{module_fqn}:{qualified}"));

        // Register before descending so kind lists stay in declaration order.
        let list = self.by_kind.entry(node.kind).or_default();
        let slot = list.len();
        list.push(Symbol {
            name: node.name.clone(),
            link: link.clone(),
            kind: node.kind,
            sub: Vec::new(),
        });

        let sub: Vec<Symbol> = node
            .sub
            .iter()
            .map(|child| self.convert(module_fqn, &qualified, child))
            .collect();

        let symbol = Symbol {
            name: node.name.clone(),
            link,
            kind: node.kind,
            sub,
        };
        if let Some(list) = self.by_kind.get_mut(&node.kind) {
            list[slot] = symbol.clone();
        }
        self.by_name.insert(qualified, symbol.clone());
        symbol
    }

    /// The module symbol with its nested declarations.
    #[must_use]
    pub fn root(&self) -> &Symbol {
        &self.root
    }

    /// Look up a symbol by its in-module qualified name.
    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&Symbol> {
        self.by_name.get(qualified_name)
    }

    /// Symbols of one kind in declaration order.
    #[must_use]
    pub fn of_kind(&self, kind: SymbolKind) -> &[Symbol] {
        self.by_kind.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// All kind groupings.
    #[must_use]
    pub fn by_kind(&self) -> &BTreeMap<SymbolKind, Vec<Symbol>> {
        &self.by_kind
    }

    /// Number of symbols below the module root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the module declares no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Last dot-separated segment of an fqn.
fn short_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}
