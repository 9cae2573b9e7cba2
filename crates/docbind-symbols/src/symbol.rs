//! Symbol value types.

use std::fmt;

use serde::Deserialize;

/// Declaration category of a symbol.
///
/// Unknown categories in metadata files deserialize to [`SymbolKind::Other`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Package,
    Module,
    Template,
    Class,
    Interface,
    Struct,
    Union,
    Alias,
    Typedef,
    Enum,
    #[serde(rename = "enummem")]
    EnumMember,
    Function,
    Variable,
    Invariant,
    Unittest,
    Ctor,
    Dtor,
    Mixin,
    #[default]
    #[serde(other)]
    Other,
}

impl SymbolKind {
    /// Kinds listed in the alphabetical index, in merge order.
    pub const AGGREGATES: [Self; 4] = [Self::Class, Self::Interface, Self::Struct, Self::Union];

    /// Whether this kind is a class, interface, struct or union.
    #[must_use]
    pub fn is_aggregate(self) -> bool {
        Self::AGGREGATES.contains(&self)
    }

    /// Metadata spelling of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Module => "module",
            Self::Template => "template",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Struct => "struct",
            Self::Union => "union",
            Self::Alias => "alias",
            Self::Typedef => "typedef",
            Self::Enum => "enum",
            Self::EnumMember => "enummem",
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Invariant => "invariant",
            Self::Unittest => "unittest",
            Self::Ctor => "ctor",
            Self::Dtor => "dtor",
            Self::Mixin => "mixin",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A documented declaration with a link target inside the merged document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    /// Display name.
    pub name: String,
    /// Anchor target, e.g. `#m-tango.io.Stdout:Stdout.flush`.
    pub link: String,
    /// Declaration category.
    pub kind: SymbolKind,
    /// Nested declarations in source order.
    pub sub: Vec<Symbol>,
}

impl Symbol {
    /// Whether this symbol has nested declarations.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.sub.is_empty()
    }
}

/// Symbol tree node as stored in metadata files.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SymbolNode {
    /// Declared name.
    pub name: String,
    /// Declaration category.
    #[serde(default)]
    pub kind: SymbolKind,
    /// Explicit anchor target. Derived from the qualified name when absent.
    #[serde(default)]
    pub link: Option<String>,
    /// Nested declarations.
    #[serde(default)]
    pub sub: Vec<SymbolNode>,
}

impl SymbolNode {
    /// Create a leaf node.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            link: None,
            sub: Vec::new(),
        }
    }

    /// Attach nested declarations.
    #[must_use]
    pub fn with_sub(mut self, sub: Vec<SymbolNode>) -> Self {
        self.sub = sub;
        self
    }
}
