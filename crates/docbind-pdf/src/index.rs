//! Alphabetical index of aggregate symbols.
//!
//! Symbols of every module are merged by kind into a [`SymbolCatalog`]. The
//! aggregates (classes, interfaces, structs and unions) are then sorted by
//! name and grouped by their upper-cased leading letter into a
//! [`SymbolIndex`], which drives both the index section of the document and
//! the "Symbols" bookmark.

use std::collections::BTreeMap;

use docbind_symbols::{ModuleSymbols, Symbol, SymbolKind};

/// Symbols of all modules merged by kind.
///
/// Lists keep module processing order until [`SymbolIndex::build`] sorts them.
#[derive(Clone, Debug, Default)]
pub struct SymbolCatalog {
    by_kind: BTreeMap<SymbolKind, Vec<Symbol>>,
}

impl SymbolCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one module's kind groupings.
    pub fn extend(&mut self, symbols: &ModuleSymbols) {
        for (kind, list) in symbols.by_kind() {
            self.by_kind
                .entry(*kind)
                .or_default()
                .extend(list.iter().cloned());
        }
    }

    /// Symbols of one kind in merge order.
    #[must_use]
    pub fn of_kind(&self, kind: SymbolKind) -> &[Symbol] {
        self.by_kind.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Aggregate symbols, concatenated kind by kind in merge order.
    pub fn aggregates(&self) -> impl Iterator<Item = &Symbol> {
        SymbolKind::AGGREGATES
            .iter()
            .flat_map(|kind| self.of_kind(*kind))
    }

    /// Total number of merged symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_kind.values().all(Vec::is_empty)
    }
}

/// Symbols sharing one leading letter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterGroup {
    /// Upper-cased first character of every name in the group.
    pub letter: String,
    /// Symbols in index order.
    pub symbols: Vec<Symbol>,
}

/// Sorted aggregate symbols grouped by leading letter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolIndex {
    groups: Vec<LetterGroup>,
}

impl SymbolIndex {
    /// Build the index from the aggregates of a catalog.
    #[must_use]
    pub fn build(catalog: &SymbolCatalog) -> Self {
        Self::from_symbols(catalog.aggregates().cloned())
    }

    /// Build the index from arbitrary symbols, keeping only aggregates.
    ///
    /// Names are compared case-insensitively; equal names keep input order.
    /// Symbols with an empty name cannot be filed under a letter and are
    /// skipped.
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut symbols: Vec<Symbol> = symbols
            .into_iter()
            .filter(|s| s.kind.is_aggregate() && !s.name.is_empty())
            .collect();
        symbols.sort_by_cached_key(|s| s.name.to_lowercase());

        let mut groups: Vec<LetterGroup> = Vec::new();
        for symbol in symbols {
            let letter = leading_letter(&symbol.name);
            match groups.iter_mut().find(|g| g.letter == letter) {
                Some(group) => group.symbols.push(symbol),
                None => groups.push(LetterGroup {
                    letter,
                    symbols: vec![symbol],
                }),
            }
        }

        tracing::debug!(letters = groups.len(), "Built symbol index");
        Self { groups }
    }

    /// Distinct letters in first-seen order.
    pub fn letters(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.letter.as_str())
    }

    /// Symbols filed under `letter`.
    #[must_use]
    pub fn group(&self, letter: &str) -> &[Symbol] {
        self.groups
            .iter()
            .find(|g| g.letter == letter)
            .map_or(&[], |g| g.symbols.as_slice())
    }

    /// Letter groups in index order.
    #[must_use]
    pub fn groups(&self) -> &[LetterGroup] {
        &self.groups
    }

    /// All indexed symbols in index order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.groups.iter().flat_map(|g| g.symbols.iter())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Upper-cased first character of a non-empty name.
fn leading_letter(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use docbind_symbols::SymbolNode;
    use pretty_assertions::assert_eq;

    use super::*;

    fn symbol(name: &str, kind: SymbolKind) -> Symbol {
        Symbol {
            name: name.to_owned(),
            link: format!("#m-test:{name}"),
            kind,
            sub: Vec::new(),
        }
    }

    fn names(symbols: &[Symbol]) -> Vec<&str> {
        symbols.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_groups_by_leading_letter() {
        let index = SymbolIndex::from_symbols([
            symbol("Banana", SymbolKind::Class),
            symbol("apple", SymbolKind::Struct),
            symbol("Cherry", SymbolKind::Interface),
            symbol("avocado", SymbolKind::Union),
        ]);

        assert_eq!(index.letters().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(names(index.group("A")), vec!["apple", "avocado"]);
        assert_eq!(names(index.group("B")), vec!["Banana"]);
        assert_eq!(names(index.group("C")), vec!["Cherry"]);
        assert!(index.group("D").is_empty());
    }

    #[test]
    fn test_equal_names_keep_input_order() {
        let mut first = symbol("Node", SymbolKind::Class);
        first.link = "#m-a:Node".to_owned();
        let mut second = symbol("Node", SymbolKind::Struct);
        second.link = "#m-b:Node".to_owned();

        let index = SymbolIndex::from_symbols([first, second]);

        let links: Vec<_> = index.group("N").iter().map(|s| s.link.as_str()).collect();
        assert_eq!(links, vec!["#m-a:Node", "#m-b:Node"]);
    }

    #[test]
    fn test_non_aggregates_and_empty_names_filtered() {
        let index = SymbolIndex::from_symbols([
            symbol("flush", SymbolKind::Function),
            symbol("Stdout", SymbolKind::Variable),
            symbol("", SymbolKind::Class),
            symbol("Console", SymbolKind::Class),
        ]);

        assert_eq!(names(&index.symbols().cloned().collect::<Vec<_>>()), vec!["Console"]);
        assert_eq!(index.groups().len(), 1);
    }

    #[test]
    fn test_empty_index() {
        let index = SymbolIndex::build(&SymbolCatalog::new());
        assert!(index.is_empty());
        assert_eq!(index.letters().count(), 0);
    }

    #[test]
    fn test_non_ascii_leading_letter() {
        let index = SymbolIndex::from_symbols([symbol("élan", SymbolKind::Class)]);
        assert_eq!(index.letters().collect::<Vec<_>>(), vec!["É"]);
    }

    #[test]
    fn test_catalog_merges_modules_in_order() {
        let first = ModuleSymbols::from_node(
            "a.one",
            &SymbolNode::new("one", SymbolKind::Module).with_sub(vec![
                SymbolNode::new("Zeta", SymbolKind::Class),
                SymbolNode::new("run", SymbolKind::Function),
            ]),
        );
        let second = ModuleSymbols::from_node(
            "a.two",
            &SymbolNode::new("two", SymbolKind::Module).with_sub(vec![
                SymbolNode::new("Alpha", SymbolKind::Class),
                SymbolNode::new("Point", SymbolKind::Struct),
            ]),
        );

        let mut catalog = SymbolCatalog::new();
        catalog.extend(&first);
        catalog.extend(&second);

        assert_eq!(names(catalog.of_kind(SymbolKind::Class)), vec!["Zeta", "Alpha"]);
        assert_eq!(catalog.len(), 4);
        let aggregates: Vec<_> = catalog.aggregates().map(|s| s.name.as_str()).collect();
        assert_eq!(aggregates, vec!["Zeta", "Alpha", "Point"]);

        let index = SymbolIndex::build(&catalog);
        let sorted: Vec<_> = index.symbols().map(|s| s.name.as_str()).collect();
        assert_eq!(sorted, vec!["Alpha", "Point", "Zeta"]);
        assert_eq!(index.group("A")[0].link, "#m-a.two:Alpha");
    }

    #[test]
    fn test_nested_aggregates_are_indexed() {
        let module = ModuleSymbols::from_node(
            "tango.io.Stdout",
            &SymbolNode::new("Stdout", SymbolKind::Module).with_sub(vec![
                SymbolNode::new("Console", SymbolKind::Class)
                    .with_sub(vec![SymbolNode::new("Output", SymbolKind::Class)]),
            ]),
        );
        let mut catalog = SymbolCatalog::new();
        catalog.extend(&module);

        let index = SymbolIndex::build(&catalog);

        assert_eq!(index.letters().collect::<Vec<_>>(), vec!["C", "O"]);
        assert_eq!(index.group("O")[0].link, "#m-tango.io.Stdout:Console.Output");
        assert_eq!(index.group("C")[0].sub.len(), 1);
    }
}
