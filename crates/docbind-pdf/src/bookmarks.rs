//! Bookmark outline for the PDF renderer.
//!
//! The outline is a nested `<ul id="bookmarks">` whose `<li>` elements carry
//! only a `link` and a `label` attribute and never any text. The stylesheet
//! maps those attributes to renderer bookmarks, which also works for elements
//! the renderer would otherwise skip as hidden.

use std::io::{self, Write};

use docbind_symbols::Symbol;

use crate::html::escape_html;
use crate::index::SymbolIndex;
use crate::tree::{Module, Package, PackageTree};

/// Anchor of the module pages section.
const MODULE_PAGES: &str = "#module-pages";

/// Anchor of the index section.
const ALL_SYMBOLS: &str = "#allsyms";

/// Write the complete outline: "Module Tree", "Module List", "Symbols".
pub fn write_bookmarks<W: Write>(
    out: &mut W,
    tree: &PackageTree,
    index: &SymbolIndex,
) -> io::Result<()> {
    writeln!(out, r#"<ul id="bookmarks">"#)?;

    open_entry(out, MODULE_PAGES, "Module Tree")?;
    if tree.root().has_children() {
        write_package_children(out, tree, tree.root())?;
    }
    close_entry(out)?;

    open_entry(out, MODULE_PAGES, "Module List")?;
    if !tree.is_empty() {
        writeln!(out, "<ul>")?;
        for module in tree.modules() {
            write_module(out, module)?;
        }
        writeln!(out, "</ul>")?;
    }
    close_entry(out)?;

    open_entry(out, ALL_SYMBOLS, "Symbols")?;
    if !index.is_empty() {
        writeln!(out, "<ul>")?;
        for group in index.groups() {
            open_entry(
                out,
                &format!("#index-syms-{}", group.letter),
                &format!("{}:", group.letter),
            )?;
            close_entry(out)?;
            for symbol in &group.symbols {
                write_symbol(out, symbol)?;
            }
        }
        writeln!(out, "</ul>")?;
    }
    close_entry(out)?;

    writeln!(out, "</ul>")
}

/// Entries for the sub-packages and modules of `package`.
fn write_package_children<W: Write>(
    out: &mut W,
    tree: &PackageTree,
    package: &Package,
) -> io::Result<()> {
    writeln!(out, "<ul>")?;
    for sub in tree.packages_of(package) {
        open_entry(out, &format!("#p-{}", sub.fqn), &sub.name)?;
        if sub.has_children() {
            write_package_children(out, tree, sub)?;
        }
        close_entry(out)?;
    }
    for module in tree.modules_of(package) {
        write_module(out, module)?;
    }
    writeln!(out, "</ul>")
}

fn write_module<W: Write>(out: &mut W, module: &Module) -> io::Result<()> {
    open_entry(out, &format!("#m-{}", module.fqn), &module.name)?;
    write_symbol_children(out, module.symbols.root())?;
    close_entry(out)
}

fn write_symbol<W: Write>(out: &mut W, symbol: &Symbol) -> io::Result<()> {
    open_entry(out, &symbol.link, &symbol.name)?;
    write_symbol_children(out, symbol)?;
    close_entry(out)
}

fn write_symbol_children<W: Write>(out: &mut W, symbol: &Symbol) -> io::Result<()> {
    if !symbol.has_children() {
        return Ok(());
    }
    writeln!(out, "<ul>")?;
    for sub in &symbol.sub {
        write_symbol(out, sub)?;
    }
    writeln!(out, "</ul>")
}

fn open_entry<W: Write>(out: &mut W, link: &str, label: &str) -> io::Result<()> {
    write!(
        out,
        r#"<li link="{}" label="{}">"#,
        escape_html(link),
        escape_html(label)
    )
}

fn close_entry<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "</li>")
}
