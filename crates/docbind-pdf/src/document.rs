//! Writers for the sections of the assembled document.
//!
//! Sections are written in document order by the assembler: head, table of
//! contents, included "before" pages, module pages, included "after" pages,
//! bookmarks (see [`crate::bookmarks`]), index and the closing tags.

use std::io::{self, Write};

use docbind_config::{Flavor, PdfConfig};

use crate::html::escape_html;
use crate::index::SymbolIndex;
use crate::tree::{Package, PackageTree};

const XHTML_DOCTYPE: &str = concat!(
    r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN""#,
    r#" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#,
);

const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Write everything up to and including the opening of `<div id="toc">`.
///
/// `cover_title` is raw markup; the other metadata values are escaped.
pub fn write_head<W: Write>(out: &mut W, pdf: &PdfConfig, creation_date: &str) -> io::Result<()> {
    match pdf.x_html {
        Flavor::Html => writeln!(out, "<html>")?,
        Flavor::Xhtml => {
            writeln!(out, "{XHTML_DOCTYPE}")?;
            writeln!(out, r#"<html xmlns="{XHTML_NAMESPACE}">"#)?;
        }
    }
    writeln!(out, "<head>")?;
    writeln!(
        out,
        r#"  <meta http-equiv="Content-Type" content="text/html; charset=utf-8"/>"#
    )?;
    for (name, content) in [
        ("author", pdf.author.as_str()),
        ("subject", pdf.subject.as_str()),
        ("keywords", pdf.keywords.as_str()),
        ("date", creation_date),
        ("generator", pdf.generator.as_str()),
    ] {
        writeln!(
            out,
            r#"  <meta name="{name}" content="{}"/>"#,
            escape_html(content)
        )?;
    }
    writeln!(
        out,
        r#"  <link href="{}" type="text/css" rel="stylesheet" media="all"/>"#,
        escape_html(&pdf.css_file)
    )?;
    writeln!(out, "  <title>{}</title>", escape_html(&pdf.pdf_title))?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, r#"<p class="covertitle">{}</p>"#, pdf.cover_title)?;
    writeln!(
        out,
        r#"<p id="generated_by">generated by {}</p>"#,
        escape_html(&pdf.generator)
    )?;
    writeln!(out, r#"<div id="toc">"#)?;
    writeln!(out, r#"  <p class="toc_header">Table of Contents</p>"#)
}

/// Write the table of contents and close `<div id="toc">`.
///
/// `first_toc` and `last_toc` are raw markup inserted around the module list.
pub fn write_toc<W: Write>(out: &mut W, pdf: &PdfConfig, tree: &PackageTree) -> io::Result<()> {
    out.write_all(pdf.first_toc.as_bytes())?;

    writeln!(out, "<h1>Modules</h1>")?;
    if pdf.nested_toc {
        write!(out, r#"<div class="modlist nested">"#)?;
        write_toc_package(out, tree, tree.root())?;
        write!(out, "</div>")?;
    } else {
        write!(out, r#"<div class="modlist flat"><ul>"#)?;
        for module in tree.modules() {
            let fqn = escape_html(&module.fqn);
            write!(out, "<li><a href=\"#m-{fqn}\">{fqn}</a></li>")?;
        }
        write!(out, "</ul></div>")?;
    }

    out.write_all(pdf.last_toc.as_bytes())?;

    writeln!(out, "<h1>Indices</h1>")?;
    writeln!(out, "<ul>")?;
    write!(
        out,
        "<li><a href=\"#allsyms\">Index of classes, interfaces, structs, unions</a></li>"
    )?;
    writeln!(out, "</ul>")?;
    writeln!(out, "</div>")
}

fn write_toc_package<W: Write>(out: &mut W, tree: &PackageTree, package: &Package) -> io::Result<()> {
    write!(out, "\n<ul>")?;
    for sub in tree.packages_of(package) {
        write!(
            out,
            concat!(
                r#"<li kind="p">"#,
                r#"<img src="img/icon_package.svg" class="icon" width="16" height="16"/>"#,
                r##" <a href="#p-{}">{}</a>"##,
            ),
            escape_html(&sub.fqn),
            escape_html(&sub.name)
        )?;
        if sub.has_children() {
            write_toc_package(out, tree, sub)?;
        }
        writeln!(out, "</li>")?;
    }
    for module in tree.modules_of(package) {
        writeln!(
            out,
            concat!(
                r#"<li kind="m">"#,
                r#"<img src="img/icon_module.svg" class="icon" width="14" height="14"/>"#,
                r##" <a href="#m-{}">{}</a></li>"##,
            ),
            escape_html(&module.fqn),
            escape_html(&module.name)
        )?;
    }
    writeln!(out, "</ul>")
}

/// Write included pages inside `<div class="{class}">`.
///
/// Nothing is written when `pages` is empty.
pub fn write_included<W: Write>(out: &mut W, class: &str, pages: &[String]) -> io::Result<()> {
    if pages.is_empty() {
        return Ok(());
    }
    write!(out, r#"<div class="{class}">"#)?;
    for page in pages {
        out.write_all(page.as_bytes())?;
    }
    write!(out, "</div>")
}

/// Write the module pages section.
///
/// In nested mode every package gets a heading and a summary of its
/// children, followed by its sub-packages and then its own modules. In flat
/// mode modules are written in the tree's flat order.
pub fn write_module_pages<W: Write>(out: &mut W, tree: &PackageTree, nested: bool) -> io::Result<()> {
    writeln!(out, r#"<div id="module-pages">"#)?;
    if nested {
        write_package_pages(out, tree, tree.root())?;
    } else {
        for module in tree.modules() {
            out.write_all(module.content.as_bytes())?;
        }
    }
    writeln!(out, "</div>")
}

fn write_package_pages<W: Write>(
    out: &mut W,
    tree: &PackageTree,
    package: &Package,
) -> io::Result<()> {
    for sub in tree.packages_of(package) {
        let fqn = escape_html(&sub.fqn);
        writeln!(out, r#"<h1 id="p-{fqn}" class="package">{fqn}</h1>"#)?;
        write!(out, "<div>")?;
        if sub.has_packages() {
            let links: Vec<String> = tree
                .packages_of(sub)
                .map(|p| {
                    format!(
                        r##"<a href="#p-{}">{}</a>"##,
                        escape_html(&p.fqn),
                        escape_html(&p.name)
                    )
                })
                .collect();
            writeln!(out, "<p><b>Packages:</b> {}</p>", links.join(", "))?;
        }
        if sub.has_modules() {
            let links: Vec<String> = tree
                .modules_of(sub)
                .map(|m| {
                    format!(
                        r##"<a href="#m-{}">{}</a>"##,
                        escape_html(&m.fqn),
                        escape_html(&m.name)
                    )
                })
                .collect();
            writeln!(out, "<p><b>Modules:</b> {}</p>", links.join(", "))?;
        }
        write!(out, "</div>")?;
        write_package_pages(out, tree, sub)?;
    }
    for module in tree.modules_of(package) {
        out.write_all(module.content.as_bytes())?;
    }
    Ok(())
}

/// Write the alphabetical index section.
pub fn write_index<W: Write>(out: &mut W, index: &SymbolIndex) -> io::Result<()> {
    writeln!(out, r#"<div id="indices">"#)?;
    writeln!(
        out,
        r#"<h1 id="allsyms" label="Index of Symbols">Index of Symbols</h1>"#
    )?;
    writeln!(out, "<dl>")?;
    for group in index.groups() {
        let letter = escape_html(&group.letter);
        writeln!(out, r#"<dt id="index-syms-{letter}">{letter}</dt>"#)?;
        for symbol in &group.symbols {
            writeln!(
                out,
                r#"<dd><a href="{}">{}</a></dd>"#,
                escape_html(&symbol.link),
                escape_html(&symbol.name)
            )?;
        }
    }
    writeln!(out, "</dl>")?;
    writeln!(out, "</div>")
}

/// Close the body and the document.
pub fn write_end<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "</body></html>")
}

#[cfg(test)]
mod tests {
    use docbind_symbols::{ModuleSymbols, Symbol, SymbolKind};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tree::Module;

    fn capture(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample_tree() -> PackageTree {
        let mut tree = PackageTree::new();
        for fqn in ["tango.io.Stdout", "tango.io.Console", "tango.Text", "object"] {
            tree.add_module(Module::new(
                fqn,
                format!("[{fqn}]"),
                ModuleSymbols::empty(fqn),
            ));
        }
        tree.sort();
        tree
    }

    #[test]
    fn test_head_html() {
        let pdf = PdfConfig {
            pdf_title: "Tango & Friends".to_owned(),
            author: "Jane".to_owned(),
            ..PdfConfig::default()
        };

        let head = capture(|out| write_head(out, &pdf, "2024-01-02T03:04:05+00:00"));

        assert!(head.starts_with("<html>\n<head>\n"));
        assert!(head.contains(r#"<meta name="author" content="Jane"/>"#));
        assert!(head.contains(r#"<meta name="date" content="2024-01-02T03:04:05+00:00"/>"#));
        assert!(head.contains(r#"<meta name="generator" content="dil D compiler"/>"#));
        assert!(head.contains(r#"<link href="pdf.css" type="text/css" rel="stylesheet" media="all"/>"#));
        assert!(head.contains("<title>Tango &amp; Friends</title>"));
        assert!(head.contains(r#"<p class="covertitle">Cover Title</p>"#));
        assert!(head.ends_with("<div id=\"toc\">\n  <p class=\"toc_header\">Table of Contents</p>\n"));
    }

    #[test]
    fn test_head_cover_title_is_markup() {
        let pdf = PdfConfig {
            cover_title: "Tango 1.0<br/><b>API</b>".to_owned(),
            ..PdfConfig::default()
        };

        let head = capture(|out| write_head(out, &pdf, "now"));

        assert!(head.contains(r#"<p class="covertitle">Tango 1.0<br/><b>API</b></p>"#));
    }

    #[test]
    fn test_head_xhtml() {
        let pdf = PdfConfig {
            x_html: Flavor::Xhtml,
            ..PdfConfig::default()
        };

        let head = capture(|out| write_head(out, &pdf, "now"));

        assert!(head.starts_with("<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\""));
        assert!(head.contains("<html xmlns=\"http://www.w3.org/1999/xhtml\">\n<head>"));
    }

    #[test]
    fn test_flat_toc() {
        let pdf = PdfConfig {
            first_toc: "<p>first</p>".to_owned(),
            last_toc: "<p>last</p>".to_owned(),
            ..PdfConfig::default()
        };

        let toc = capture(|out| write_toc(out, &pdf, &sample_tree()));

        assert_eq!(
            toc,
            concat!(
                "<p>first</p><h1>Modules</h1>\n",
                "<div class=\"modlist flat\"><ul>",
                "<li><a href=\"#m-object\">object</a></li>",
                "<li><a href=\"#m-tango.io.Console\">tango.io.Console</a></li>",
                "<li><a href=\"#m-tango.io.Stdout\">tango.io.Stdout</a></li>",
                "<li><a href=\"#m-tango.Text\">tango.Text</a></li>",
                "</ul></div><p>last</p><h1>Indices</h1>\n<ul>\n",
                "<li><a href=\"#allsyms\">Index of classes, interfaces, structs, unions</a></li></ul>\n",
                "</div>\n",
            )
        );
    }

    #[test]
    fn test_nested_toc() {
        let pdf = PdfConfig {
            nested_toc: true,
            ..PdfConfig::default()
        };

        let toc = capture(|out| write_toc(out, &pdf, &sample_tree()));

        assert!(toc.contains(concat!(
            "<div class=\"modlist nested\">\n<ul>",
            "<li kind=\"p\"><img src=\"img/icon_package.svg\" class=\"icon\" width=\"16\" height=\"16\"/>",
            " <a href=\"#p-tango\">tango</a>\n<ul>",
            "<li kind=\"p\"><img src=\"img/icon_package.svg\" class=\"icon\" width=\"16\" height=\"16\"/>",
            " <a href=\"#p-tango.io\">io</a>\n<ul>",
            "<li kind=\"m\"><img src=\"img/icon_module.svg\" class=\"icon\" width=\"14\" height=\"14\"/>",
            " <a href=\"#m-tango.io.Console\">Console</a></li>\n",
        )));
        assert!(toc.contains(" <a href=\"#m-tango.Text\">Text</a></li>\n</ul>\n</li>\n"));
        assert!(toc.contains(" <a href=\"#m-object\">object</a></li>\n</ul>\n</div>"));
    }

    #[test]
    fn test_flat_module_pages_follow_flat_order() {
        let tree = sample_tree();

        let pages = capture(|out| write_module_pages(out, &tree, false));

        let expected: String = tree.modules().map(|m| m.content.as_str()).collect();
        assert_eq!(
            pages,
            format!("<div id=\"module-pages\">\n{expected}</div>\n")
        );
    }

    #[test]
    fn test_nested_module_pages() {
        let pages = capture(|out| write_module_pages(out, &sample_tree(), true));

        assert_eq!(
            pages,
            concat!(
                "<div id=\"module-pages\">\n",
                "<h1 id=\"p-tango\" class=\"package\">tango</h1>\n",
                "<div><p><b>Packages:</b> <a href=\"#p-tango.io\">io</a></p>\n",
                "<p><b>Modules:</b> <a href=\"#m-tango.Text\">Text</a></p>\n",
                "</div>",
                "<h1 id=\"p-tango.io\" class=\"package\">tango.io</h1>\n",
                "<div><p><b>Modules:</b> <a href=\"#m-tango.io.Console\">Console</a>, ",
                "<a href=\"#m-tango.io.Stdout\">Stdout</a></p>\n",
                "</div>",
                "[tango.io.Console][tango.io.Stdout]",
                "[tango.Text]",
                "[object]",
                "</div>\n",
            )
        );
    }

    #[test]
    fn test_included_pages() {
        let html = capture(|out| {
            write_included(out, "before_pages", &["<p>a</p>".to_owned(), "<p>b</p>".to_owned()])
        });
        assert_eq!(html, "<div class=\"before_pages\"><p>a</p><p>b</p></div>");

        let empty = capture(|out| write_included(out, "after_pages", &[]));
        assert_eq!(empty, "");
    }

    #[test]
    fn test_index_section() {
        let symbol = |name: &str| Symbol {
            name: name.to_owned(),
            link: format!("#m-x:{name}"),
            kind: SymbolKind::Class,
            sub: Vec::new(),
        };
        let index = SymbolIndex::from_symbols([symbol("Banana"), symbol("apple")]);

        let html = capture(|out| write_index(out, &index));

        assert_eq!(
            html,
            concat!(
                "<div id=\"indices\">\n",
                "<h1 id=\"allsyms\" label=\"Index of Symbols\">Index of Symbols</h1>\n",
                "<dl>\n",
                "<dt id=\"index-syms-A\">A</dt>\n",
                "<dd><a href=\"#m-x:apple\">apple</a></dd>\n",
                "<dt id=\"index-syms-B\">B</dt>\n",
                "<dd><a href=\"#m-x:Banana\">Banana</a></dd>\n",
                "</dl>\n",
                "</div>\n",
            )
        );
    }

    #[test]
    fn test_end() {
        assert_eq!(capture(|out| write_end(out)), "</body></html>");
    }
}
