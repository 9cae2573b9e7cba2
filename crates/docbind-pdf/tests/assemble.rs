//! End-to-end assembly over a fragment directory.

use std::fs;
use std::path::{Path, PathBuf};

use docbind_config::PdfConfig;
use docbind_pdf::{AssembleError, DocumentAssembler};
use docbind_symbols::JsonSymbolSource;
use pretty_assertions::assert_eq;

const STDOUT_HTML: &str = r##"<html><body><div id="content"><div class="module">
<h1 class="module" id="m-tango.io.Stdout">tango.io.Stdout <a class="plink" href="#tango.io.Stdout">¶</a></h1>
<p><a href="#L12">12</a> <a href="tango.io.Console.html#Console.Output">Output</a>
<a href="htmlsrc/tango.io.Stdout.html#L40" class="symbol" name="Console">Console</a>
<a href="http://example.com/docs">docs</a> <a name="Layout"></a></p>
</div></div><div id="kandil-footer">generated</div></body></html>"##;

const CONSOLE_HTML: &str = r##"<html><body><div class="module">
<h1 class="module" id="m-tango.io.Console">tango.io.Console</h1>
<a href="tango.io.Stdout.html">Stdout</a> <a href="license.txt">license</a>
</div><div id="kandil-footer"></div></body></html>"##;

const STDOUT_SYMBOLS: &str = r#"{"name": "Stdout", "kind": "module", "sub": [
    {"name": "Console", "kind": "class", "sub": [{"name": "flush", "kind": "function"}]},
    {"name": "Layout", "kind": "struct"}
]}"#;

fn setup(dir: &Path) -> Vec<PathBuf> {
    let symbols = dir.join("symbols");
    fs::create_dir(&symbols).unwrap();
    fs::write(symbols.join("tango.io.Stdout.json"), STDOUT_SYMBOLS).unwrap();

    let stdout = dir.join("tango.io.Stdout.html");
    fs::write(&stdout, STDOUT_HTML).unwrap();
    let console = dir.join("tango.io.Console.html");
    fs::write(&console, CONSOLE_HTML).unwrap();
    vec![stdout, console]
}

fn assemble(config: &PdfConfig, dir: &Path, fragments: &[PathBuf]) -> String {
    let symbols = JsonSymbolSource::new(dir.join("symbols"));
    let staging = dir.join("stage");
    fs::create_dir_all(&staging).unwrap();
    let output = DocumentAssembler::new(config, &symbols)
        .assemble(fragments, &staging)
        .unwrap();
    fs::read_to_string(output).unwrap()
}

#[test]
fn test_links_rewritten_in_merged_document() {
    let temp_dir = tempfile::tempdir().unwrap();
    let fragments = setup(temp_dir.path());
    let config = PdfConfig {
        symlink: "https://docs.example.org/api".to_owned(),
        ..PdfConfig::default()
    };

    let html = assemble(&config, temp_dir.path(), &fragments);

    assert!(html.contains(r##"<a class="plink" href="#tango.io.Stdout">¶</a>"##));
    assert!(html.contains("<a>12</a>"));
    assert!(html.contains(r##"<a href="#m-tango.io.Console:Console.Output">Output</a>"##));
    assert!(html.contains(concat!(
        r#"<a href="https://docs.example.org/api/tango.io.Stdout.html#Console" "#,
        r#"class="symbol" name="m-tango.io.Stdout:Console">Console</a>"#,
    )));
    assert!(html.contains(r#"<a href="http://example.com/docs">docs</a>"#));
    assert!(html.contains(r#"<a name="m-tango.io.Stdout:Layout"></a>"#));
    assert!(html.contains(r##"<a href="#m-tango.io.Stdout">Stdout</a>"##));
    assert!(html.contains(r#"<a href="https://docs.example.org/api/license.txt">license</a>"#));
    assert!(!html.contains("kandil-footer"));
}

#[test]
fn test_flat_document_visits_modules_in_tree_order() {
    let temp_dir = tempfile::tempdir().unwrap();
    let fragments = setup(temp_dir.path());

    let html = assemble(&PdfConfig::default(), temp_dir.path(), &fragments);

    let console = html.find(r#"<h1 class="module" id="m-tango.io.Console">"#).unwrap();
    let stdout = html.find(r#"<h1 class="module" id="m-tango.io.Stdout">"#).unwrap();
    assert!(console < stdout);
    assert!(html.contains(concat!(
        r#"<div class="modlist flat"><ul>"#,
        r##"<li><a href="#m-tango.io.Console">tango.io.Console</a></li>"##,
        r##"<li><a href="#m-tango.io.Stdout">tango.io.Stdout</a></li>"##,
        "</ul></div>",
    )));
}

#[test]
fn test_bookmarks_and_index_from_symbol_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let fragments = setup(temp_dir.path());
    let config = PdfConfig {
        nested_toc: true,
        ..PdfConfig::default()
    };

    let html = assemble(&config, temp_dir.path(), &fragments);

    assert!(html.contains(r#"<h1 id="p-tango.io" class="package">tango.io</h1>"#));
    assert!(html.contains(concat!(
        r##"<li link="#m-tango.io.Stdout:Console" label="Console"><ul>"##,
        "\n",
        r##"<li link="#m-tango.io.Stdout:Console.flush" label="flush"></li>"##,
    )));
    assert!(html.contains(r##"<li link="#index-syms-L" label="L:"></li>"##));

    let index_start = html.find(r#"<div id="indices">"#).unwrap();
    assert_eq!(
        &html[index_start..],
        concat!(
            "<div id=\"indices\">\n",
            "<h1 id=\"allsyms\" label=\"Index of Symbols\">Index of Symbols</h1>\n",
            "<dl>\n",
            "<dt id=\"index-syms-C\">C</dt>\n",
            "<dd><a href=\"#m-tango.io.Stdout:Console\">Console</a></dd>\n",
            "<dt id=\"index-syms-L\">L</dt>\n",
            "<dd><a href=\"#m-tango.io.Stdout:Layout\">Layout</a></dd>\n",
            "</dl>\n",
            "</div>\n",
            "</body></html>",
        )
    );
}

#[test]
fn test_malformed_symbol_file_aborts() {
    let temp_dir = tempfile::tempdir().unwrap();
    let fragments = setup(temp_dir.path());
    fs::write(temp_dir.path().join("symbols/tango.io.Console.json"), "[").unwrap();
    let symbols = JsonSymbolSource::new(temp_dir.path().join("symbols"));
    let config = PdfConfig::default();

    let err = DocumentAssembler::new(&config, &symbols)
        .assemble(&fragments, temp_dir.path())
        .unwrap_err();

    assert!(matches!(err, AssembleError::Symbols(_)));
}
