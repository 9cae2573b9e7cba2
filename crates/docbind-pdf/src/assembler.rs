//! Document assembly pipeline.
//!
//! [`DocumentAssembler`] reads the fragments, rewrites their links, builds
//! and sorts the package tree, and writes the merged document. [`generate_pdf`]
//! wraps it with asset staging, the stylesheet splice and rendering.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use docbind_config::{Config, PdfConfig};
use docbind_symbols::{ModuleSymbols, SymbolSource};

use crate::bookmarks::write_bookmarks;
use crate::document;
use crate::error::AssembleError;
use crate::fragment::{extract_module_body, module_fqn_from_path};
use crate::index::{SymbolCatalog, SymbolIndex};
use crate::links::LinkRewriter;
use crate::renderer::Renderer;
use crate::stylesheet::apply_page_breaks;
use crate::tree::{Module, PackageTree};

/// File stem of the assembled document inside the staging directory.
const DOCUMENT_STEM: &str = "html2pdf";

/// Sorted tree and symbol index of one run.
#[derive(Debug)]
pub struct Assembly {
    pub tree: PackageTree,
    pub index: SymbolIndex,
}

/// Merges module fragments into one document.
pub struct DocumentAssembler<'a> {
    config: &'a PdfConfig,
    symbols: &'a dyn SymbolSource,
    rewriter: LinkRewriter,
}

impl<'a> DocumentAssembler<'a> {
    /// Create an assembler using `config.symlink` as the link base URL.
    #[must_use]
    pub fn new(config: &'a PdfConfig, symbols: &'a dyn SymbolSource) -> Self {
        Self {
            config,
            symbols,
            rewriter: LinkRewriter::new(&config.symlink),
        }
    }

    /// Path of the assembled document inside `staging`.
    #[must_use]
    pub fn document_path(&self, staging: &Path) -> PathBuf {
        staging.join(format!("{DOCUMENT_STEM}.{}", self.config.x_html.extension()))
    }

    /// Read every fragment into a sorted tree and build the symbol index.
    ///
    /// Fragments are processed in the given order.
    pub fn collect(&self, fragments: &[PathBuf]) -> Result<Assembly, AssembleError> {
        tracing::info!(fragments = fragments.len(), "Preparing HTML fragments");

        let mut tree = PackageTree::new();
        let mut catalog = SymbolCatalog::new();
        for path in fragments {
            let module = self.load_module(path)?;
            catalog.extend(&module.symbols);
            tree.add_module(module);
        }

        tree.sort();
        tracing::debug!(
            modules = tree.len(),
            packages = tree.package_count(),
            "Sorted package tree"
        );

        let index = SymbolIndex::build(&catalog);
        Ok(Assembly { tree, index })
    }

    fn load_module(&self, path: &Path) -> Result<Module, AssembleError> {
        let fqn = module_fqn_from_path(path)
            .ok_or_else(|| AssembleError::InvalidFragmentName(path.to_path_buf()))?;
        tracing::debug!(module = fqn, "Processing fragment");

        let html = fs::read_to_string(path).map_err(|source| AssembleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rewritten = self.rewriter.rewrite(&html, fqn);
        let content = extract_module_body(&rewritten);

        let symbols = match self.symbols.module_symbols(fqn)? {
            Some(symbols) => symbols,
            None => {
                tracing::debug!(module = fqn, "Module has no symbol metadata");
                ModuleSymbols::empty(fqn)
            }
        };

        Ok(Module::new(fqn, content, symbols))
    }

    /// Assemble the fragments into the document inside `staging`.
    ///
    /// Returns the path of the written document.
    pub fn assemble(&self, fragments: &[PathBuf], staging: &Path) -> Result<PathBuf, AssembleError> {
        let before = read_includes(&self.config.before_files)?;
        let after = read_includes(&self.config.after_files)?;
        let assembly = self.collect(fragments)?;

        let output = self.document_path(staging);
        tracing::info!(path = %output.display(), "Joining HTML fragments");

        let io_err = |source| AssembleError::Io {
            path: output.clone(),
            source,
        };
        let file = File::create(&output).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        self.write_document(&mut out, &assembly, &before, &after)
            .map_err(io_err)?;
        out.flush().map_err(io_err)?;

        Ok(output)
    }

    /// Write the complete document for an assembly.
    pub fn write_document<W: Write>(
        &self,
        out: &mut W,
        assembly: &Assembly,
        before: &[String],
        after: &[String],
    ) -> std::io::Result<()> {
        let creation_date = self.config.resolved_creation_date();
        document::write_head(out, self.config, &creation_date)?;
        document::write_toc(out, self.config, &assembly.tree)?;
        document::write_included(out, "before_pages", before)?;
        document::write_module_pages(out, &assembly.tree, self.config.nested_toc)?;
        document::write_included(out, "after_pages", after)?;
        write_bookmarks(out, &assembly.tree, &assembly.index)?;
        document::write_index(out, &assembly.index)?;
        document::write_end(out)
    }
}

/// Read included files, failing on the first missing one.
fn read_includes(paths: &[PathBuf]) -> Result<Vec<String>, AssembleError> {
    paths
        .iter()
        .map(|path| {
            fs::read_to_string(path).map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    AssembleError::MissingInclude(path.clone())
                } else {
                    AssembleError::Io {
                        path: path.clone(),
                        source,
                    }
                }
            })
        })
        .collect()
}

/// Produce a PDF from module fragments.
///
/// Stages the stylesheet and icons into `staging`, splices page-break rules
/// into the stylesheet, assembles the document next to them and renders it
/// to `dest`. Returns the path of the assembled document.
pub fn generate_pdf(
    config: &Config,
    fragments: &[PathBuf],
    symbols: &dyn SymbolSource,
    renderer: &dyn Renderer,
    staging: &Path,
    dest: &Path,
) -> Result<PathBuf, AssembleError> {
    let pdf = &config.pdf;
    let css_path = docbind_assets::install(staging, &pdf.css_file, pdf.stylesheet.as_deref())?;
    apply_page_breaks(&css_path, &pdf.newpage_modules)?;

    let assembler = DocumentAssembler::new(pdf, symbols);
    let document = assembler.assemble(fragments, staging)?;

    tracing::info!(dest = %dest.display(), "Writing PDF document");
    renderer.render(&document, dest)?;
    Ok(document)
}
