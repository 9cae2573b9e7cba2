//! Printable documentation assembly for docbind.
//!
//! Merges independently generated per-module HTML fragments into a single
//! HTML/XHTML document and hands it to an external renderer to produce a PDF.
//!
//! # Pipeline
//!
//! 1. Every fragment's anchors are rewritten by [`LinkRewriter`] so that
//!    cross-references target namespaced anchors (`m-<module>:<name>`) that
//!    stay unique once all modules share one file.
//! 2. Modules are inserted into a [`PackageTree`], which is sorted once.
//! 3. Aggregate symbols are merged into a [`SymbolIndex`].
//! 4. The document is written section by section: head, table of contents,
//!    module pages, bookmark outline (see [`write_bookmarks`]) and index.
//! 5. A [`Renderer`] converts the document to PDF.
//!
//! # Example
//!
//! ```ignore
//! use docbind_config::Config;
//! use docbind_pdf::{generate_pdf, ExternalRenderer};
//! use docbind_symbols::JsonSymbolSource;
//!
//! let config = Config::default();
//! let symbols = JsonSymbolSource::new("html/symbols");
//! let renderer = ExternalRenderer::from_config(&config.renderer);
//! generate_pdf(&config, &fragments, &symbols, &renderer, staging, "api.pdf".as_ref())?;
//! ```

mod assembler;
mod bookmarks;
mod document;
mod error;
mod fragment;
mod html;
mod index;
mod links;
mod renderer;
mod stylesheet;
mod tree;

pub use assembler::{Assembly, DocumentAssembler, generate_pdf};
pub use bookmarks::write_bookmarks;
pub use error::AssembleError;
pub use fragment::{extract_module_body, module_fqn_from_path};
pub use html::escape_html;
pub use index::{LetterGroup, SymbolCatalog, SymbolIndex};
pub use links::{Attribute, LinkAttributes, LinkKind, LinkRewriter, classify};
pub use renderer::{ExternalRenderer, RenderError, Renderer};
pub use stylesheet::{PAGE_BREAKS_PLACEHOLDER, apply_page_breaks, page_break_rules, splice_page_breaks};
pub use tree::{Module, Package, PackageTree};
