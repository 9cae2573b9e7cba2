//! Per-module symbol metadata for docbind.
//!
//! The documentation generator emits, next to every HTML fragment, a symbol
//! tree describing the declarations of that module. This crate provides:
//!
//! - [`Symbol`] and [`SymbolKind`] value types
//! - [`ModuleSymbols`], the per-module tree plus name and kind lookups
//! - [`SymbolSource`] trait for querying metadata by module fqn
//! - [`JsonSymbolSource`] reading `<dir>/<module-fqn>.json` files
//! - [`MockSymbolSource`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use docbind_symbols::{JsonSymbolSource, SymbolKind, SymbolSource};
//!
//! let source = JsonSymbolSource::new("docs/symbols");
//! if let Some(symbols) = source.module_symbols("tango.io.Stdout")? {
//!     for class in symbols.of_kind(SymbolKind::Class) {
//!         println!("{} -> {}", class.name, class.link);
//!     }
//! }
//! ```

mod json;
#[cfg(feature = "mock")]
mod mock;
mod source;
mod symbol;

pub use json::JsonSymbolSource;
#[cfg(feature = "mock")]
pub use mock::MockSymbolSource;
pub use source::{ModuleSymbols, SymbolError, SymbolSource};
pub use symbol::{Symbol, SymbolKind, SymbolNode};
