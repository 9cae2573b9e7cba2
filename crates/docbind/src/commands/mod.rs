//! CLI command implementations.

pub(crate) mod pdf;

pub(crate) use pdf::PdfArgs;
