//! docgen: docstring placement for indentation-delimited source files.
//!
//! This crate recovers the nesting of classes, functions, and methods from
//! indentation alone, decides where a documentation block belongs under each
//! definition, and splices blocks in without disturbing anything else in the
//! file. Producing the documentation text is someone else's job.
//!
//! # Modules
//!
//! - [`syntax`]: Header/decorator matching and line-level lexing state
//! - [`boundary`]: Locate the line that ends a (possibly wrapped) header
//! - [`docblock`]: Detect, remove, format, and insert documentation blocks
//! - [`scanner`]: Single-pass structural scan into a [`SymbolTable`]
//! - [`source`]: A scanned file and its to-document / to-regenerate sets
//! - [`editor`]: Apply batches of documentation entries across files
//! - [`config`]: `[tool.docgen]` / `.docgen.toml` loading
//! - [`types`]: Positions, entries, and the ordered symbol table
//! - [`error`]: [`DocgenError`] and the crate `Result`

pub mod boundary;
pub mod config;
pub mod docblock;
pub mod editor;
pub mod error;
pub mod scanner;
pub mod source;
pub mod syntax;
pub mod types;

pub use boundary::{resolve_boundary, resolve_header, Boundary};
pub use config::{load_docgen_config, DocgenConfig};
pub use docblock::DocStyle;
pub use editor::{DocEditor, EditMode, EditReport, FileStatus};
pub use error::{DocgenError, Result};
pub use source::{SourceFile, SourceText};
pub use types::{DocMap, DocScope, DocumentationEntry, PosWithBody, Position, SymbolTable};
