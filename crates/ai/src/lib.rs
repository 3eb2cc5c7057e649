//! # docgen-ai
//!
//! Documentation text for docgen symbol tables, produced by a Gemini model.
//!
//! The request sends the outermost symbols' source under a fixed instruction;
//! the answer comes back as `Name: text` lines (plus `Name/param arg` and
//! `Name/return` lines) and is matched to symbol paths by suffix.
//!
//! ```no_run
//! use docgen_ai::{DocRequester, GeminiClient};
//! use docgen_core::{DocStyle, DocgenConfig, SourceFile};
//!
//! let config = DocgenConfig::default();
//! let file = SourceFile::open("src/app.py".as_ref(), &DocStyle::default())?;
//! let client = GeminiClient::new(&config, std::env::var("GEMINI_API_KEY")?)?;
//! let docs = DocRequester::new(client, config.max_attempts).request_docs(&file.to_document())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod error;
pub mod prompt;
pub mod response;

pub use client::{Completion, DocRequester, GeminiClient};
pub use error::{RequestError, Result};
pub use prompt::{outer_bodies, request_body, SYS_INSTRUCTION};
pub use response::{is_complete, parse_response};
