//! CBF Log Decoder Library
//!
//! A stateless, reusable library for decoding the binary `.cbf` data logs
//! written by Foxwell automotive diagnostic scan tools in "Save Data" mode.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on decoding:
//! - Parses a complete in-memory CBF buffer into headings, field
//!   definitions and string-valued records
//! - Reconciles the trailer's record count against what was actually read
//! - Collects recoverable anomalies as [`ParseError`] values instead of failing
//! - Renders a decoded file as delimited text (Excel-style quoting)
//!
//! The library does NOT:
//! - Interpret record values numerically
//! - Stream files that do not fit in memory
//! - Handle command-line arguments (see cbf-cli)
//!
//! # Example Usage
//!
//! ```no_run
//! use cbf_decoder::{Decoder, RenderConfig, TableRenderer};
//! use std::path::Path;
//!
//! let result = Decoder::new().decode_file(Path::new("savefile/0001.cbf")).unwrap();
//!
//! for error in &result.errors {
//!     eprintln!("Decode error: {}", error);
//! }
//!
//! let renderer = TableRenderer::new(RenderConfig::new().with_delimiter(';')).unwrap();
//! print!("{}", renderer.render(&result));
//! ```

// Public modules
pub mod cbf;
pub mod config;
pub mod decoder;
pub mod render;
pub mod types;

// Re-export main types for convenience
pub use cbf::decode;
pub use config::RenderConfig;
pub use decoder::Decoder;
pub use render::{escape_value, TableRenderer};
pub use types::{
    DecodeResult, DecoderError, FieldDefinition, Headings, ParseError, Record, Result, Stage,
    Trailer,
};

// Internal modules (not exposed in public API)
mod cursor;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
