//! Main decoder API
//!
//! The [`Decoder`] struct is the entry point for decoding CBF files from disk
//! or from any reader. Decoding itself is [`crate::cbf::decode`], a pure
//! function over an in-memory buffer.

use crate::types::{DecodeResult, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// The main decoder struct - entry point for all decoding operations
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder;

impl Decoder {
    /// Create a new decoder instance
    pub fn new() -> Self {
        Self
    }

    /// Decode a CBF buffer that is already in memory
    pub fn decode_bytes(&self, data: &[u8]) -> DecodeResult {
        crate::cbf::decode(data)
    }

    /// Read a reader to the end, then decode its contents
    pub fn decode_reader<R: Read>(&self, mut reader: R) -> Result<DecodeResult> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(self.decode_bytes(&data))
    }

    /// Read a CBF file fully into memory and decode it
    ///
    /// # Arguments
    /// * `path` - Path to the CBF file
    ///
    /// # Returns
    /// * `Result<DecodeResult>` - Err only if the file could not be read;
    ///   problems inside the file are reported in [`DecodeResult::errors`]
    ///
    /// # Example
    /// ```no_run
    /// use cbf_decoder::Decoder;
    /// use std::path::Path;
    ///
    /// let result = Decoder::new().decode_file(Path::new("0001.cbf")).unwrap();
    /// for error in &result.errors {
    ///     eprintln!("Error: {}", error);
    /// }
    /// ```
    pub fn decode_file(&self, path: &Path) -> Result<DecodeResult> {
        log::info!("Decoding CBF file: {:?}", path);

        let data = fs::read(path)?;
        let result = self.decode_bytes(&data);

        if result.is_clean() {
            log::info!(
                "Decoded {:?}: {} fields, {} records",
                path,
                result.fields.len(),
                result.records.len()
            );
        } else {
            log::warn!(
                "Decoded {:?} with {} error(s): {} fields, {} records",
                path,
                result.errors.len(),
                result.fields.len(),
                result.records.len()
            );
        }

        Ok(result)
    }
}
