//! Multi-file decoding
//!
//! Each file is read and decoded independently, so files are spread across
//! the rayon thread pool. Results come back in input order.

use anyhow::{Context, Result};
use cbf_decoder::{DecodeResult, Decoder};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// One input file and what decoding it produced
pub struct DecodedFile {
    pub path: PathBuf,
    pub result: Result<DecodeResult>,
}

/// Decode every file in parallel, keeping the order of `paths`
pub fn decode_all(paths: &[PathBuf]) -> Vec<DecodedFile> {
    let decoder = Decoder::new();
    paths
        .par_iter()
        .map(|path| DecodedFile {
            path: path.clone(),
            result: decode_one(&decoder, path),
        })
        .collect()
}

fn decode_one(decoder: &Decoder, path: &Path) -> Result<DecodeResult> {
    decoder
        .decode_file(path)
        .with_context(|| format!("Failed to read CBF file: {:?}", path))
}
