//! Writing decoded files as CSV or JSON

use crate::config::OutputFormat;
use anyhow::{Context, Result};
use cbf_decoder::{DecodeResult, TableRenderer};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes decode results in the selected format
pub struct OutputWriter {
    format: OutputFormat,
    renderer: TableRenderer,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, renderer: TableRenderer) -> Self {
        Self { format, renderer }
    }

    pub fn write<W: Write>(&self, result: &DecodeResult, writer: &mut W) -> Result<()> {
        match self.format {
            OutputFormat::Csv => self.renderer.write_report(result, writer)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, result)?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }

    /// Path of the output file for `input` inside `output_dir`
    pub fn output_path(&self, input: &Path, output_dir: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or(input.as_os_str());
        output_dir.join(format!(
            "{}.{}",
            stem.to_string_lossy(),
            self.format.extension()
        ))
    }

    /// Write `result` to its own file in `output_dir`, returning the path
    pub fn write_to_dir(
        &self,
        input: &Path,
        result: &DecodeResult,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

        let path = self.output_path(input, output_dir);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {:?}", path))?;
        let mut writer = BufWriter::new(file);
        self.write(result, &mut writer)?;
        writer.flush()?;

        Ok(path)
    }
}
