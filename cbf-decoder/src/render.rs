//! Delimited-text rendering of decoded CBF files
//!
//! Output layout: the heading lines, then one `Error: <message>` line per
//! parse error, then the table (field names first, one row per record).
//!
//! Every value is trimmed of surrounding spaces and quoted Excel-style:
//! a value containing `"` is wrapped in quotes with the inner quotes doubled,
//! otherwise a value containing the delimiter is wrapped in quotes.

use crate::config::RenderConfig;
use crate::types::{DecodeResult, DecoderError, Result};
use std::borrow::Cow;
use std::io::Write;

/// Quote a single value for delimited output
///
/// # Example
/// ```
/// use cbf_decoder::escape_value;
///
/// assert_eq!(escape_value(r#"He said "hi", ok"#, ','), r#""He said ""hi"", ok""#);
/// assert_eq!(escape_value("1,5", ','), "\"1,5\"");
/// assert_eq!(escape_value("1,5", ';'), "1,5");
/// ```
pub fn escape_value(value: &str, delimiter: char) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else if value.contains(delimiter) {
        Cow::Owned(format!("\"{}\"", value))
    } else {
        Cow::Borrowed(value)
    }
}

/// Renders [`DecodeResult`]s as delimited text
#[derive(Debug, Clone)]
pub struct TableRenderer {
    config: RenderConfig,
}

impl TableRenderer {
    /// Create a renderer, rejecting delimiters that would break the quoting
    pub fn new(config: RenderConfig) -> Result<Self> {
        if matches!(config.delimiter, '"' | '\n' | '\r') {
            return Err(DecoderError::InvalidConfig(format!(
                "delimiter {:?} cannot be used",
                config.delimiter
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Join one row of values, trimming and quoting each
    pub fn format_row<'v, I>(&self, values: I) -> String
    where
        I: IntoIterator<Item = &'v str>,
    {
        let mut line = String::new();
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                line.push(self.config.delimiter);
            }
            line.push_str(&escape_value(value.trim_matches(' '), self.config.delimiter));
        }
        line
    }

    /// Write the table: a name row then one row per record
    pub fn write_table<W: Write>(&self, result: &DecodeResult, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", self.format_row(result.field_names()))?;
        for record in &result.records {
            writeln!(writer, "{}", self.format_row(record.iter().map(String::as_str)))?;
        }
        Ok(())
    }

    /// Write headings, errors and table as configured
    pub fn write_report<W: Write>(&self, result: &DecodeResult, writer: &mut W) -> Result<()> {
        if self.config.include_headings {
            for heading in result.headings.iter() {
                writeln!(writer, "{}", heading)?;
            }
        }
        if self.config.include_errors {
            for error in &result.errors {
                writeln!(writer, "Error: {}", error)?;
            }
        }
        self.write_table(result, writer)
    }

    /// Render the report into a string
    pub fn render(&self, result: &DecodeResult) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail
        let _ = self.write_report(result, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self {
            config: RenderConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldDefinition, Headings, ParseError, Stage};

    fn sample_result() -> DecodeResult {
        let mut headings = Headings::default();
        headings.push("OBDII".to_string());
        headings.push("Live Data".to_string());
        headings.push("Engine".to_string());

        DecodeResult {
            headings,
            field_count: Some(2),
            fields: vec![FieldDefinition::new("RPM rpm"), FieldDefinition::new("Note")],
            records: vec![
                vec![" 800 ".to_string(), "idle, warm".to_string()],
                vec!["1200".to_string(), "say \"go\"".to_string()],
            ],
            trailer: None,
            errors: vec![],
        }
    }

    #[test]
    fn test_escape_quotes_win_over_delimiter() {
        assert_eq!(
            escape_value("He said \"hi\", ok", ','),
            "\"He said \"\"hi\"\", ok\""
        );
    }

    #[test]
    fn test_escape_plain_value_is_borrowed() {
        assert!(matches!(escape_value("12.5", ','), Cow::Borrowed("12.5")));
    }

    #[test]
    fn test_format_row_trims_spaces_only() {
        let renderer = TableRenderer::default();
        assert_eq!(renderer.format_row([" 1 ", "\t2", "3"]), "1,\t2,3");
    }

    #[test]
    fn test_render_report() {
        let renderer = TableRenderer::default();
        let text = renderer.render(&sample_result());
        assert_eq!(
            text,
            "OBDII\nLive Data\nEngine\n\
             RPM rpm,Note\n\
             800,\"idle, warm\"\n\
             1200,\"say \"\"go\"\"\"\n"
        );
    }

    #[test]
    fn test_render_errors_before_table() {
        let mut result = sample_result();
        result.records.clear();
        result.errors.push(ParseError::UnexpectedEndOfFile(Stage::Data));

        let renderer = TableRenderer::new(RenderConfig::new().with_headings(false)).unwrap();
        assert_eq!(
            renderer.render(&result),
            "Error: end of file during data parse\nRPM rpm,Note\n"
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let renderer = TableRenderer::new(RenderConfig::new().with_delimiter(';').table_only()).unwrap();
        let text = renderer.render(&sample_result());
        assert_eq!(text.lines().nth(1), Some("800;idle, warm"));
    }

    #[test]
    fn test_invalid_delimiter() {
        let result = TableRenderer::new(RenderConfig::new().with_delimiter('"'));
        assert!(matches!(result, Err(DecoderError::InvalidConfig(_))));
    }

    #[test]
    fn test_latin1_values_round_trip() {
        let mut result = sample_result();
        result.records = vec![vec!["25\u{B0}".to_string(), String::new()]];
        let renderer = TableRenderer::new(RenderConfig::new().table_only()).unwrap();
        assert_eq!(renderer.render(&result), "RPM rpm,Note\n25\u{B0},\n");
    }
}
