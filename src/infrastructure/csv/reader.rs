// ============================================================
// RESILIENT CSV READER
// ============================================================
// Turn raw CSV text into RawRecords, skipping lines that cannot be
// shaped and repairing rows split across physical lines. A malformed
// line never aborts the pass; only unusable input as a whole does.

use std::path::Path;

use tracing::{debug, warn};

use crate::domain::error::{AppError, Result};
use crate::domain::record::RawRecord;

use super::line_recovery::recover_logical_lines;

/// Column count every logical row is normalized to. Fields beyond the
/// fourth are rejoined into the message column.
const EXPECTED_FIELDS: usize = 5;

/// Reader output: the recovered records plus the physical line count
/// the caller needs to report skips.
#[derive(Debug, Clone)]
pub struct ParsedCsv {
    pub records: Vec<RawRecord>,
    /// Physical data lines in the input, header excluded.
    pub total_lines: usize,
}

pub struct CsvReader;

impl CsvReader {
    /// Parse CSV content. The first line is treated as a header and
    /// discarded. Returns an error only when the input as a whole is
    /// unusable; individual bad lines are skipped and logged.
    pub fn parse(content: &str) -> Result<ParsedCsv> {
        if content.trim().is_empty() {
            return Err(AppError::ParseError("CSV input is empty".to_string()));
        }

        let total_lines = content.split('\n').count().saturating_sub(1);
        let logical_lines = recover_logical_lines(content);

        let mut records = Vec::new();

        // Skip the header, keep source positions for log messages.
        for (index, line) in logical_lines.iter().enumerate().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut values = parse_line(line);

            if values.len() < 2 {
                warn!(line = index + 1, "Skipping unparseable CSV line");
                continue;
            }

            while values.len() < EXPECTED_FIELDS {
                values.push(String::new());
            }

            let record = RawRecord {
                conversation_id: values[0].trim().to_string(),
                conversation_name: values[1].trim().to_string(),
                sentence_rule: values[2].trim().to_string(),
                keyword_rule: values[3].trim().to_string(),
                message: values[4..].join(",").trim().to_string(),
            };

            // Rows with no usable identity are dropped here; validation
            // reports everything else.
            if record.conversation_id.is_empty() || record.conversation_name.is_empty() {
                debug!(line = index + 1, "Dropping row without id/name");
                continue;
            }

            records.push(record);
        }

        Ok(ParsedCsv {
            records,
            total_lines,
        })
    }

    /// Read a CSV file as UTF-8, falling back to lossy decoding rather
    /// than failing on stray bytes.
    pub fn read_file(path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;

        match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(err) => Ok(String::from_utf8_lossy(err.as_bytes()).to_string()),
        }
    }
}

/// Scan one logical line into fields. `"` toggles quote mode, a doubled
/// `"` inside quotes emits one literal quote, and `,` outside quotes
/// ends the current field.
fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields.into_iter().map(strip_wrapping_quotes).collect()
}

/// Remove one pair of quotes wrapping the whole field, if present.
fn strip_wrapping_quotes(field: String) -> String {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        field[1..field.len() - 1].to_string()
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rows_parse_as_comma_splits() {
        let content = "id,name,sentence,keyword,message\n\
                       CONV-1,Greeting,hello,hi,Welcome\n\
                       CONV-2,Bye,goodbye,cya,See you";
        let parsed = CsvReader::parse(content).unwrap();

        assert_eq!(parsed.total_lines, 2);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].conversation_id, "CONV-1");
        assert_eq!(parsed.records[0].conversation_name, "Greeting");
        assert_eq!(parsed.records[0].sentence_rule, "hello");
        assert_eq!(parsed.records[0].keyword_rule, "hi");
        assert_eq!(parsed.records[0].message, "Welcome");
    }

    #[test]
    fn test_quoted_field_keeps_commas_out_of_the_split() {
        let content = "h\nCONV-1,Greeting,hello,hi,\"one, two, three\"";
        let parsed = CsvReader::parse(content).unwrap();
        assert_eq!(parsed.records[0].message, "one, two, three");
    }

    #[test]
    fn test_doubled_quote_becomes_literal_quote() {
        let content = "h\nCONV-1,Greeting,hello,hi,\"he said \"\"hi\"\"\"";
        let parsed = CsvReader::parse(content).unwrap();
        assert_eq!(parsed.records[0].message, "he said \"hi\"");
    }

    #[test]
    fn test_unquoted_trailing_commas_are_rejoined_into_message() {
        let content = "h\nCONV-1,Greeting,hello,hi,first,second,third";
        let parsed = CsvReader::parse(content).unwrap();
        assert_eq!(parsed.records[0].message, "first,second,third");
    }

    #[test]
    fn test_short_rows_are_padded_with_empty_fields() {
        let content = "h\nCONV-1,Greeting,hello";
        let parsed = CsvReader::parse(content).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].keyword_rule, "");
        assert_eq!(parsed.records[0].message, "");
    }

    #[test]
    fn test_embedded_newline_in_message_is_repaired() {
        let content = "h\n\
                       CONV-1,Greeting,hello,hi,Welcome to\n\
                       the shop\n\
                       CONV-2,Bye,goodbye,cya,See you";
        let parsed = CsvReader::parse(content).unwrap();

        assert_eq!(parsed.total_lines, 3);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].message, "Welcome to the shop");
        assert_eq!(parsed.records[1].conversation_id, "CONV-2");
    }

    #[test]
    fn test_row_without_id_or_name_is_dropped() {
        let content = "h\n,Greeting,hello,hi,msg\nCONV-2,,hello,hi,msg";
        let parsed = CsvReader::parse(content).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.total_lines, 2);
    }

    #[test]
    fn test_empty_lines_are_ignored() {
        let content = "h\n\nCONV-1,Greeting,hello,hi,msg\n\n";
        let parsed = CsvReader::parse(content).unwrap();
        assert_eq!(parsed.records.len(), 1);
    }

    #[test]
    fn test_empty_input_is_fatal() {
        assert!(matches!(
            CsvReader::parse("   \n  "),
            Err(AppError::ParseError(_))
        ));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let content = "h\n CONV-1 , Greeting , hello , hi ,  spaced out  ";
        let parsed = CsvReader::parse(content).unwrap();
        let record = &parsed.records[0];
        assert_eq!(record.conversation_id, "CONV-1");
        assert_eq!(record.conversation_name, "Greeting");
        assert_eq!(record.message, "spaced out");
    }
}
