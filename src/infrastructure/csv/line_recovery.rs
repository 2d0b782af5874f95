// ============================================================
// ROW-BOUNDARY RECOVERY
// ============================================================
// Rejoin logical rows whose message field was authored with raw
// newlines and no proper quoting. This is a heuristic, not a CSV
// grammar: a line opens a new row iff it carries enough commas and
// leads with an identifier-shaped first segment. Kept behind a
// single function so it can be swapped for a streaming quote-aware
// tokenizer without touching the downstream stages.

use once_cell::sync::Lazy;
use regex::Regex;

/// Uppercase letters, digits and hyphens, immediately followed by the
/// first field separator.
static NEW_ROW_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9-]+,").unwrap());

/// Minimum comma count for a physical line to be considered a row start.
const MIN_ROW_COMMAS: usize = 3;

/// Collapse the physical lines of `text` into logical rows. The first
/// line (header) is passed through untouched. A physical line that does
/// not look like a row start, while a row is open, is appended to that
/// row with a single space in place of the newline.
pub fn recover_logical_lines(text: &str) -> Vec<String> {
    let mut logical = Vec::new();
    let mut current_row = String::new();

    for (i, line) in text.split('\n').enumerate() {
        if i == 0 {
            logical.push(line.to_string());
            continue;
        }

        let looks_like_new_row =
            line.matches(',').count() >= MIN_ROW_COMMAS && NEW_ROW_PATTERN.is_match(line.trim());

        if looks_like_new_row && !current_row.is_empty() {
            logical.push(std::mem::take(&mut current_row));
            current_row = line.to_string();
        } else if !current_row.is_empty() {
            current_row.push(' ');
            current_row.push_str(line.trim());
        } else {
            current_row = line.to_string();
        }
    }

    if !current_row.is_empty() {
        logical.push(current_row);
    }

    logical
}
