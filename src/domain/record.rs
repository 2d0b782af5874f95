// ============================================================
// ROW RECORD TYPES
// ============================================================
// Value objects for the CSV-to-intent pipeline: raw rows as
// parsed, validated rows, and submission-ready rows.
// No I/O, no async.

use serde::{Deserialize, Serialize};

/// A row as recovered from the CSV file, after parsing but before
/// validation. All fields are trimmed; `message` may contain commas
/// and may have been reassembled from several physical lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub conversation_id: String,
    pub conversation_name: String,
    pub sentence_rule: String,
    pub keyword_rule: String,
    pub message: String,
}

impl RawRecord {
    /// Presence checks for this record. All checks are evaluated and all
    /// failures reported; an empty list means the record is valid.
    ///
    /// The rule-presence check is applied after pipe-splitting: a rule
    /// column holding only `|` separators and whitespace counts as empty,
    /// so an empty `q_val` can never reach the transformer.
    pub fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.conversation_id.is_empty() {
            violations.push("Conversation ID is required".to_string());
        }

        if self.conversation_name.is_empty() {
            violations.push("Conversation Name is required".to_string());
        }

        if rule_parts(&self.sentence_rule).is_empty() && rule_parts(&self.keyword_rule).is_empty() {
            violations.push("At least one of Sentence Rule or Keyword Rule is required".to_string());
        }

        if self.message.is_empty() {
            violations.push("Message is required".to_string());
        }

        violations
    }
}

/// Split a pipe-delimited rule column into its parts, trimming each part
/// and dropping empties. Order is preserved.
pub fn rule_parts(rule: &str) -> Vec<&str> {
    rule.split('|')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect()
}

/// A RawRecord that has passed every presence check. Constructed only
/// through [`ValidatedRecord::new`], so downstream transformation is
/// total over this type.
#[derive(Debug, Clone)]
pub struct ValidatedRecord {
    record: RawRecord,
}

impl ValidatedRecord {
    /// Validate a raw record, returning it with its violation reasons
    /// when any check fails.
    pub fn new(record: RawRecord) -> std::result::Result<Self, RejectedRecord> {
        let reasons = record.violations();
        if reasons.is_empty() {
            Ok(Self { record })
        } else {
            Err(RejectedRecord { record, reasons })
        }
    }

    pub fn record(&self) -> &RawRecord {
        &self.record
    }
}

/// A raw record that failed validation, with every reason collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub record: RawRecord,
    pub reasons: Vec<String>,
}

/// A validated row with the derived API parameters attached. Immutable
/// once built; one submission attempt is made per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub conversation_id: String,
    pub conversation_name: String,
    pub message: String,
    pub intentname: String,
    pub q_val: String,
    pub a_val: String,
}
