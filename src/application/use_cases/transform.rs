// ============================================================
// ROW TRANSFORMER
// ============================================================
// Derive the intent API parameters from the business-rule columns.
// Pure and total over validated records.

use crate::domain::record::{rule_parts, SubmissionRecord, ValidatedRecord};

/// Map a validated row to its submission-ready form:
/// - `q_val`: sentence-rule parts, then keyword-rule parts wrapped in
///   `includes(..)`, joined with commas.
/// - `a_val`: the message as the textual JSON the API expects in its
///   string field (not a nested JSON value).
/// - `intentname`: the conversation name verbatim.
pub fn transform(validated: &ValidatedRecord) -> SubmissionRecord {
    let record = validated.record();

    let sentence_parts = rule_parts(&record.sentence_rule);
    let keyword_parts: Vec<String> = rule_parts(&record.keyword_rule)
        .into_iter()
        .map(|part| format!("includes({})", part))
        .collect();

    let q_val = sentence_parts
        .iter()
        .map(|part| part.to_string())
        .chain(keyword_parts)
        .collect::<Vec<_>>()
        .join(",");

    SubmissionRecord {
        conversation_id: record.conversation_id.clone(),
        conversation_name: record.conversation_name.clone(),
        message: record.message.clone(),
        intentname: record.conversation_name.clone(),
        q_val,
        a_val: encode_answer(&record.message),
    }
}

/// Serialize the message as `[[{"text":...,"type":"text"}]]` text.
/// Only quotes and line breaks are escaped; the remote contract takes
/// this string as-is.
fn encode_answer(message: &str) -> String {
    let escaped = message.replace('"', "\\\"").replace('\n', "\\n");
    format!("[[{{\"text\":\"{}\",\"type\":\"text\"}}]]", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RawRecord;

    fn validated(sentence: &str, keyword: &str, message: &str) -> ValidatedRecord {
        ValidatedRecord::new(RawRecord {
            conversation_id: "CONV-1".to_string(),
            conversation_name: "Greeting".to_string(),
            sentence_rule: sentence.to_string(),
            keyword_rule: keyword.to_string(),
            message: message.to_string(),
        })
        .expect("fixture record must be valid")
    }

    #[test]
    fn test_q_val_combines_sentence_then_keyword_rules() {
        let result = transform(&validated("a|b", "c", "msg"));
        assert_eq!(result.q_val, "a,b,includes(c)");
    }

    #[test]
    fn test_q_val_with_keyword_rule_only() {
        let result = transform(&validated("", "promo | sale", "msg"));
        assert_eq!(result.q_val, "includes(promo),includes(sale)");
    }

    #[test]
    fn test_blank_rule_parts_are_dropped() {
        let result = transform(&validated(" hello || hi ", "", "msg"));
        assert_eq!(result.q_val, "hello,hi");
    }

    #[test]
    fn test_a_val_escapes_quotes() {
        let result = transform(&validated("x", "", "he said \"hi\""));
        assert_eq!(
            result.a_val,
            "[[{\"text\":\"he said \\\"hi\\\"\",\"type\":\"text\"}]]"
        );
    }

    #[test]
    fn test_a_val_escapes_line_breaks() {
        let result = transform(&validated("x", "", "line one\nline two"));
        assert_eq!(
            result.a_val,
            "[[{\"text\":\"line one\\nline two\",\"type\":\"text\"}]]"
        );
    }

    #[test]
    fn test_intentname_is_conversation_name() {
        let result = transform(&validated("x", "", "msg"));
        assert_eq!(result.intentname, "Greeting");
        assert_eq!(result.conversation_name, "Greeting");
    }

    #[test]
    fn test_transform_is_deterministic() {
        let record = validated("a|b", "c|d", "some message");
        assert_eq!(transform(&record), transform(&record));
    }
}
