// ============================================================
// INTENT PAYLOAD
// ============================================================
// The fixed-shape request body expected by the remote intent API.
// Only pageid/intentname/q_val/a_val are derived; every other field
// is a constant dictated by the remote contract and must be sent
// byte-for-byte, nulls included.

use serde::{Deserialize, Serialize};

use super::record::SubmissionRecord;

/// Assignment/follow-up substructure. Always present in the payload,
/// always entirely null-valued for batch-created intents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentGroup {
    pub assigngroupid: Option<i64>,
    pub assignsubgroupid: Option<i64>,
    pub priority: Option<i64>,
    pub duedate: Option<String>,
    pub day: Option<i64>,
    pub hour: Option<i64>,
    pub minute: Option<i64>,
    pub mood: Option<String>,
    pub wrap_up: Option<String>,
    pub wrap_up_route: Option<String>,
    pub tags: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentPayload {
    pub pageid: String,
    pub intentname: String,
    pub q_type: String,
    pub a_type: String,
    pub q_val: String,
    pub a_val: String,
    pub context_in: String,
    pub context_out: String,
    pub postidlist: String,
    pub userstatus: String,
    pub usertags: String,
    #[serde(rename = "isShow")]
    pub is_show: bool,
    pub linenoti_status: bool,
    pub linenoti_text: Option<String>,
    pub starttime: Option<String>,
    pub endtime: Option<String>,
    pub intentstatus: bool,
    pub follow_up_fb_quick_reply: String,
    pub follow_up_fb_val: Option<String>,
    pub follow_up_ig_quick_reply: Option<String>,
    pub follow_up_ig_val: Option<String>,
    pub follow_up_line_quick_reply: String,
    pub follow_up_line_val: Option<String>,
    pub follow_up_quick_reply: Option<String>,
    pub follow_up_status: Option<String>,
    pub follow_up_type: String,
    pub follow_up_val: String,
    pub follow_up_within_seconds: Option<i64>,
    pub follow_up_whatsapp_quick_reply: Option<String>,
    pub follow_up_whatsapp_val: Option<String>,
    pub time_setting: Option<String>,
    pub exceptpostidlist: String,
    pub post_keywords: String,
    pub onlytime: bool,
    pub quick_reply: String,
    pub follow_up_intentgroup: IntentGroup,
    pub user_tags_delete: String,
    pub follow_up_usertags: String,
    pub intentgroup: IntentGroup,
}

impl IntentPayload {
    /// Build the outbound payload for one record. Everything except the
    /// four derived fields is a remote-contract constant.
    pub fn from_record(record: &SubmissionRecord, pageid: &str) -> Self {
        Self {
            pageid: pageid.to_string(),
            intentname: record.intentname.clone(),
            q_type: "text".to_string(),
            a_type: "json".to_string(),
            q_val: record.q_val.clone(),
            a_val: record.a_val.clone(),
            context_in: String::new(),
            context_out: String::new(),
            postidlist: String::new(),
            userstatus: String::new(),
            usertags: String::new(),
            is_show: true,
            linenoti_status: false,
            linenoti_text: None,
            starttime: None,
            endtime: None,
            intentstatus: true,
            follow_up_fb_quick_reply: String::new(),
            follow_up_fb_val: None,
            follow_up_ig_quick_reply: None,
            follow_up_ig_val: None,
            follow_up_line_quick_reply: String::new(),
            follow_up_line_val: None,
            follow_up_quick_reply: None,
            follow_up_status: None,
            follow_up_type: "json".to_string(),
            follow_up_val: "[[]]".to_string(),
            follow_up_within_seconds: None,
            follow_up_whatsapp_quick_reply: None,
            follow_up_whatsapp_val: None,
            time_setting: None,
            exceptpostidlist: String::new(),
            post_keywords: String::new(),
            onlytime: false,
            quick_reply: String::new(),
            follow_up_intentgroup: IntentGroup::default(),
            user_tags_delete: String::new(),
            follow_up_usertags: String::new(),
            intentgroup: IntentGroup::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> SubmissionRecord {
        SubmissionRecord {
            conversation_id: "CONV-1".to_string(),
            conversation_name: "Greeting".to_string(),
            message: "Hi there".to_string(),
            intentname: "Greeting".to_string(),
            q_val: "hello,includes(hi)".to_string(),
            a_val: "[[{\"text\":\"Hi there\",\"type\":\"text\"}]]".to_string(),
        }
    }

    #[test]
    fn test_derived_fields_come_from_the_record() {
        let payload = IntentPayload::from_record(&submission(), "PAGE-9");
        assert_eq!(payload.pageid, "PAGE-9");
        assert_eq!(payload.intentname, "Greeting");
        assert_eq!(payload.q_val, "hello,includes(hi)");
        assert_eq!(payload.a_val, "[[{\"text\":\"Hi there\",\"type\":\"text\"}]]");
    }

    #[test]
    fn test_constant_fields_match_the_remote_contract() {
        let payload = IntentPayload::from_record(&submission(), "PAGE-9");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["q_type"], "text");
        assert_eq!(json["a_type"], "json");
        assert_eq!(json["isShow"], true);
        assert_eq!(json["intentstatus"], true);
        assert_eq!(json["linenoti_status"], false);
        assert_eq!(json["onlytime"], false);
        assert_eq!(json["follow_up_type"], "json");
        assert_eq!(json["follow_up_val"], "[[]]");
        assert_eq!(json["context_in"], "");
        assert_eq!(json["linenoti_text"], serde_json::Value::Null);
        assert_eq!(json["time_setting"], serde_json::Value::Null);
    }

    #[test]
    fn test_group_substructures_are_present_and_null_valued() {
        let payload = IntentPayload::from_record(&submission(), "PAGE-9");
        let json = serde_json::to_value(&payload).unwrap();

        for key in ["intentgroup", "follow_up_intentgroup"] {
            let group = json[key].as_object().expect("group must be an object");
            assert_eq!(group.len(), 11);
            assert!(group.values().all(|v| v.is_null()));
        }
    }
}
