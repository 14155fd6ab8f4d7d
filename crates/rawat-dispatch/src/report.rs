//! Per-run dispatch reporting.
//!
//! Serializes with the camelCase keys downstream consumers expect
//! (`individualMessages`, `groupMessage`, `errors`).

use serde::Serialize;

/// Outcome of one successfully delivered individual message.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndividualResult {
    pub member_name: String,
    pub phone: String,
    pub asset: String,
    pub success: bool,
    pub response: serde_json::Value,
}

/// Outcome of the delivered group summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupResult {
    pub success: bool,
    pub group_id: String,
    pub response: serde_json::Value,
}

/// What failed for one message.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An individual member message failed to deliver.
    Individual,
    /// The group summary failed, or no group id was configured.
    GroupMessage,
}

/// One recorded failure. Never aborts the batch.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    pub error: String,
}

impl DispatchError {
    pub fn individual(member_name: &str, phone: &str, asset: &str, error: String) -> Self {
        Self {
            kind: ErrorKind::Individual,
            member_name: Some(member_name.to_string()),
            phone: Some(phone.to_string()),
            asset: Some(asset.to_string()),
            error,
        }
    }

    pub fn group(error: String) -> Self {
        Self {
            kind: ErrorKind::GroupMessage,
            member_name: None,
            phone: None,
            asset: None,
            error,
        }
    }
}

/// Aggregated result of one dispatch run.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub individual_messages: Vec<IndividualResult>,
    pub group_message: Option<GroupResult>,
    pub errors: Vec<DispatchError>,
}

impl DispatchReport {
    /// Total messages actually attempted (delivered + failed).
    pub fn attempted(&self) -> usize {
        self.individual_messages.len()
            + usize::from(self.group_message.is_some())
            + self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_wire_shape() {
        let mut report = DispatchReport::default();
        report.individual_messages.push(IndividualResult {
            member_name: "Sahab".into(),
            phone: "6285920157602".into(),
            asset: "Gedung Administrasi".into(),
            success: true,
            response: serde_json::json!({"messageId": "m1"}),
        });
        report.errors.push(DispatchError::group("No WhatsApp group ID found".into()));

        let v = serde_json::to_value(&report).unwrap();
        assert!(v.get("individualMessages").is_some());
        assert!(v.get("groupMessage").is_some());
        assert_eq!(v["individualMessages"][0]["memberName"], "Sahab");
        assert_eq!(v["errors"][0]["type"], "group_message");
        // Absent optional fields are omitted, not null.
        assert!(v["errors"][0].get("memberName").is_none());
    }

    #[test]
    fn test_attempted_counts_all_outcomes() {
        let mut report = DispatchReport::default();
        assert_eq!(report.attempted(), 0);
        report.errors.push(DispatchError::individual("A", "62", "X", "timeout".into()));
        report.group_message = Some(GroupResult {
            success: true,
            group_id: "g1".into(),
            response: serde_json::json!({}),
        });
        assert_eq!(report.attempted(), 2);
    }
}
