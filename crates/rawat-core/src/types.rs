//! Wire types shared between the dispatch pipeline and the WhatsApp
//! gateway client.

use serde::{Deserialize, Serialize};

/// Acknowledgement returned by the messaging gateway for one send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendReceipt {
    /// Gateway-assigned message identifier, when the gateway reports one.
    /// Used to correlate later update/delete calls.
    pub message_id: Option<String>,
    /// Full response payload as returned by the gateway.
    pub raw: serde_json::Value,
}

impl SendReceipt {
    pub fn from_response(raw: serde_json::Value) -> Self {
        let message_id = raw
            .get("messageId")
            .or_else(|| raw.get("id"))
            .and_then(|v| v.as_str())
            .map(String::from);
        Self { message_id, raw }
    }
}

/// The configured outbound WhatsApp group destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WaGroupConfig {
    pub group_id: String,
    pub group_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_extracts_message_id() {
        let r = SendReceipt::from_response(serde_json::json!({"messageId": "wamid.123"}));
        assert_eq!(r.message_id.as_deref(), Some("wamid.123"));

        let r = SendReceipt::from_response(serde_json::json!({"id": "abc"}));
        assert_eq!(r.message_id.as_deref(), Some("abc"));

        let r = SendReceipt::from_response(serde_json::json!({"ok": true}));
        assert!(r.message_id.is_none());
    }
}
