//! Capability seams between the scheduler core and its collaborators.
//!
//! The dispatch pipeline only ever talks to these traits. Production wires
//! in the WhatsApp HTTP client and the SQLite store; tests substitute
//! in-memory fakes without any process-wide state.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{SendReceipt, WaGroupConfig};

/// Outbound messaging gateway.
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Deliver one text message to one recipient (bare international
    /// phone number, no "+").
    async fn send_message(&self, phone: &str, text: &str) -> Result<SendReceipt>;

    /// Deliver one text message to a group destination.
    async fn send_group_message(&self, group_id: &str, text: &str) -> Result<SendReceipt>;

    /// Send a pre-registered template with substitution variables to a
    /// group.
    async fn send_template_message(
        &self,
        template_name: &str,
        variables: &serde_json::Value,
        group_id: &str,
    ) -> Result<SendReceipt>;

    /// Re-render a previously sent templated message in place.
    async fn update_template_message(
        &self,
        message_id: &str,
        template_name: &str,
        variables: &serde_json::Value,
        group_id: &str,
    ) -> Result<SendReceipt>;

    /// Delete a previously sent message.
    async fn delete_message(&self, message_id: &str) -> Result<SendReceipt>;

    /// List the groups visible to the gateway account.
    async fn list_groups(&self) -> Result<serde_json::Value>;
}

/// Read/write access to the configured outbound group destination.
/// Single row, single writer; locking is the store's concern.
pub trait GroupConfigStore: Send + Sync {
    fn group_config(&self) -> Result<Option<WaGroupConfig>>;
    fn upsert_group_config(&self, config: &WaGroupConfig) -> Result<WaGroupConfig>;
    fn delete_group_config(&self) -> Result<Option<WaGroupConfig>>;
}

/// Write-back of sent-message identifiers, keyed by a caller-chosen
/// correlation key (e.g. a task id). Enables later update/delete calls.
pub trait MessageLog: Send + Sync {
    fn record_message_id(&self, key: &str, message_id: &str) -> Result<()>;
    fn message_id(&self, key: &str) -> Result<Option<String>>;
    fn forget(&self, key: &str) -> Result<()>;
}
