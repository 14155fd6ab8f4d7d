//! Templated task announcements to the group.
//!
//! Announcements are long-lived group messages: `announce` posts one and
//! records the gateway message id under the task's correlation key, so a
//! later `update` can re-render it in place and `retract` can delete it.
//! Shares the sender's pacing discipline.

use std::sync::Arc;

use rawat_core::error::{RawatError, Result};
use rawat_core::traits::{GroupConfigStore, MessageGateway, MessageLog};
use rawat_core::types::SendReceipt;

use crate::delay::DelayPolicy;

/// One announceable unit of work. The `key` correlates the announcement
/// across its lifetime; `template` names a template pre-registered on the
/// gateway side, `variables` fills its placeholders.
#[derive(Debug, Clone)]
pub struct TaskAnnouncement {
    pub key: String,
    pub template: String,
    pub variables: serde_json::Value,
}

/// Drives the announce / update / retract lifecycle for task messages.
pub struct TaskAnnouncer {
    gateway: Arc<dyn MessageGateway>,
    groups: Arc<dyn GroupConfigStore>,
    log: Arc<dyn MessageLog>,
    delay: DelayPolicy,
}

impl TaskAnnouncer {
    pub fn new(
        gateway: Arc<dyn MessageGateway>,
        groups: Arc<dyn GroupConfigStore>,
        log: Arc<dyn MessageLog>,
        delay: DelayPolicy,
    ) -> Self {
        Self { gateway, groups, log, delay }
    }

    fn group_id(&self) -> Result<String> {
        match self.groups.group_config()? {
            Some(config) => Ok(config.group_id),
            None => Err(RawatError::Config(
                "No WhatsApp group ID found in database".into(),
            )),
        }
    }

    /// Post the announcement and remember its message id for later edits.
    ///
    /// A receipt without a message id still counts as delivered; it just
    /// cannot be updated or retracted afterwards.
    pub async fn announce(&self, task: &TaskAnnouncement) -> Result<SendReceipt> {
        let group_id = self.group_id()?;
        self.delay.pause().await;
        let receipt = self
            .gateway
            .send_template_message(&task.template, &task.variables, &group_id)
            .await?;

        match &receipt.message_id {
            Some(id) => self.log.record_message_id(&task.key, id)?,
            None => tracing::warn!(
                "Announcement for task {} delivered without a message id; updates disabled",
                task.key
            ),
        }
        tracing::info!("Announced task {} to group", task.key);
        Ok(receipt)
    }

    /// Re-render the existing announcement with fresh variables.
    pub async fn update(&self, task: &TaskAnnouncement) -> Result<SendReceipt> {
        let message_id = self.known_message_id(&task.key)?;
        let group_id = self.group_id()?;
        self.delay.pause().await;
        let receipt = self
            .gateway
            .update_template_message(&message_id, &task.template, &task.variables, &group_id)
            .await?;
        tracing::info!("Updated announcement for task {}", task.key);
        Ok(receipt)
    }

    /// Delete the announcement and drop its correlation entry.
    pub async fn retract(&self, key: &str) -> Result<SendReceipt> {
        let message_id = self.known_message_id(key)?;
        self.delay.pause().await;
        let receipt = self.gateway.delete_message(&message_id).await?;
        self.log.forget(key)?;
        tracing::info!("Retracted announcement for task {key}");
        Ok(receipt)
    }

    fn known_message_id(&self, key: &str) -> Result<String> {
        self.log.message_id(key)?.ok_or_else(|| {
            RawatError::Validation(format!("no announcement recorded for task {key}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rawat_core::types::WaGroupConfig;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeGateway {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MessageGateway for FakeGateway {
        async fn send_message(&self, _phone: &str, _text: &str) -> Result<SendReceipt> {
            unimplemented!("not used by announcement tests")
        }

        async fn send_group_message(&self, _group_id: &str, _text: &str) -> Result<SendReceipt> {
            unimplemented!("not used by announcement tests")
        }

        async fn send_template_message(
            &self,
            template_name: &str,
            _variables: &serde_json::Value,
            group_id: &str,
        ) -> Result<SendReceipt> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("send:{template_name}:{group_id}"));
            Ok(SendReceipt::from_response(serde_json::json!({"messageId": "msg-1"})))
        }

        async fn update_template_message(
            &self,
            message_id: &str,
            template_name: &str,
            _variables: &serde_json::Value,
            _group_id: &str,
        ) -> Result<SendReceipt> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("update:{message_id}:{template_name}"));
            Ok(SendReceipt::from_response(serde_json::json!({"messageId": message_id})))
        }

        async fn delete_message(&self, message_id: &str) -> Result<SendReceipt> {
            self.calls.lock().unwrap().push(format!("delete:{message_id}"));
            Ok(SendReceipt::from_response(serde_json::json!({"deleted": true})))
        }

        async fn list_groups(&self) -> Result<serde_json::Value> {
            Ok(serde_json::json!([]))
        }
    }

    struct FakeGroups(Option<WaGroupConfig>);

    impl GroupConfigStore for FakeGroups {
        fn group_config(&self) -> Result<Option<WaGroupConfig>> {
            Ok(self.0.clone())
        }
        fn upsert_group_config(&self, config: &WaGroupConfig) -> Result<WaGroupConfig> {
            Ok(config.clone())
        }
        fn delete_group_config(&self) -> Result<Option<WaGroupConfig>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct FakeLog(Mutex<HashMap<String, String>>);

    impl MessageLog for FakeLog {
        fn record_message_id(&self, key: &str, message_id: &str) -> Result<()> {
            self.0.lock().unwrap().insert(key.into(), message_id.into());
            Ok(())
        }
        fn message_id(&self, key: &str) -> Result<Option<String>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }
        fn forget(&self, key: &str) -> Result<()> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn announcer(
        gateway: Arc<FakeGateway>,
        log: Arc<FakeLog>,
        group: Option<WaGroupConfig>,
    ) -> TaskAnnouncer {
        TaskAnnouncer::new(gateway, Arc::new(FakeGroups(group)), log, DelayPolicy::none())
    }

    fn group() -> Option<WaGroupConfig> {
        Some(WaGroupConfig {
            group_id: "g-123".into(),
            group_name: "PM FASAU".into(),
        })
    }

    fn sample_task() -> TaskAnnouncement {
        TaskAnnouncement {
            key: "task-7".into(),
            template: "task_created".into(),
            variables: serde_json::json!({"title": "Perbaikan pompa"}),
        }
    }

    #[tokio::test]
    async fn test_announce_records_message_id() {
        let gateway = Arc::new(FakeGateway::default());
        let log = Arc::new(FakeLog::default());
        let announcer = announcer(gateway.clone(), log.clone(), group());

        announcer.announce(&sample_task()).await.unwrap();

        assert_eq!(log.message_id("task-7").unwrap().as_deref(), Some("msg-1"));
        assert_eq!(
            gateway.calls.lock().unwrap().as_slice(),
            ["send:task_created:g-123"]
        );
    }

    #[tokio::test]
    async fn test_update_reuses_recorded_id() {
        let gateway = Arc::new(FakeGateway::default());
        let log = Arc::new(FakeLog::default());
        let announcer = announcer(gateway.clone(), log.clone(), group());

        let task = sample_task();
        announcer.announce(&task).await.unwrap();
        announcer.update(&task).await.unwrap();

        let calls = gateway.calls.lock().unwrap().clone();
        assert_eq!(calls[1], "update:msg-1:task_created");
    }

    #[tokio::test]
    async fn test_retract_deletes_and_forgets() {
        let gateway = Arc::new(FakeGateway::default());
        let log = Arc::new(FakeLog::default());
        let announcer = announcer(gateway.clone(), log.clone(), group());

        announcer.announce(&sample_task()).await.unwrap();
        announcer.retract("task-7").await.unwrap();

        assert!(log.message_id("task-7").unwrap().is_none());
        // Retracting twice fails: the correlation entry is gone.
        assert!(announcer.retract("task-7").await.is_err());
    }

    #[tokio::test]
    async fn test_update_without_announcement_fails() {
        let gateway = Arc::new(FakeGateway::default());
        let log = Arc::new(FakeLog::default());
        let announcer = announcer(gateway, log, group());

        // A missing correlation entry is a caller error, not an empty
        // schedule day.
        assert!(matches!(
            announcer.update(&sample_task()).await,
            Err(RawatError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_announce_without_group_config_fails() {
        let gateway = Arc::new(FakeGateway::default());
        let log = Arc::new(FakeLog::default());
        let announcer = announcer(gateway.clone(), log, None);

        assert!(matches!(
            announcer.announce(&sample_task()).await,
            Err(RawatError::Config(_))
        ));
        assert!(gateway.calls.lock().unwrap().is_empty());
    }
}
