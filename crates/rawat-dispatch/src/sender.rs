//! Plan execution against the messaging gateway.
//!
//! Sends are strictly sequential in plan order — no parallel fan-out. The
//! group summary always goes out after every individual message, because
//! downstream correlation and gateway rate limits depend on the sequence.
//! Every send is its own failure domain: one dead number never stops the
//! rest of the batch.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rawat_core::traits::{GroupConfigStore, MessageGateway};

use crate::delay::DelayPolicy;
use crate::plan::{DispatchPlan, OutboundMessage};
use crate::report::{DispatchError, DispatchReport, GroupResult, IndividualResult};

/// Cooperative cancellation for an in-flight dispatch run. Aborting stops
/// the remaining unsent messages; already-sent ones are unaffected.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Executes a [`DispatchPlan`] sequentially with randomized pacing.
pub struct NotificationSender {
    gateway: Arc<dyn MessageGateway>,
    groups: Arc<dyn GroupConfigStore>,
    delay: DelayPolicy,
}

impl NotificationSender {
    pub fn new(
        gateway: Arc<dyn MessageGateway>,
        groups: Arc<dyn GroupConfigStore>,
        delay: DelayPolicy,
    ) -> Self {
        Self { gateway, groups, delay }
    }

    /// Execute the plan. Always returns a report; delivery failures are
    /// itemized in `errors[]` and never propagate as `Err`.
    pub async fn send(&self, plan: &DispatchPlan, cancel: &CancelFlag) -> DispatchReport {
        let mut report = DispatchReport::default();

        for message in &plan.messages {
            if cancel.is_cancelled() {
                tracing::info!("Dispatch cancelled; skipping remaining unsent messages");
                break;
            }

            match message {
                OutboundMessage::Individual {
                    member_name,
                    phone,
                    asset_name,
                    text,
                } => {
                    self.delay.pause().await;
                    match self.gateway.send_message(phone, text).await {
                        Ok(receipt) => {
                            tracing::info!("Message sent successfully to {member_name}");
                            report.individual_messages.push(IndividualResult {
                                member_name: member_name.clone(),
                                phone: phone.clone(),
                                asset: asset_name.clone(),
                                success: true,
                                response: receipt.raw,
                            });
                        }
                        Err(e) => {
                            tracing::warn!("Error sending message to {member_name}: {e}");
                            report.errors.push(DispatchError::individual(
                                member_name,
                                phone,
                                asset_name,
                                e.to_string(),
                            ));
                        }
                    }
                }
                OutboundMessage::GroupSummary { text } => {
                    self.send_group_summary(text, &mut report).await;
                }
            }
        }

        report
    }

    /// The group destination comes from external configuration, read once
    /// per run. A missing group id skips the send and records a
    /// configuration error instead.
    async fn send_group_summary(&self, text: &str, report: &mut DispatchReport) {
        let group_id = match self.groups.group_config() {
            Ok(Some(config)) => config.group_id,
            Ok(None) => {
                tracing::warn!("No WhatsApp group ID configured; skipping group summary");
                report.errors.push(DispatchError::group(
                    "No WhatsApp group ID found in database".into(),
                ));
                return;
            }
            Err(e) => {
                tracing::warn!("Error fetching WhatsApp group ID: {e}");
                report.errors.push(DispatchError::group(e.to_string()));
                return;
            }
        };

        self.delay.pause().await;
        match self.gateway.send_group_message(&group_id, text).await {
            Ok(receipt) => {
                tracing::info!("Summary message sent successfully to group");
                report.group_message = Some(GroupResult {
                    success: true,
                    group_id,
                    response: receipt.raw,
                });
            }
            Err(e) => {
                tracing::warn!("Error sending group message: {e}");
                report.errors.push(DispatchError::group(e.to_string()));
            }
        }
    }
}
