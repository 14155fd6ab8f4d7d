//! The shared resolve→plan→send pipeline.
//!
//! Both the daily trigger and the manual HTTP path enter here. A run
//! ledger keyed by calendar date makes a dispatch run non-reentrant per
//! date: two concurrent triggers for the same day cannot double-send.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::NaiveDate;
use serde::Serialize;

use rawat_core::error::{RawatError, Result};
use rawat_roster::{AssignmentResolver, DaySchedule};

use crate::plan::{DispatchPlanner, PlanOptions};
use crate::report::DispatchReport;
use crate::sender::{CancelFlag, NotificationSender};

/// Compact per-assignment summary included in the dispatch outcome.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSummary {
    pub asset: String,
    pub team: String,
    pub members: Vec<String>,
}

/// Structured result of one dispatch run.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchOutcome {
    pub date: String,
    /// "full" or "group_only".
    pub mode: String,
    pub assignments: Vec<AssignmentSummary>,
    pub results: DispatchReport,
}

/// Drives resolve → plan → send for one calendar date.
pub struct Dispatcher {
    resolver: AssignmentResolver,
    planner: DispatchPlanner,
    sender: NotificationSender,
    /// Dates with a dispatch run currently in flight.
    in_flight: Mutex<HashSet<NaiveDate>>,
}

impl Dispatcher {
    pub fn new(resolver: AssignmentResolver, sender: NotificationSender) -> Self {
        Self {
            resolver,
            planner: DispatchPlanner::new(),
            sender,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Resolve only — the read-only query path.
    pub fn resolve(&self, date: NaiveDate) -> Result<DaySchedule> {
        self.resolver.resolve(date)
    }

    /// Resolve from a `YYYY-MM-DD` string.
    pub fn resolve_str(&self, date: &str) -> Result<DaySchedule> {
        self.resolver.resolve_str(date)
    }

    /// Run the full pipeline for `date`.
    ///
    /// Returns `NoAssignment` for weekends (nothing sent), `Busy` if a run
    /// for the same date is already in flight. Delivery failures never
    /// surface here — they are itemized inside the outcome's report.
    pub async fn dispatch_for_date(
        &self,
        date: NaiveDate,
        options: PlanOptions,
        cancel: &CancelFlag,
    ) -> Result<DispatchOutcome> {
        let _guard = RunGuard::acquire(&self.in_flight, date)?;

        let day = self.resolver.resolve(date)?;
        tracing::info!(
            "Dispatching PM schedule for {} ({}, week {} cycle {})",
            day.date,
            day.day_name,
            day.week_number,
            day.week_in_cycle
        );

        let plan = self.planner.plan(date, &day.assignments, options);
        let results = self.sender.send(&plan, cancel).await;

        Ok(DispatchOutcome {
            date: day.date.clone(),
            mode: if options.group_only { "group_only" } else { "full" }.to_string(),
            assignments: day
                .assignments
                .iter()
                .map(|a| AssignmentSummary {
                    asset: a.asset.name.clone(),
                    team: a.team.name.clone(),
                    members: a.team.members.iter().map(|m| m.name.clone()).collect(),
                })
                .collect(),
            results,
        })
    }
}

/// Removes the date from the in-flight set when the run finishes,
/// successfully or not.
struct RunGuard<'a> {
    ledger: &'a Mutex<HashSet<NaiveDate>>,
    date: NaiveDate,
}

impl<'a> RunGuard<'a> {
    fn acquire(ledger: &'a Mutex<HashSet<NaiveDate>>, date: NaiveDate) -> Result<Self> {
        let mut in_flight = ledger
            .lock()
            .map_err(|_| RawatError::Config("run ledger poisoned".into()))?;
        if !in_flight.insert(date) {
            return Err(RawatError::Busy(format!(
                "a dispatch run for {date} is already in progress"
            )));
        }
        Ok(Self { ledger, date })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.ledger.lock() {
            in_flight.remove(&self.date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::DelayPolicy;
    use async_trait::async_trait;
    use rawat_core::traits::{GroupConfigStore, MessageGateway};
    use rawat_core::types::{SendReceipt, WaGroupConfig};
    use std::sync::Arc;

    struct OkGateway;

    #[async_trait]
    impl MessageGateway for OkGateway {
        async fn send_message(&self, phone: &str, _text: &str) -> rawat_core::error::Result<SendReceipt> {
            Ok(SendReceipt::from_response(serde_json::json!({"messageId": phone})))
        }
        async fn send_group_message(&self, _group_id: &str, _text: &str) -> rawat_core::error::Result<SendReceipt> {
            Ok(SendReceipt::from_response(serde_json::json!({"messageId": "grp"})))
        }
        async fn send_template_message(
            &self,
            _template_name: &str,
            _variables: &serde_json::Value,
            _group_id: &str,
        ) -> rawat_core::error::Result<SendReceipt> {
            unimplemented!("not used by pipeline tests")
        }
        async fn update_template_message(
            &self,
            _message_id: &str,
            _template_name: &str,
            _variables: &serde_json::Value,
            _group_id: &str,
        ) -> rawat_core::error::Result<SendReceipt> {
            unimplemented!("not used by pipeline tests")
        }
        async fn delete_message(&self, _message_id: &str) -> rawat_core::error::Result<SendReceipt> {
            unimplemented!("not used by pipeline tests")
        }
        async fn list_groups(&self) -> rawat_core::error::Result<serde_json::Value> {
            Ok(serde_json::json!([]))
        }
    }

    struct OneGroup;

    impl GroupConfigStore for OneGroup {
        fn group_config(&self) -> rawat_core::error::Result<Option<WaGroupConfig>> {
            Ok(Some(WaGroupConfig {
                group_id: "g-123".into(),
                group_name: "PM FASAU".into(),
            }))
        }
        fn upsert_group_config(&self, config: &WaGroupConfig) -> rawat_core::error::Result<WaGroupConfig> {
            Ok(config.clone())
        }
        fn delete_group_config(&self) -> rawat_core::error::Result<Option<WaGroupConfig>> {
            Ok(None)
        }
    }

    fn dispatcher() -> Dispatcher {
        let sender = NotificationSender::new(
            Arc::new(OkGateway),
            Arc::new(OneGroup),
            DelayPolicy::none(),
        );
        Dispatcher::new(rawat_roster::AssignmentResolver::builtin(), sender)
    }

    #[tokio::test]
    async fn test_full_run_for_a_cycle_one_monday() {
        let monday = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let outcome = dispatcher()
            .dispatch_for_date(monday, PlanOptions::default(), &CancelFlag::new())
            .await
            .unwrap();

        assert_eq!(outcome.date, "2024-12-30");
        assert_eq!(outcome.mode, "full");
        assert_eq!(outcome.assignments.len(), 2);
        assert_eq!(outcome.results.individual_messages.len(), 4);
        assert!(outcome.results.group_message.is_some());
        assert!(outcome.results.errors.is_empty());
    }

    #[tokio::test]
    async fn test_weekend_yields_no_assignment_and_sends_nothing() {
        let saturday = NaiveDate::from_ymd_opt(2025, 1, 4).unwrap();
        let result = dispatcher()
            .dispatch_for_date(saturday, PlanOptions::default(), &CancelFlag::new())
            .await;

        assert!(matches!(result, Err(RawatError::NoAssignment(_))));
    }

    #[tokio::test]
    async fn test_sequential_runs_for_same_date_are_allowed() {
        // The ledger guards concurrency, not repetition.
        let d = dispatcher();
        let monday = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        for _ in 0..2 {
            d.dispatch_for_date(monday, PlanOptions::default(), &CancelFlag::new())
                .await
                .unwrap();
        }
    }

    #[test]
    fn test_run_guard_blocks_same_date_only() {
        let ledger = Mutex::new(HashSet::new());
        let monday = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

        let guard = RunGuard::acquire(&ledger, monday).unwrap();
        assert!(matches!(
            RunGuard::acquire(&ledger, monday),
            Err(RawatError::Busy(_))
        ));
        // A different date is unaffected.
        assert!(RunGuard::acquire(&ledger, tuesday).is_ok());

        drop(guard);
        assert!(RunGuard::acquire(&ledger, monday).is_ok());
    }
}
