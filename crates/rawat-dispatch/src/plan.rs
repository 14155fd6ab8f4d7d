//! Dispatch planning: expand a day's assignments into the ordered list of
//! outbound messages.

use chrono::NaiveDate;
use serde::Serialize;

use rawat_roster::ResolvedAssignment;

use crate::templates;

/// Planner options for one dispatch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Skip individual messages; send only the group summary.
    pub group_only: bool,
}

/// One outbound notification. The group summary carries no destination:
/// the sender resolves the configured group id at send time.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum OutboundMessage {
    Individual {
        member_name: String,
        phone: String,
        asset_name: String,
        text: String,
    },
    GroupSummary {
        text: String,
    },
}

/// The ordered set of outbound messages for one day.
///
/// Invariant: individual messages first, in assignment order then member
/// order; at most one group summary, always last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchPlan {
    pub messages: Vec<OutboundMessage>,
}

impl DispatchPlan {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn individual_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| matches!(m, OutboundMessage::Individual { .. }))
            .count()
    }

    pub fn has_group_summary(&self) -> bool {
        matches!(self.messages.last(), Some(OutboundMessage::GroupSummary { .. }))
    }
}

/// Expands resolved assignments into a [`DispatchPlan`].
#[derive(Debug, Clone, Default)]
pub struct DispatchPlanner;

impl DispatchPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Build the plan for `date`. Empty assignments produce an empty plan
    /// ("nothing to send today", not an error).
    pub fn plan(
        &self,
        date: NaiveDate,
        assignments: &[ResolvedAssignment],
        options: PlanOptions,
    ) -> DispatchPlan {
        if assignments.is_empty() {
            return DispatchPlan::default();
        }

        let mut messages = Vec::new();

        if !options.group_only {
            for assignment in assignments {
                for member in &assignment.team.members {
                    messages.push(OutboundMessage::Individual {
                        member_name: member.name.clone(),
                        phone: member.phone.clone(),
                        asset_name: assignment.asset.name.clone(),
                        text: templates::individual_message(&member.name, assignment),
                    });
                }
            }
        }

        messages.push(OutboundMessage::GroupSummary {
            text: templates::summary_message(date, assignments),
        });

        DispatchPlan { messages }
    }
}
