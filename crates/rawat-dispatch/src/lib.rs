//! # Rawat Dispatch
//!
//! Everything between a resolved day schedule and delivered WhatsApp
//! messages:
//!
//! ```text
//! DailyTrigger (tokio sleep until HH:MM Asia/Jakarta)
//!   └── Dispatcher (run ledger: one run per calendar date)
//!         ├── AssignmentResolver  → today's asset/team pairs
//!         ├── DispatchPlanner     → individual messages + group summary
//!         └── NotificationSender  → strictly sequential, randomized pacing,
//!                                   per-message failure isolation
//! ```
//!
//! The manual HTTP path and the daily timer both enter through
//! [`Dispatcher::dispatch_for_date`].

pub mod delay;
pub mod pipeline;
pub mod plan;
pub mod report;
pub mod sender;
pub mod tasks;
pub mod templates;
pub mod trigger;

pub use delay::DelayPolicy;
pub use pipeline::{DispatchOutcome, Dispatcher};
pub use plan::{DispatchPlan, DispatchPlanner, OutboundMessage, PlanOptions};
pub use report::{DispatchError, DispatchReport, ErrorKind};
pub use sender::{CancelFlag, NotificationSender};
pub use tasks::{TaskAnnouncement, TaskAnnouncer};
pub use trigger::DailyTrigger;
