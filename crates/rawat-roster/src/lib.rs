//! # Rawat Roster
//!
//! The deterministic heart of the scheduler: static reference data (assets,
//! teams, the 4-week rotation table) and the pure date→assignment resolver.
//!
//! Nothing in this crate performs I/O. Resolving the same date twice yields
//! identical results; assignments are always recomputed, never persisted.

pub mod assets;
pub mod calendar;
pub mod resolver;
pub mod schedule;
pub mod teams;

pub use assets::{Asset, AssetCatalog};
pub use calendar::{cycle_week_for, parse_date};
pub use resolver::{AssignmentResolver, DaySchedule, ResolvedAssignment};
pub use schedule::{CycleWeek, RotationSchedule, SlotPair};
pub use teams::{Member, Team, TeamCatalog, TeamId};
