//! The pure date→assignment resolver.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use rawat_core::error::{RawatError, Result};

use crate::assets::{Asset, AssetCatalog};
use crate::calendar;
use crate::schedule::RotationSchedule;
use crate::teams::{Team, TeamCatalog};

/// One asset/team pairing for a specific date. Transient — computed fresh
/// per query, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAssignment {
    pub asset: Asset,
    pub team: Team,
    pub week_in_year: u32,
    pub week_in_cycle: u8,
    /// The queried date as an ISO calendar-date string.
    pub date: String,
}

/// The full resolution result for one date.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: String,
    pub day_name: String,
    pub week_number: u32,
    pub week_in_cycle: u8,
    pub assignments: Vec<ResolvedAssignment>,
}

/// Resolves calendar dates against the static catalogs and rotation table.
///
/// Safe to call concurrently and repeatedly: no I/O, no mutation.
#[derive(Debug, Clone)]
pub struct AssignmentResolver {
    assets: AssetCatalog,
    teams: TeamCatalog,
    schedule: RotationSchedule,
}

impl AssignmentResolver {
    pub fn new(assets: AssetCatalog, teams: TeamCatalog, schedule: RotationSchedule) -> Self {
        Self {
            assets,
            teams,
            schedule,
        }
    }

    /// Resolver over the built-in production tables.
    pub fn builtin() -> Self {
        Self::new(
            AssetCatalog::builtin(),
            TeamCatalog::builtin(),
            RotationSchedule::builtin(),
        )
    }

    /// Resolve the assignments for a calendar date.
    ///
    /// Weekends and unmapped weekdays yield `NoAssignment` (a valid empty
    /// day, not a failure). A rotation pair pointing at a missing asset or
    /// team is a configuration fault and fails loudly.
    pub fn resolve(&self, date: NaiveDate) -> Result<DaySchedule> {
        let weekday = date.weekday();
        let week_number = calendar::iso_week_number(date);
        let cycle_week = calendar::cycle_week_for(date);

        let Some(pairs) = self.schedule.slot(cycle_week, weekday) else {
            return Err(RawatError::NoAssignment(
                "No assignments for the specified date (weekend or holiday)".into(),
            ));
        };

        let date_string = date.format("%Y-%m-%d").to_string();
        let mut assignments = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let asset = self.assets.get(pair.asset_id).ok_or_else(|| {
                RawatError::Config(format!(
                    "Rotation table references unknown asset id {}",
                    pair.asset_id
                ))
            })?;
            let team = self.teams.get(pair.team_id).ok_or_else(|| {
                RawatError::Config(format!(
                    "Rotation table references unknown team id {}",
                    pair.team_id
                ))
            })?;
            assignments.push(ResolvedAssignment {
                asset: asset.clone(),
                team: team.clone(),
                week_in_year: week_number,
                week_in_cycle: cycle_week.0,
                date: date_string.clone(),
            });
        }

        Ok(DaySchedule {
            date: date_string,
            day_name: calendar::day_name_id(weekday).to_string(),
            week_number,
            week_in_cycle: cycle_week.0,
            assignments,
        })
    }

    /// Resolve from a caller-supplied `YYYY-MM-DD` string.
    pub fn resolve_str(&self, date: &str) -> Result<DaySchedule> {
        self.resolve(calendar::parse_date(date)?)
    }
}
