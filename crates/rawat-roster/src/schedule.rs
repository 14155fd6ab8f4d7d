//! The 4-week rotation table.
//!
//! Keys are (cycle week, weekday); Saturday and Sunday are intentionally
//! absent, as is any weekday the roster leaves unmapped — looking those up
//! yields "nothing scheduled", never an error.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::teams::TeamId;

/// One of the 4 repeating rotation phases. Always in `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CycleWeek(pub u8);

impl CycleWeek {
    pub fn new(week: u8) -> Option<Self> {
        (1..=4).contains(&week).then_some(Self(week))
    }
}

impl std::fmt::Display for CycleWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reference pair in a slot: resolved to full Asset/Team objects at
/// query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPair {
    pub asset_id: u32,
    pub team_id: TeamId,
}

/// Immutable mapping {cycle week, Mon..Fri} → ordered asset/team pairs.
#[derive(Debug, Clone)]
pub struct RotationSchedule {
    slots: BTreeMap<(u8, u8), Vec<SlotPair>>,
}

impl RotationSchedule {
    /// The production rotation: weeks 1-4 × Mon-Fri, two pairs per day,
    /// covering the full asset roster over 4 weeks.
    pub fn builtin() -> Self {
        use Weekday::*;
        let mut schedule = Self {
            slots: BTreeMap::new(),
        };

        // Week 1
        schedule.insert(1, Mon, &[(1, 1), (6, 2)]);
        schedule.insert(1, Tue, &[(2, 2), (7, 3)]);
        schedule.insert(1, Wed, &[(3, 3), (8, 4)]);
        schedule.insert(1, Thu, &[(4, 4), (9, 1)]);
        schedule.insert(1, Fri, &[(5, 1), (10, 2)]);

        // Week 2
        schedule.insert(2, Mon, &[(11, 2), (16, 3)]);
        schedule.insert(2, Tue, &[(12, 3), (17, 4)]);
        schedule.insert(2, Wed, &[(13, 4), (18, 1)]);
        schedule.insert(2, Thu, &[(14, 1), (19, 2)]);
        schedule.insert(2, Fri, &[(15, 2), (20, 3)]);

        // Week 3
        schedule.insert(3, Mon, &[(21, 3), (26, 4)]);
        schedule.insert(3, Tue, &[(22, 4), (27, 1)]);
        schedule.insert(3, Wed, &[(23, 1), (28, 2)]);
        schedule.insert(3, Thu, &[(24, 2), (29, 3)]);
        schedule.insert(3, Fri, &[(25, 3), (30, 4)]);

        // Week 4
        schedule.insert(4, Mon, &[(31, 4), (1, 1)]);
        schedule.insert(4, Tue, &[(32, 1), (2, 2)]);
        schedule.insert(4, Wed, &[(1, 2), (3, 3)]);
        schedule.insert(4, Thu, &[(2, 3), (4, 4)]);
        schedule.insert(4, Fri, &[(3, 4), (1, 1)]);

        schedule
    }

    fn insert(&mut self, week: u8, day: Weekday, pairs: &[(u32, u8)]) {
        self.slots.insert(
            (week, day.num_days_from_monday() as u8),
            pairs
                .iter()
                .map(|&(asset_id, team_id)| SlotPair {
                    asset_id,
                    team_id: TeamId(team_id),
                })
                .collect(),
        );
    }

    /// Look up the pairs active on (cycle week, weekday). `None` for
    /// weekends and unmapped days.
    pub fn slot(&self, week: CycleWeek, day: Weekday) -> Option<&[SlotPair]> {
        self.slots
            .get(&(week.0, day.num_days_from_monday() as u8))
            .map(|v| v.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday::*;

    #[test]
    fn test_all_twenty_slots_present() {
        let schedule = RotationSchedule::builtin();
        for week in 1..=4 {
            for day in [Mon, Tue, Wed, Thu, Fri] {
                let slot = schedule.slot(CycleWeek(week), day);
                assert!(slot.is_some(), "missing slot week {week} {day:?}");
                assert_eq!(slot.unwrap().len(), 2);
            }
        }
    }

    #[test]
    fn test_weekends_are_unmapped() {
        let schedule = RotationSchedule::builtin();
        for week in 1..=4 {
            assert!(schedule.slot(CycleWeek(week), Sat).is_none());
            assert!(schedule.slot(CycleWeek(week), Sun).is_none());
        }
    }

    #[test]
    fn test_week1_monday_pairs() {
        let schedule = RotationSchedule::builtin();
        let slot = schedule.slot(CycleWeek(1), Mon).unwrap();
        assert_eq!(slot[0], SlotPair { asset_id: 1, team_id: TeamId(1) });
        assert_eq!(slot[1], SlotPair { asset_id: 6, team_id: TeamId(2) });
    }

    #[test]
    fn test_cycle_week_bounds() {
        assert!(CycleWeek::new(0).is_none());
        assert!(CycleWeek::new(5).is_none());
        assert_eq!(CycleWeek::new(4), Some(CycleWeek(4)));
    }
}
