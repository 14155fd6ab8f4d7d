//! Maintenance team registry.
//!
//! Teams are keyed by a stable [`TeamId`], not by their position in any
//! iteration order — the rotation table references teams by this id, so
//! reordering or extending the catalog cannot silently reshuffle
//! assignments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable team identifier referenced by the rotation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One team member. The phone contact is the message destination: a bare
/// international-dialing numeric string with country code, no "+".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub name: String,
    pub phone: String,
}

/// A maintenance team with an ordered, non-empty member list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub name: String,
    pub members: Vec<Member>,
}

/// Immutable registry of teams, loaded once at startup.
#[derive(Debug, Clone)]
pub struct TeamCatalog {
    teams: BTreeMap<TeamId, Team>,
}

impl TeamCatalog {
    pub fn new(teams: BTreeMap<TeamId, Team>) -> Self {
        Self { teams }
    }

    /// The production PM team roster.
    pub fn builtin() -> Self {
        let mut teams = BTreeMap::new();
        teams.insert(TeamId(1), team("Tim 1", &[("Sahab", "6285920157602"), ("Ade", "6287778511596")]));
        teams.insert(TeamId(2), team("Tim 2", &[("Setiman", "6287771212492"), ("Suhaemi", "6282125458011")]));
        teams.insert(TeamId(3), team("Tim 3", &[("Asmara", "6287811223995"), ("Rifki", "6287770878765")]));
        teams.insert(TeamId(4), team("Tim 4", &[("Rijal", "6287880855311"), ("Yanto", "6285956157199")]));
        Self::new(teams)
    }

    pub fn get(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TeamId, &Team)> {
        self.teams.iter()
    }
}

fn team(name: &str, members: &[(&str, &str)]) -> Team {
    Team {
        name: name.to_string(),
        members: members
            .iter()
            .map(|(name, phone)| Member {
                name: name.to_string(),
                phone: phone.to_string(),
            })
            .collect(),
    }
}
