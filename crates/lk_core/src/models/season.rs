use super::division::{Division, DivisionId};
use super::fixture::Match;
use super::team::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub type SeasonId = Uuid;

/// One archived result row of a closed season's final table.
/// Form is deliberately dropped at archival; the record itself is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub team_id: TeamId,
    /// Name at archival time; later renames do not rewrite history.
    pub team_name: String,
    pub rank: u32,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl SnapshotRow {
    /// Fraction of played matches won, as a percentage.
    pub fn win_percentage(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.played) * 100.0
        }
    }
}

/// Immutable archive of one division's final standings plus its full match
/// list at season closure. Once appended it is never rewritten or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Season this snapshot was taken from.
    pub season_id: SeasonId,
    /// Season name at snapshot time.
    pub season_name: String,
    /// Unix milliseconds at closure.
    pub saved_at: i64,
    pub rows: Vec<SnapshotRow>,
    /// Full fixture list of the division at closure, results included.
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,

    pub name: String,

    /// Unix milliseconds of creation.
    pub created_at: i64,

    /// Unix milliseconds of closure; `None` while the season is active.
    pub closed_at: Option<i64>,

    pub divisions: Vec<Division>,

    /// Division id -> append-only snapshot list. Carried forward into the
    /// next season as an independently owned clone so old records stay
    /// reachable from the current season too.
    #[serde(default)]
    pub history: HashMap<DivisionId, Vec<Snapshot>>,
}

impl Season {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
            closed_at: None,
            divisions: Vec::new(),
            history: HashMap::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }

    pub fn division(&self, division_id: DivisionId) -> Option<&Division> {
        self.divisions.iter().find(|d| d.id == division_id)
    }

    pub fn division_mut(&mut self, division_id: DivisionId) -> Option<&mut Division> {
        self.divisions.iter_mut().find(|d| d.id == division_id)
    }

    /// Archived snapshots for one division, oldest first.
    pub fn snapshots(&self, division_id: DivisionId) -> &[Snapshot] {
        self.history.get(&division_id).map(Vec::as_slice).unwrap_or(&[])
    }
}
