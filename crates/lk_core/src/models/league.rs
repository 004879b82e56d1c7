use super::season::{Season, SeasonId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type LeagueId = Uuid;

/// A league owns its seasons in chronological order; the last season is the
/// current one unless a caller selects otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,

    pub name: String,

    #[serde(default)]
    pub emblem: Option<String>,

    pub seasons: Vec<Season>,
}

impl League {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), emblem: None, seasons: Vec::new() }
    }

    pub fn season(&self, season_id: SeasonId) -> Option<&Season> {
        self.seasons.iter().find(|s| s.id == season_id)
    }

    pub fn season_mut(&mut self, season_id: SeasonId) -> Option<&mut Season> {
        self.seasons.iter_mut().find(|s| s.id == season_id)
    }

    pub fn current_season(&self) -> Option<&Season> {
        self.seasons.last()
    }

    pub fn current_season_mut(&mut self) -> Option<&mut Season> {
        self.seasons.last_mut()
    }
}
