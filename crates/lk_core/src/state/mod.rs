//! Caller-held runtime state.
//!
//! `LeagueState` is the whole in-memory object graph plus the caller's
//! current selection. It is a plain value the embedding application owns
//! and threads through calls; the core keeps no global state. Conversion
//! to and from the persisted document goes through `to_save`/`from_save`.

use crate::history;
use crate::models::{
    Division, DivisionId, League, LeagueId, RankColorBand, Season, SeasonId, Team, TeamId,
};
use crate::save::LeagueSave;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which league/season/division/round the caller is looking at.
///
/// Dangling ids are tolerated: every accessor falls back to the first
/// element of its level, and `normalize` rewrites the selection to whatever
/// actually resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub league_id: LeagueId,
    pub season_id: SeasonId,
    pub division_id: DivisionId,
    pub round: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueState {
    pub leagues: Vec<League>,
    pub selection: Selection,
}

impl Default for LeagueState {
    fn default() -> Self {
        Self::seeded()
    }
}

impl LeagueState {
    /// Starter state: one league, one season, one division with eight
    /// placeholder teams and the stock rank bands.
    pub fn seeded() -> Self {
        let mut division = Division::new("Div.1");
        for _ in 0..8 {
            division.add_team();
        }
        division.rank_bands = vec![
            RankColorBand::new(1, 1, "#FFD94A", "Champion"),
            RankColorBand::new(2, 4, "#6EF2FF", "Promotion/Playoff"),
            RankColorBand::new(7, 7, "#FFB84A", "Relegation playoff"),
            RankColorBand::new(8, 8, "#FF6A6A", "Relegation"),
        ];

        let mut season = Season::new("Season 1");
        let division_id = division.id;
        season.divisions.push(division);

        let mut league = League::new("League 1");
        let (league_id, season_id) = (league.id, season.id);
        league.seasons.push(season);

        Self {
            leagues: vec![league],
            selection: Selection { league_id, season_id, division_id, round: 1 },
        }
    }

    // ========================
    // Selection resolution
    // ========================

    pub fn league(&self) -> Option<&League> {
        self.leagues
            .iter()
            .find(|l| l.id == self.selection.league_id)
            .or_else(|| self.leagues.first())
    }

    pub fn league_mut(&mut self) -> Option<&mut League> {
        let id = self.selection.league_id;
        if self.leagues.iter().any(|l| l.id == id) {
            self.leagues.iter_mut().find(|l| l.id == id)
        } else {
            self.leagues.first_mut()
        }
    }

    pub fn season(&self) -> Option<&Season> {
        let league = self.league()?;
        league.season(self.selection.season_id).or_else(|| league.seasons.first())
    }

    pub fn season_mut(&mut self) -> Option<&mut Season> {
        let id = self.selection.season_id;
        let league = self.league_mut()?;
        if league.seasons.iter().any(|s| s.id == id) {
            league.season_mut(id)
        } else {
            league.seasons.first_mut()
        }
    }

    pub fn division(&self) -> Option<&Division> {
        let season = self.season()?;
        season.division(self.selection.division_id).or_else(|| season.divisions.first())
    }

    pub fn division_mut(&mut self) -> Option<&mut Division> {
        let id = self.selection.division_id;
        let season = self.season_mut()?;
        if season.divisions.iter().any(|d| d.id == id) {
            season.division_mut(id)
        } else {
            season.divisions.first_mut()
        }
    }

    /// A team of the currently selected division.
    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.division()?.team(team_id)
    }

    /// Rewrite the selection to whatever the fallback chain resolved, and
    /// clamp the round into the selected division's schedule.
    pub fn normalize(&mut self) {
        if let Some(id) = self.league().map(|l| l.id) {
            self.selection.league_id = id;
        }
        if let Some(id) = self.season().map(|s| s.id) {
            self.selection.season_id = id;
        }
        if let Some(id) = self.division().map(|d| d.id) {
            self.selection.division_id = id;
        }
        let max_round = self.division().map(Division::max_round).unwrap_or(1);
        self.selection.round = self.selection.round.clamp(1, max_round);
    }

    // ========================
    // League bookkeeping
    // ========================

    /// Add a league seeded with one season, one division and eight
    /// placeholder teams, and select it.
    pub fn add_league(&mut self) -> LeagueId {
        let mut division = Division::new("Div.1");
        for _ in 0..8 {
            division.add_team();
        }
        let mut season = Season::new("Season 1");
        let division_id = division.id;
        season.divisions.push(division);

        let mut league = League::new(format!("League {}", self.leagues.len() + 1));
        let (league_id, season_id) = (league.id, season.id);
        league.seasons.push(season);
        self.leagues.push(league);

        self.selection = Selection { league_id, season_id, division_id, round: 1 };
        log::info!("added league {}", league_id);
        league_id
    }

    /// Remove a league; the last remaining league cannot be removed.
    pub fn remove_league(&mut self, league_id: LeagueId) -> bool {
        if self.leagues.len() <= 1 {
            log::warn!("refusing to remove the last league");
            return false;
        }
        let before = self.leagues.len();
        self.leagues.retain(|l| l.id != league_id);
        if self.leagues.len() == before {
            return false;
        }
        self.selection.league_id = Uuid::nil();
        self.selection.round = 1;
        self.normalize();
        true
    }

    /// Close the selected season and roll it forward into a fresh one,
    /// selecting the new season. Closure itself is done separately via
    /// `close_season`; this only creates and selects the successor.
    pub fn roll_season_forward(&mut self) -> Option<SeasonId> {
        let season_count = self.league()?.seasons.len();
        let next = history::roll_forward(self.season()?, season_count);
        let season_id = next.id;
        let division_id = next.divisions.first().map(|d| d.id).unwrap_or(season_id);

        self.league_mut()?.seasons.push(next);
        self.selection.season_id = season_id;
        self.selection.division_id = division_id;
        self.selection.round = 1;
        Some(season_id)
    }

    /// Close the selected season, archiving snapshots. See
    /// [`history::close_season`] for re-closure semantics.
    pub fn close_selected_season(&mut self) -> Option<usize> {
        self.season_mut().map(history::close_season)
    }

    /// Remove a season from the selected league; the last season stays.
    pub fn remove_season(&mut self, season_id: SeasonId) -> bool {
        let Some(league) = self.league_mut() else { return false };
        if league.seasons.len() <= 1 {
            log::warn!("refusing to remove the last season");
            return false;
        }
        let before = league.seasons.len();
        league.seasons.retain(|s| s.id != season_id);
        if league.seasons.len() == before {
            return false;
        }
        // Fall back to the most recent remaining season.
        let fallback =
            league.seasons.last().map(|s| (s.id, s.divisions.first().map(|d| d.id)));
        if let Some((season_id, division_id)) = fallback {
            self.selection.season_id = season_id;
            self.selection.division_id = division_id.unwrap_or_else(Uuid::nil);
        }
        self.selection.round = 1;
        self.normalize();
        true
    }

    /// Add an empty division to the selected season and select it.
    pub fn add_division(&mut self) -> Option<DivisionId> {
        let season = self.season_mut()?;
        let division = Division::new(format!("Div.{}", season.divisions.len() + 1));
        let division_id = division.id;
        season.divisions.push(division);
        self.selection.division_id = division_id;
        Some(division_id)
    }

    /// Remove a division from the selected season; the last division stays.
    pub fn remove_division(&mut self, division_id: DivisionId) -> bool {
        let Some(season) = self.season_mut() else { return false };
        if season.divisions.len() <= 1 {
            log::warn!("refusing to remove the last division");
            return false;
        }
        let before = season.divisions.len();
        season.divisions.retain(|d| d.id != division_id);
        if season.divisions.len() == before {
            return false;
        }
        self.selection.division_id = Uuid::nil();
        self.selection.round = 1;
        self.normalize();
        true
    }

    // ========================
    // Persistence conversion
    // ========================

    pub fn to_save(&self) -> LeagueSave {
        LeagueSave {
            version: crate::save::SAVE_VERSION,
            timestamp: crate::save::format::current_timestamp(),
            leagues: self.leagues.clone(),
            selection: self.selection,
        }
    }

    pub fn from_save(save: &LeagueSave) -> Self {
        let mut state =
            Self { leagues: save.leagues.clone(), selection: save.selection };
        state.normalize();
        state
    }
}
