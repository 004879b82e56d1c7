use super::fixture::{Match, MatchId};
use super::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub type DivisionId = Uuid;

/// Inclusive rank range with a presentation color and label.
///
/// Bands are matched in configured order and the first hit wins; overlap is
/// allowed and deliberately not validated, so the configured order carries
/// meaning and must be preserved as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankColorBand {
    pub from: u32,
    pub to: u32,
    pub color: String,
    pub label: String,
}

impl RankColorBand {
    pub fn new(from: u32, to: u32, color: impl Into<String>, label: impl Into<String>) -> Self {
        Self { from, to, color: color.into(), label: label.into() }
    }

    pub fn contains(&self, rank: u32) -> bool {
        self.from <= rank && rank <= self.to
    }
}

/// One division of a season: its teams, its fixture list, its rank band
/// configuration and the rank cache used for movement arrows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Division {
    pub id: DivisionId,

    pub name: String,

    #[serde(default)]
    pub emblem: Option<String>,

    /// Display order only; ranking never reads this order.
    pub teams: Vec<Team>,

    pub matches: Vec<Match>,

    #[serde(default)]
    pub rank_bands: Vec<RankColorBand>,

    /// Team id -> most recently published rank. Movement comparison cache
    /// only, never a source of truth.
    #[serde(default)]
    pub last_ranks: HashMap<TeamId, u32>,
}

impl Division {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            emblem: None,
            teams: Vec::new(),
            matches: Vec::new(),
            rank_bands: Vec::new(),
            last_ranks: HashMap::new(),
        }
    }

    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub fn team_mut(&mut self, team_id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == team_id)
    }

    pub fn match_by_id(&self, match_id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    /// Replace the fixture list wholesale with a freshly generated schedule.
    ///
    /// Destructive: every prior match record of this division is discarded,
    /// recorded results included. Confirmation is the caller's job.
    pub fn install_schedule(&mut self, fixtures: Vec<Match>) {
        log::info!(
            "division '{}': installing schedule with {} fixture(s), discarding {} existing",
            self.name,
            fixtures.len(),
            self.matches.len()
        );
        self.matches = fixtures;
    }

    /// Record a result for a fixture, stamping the entry time.
    /// Returns false if the match id is unknown.
    pub fn record_result(&mut self, match_id: MatchId, home_goals: u32, away_goals: u32) -> bool {
        let Some(m) = self.matches.iter_mut().find(|m| m.id == match_id) else {
            log::warn!("division '{}': result for unknown match {}", self.name, match_id);
            return false;
        };
        m.home_goals = Some(home_goals);
        m.away_goals = Some(away_goals);
        m.played_at = Some(chrono::Utc::now().timestamp_millis());
        true
    }

    /// Reset a fixture back to unplayed (goals and entry time cleared).
    pub fn clear_result(&mut self, match_id: MatchId) -> bool {
        let Some(m) = self.matches.iter_mut().find(|m| m.id == match_id) else {
            return false;
        };
        m.home_goals = None;
        m.away_goals = None;
        m.played_at = None;
        true
    }

    /// Highest round number present in the fixture list, at least 1.
    pub fn max_round(&self) -> u32 {
        self.matches.iter().map(|m| m.round.max(1)).max().unwrap_or(1)
    }

    pub fn matches_in_round(&self, round: u32) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.round == round).collect()
    }

    /// Played matches, most recently entered first (entry time desc, then
    /// round desc), capped at `limit`.
    pub fn latest_results(&self, limit: usize) -> Vec<&Match> {
        let mut played: Vec<&Match> = self.matches.iter().filter(|m| m.is_played()).collect();
        played.sort_by(|a, b| {
            let (ta, tb) = (a.played_at.unwrap_or(0), b.played_at.unwrap_or(0));
            tb.cmp(&ta).then_with(|| b.round.cmp(&a.round))
        });
        played.truncate(limit);
        played
    }

    /// Add a placeholder team. Any existing schedule goes stale; the caller
    /// decides when to regenerate.
    pub fn add_team(&mut self) -> TeamId {
        let team = Team::new(format!("Team{}", self.teams.len() + 1));
        let id = team.id;
        self.teams.push(team);
        id
    }

    /// Remove a team along with every fixture it appears in and its rank
    /// cache entry. Refused below the 2-team minimum.
    pub fn remove_team(&mut self, team_id: TeamId) -> bool {
        if self.teams.len() <= 2 {
            log::warn!("division '{}': refusing to drop below 2 teams", self.name);
            return false;
        }
        let before = self.teams.len();
        self.teams.retain(|t| t.id != team_id);
        if self.teams.len() == before {
            return false;
        }
        self.matches.retain(|m| !m.involves(team_id));
        self.last_ranks.remove(&team_id);
        true
    }

    /// Store just-published ranks for the next movement comparison.
    pub fn refresh_rank_cache(&mut self, ranks: impl IntoIterator<Item = (TeamId, u32)>) {
        self.last_ranks = ranks.into_iter().collect();
    }
}
