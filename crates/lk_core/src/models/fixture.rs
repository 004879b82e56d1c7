use super::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type MatchId = Uuid;

/// A single fixture between two teams of the same division.
///
/// "Played" is exactly the pairing of both goal counts: a match with only
/// one count present is malformed writer output and is treated as unplayed
/// everywhere in the crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,

    /// 1-based round number.
    pub round: u32,

    pub home_id: TeamId,
    pub away_id: TeamId,

    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,

    /// Unix milliseconds of result entry; absent while unplayed.
    pub played_at: Option<i64>,
}

impl Match {
    /// Mint a fresh, unplayed fixture.
    pub fn unplayed(round: u32, home_id: TeamId, away_id: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            home_id,
            away_id,
            home_goals: None,
            away_goals: None,
            played_at: None,
        }
    }

    pub fn is_played(&self) -> bool {
        self.home_goals.is_some() && self.away_goals.is_some()
    }

    /// Both goal counts, or `None` while the match is (effectively) unplayed.
    pub fn score(&self) -> Option<(u32, u32)> {
        match (self.home_goals, self.away_goals) {
            (Some(h), Some(a)) => Some((h, a)),
            _ => None,
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_id == team_id || self.away_id == team_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_entered_score_is_unplayed() {
        let mut m = Match::unplayed(1, Uuid::new_v4(), Uuid::new_v4());
        m.home_goals = Some(2);

        assert!(!m.is_played());
        assert_eq!(m.score(), None);
    }

    #[test]
    fn test_score_pairing() {
        let mut m = Match::unplayed(3, Uuid::new_v4(), Uuid::new_v4());
        m.home_goals = Some(1);
        m.away_goals = Some(1);

        assert!(m.is_played());
        assert_eq!(m.score(), Some((1, 1)));
    }
}
