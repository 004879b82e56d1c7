//! Standings computation: folds recorded results into a deterministically
//! ordered table with points, goal difference, recent form and 1-based
//! ranks.

pub mod bands;
pub mod movement;

use crate::models::{Match, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

pub const POINTS_WIN: u32 = 3;
pub const POINTS_DRAW: u32 = 1;

/// How many results the recent-form window keeps per team.
pub const FORM_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormToken {
    Win,
    Draw,
    Loss,
}

/// One row of a computed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
    /// Up to the last five results, most recent first.
    pub form: Vec<FormToken>,
    /// 1-based table position. Equal records still get distinct ranks via
    /// the name tie-break; shared ranks are deliberately not produced.
    pub rank: u32,
}

impl TeamStanding {
    fn zeroed(team: &Team) -> Self {
        Self {
            team_id: team.id,
            name: team.name.clone(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            form: Vec::new(),
            rank: 0,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        let token = match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.wins += 1;
                self.points += POINTS_WIN;
                FormToken::Win
            }
            Ordering::Less => {
                self.losses += 1;
                FormToken::Loss
            }
            Ordering::Equal => {
                self.draws += 1;
                self.points += POINTS_DRAW;
                FormToken::Draw
            }
        };
        self.form.push(token);
    }
}

/// Compute the ranked table for a set of teams and their match list.
///
/// Only matches with both goal counts present are counted; matches that
/// reference a team id outside `teams` are orphans from a prior deletion
/// and are skipped. Teams with no counted matches keep all-zero statistics
/// and sort below everyone with points, ordered among themselves by name.
///
/// Pure and reentrant: identical inputs produce an identical ordered table.
pub fn compute_table(teams: &[Team], matches: &[Match]) -> Vec<TeamStanding> {
    let mut stats: HashMap<TeamId, TeamStanding> =
        teams.iter().map(|t| (t.id, TeamStanding::zeroed(t))).collect();

    // Chronological fold order decides which results count as "recent" for
    // form, independent of storage order.
    let mut played: Vec<&Match> = matches.iter().filter(|m| m.is_played()).collect();
    played.sort_by(|a, b| {
        let (ta, tb) = (a.played_at.unwrap_or(0), b.played_at.unwrap_or(0));
        ta.cmp(&tb).then_with(|| a.round.cmp(&b.round))
    });

    for m in played {
        let Some((home_goals, away_goals)) = m.score() else { continue };
        if !stats.contains_key(&m.home_id) || !stats.contains_key(&m.away_id) {
            log::debug!("skipping match {} with unknown team reference", m.id);
            continue;
        }
        if let Some(home) = stats.get_mut(&m.home_id) {
            home.record(home_goals, away_goals);
        }
        if let Some(away) = stats.get_mut(&m.away_id) {
            away.record(away_goals, home_goals);
        }
    }

    let mut rows: Vec<TeamStanding> = stats.into_values().collect();
    for row in &mut rows {
        row.goal_difference = i64::from(row.goals_for) - i64::from(row.goals_against);
        // Keep the last results only, newest first.
        if row.form.len() > FORM_WINDOW {
            row.form.drain(..row.form.len() - FORM_WINDOW);
        }
        row.form.reverse();
    }

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
            .then_with(|| compare_names(&a.name, &b.name))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index as u32 + 1;
    }
    rows
}

/// Case-insensitive lexical compare with a case-sensitive fallback, so
/// ordering stays total without locale tables.
fn compare_names(a: &str, b: &str) -> Ordering {
    let lowered = a.to_lowercase().cmp(&b.to_lowercase());
    lowered.then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Team;
    use uuid::Uuid;

    fn teams(names: &[&str]) -> Vec<Team> {
        names.iter().map(|n| Team::new(*n)).collect()
    }

    fn played(round: u32, home: TeamId, away: TeamId, hg: u32, ag: u32, at: i64) -> Match {
        let mut m = Match::unplayed(round, home, away);
        m.home_goals = Some(hg);
        m.away_goals = Some(ag);
        m.played_at = Some(at);
        m
    }

    #[test]
    fn test_single_result_record() {
        let ts = teams(&["A", "B"]);
        let (a, b) = (ts[0].id, ts[1].id);
        let table = compute_table(&ts, &[played(1, a, b, 3, 1, 10)]);

        let row_a = table.iter().find(|r| r.team_id == a).unwrap();
        assert_eq!((row_a.played, row_a.wins, row_a.points), (1, 1, 3));
        assert_eq!(row_a.goal_difference, 2);
        assert_eq!(row_a.rank, 1);
        assert_eq!(row_a.form, vec![FormToken::Win]);

        let row_b = table.iter().find(|r| r.team_id == b).unwrap();
        assert_eq!((row_b.played, row_b.losses, row_b.points), (1, 1, 0));
        assert_eq!(row_b.goal_difference, -2);
        assert_eq!(row_b.rank, 2);
    }

    #[test]
    fn test_points_and_goal_difference_invariants() {
        let ts = teams(&["A", "B", "C", "D"]);
        let ids: Vec<TeamId> = ts.iter().map(|t| t.id).collect();
        let matches = vec![
            played(1, ids[0], ids[1], 2, 2, 1),
            played(1, ids[2], ids[3], 1, 0, 2),
            played(2, ids[0], ids[2], 0, 3, 3),
            played(2, ids[1], ids[3], 4, 1, 4),
        ];
        let table = compute_table(&ts, &matches);

        for row in &table {
            assert_eq!(row.points, 3 * row.wins + row.draws);
            assert_eq!(
                row.goal_difference,
                i64::from(row.goals_for) - i64::from(row.goals_against)
            );
        }
        let total_played: u32 = table.iter().map(|r| r.played).sum();
        assert_eq!(total_played, 2 * matches.len() as u32);
    }

    #[test]
    fn test_idempotent_ordering() {
        let ts = teams(&["North", "South", "East", "West"]);
        let ids: Vec<TeamId> = ts.iter().map(|t| t.id).collect();
        let matches = vec![
            played(1, ids[0], ids[1], 1, 1, 5),
            played(1, ids[2], ids[3], 2, 2, 5),
        ];
        let first = compute_table(&ts, &matches);
        let second = compute_table(&ts, &matches);
        assert_eq!(first, second);
    }

    #[test]
    fn test_name_tie_break() {
        // Identical points, goal difference and goals-for on every side.
        let ts = teams(&["zeta", "Alpha"]);
        let (z, a) = (ts[0].id, ts[1].id);
        let table = compute_table(&ts, &[played(1, z, a, 1, 1, 1)]);

        assert_eq!(table[0].name, "Alpha");
        assert_eq!(table[0].rank, 1);
        assert_eq!(table[1].name, "zeta");
        assert_eq!(table[1].rank, 2);
    }

    #[test]
    fn test_zero_played_teams_rank_below_scorers_by_name() {
        let ts = teams(&["Busy", "Rival", "zulu", "Echo"]);
        let (busy, rival) = (ts[0].id, ts[1].id);
        // Only Busy and Rival play; zulu and Echo stay at all zeros and are
        // ordered among themselves by name, case-insensitively.
        let table = compute_table(&ts, &[played(1, busy, rival, 1, 0, 1)]);

        assert_eq!(table[0].name, "Busy");
        assert_eq!(table[1].name, "Echo");
        assert_eq!(table[2].name, "zulu");
        assert_eq!(table[3].name, "Rival");
        assert!(table[1].played == 0 && table[2].played == 0);
    }

    #[test]
    fn test_form_window_keeps_last_five_newest_first() {
        let ts = teams(&["A", "B"]);
        let (a, b) = (ts[0].id, ts[1].id);
        let mut matches = Vec::new();
        // A: W W W D L L over six results; window keeps W W D L L,
        // reversed to newest-first L L D W W.
        let scores = [(1, 0), (2, 0), (3, 0), (1, 1), (0, 1), (0, 2)];
        for (i, (hg, ag)) in scores.iter().enumerate() {
            matches.push(played(i as u32 + 1, a, b, *hg, *ag, i as i64));
        }
        let table = compute_table(&ts, &matches);
        let row_a = table.iter().find(|r| r.team_id == a).unwrap();
        assert_eq!(
            row_a.form,
            vec![
                FormToken::Loss,
                FormToken::Loss,
                FormToken::Draw,
                FormToken::Win,
                FormToken::Win
            ]
        );
    }

    #[test]
    fn test_form_order_follows_entry_time_not_storage_order() {
        let ts = teams(&["A", "B"]);
        let (a, b) = (ts[0].id, ts[1].id);
        // Stored newest-entered first; the fold must reorder by played_at.
        let matches = vec![
            played(2, a, b, 0, 1, 200), // entered later: loss for A
            played(1, a, b, 1, 0, 100), // entered earlier: win for A
        ];
        let table = compute_table(&ts, &matches);
        let row_a = table.iter().find(|r| r.team_id == a).unwrap();
        assert_eq!(row_a.form, vec![FormToken::Loss, FormToken::Win]);
    }

    #[test]
    fn test_wire_format_uses_lowercase_tokens() {
        let ts = teams(&["A", "B"]);
        let (a, b) = (ts[0].id, ts[1].id);
        let table = compute_table(&ts, &[played(1, a, b, 2, 0, 1)]);
        let row = table.iter().find(|r| r.team_id == a).unwrap();

        let json = serde_json::to_value(row).unwrap();
        assert_eq!(json["form"][0], "win");
        assert_eq!(json["rank"], 1);
    }

    #[test]
    fn test_orphaned_match_is_skipped() {
        let ts = teams(&["A", "B"]);
        let a = ts[0].id;
        let ghost = Uuid::new_v4();
        let table = compute_table(&ts, &[played(1, a, ghost, 5, 0, 1)]);

        for row in &table {
            assert_eq!(row.played, 0);
            assert_eq!(row.points, 0);
        }
    }

    #[test]
    fn test_half_entered_score_is_not_counted() {
        let ts = teams(&["A", "B"]);
        let (a, b) = (ts[0].id, ts[1].id);
        let mut m = Match::unplayed(1, a, b);
        m.home_goals = Some(2); // away side missing
        let table = compute_table(&ts, &[m]);

        assert!(table.iter().all(|r| r.played == 0));
    }
}
