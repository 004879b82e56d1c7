//! Rank movement: diff a fresh table against the previously cached ranks.
//!
//! Purely a comparison; persisting the new ranks for the next diff is the
//! caller's job (`Division::refresh_rank_cache`).

use super::TeamStanding;
use crate::models::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Same,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub direction: Direction,
    /// Positions moved; 0 for `Same` and for teams with no prior rank.
    pub delta: u32,
}

impl Movement {
    const NONE: Movement = Movement { direction: Direction::Same, delta: 0 };
}

/// Classify every table row against the previous rank map.
///
/// A team absent from `previous` has no basis for comparison (first table
/// after creation or roll-forward) and is classified `Same`. Lower rank
/// numbers are better, so current < previous means `Up`.
pub fn classify(
    previous: &HashMap<TeamId, u32>,
    table: &[TeamStanding],
) -> HashMap<TeamId, Movement> {
    table
        .iter()
        .map(|row| {
            let movement = match previous.get(&row.team_id) {
                None => Movement::NONE,
                Some(&prev) if row.rank < prev => {
                    Movement { direction: Direction::Up, delta: prev - row.rank }
                }
                Some(&prev) if row.rank > prev => {
                    Movement { direction: Direction::Down, delta: row.rank - prev }
                }
                Some(_) => Movement::NONE,
            };
            (row.team_id, movement)
        })
        .collect()
}
