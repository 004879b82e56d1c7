//! Rank band classification: map a table position to its configured zone.

use crate::models::RankColorBand;

/// First band (in configured order) whose inclusive range contains `rank`.
///
/// Overlap and coverage are not validated; the configured order is the
/// tie-breaker, so callers must preserve band order exactly as entered.
pub fn classify(bands: &[RankColorBand], rank: u32) -> Option<&RankColorBand> {
    bands.iter().find(|band| band.contains(rank))
}
