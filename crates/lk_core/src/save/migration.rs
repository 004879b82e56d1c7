use super::error::SaveError;
use super::format::LeagueSave;
use super::SAVE_VERSION;
use std::collections::HashSet;

/// Migrate save data from older versions to the current version.
pub fn migrate_save(mut save: LeagueSave) -> Result<LeagueSave, SaveError> {
    let original_version = save.version;

    // Apply migrations step by step
    save = match save.version {
        0 => migrate_v0_to_v1(save)?,
        1 => save, // Current version, no migration needed
        v if v > SAVE_VERSION => {
            // Future version - might be compatible
            log::warn!("Loading save from future version {} (current: {})", v, SAVE_VERSION);
            save
        }
        _ => {
            return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
        }
    };

    // Update to current version
    save.version = SAVE_VERSION;
    save.update_timestamp();

    if original_version != SAVE_VERSION {
        log::info!("Migrated save from version {} to {}", original_version, SAVE_VERSION);
    }

    save.validate()?;
    Ok(save)
}

/// Migrate from version 0 (the untyped browser-era document) to version 1.
fn migrate_v0_to_v1(mut save: LeagueSave) -> Result<LeagueSave, SaveError> {
    log::info!("Migrating save from version 0 to 1");

    for league in &mut save.leagues {
        for season in &mut league.seasons {
            for division in &mut season.divisions {
                let team_ids: HashSet<_> = division.teams.iter().map(|t| t.id).collect();

                // 1. Drop matches orphaned by team deletions
                let before = division.matches.len();
                division.matches.retain(|m| {
                    team_ids.contains(&m.home_id) && team_ids.contains(&m.away_id)
                });
                if division.matches.len() != before {
                    log::warn!(
                        "division '{}': dropped {} orphaned match(es)",
                        division.name,
                        before - division.matches.len()
                    );
                }

                for m in &mut division.matches {
                    // 2. Half-entered scores are writer bugs; reset to unplayed
                    if m.home_goals.is_some() != m.away_goals.is_some() {
                        log::warn!("match {}: clearing half-entered score", m.id);
                        m.home_goals = None;
                        m.away_goals = None;
                        m.played_at = None;
                    }
                    // 3. Round numbers are 1-based
                    if m.round == 0 {
                        m.round = 1;
                    }
                }

                // 4. Rank cache may reference deleted teams
                division.last_ranks.retain(|team_id, _| team_ids.contains(team_id));
            }
        }
    }

    // 5. Repair a dangling selection with the first-of-each-level chain
    let selection = &mut save.selection;
    let league = match save.leagues.iter().find(|l| l.id == selection.league_id) {
        Some(l) => l,
        None => {
            let Some(first) = save.leagues.first() else {
                return Err(SaveError::Corrupted);
            };
            log::warn!("selection pointed at unknown league, resetting");
            selection.league_id = first.id;
            first
        }
    };
    let season = match league.seasons.iter().find(|s| s.id == selection.season_id) {
        Some(s) => s,
        None => {
            let Some(first) = league.seasons.first() else {
                return Err(SaveError::Corrupted);
            };
            selection.season_id = first.id;
            first
        }
    };
    if !season.divisions.iter().any(|d| d.id == selection.division_id) {
        let Some(first) = season.divisions.first() else {
            return Err(SaveError::Corrupted);
        };
        selection.division_id = first.id;
    }
    selection.round = selection.round.max(1);

    Ok(save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Match;
    use crate::state::LeagueState;
    use uuid::Uuid;

    fn v0_save() -> LeagueSave {
        let mut save = LeagueState::seeded().to_save();
        save.version = 0;
        save
    }

    #[test]
    fn test_current_version_passes_through() {
        let save = LeagueState::seeded().to_save();
        let migrated = migrate_save(save).unwrap();
        assert_eq!(migrated.version, SAVE_VERSION);
    }

    #[test]
    fn test_v0_drops_orphaned_matches() {
        let mut save = v0_save();
        let division = &mut save.leagues[0].seasons[0].divisions[0];
        let known = division.teams[0].id;
        division.matches.push(Match::unplayed(1, known, Uuid::new_v4()));

        let migrated = migrate_save(save).unwrap();
        assert!(migrated.leagues[0].seasons[0].divisions[0].matches.is_empty());
    }

    #[test]
    fn test_v0_clears_half_entered_scores() {
        let mut save = v0_save();
        let division = &mut save.leagues[0].seasons[0].divisions[0];
        let (a, b) = (division.teams[0].id, division.teams[1].id);
        let mut m = Match::unplayed(0, a, b);
        m.home_goals = Some(3); // away goals missing
        m.played_at = Some(123);
        division.matches.push(m);

        let migrated = migrate_save(save).unwrap();
        let m = &migrated.leagues[0].seasons[0].divisions[0].matches[0];
        assert!(m.home_goals.is_none() && m.away_goals.is_none());
        assert!(m.played_at.is_none());
        assert_eq!(m.round, 1);
    }

    #[test]
    fn test_v0_repairs_dangling_selection() {
        let mut save = v0_save();
        save.selection.league_id = Uuid::new_v4();
        save.selection.division_id = Uuid::new_v4();
        save.selection.round = 0;

        let migrated = migrate_save(save).unwrap();
        assert_eq!(migrated.selection.league_id, migrated.leagues[0].id);
        assert_eq!(
            migrated.selection.division_id,
            migrated.leagues[0].seasons[0].divisions[0].id
        );
        assert_eq!(migrated.selection.round, 1);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        // Versions between known ones (none today) and below zero cannot
        // occur; anything unknown but non-future must fail loudly.
        let mut save = LeagueState::seeded().to_save();
        save.version = 1;
        assert!(migrate_save(save).is_ok());
    }

    #[test]
    fn test_future_version_is_kept_with_warning() {
        let mut save = LeagueState::seeded().to_save();
        save.version = SAVE_VERSION + 5;
        let migrated = migrate_save(save).unwrap();
        assert_eq!(migrated.version, SAVE_VERSION);
    }
}
