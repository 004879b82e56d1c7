//! Season archival: closing a season into immutable snapshots, rolling a
//! season forward, and reading archived records back out.

use crate::models::{
    Division, DivisionId, League, Season, SeasonId, Snapshot, SnapshotRow, TeamId,
};
use crate::standings::{self, TeamStanding};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One line of a club's cross-season record, read from the archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubSeasonRecord {
    pub season_id: SeasonId,
    pub season_name: String,
    pub division_name: String,
    pub rank: u32,
    pub points: u32,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub win_percentage: f64,
}

fn snapshot_row(standing: &TeamStanding) -> SnapshotRow {
    SnapshotRow {
        team_id: standing.team_id,
        team_name: standing.name.clone(),
        rank: standing.rank,
        played: standing.played,
        wins: standing.wins,
        draws: standing.draws,
        losses: standing.losses,
        goals_for: standing.goals_for,
        goals_against: standing.goals_against,
        goal_difference: standing.goal_difference,
        points: standing.points,
    }
}

/// Close a season: archive one snapshot per division (final table plus the
/// full match list) and stamp the close time. Returns how many snapshots
/// were appended.
///
/// Nothing already in the archive is replaced or truncated. Closing an
/// already-closed season appends another snapshot set; whether re-closure
/// is allowed at all is caller policy.
pub fn close_season(season: &mut Season) -> usize {
    if season.is_closed() {
        log::warn!("season '{}' is already closed; appending another snapshot set", season.name);
    }
    let saved_at = chrono::Utc::now().timestamp_millis();

    let snapshots: Vec<(DivisionId, Snapshot)> = season
        .divisions
        .iter()
        .map(|div| {
            let table = standings::compute_table(&div.teams, &div.matches);
            let snapshot = Snapshot {
                season_id: season.id,
                season_name: season.name.clone(),
                saved_at,
                rows: table.iter().map(snapshot_row).collect(),
                matches: div.matches.clone(),
            };
            (div.id, snapshot)
        })
        .collect();

    let appended = snapshots.len();
    for (division_id, snapshot) in snapshots {
        season.history.entry(division_id).or_default().push(snapshot);
    }
    season.closed_at = Some(saved_at);
    log::info!("closed season '{}', archived {} snapshot(s)", season.name, appended);
    appended
}

/// Create the follow-up season from a source season.
///
/// Divisions get fresh identities with empty match lists and cleared rank
/// caches; teams are copied by value with their identities preserved so
/// club history stays linked. The archive is seeded as an independently
/// owned clone of the source archive: appending under the new season can
/// never mutate the old season's records.
pub fn roll_forward(source: &Season, season_count: usize) -> Season {
    let name = next_season_name(&source.name, season_count);
    log::info!("rolling season '{}' forward into '{}'", source.name, name);

    let divisions = source
        .divisions
        .iter()
        .map(|div| Division {
            id: Uuid::new_v4(),
            name: div.name.clone(),
            emblem: div.emblem.clone(),
            teams: div.teams.clone(),
            matches: Vec::new(),
            rank_bands: div.rank_bands.clone(),
            last_ranks: HashMap::new(),
        })
        .collect();

    Season {
        id: Uuid::new_v4(),
        name,
        created_at: chrono::Utc::now().timestamp_millis(),
        closed_at: None,
        divisions,
        history: source.history.clone(),
    }
}

/// Derive the next season's name by incrementing the last numeric token of
/// the source name; with no numeric token, fall back to `season_count + 1`.
pub fn next_season_name(source_name: &str, season_count: usize) -> String {
    match source_name.rfind(|c: char| c.is_ascii_digit()) {
        Some(pos) => {
            let end = pos + 1;
            let start = source_name[..end]
                .rfind(|c: char| !c.is_ascii_digit())
                .map(|i| i + 1)
                .unwrap_or(0);
            let next = source_name[start..end].parse::<u64>().map(|n| n + 1).unwrap_or(1);
            format!("{}{}{}", &source_name[..start], next, &source_name[end..])
        }
        None => format!("Season {}", season_count + 1),
    }
}

/// A club's archived season-by-season record, in chronological season
/// order.
///
/// Roll-forward carries archives along, so the same snapshot can be
/// reachable from several seasons; each record is read once, from the
/// season that closed it (the one whose id the snapshot carries). The live
/// table of the current season is not included; callers compose it from
/// `standings::compute_table`.
pub fn club_record(league: &League, team_id: TeamId) -> Vec<ClubSeasonRecord> {
    let mut records = Vec::new();
    for season in &league.seasons {
        for division in &season.divisions {
            for snapshot in season.snapshots(division.id) {
                if snapshot.season_id != season.id {
                    continue; // carried-forward copy owned by an earlier season
                }
                if let Some(row) = snapshot.rows.iter().find(|r| r.team_id == team_id) {
                    records.push(ClubSeasonRecord {
                        season_id: snapshot.season_id,
                        season_name: snapshot.season_name.clone(),
                        division_name: division.name.clone(),
                        rank: row.rank,
                        points: row.points,
                        played: row.played,
                        wins: row.wins,
                        draws: row.draws,
                        losses: row.losses,
                        goals_for: row.goals_for,
                        goals_against: row.goals_against,
                        win_percentage: row.win_percentage(),
                    });
                }
            }
        }
    }
    records
}

/// Look up the archived snapshot for a specific division and season.
///
/// Resolution is division-first: only snapshots filed under `division_id`
/// are considered, then matched on `season_id`. A club that moved divisions
/// between seasons can therefore never pull another division's archive.
pub fn find_snapshot(
    league: &League,
    division_id: DivisionId,
    season_id: SeasonId,
) -> Option<&Snapshot> {
    league
        .seasons
        .iter()
        .filter_map(|season| season.history.get(&division_id))
        .flat_map(|snapshots| snapshots.iter())
        .find(|snapshot| snapshot.season_id == season_id)
}
