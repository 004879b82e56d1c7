use super::error::SaveError;
use super::SAVE_VERSION;
use crate::models::League;
use crate::state::Selection;
use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};

/// Upper bound on teams across all leagues; anything beyond this is not a
/// plausible document for this system.
const MAX_TOTAL_TEAMS: usize = 10_000;

/// The persisted document: the whole league graph plus the caller's
/// selection, replaced wholesale on every save. Where the bytes live is the
/// storage collaborator's concern.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LeagueSave {
    /// Save format version for migration.
    pub version: u32,

    /// Save timestamp (unix milliseconds).
    pub timestamp: i64,

    pub leagues: Vec<League>,

    pub selection: Selection,
}

impl LeagueSave {
    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    /// Structural validation, applied on both save and load. A document
    /// that fails here is rejected, never silently patched with defaults.
    pub fn validate(&self) -> Result<(), SaveError> {
        if self.leagues.is_empty() {
            return Err(SaveError::Corrupted);
        }

        let total_teams: usize = self
            .leagues
            .iter()
            .flat_map(|l| &l.seasons)
            .flat_map(|s| &s.divisions)
            .map(|d| d.teams.len())
            .sum();
        if total_teams > MAX_TOTAL_TEAMS {
            return Err(SaveError::DataTooLarge { size: total_teams });
        }

        // League, season and division identities are unique across the
        // whole document. Team ids are only unique within a division: the
        // same club id recurs season after season by design, that is what
        // links its history. Match ids likewise are scoped per division.
        let mut ids = std::collections::HashSet::new();
        for league in &self.leagues {
            if !ids.insert(league.id) {
                return Err(SaveError::Corrupted);
            }
            for season in &league.seasons {
                if !ids.insert(season.id) {
                    return Err(SaveError::Corrupted);
                }
                for division in &season.divisions {
                    if !ids.insert(division.id) {
                        return Err(SaveError::Corrupted);
                    }
                    let mut team_ids = std::collections::HashSet::new();
                    for team in &division.teams {
                        if !team_ids.insert(team.id) {
                            return Err(SaveError::Corrupted);
                        }
                    }
                    let mut match_ids = std::collections::HashSet::new();
                    for m in &division.matches {
                        if !match_ids.insert(m.id) {
                            return Err(SaveError::Corrupted);
                        }
                        if m.home_id == m.away_id || m.round == 0 {
                            return Err(SaveError::Corrupted);
                        }
                    }
                }
                // Archived matches are copies; only shape is checked.
                for snapshot in season.history.values().flatten() {
                    for m in &snapshot.matches {
                        if m.home_id == m.away_id || m.round == 0 {
                            return Err(SaveError::Corrupted);
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Serialize and compress the save document.
pub fn serialize_and_compress(save: &LeagueSave) -> Result<Vec<u8>, SaveError> {
    // Validate before serialization
    save.validate()?;

    // 1. Serialize to MessagePack with field names
    let msgpack = to_vec_named(save).map_err(SaveError::Serialization)?;

    // 2. Compress with LZ4 (size prepended for easy decompression)
    let compressed = compress_prepend_size(&msgpack);

    // 3. Add SHA256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize a save document.
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<LeagueSave, SaveError> {
    // Check minimum size (header + checksum)
    if bytes.len() < 4 + 32 {
        return Err(SaveError::Corrupted);
    }

    // Split payload and checksum
    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    // Verify checksum
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    // Decompress
    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;

    // Deserialize
    let save: LeagueSave = from_slice(&msgpack).map_err(SaveError::Deserialization)?;

    // Validate version
    if save.version > SAVE_VERSION {
        return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
    }

    save.validate()?;

    Ok(save)
}

pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
