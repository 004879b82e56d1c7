//! # lk_core - Round-Robin League Management Core
//!
//! This library is the computation core of a league manager: fixture
//! generation (circle method), standings with tie-breaks and recent form,
//! rank movement and rank band classification, and season archival with
//! full match history.
//!
//! ## Design
//! - Pure, synchronous transformations over an in-memory object graph;
//!   no I/O and no global state. The caller owns a [`LeagueState`] value
//!   and threads it through calls.
//! - Read paths (`compute_table`, the two `classify` functions) are
//!   side-effect-free and reentrant; mutating operations read-modify-write
//!   an aggregate and must be serialized per division/season by the caller.
//! - Persistence is whole-document: [`save::LeagueSave`] is produced and
//!   consumed in one piece; where the bytes go is the embedder's concern.

pub mod history;
pub mod models;
pub mod save;
pub mod schedule;
pub mod standings;
pub mod state;

// Re-export the main model types
pub use models::{
    Division, DivisionId, League, LeagueId, Match, MatchId, RankColorBand, Season, SeasonId,
    Snapshot, SnapshotRow, Team, TeamId,
};

// Re-export the engine surface
pub use schedule::{generate as generate_schedule, ScheduleOptions};
pub use standings::{compute_table, FormToken, TeamStanding};

// Re-export season archival
pub use history::{close_season, club_record, find_snapshot, roll_forward, ClubSeasonRecord};

// Re-export state management
pub use state::{LeagueState, Selection};

// Re-export save system
pub use save::{
    decompress_and_deserialize, migrate_save, serialize_and_compress, LeagueSave, SaveError,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
