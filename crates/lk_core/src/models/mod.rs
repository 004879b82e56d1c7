pub mod division;
pub mod fixture;
pub mod league;
pub mod season;
pub mod team;

pub use division::{Division, DivisionId, RankColorBand};
pub use fixture::{Match, MatchId};
pub use league::{League, LeagueId};
pub use season::{Season, SeasonId, Snapshot, SnapshotRow};
pub use team::{Team, TeamId};
