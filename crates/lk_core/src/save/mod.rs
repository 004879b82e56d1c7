// Persistence format for the league document
// MessagePack + LZ4 compression with versioning and integrity checks

pub mod error;
pub mod format;
pub mod migration;

pub use error::SaveError;
pub use format::{decompress_and_deserialize, serialize_and_compress, LeagueSave};
pub use migration::migrate_save;

pub const SAVE_VERSION: u32 = 1;
