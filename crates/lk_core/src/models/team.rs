use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TeamId = Uuid;

/// A club taking part in a division.
///
/// The id is stable across seasons: season roll-forward copies teams by
/// value with the id preserved, so a club's record stays traceable through
/// the archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,

    pub name: String,

    /// Opaque emblem reference; resolving it is the presentation layer's job.
    #[serde(default)]
    pub emblem: Option<String>,

    /// Free-text club note.
    #[serde(default)]
    pub note: String,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), emblem: None, note: String::new() }
    }
}
