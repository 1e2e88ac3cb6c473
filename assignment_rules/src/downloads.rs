//! Download records as delivered by the host's download manager.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::games::GameId;

/// Identifier for a download, assigned by the host and immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadId(pub String);

impl DownloadId {
    /// Create a download ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DownloadId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for DownloadId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DownloadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single archived file tracked by the host.
///
/// Only the `games` list is ever touched by this system, and only through
/// replace commands issued back to the host - never in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Download {
    pub id: DownloadId,

    /// Games this download is tagged compatible with, in tag order.
    /// The host serializes this field as `game`.
    #[serde(default, rename = "game")]
    pub games: Vec<GameId>,

    /// Display name from the download's mod metadata, used only for logging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Download {
    /// Create a download with an empty game-tag list.
    pub fn new(id: impl Into<DownloadId>) -> Self {
        Self {
            id: id.into(),
            games: Vec::new(),
            name: None,
        }
    }

    /// Add a compatible-game tag (builder style).
    pub fn with_game(mut self, game: impl Into<GameId>) -> Self {
        self.games.push(game.into());
        self
    }

    /// Set the display name (builder style).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether this download is already tagged compatible with a game.
    pub fn has_game(&self, game: &GameId) -> bool {
        self.games.contains(game)
    }

    /// Name to show in logs: the mod name if known, otherwise the ID.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}

/// The host's download collection, as delivered with change notifications.
pub type DownloadCollection = HashMap<DownloadId, Download>;
