//! Game identifiers and the host's discovered-games map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier for a game, as assigned by the host's game catalog.
///
/// Identifiers are opaque strings (e.g. `"skyrimse"`); no validation is
/// performed, empty strings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    /// Create a game ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for GameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The host's discovery result for a single game.
///
/// All fields are read-only metadata owned by the host; the mere presence of
/// an entry is what marks a game as installed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredGame {
    /// Display name, if the host resolved one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Install location, if the host resolved one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Mapping of game ID to discovery result, read-only from this system.
///
/// A game is considered installed exactly when it has an entry here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscoveredGames {
    games: HashMap<GameId, DiscoveredGame>,
}

impl DiscoveredGames {
    /// Create an empty map (no games discovered).
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a game as discovered.
    pub fn insert(&mut self, id: GameId, discovery: DiscoveredGame) {
        self.games.insert(id, discovery);
    }

    /// Whether the host has located an installation of this game.
    pub fn is_discovered(&self, id: &GameId) -> bool {
        self.games.contains_key(id)
    }

    /// Look up the discovery result for a game.
    pub fn get(&self, id: &GameId) -> Option<&DiscoveredGame> {
        self.games.get(id)
    }

    /// Number of discovered games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether no games are discovered.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl FromIterator<(GameId, DiscoveredGame)> for DiscoveredGames {
    fn from_iter<I: IntoIterator<Item = (GameId, DiscoveredGame)>>(iter: I) -> Self {
        Self {
            games: iter.into_iter().collect(),
        }
    }
}
