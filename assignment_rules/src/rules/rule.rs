//! The assignment rule type: "downloads for game A are also compatible with game B".

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::games::GameId;

/// A single mapping rule.
///
/// Serialized with camelCase field names because that is the shape the host
/// persists (and the shape of the built-in defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRule {
    /// The trigger game: downloads tagged with this game are candidates.
    pub download_for: GameId,

    /// The game to add as compatible when the rule fires.
    pub assign_game: GameId,

    /// Milliseconds since epoch when the rule was added. Built-in defaults
    /// use small sentinel values (0..) for stable display ordering; the
    /// engine itself never reads this field.
    #[serde(default)]
    pub time_added: i64,
}

impl AssignmentRule {
    /// Create a rule stamped with the current wall-clock time.
    pub fn new(download_for: impl Into<GameId>, assign_game: impl Into<GameId>) -> Self {
        Self {
            download_for: download_for.into(),
            assign_game: assign_game.into(),
            time_added: Utc::now().timestamp_millis(),
        }
    }

    /// Override the timestamp (builder style, used for the built-in defaults).
    pub fn with_time_added(mut self, time_added: i64) -> Self {
        self.time_added = time_added;
        self
    }

    /// Whether this rule is for exactly the given `(downloadFor, assignGame)` pair.
    pub fn matches_pair(&self, download_for: &GameId, assign_game: &GameId) -> bool {
        self.download_for == *download_for && self.assign_game == *assign_game
    }

    /// Whether the trigger condition holds for a download's game-tag list.
    pub fn triggered_by(&self, games: &[GameId]) -> bool {
        games.contains(&self.download_for)
    }

    /// Whether the rule has nothing left to add to a download's game-tag list.
    pub fn satisfied_by(&self, games: &[GameId]) -> bool {
        games.contains(&self.assign_game)
    }
}

impl std::fmt::Display for AssignmentRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} => {}", self.download_for, self.assign_game)
    }
}
