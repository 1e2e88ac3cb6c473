//! Commands dispatched back to the host state container.

use serde::{Deserialize, Serialize};

use assignment_rules::{DownloadId, GameId, RuleSet};

/// Everything this system ever asks the host to do.
///
/// The host serializes and applies commands in order; each rule mutation is
/// idempotent to replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum Command {
    /// Replace a download's compatible-game list.
    SetCompatibleGames {
        download: DownloadId,
        games: Vec<GameId>,
    },

    /// Append a rule to the rule store.
    AddRule {
        download_for: GameId,
        assign_game: GameId,
    },

    /// Remove every rule matching the pair exactly.
    DeleteRule {
        download_for: GameId,
        assign_game: GameId,
    },

    /// Restore the built-in default rules.
    ResetRules,
}

impl Command {
    /// Apply this command to a rule set, if it is a rule mutation.
    ///
    /// This is the reference reducer for the host's state container.
    /// [`Command::SetCompatibleGames`] targets the download collection, not
    /// the rule store, and is ignored here.
    pub fn apply_to_rules(&self, rules: &mut RuleSet) {
        match self {
            Command::AddRule {
                download_for,
                assign_game,
            } => {
                rules.add_rule(download_for.clone(), assign_game.clone());
            }
            Command::DeleteRule {
                download_for,
                assign_game,
            } => rules.delete_rule(download_for, assign_game),
            Command::ResetRules => rules.reset(),
            Command::SetCompatibleGames { .. } => {}
        }
    }
}
