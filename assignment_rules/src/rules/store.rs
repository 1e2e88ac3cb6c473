//! The rule store: an ordered, user-editable collection of assignment rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::games::GameId;
use crate::rules::AssignmentRule;

/// The built-in default mappings, in display order.
const DEFAULT_RULES: &[(&str, &str)] = &[
    ("enderal", "skyrim"),
    ("enderalspecialedition", "skyrimse"),
    ("fallout4", "fallout4vr"),
    ("skyrimse", "skyrimvr"),
];

/// Error decoding a persisted rule-state blob handed over by the host.
#[derive(Debug, Error)]
pub enum RuleStateError {
    #[error("malformed rule state: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The full ordered collection of assignment rules.
///
/// Initialized to the built-in defaults on first use and mutated only through
/// [`add_rule`](RuleSet::add_rule), [`delete_rule`](RuleSet::delete_rule) and
/// [`reset`](RuleSet::reset). Persistence is the host's job; [`to_json`] and
/// [`from_json`](RuleSet::from_json) produce and consume the blob it stores.
///
/// [`to_json`]: RuleSet::to_json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    rules: Vec<AssignmentRule>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule stamped with the current wall-clock time.
    ///
    /// Exact `(downloadFor, assignGame)` duplicates are rejected as a no-op,
    /// which keeps the add command safe to replay. Returns whether the rule
    /// was actually added.
    pub fn add_rule(
        &mut self,
        download_for: impl Into<GameId>,
        assign_game: impl Into<GameId>,
    ) -> bool {
        let rule = AssignmentRule::new(download_for, assign_game);
        if self.contains_pair(&rule.download_for, &rule.assign_game) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    /// Remove every rule matching the given pair exactly.
    ///
    /// Both fields must match; a rule sharing only one field survives.
    pub fn delete_rule(&mut self, download_for: &GameId, assign_game: &GameId) {
        self.rules
            .retain(|rule| !rule.matches_pair(download_for, assign_game));
    }

    /// Replace the entire collection with the built-in defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether a rule for exactly this pair exists.
    pub fn contains_pair(&self, download_for: &GameId, assign_game: &GameId) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.matches_pair(download_for, assign_game))
    }

    /// The current rules, in insertion order.
    pub fn rules(&self) -> &[AssignmentRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Decode a rule set from the host's persisted JSON blob.
    pub fn from_json(json: &str) -> Result<Self, RuleStateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the rule set as the JSON blob the host persists.
    pub fn to_json(&self) -> String {
        // Serializing a plain rules vector cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Default for RuleSet {
    /// The built-in defaults, with small sentinel timestamps in table order.
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .enumerate()
            .map(|(index, (download_for, assign_game))| {
                AssignmentRule::new(*download_for, *assign_game).with_time_added(index as i64)
            })
            .collect();
        Self { rules }
    }
}

impl FromIterator<AssignmentRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = AssignmentRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
