//! Safe reads of the host state tree.
//!
//! The host exposes its state as a JSON-shaped tree and notifies observers
//! with before/after subtrees. Everything read here degrades gracefully: a
//! missing path or a malformed entry yields an empty collection or a skipped
//! entry, never an error, so the host's notification pipeline cannot be
//! broken by bad state.

use serde_json::Value;

use assignment_rules::{
    AssignmentRule, DiscoveredGame, DiscoveredGames, Download, DownloadCollection, DownloadId,
    GameId,
};

/// State path of this system's own persisted rules.
pub const RULES_PATH: &[&str] = &["settings", "downloadAssigner", "rules"];

/// State path of the host's discovered-games map.
pub const DISCOVERED_PATH: &[&str] = &["gameMode", "discovered"];

/// State path of the host's download collection (the subscribed path).
pub const DOWNLOADS_PATH: &[&str] = &["downloads", "files"];

/// Look up a nested value by path, `None` if any segment is missing.
pub fn value_at<'a>(state: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(state, |node, key| node.get(key))
}

/// A consistent read of everything the engine needs for one batch.
///
/// Taken once per change notification, never once per download, so every
/// download in a batch is evaluated against the same rules and the same
/// discovery results.
#[derive(Debug, Clone, Default)]
pub struct StateSnapshot {
    /// The current rule set, in insertion order.
    pub rules: Vec<AssignmentRule>,

    /// The host's discovered-games map.
    pub discovered: DiscoveredGames,
}

impl StateSnapshot {
    /// Build a snapshot from already-typed collections.
    pub fn new(rules: Vec<AssignmentRule>, discovered: DiscoveredGames) -> Self {
        Self { rules, discovered }
    }

    /// Read a snapshot from the host state tree.
    ///
    /// A missing or malformed node at either path yields the empty
    /// collection; a malformed entry inside an otherwise valid node is
    /// skipped and the rest kept.
    pub fn from_state(state: &Value) -> Self {
        Self {
            rules: rules_at(state),
            discovered: discovered_at(state),
        }
    }
}

fn rules_at(state: &Value) -> Vec<AssignmentRule> {
    let Some(entries) = value_at(state, RULES_PATH).and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
        .collect()
}

fn discovered_at(state: &Value) -> DiscoveredGames {
    let Some(entries) = value_at(state, DISCOVERED_PATH).and_then(Value::as_object) else {
        return DiscoveredGames::new();
    };

    entries
        .iter()
        // Null or false discovery results count as not discovered.
        .filter(|(_, discovery)| !discovery.is_null() && discovery.as_bool() != Some(false))
        .map(|(id, discovery)| {
            let discovery: DiscoveredGame =
                serde_json::from_value(discovery.clone()).unwrap_or_default();
            (GameId::new(id.as_str()), discovery)
        })
        .collect()
}

/// Read a download collection from one side of a change notification.
///
/// The host keys the collection by download ID and does not repeat the ID in
/// the entry body, so the key is authoritative. Malformed entry bodies still
/// produce a download with an empty game list.
pub fn downloads_from_value(files: &Value) -> DownloadCollection {
    let Some(entries) = files.as_object() else {
        return DownloadCollection::new();
    };

    entries
        .iter()
        .map(|(id, entry)| {
            let id = DownloadId::new(id.as_str());
            (id.clone(), download_from_entry(id, entry))
        })
        .collect()
}

fn download_from_entry(id: DownloadId, entry: &Value) -> Download {
    let games = entry
        .get("game")
        .and_then(Value::as_array)
        .map(|games| {
            games
                .iter()
                .filter_map(Value::as_str)
                .map(GameId::from)
                .collect()
        })
        .unwrap_or_default();

    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_owned);

    Download { id, games, name }
}
