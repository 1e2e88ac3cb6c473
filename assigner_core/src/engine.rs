//! The assignment engine - applies rules to newly-added downloads.
//!
//! The engine runs inside the host's state-change callback and works as
//! follows:
//!
//! 1. **Difference**: Compute the set of download IDs present in the new
//!    collection but not the old one
//! 2. **Snapshot**: Read the rule set and discovered games once for the batch
//! 3. **Evaluation**: For each added download, apply every rule that is
//!    triggered, targets a discovered game, and would add a new tag
//! 4. **Commands**: Emit one replace command per download that gained tags
//!
//! Existing downloads are never reprocessed: only IDs absent from the
//! previous collection are considered, so a batch that removes downloads
//! while adding others still processes the additions.

use serde_json::Value;

use assignment_rules::{Download, DownloadCollection, GameId};

use crate::commands::Command;
use crate::observer::DownloadsObserver;
use crate::snapshot::{downloads_from_value, StateSnapshot};

/// Applies assignment rules to downloads on their first observation.
///
/// Stateless: every invocation works purely from the snapshots it is given,
/// and its only output is the returned command list.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentEngine;

impl AssignmentEngine {
    /// Create an assignment engine.
    pub fn new() -> Self {
        Self
    }

    /// React to a change of the download collection.
    ///
    /// Returns the commands to dispatch; empty when no download was added or
    /// no rule applied. Never fails.
    pub fn process_change(
        &self,
        previous: &DownloadCollection,
        current: &DownloadCollection,
        snapshot: &StateSnapshot,
    ) -> Vec<Command> {
        let mut added: Vec<&Download> = current
            .iter()
            .filter(|(id, _)| !previous.contains_key(id))
            .map(|(_, download)| download)
            .collect();

        if added.is_empty() {
            tracing::debug!("No downloads added, nothing to assign");
            return Vec::new();
        }

        // Map iteration order is arbitrary; keep command order deterministic.
        added.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

        added
            .into_iter()
            .filter_map(|download| {
                self.additions_for(download, snapshot)
                    .map(|games| Command::SetCompatibleGames {
                        download: download.id.clone(),
                        games,
                    })
            })
            .collect()
    }

    /// Convenience wiring for hosts that deliver raw state subtrees: reads
    /// the snapshot from the full state tree and both download collections
    /// from the notification payload, then delegates to
    /// [`process_change`](AssignmentEngine::process_change).
    pub fn handle_state_change(
        &self,
        state: &Value,
        previous_files: &Value,
        current_files: &Value,
    ) -> Vec<Command> {
        let previous = downloads_from_value(previous_files);
        let current = downloads_from_value(current_files);
        let snapshot = StateSnapshot::from_state(state);
        self.process_change(&previous, &current, &snapshot)
    }

    /// Evaluate all rules against one added download.
    ///
    /// Returns the download's new game list, or `None` when no rule added
    /// anything. Trigger matching runs against the download's original list
    /// (rules do not chain within one batch); duplicate suppression runs
    /// against the accumulating list so overlapping rules yield one tag.
    fn additions_for(&self, download: &Download, snapshot: &StateSnapshot) -> Option<Vec<GameId>> {
        let mut games = download.games.clone();
        let mut changed = false;

        let candidates = snapshot
            .rules
            .iter()
            // Already-satisfied rules have nothing left to add.
            .filter(|rule| !rule.satisfied_by(&download.games));

        for rule in candidates {
            // Only discovered games are valid assignment targets.
            if !snapshot.discovered.is_discovered(&rule.assign_game) {
                continue;
            }

            if !rule.triggered_by(&download.games) {
                continue;
            }

            if games.contains(&rule.assign_game) {
                continue;
            }

            tracing::info!(
                download = %download.display_name(),
                game = %rule.assign_game,
                "Automatically assigning compatible game to download"
            );
            games.push(rule.assign_game.clone());
            changed = true;
        }

        changed.then_some(games)
    }
}

impl DownloadsObserver for AssignmentEngine {
    fn on_downloads_changed(
        &self,
        previous: &DownloadCollection,
        current: &DownloadCollection,
        snapshot: &StateSnapshot,
    ) -> Vec<Command> {
        self.process_change(previous, current, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assignment_rules::{
        AssignmentRule, DiscoveredGame, DiscoveredGames, DownloadId, RuleSet,
    };
    use serde_json::json;

    fn discovered(ids: &[&str]) -> DiscoveredGames {
        ids.iter()
            .map(|id| (GameId::new(*id), DiscoveredGame::default()))
            .collect()
    }

    fn collection(downloads: &[Download]) -> DownloadCollection {
        downloads
            .iter()
            .map(|download| (download.id.clone(), download.clone()))
            .collect()
    }

    fn default_snapshot(discovered_ids: &[&str]) -> StateSnapshot {
        StateSnapshot::new(
            RuleSet::default().rules().to_vec(),
            discovered(discovered_ids),
        )
    }

    #[test]
    fn test_assigns_to_new_download() {
        let engine = AssignmentEngine::new();
        let current = collection(&[Download::new("d1").with_game("enderal")]);

        let commands = engine.process_change(
            &DownloadCollection::new(),
            &current,
            &default_snapshot(&["skyrim"]),
        );

        assert_eq!(
            commands,
            vec![Command::SetCompatibleGames {
                download: DownloadId::new("d1"),
                games: vec![GameId::new("enderal"), GameId::new("skyrim")],
            }]
        );
    }

    #[test]
    fn test_undiscovered_target_never_fires() {
        let engine = AssignmentEngine::new();
        let current = collection(&[Download::new("d1").with_game("enderal")]);

        let commands =
            engine.process_change(&DownloadCollection::new(), &current, &default_snapshot(&[]));

        assert!(commands.is_empty());
    }

    #[test]
    fn test_already_satisfied_rule_is_a_noop() {
        let engine = AssignmentEngine::new();
        let current =
            collection(&[Download::new("d1").with_game("enderal").with_game("skyrim")]);

        let commands = engine.process_change(
            &DownloadCollection::new(),
            &current,
            &default_snapshot(&["skyrim"]),
        );

        assert!(commands.is_empty());
    }

    #[test]
    fn test_unrelated_download_is_untouched() {
        let engine = AssignmentEngine::new();
        let current = collection(&[Download::new("d1").with_game("morrowind")]);

        let commands = engine.process_change(
            &DownloadCollection::new(),
            &current,
            &default_snapshot(&["skyrim", "skyrimvr", "fallout4vr"]),
        );

        assert!(commands.is_empty());
    }

    #[test]
    fn test_existing_downloads_are_never_reprocessed() {
        let engine = AssignmentEngine::new();
        let unchanged = collection(&[Download::new("d1").with_game("enderal")]);

        let commands =
            engine.process_change(&unchanged, &unchanged, &default_snapshot(&["skyrim"]));

        assert!(commands.is_empty());
    }

    #[test]
    fn test_removal_issues_no_commands() {
        let engine = AssignmentEngine::new();
        let previous = collection(&[
            Download::new("d1").with_game("enderal"),
            Download::new("d2").with_game("enderal"),
        ]);
        let current = collection(&[Download::new("d1").with_game("enderal")]);

        let commands = engine.process_change(&previous, &current, &default_snapshot(&["skyrim"]));

        assert!(commands.is_empty());
    }

    #[test]
    fn test_simultaneous_add_and_remove_still_processes_additions() {
        let engine = AssignmentEngine::new();
        let previous = collection(&[
            Download::new("d1").with_game("enderal"),
            Download::new("d2"),
        ]);
        // d1 and d2 removed, d3 added: total count shrinks but d3 is new.
        let current = collection(&[Download::new("d3").with_game("enderal")]);

        let commands = engine.process_change(&previous, &current, &default_snapshot(&["skyrim"]));

        assert_eq!(
            commands,
            vec![Command::SetCompatibleGames {
                download: DownloadId::new("d3"),
                games: vec![GameId::new("enderal"), GameId::new("skyrim")],
            }]
        );
    }

    #[test]
    fn test_multiple_matching_rules_accumulate_into_one_command() {
        let engine = AssignmentEngine::new();
        let snapshot = StateSnapshot::new(
            vec![
                AssignmentRule::new("enderal", "skyrim"),
                AssignmentRule::new("enderal", "skyrimse"),
            ],
            discovered(&["skyrim", "skyrimse"]),
        );
        let current = collection(&[Download::new("d1").with_game("enderal")]);

        let commands = engine.process_change(&DownloadCollection::new(), &current, &snapshot);

        assert_eq!(
            commands,
            vec![Command::SetCompatibleGames {
                download: DownloadId::new("d1"),
                games: vec![
                    GameId::new("enderal"),
                    GameId::new("skyrim"),
                    GameId::new("skyrimse"),
                ],
            }]
        );
    }

    #[test]
    fn test_overlapping_rules_never_duplicate_a_tag() {
        let engine = AssignmentEngine::new();
        let snapshot = StateSnapshot::new(
            vec![
                AssignmentRule::new("enderal", "skyrim"),
                AssignmentRule::new("enderalse", "skyrim"),
            ],
            discovered(&["skyrim"]),
        );
        let current =
            collection(&[Download::new("d1").with_game("enderal").with_game("enderalse")]);

        let commands = engine.process_change(&DownloadCollection::new(), &current, &snapshot);

        assert_eq!(
            commands,
            vec![Command::SetCompatibleGames {
                download: DownloadId::new("d1"),
                games: vec![
                    GameId::new("enderal"),
                    GameId::new("enderalse"),
                    GameId::new("skyrim"),
                ],
            }]
        );
    }

    #[test]
    fn test_rules_do_not_chain_within_one_batch() {
        let engine = AssignmentEngine::new();
        let snapshot = StateSnapshot::new(
            vec![
                AssignmentRule::new("enderal", "skyrim"),
                AssignmentRule::new("skyrim", "skyrimvr"),
            ],
            discovered(&["skyrim", "skyrimvr"]),
        );
        let current = collection(&[Download::new("d1").with_game("enderal")]);

        let commands = engine.process_change(&DownloadCollection::new(), &current, &snapshot);

        // skyrim was only just assigned; the skyrim => skyrimvr rule waits
        // for a later observation that never comes for this download.
        assert_eq!(
            commands,
            vec![Command::SetCompatibleGames {
                download: DownloadId::new("d1"),
                games: vec![GameId::new("enderal"), GameId::new("skyrim")],
            }]
        );
    }

    #[test]
    fn test_empty_snapshot_degrades_to_no_assignments() {
        let engine = AssignmentEngine::new();
        let current = collection(&[Download::new("d1").with_game("enderal")]);

        let commands = engine.process_change(
            &DownloadCollection::new(),
            &current,
            &StateSnapshot::default(),
        );

        assert!(commands.is_empty());
    }

    #[test]
    fn test_batch_commands_are_ordered_by_download_id() {
        let engine = AssignmentEngine::new();
        let current = collection(&[
            Download::new("b").with_game("enderal"),
            Download::new("a").with_game("enderal"),
        ]);

        let commands = engine.process_change(
            &DownloadCollection::new(),
            &current,
            &default_snapshot(&["skyrim"]),
        );

        let ids: Vec<&str> = commands
            .iter()
            .map(|command| match command {
                Command::SetCompatibleGames { download, .. } => download.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_handle_state_change_wires_snapshots() {
        let engine = AssignmentEngine::new();
        let state = json!({
            "settings": {"downloadAssigner": {"rules": [
                {"downloadFor": "enderal", "assignGame": "skyrim", "timeAdded": 0},
            ]}},
            "gameMode": {"discovered": {"skyrim": {}}},
        });

        let commands = engine.handle_state_change(
            &state,
            &json!({}),
            &json!({"d1": {"game": ["enderal"]}}),
        );

        assert_eq!(
            commands,
            vec![Command::SetCompatibleGames {
                download: DownloadId::new("d1"),
                games: vec![GameId::new("enderal"), GameId::new("skyrim")],
            }]
        );
    }

    #[test]
    fn test_reapplying_own_command_is_idempotent() {
        let engine = AssignmentEngine::new();
        let previous = DownloadCollection::new();
        let current = collection(&[Download::new("d1").with_game("enderal")]);
        let snapshot = default_snapshot(&["skyrim"]);

        let first = engine.process_change(&previous, &current, &snapshot);

        // Apply the command the way the host would, then observe the
        // unchanged collection again.
        let mut applied = current.clone();
        if let Some(Command::SetCompatibleGames { download, games }) = first.first() {
            applied.get_mut(download).unwrap().games = games.clone();
        }

        let second = engine.process_change(&applied, &applied, &snapshot);
        assert!(second.is_empty());
    }
}
