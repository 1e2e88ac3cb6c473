//! The registration shape for host change notifications.

use assignment_rules::DownloadCollection;

use crate::commands::Command;
use crate::snapshot::StateSnapshot;

/// An observer of the host's download collection.
///
/// The host subscribes an observer to its download path and invokes it
/// sequentially with before/after snapshots of the collection plus a
/// once-per-batch read of the rest of the state. Implementations return the
/// commands to dispatch and never raise: anomalies degrade to an empty
/// command list.
pub trait DownloadsObserver {
    /// React to one change notification.
    fn on_downloads_changed(
        &self,
        previous: &DownloadCollection,
        current: &DownloadCollection,
        snapshot: &StateSnapshot,
    ) -> Vec<Command>;
}
