//! Notifications published by the explorer.
//!
//! Every settled request produces one event. The presentation layer drains them to
//! show progress and errors; publishing never fails the operation that produced it.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerEvent {
    PathChanged { from: String, to: String },
    ListingRefreshed { path: String, entries: usize },
    RefreshDiscarded { path: String },
    RefreshFailed { path: String, error: String },
    ActionSucceeded { action: &'static str, message: String },
    ActionFailed { action: &'static str, error: String },
    ActionRejected { action: &'static str, reason: String },
}

impl ExplorerEvent {
    /// Events that should be shown to the user as an error notification
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ExplorerEvent::RefreshFailed { .. }
                | ExplorerEvent::ActionFailed { .. }
                | ExplorerEvent::ActionRejected { .. }
        )
    }
}

/// Optional sending half; a missing or closed receiver is ignored.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    sender: Option<UnboundedSender<ExplorerEvent>>,
}

impl EventSink {
    pub fn channel() -> (Self, UnboundedReceiver<ExplorerEvent>) {
        let (sender, receiver) = unbounded_channel();
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    pub fn publish(&self, event: ExplorerEvent) {
        if let Some(sender) = &self.sender {
            if sender.send(event).is_err() {
                log::debug!("Event receiver dropped");
            }
        }
    }
}
