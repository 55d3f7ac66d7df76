//! Navigation after a completed flow.

use rf_protocol::ipc::Event;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc::UnboundedSender;

/// Redirects the hosting view. Fire-and-forget.
pub trait Navigator: Send + Sync {
    fn go_to(&self, path: &str);
}

/// Forwards redirects to the UI as [`Event::NavigationRequested`].
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    events_tx: UnboundedSender<Event>,
}

impl ChannelNavigator {
    pub fn new(events_tx: UnboundedSender<Event>) -> Self {
        Self { events_tx }
    }
}

impl Navigator for ChannelNavigator {
    fn go_to(&self, path: &str) {
        let _ = self.events_tx.send(Event::NavigationRequested {
            path: path.to_string(),
        });
    }
}

/// Keeps every requested path in memory.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, path: &str) {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}
