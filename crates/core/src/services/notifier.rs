//! Notification service.

use rf_protocol::ipc::Event;
use rf_protocol::notification_models::{Notification, NotificationKind};
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// Shows a notification to the current user. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, flow_id: Uuid, notification: Notification);
}

/// Forwards notifications to the UI as [`Event::Notification`].
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    events_tx: UnboundedSender<Event>,
}

impl ChannelNotifier {
    pub fn new(events_tx: UnboundedSender<Event>) -> Self {
        Self { events_tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, flow_id: Uuid, notification: Notification) {
        // The UI may already be gone during shutdown.
        let _ = self.events_tx.send(Event::Notification {
            flow_id,
            notification,
        });
    }
}

/// Writes notifications to the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, flow_id: Uuid, notification: Notification) {
        match notification.kind {
            NotificationKind::Info => {
                tracing::info!(%flow_id, title = %notification.title, "{}", notification.message)
            }
            NotificationKind::Error => {
                tracing::warn!(%flow_id, title = %notification.title, "{}", notification.message)
            }
        }
    }
}

/// Keeps every notification in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<(Uuid, Notification)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, notification)| notification.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, flow_id: Uuid, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((flow_id, notification));
    }
}
