//! Assertion helpers over emitted events.

use rf_protocol::ipc::Event;
use rf_protocol::notification_models::NotificationKind;
use tokio::sync::mpsc::UnboundedReceiver;

/// Everything currently queued on the channel.
#[allow(dead_code)]
pub fn drain(rx: &mut UnboundedReceiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Step indices carried by `StepChanged` events, in order.
#[allow(dead_code)]
pub fn step_changes(events: &[Event]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::StepChanged { step_index, .. } => Some(*step_index),
            _ => None,
        })
        .collect()
}

/// Titles of error notifications, in order.
#[allow(dead_code)]
pub fn error_titles(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Notification { notification, .. }
                if notification.kind == NotificationKind::Error =>
            {
                Some(notification.title.clone())
            }
            _ => None,
        })
        .collect()
}

#[allow(dead_code)]
pub fn count_completions(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::FlowCompleted { .. }))
        .count()
}
