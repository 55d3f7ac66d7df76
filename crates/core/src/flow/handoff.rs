//! Post-completion hand-off.
//!
//! After the terminal step succeeds the confirmation screen stays up for a
//! grace period. When it elapses the registration is appended to the store
//! and the hosting view is redirected. The pending task is held by a
//! [`HandoffHandle`] so it can be cancelled, and tests can fast-forward it
//! with a paused tokio clock.

use rf_protocol::registration_models::Registration;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::services::navigation::Navigator;
use crate::services::store::DataStore;

/// Handle to a scheduled hand-off task.
#[derive(Debug)]
pub struct HandoffHandle {
    flow_id: Uuid,
    task: JoinHandle<()>,
}

impl HandoffHandle {
    pub fn flow_id(&self) -> Uuid {
        self.flow_id
    }

    /// True once the task ran to completion or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Abort the task. Does nothing if it already ran.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Wait for the task to finish. Returns `false` if it was cancelled.
    pub async fn wait(self) -> bool {
        self.task.await.is_ok()
    }
}

/// Where the hand-off delivers the registration.
pub(crate) struct HandoffTarget {
    pub store: Arc<dyn DataStore>,
    pub navigator: Arc<dyn Navigator>,
    pub redirect_path: String,
}

/// Spawn the hand-off. Must be called from within a tokio runtime.
pub(crate) fn schedule(
    flow_id: Uuid,
    delay: Duration,
    registration: Registration,
    target: HandoffTarget,
) -> HandoffHandle {
    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let registration_id = registration.id;
        target.store.append(registration);
        target.navigator.go_to(&target.redirect_path);
        tracing::info!(
            %flow_id,
            %registration_id,
            path = %target.redirect_path,
            "registration handed off"
        );
    });

    HandoffHandle { flow_id, task }
}
