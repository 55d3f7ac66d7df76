//! Inter-process communication protocol.
//!
//! This module defines the message types for asynchronous communication
//! between the TUI (user interface) and the Core (wizard logic).
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: Commands sent from TUI to Core
//! - `Event`: Status updates sent from Core to TUI
//!
//! Every field edit and every transition request is one `Op`; the core
//! answers with the events the UI needs to re-render.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::form_models::{FieldValue, FileRef, MemberRecord};
use crate::notification_models::Notification;
use crate::registration_models::TerminalResult;

/// Operations sent from the UI (TUI) to the Core logic.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "openFlow",
///   "payload": {
///     "event_id": "hackathon-2024",
///     "flow_name": "team"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Open a wizard for an event.
    ///
    /// An already open wizard for the same flow is reused, and reset first
    /// when it was showing a different event.
    OpenFlow { event_id: String, flow_name: String },

    /// Set a single field value.
    SetField {
        #[ts(type = "string")]
        flow_id: Uuid,
        field: String,
        value: FieldValue,
    },

    /// Replace one team member slot.
    SetMember {
        #[ts(type = "string")]
        flow_id: Uuid,
        slot: usize,
        member: MemberRecord,
    },

    /// Replace the selected documents.
    SelectFiles {
        #[ts(type = "string")]
        flow_id: Uuid,
        files: Vec<FileRef>,
    },

    /// Move to the next step if the current one validates.
    Advance {
        #[ts(type = "string")]
        flow_id: Uuid,
    },

    /// Move to the previous step.
    Retreat {
        #[ts(type = "string")]
        flow_id: Uuid,
    },

    /// Submit from the final content step.
    CompleteTerminalStep {
        #[ts(type = "string")]
        flow_id: Uuid,
    },

    /// Return to the first step with an empty form.
    Reset {
        #[ts(type = "string")]
        flow_id: Uuid,
    },

    /// Close the wizard and drop its state.
    CloseFlow {
        #[ts(type = "string")]
        flow_id: Uuid,
    },

    /// Shut down the core loop.
    Shutdown,
}

/// Events sent from the Core logic to the UI (TUI).
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "stepChanged",
///   "payload": {
///     "flow_id": "uuid-here",
///     "step_index": 2
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A wizard has been opened or retargeted.
    FlowOpened {
        #[ts(type = "string")]
        flow_id: Uuid,
        event_id: String,
        flow_name: String,
        steps: Vec<String>,
    },

    /// The active step changed.
    StepChanged {
        #[ts(type = "string")]
        flow_id: Uuid,
        step_index: usize,
    },

    /// The form was cleared and the wizard returned to its first step.
    FlowReset {
        #[ts(type = "string")]
        flow_id: Uuid,
    },

    /// A notification for the current user.
    Notification {
        #[ts(type = "string")]
        flow_id: Uuid,
        notification: Notification,
    },

    /// The final content step succeeded.
    FlowCompleted {
        #[ts(type = "string")]
        flow_id: Uuid,
        result: TerminalResult,
    },

    /// The hosting view should navigate away.
    NavigationRequested { path: String },

    /// A wizard was closed.
    FlowClosed {
        #[ts(type = "string")]
        flow_id: Uuid,
    },
}
