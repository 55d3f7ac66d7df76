//! Registration records and the terminal result of a completed flow.
//!
//! A `TerminalResult` is produced exactly once per completed wizard. The
//! registration store turns it into a `Registration` that admins can later
//! approve or reject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::form_models::FormData;

/// Identifier issued by the uploader for an accepted submission.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
pub struct ReceiptId(pub Uuid);

impl ReceiptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReceiptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review state of a registration.
///
/// Pending -> Approved | Rejected
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    /// Submitted and waiting for an admin.
    Pending,

    /// Accepted by an admin.
    Approved,

    /// Declined by an admin.
    Rejected,
}

/// Payload emitted when the final content step of a flow succeeds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct TerminalResult {
    /// Wizard instance that produced the result.
    #[ts(type = "string")]
    pub flow_id: Uuid,

    /// Event the registrant signed up for.
    pub event_id: String,

    /// Name of the flow definition that was completed.
    pub flow_name: String,

    /// Snapshot of every field collected by the wizard.
    pub form_data: FormData,

    /// Receipt issued for the uploaded documents.
    pub receipt: ReceiptId,

    #[ts(type = "string")]
    pub completed_at: DateTime<Utc>,
}

/// A stored registration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct Registration {
    #[ts(type = "string")]
    pub id: Uuid,
    pub event_id: String,
    pub flow_name: String,
    pub form_data: FormData,
    pub receipt: ReceiptId,
    pub status: RegistrationStatus,
    #[ts(type = "string")]
    pub submitted_at: DateTime<Utc>,
}

impl From<TerminalResult> for Registration {
    fn from(result: TerminalResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id: result.event_id,
            flow_name: result.flow_name,
            form_data: result.form_data,
            receipt: result.receipt,
            status: RegistrationStatus::Pending,
            submitted_at: result.completed_at,
        }
    }
}

/// Partial update applied through the registration store.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct RegistrationPatch {
    #[serde(default)]
    pub status: Option<RegistrationStatus>,
    #[serde(default)]
    pub form_data: Option<FormData>,
}

impl RegistrationPatch {
    pub fn status(status: RegistrationStatus) -> Self {
        Self {
            status: Some(status),
            form_data: None,
        }
    }

    /// Apply the set fields of the patch to `registration`.
    pub fn apply(self, registration: &mut Registration) {
        if let Some(status) = self.status {
            registration.status = status;
        }
        if let Some(form_data) = self.form_data {
            registration.form_data = form_data;
        }
    }
}
