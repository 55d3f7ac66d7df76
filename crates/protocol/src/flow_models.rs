//! Flow definition models for `.regflow/flows/*.yaml`.
//!
//! A flow is an ordered list of steps. Position is identity: steps carry no
//! separate id, and the last step is always the confirmation screen reached
//! only by completing the step before it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The kind of a step, which selects the validation rule guarding it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    /// Event rules and instructions. Always passable.
    Guidelines,

    /// Name, roll number and email of a solo registrant.
    PersonalInfo,

    /// Same required fields as `PersonalInfo`, for the leader of a team.
    TeamLead,

    /// Repeating group of member records.
    TeamMembers,

    /// File selection. Completing this step submits the registration.
    UploadDocuments,

    /// Read-only summary shown after submission.
    Confirmation,
}

impl StepKind {
    /// Default label used when a flow file omits one.
    pub fn default_label(self) -> &'static str {
        match self {
            StepKind::Guidelines => "Guidelines",
            StepKind::PersonalInfo => "Personal Info",
            StepKind::TeamLead => "Team Lead",
            StepKind::TeamMembers => "Team Members",
            StepKind::UploadDocuments => "Upload Documents",
            StepKind::Confirmation => "Confirmation",
        }
    }
}

/// A single labelled stage of a flow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct StepDefinition {
    /// Label rendered by the stepper.
    pub label: String,

    /// Kind of the step.
    pub kind: StepKind,
}

impl StepDefinition {
    pub fn new(label: impl Into<String>, kind: StepKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }

    /// A step using its kind's default label.
    pub fn of(kind: StepKind) -> Self {
        Self::new(kind.default_label(), kind)
    }
}

/// Whether a flow registers a single student or a team.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub enum FlowKind {
    Solo,
    Team,
}

/// Defines a full registration flow.
///
/// # Example
///
/// ```yaml
/// name: team
/// kind: team
/// steps:
///   - label: "Guidelines"
///     kind: guidelines
///   - label: "Team Lead"
///     kind: team-lead
///   - label: "Team Members"
///     kind: team-members
///   - label: "Upload"
///     kind: upload-documents
///   - label: "Confirmation"
///     kind: confirmation
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct FlowDefinition {
    /// Unique name identifying this flow.
    pub name: String,

    /// Solo or team registration.
    pub kind: FlowKind,

    /// Ordered steps. Must not be empty.
    pub steps: Vec<StepDefinition>,
}

impl FlowDefinition {
    /// The built-in single-registrant flow:
    /// Guidelines, Personal Info, Upload Documents, Confirmation.
    pub fn solo() -> Self {
        Self {
            name: "solo".to_string(),
            kind: FlowKind::Solo,
            steps: vec![
                StepDefinition::of(StepKind::Guidelines),
                StepDefinition::of(StepKind::PersonalInfo),
                StepDefinition::of(StepKind::UploadDocuments),
                StepDefinition::of(StepKind::Confirmation),
            ],
        }
    }

    /// The built-in team flow:
    /// Guidelines, Team Lead, Team Members, Upload, Confirmation.
    pub fn team() -> Self {
        Self {
            name: "team".to_string(),
            kind: FlowKind::Team,
            steps: vec![
                StepDefinition::of(StepKind::Guidelines),
                StepDefinition::of(StepKind::TeamLead),
                StepDefinition::of(StepKind::TeamMembers),
                StepDefinition::new("Upload", StepKind::UploadDocuments),
                StepDefinition::of(StepKind::Confirmation),
            ],
        }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the last (confirmation) step.
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Index of the step whose completion submits the flow, if the flow has
    /// more than one step.
    pub fn terminal_content_index(&self) -> Option<usize> {
        self.steps.len().checked_sub(2)
    }

    /// True when the flow has at least two steps and only the last one is
    /// the confirmation step.
    pub fn ends_with_confirmation(&self) -> bool {
        match self.steps.split_last() {
            Some((last, content)) => {
                !content.is_empty()
                    && last.kind == StepKind::Confirmation
                    && content.iter().all(|step| step.kind != StepKind::Confirmation)
            }
            None => false,
        }
    }

    /// Step labels in order.
    pub fn labels(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.label.clone()).collect()
    }
}

/// Render-ready status of one step, derived from `{steps, current_index}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct StepView {
    pub label: String,
    pub is_completed: bool,
    pub is_active: bool,
    pub is_last: bool,
}
