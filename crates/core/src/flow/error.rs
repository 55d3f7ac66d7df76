//! Error types for flow transitions.

use thiserror::Error;
use uuid::Uuid;

use crate::services::upload::UploadError;
use crate::validation::FailureClass;

/// Type alias for Result with FlowError.
pub type FlowResult<T> = Result<T, FlowError>;

/// Errors returned by flow controller operations.
///
/// None of these end a flow: the state is left as it was and the user may
/// correct the input and try the same transition again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The current step's gate rejected the form.
    #[error("Step {step_index} is incomplete: {reason}")]
    Validation {
        step_index: usize,
        failure: FailureClass,
        reason: String,
        missing: Vec<String>,
    },

    /// `advance` was called on the step that must be completed instead.
    #[error("Step {0} submits the flow and must be completed, not advanced")]
    TerminalStepRequiresCompletion(usize),

    /// `complete_terminal_step` was called away from the final content step.
    #[error("Only the final content step can be completed (current step {current})")]
    NotAtTerminalStep { current: usize },

    /// `advance` was called on the last step.
    #[error("Already at the last step")]
    AtLastStep,

    /// The flow has been submitted and no longer accepts changes.
    #[error("Flow has already been completed")]
    AlreadyComplete,

    /// The uploader rejected the submission.
    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),

    /// A flow definition without steps.
    #[error("Flow {0} has no steps")]
    EmptyStepSet(String),

    /// A flow definition whose last step is not the only confirmation step.
    #[error("Flow {0} must end with a confirmation step after at least one content step")]
    MissingConfirmation(String),

    /// A team member slot beyond the configured group size.
    #[error("Team member slot {slot} is out of range ({slots} slots)")]
    MemberSlotOutOfRange { slot: usize, slots: usize },

    /// No flow definition with this name is configured.
    #[error("Unknown flow: {0}")]
    UnknownFlow(String),

    /// No open wizard with this id.
    #[error("Flow not found: {0}")]
    FlowNotFound(Uuid),
}

impl FlowError {
    /// True for failures the user was notified about.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, FlowError::Validation { .. } | FlowError::Upload(_))
    }
}
