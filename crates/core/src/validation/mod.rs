//! Per-step validation gate.
//!
//! Each step kind maps to one [`ValidationRule`]: a plain function of the
//! form data. Rules are `fn` pointers, so they cannot capture state and
//! always answer the same way for the same input.
//!
//! Only presence is checked. A value counts as present when it holds
//! something other than whitespace; formats (email, phone) are not checked.

pub mod rules;

use rf_protocol::flow_models::StepKind;
use rf_protocol::form_models::FormData;
use rf_protocol::notification_models::Notification;

/// A validation rule for one step.
pub type ValidationRule = fn(&FormData) -> ValidationOutcome;

/// Category of a validation failure. Each class has a fixed title/message
/// pair shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// A required text field is blank.
    MissingRequiredFields,

    /// No member slot is fully filled.
    NoCompleteTeamMember,

    /// The upload step has no files.
    NoDocumentsSelected,
}

impl FailureClass {
    pub fn title(self) -> &'static str {
        match self {
            FailureClass::MissingRequiredFields => "Missing information",
            FailureClass::NoCompleteTeamMember => "Team incomplete",
            FailureClass::NoDocumentsSelected => "No documents selected",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            FailureClass::MissingRequiredFields => "Please fill in all required fields.",
            FailureClass::NoCompleteTeamMember => {
                "Add at least one team member with name, email and registration number."
            }
            FailureClass::NoDocumentsSelected => "Please select at least one file to upload.",
        }
    }

    /// The notification raised for this failure.
    pub fn notification(self) -> Notification {
        Notification::error(self.title(), self.message())
    }
}

/// Result of running a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    /// Human-readable reason, set when invalid.
    pub reason: Option<String>,
    /// Failure class, set when invalid.
    pub failure: Option<FailureClass>,
    /// Names of the fields that were found blank.
    pub missing: Vec<String>,
}

impl ValidationOutcome {
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
            failure: None,
            missing: Vec::new(),
        }
    }

    pub fn invalid(failure: FailureClass, missing: Vec<String>) -> Self {
        Self {
            valid: false,
            reason: Some(failure.message().to_string()),
            failure: Some(failure),
            missing,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Maps step kinds to their rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationGate;

impl ValidationGate {
    pub fn new() -> Self {
        Self
    }

    /// The rule guarding steps of `kind`.
    pub fn rule_for(&self, kind: StepKind) -> ValidationRule {
        match kind {
            StepKind::Guidelines | StepKind::Confirmation => rules::always_valid,
            StepKind::PersonalInfo | StepKind::TeamLead => rules::personal_info,
            StepKind::TeamMembers => rules::team_members,
            StepKind::UploadDocuments => rules::upload_documents,
        }
    }

    /// Run the rule for `kind` against `form`.
    pub fn check(&self, kind: StepKind, form: &FormData) -> ValidationOutcome {
        (self.rule_for(kind))(form)
    }
}
