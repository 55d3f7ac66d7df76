//! Client-side mirror of one open wizard.
//!
//! The core owns the real flow state. The TUI keeps a copy that is updated
//! optimistically on every edit and corrected by core events, so rendering
//! never waits on the core.

use rf_core::config::models::AppConfig;
use rf_core::flow::layout::{fields_for_step, FieldSpec};
use rf_core::stepper;
use rf_protocol::flow_models::{StepDefinition, StepKind, StepView};
use rf_protocol::form_models::FormData;
use rf_protocol::notification_models::Notification;
use rf_protocol::registration_models::TerminalResult;
use uuid::Uuid;

/// What the TUI knows about the open wizard.
#[derive(Debug, Clone)]
pub struct WizardView {
    pub flow_id: Option<Uuid>,
    pub event_id: String,
    pub flow_name: String,
    pub steps: Vec<StepDefinition>,
    pub current_step: usize,
    pub form: FormData,
    /// Index into [`Self::fields`] of the focused input.
    pub focus: usize,
    /// Path being typed on the documents field.
    pub file_input: String,
    pub toast: Option<Notification>,
    pub result: Option<TerminalResult>,
    pub redirect: Option<String>,
    pub guideline: Option<(String, String)>,
    pub team_slots: usize,
}

impl WizardView {
    /// An empty view waiting for `FlowOpened`.
    pub fn new(config: &AppConfig, event_id: &str, flow_name: &str) -> Self {
        Self {
            flow_id: None,
            event_id: event_id.to_string(),
            flow_name: flow_name.to_string(),
            steps: config
                .flow(flow_name)
                .map(|flow| flow.steps.clone())
                .unwrap_or_default(),
            current_step: 0,
            form: FormData::new(),
            focus: 0,
            file_input: String::new(),
            toast: None,
            result: None,
            redirect: None,
            guideline: config
                .guideline_for(event_id)
                .map(|g| (g.title.clone(), g.body.clone())),
            team_slots: config.portal.team_member_slots,
        }
    }

    pub fn current_kind(&self) -> Option<StepKind> {
        self.steps.get(self.current_step).map(|step| step.kind)
    }

    /// Inputs of the current step, in focus order.
    pub fn fields(&self) -> Vec<FieldSpec> {
        self.current_kind()
            .map(|kind| fields_for_step(kind, self.team_slots))
            .unwrap_or_default()
    }

    pub fn focused_field(&self) -> Option<FieldSpec> {
        self.fields().into_iter().nth(self.focus)
    }

    pub fn stepper(&self) -> Vec<StepView> {
        stepper::project(&self.steps, self.current_step)
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    /// Move to `index`, resetting focus.
    pub fn go_to_step(&mut self, index: usize) {
        if index != self.current_step {
            self.focus = 0;
            self.file_input.clear();
        }
        self.current_step = index;
    }

    /// Back to step 0 with an empty form.
    pub fn clear(&mut self) {
        self.go_to_step(0);
        self.focus = 0;
        self.form.clear();
        self.file_input.clear();
        self.result = None;
    }

    pub fn focus_next(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }
}
