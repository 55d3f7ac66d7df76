//! Flow controller.
//!
//! The controller owns a wizard's [`FlowState`] and mediates every
//! transition. Steps form a linear chain `0..N`; the last step is the
//! confirmation screen and is entered only by completing the step before
//! it. A rejected transition leaves the state untouched and raises exactly
//! one notification.

use chrono::Utc;
use rf_protocol::config_models::PortalConfig;
use rf_protocol::flow_models::{FlowDefinition, StepDefinition, StepView};
use rf_protocol::form_models::{FieldValue, FileRef, FormData, MemberRecord};
use rf_protocol::ipc::Event;
use rf_protocol::notification_models::Notification;
use rf_protocol::registration_models::{Registration, TerminalResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::flow::error::{FlowError, FlowResult};
use crate::flow::handoff::{self, HandoffHandle, HandoffTarget};
use crate::flow::state::FlowState;
use crate::services::navigation::{Navigator, RecordingNavigator};
use crate::services::notifier::{Notifier, TracingNotifier};
use crate::services::store::{DataStore, InMemoryStore};
use crate::services::upload::{SimulatedUploader, Uploader};
use crate::stepper;
use crate::validation::{FailureClass, ValidationGate};

/// Timing and routing of the post-completion hand-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSettings {
    pub completion_delay: Duration,
    pub redirect_path: String,
    /// Number of team member slots a form may fill.
    pub team_member_slots: usize,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self::from(&PortalConfig::default())
    }
}

impl From<&PortalConfig> for FlowSettings {
    fn from(config: &PortalConfig) -> Self {
        Self {
            completion_delay: Duration::from_millis(config.completion_delay_ms),
            redirect_path: config.redirect_path.clone(),
            team_member_slots: config.team_member_slots,
        }
    }
}

/// External services a controller talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub notifier: Arc<dyn Notifier>,
    pub store: Arc<dyn DataStore>,
    pub navigator: Arc<dyn Navigator>,
    pub uploader: Arc<dyn Uploader>,
}

impl Collaborators {
    /// Log-only notifications, an in-memory store, a recording navigator and
    /// the simulated uploader.
    pub fn in_memory() -> Self {
        Self {
            notifier: Arc::new(TracingNotifier),
            store: Arc::new(InMemoryStore::new()),
            navigator: Arc::new(RecordingNavigator::new()),
            uploader: Arc::new(SimulatedUploader::new()),
        }
    }
}

/// Drives one open wizard.
pub struct FlowController {
    id: Uuid,
    event_id: String,
    definition: FlowDefinition,
    state: FlowState,
    gate: ValidationGate,
    collaborators: Collaborators,
    settings: FlowSettings,
    events_tx: Option<UnboundedSender<Event>>,
    handoffs: Vec<HandoffHandle>,
}

impl FlowController {
    /// Create a controller at step 0 with an empty form.
    ///
    /// # Errors
    ///
    /// - [`FlowError::EmptyStepSet`] if `definition` has no steps
    /// - [`FlowError::MissingConfirmation`] unless the last of at least two
    ///   steps is the confirmation step
    pub fn new(
        definition: FlowDefinition,
        event_id: impl Into<String>,
        collaborators: Collaborators,
        settings: FlowSettings,
    ) -> FlowResult<Self> {
        if definition.is_empty() {
            return Err(FlowError::EmptyStepSet(definition.name));
        }
        if !definition.ends_with_confirmation() {
            return Err(FlowError::MissingConfirmation(definition.name));
        }
        let controller = Self {
            id: Uuid::new_v4(),
            event_id: event_id.into(),
            definition,
            state: FlowState::new(),
            gate: ValidationGate::new(),
            collaborators,
            settings,
            events_tx: None,
            handoffs: Vec::new(),
        };
        tracing::debug!(
            flow_id = %controller.id,
            flow = %controller.definition.name,
            event_id = %controller.event_id,
            "flow opened"
        );
        Ok(controller)
    }

    /// Send step and completion events to `events_tx`.
    pub fn with_events(mut self, events_tx: UnboundedSender<Event>) -> Self {
        self.events_tx = Some(events_tx);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn definition(&self) -> &FlowDefinition {
        &self.definition
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.definition.steps
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn current_step_index(&self) -> usize {
        self.state.current_step_index()
    }

    pub fn current_step(&self) -> &StepDefinition {
        // The index never leaves 0..len and len >= 1.
        &self.definition.steps[self.state.current_step_index()]
    }

    pub fn form_data(&self) -> &FormData {
        self.state.form_data()
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    /// Stepper rows for the current index.
    pub fn stepper(&self) -> Vec<StepView> {
        stepper::project(&self.definition.steps, self.state.current_step_index())
    }

    /// True while at least one hand-off is scheduled and has not run yet.
    pub fn handoff_pending(&self) -> bool {
        self.handoffs.iter().any(|handle| !handle.is_finished())
    }

    /// Take the hand-off handles, oldest first, e.g. to await them.
    pub fn take_handoffs(&mut self) -> Vec<HandoffHandle> {
        std::mem::take(&mut self.handoffs)
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: FieldValue) -> FlowResult<()> {
        self.ensure_editable()?;
        self.state.form_data_mut().set(key, value);
        Ok(())
    }

    /// Replace the team member in `slot`.
    ///
    /// # Errors
    ///
    /// [`FlowError::MemberSlotOutOfRange`] if `slot` is not below the
    /// configured number of team member slots.
    pub fn set_member(&mut self, slot: usize, member: MemberRecord) -> FlowResult<()> {
        self.ensure_editable()?;
        let slots = self.settings.team_member_slots;
        if slot >= slots {
            return Err(FlowError::MemberSlotOutOfRange { slot, slots });
        }
        self.state.form_data_mut().set_member(slot, member);
        Ok(())
    }

    pub fn select_files(&mut self, files: Vec<FileRef>) -> FlowResult<()> {
        self.ensure_editable()?;
        self.state.form_data_mut().set_files(files);
        Ok(())
    }

    /// Move to the next step if the current step's gate passes.
    ///
    /// Returns the new step index.
    ///
    /// # Errors
    ///
    /// - [`FlowError::Validation`] if the gate rejects the form; the user is
    ///   notified once and nothing changes
    /// - [`FlowError::TerminalStepRequiresCompletion`] on the final content
    ///   step, which is left through [`Self::complete_terminal_step`]
    /// - [`FlowError::AtLastStep`] on the last step
    pub fn advance(&mut self) -> FlowResult<usize> {
        let current = self.state.current_step_index();
        if current >= self.definition.last_index() {
            return Err(FlowError::AtLastStep);
        }
        if self.definition.terminal_content_index() == Some(current) {
            return Err(FlowError::TerminalStepRequiresCompletion(current));
        }

        self.check_step(current)?;

        let next = self.state.step_forward();
        tracing::debug!(flow_id = %self.id, from = current, to = next, "step advanced");
        self.emit(Event::StepChanged {
            flow_id: self.id,
            step_index: next,
        });
        Ok(next)
    }

    /// Move to the previous step, stopping at 0. Never validated.
    pub fn retreat(&mut self) -> usize {
        let before = self.state.current_step_index();
        let after = self.state.step_back();
        if after != before {
            tracing::debug!(flow_id = %self.id, from = before, to = after, "step retreated");
            self.emit(Event::StepChanged {
                flow_id: self.id,
                step_index: after,
            });
        }
        after
    }

    /// Submit the flow from its final content step.
    ///
    /// On success the flow moves to the confirmation step, the terminal
    /// result is emitted and returned, and the hand-off to the store and
    /// navigator is scheduled after the configured delay.
    ///
    /// # Errors
    ///
    /// - [`FlowError::AlreadyComplete`] if the flow was already submitted
    /// - [`FlowError::NotAtTerminalStep`] away from the final content step
    /// - [`FlowError::Validation`] if the step's gate rejects the form
    /// - [`FlowError::Upload`] if the uploader rejects the submission
    ///
    /// Validation and upload failures notify the user; none of the errors
    /// change the state.
    pub async fn complete_terminal_step(&mut self) -> FlowResult<TerminalResult> {
        if self.state.is_completed() {
            return Err(FlowError::AlreadyComplete);
        }
        let current = self.state.current_step_index();
        if self.definition.terminal_content_index() != Some(current) {
            return Err(FlowError::NotAtTerminalStep { current });
        }

        self.check_step(current)?;

        let uploader = Arc::clone(&self.collaborators.uploader);
        let files = self.state.form_data().files().to_vec();
        let receipt = match uploader.submit(&files, self.state.form_data()).await {
            Ok(receipt) => receipt,
            Err(err) => {
                tracing::warn!(flow_id = %self.id, error = %err, "upload rejected");
                self.collaborators
                    .notifier
                    .notify(self.id, Notification::error("Upload failed", err.to_string()));
                return Err(err.into());
            }
        };

        let last = self.definition.last_index();
        self.state.complete_at(last);

        let result = TerminalResult {
            flow_id: self.id,
            event_id: self.event_id.clone(),
            flow_name: self.definition.name.clone(),
            form_data: self.state.form_data().clone(),
            receipt,
            completed_at: Utc::now(),
        };
        tracing::info!(flow_id = %self.id, event_id = %self.event_id, %receipt, "flow completed");

        self.collaborators.notifier.notify(
            self.id,
            Notification::info(
                "Registration submitted",
                format!("Your registration for {} has been received.", self.event_id),
            ),
        );
        self.emit(Event::StepChanged {
            flow_id: self.id,
            step_index: last,
        });
        self.emit(Event::FlowCompleted {
            flow_id: self.id,
            result: result.clone(),
        });

        self.handoffs.retain(|handle| !handle.is_finished());
        self.handoffs.push(handoff::schedule(
            self.id,
            self.settings.completion_delay,
            Registration::from(result.clone()),
            HandoffTarget {
                store: Arc::clone(&self.collaborators.store),
                navigator: Arc::clone(&self.collaborators.navigator),
                redirect_path: self.settings.redirect_path.clone(),
            },
        ));

        Ok(result)
    }

    /// Return to step 0 with an empty form.
    ///
    /// Hand-offs that were already scheduled are left to run: the
    /// submissions they carry have been accepted.
    pub fn reset(&mut self) {
        self.state.reset();
        tracing::debug!(flow_id = %self.id, "flow reset");
        self.emit(Event::FlowReset { flow_id: self.id });
    }

    /// Point the wizard at `event_id`, resetting it if it was showing a
    /// different event. Returns `true` if the state was reset.
    pub fn open_for(&mut self, event_id: &str) -> bool {
        if self.event_id == event_id {
            return false;
        }
        self.event_id = event_id.to_string();
        self.reset();
        true
    }

    /// Cancel every scheduled hand-off. Returns `true` if any was pending.
    pub fn cancel_handoff(&mut self) -> bool {
        let mut cancelled = 0;
        for handle in self.handoffs.drain(..) {
            if !handle.is_finished() {
                handle.cancel();
                cancelled += 1;
            }
        }
        if cancelled > 0 {
            tracing::info!(flow_id = %self.id, cancelled, "hand-off cancelled");
        }
        cancelled > 0
    }

    fn ensure_editable(&self) -> FlowResult<()> {
        if self.state.is_completed() {
            Err(FlowError::AlreadyComplete)
        } else {
            Ok(())
        }
    }

    /// Run the gate of step `index`, notifying once on failure.
    fn check_step(&self, index: usize) -> FlowResult<()> {
        let step = &self.definition.steps[index];
        let outcome = self.gate.check(step.kind, self.state.form_data());
        match outcome.failure {
            None => Ok(()),
            Some(failure) => Err(self.reject(index, failure, outcome.missing)),
        }
    }

    fn reject(&self, step_index: usize, failure: FailureClass, missing: Vec<String>) -> FlowError {
        tracing::info!(flow_id = %self.id, step_index, ?missing, "step rejected");
        self.collaborators
            .notifier
            .notify(self.id, failure.notification());
        FlowError::Validation {
            step_index,
            failure,
            reason: failure.message().to_string(),
            missing,
        }
    }

    fn emit(&self, event: Event) {
        if let Some(tx) = &self.events_tx {
            let _ = tx.send(event);
        }
    }
}

impl std::fmt::Debug for FlowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowController")
            .field("id", &self.id)
            .field("event_id", &self.event_id)
            .field("flow", &self.definition.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
