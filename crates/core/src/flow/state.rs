//! Per-wizard state.
//!
//! The step index can only be moved by the flow controller; the form data
//! is edited freely between transitions.

use rf_protocol::form_models::FormData;

/// Step index and form data of one open wizard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowState {
    current_step_index: usize,
    form_data: FormData,
    completed: bool,
}

impl FlowState {
    /// A fresh state at step 0 with an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    pub fn form_data_mut(&mut self) -> &mut FormData {
        &mut self.form_data
    }

    /// True once the terminal step has succeeded.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn step_forward(&mut self) -> usize {
        self.current_step_index += 1;
        self.current_step_index
    }

    pub(crate) fn step_back(&mut self) -> usize {
        self.current_step_index = self.current_step_index.saturating_sub(1);
        self.current_step_index
    }

    pub(crate) fn complete_at(&mut self, last_index: usize) {
        self.current_step_index = last_index;
        self.completed = true;
    }

    /// Back to step 0 with an empty form.
    pub(crate) fn reset(&mut self) {
        self.current_step_index = 0;
        self.form_data.clear();
        self.completed = false;
    }
}
