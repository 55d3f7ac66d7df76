//! Test fixtures for building controllers, forms and config directories.

use rf_core::flow::{Collaborators, FlowController, FlowSettings};
use rf_core::services::{InMemoryStore, RecordingNavigator, RecordingNotifier, SimulatedUploader};
use rf_protocol::flow_models::FlowDefinition;
use rf_protocol::form_models::{fields, FileRef, MemberRecord};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Send core logs to the test output. Safe to call from every test.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("rf_core=debug")
        .with_test_writer()
        .try_init();
}

/// Recording collaborators that tests can inspect after the fact.
#[allow(dead_code)]
pub struct Recorders {
    pub notifier: Arc<RecordingNotifier>,
    pub store: Arc<InMemoryStore>,
    pub navigator: Arc<RecordingNavigator>,
}

#[allow(dead_code)]
impl Recorders {
    pub fn new() -> Self {
        Self {
            notifier: Arc::new(RecordingNotifier::new()),
            store: Arc::new(InMemoryStore::new()),
            navigator: Arc::new(RecordingNavigator::new()),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            notifier: self.notifier.clone(),
            store: self.store.clone(),
            navigator: self.navigator.clone(),
            uploader: Arc::new(SimulatedUploader::new()),
        }
    }
}

/// Hand-off after three seconds to `/events`.
#[allow(dead_code)]
pub fn default_settings() -> FlowSettings {
    FlowSettings {
        completion_delay: Duration::from_millis(3000),
        redirect_path: "/events".to_string(),
        team_member_slots: 5,
    }
}

#[allow(dead_code)]
pub fn controller(
    definition: FlowDefinition,
    event_id: &str,
    recorders: &Recorders,
) -> FlowController {
    FlowController::new(
        definition,
        event_id,
        recorders.collaborators(),
        default_settings(),
    )
    .expect("built-in flows are never empty")
}

/// Fill the required personal information fields.
#[allow(dead_code)]
pub fn fill_personal_info(controller: &mut FlowController) {
    for (key, value) in [
        (fields::NAME, "Jane Doe"),
        (fields::ROLL_NO, "R-2024-17"),
        (fields::EMAIL, "jane@uni.edu"),
    ] {
        controller
            .set_field(key, value.into())
            .expect("flow is editable");
    }
}

#[allow(dead_code)]
pub fn sample_member() -> MemberRecord {
    MemberRecord::new("Ann Lee", "ann@uni.edu", "R-2024-42")
}

#[allow(dead_code)]
pub fn sample_files() -> Vec<FileRef> {
    vec![FileRef::new("student-id.pdf", 48_213)]
}

/// Create a temporary project with a `.regflow/` directory holding a
/// three-step flow and a guideline.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project() -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let rf_dir = temp_dir.path().join(".regflow");

    std::fs::create_dir_all(rf_dir.join("flows"))?;
    std::fs::create_dir_all(rf_dir.join("guidelines"))?;

    std::fs::write(
        rf_dir.join("config.toml"),
        "completion-delay-ms = 1000\nredirect-path = \"/my-registrations\"\n",
    )?;

    let flow_yaml = r#"
name: quick
kind: solo
steps:
  - label: About You
    kind: personal-info
  - label: Documents
    kind: upload-documents
  - label: Done
    kind: confirmation
"#;
    std::fs::write(rf_dir.join("flows/quick.yaml"), flow_yaml)?;

    let guideline_md = r#"---
event-id: open-day
title: Open Day
---
Arrive by 9am."#;
    std::fs::write(rf_dir.join("guidelines/open-day.md"), guideline_md)?;

    Ok(temp_dir)
}
