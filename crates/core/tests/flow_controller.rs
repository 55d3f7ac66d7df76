//! End-to-end tests for driving a single wizard through its flow.
//!
//! These tests exercise the flow controller with recording collaborators:
//! - Solo registration from guidelines to confirmation
//! - Team registration with partially filled member slots
//! - Hand-off timing and cancellation

mod common;

use common::assertions::*;
use common::fixtures::*;
use rf_core::flow::FlowError;
use rf_core::services::DataStore;
use rf_core::validation::FailureClass;
use rf_protocol::flow_models::FlowDefinition;
use rf_protocol::form_models::{fields, FieldValue, MemberRecord};
use rf_protocol::ipc::Event;
use rf_protocol::notification_models::NotificationKind;
use rf_protocol::registration_models::RegistrationStatus;
use std::time::Duration;
use tokio::sync::mpsc::unbounded_channel;

#[tokio::test(start_paused = true)]
async fn test_solo_registration_end_to_end() {
    init_tracing();
    let recorders = Recorders::new();
    let (tx, mut rx) = unbounded_channel();
    let mut controller = controller(FlowDefinition::solo(), "tech-talk", &recorders).with_events(tx);

    assert_eq!(controller.current_step_index(), 0);
    assert_eq!(controller.advance(), Ok(1));

    controller.set_field(fields::NAME, FieldValue::from("")).unwrap();
    controller.set_field(fields::ROLL_NO, FieldValue::from("X")).unwrap();
    controller.set_field(fields::EMAIL, FieldValue::from("a@b.com")).unwrap();

    let err = controller.advance().unwrap_err();
    match err {
        FlowError::Validation {
            step_index,
            failure,
            missing,
            ..
        } => {
            assert_eq!(step_index, 1);
            assert_eq!(failure, FailureClass::MissingRequiredFields);
            assert_eq!(missing, vec![fields::NAME.to_string()]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(controller.current_step_index(), 1);
    assert_eq!(recorders.notifier.count(), 1);
    assert_eq!(
        recorders.notifier.last().map(|n| n.kind),
        Some(NotificationKind::Error)
    );

    controller.set_field(fields::NAME, FieldValue::from("Jane")).unwrap();
    assert_eq!(controller.advance(), Ok(2));

    let err = controller.complete_terminal_step().await.unwrap_err();
    assert!(matches!(
        err,
        FlowError::Validation {
            failure: FailureClass::NoDocumentsSelected,
            ..
        }
    ));
    assert_eq!(controller.current_step_index(), 2);

    controller.select_files(sample_files()).unwrap();
    let result = controller.complete_terminal_step().await.unwrap();

    assert_eq!(controller.current_step_index(), 3);
    assert_eq!(result.form_data.text(fields::NAME), Some("Jane"));
    assert_eq!(result.form_data.text(fields::ROLL_NO), Some("X"));
    assert_eq!(result.form_data.text(fields::EMAIL), Some("a@b.com"));
    assert_eq!(result.form_data.files(), sample_files().as_slice());

    let events = drain(&mut rx);
    assert_eq!(step_changes(&events), vec![1, 2, 3]);
    assert_eq!(count_completions(&events), 1);

    let stepper = controller.stepper();
    assert!(stepper[..3].iter().all(|view| view.is_completed));
    assert!(stepper[3].is_active && stepper[3].is_last);
}

#[tokio::test(start_paused = true)]
async fn test_team_members_need_one_complete_slot() {
    init_tracing();
    let recorders = Recorders::new();
    let mut controller = controller(FlowDefinition::team(), "hackathon-2024", &recorders);

    controller.advance().unwrap();
    fill_personal_info(&mut controller);
    controller
        .set_field(fields::TEAM_NAME, FieldValue::from("Byte Me"))
        .unwrap();
    assert_eq!(controller.advance(), Ok(2));

    for slot in 0..5 {
        controller.set_member(slot, MemberRecord::default()).unwrap();
    }
    assert_eq!(controller.form_data().members().len(), 5);

    let err = controller.advance().unwrap_err();
    assert!(matches!(
        err,
        FlowError::Validation {
            failure: FailureClass::NoCompleteTeamMember,
            ..
        }
    ));
    assert_eq!(controller.current_step_index(), 2);
    assert_eq!(
        recorders.notifier.last().map(|n| n.title),
        Some("Team incomplete".to_string())
    );

    // A partially filled slot is not enough.
    controller
        .set_member(3, MemberRecord::new("Ann Lee", "", "R-2024-42"))
        .unwrap();
    assert!(controller.advance().is_err());

    controller.set_member(3, sample_member()).unwrap();
    assert_eq!(controller.advance(), Ok(3));

    assert_eq!(
        controller.advance(),
        Err(FlowError::TerminalStepRequiresCompletion(3))
    );

    controller.select_files(sample_files()).unwrap();
    let result = controller.complete_terminal_step().await.unwrap();
    assert_eq!(result.flow_name, "team");
    assert_eq!(controller.current_step_index(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_retreat_keeps_entered_data() {
    init_tracing();
    let recorders = Recorders::new();
    let mut controller = controller(FlowDefinition::solo(), "tech-talk", &recorders);

    controller.advance().unwrap();
    fill_personal_info(&mut controller);
    controller.advance().unwrap();

    assert_eq!(controller.retreat(), 1);
    assert_eq!(controller.retreat(), 0);
    assert_eq!(controller.retreat(), 0);
    assert_eq!(controller.form_data().text(fields::NAME), Some("Jane Doe"));
    assert_eq!(recorders.notifier.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_handoff_fires_after_delay() {
    init_tracing();
    let recorders = Recorders::new();
    let mut controller = controller(FlowDefinition::solo(), "tech-talk", &recorders);

    controller.advance().unwrap();
    fill_personal_info(&mut controller);
    controller.advance().unwrap();
    controller.select_files(sample_files()).unwrap();
    let result = controller.complete_terminal_step().await.unwrap();

    tokio::time::sleep(Duration::from_millis(2999)).await;
    assert!(recorders.store.is_empty());
    assert!(recorders.navigator.paths().is_empty());
    assert!(controller.handoff_pending());

    tokio::time::sleep(Duration::from_millis(2)).await;
    tokio::task::yield_now().await;

    let stored = recorders.store.list(&|_| true);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].receipt, result.receipt);
    assert_eq!(stored[0].status, RegistrationStatus::Pending);
    assert_eq!(recorders.navigator.paths(), vec!["/events"]);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_handoff_never_fires() {
    init_tracing();
    let recorders = Recorders::new();
    let mut controller = controller(FlowDefinition::solo(), "tech-talk", &recorders);

    controller.advance().unwrap();
    fill_personal_info(&mut controller);
    controller.advance().unwrap();
    controller.select_files(sample_files()).unwrap();
    controller.complete_terminal_step().await.unwrap();

    assert!(controller.cancel_handoff());
    assert!(!controller.cancel_handoff());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(recorders.store.is_empty());
    assert!(recorders.navigator.paths().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_reset_after_completion_keeps_handoff() {
    init_tracing();
    let recorders = Recorders::new();
    let (tx, mut rx) = unbounded_channel();
    let mut controller = controller(FlowDefinition::solo(), "tech-talk", &recorders).with_events(tx);

    controller.advance().unwrap();
    fill_personal_info(&mut controller);
    controller.advance().unwrap();
    controller.select_files(sample_files()).unwrap();
    controller.complete_terminal_step().await.unwrap();

    controller.reset();
    assert_eq!(controller.current_step_index(), 0);
    assert!(!controller.is_completed());
    assert!(controller.form_data().is_empty());
    assert!(drain(&mut rx)
        .iter()
        .any(|event| matches!(event, Event::FlowReset { .. })));

    let handles = controller.take_handoffs();
    assert_eq!(handles.len(), 1);
    for handle in handles {
        assert!(handle.wait().await);
    }
    assert_eq!(recorders.store.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_second_submission_keeps_first_handoff() {
    init_tracing();
    let recorders = Recorders::new();
    let mut controller = controller(FlowDefinition::solo(), "tech-talk", &recorders);

    controller.advance().unwrap();
    fill_personal_info(&mut controller);
    controller.advance().unwrap();
    controller.select_files(sample_files()).unwrap();
    let first = controller.complete_terminal_step().await.unwrap();

    controller.reset();
    controller.advance().unwrap();
    fill_personal_info(&mut controller);
    controller.advance().unwrap();
    controller.select_files(sample_files()).unwrap();
    let second = controller.complete_terminal_step().await.unwrap();

    tokio::time::sleep(Duration::from_secs(10)).await;
    tokio::task::yield_now().await;

    let receipts: Vec<_> = recorders
        .store
        .list(&|_| true)
        .into_iter()
        .map(|registration| registration.receipt)
        .collect();
    assert_eq!(receipts.len(), 2);
    assert!(receipts.contains(&first.receipt));
    assert!(receipts.contains(&second.receipt));
    assert_eq!(recorders.navigator.paths(), vec!["/events", "/events"]);
    assert!(!controller.handoff_pending());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_aborts_every_pending_handoff() {
    init_tracing();
    let recorders = Recorders::new();
    let mut controller = controller(FlowDefinition::solo(), "tech-talk", &recorders);

    for event_id in ["tech-talk", "hackathon"] {
        controller.open_for(event_id);
        controller.advance().unwrap();
        fill_personal_info(&mut controller);
        controller.advance().unwrap();
        controller.select_files(sample_files()).unwrap();
        controller.complete_terminal_step().await.unwrap();
    }

    assert!(controller.cancel_handoff());
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(recorders.store.is_empty());
    assert!(recorders.navigator.paths().is_empty());
}
