//! Event handling utilities for the TUI.
//!
//! This module provides functions for handling:
//! - Core events (from rf-core), applied to the [`WizardView`] mirror
//! - Keyboard events, either edits for the focused field or global bindings

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rf_protocol::ipc::{Event, Op};
use tokio::sync::mpsc::UnboundedSender;

use crate::event::EventStatus;
use crate::widgets::form;
use crate::wizard::WizardView;

/// Handle an event received from the core.
///
/// Returns `true` if the application should exit.
pub fn handle_core_event(view: &mut WizardView, event: Event) -> bool {
    match event {
        Event::FlowOpened {
            flow_id,
            event_id,
            flow_name,
            ..
        } => {
            view.flow_id = Some(flow_id);
            view.event_id = event_id;
            view.flow_name = flow_name;
        }
        Event::StepChanged {
            flow_id,
            step_index,
        } if view.flow_id == Some(flow_id) => {
            view.go_to_step(step_index);
            // A transition means the previous complaint was resolved.
            view.toast = None;
        }
        Event::FlowReset { flow_id } if view.flow_id == Some(flow_id) => {
            view.clear();
            view.toast = None;
        }
        Event::Notification {
            flow_id,
            notification,
        } if view.flow_id == Some(flow_id) => {
            view.toast = Some(notification);
        }
        Event::FlowCompleted { flow_id, result } if view.flow_id == Some(flow_id) => {
            view.form = result.form_data.clone();
            view.result = Some(result);
        }
        Event::NavigationRequested { path } => {
            view.redirect = Some(path);
            return true;
        }
        Event::FlowClosed { flow_id } if view.flow_id == Some(flow_id) => {
            view.flow_id = None;
            return true;
        }
        _ => {}
    }
    false
}

/// Handle a keyboard event from the user.
///
/// Returns `true` if the application should exit, `false` otherwise.
pub fn handle_keyboard_event(
    key_event: KeyEvent,
    view: &mut WizardView,
    op_tx: &UnboundedSender<Op>,
) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }
    if key_event.code == KeyCode::Esc {
        return true;
    }
    if form::handle_key_event(key_event, view, op_tx) == EventStatus::Consumed {
        return false;
    }

    let Some(flow_id) = view.flow_id else {
        return false;
    };
    if !key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    let op = match key_event.code {
        KeyCode::Char('n') => Op::Advance { flow_id },
        KeyCode::Char('p') => Op::Retreat { flow_id },
        KeyCode::Char('s') => Op::CompleteTerminalStep { flow_id },
        KeyCode::Char('r') => Op::Reset { flow_id },
        KeyCode::Char('c') => return true,
        _ => return false,
    };
    tracing::debug!(?op, "key binding");
    let _ = op_tx.send(op);
    false
}
