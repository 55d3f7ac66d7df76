//! Form panel for the active step.
//!
//! Renders the step's fields (or the guideline / confirmation text for
//! steps without inputs) and turns typing into `Op`s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use rf_core::flow::layout::{FieldSpec, FieldTarget};
use rf_protocol::flow_models::StepKind;
use rf_protocol::form_models::FileRef;
use rf_protocol::ipc::Op;
use rf_protocol::notification_models::Notification;
use std::path::Path;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::event::EventStatus;
use crate::wizard::WizardView;

/// Handle editing keys for the focused field.
///
/// Returns `NotConsumed` for anything that is not an edit so the caller can
/// apply global bindings.
pub fn handle_key_event(
    key_event: KeyEvent,
    view: &mut WizardView,
    op_tx: &UnboundedSender<Op>,
) -> EventStatus {
    if key_event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return EventStatus::NotConsumed;
    }
    let (Some(flow_id), Some(field)) = (view.flow_id, view.focused_field()) else {
        return EventStatus::NotConsumed;
    };
    if view.is_completed() {
        return EventStatus::NotConsumed;
    }

    match (key_event.code, field.target) {
        (KeyCode::Tab, _) => view.focus_next(),
        (KeyCode::BackTab, _) => view.focus_prev(),
        (KeyCode::Enter, FieldTarget::Files) => add_file(view, op_tx, flow_id),
        (KeyCode::Enter, _) => view.focus_next(),
        (KeyCode::Backspace, FieldTarget::Files) => {
            if view.file_input.pop().is_none() {
                let mut files = view.form.files().to_vec();
                if files.pop().is_some() {
                    select_files(view, op_tx, flow_id, files);
                }
            }
        }
        (KeyCode::Char(c), FieldTarget::Files) => view.file_input.push(c),
        (KeyCode::Backspace, _) => {
            let mut value = field.read(&view.form);
            value.pop();
            write_field(view, op_tx, flow_id, &field, value);
        }
        (KeyCode::Char(c), _) => {
            let mut value = field.read(&view.form);
            value.push(c);
            write_field(view, op_tx, flow_id, &field, value);
        }
        _ => return EventStatus::NotConsumed,
    }
    EventStatus::Consumed
}

/// Append pasted text to the focused field.
pub fn handle_paste(text: &str, view: &mut WizardView, op_tx: &UnboundedSender<Op>) {
    let (Some(flow_id), Some(field)) = (view.flow_id, view.focused_field()) else {
        return;
    };
    if view.is_completed() {
        return;
    }
    let text = text.trim_end_matches(['\r', '\n']);
    match field.target {
        FieldTarget::Files => view.file_input.push_str(text),
        _ => {
            let value = field.read(&view.form) + text;
            write_field(view, op_tx, flow_id, &field, value);
        }
    }
}

fn write_field(
    view: &mut WizardView,
    op_tx: &UnboundedSender<Op>,
    flow_id: Uuid,
    field: &FieldSpec,
    value: String,
) {
    let op = match field.target {
        FieldTarget::Text(key) => {
            view.form.set_text(key, value.clone());
            Op::SetField {
                flow_id,
                field: key.to_string(),
                value: value.into(),
            }
        }
        FieldTarget::Member { slot, part } => {
            let mut member = view.form.members().get(slot).cloned().unwrap_or_default();
            part.write(&mut member, value);
            view.form.set_member(slot, member.clone());
            Op::SetMember {
                flow_id,
                slot,
                member,
            }
        }
        FieldTarget::Files => return,
    };
    let _ = op_tx.send(op);
}

fn select_files(
    view: &mut WizardView,
    op_tx: &UnboundedSender<Op>,
    flow_id: Uuid,
    files: Vec<FileRef>,
) {
    view.form.set_files(files.clone());
    let _ = op_tx.send(Op::SelectFiles { flow_id, files });
}

/// Turn the typed path into a file reference. Only metadata is read.
fn add_file(view: &mut WizardView, op_tx: &UnboundedSender<Op>, flow_id: Uuid) {
    let input = view.file_input.trim().to_string();
    if input.is_empty() {
        return;
    }
    let path = Path::new(&input);
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.clone());
            let mut file = FileRef::new(name, meta.len());
            file.mime_type = mime_for(path).map(str::to_string);

            let mut files = view.form.files().to_vec();
            files.push(file);
            select_files(view, op_tx, flow_id, files);
            view.file_input.clear();
        }
        _ => {
            view.toast = Some(Notification::error(
                "File not found",
                format!("{input} is not a readable file."),
            ));
        }
    }
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "doc" => Some("application/msword"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        _ => None,
    }
}

/// Render the body of the active step.
pub fn render_form(frame: &mut Frame, area: Rect, view: &WizardView) {
    let title = view
        .steps
        .get(view.current_step)
        .map(|step| step.label.clone())
        .unwrap_or_default();
    let block = Block::default().borders(Borders::ALL).title(title);

    let lines = match view.current_kind() {
        None => vec![Line::from("Opening registration...")],
        Some(StepKind::Guidelines) => guideline_lines(view),
        Some(StepKind::Confirmation) => confirmation_lines(view),
        Some(_) => field_lines(view),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn guideline_lines(view: &WizardView) -> Vec<Line<'static>> {
    match &view.guideline {
        Some((title, body)) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];
            lines.extend(body.lines().map(|line| Line::from(line.to_string())));
            lines
        }
        None => vec![Line::from(format!(
            "No guidelines were published for {}. Press Ctrl-N to continue.",
            view.event_id
        ))],
    }
}

fn confirmation_lines(view: &WizardView) -> Vec<Line<'static>> {
    match &view.result {
        Some(result) => vec![
            Line::from(Span::styled(
                "Registration submitted",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Event:   {}", result.event_id)),
            Line::from(format!("Receipt: {}", result.receipt)),
            Line::from(""),
            Line::from("You will be redirected shortly."),
        ],
        None => vec![Line::from("Not submitted yet.")],
    }
}

fn field_lines(view: &WizardView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, field) in view.fields().iter().enumerate() {
        let focused = index == view.focus;
        let marker = if focused { "> " } else { "  " };
        let required = if field.required { "*" } else { "" };
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{}{}: ", field.label, required), label_style),
            Span::raw(field.read(&view.form)),
        ]));

        if field.target == FieldTarget::Files {
            lines.push(Line::from(vec![
                Span::raw("    path: "),
                Span::styled(
                    view.file_input.clone(),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use rf_core::config::models::AppConfig;
    use rf_protocol::form_models::fields;
    use tokio::sync::mpsc::unbounded_channel;

    fn open_view(flow: &str, step: usize) -> WizardView {
        let mut view = WizardView::new(&AppConfig::default(), "tech-talk", flow);
        view.flow_id = Some(Uuid::new_v4());
        view.go_to_step(step);
        view
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_typing_sends_set_field() {
        let mut view = open_view("solo", 1);
        let (op_tx, mut op_rx) = unbounded_channel();

        for c in "Jo".chars() {
            let status = handle_key_event(KeyEvent::from(KeyCode::Char(c)), &mut view, &op_tx);
            assert_eq!(status, EventStatus::Consumed);
        }
        handle_key_event(KeyEvent::from(KeyCode::Backspace), &mut view, &op_tx);

        assert_eq!(view.form.text(fields::NAME), Some("J"));
        let mut last = None;
        while let Ok(op) = op_rx.try_recv() {
            last = Some(op);
        }
        match last {
            Some(Op::SetField { field, value, .. }) => {
                assert_eq!(field, fields::NAME);
                assert_eq!(value.as_text(), Some("J"));
            }
            other => panic!("unexpected op: {other:?}"),
        }
    }

    #[test]
    fn test_member_slot_edit_sends_whole_record() {
        let mut view = open_view("team", 2);
        let (op_tx, mut op_rx) = unbounded_channel();

        // Member 1 email
        handle_key_event(KeyEvent::from(KeyCode::Tab), &mut view, &op_tx);
        handle_key_event(KeyEvent::from(KeyCode::Char('a')), &mut view, &op_tx);

        match op_rx.try_recv() {
            Ok(Op::SetMember { slot, member, .. }) => {
                assert_eq!(slot, 0);
                assert_eq!(member.email, "a");
                assert!(member.name.is_empty());
            }
            other => panic!("unexpected op: {other:?}"),
        }
    }

    #[test]
    fn test_control_keys_are_not_consumed() {
        let mut view = open_view("solo", 1);
        let (op_tx, _op_rx) = unbounded_channel();

        let status = handle_key_event(
            KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
            &mut view,
            &op_tx,
        );
        assert_eq!(status, EventStatus::NotConsumed);
    }

    #[test]
    fn test_enter_adds_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let mut view = open_view("solo", 2);
        let (op_tx, mut op_rx) = unbounded_channel();
        handle_paste(&path.to_string_lossy(), &mut view, &op_tx);
        handle_key_event(KeyEvent::from(KeyCode::Enter), &mut view, &op_tx);

        assert_eq!(view.form.files().len(), 1);
        assert_eq!(view.form.files()[0].name, "id.pdf");
        assert_eq!(view.form.files()[0].size_bytes, 8);
        assert_eq!(
            view.form.files()[0].mime_type.as_deref(),
            Some("application/pdf")
        );
        assert!(view.file_input.is_empty());
        assert!(matches!(op_rx.try_recv(), Ok(Op::SelectFiles { .. })));
    }

    #[test]
    fn test_enter_on_missing_file_shows_toast() {
        let mut view = open_view("solo", 2);
        let (op_tx, mut op_rx) = unbounded_channel();
        view.file_input = "/no/such/file.pdf".to_string();

        handle_key_event(KeyEvent::from(KeyCode::Enter), &mut view, &op_tx);

        assert!(view.form.files().is_empty());
        assert_eq!(
            view.toast.as_ref().map(|t| t.title.as_str()),
            Some("File not found")
        );
        assert!(op_rx.try_recv().is_err());
    }

    #[test]
    fn test_render_personal_info_fields() {
        let mut view = open_view("solo", 1);
        view.form.set_text(fields::NAME, "Jane");

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| render_form(frame, frame.area(), &view))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Personal Info"));
        assert!(text.contains("> Full name*: Jane"));
        assert!(text.contains("Phone: "));
    }

    #[test]
    fn test_render_guidelines_fallback() {
        let view = open_view("solo", 0);

        let mut terminal = Terminal::new(TestBackend::new(80, 6)).unwrap();
        terminal
            .draw(|frame| render_form(frame, frame.area(), &view))
            .unwrap();

        assert!(buffer_text(&terminal).contains("No guidelines were published"));
    }
}
