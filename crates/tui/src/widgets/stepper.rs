//! Stepper bar showing progress through the flow.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use rf_protocol::flow_models::StepView;

/// Renders one marker and label per step, joined by connectors.
///
/// Completed steps are green with a check, the active step is bold yellow
/// and upcoming steps are dimmed.
pub fn render_stepper(frame: &mut Frame, area: Rect, views: &[StepView]) {
    let mut spans = Vec::with_capacity(views.len() * 2);
    for (index, view) in views.iter().enumerate() {
        let (marker, style) = if view.is_completed {
            ("✓", Style::default().fg(Color::Green))
        } else if view.is_active {
            (
                "●",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };

        spans.push(Span::styled(
            format!("{marker} {}. {}", index + 1, view.label),
            style,
        ));
        if !view.is_last {
            spans.push(Span::styled(" ─ ", Style::default().fg(Color::DarkGray)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Progress"));
    frame.render_widget(paragraph, area);
}
