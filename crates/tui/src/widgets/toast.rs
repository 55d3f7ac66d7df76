//! Notification line at the bottom of the screen.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use rf_protocol::notification_models::{Notification, NotificationKind};

pub const KEY_HELP: &str =
    "Tab/Shift-Tab field  Ctrl-N next  Ctrl-P back  Ctrl-S submit  Ctrl-R reset  Esc quit";

/// Renders the latest notification, or the key help when there is none.
pub fn render_toast(frame: &mut Frame, area: Rect, toast: Option<&Notification>) {
    let (title, line, color) = match toast {
        Some(notification) => {
            let color = match notification.kind {
                NotificationKind::Info => Color::Green,
                NotificationKind::Error => Color::Red,
            };
            let line = Line::from(vec![
                Span::styled(
                    format!("{}: ", notification.title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(notification.message.clone()),
            ]);
            (notification.title.clone(), line, color)
        }
        None => ("Keys".to_string(), Line::from(KEY_HELP), Color::DarkGray),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color));
    frame.render_widget(Paragraph::new(line).block(block), area);
}
