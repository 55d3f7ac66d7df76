//! TUI application state and event loop.
//!
//! [`App`] mirrors one wizard and runs the `tokio::select!` loop over core
//! events and terminal input. [`run_app`] wires it to a [`WizardManager`]
//! running on a background task.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use rf_core::config::models::AppConfig;
use rf_core::state::WizardManager;
use rf_protocol::ipc::{Event, Op};
use rf_protocol::registration_models::TerminalResult;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::select;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_stream::StreamExt;

use crate::event_handler;
use crate::tui::{FrameRequester, Tui, TuiEvent};
use crate::widgets::{form, render_form, render_stepper, render_toast};
use crate::wizard::WizardView;

/// How long a notification stays on screen.
const TOAST_TTL: Duration = Duration::from_secs(5);

/// What to open.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: AppConfig,
    pub event_id: String,
    pub flow_name: String,
}

/// How the session ended.
#[derive(Debug, Clone, Default)]
pub struct AppOutcome {
    /// Present if the registration was submitted.
    pub result: Option<TerminalResult>,
    /// Present if the hand-off redirected the user.
    pub redirect: Option<String>,
}

pub struct App {
    pub view: WizardView,
    pub op_tx: UnboundedSender<Op>,
    pub event_rx: UnboundedReceiver<Event>,
    pub should_exit: bool,
    toast_deadline: Option<Instant>,
}

impl App {
    pub fn new(
        view: WizardView,
        op_tx: UnboundedSender<Op>,
        event_rx: UnboundedReceiver<Event>,
    ) -> Self {
        Self {
            view,
            op_tx,
            event_rx,
            should_exit: false,
            toast_deadline: None,
        }
    }

    /// Main event loop.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();
        let frames = tui.frame_requester();

        frames.schedule_frame();

        while !self.should_exit {
            select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_core_event(event, &frames);
                    frames.schedule_frame();
                }
                Some(tui_event) = tui_events.next() => {
                    self.handle_tui_event(tui, tui_event, &frames)?;
                }
                else => break,
            }
        }

        Ok(())
    }

    fn handle_core_event(&mut self, event: Event, frames: &FrameRequester) {
        let had_toast = self.view.toast.clone();
        if event_handler::handle_core_event(&mut self.view, event) {
            self.should_exit = true;
        }
        if self.view.toast.is_some() && self.view.toast != had_toast {
            self.toast_deadline = Some(Instant::now() + TOAST_TTL);
            frames.schedule_frame_in(TOAST_TTL);
        }
    }

    fn handle_tui_event(
        &mut self,
        tui: &mut Tui,
        event: TuiEvent,
        frames: &FrameRequester,
    ) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) => {
                self.handle_key_event(key_event);
                frames.schedule_frame();
            }
            TuiEvent::Paste(text) => {
                form::handle_paste(&text, &mut self.view, &self.op_tx);
                frames.schedule_frame();
            }
            TuiEvent::Draw => {
                self.expire_toast(Instant::now());
                tui.draw(|frame| self.render(frame))?;
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if event_handler::handle_keyboard_event(key_event, &mut self.view, &self.op_tx) {
            self.should_exit = true;
        }
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast_deadline.is_some_and(|deadline| deadline <= now) {
            self.view.toast = None;
            self.toast_deadline = None;
        }
    }

    pub fn outcome(&self) -> AppOutcome {
        AppOutcome {
            result: self.view.result.clone(),
            redirect: self.view.redirect.clone(),
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(3), // Stepper
                Constraint::Min(5),    // Form
                Constraint::Length(3), // Toast
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        render_stepper(frame, chunks[1], &self.view.stepper());
        render_form(frame, chunks[2], &self.view);
        render_toast(frame, chunks[3], self.view.toast.as_ref());
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled(
                "Register",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " for {} ({} flow)",
                self.view.event_id, self.view.flow_name
            )),
        ]);
        frame.render_widget(Paragraph::new(header), area);
    }
}

/// Open a wizard for `options.event_id` and run the TUI until the user
/// quits or the hand-off redirects them.
pub async fn run_app(options: RunOptions) -> Result<AppOutcome> {
    let RunOptions {
        config,
        event_id,
        flow_name,
    } = options;

    let (op_tx, op_rx) = unbounded_channel();
    let (event_tx, event_rx) = unbounded_channel();

    let manager = Arc::new(WizardManager::new(config.clone(), event_tx));
    let core = tokio::spawn({
        let manager = Arc::clone(&manager);
        async move { manager.run(op_rx).await }
    });

    op_tx.send(Op::OpenFlow {
        event_id: event_id.clone(),
        flow_name: flow_name.clone(),
    })?;

    let view = WizardView::new(&config, &event_id, &flow_name);
    let mut app = App::new(view, op_tx.clone(), event_rx);

    let mut tui = Tui::init()?;
    let result = app.run(&mut tui).await;
    tui.restore()?;
    drop(tui);

    let _ = op_tx.send(Op::Shutdown);
    core.await?;

    result?;
    Ok(app.outcome())
}
