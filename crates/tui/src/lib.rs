//! # rf-tui
//!
//! Terminal registration wizard for regflow.
//!
//! The TUI renders one wizard and talks to the `rf-core` wizard manager over
//! channels using the `Op` and `Event` protocol defined in `rf-protocol`.

pub mod app;
pub mod event;
pub mod event_handler;
pub mod tui;
pub mod widgets;
pub mod wizard;

pub use app::{run_app, App, AppOutcome, RunOptions};
pub use tui::Tui;
