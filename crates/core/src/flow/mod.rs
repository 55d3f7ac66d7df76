//! Registration flow control.
//!
//! This module provides:
//! - [`FlowState`]: step index and collected form data of one wizard
//! - [`FlowController`]: the only way to move between steps
//! - [`HandoffHandle`]: the cancellable post-completion hand-off
//! - [`layout`]: which fields each step renders

pub mod controller;
pub mod error;
pub mod handoff;
pub mod layout;
pub mod state;

pub use controller::{Collaborators, FlowController, FlowSettings};
pub use error::{FlowError, FlowResult};
pub use handoff::HandoffHandle;
pub use state::FlowState;
