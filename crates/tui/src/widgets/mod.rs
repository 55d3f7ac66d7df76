//! TUI widgets module.
//!
//! - [`stepper`]: progress bar across the flow's steps
//! - [`form`]: the active step's inputs and key handling
//! - [`toast`]: latest notification

pub mod form;
pub mod stepper;
pub mod toast;

pub use form::render_form;
pub use stepper::render_stepper;
pub use toast::render_toast;
