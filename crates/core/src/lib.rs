//! # rf-core
//!
//! Registration wizard logic for the event portal.
//!
//! This crate provides:
//! - Configuration loading from the `.regflow/` directory
//! - Per-step validation rules and the gate that applies them
//! - The flow controller that owns a wizard's step index and form data
//! - Collaborator traits (notifier, store, navigator, uploader)
//! - The wizard manager that serves the UI over the Op/Event protocol
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`flow`]: Flow controller, state and post-completion hand-off
//! - [`init`]: `.regflow/` scaffolding
//! - [`services`]: Collaborators used by the flow controller
//! - [`state`]: Registry of open wizards
//! - [`stepper`]: Stepper view projection
//! - [`validation`]: Validation gate and rules

pub mod config;
pub mod flow;
pub mod init;
pub mod services;
pub mod state;
pub mod stepper;
pub mod validation;
