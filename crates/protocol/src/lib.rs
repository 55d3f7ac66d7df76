//! # rf-protocol
//!
//! Core protocol definitions and data models for regflow.
//!
//! This crate defines all shared data structures used for:
//! - Configuration file parsing (YAML flows, TOML config, Markdown guidelines)
//! - Form state collected by a registration wizard
//! - Records handed to the registration store
//! - Communication between the TUI and Core
//!
//! ## Modules
//!
//! - [`config_models`]: Portal settings from config.toml
//! - [`flow_models`]: Step and flow definitions, stepper projection rows
//! - [`form_models`]: Field values collected across steps
//! - [`guideline_models`]: Event guidelines shown on the first step
//! - [`notification_models`]: User-facing notifications
//! - [`registration_models`]: Registrations and terminal results
//! - [`ipc`]: Operations and Events for Core-TUI communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, uuid and chrono
//! - TypeScript generation: All types derive `TS` for client compatibility
//! - Independent compilation: No dependencies on other regflow crates

pub mod config_models;
pub mod flow_models;
pub mod form_models;
pub mod guideline_models;
pub mod ipc;
pub mod notification_models;
pub mod registration_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use flow_models::*;
pub use form_models::*;
pub use guideline_models::*;
pub use ipc::*;
pub use notification_models::*;
pub use registration_models::*;
