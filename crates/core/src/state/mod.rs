//! State management for open registration wizards.
//!
//! This module provides the [`WizardManager`], which owns every open
//! [`FlowController`](crate::flow::FlowController) and applies `Op`s to them.

pub mod manager;

pub use manager::WizardManager;
