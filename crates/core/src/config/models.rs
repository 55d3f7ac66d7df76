//! Configuration models that aggregate all settings.
//!
//! This module provides the unified `AppConfig` structure that combines
//! portal settings, flow definitions and event guidelines into a single
//! configuration object.

use rf_protocol::config_models::PortalConfig;
use rf_protocol::flow_models::FlowDefinition;
use rf_protocol::guideline_models::Guideline;

/// Unified application configuration loaded from `.regflow/` directory.
///
/// This structure aggregates all configuration sources:
/// - `config.toml`: Portal settings
/// - `flows/*.yaml`: Flow definitions (the built-in `solo` and `team`
///   flows are present unless a file redefines them)
/// - `guidelines/*.md`: Event guidelines
///
/// # Example
///
/// ```rust,no_run
/// use rf_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Loaded {} flows and {} guidelines",
///          config.flows.len(),
///          config.guidelines.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Portal settings from `config.toml`.
    pub portal: PortalConfig,

    /// Flow definitions, built-ins first.
    pub flows: Vec<FlowDefinition>,

    /// Guidelines loaded from `guidelines/*.md`.
    pub guidelines: Vec<Guideline>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            portal: PortalConfig::default(),
            flows: vec![FlowDefinition::solo(), FlowDefinition::team()],
            guidelines: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Look up a flow definition by name.
    pub fn flow(&self, name: &str) -> Option<&FlowDefinition> {
        self.flows.iter().find(|flow| flow.name == name)
    }

    /// Look up the guideline of an event.
    pub fn guideline_for(&self, event_id: &str) -> Option<&Guideline> {
        self.guidelines
            .iter()
            .find(|guideline| guideline.event_id == event_id)
    }
}
