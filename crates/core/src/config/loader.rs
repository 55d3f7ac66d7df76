//! Configuration file loader for `.regflow/` directory structure.
//!
//! This module provides functionality to load and parse all configuration files
//! from the `.regflow/` directory, including:
//! - `config.toml`: Portal settings
//! - `flows/*.yaml`: Flow definitions
//! - `guidelines/*.md`: Event guidelines with YAML front matter

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use crate::config::CONFIG_DIR;
use gray_matter::engine::YAML;
use gray_matter::Matter;
use rf_protocol::config_models::PortalConfig;
use rf_protocol::flow_models::{FlowDefinition, StepKind};
use rf_protocol::guideline_models::Guideline;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Loads all configuration from the `.regflow/` directory.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.regflow/` folder
///
/// # Returns
///
/// An `AppConfig` containing all loaded configuration. Missing directories
/// or files fall back to defaults; the built-in `solo` and `team` flows are
/// always available unless a flow file with the same name replaces them.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid syntax (TOML, YAML, or Markdown front matter)
/// - A flow definition does not end with its only confirmation step after
///   at least one content step, or reuses the name of another flow file
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let rf_dir = root.join(CONFIG_DIR);

    if !rf_dir.exists() {
        tracing::debug!(path = %rf_dir.display(), "no config directory, using defaults");
        return Ok(AppConfig::default());
    }

    let portal = load_portal_config(&rf_dir)?;
    let flows = merge_builtin_flows(load_flows(&rf_dir)?);
    let guidelines = load_guidelines(&rf_dir)?;

    tracing::info!(
        flows = flows.len(),
        guidelines = guidelines.len(),
        "configuration loaded"
    );

    Ok(AppConfig {
        portal,
        flows,
        guidelines,
    })
}

/// Loads portal settings from `config.toml`.
fn load_portal_config(rf_dir: &Path) -> ConfigResult<PortalConfig> {
    let config_path = rf_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(PortalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;

    toml::from_str(&content).map_err(|source| ConfigError::PortalSettings {
        path: config_path,
        source,
    })
}

/// Files directly inside `dir` whose extension is one of `extensions`,
/// sorted by file name.
fn files_with_extension(dir: &Path, extensions: &[&str]) -> ConfigResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::Scan {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        let ext = path.extension().and_then(|s| s.to_str());
        if ext.is_some_and(|ext| extensions.contains(&ext)) {
            paths.push(path.to_path_buf());
        }
    }
    Ok(paths)
}

fn read_file(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads all flow definitions from `flows/*.yaml` and `flows/*.yml`.
fn load_flows(rf_dir: &Path) -> ConfigResult<Vec<FlowDefinition>> {
    let mut flows: Vec<FlowDefinition> = Vec::new();

    for path in files_with_extension(&rf_dir.join("flows"), &["yaml", "yml"])? {
        let content = read_file(&path)?;
        let flow: FlowDefinition =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::FlowSyntax {
                path: path.clone(),
                source,
            })?;

        validate_flow(&flow, &path)?;
        if flows.iter().any(|existing| existing.name == flow.name) {
            return Err(ConfigError::DuplicateFlow {
                path,
                flow: flow.name,
            });
        }
        flows.push(flow);
    }

    Ok(flows)
}

/// Checks that a flow can drive a wizard: a name, at least one content
/// step, and a single confirmation step at the end.
pub fn validate_flow(flow: &FlowDefinition, path: &Path) -> ConfigResult<()> {
    let invalid = |reason: String| ConfigError::InvalidFlow {
        path: path.to_path_buf(),
        flow: flow.name.clone(),
        reason,
    };

    if flow.name.trim().is_empty() {
        return Err(invalid("flow name is empty".to_string()));
    }
    if flow.steps.is_empty() {
        return Err(invalid("flow has no steps".to_string()));
    }
    let last = flow.last_index();
    if let Some(index) = flow
        .steps
        .iter()
        .position(|step| step.kind == StepKind::Confirmation)
        .filter(|index| *index != last)
    {
        return Err(invalid(format!(
            "confirmation step at position {} must be last",
            index + 1
        )));
    }
    if flow.steps[last].kind != StepKind::Confirmation {
        return Err(invalid("last step must be a confirmation step".to_string()));
    }
    if !flow.ends_with_confirmation() {
        return Err(invalid(
            "flow needs at least one step before the confirmation step".to_string(),
        ));
    }
    Ok(())
}

/// Built-in flows not redefined by a file come first, then the files.
fn merge_builtin_flows(loaded: Vec<FlowDefinition>) -> Vec<FlowDefinition> {
    let mut flows: Vec<FlowDefinition> = [FlowDefinition::solo(), FlowDefinition::team()]
        .into_iter()
        .filter(|builtin| !loaded.iter().any(|flow| flow.name == builtin.name))
        .collect();
    flows.extend(loaded);
    flows
}

/// Loads all event guidelines from `guidelines/*.md`.
fn load_guidelines(rf_dir: &Path) -> ConfigResult<Vec<Guideline>> {
    let mut guidelines = Vec::new();

    for path in files_with_extension(&rf_dir.join("guidelines"), &["md"])? {
        let content = read_file(&path)?;

        // Parse Markdown with YAML front matter
        let matter = Matter::<YAML>::new();
        let result = matter.parse(&content);

        let mut guideline: Guideline = result
            .data
            .ok_or_else(|| ConfigError::Guideline {
                path: path.clone(),
                reason: "Missing YAML front matter".to_string(),
            })?
            .deserialize()
            .map_err(|e| ConfigError::Guideline {
                path: path.clone(),
                reason: format!("Failed to deserialize front matter: {}", e),
            })?;

        guideline.body = result.content.trim().to_string();
        guidelines.push(guideline);
    }

    Ok(guidelines)
}
