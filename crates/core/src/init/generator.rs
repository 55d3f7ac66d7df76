//! Directory structure and file generation for `.regflow` initialization.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use crate::config::CONFIG_DIR;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for initializing a `.regflow` directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Directory in which `.regflow` will be created.
    pub target_dir: PathBuf,

    /// Overwrite an existing `.regflow` directory.
    pub force: bool,

    /// Only write the settings and the solo flow.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a `.regflow` directory structure with templates.
///
/// ```text
/// .regflow/
/// ├── config.toml
/// ├── flows/
/// │   ├── solo.yaml
/// │   └── team.yaml (unless minimal)
/// └── guidelines/
///     └── sample-event.md (unless minimal)
/// ```
///
/// Returns the paths written, relative to `.regflow/`.
///
/// # Errors
///
/// Fails with `InitError::DirectoryExists` when `.regflow` is present and
/// `force` is not set, or when a template is missing or a write fails.
pub async fn generate_regflow_structure(options: InitOptions) -> InitResult<Vec<String>> {
    let rf_dir = options.target_dir.join(CONFIG_DIR);

    if rf_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(rf_dir));
    }

    for sub in ["flows", "guidelines"] {
        let path = rf_dir.join(sub);
        fs::create_dir_all(&path).map_err(|source| InitError::DirectoryCreate { path, source })?;
    }

    let templates = if options.minimal {
        vec!["config.toml".to_string(), "flows/solo.yaml".to_string()]
    } else {
        list_templates("")
    };

    for template_path in &templates {
        write_template_file(&rf_dir, template_path)?;
    }

    tracing::info!(path = %rf_dir.display(), files = templates.len(), "initialized");
    Ok(templates)
}

fn write_template_file(rf_dir: &Path, template_path: &str) -> InitResult<()> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = rf_dir.join(template_path);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path,
        source,
    })
}
