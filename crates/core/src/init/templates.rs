//! Embedded template files for `.regflow` initialization.
//!
//! Templates live in the crate's `templates/` directory and are embedded at
//! compile time, so `regflow init` works without any files next to the binary.

use rust_embed::RustEmbed;

/// Embedded template files from `crates/core/templates/`.
///
/// With the `debug-embed` feature, debug builds embed the files as well
/// instead of reading them from disk at runtime.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/templates"]
pub struct TemplateAssets;

/// Get template file content by path.
///
/// # Example
/// ```
/// use rf_core::init::templates::get_template;
///
/// let config = get_template("config.toml").expect("config.toml should exist");
/// assert!(config.contains("completion-delay-ms"));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List all template files under `prefix` (e.g. `"flows/"`), sorted.
pub fn list_templates(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect();
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_protocol::config_models::PortalConfig;
    use rf_protocol::flow_models::FlowDefinition;

    #[test]
    fn test_config_template_parses_to_defaults() {
        let content = get_template("config.toml").expect("config.toml should be embedded");
        let config: PortalConfig = toml::from_str(&content).expect("template should parse");
        assert_eq!(config, PortalConfig::default());
    }

    #[test]
    fn test_flow_templates_match_builtins() {
        let solo = get_template("flows/solo.yaml").expect("solo.yaml should be embedded");
        let team = get_template("flows/team.yaml").expect("team.yaml should be embedded");

        let solo: FlowDefinition = serde_yaml::from_str(&solo).expect("solo should parse");
        let team: FlowDefinition = serde_yaml::from_str(&team).expect("team should parse");

        assert_eq!(solo, FlowDefinition::solo());
        assert_eq!(team, FlowDefinition::team());
    }

    #[test]
    fn test_get_nonexistent_template() {
        assert!(get_template("nonexistent.txt").is_none());
    }

    #[test]
    fn test_list_flow_templates() {
        let flows = list_templates("flows/");
        assert_eq!(flows, vec!["flows/solo.yaml", "flows/team.yaml"]);
    }

    #[test]
    fn test_list_empty_prefix() {
        let all = list_templates("");
        assert!(all.contains(&"config.toml".to_string()));
        assert!(all.contains(&"guidelines/sample-event.md".to_string()));
        assert_eq!(all.len(), 4);
    }
}
