//! Errors raised while reading a `.regflow/` directory.
//!
//! Every variant names the offending file so `regflow check` can point the
//! portal maintainer at it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot list {path}: {source}")]
    Scan {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// `config.toml` is not valid portal settings.
    #[error("Invalid portal settings in {path}: {source}")]
    PortalSettings {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A `flows/*.yaml` file is not a flow definition.
    #[error("Cannot parse flow definition {path}: {source}")]
    FlowSyntax {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A flow that parses but cannot drive a wizard, e.g. one without a
    /// trailing confirmation step.
    #[error("Invalid flow '{flow}' in {path}: {reason}")]
    InvalidFlow {
        path: PathBuf,
        flow: String,
        reason: String,
    },

    /// Two flow files share a name.
    #[error("Flow '{flow}' in {path} is already defined by another file")]
    DuplicateFlow { path: PathBuf, flow: String },

    /// A `guidelines/*.md` file without usable front matter.
    #[error("Invalid guideline {path}: {reason}")]
    Guideline { path: PathBuf, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
