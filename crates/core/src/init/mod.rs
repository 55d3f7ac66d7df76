//! Initialization module for creating `.regflow` directory structures.
//!
//! This module scaffolds a new registration portal by generating a
//! `.regflow/` directory with pre-configured templates for:
//! - Portal settings (`config.toml`)
//! - Flow definitions (`flows/*.yaml`)
//! - Event guidelines (`guidelines/*.md`)
//!
//! # Example
//!
//! ```no_run
//! use rf_core::init::{InitOptions, generate_regflow_structure};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! generate_regflow_structure(options).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{InitError, InitResult};
pub use generator::{generate_regflow_structure, InitOptions};
pub use templates::{get_template, list_templates};
