//! Event guideline models for `.regflow/guidelines/*.md`.
//!
//! Guidelines are Markdown files with YAML front matter. The body is the
//! text shown on a flow's guidelines step.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Rules and instructions for one event.
///
/// # Example
///
/// ```markdown
/// ---
/// event-id: hackathon-2024
/// title: Hackathon Rules
/// ---
///
/// - Teams of up to five students
/// - Bring your student ID
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct Guideline {
    /// Event the guideline belongs to.
    pub event_id: String,

    /// Heading shown above the body.
    #[serde(default)]
    pub title: String,

    /// The Markdown body, not part of the front matter.
    #[serde(skip)]
    pub body: String,
}
