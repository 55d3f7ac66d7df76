//! Portal configuration models for `.regflow/config.toml`.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

/// Default grace period between a successful submission and the redirect.
pub const DEFAULT_COMPLETION_DELAY_MS: u64 = 3000;

/// Default route the wizard navigates to after completion.
pub const DEFAULT_REDIRECT_PATH: &str = "/events";

/// Default number of member slots rendered by team flows.
pub const DEFAULT_TEAM_MEMBER_SLOTS: usize = 5;

/// Represents portal-wide settings from `.regflow/config.toml`.
///
/// # Example
///
/// ```toml
/// # .regflow/config.toml
/// completion-delay-ms = 3000
/// redirect-path = "/events"
/// team-member-slots = 5
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct PortalConfig {
    /// Milliseconds the confirmation screen stays up before the hand-off.
    #[serde(default = "default_completion_delay_ms")]
    pub completion_delay_ms: u64,

    /// Route passed to the navigator once the hand-off fires.
    #[serde(default = "default_redirect_path")]
    pub redirect_path: String,

    /// Member slots shown on team-members steps.
    #[serde(default = "default_team_member_slots")]
    pub team_member_slots: usize,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            completion_delay_ms: DEFAULT_COMPLETION_DELAY_MS,
            redirect_path: DEFAULT_REDIRECT_PATH.to_string(),
            team_member_slots: DEFAULT_TEAM_MEMBER_SLOTS,
        }
    }
}

fn default_completion_delay_ms() -> u64 {
    DEFAULT_COMPLETION_DELAY_MS
}

fn default_redirect_path() -> String {
    DEFAULT_REDIRECT_PATH.to_string()
}

fn default_team_member_slots() -> usize {
    DEFAULT_TEAM_MEMBER_SLOTS
}
