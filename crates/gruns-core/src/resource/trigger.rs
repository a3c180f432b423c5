use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cloud Scheduler job acting as a trigger for an execution job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerJob {
    /// Full resource name, `projects/<p>/locations/<r>/jobs/<job>-trigger`.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub time_zone: String,
    #[serde(default)]
    pub state: TriggerState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_target: Option<HttpTarget>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Scheduler job state as reported by the API.
///
/// Only `Enabled` and `Paused` take part in the enable/pause transition; the other states are
/// left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerState {
    #[default]
    #[serde(rename = "STATE_UNSPECIFIED")]
    Unspecified,
    Enabled,
    Paused,
    Disabled,
    UpdateFailed,
}

impl TriggerState {
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            TriggerState::Unspecified => "unspecified",
            TriggerState::Enabled => "enabled",
            TriggerState::Paused => "paused",
            TriggerState::Disabled => "disabled",
            TriggerState::UpdateFailed => "update_failed",
        }
    }
}

impl fmt::Display for TriggerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// HTTP callback invoked on every tick of the schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpTarget {
    #[serde(default)]
    pub uri: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub http_method: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_token: Option<OAuthToken>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthToken {
    pub service_account_email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
}
