use std::collections::BTreeMap;

use gruns_model::Labels;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const LIMIT_CPU: &str = "cpu";
pub const LIMIT_MEMORY: &str = "memory";

/// Cloud Run job as returned by the admin API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionJob {
    /// Full resource name; empty on create requests.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub launch_stage: String,
    #[serde(default)]
    pub template: ExecutionTemplate,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionTemplate {
    #[serde(default)]
    pub parallelism: u32,
    #[serde(default)]
    pub task_count: u32,
    #[serde(default)]
    pub template: TaskTemplate,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTemplate {
    #[serde(default)]
    pub containers: Vec<Container>,
    #[serde(default)]
    pub max_retries: u32,
    /// Proto-JSON duration, e.g. `"900s"`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub timeout: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_account: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub execution_environment: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<WireEnvVar>,
    #[serde(default)]
    pub resources: ResourceRequirements,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub limits: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Container env var: either a literal `value` or a `valueSource`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEnvVar {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_source: Option<EnvVarSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSource {
    pub secret_key_ref: SecretKeySelector,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    pub secret: String,
    #[serde(default)]
    pub version: String,
}

impl ExecutionJob {
    /// First container of the task template, the only one this tool manages.
    pub fn container(&self) -> Option<&Container> {
        self.template.template.containers.first()
    }

    /// Mutable first container, inserting an empty one when the template has none.
    pub fn container_mut(&mut self) -> &mut Container {
        let containers = &mut self.template.template.containers;
        if containers.is_empty() {
            containers.push(Container::default());
        }
        &mut containers[0]
    }

    /// Resource limit of the first container.
    pub fn limit(&self, key: &str) -> Option<&str> {
        self.container()
            .and_then(|c| c.resources.limits.get(key))
            .map(String::as_str)
    }

    /// Timeout of the task template in whole seconds, if set and parseable.
    pub fn timeout_secs(&self) -> Option<u64> {
        parse_duration_secs(&self.template.template.timeout)
    }
}

/// Format whole seconds as a proto-JSON duration.
pub fn format_duration(secs: u64) -> String {
    format!("{secs}s")
}

/// Parse a proto-JSON duration (`"900s"`, `"1.5s"`) into whole seconds.
///
/// Fractional parts are truncated. Returns `None` for anything else.
pub fn parse_duration_secs(raw: &str) -> Option<u64> {
    let digits = raw.trim().strip_suffix('s')?;
    let whole = digits.split_once('.').map_or(digits, |(w, _)| w);
    whole.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_parsing() {
        assert_eq!(parse_duration_secs("900s"), Some(900));
        assert_eq!(parse_duration_secs("1.5s"), Some(1));
        assert_eq!(parse_duration_secs(""), None);
        assert_eq!(parse_duration_secs("15m"), None);
        assert_eq!(format_duration(900), "900s");
    }

    #[test]
    fn container_mut_inserts_missing_container() {
        let mut job = ExecutionJob::default();
        assert!(job.container().is_none());

        job.container_mut().image = "img".into();
        assert_eq!(job.container().map(|c| c.image.as_str()), Some("img"));
    }

    #[test]
    fn decodes_api_payload_and_keeps_unknown_fields() {
        let json = r#"{
            "name": "projects/p/locations/r/jobs/nightly",
            "uid": "abc",
            "labels": {"managed_by": "gruns-cli"},
            "template": {
                "taskCount": 2,
                "parallelism": 1,
                "template": {
                    "maxRetries": 3,
                    "timeout": "600s",
                    "serviceAccount": "sa@p",
                    "containers": [{
                        "image": "img:v1",
                        "args": ["--full"],
                        "env": [
                            {"name": "A", "value": "1"},
                            {"name": "B", "valueSource": {"secretKeyRef": {"secret": "b", "version": "latest"}}}
                        ],
                        "resources": {"limits": {"cpu": "1000m", "memory": "512Mi"}, "cpuIdle": true}
                    }],
                    "vpcAccess": {"connector": "c"}
                }
            }
        }"#;

        let job: ExecutionJob = serde_json::from_str(json).unwrap();
        assert!(job.labels.is_managed());
        assert_eq!(job.template.task_count, 2);
        assert_eq!(job.timeout_secs(), Some(600));
        assert_eq!(job.limit(LIMIT_MEMORY), Some("512Mi"));
        assert_eq!(job.container().unwrap().env.len(), 2);
        assert!(job.extra.contains_key("uid"));
        assert!(job.template.template.extra.contains_key("vpcAccess"));

        let back = serde_json::to_value(&job).unwrap();
        assert_eq!(back["template"]["template"]["vpcAccess"]["connector"], "c");
        assert_eq!(
            back["template"]["template"]["containers"][0]["resources"]["cpuIdle"],
            true
        );
    }
}
