use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_SECRET_VERSION,
    error::{ModelError, ModelResult},
};

/// A single environment variable declared on a job.
///
/// Exactly one of `value` or `secret` may be set. An entry with neither carries no value and is
/// skipped when the job is sent to the remote side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVar {
    /// Variable name as seen by the container.
    pub name: String,
    /// Literal value.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    /// Secret Manager secret the value is read from.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub secret: String,
    /// Secret version, `latest` when empty.
    #[serde(alias = "secretVersion", skip_serializing_if = "String::is_empty")]
    pub secret_version: String,
}

/// Where a validated [`EnvVar`] takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvSource<'a> {
    Literal(&'a str),
    Secret { secret: &'a str, version: &'a str },
}

impl EnvVar {
    /// Create a variable with a literal value.
    pub fn literal<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    /// Create a variable backed by the latest version of a secret.
    pub fn secret<N, S>(name: N, secret: S) -> Self
    where
        N: Into<String>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Pin the secret version.
    pub fn with_secret_version(mut self, version: impl Into<String>) -> Self {
        self.secret_version = version.into();
        self
    }

    /// Resolve the value source, rejecting entries that set both `value` and `secret`.
    ///
    /// Returns `Ok(None)` when neither is set.
    pub fn source(&self) -> ModelResult<Option<EnvSource<'_>>> {
        match (self.value.is_empty(), self.secret.is_empty()) {
            (false, false) => Err(ModelError::ConflictingEnv(self.name.clone())),
            (false, true) => Ok(Some(EnvSource::Literal(&self.value))),
            (true, false) => Ok(Some(EnvSource::Secret {
                secret: &self.secret,
                version: self.secret_version_or_default(),
            })),
            (true, true) => Ok(None),
        }
    }

    /// Secret version with the `latest` fallback applied.
    pub fn secret_version_or_default(&self) -> &str {
        if self.secret_version.is_empty() {
            DEFAULT_SECRET_VERSION
        } else {
            &self.secret_version
        }
    }
}

/// Ordered list of environment variables declared on a job.
///
/// Order is significant: the remote env list is compared as a sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Env(pub Vec<EnvVar>);

impl Env {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the variables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &EnvVar> {
        self.0.iter()
    }

    /// Append a variable.
    pub fn push(&mut self, var: EnvVar) {
        self.0.push(var);
    }

    /// Check every entry, failing on the first one that sets both value and secret.
    pub fn validate(&self) -> ModelResult<()> {
        self.0.iter().try_for_each(|var| var.source().map(|_| ()))
    }
}

impl FromIterator<EnvVar> for Env {
    fn from_iter<I: IntoIterator<Item = EnvVar>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_source() {
        let var = EnvVar::literal("FOO", "bar");
        assert_eq!(var.source().unwrap(), Some(EnvSource::Literal("bar")));
    }

    #[test]
    fn secret_source_defaults_to_latest() {
        let var = EnvVar::secret("TOKEN", "api-token");
        assert_eq!(
            var.source().unwrap(),
            Some(EnvSource::Secret {
                secret: "api-token",
                version: "latest"
            })
        );
    }

    #[test]
    fn secret_source_keeps_pinned_version() {
        let var = EnvVar::secret("TOKEN", "api-token").with_secret_version("3");
        assert_eq!(
            var.source().unwrap(),
            Some(EnvSource::Secret {
                secret: "api-token",
                version: "3"
            })
        );
    }

    #[test]
    fn both_value_and_secret_is_rejected() {
        let var = EnvVar {
            name: "BROKEN".into(),
            value: "x".into(),
            secret: "y".into(),
            secret_version: String::new(),
        };

        match var.source() {
            Err(ModelError::ConflictingEnv(name)) => assert_eq!(name, "BROKEN"),
            other => panic!("expected ConflictingEnv, got {other:?}"),
        }
    }

    #[test]
    fn empty_entry_has_no_source() {
        let var = EnvVar {
            name: "EMPTY".into(),
            ..Default::default()
        };
        assert_eq!(var.source().unwrap(), None);
    }

    #[test]
    fn env_validate_stops_at_first_conflict() {
        let env: Env = vec![
            EnvVar::literal("A", "1"),
            EnvVar {
                name: "B".into(),
                value: "2".into(),
                secret: "s".into(),
                ..Default::default()
            },
        ]
        .into_iter()
        .collect();

        assert!(matches!(env.validate(), Err(ModelError::ConflictingEnv(n)) if n == "B"));
    }

    #[test]
    fn serde_transparent_list() {
        let mut env = Env::new();
        env.push(EnvVar::literal("FOO", "bar"));
        env.push(EnvVar::secret("KEY", "key").with_secret_version("2"));

        let json = serde_json::to_string(&env).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"secret_version\":\"2\""));
        assert!(!json.contains("\"secret\":\"\""));

        let back: Env = serde_json::from_str(&json).unwrap();
        assert_eq!(back, env);
    }
}
