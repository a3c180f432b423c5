use std::sync::Arc;

use async_trait::async_trait;
use tokio::{process::Command, sync::OnceCell};
use tracing::debug;

use crate::CloudError;

/// Source of OAuth2 bearer tokens.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self) -> Result<String, CloudError>;
}

pub type TokenHandle = Arc<dyn TokenSource>;

/// A token handed in from outside, e.g. `GOOGLE_OAUTH_ACCESS_TOKEN`.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<String, CloudError> {
        if self.0.is_empty() {
            return Err(CloudError::Token("empty access token".into()));
        }
        Ok(self.0.clone())
    }
}

/// Token printed by `gcloud auth print-access-token`, fetched once and reused for the run.
#[derive(Debug)]
pub struct GcloudToken {
    program: String,
    cached: OnceCell<String>,
}

impl Default for GcloudToken {
    fn default() -> Self {
        Self::new()
    }
}

impl GcloudToken {
    pub fn new() -> Self {
        Self::with_program("gcloud")
    }

    /// Use another executable accepting the same arguments.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            cached: OnceCell::new(),
        }
    }

    async fn fetch(&self) -> Result<String, CloudError> {
        debug!(program = %self.program, "requesting access token");
        let output = Command::new(&self.program)
            .args(["auth", "print-access-token"])
            .output()
            .await
            .map_err(|e| CloudError::Token(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CloudError::Token(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(CloudError::Token(format!("{} printed no token", self.program)));
        }
        Ok(token)
    }
}

#[async_trait]
impl TokenSource for GcloudToken {
    async fn token(&self) -> Result<String, CloudError> {
        self.cached.get_or_try_init(|| self.fetch()).await.cloned()
    }
}
