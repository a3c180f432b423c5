use std::path::{Path, PathBuf};

use crate::DEFAULT_JOBS_FILE;

/// Conventional compute default service account for a project.
pub fn compute_default_service_account(project_number: &str) -> String {
    format!("{project_number}-compute@developer.gserviceaccount.com")
}

/// Process-wide inputs of a single run.
///
/// Built once at startup and read-only afterwards. Service accounts left unset (or set to an
/// empty string) fall back to [`compute_default_service_account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeContext {
    project_id: String,
    project_number: String,
    region: String,
    service_account: String,
    trigger_service_account: String,
    disable_triggers: bool,
    config_path: PathBuf,
}

impl RuntimeContext {
    /// Create a context with derived service accounts and the default job file path.
    pub fn new(
        project_id: impl Into<String>,
        project_number: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        let project_number = project_number.into();
        let default_account = compute_default_service_account(&project_number);
        Self {
            project_id: project_id.into(),
            region: region.into(),
            service_account: default_account.clone(),
            trigger_service_account: default_account,
            project_number,
            disable_triggers: false,
            config_path: PathBuf::from(DEFAULT_JOBS_FILE),
        }
    }

    /// Override the default job service account. Empty values keep the derived default.
    pub fn with_service_account(mut self, account: impl Into<String>) -> Self {
        let account = account.into();
        if !account.is_empty() {
            self.service_account = account;
        }
        self
    }

    /// Override the service account triggers authenticate as. Empty values keep the derived default.
    pub fn with_trigger_service_account(mut self, account: impl Into<String>) -> Self {
        let account = account.into();
        if !account.is_empty() {
            self.trigger_service_account = account;
        }
        self
    }

    /// Pause every trigger instead of enabling it.
    pub fn with_disable_triggers(mut self, disable: bool) -> Self {
        self.disable_triggers = disable;
        self
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn project_number(&self) -> &str {
        &self.project_number
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn service_account(&self) -> &str {
        &self.service_account
    }

    pub fn trigger_service_account(&self) -> &str {
        &self.trigger_service_account
    }

    pub fn disable_triggers(&self) -> bool {
        self.disable_triggers
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accounts_default_to_compute_account() {
        let ctx = RuntimeContext::new("proj", "1234", "europe-west1");

        assert_eq!(
            ctx.service_account(),
            "1234-compute@developer.gserviceaccount.com"
        );
        assert_eq!(ctx.trigger_service_account(), ctx.service_account());
        assert!(!ctx.disable_triggers());
        assert_eq!(ctx.config_path(), Path::new("jobs.yml"));
    }

    #[test]
    fn explicit_accounts_override_defaults() {
        let ctx = RuntimeContext::new("proj", "1234", "europe-west1")
            .with_service_account("runner@proj.iam.gserviceaccount.com")
            .with_trigger_service_account("invoker@proj.iam.gserviceaccount.com");

        assert_eq!(ctx.service_account(), "runner@proj.iam.gserviceaccount.com");
        assert_eq!(
            ctx.trigger_service_account(),
            "invoker@proj.iam.gserviceaccount.com"
        );
    }

    #[test]
    fn empty_override_keeps_default() {
        let ctx = RuntimeContext::new("proj", "42", "us-central1").with_service_account("");
        assert_eq!(ctx.service_account(), "42-compute@developer.gserviceaccount.com");
    }
}
