use std::collections::BTreeMap;

use gruns_model::{DEFAULT_TIMEZONE, JobSpec, RuntimeContext};

use crate::resource::{HttpTarget, OAuthToken, TriggerJob, TriggerState, naming};

pub const TRIGGER_HTTP_METHOD: &str = "POST";
pub const TRIGGER_USER_AGENT: &str = "Google-Cloud-Scheduler";
pub const OAUTH_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Desired state of the trigger of a scheduled job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredTrigger {
    /// Full resource name of the trigger.
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub time_zone: String,
    /// Run endpoint of the execution job.
    pub uri: String,
    /// Account the scheduler authenticates as when calling `uri`.
    pub service_account: String,
}

impl DesiredTrigger {
    pub fn from_spec(ctx: &RuntimeContext, job: &JobSpec) -> Self {
        Self {
            name: naming::trigger_name(ctx, &job.name),
            description: format!("Trigger for {} (created by gruns)", job.name),
            schedule: job.schedule.clone(),
            time_zone: DEFAULT_TIMEZONE.to_string(),
            uri: naming::trigger_uri(ctx, &job.name),
            service_account: ctx.trigger_service_account().to_string(),
        }
    }

    /// Authenticated POST target for the run endpoint.
    pub fn http_target(&self) -> HttpTarget {
        HttpTarget {
            uri: self.uri.clone(),
            http_method: TRIGGER_HTTP_METHOD.to_string(),
            headers: BTreeMap::from([("User-Agent".to_string(), TRIGGER_USER_AGENT.to_string())]),
            oauth_token: Some(OAuthToken {
                service_account_email: self.service_account.clone(),
                scope: OAUTH_SCOPE.to_string(),
            }),
            ..Default::default()
        }
    }

    /// Fresh resource for a create call; triggers start enabled.
    pub fn to_resource(&self) -> TriggerJob {
        TriggerJob {
            name: self.name.clone(),
            description: self.description.clone(),
            schedule: self.schedule.clone(),
            time_zone: self.time_zone.clone(),
            state: TriggerState::Enabled,
            http_target: Some(self.http_target()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_targets_job_run_endpoint() {
        let ctx = RuntimeContext::new("acme", "42", "us-central1")
            .with_trigger_service_account("invoker@acme");
        let job = JobSpec::new("nightly", "img").with_schedule("0 2 * * *");

        let res = DesiredTrigger::from_spec(&ctx, &job).to_resource();

        assert_eq!(res.name, "projects/acme/locations/us-central1/jobs/nightly-trigger");
        assert_eq!(res.description, "Trigger for nightly (created by gruns)");
        assert_eq!(res.time_zone, "UTC");
        assert_eq!(res.state, TriggerState::Enabled);

        let target = res.http_target.unwrap();
        assert!(target.uri.ends_with("/jobs/nightly:run"));
        assert_eq!(target.http_method, "POST");
        assert_eq!(target.headers["User-Agent"], "Google-Cloud-Scheduler");
        let token = target.oauth_token.unwrap();
        assert_eq!(token.service_account_email, "invoker@acme");
        assert_eq!(token.scope, OAUTH_SCOPE);
    }
}
