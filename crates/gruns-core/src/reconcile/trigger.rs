use gruns_model::{JobSpec, RuntimeContext};
use tracing::{debug, instrument};

use crate::{
    api::{ApiError, TriggerApi},
    diff::{TRIGGER_FIELDS, UpdateMask, diff_and_apply},
    error::{CoreError, Operation},
    map::DesiredTrigger,
    observer::ReconcileObserver,
    resource::{ResourceKind, TriggerState, naming},
};

const KIND: ResourceKind = ResourceKind::Trigger;

/// What [`reconcile_trigger`] did. Creation, transition and update are independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerOutcome {
    pub created: bool,
    /// State the trigger was moved to, if it was paused or resumed.
    pub transition: Option<TriggerState>,
    /// Fields sent in the update call; empty when no update was issued.
    pub mask: UpdateMask,
}

impl TriggerOutcome {
    pub fn is_unchanged(&self) -> bool {
        !self.created && self.transition.is_none() && self.mask.is_empty()
    }
}

/// Bring the trigger of a scheduled `job` in line with its definition.
///
/// Steps, each awaited before the next:
/// 1. get the trigger, creating it (enabled) when the API reports it missing;
/// 2. resume a paused trigger, or pause an enabled one when triggers are disabled;
/// 3. diff schedule, time zone and target URI and send one update if any differ.
///
/// A freshly created trigger still goes through steps 2 and 3.
#[instrument(level = "debug", skip_all, fields(job = %job.name))]
pub async fn reconcile_trigger(
    ctx: &RuntimeContext,
    api: &dyn TriggerApi,
    observer: &dyn ReconcileObserver,
    job: &JobSpec,
) -> Result<TriggerOutcome, CoreError> {
    let desired = DesiredTrigger::from_spec(ctx, job);
    let mut outcome = TriggerOutcome::default();

    let mut remote = match api.get_trigger(&desired.name).await {
        Ok(remote) => remote,
        Err(ApiError::NotFound(_)) => {
            debug!(name = %desired.name, "trigger not found, creating");
            let created = api
                .create_trigger(&naming::parent(ctx), &desired.to_resource())
                .await
                .map_err(CoreError::remote(KIND, Operation::Create))?;
            observer.resource_created(KIND, &desired.name);
            outcome.created = true;
            created
        }
        Err(e) => return Err(CoreError::remote(KIND, Operation::Get)(e)),
    };

    let from = remote.state;
    let transition = match (from, ctx.disable_triggers()) {
        (TriggerState::Paused, false) => Some((TriggerState::Enabled, Operation::Resume)),
        (TriggerState::Enabled, true) => Some((TriggerState::Paused, Operation::Pause)),
        _ => None,
    };
    if let Some((to, op)) = transition {
        let result = match op {
            Operation::Resume => api.resume_trigger(&remote.name).await,
            _ => api.pause_trigger(&remote.name).await,
        };
        result.map_err(CoreError::remote(KIND, op))?;
        remote.state = to;
        observer.trigger_transitioned(&remote.name, from, to);
        outcome.transition = Some(to);
    }

    if remote.http_target.is_none() {
        return Err(CoreError::MissingHttpTarget(remote.name));
    }

    let mask = diff_and_apply(&mut remote, &desired, TRIGGER_FIELDS);
    if !mask.is_empty() {
        api.update_trigger(&remote)
            .await
            .map_err(CoreError::remote(KIND, Operation::Update))?;
        observer.resource_updated(KIND, &remote.name, &mask);
        outcome.mask = mask;
    }

    if outcome.is_unchanged() {
        observer.resource_unchanged(KIND, &remote.name);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        observer::NoOpObserver,
        resource::TriggerJob,
        testing::{Event, InMemoryTriggers, RecordingObserver},
    };

    const NAME: &str = "projects/acme/locations/europe-west1/jobs/nightly-trigger";

    fn ctx() -> RuntimeContext {
        RuntimeContext::new("acme", "42", "europe-west1")
    }

    fn job(schedule: &str) -> JobSpec {
        JobSpec::new("nightly", "img:v1").with_schedule(schedule)
    }

    #[tokio::test]
    async fn creates_enabled_trigger_pointing_at_job() {
        let api = InMemoryTriggers::new();
        let observer = RecordingObserver::default();

        let outcome = reconcile_trigger(&ctx(), &api, &observer, &job("0 2 * * *"))
            .await
            .unwrap();

        assert!(outcome.created);
        assert!(outcome.transition.is_none());
        assert!(outcome.mask.is_empty());

        let trigger = api.get(NAME).unwrap();
        assert_eq!(trigger.state, TriggerState::Enabled);
        assert!(trigger.http_target.unwrap().uri.ends_with("/jobs/nightly:run"));
        assert_eq!(
            observer.events(),
            vec![Event::Created(ResourceKind::Trigger, NAME.into())]
        );
    }

    #[tokio::test]
    async fn second_pass_is_quiet() {
        let api = InMemoryTriggers::new();
        reconcile_trigger(&ctx(), &api, &NoOpObserver, &job("0 2 * * *"))
            .await
            .unwrap();
        api.clear_calls();

        let observer = RecordingObserver::default();
        let outcome = reconcile_trigger(&ctx(), &api, &observer, &job("0 2 * * *"))
            .await
            .unwrap();

        assert!(outcome.is_unchanged());
        assert!(api.mutating_calls().is_empty());
        assert_eq!(
            observer.events(),
            vec![Event::Unchanged(ResourceKind::Trigger, NAME.into())]
        );
    }

    #[tokio::test]
    async fn disable_triggers_pauses_enabled_trigger() {
        let api = InMemoryTriggers::new();
        reconcile_trigger(&ctx(), &api, &NoOpObserver, &job("0 2 * * *"))
            .await
            .unwrap();
        api.clear_calls();

        let ctx = ctx().with_disable_triggers(true);
        let outcome = reconcile_trigger(&ctx, &api, &NoOpObserver, &job("0 2 * * *"))
            .await
            .unwrap();

        assert_eq!(outcome.transition, Some(TriggerState::Paused));
        assert!(outcome.mask.is_empty());
        let calls = api.mutating_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].op, Operation::Pause);
        assert_eq!(api.get(NAME).unwrap().state, TriggerState::Paused);
    }

    #[tokio::test]
    async fn paused_trigger_is_resumed() {
        let api = InMemoryTriggers::new();
        let mut seeded = DesiredTrigger::from_spec(&ctx(), &job("0 2 * * *")).to_resource();
        seeded.state = TriggerState::Paused;
        api.insert(seeded);

        let observer = RecordingObserver::default();
        let outcome = reconcile_trigger(&ctx(), &api, &observer, &job("0 2 * * *"))
            .await
            .unwrap();

        assert_eq!(outcome.transition, Some(TriggerState::Enabled));
        assert_eq!(
            observer.events(),
            vec![Event::Transitioned(
                NAME.into(),
                TriggerState::Paused,
                TriggerState::Enabled
            )]
        );
    }

    #[tokio::test]
    async fn disabled_state_is_left_alone() {
        let api = InMemoryTriggers::new();
        let mut seeded = DesiredTrigger::from_spec(&ctx(), &job("0 2 * * *")).to_resource();
        seeded.state = TriggerState::Disabled;
        api.insert(seeded);

        let outcome = reconcile_trigger(&ctx(), &api, &NoOpObserver, &job("0 2 * * *"))
            .await
            .unwrap();

        assert!(outcome.is_unchanged());
        assert!(api.mutating_calls().is_empty());
    }

    #[tokio::test]
    async fn transition_and_update_both_happen() {
        let api = InMemoryTriggers::new();
        let mut seeded = DesiredTrigger::from_spec(&ctx(), &job("0 3 * * *")).to_resource();
        seeded.state = TriggerState::Paused;
        seeded.time_zone = "Europe/Berlin".into();
        api.insert(seeded);

        let outcome = reconcile_trigger(&ctx(), &api, &NoOpObserver, &job("0 2 * * *"))
            .await
            .unwrap();

        assert_eq!(outcome.transition, Some(TriggerState::Enabled));
        assert_eq!(outcome.mask.paths(), &["schedule", "time_zone"]);

        let ops: Vec<_> = api.mutating_calls().into_iter().map(|c| c.op).collect();
        assert_eq!(ops, vec![Operation::Resume, Operation::Update]);
        let stored = api.get(NAME).unwrap();
        assert_eq!(stored.schedule, "0 2 * * *");
        assert_eq!(stored.state, TriggerState::Enabled);
    }

    #[tokio::test]
    async fn non_http_target_is_an_error() {
        let api = InMemoryTriggers::new();
        api.insert(TriggerJob {
            name: NAME.into(),
            schedule: "0 2 * * *".into(),
            time_zone: "UTC".into(),
            state: TriggerState::Enabled,
            ..Default::default()
        });

        let err = reconcile_trigger(&ctx(), &api, &NoOpObserver, &job("0 2 * * *"))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::MissingHttpTarget(name) if name == NAME));
    }

    #[tokio::test]
    async fn failed_pause_propagates() {
        let api = InMemoryTriggers::new();
        reconcile_trigger(&ctx(), &api, &NoOpObserver, &job("0 2 * * *"))
            .await
            .unwrap();
        api.fail_next(Operation::Pause, ApiError::Transient("503 unavailable".into()));

        let ctx = ctx().with_disable_triggers(true);
        let err = reconcile_trigger(&ctx, &api, &NoOpObserver, &job("0 2 * * *"))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "trigger pause failed: transient remote failure: 503 unavailable"
        );
    }
}
