use gruns_model::{JobSpec, RuntimeContext};

/// Replace the known `${...}` placeholders in `raw` with context values.
///
/// Recognized: `PROJECT_ID`, `PROJECT_NUMBER`, `REGION`, `SERVICE_ACCOUNT`,
/// `TRIGGER_SERVICE_ACCOUNT`. Anything else is left as written.
pub fn interpolate(ctx: &RuntimeContext, raw: &str) -> String {
    let pairs = [
        ("${PROJECT_ID}", ctx.project_id()),
        ("${PROJECT_NUMBER}", ctx.project_number()),
        ("${REGION}", ctx.region()),
        ("${SERVICE_ACCOUNT}", ctx.service_account()),
        ("${TRIGGER_SERVICE_ACCOUNT}", ctx.trigger_service_account()),
    ];

    let mut out = raw.to_string();
    for (placeholder, value) in pairs {
        if out.contains(placeholder) {
            out = out.replace(placeholder, value);
        }
    }
    out
}

/// Interpolate the `image` and `service_account` fields of `job` in place.
pub fn interpolate_job(ctx: &RuntimeContext, job: &mut JobSpec) {
    job.image = interpolate(ctx, &job.image);
    job.service_account = interpolate(ctx, &job.service_account);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RuntimeContext {
        RuntimeContext::new("acme", "42", "europe-west1")
            .with_trigger_service_account("invoker@acme")
    }

    #[test]
    fn replaces_every_known_placeholder() {
        let out = interpolate(
            &ctx(),
            "${REGION}-docker.pkg.dev/${PROJECT_ID}/${PROJECT_NUMBER}:${PROJECT_ID}",
        );
        assert_eq!(out, "europe-west1-docker.pkg.dev/acme/42:acme");

        assert_eq!(
            interpolate(&ctx(), "${SERVICE_ACCOUNT}"),
            "42-compute@developer.gserviceaccount.com"
        );
        assert_eq!(interpolate(&ctx(), "${TRIGGER_SERVICE_ACCOUNT}"), "invoker@acme");
    }

    #[test]
    fn unknown_placeholders_pass_through() {
        assert_eq!(interpolate(&ctx(), "img:${TAG}"), "img:${TAG}");
        assert_eq!(interpolate(&ctx(), ""), "");
    }

    #[test]
    fn is_idempotent() {
        let once = interpolate(&ctx(), "${PROJECT_ID}/${UNKNOWN}/${REGION}");
        assert_eq!(interpolate(&ctx(), &once), once);
    }

    #[test]
    fn only_image_and_service_account_are_touched() {
        let mut job = JobSpec::new("j", "gcr.io/${PROJECT_ID}/app");
        job.service_account = "runner@${PROJECT_ID}.iam.gserviceaccount.com".into();
        job.args = "--project ${PROJECT_ID}".into();

        interpolate_job(&ctx(), &mut job);
        assert_eq!(job.image, "gcr.io/acme/app");
        assert_eq!(job.service_account, "runner@acme.iam.gserviceaccount.com");
        assert_eq!(job.args, "--project ${PROJECT_ID}");
    }
}
