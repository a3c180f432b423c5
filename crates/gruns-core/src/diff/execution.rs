use crate::{
    diff::FieldRule,
    map::DesiredExecution,
    resource::{ExecutionJob, LIMIT_CPU, LIMIT_MEMORY, format_duration},
};

type Rule = FieldRule<ExecutionJob, DesiredExecution>;

/// Fields of an execution job kept in sync with the job file, in mask order.
pub static EXECUTION_JOB_FIELDS: &[Rule] = &[
    FieldRule {
        path: "template.task_count",
        differs: task_count_differs,
        apply: apply_task_count,
    },
    FieldRule {
        path: "template.parallelism",
        differs: parallelism_differs,
        apply: apply_parallelism,
    },
    FieldRule {
        path: "template.template.timeout",
        differs: timeout_differs,
        apply: apply_timeout,
    },
    FieldRule {
        path: "template.template.containers.0.image",
        differs: image_differs,
        apply: apply_image,
    },
    FieldRule {
        path: "template.template.containers.0.args",
        differs: args_differs,
        apply: apply_args,
    },
    FieldRule {
        path: "template.template.containers.0.resources.limits.cpu",
        differs: cpu_differs,
        apply: apply_cpu,
    },
    FieldRule {
        path: "template.template.containers.0.resources.limits.memory",
        differs: memory_differs,
        apply: apply_memory,
    },
    FieldRule {
        path: "template.template.containers.0.env",
        differs: env_differs,
        apply: apply_env,
    },
    FieldRule {
        path: "template.template.service_account",
        differs: service_account_differs,
        apply: apply_service_account,
    },
    FieldRule {
        path: "template.template.retries",
        differs: retries_differs,
        apply: apply_retries,
    },
];

fn task_count_differs(r: &ExecutionJob, d: &DesiredExecution) -> bool {
    r.template.task_count != d.task_count
}

fn apply_task_count(r: &mut ExecutionJob, d: &DesiredExecution) {
    r.template.task_count = d.task_count;
}

fn parallelism_differs(r: &ExecutionJob, d: &DesiredExecution) -> bool {
    r.template.parallelism != d.parallelism
}

fn apply_parallelism(r: &mut ExecutionJob, d: &DesiredExecution) {
    r.template.parallelism = d.parallelism;
}

// An unparseable remote timeout counts as a difference.
fn timeout_differs(r: &ExecutionJob, d: &DesiredExecution) -> bool {
    r.timeout_secs() != Some(d.timeout_seconds)
}

fn apply_timeout(r: &mut ExecutionJob, d: &DesiredExecution) {
    r.template.template.timeout = format_duration(d.timeout_seconds);
}

fn image_differs(r: &ExecutionJob, d: &DesiredExecution) -> bool {
    r.container().map(|c| c.image.as_str()) != Some(d.image.as_str())
}

fn apply_image(r: &mut ExecutionJob, d: &DesiredExecution) {
    r.container_mut().image = d.image.clone();
}

fn args_differs(r: &ExecutionJob, d: &DesiredExecution) -> bool {
    r.container().map_or(&[][..], |c| c.args.as_slice()) != d.args.as_slice()
}

fn apply_args(r: &mut ExecutionJob, d: &DesiredExecution) {
    r.container_mut().args = d.args.clone();
}

fn cpu_differs(r: &ExecutionJob, d: &DesiredExecution) -> bool {
    r.limit(LIMIT_CPU) != Some(d.cpu.as_str())
}

fn apply_cpu(r: &mut ExecutionJob, d: &DesiredExecution) {
    r.container_mut()
        .resources
        .limits
        .insert(LIMIT_CPU.to_string(), d.cpu.clone());
}

fn memory_differs(r: &ExecutionJob, d: &DesiredExecution) -> bool {
    r.limit(LIMIT_MEMORY) != Some(d.memory.as_str())
}

fn apply_memory(r: &mut ExecutionJob, d: &DesiredExecution) {
    r.container_mut()
        .resources
        .limits
        .insert(LIMIT_MEMORY.to_string(), d.memory.clone());
}

// Compared as an ordered sequence: reordering is a change.
fn env_differs(r: &ExecutionJob, d: &DesiredExecution) -> bool {
    r.container().map_or(&[][..], |c| c.env.as_slice()) != d.env.as_slice()
}

fn apply_env(r: &mut ExecutionJob, d: &DesiredExecution) {
    r.container_mut().env = d.env.clone();
}

fn service_account_differs(r: &ExecutionJob, d: &DesiredExecution) -> bool {
    r.template.template.service_account != d.service_account
}

fn apply_service_account(r: &mut ExecutionJob, d: &DesiredExecution) {
    r.template.template.service_account = d.service_account.clone();
}

fn retries_differs(r: &ExecutionJob, d: &DesiredExecution) -> bool {
    r.template.template.max_retries != d.max_retries
}

fn apply_retries(r: &mut ExecutionJob, d: &DesiredExecution) {
    r.template.template.max_retries = d.max_retries;
}

#[cfg(test)]
mod tests {
    use gruns_model::{EnvVar, JobSpec};

    use super::*;
    use crate::diff::diff_and_apply;

    fn desired() -> DesiredExecution {
        let mut job = JobSpec::new("nightly", "img:v1");
        job.args = "--full".into();
        job.cpu = "1000m".into();
        job.memory = "512Mi".into();
        job.service_account = "sa@p".into();
        job.task_count = 1;
        job.parallelism = 1;
        job.timeout_seconds = 900;
        job.max_retries = 1;
        job.env.push(EnvVar::literal("A", "1"));
        job.env.push(EnvVar::secret("B", "b"));
        DesiredExecution::from_spec(&job).unwrap()
    }

    fn in_sync() -> (ExecutionJob, DesiredExecution) {
        let d = desired();
        (d.to_resource(), d)
    }

    fn rule(path: &str) -> &'static Rule {
        EXECUTION_JOB_FIELDS
            .iter()
            .find(|r| r.path == path)
            .unwrap()
    }

    /// Mutate the remote copy, check the rule flags it, apply, and check it no longer does.
    fn check(path: &str, mutate: impl FnOnce(&mut ExecutionJob)) {
        let (mut remote, d) = in_sync();
        let rule = rule(path);
        assert!(!(rule.differs)(&remote, &d), "{path} differs before mutation");

        mutate(&mut remote);
        assert!((rule.differs)(&remote, &d), "{path} not detected");

        (rule.apply)(&mut remote, &d);
        assert!(!(rule.differs)(&remote, &d), "{path} still differs after apply");
        assert_eq!(remote, d.to_resource(), "{path} apply left other drift");
    }

    #[test]
    fn paths_are_unique() {
        let mut paths: Vec<_> = EXECUTION_JOB_FIELDS.iter().map(|r| r.path).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), EXECUTION_JOB_FIELDS.len());
    }

    #[test]
    fn in_sync_job_has_empty_mask() {
        let (mut remote, d) = in_sync();
        assert!(diff_and_apply(&mut remote, &d, EXECUTION_JOB_FIELDS).is_empty());
    }

    #[test]
    fn task_count() {
        check("template.task_count", |r| r.template.task_count = 5);
    }

    #[test]
    fn parallelism() {
        check("template.parallelism", |r| r.template.parallelism = 3);
    }

    #[test]
    fn timeout() {
        check("template.template.timeout", |r| {
            r.template.template.timeout = "60s".into()
        });
        check("template.template.timeout", |r| {
            r.template.template.timeout = String::new()
        });
    }

    #[test]
    fn timeout_with_fraction_matches_whole_seconds() {
        let (mut remote, d) = in_sync();
        remote.template.template.timeout = "900.000s".into();
        assert!(!timeout_differs(&remote, &d));
    }

    #[test]
    fn image() {
        check("template.template.containers.0.image", |r| {
            r.container_mut().image = "img:v2".into()
        });
    }

    #[test]
    fn args() {
        check("template.template.containers.0.args", |r| {
            r.container_mut().args = vec!["--partial".into()]
        });
        check("template.template.containers.0.args", |r| {
            r.container_mut().args.clear()
        });
    }

    #[test]
    fn cpu() {
        check("template.template.containers.0.resources.limits.cpu", |r| {
            r.container_mut().resources.limits.insert("cpu".into(), "2".into());
        });
    }

    #[test]
    fn memory() {
        check("template.template.containers.0.resources.limits.memory", |r| {
            r.container_mut().resources.limits.remove("memory");
        });
    }

    #[test]
    fn env() {
        check("template.template.containers.0.env", |r| {
            r.container_mut().env.pop();
        });
        check("template.template.containers.0.env", |r| {
            r.container_mut().env.reverse()
        });
    }

    #[test]
    fn service_account() {
        check("template.template.service_account", |r| {
            r.template.template.service_account = "other@p".into()
        });
    }

    #[test]
    fn retries() {
        check("template.template.retries", |r| {
            r.template.template.max_retries = 0
        });
    }

    #[test]
    fn missing_container_reports_container_fields() {
        let (mut remote, d) = in_sync();
        remote.template.template.containers.clear();

        let mask = diff_and_apply(&mut remote, &d, EXECUTION_JOB_FIELDS);
        assert!(mask.contains("template.template.containers.0.image"));
        assert!(mask.contains("template.template.containers.0.env"));
        assert_eq!(remote.container().unwrap().image, "img:v1");
        assert!(diff_and_apply(&mut remote, &d, EXECUTION_JOB_FIELDS).is_empty());
    }
}
