use std::collections::BTreeMap;

use gruns_model::{JobSpec, Labels};

use crate::{
    error::CoreError,
    map::to_wire_env,
    resource::{
        Container, ExecutionJob, ExecutionTemplate, LIMIT_CPU, LIMIT_MEMORY, ResourceRequirements,
        TaskTemplate, WireEnvVar, format_duration,
    },
};

pub const LAUNCH_STAGE: &str = "BETA";
pub const EXECUTION_ENVIRONMENT: &str = "EXECUTION_ENVIRONMENT_GEN2";

/// Desired state of an execution job, derived from a prepared [`JobSpec`].
///
/// Building it validates the env vars, so a `DesiredExecution` always holds a wire-ready env
/// list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredExecution {
    pub image: String,
    pub args: Vec<String>,
    pub cpu: String,
    pub memory: String,
    pub env: Vec<WireEnvVar>,
    pub service_account: String,
    pub task_count: u32,
    pub parallelism: u32,
    pub timeout_seconds: u64,
    pub max_retries: u32,
}

impl DesiredExecution {
    pub fn from_spec(job: &JobSpec) -> Result<Self, CoreError> {
        Ok(Self {
            image: job.image.clone(),
            args: job.arg_list(),
            cpu: job.cpu.clone(),
            memory: job.memory.clone(),
            env: to_wire_env(&job.env)?,
            service_account: job.service_account.clone(),
            task_count: job.task_count,
            parallelism: job.parallelism,
            timeout_seconds: job.timeout_seconds,
            max_retries: job.max_retries,
        })
    }

    /// Fresh resource for a create call, labeled as managed by this tool.
    pub fn to_resource(&self) -> ExecutionJob {
        let limits = BTreeMap::from([
            (LIMIT_MEMORY.to_string(), self.memory.clone()),
            (LIMIT_CPU.to_string(), self.cpu.clone()),
        ]);

        ExecutionJob {
            labels: Labels::managed(),
            launch_stage: LAUNCH_STAGE.to_string(),
            template: ExecutionTemplate {
                parallelism: self.parallelism,
                task_count: self.task_count,
                template: TaskTemplate {
                    containers: vec![Container {
                        image: self.image.clone(),
                        args: self.args.clone(),
                        env: self.env.clone(),
                        resources: ResourceRequirements {
                            limits,
                            ..Default::default()
                        },
                        ..Default::default()
                    }],
                    max_retries: self.max_retries,
                    timeout: format_duration(self.timeout_seconds),
                    service_account: self.service_account.clone(),
                    execution_environment: EXECUTION_ENVIRONMENT.to_string(),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
