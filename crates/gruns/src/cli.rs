use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gruns_model::{DEFAULT_JOBS_FILE, RuntimeContext};
use gruns_observe::{LoggerFormat, LoggerLevel};

/// Reconcile Cloud Run jobs and their Cloud Scheduler triggers with a job file.
#[derive(Debug, Parser)]
#[command(name = "gruns", version, about, long_about = None)]
pub struct Cli {
    /// Log filter, e.g. `info` or `gruns_cloud=debug,info`
    #[arg(long, global = true, env = "GRUNS_LOG", default_value = "info")]
    pub log_level: LoggerLevel,

    /// Log output format (text, json, journald)
    #[arg(long, global = true, env = "GRUNS_LOG_FORMAT", default_value = "text")]
    pub log_format: LoggerFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create, update and clean up remote jobs to match the job file
    Apply(ApplyArgs),

    /// Check the job file without contacting any remote API
    Validate(ContextArgs),
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub context: ContextArgs,

    /// OAuth2 access token; `gcloud auth print-access-token` is used when unset
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Write counters in the Prometheus text format here after the run
    #[arg(long, value_name = "PATH")]
    pub metrics_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ContextArgs {
    /// Job file
    #[arg(default_value = DEFAULT_JOBS_FILE)]
    pub file: PathBuf,

    #[arg(long, env = "GOOGLE_PROJECT_ID")]
    pub project_id: String,

    #[arg(long, env = "GOOGLE_PROJECT_NUMBER")]
    pub project_number: String,

    #[arg(long, env = "GOOGLE_REGION")]
    pub region: String,

    /// Default service account jobs run as
    #[arg(long, env = "GOOGLE_SERVICE_ACCOUNT")]
    pub service_account: Option<String>,

    /// Service account triggers authenticate as
    #[arg(long, env = "GOOGLE_TRIGGER_SERVICE_ACCOUNT")]
    pub trigger_service_account: Option<String>,

    /// Create or keep every trigger paused
    #[arg(long)]
    pub disable_triggers: bool,
}

impl ContextArgs {
    pub fn runtime_context(&self) -> RuntimeContext {
        RuntimeContext::new(&self.project_id, &self.project_number, &self.region)
            .with_service_account(self.service_account.clone().unwrap_or_default())
            .with_trigger_service_account(self.trigger_service_account.clone().unwrap_or_default())
            .with_disable_triggers(self.disable_triggers)
            .with_config_path(&self.file)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    const CTX: [&str; 6] = [
        "--project-id",
        "acme",
        "--project-number",
        "1234",
        "--region",
        "europe-west1",
    ];

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gruns").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn apply_defaults() {
        let mut args = vec!["apply"];
        args.extend(CTX);
        let cli = parse(&args);

        assert_eq!(cli.log_level.as_str(), "info");
        assert_eq!(cli.log_format, LoggerFormat::Text);
        let Command::Apply(apply) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(apply.context.file, PathBuf::from("jobs.yml"));
        assert!(apply.metrics_file.is_none());

        let ctx = apply.context.runtime_context();
        assert_eq!(ctx.project_id(), "acme");
        assert_eq!(
            ctx.service_account(),
            "1234-compute@developer.gserviceaccount.com"
        );
        assert!(!ctx.disable_triggers());
    }

    #[test]
    fn service_accounts_go_to_their_own_fields() {
        let mut args = vec!["apply", "other.yml"];
        args.extend(CTX);
        args.extend([
            "--service-account",
            "run@acme.iam",
            "--trigger-service-account",
            "sched@acme.iam",
            "--disable-triggers",
        ]);
        let Command::Apply(apply) = parse(&args).command else {
            panic!("expected apply");
        };

        let ctx = apply.context.runtime_context();
        assert_eq!(ctx.region(), "europe-west1");
        assert_eq!(ctx.service_account(), "run@acme.iam");
        assert_eq!(ctx.trigger_service_account(), "sched@acme.iam");
        assert!(ctx.disable_triggers());
        assert_eq!(ctx.config_path(), PathBuf::from("other.yml").as_path());
    }

    #[test]
    fn global_log_flags_follow_subcommand() {
        let mut args = vec!["validate"];
        args.extend(CTX);
        args.extend(["--log-format", "json", "--log-level", "gruns_core=debug,info"]);
        let cli = parse(&args);

        assert_eq!(cli.log_format, LoggerFormat::Json);
        assert_eq!(cli.log_level.as_str(), "gruns_core=debug,info");
        assert!(matches!(cli.command, Command::Validate(_)));
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let mut args = vec!["gruns", "validate", "--log-level", "x=loud"];
        args.extend(CTX);
        assert!(Cli::try_parse_from(args).is_err());
    }
}
