use std::{fs, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use gruns_cloud::{CloudRunJobs, CloudScheduler, GcloudToken, StaticToken, TokenHandle};
use gruns_core::{FanoutObserver, ObserverHandle, Reconciler, prepare::check_jobs};
use gruns_model::{RuntimeContext, load_jobs};
use gruns_observe::{LogObserver, LoggerConfig, init_logger};
use gruns_prometheus::PrometheusObserver;

mod cli;
use cli::{ApplyArgs, Cli, Command, ContextArgs};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1) logger, before the runtime: local offset detection needs a single thread
    let cfg = LoggerConfig {
        format: cli.log_format,
        level: cli.log_level,
        ..Default::default()
    };
    init_logger(&cfg)?;

    // 2) runtime
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    match cli.command {
        Command::Apply(args) => runtime.block_on(apply(args)),
        Command::Validate(args) => validate(args),
    }
}

/// Log and count every reconcile event.
fn observers(metrics: &PrometheusObserver) -> ObserverHandle {
    Arc::new(
        FanoutObserver::default()
            .with(Arc::new(LogObserver::new()))
            .with(Arc::new(metrics.clone())),
    )
}

fn log_context(ctx: &RuntimeContext) {
    info!(
        project = ctx.project_id(),
        number = ctx.project_number(),
        region = ctx.region(),
        service_account = ctx.service_account(),
        trigger_service_account = ctx.trigger_service_account(),
        disable_triggers = ctx.disable_triggers(),
        file = %ctx.config_path().display(),
        "resolved context"
    );
}

async fn apply(args: ApplyArgs) -> anyhow::Result<()> {
    let ctx = args.context.runtime_context();
    log_context(&ctx);

    let jobs = load_jobs(ctx.config_path())?;

    // 3) token + clients
    let token: TokenHandle = match args.access_token.filter(|t| !t.is_empty()) {
        Some(t) => Arc::new(StaticToken::new(t)),
        None => Arc::new(GcloudToken::new()),
    };
    let run = CloudRunJobs::new(token.clone())?;
    let scheduler = CloudScheduler::new(token)?;

    // 4) observers
    let metrics = PrometheusObserver::new()?;
    let observer = observers(&metrics);

    // 5) reconcile
    let reconciler =
        Reconciler::new(ctx, Arc::new(run), Arc::new(scheduler)).with_observer(observer);
    let result = reconciler.apply(jobs).await;

    // 6) metrics + summary; counters are written on failure too
    if let Some(path) = &args.metrics_file {
        fs::write(path, metrics.encode_text()?)
            .with_context(|| format!("failed to write metrics to {}", path.display()))?;
    }

    let summary = result?;
    println!("{summary}");
    Ok(())
}

fn validate(args: ContextArgs) -> anyhow::Result<()> {
    let ctx = args.runtime_context();
    log_context(&ctx);

    let jobs = check_jobs(&ctx, load_jobs(ctx.config_path())?)?;
    let scheduled = jobs.iter().filter(|j| j.is_scheduled()).count();
    println!(
        "{}: {} jobs ok, {} scheduled",
        ctx.config_path().display(),
        jobs.len(),
        scheduled
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use gruns_core::{ReconcileObserver, resource::ResourceKind};

    use super::*;

    #[test]
    fn events_reach_the_metrics_file() {
        let metrics = PrometheusObserver::new().unwrap();
        let observer = observers(&metrics);

        observer.resource_created(ResourceKind::ExecutionJob, "projects/p/locations/r/jobs/a");
        observer.resource_deleted(ResourceKind::Trigger, "projects/p/locations/r/jobs/b-trigger");

        let text = metrics.encode_text().unwrap();
        assert!(
            text.contains("gruns_resources_created_total{kind=\"execution_job\"} 1"),
            "{text}"
        );
        assert!(
            text.contains("gruns_resources_deleted_total{kind=\"trigger\"} 1"),
            "{text}"
        );
    }
}
