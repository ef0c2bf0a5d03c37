mod core;
mod features;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::config::Config;
use crate::core::database;
use crate::core::error::Result;
use crate::features::readme_oss::{
    AgentRunService, CopyrightClearedService, LicenseClearedService, ReadmeOssAgent,
    ReportRecordService, ReportWriter, UploadAggregator, UploadService,
};
use crate::features::scheduler::{JobArgs, SchedulerSession};

fn main() -> ExitCode {
    // One report at a time, a single thread is all the agent needs
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(async_main()) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            tracing::error!("ReadMe OSS agent failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn async_main() -> anyhow::Result<i32> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    // stdout belongs to the scheduler protocol, logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = JobArgs::parse();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: report_dir={}, heartbeat={}s, pid={}",
        config.report.output_dir.display(),
        config.agent.heartbeat_interval.as_secs(),
        std::process::id()
    );

    // Greet before job setup so setup failures still end with a BYE
    let mut session =
        SchedulerSession::stdio(args.job_info(), config.agent.clone(), args.scheduler_start);
    session.greet().await?;
    tracing::debug!("Scheduler mode: {}", session.scheduler_mode());

    let outcome = run_job(&session, &config, &args).await;
    let exit_code = session.finish(outcome).await?;

    Ok(exit_code)
}

/// Parse the job's inputs, wire the services and process every upload the scheduler sends
async fn run_job<R, W>(
    session: &SchedulerSession<R, W>,
    config: &Config,
    args: &JobArgs,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let additional_upload_ids = args.additional_upload_ids()?;

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    AgentRunService::new(pool.clone())
        .ensure_ars_table(&config.agent.name)
        .await?;

    let aggregator = UploadAggregator::new(
        Arc::new(LicenseClearedService::new(pool.clone())),
        Arc::new(CopyrightClearedService::new(pool.clone())),
    );
    let writer = ReportWriter::new(
        config.report.clone(),
        Arc::new(UploadService::new(pool.clone())),
        Arc::new(ReportRecordService::new(pool.clone())),
    );
    let agent = ReadmeOssAgent::new(aggregator, writer, additional_upload_ids);

    let processed = agent.run(session).await;
    pool.close().await;

    processed
}
