//! Agent side of the scheduler's line protocol.
//!
//! In scheduler mode the agent announces its version, asks for work with
//! `OK`, reads one upload id per line, sends `HEART: <processed> <alive>`
//! on a fixed period and says `BYE <code>` on the way out. Outside scheduler
//! mode the same loop reads upload ids from stdin but writes nothing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::core::config::AgentConfig;
use crate::core::error::{AppError, Result};
use crate::features::scheduler::{JobContext, JobInfo};

/// Liveness counters shared with the heartbeat ticker
#[derive(Debug, Default)]
struct Heartbeat {
    processed: AtomicU64,
    alive: AtomicBool,
}

impl Heartbeat {
    /// Format the next beat and clear the alive flag
    fn beat(&self) -> String {
        let alive = self.alive.swap(false, Ordering::SeqCst);
        format!(
            "HEART: {} {}\n",
            self.processed.load(Ordering::SeqCst),
            u8::from(alive)
        )
    }
}

/// A command read from the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Upload(i32),
    Verbose(u32),
    Close,
}

pub struct SchedulerSession<R, W> {
    job: JobInfo,
    agent: AgentConfig,
    scheduler_mode: bool,
    reader: Mutex<R>,
    writer: Arc<Mutex<W>>,
    heartbeat: Arc<Heartbeat>,
    ticker: Option<JoinHandle<()>>,
}

impl SchedulerSession<BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    /// Session over the process's stdin/stdout
    pub fn stdio(job: JobInfo, agent: AgentConfig, scheduler_mode: bool) -> Self {
        Self::new(
            job,
            agent,
            scheduler_mode,
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
        )
    }
}

impl<R, W> SchedulerSession<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(job: JobInfo, agent: AgentConfig, scheduler_mode: bool, reader: R, writer: W) -> Self {
        Self {
            job,
            agent,
            scheduler_mode,
            reader: Mutex::new(reader),
            writer: Arc::new(Mutex::new(writer)),
            heartbeat: Arc::new(Heartbeat::default()),
            ticker: None,
        }
    }

    pub fn scheduler_mode(&self) -> bool {
        self.scheduler_mode
    }

    /// Announce the agent version and start the heartbeat ticker
    pub async fn greet(&mut self) -> Result<()> {
        if !self.scheduler_mode {
            tracing::debug!("Not started by the scheduler, skipping greeting");
            return Ok(());
        }

        self.send(&format!("VERSION: {}\n", self.agent.version)).await?;
        self.ticker = Some(self.spawn_ticker(self.agent.heartbeat_interval));

        tracing::info!(
            "Connected to scheduler as {} {} (job={}, group={}, user={})",
            self.agent.name,
            self.agent.version,
            self.job_id(),
            self.group_id(),
            self.user_id()
        );
        Ok(())
    }

    /// Wait for the next upload to process, `None` once the scheduler is done with us
    pub async fn next_upload(&self) -> Result<Option<i32>> {
        if self.scheduler_mode {
            self.send("OK\n").await?;
        }

        let mut reader = self.reader.lock().await;
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line).await? == 0 {
                tracing::debug!("Scheduler input closed");
                return Ok(None);
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match parse_command(trimmed)? {
                Command::Upload(upload_id) => {
                    self.report_progress(0);
                    return Ok(Some(upload_id));
                }
                Command::Verbose(level) => {
                    tracing::info!("Scheduler requested verbosity level {}", level);
                }
                Command::Close => {
                    tracing::debug!("Scheduler closed the job");
                    return Ok(None);
                }
            }
        }
    }

    /// Map the job outcome to its exit code and disconnect with it
    pub async fn finish(self, outcome: Result<usize>) -> Result<i32> {
        let exit_code = match outcome {
            Ok(processed) => {
                tracing::info!("Job {} finished, {} uploads processed", self.job_id(), processed);
                0
            }
            Err(e) => {
                tracing::error!("Job {} failed: {}", self.job_id(), e);
                e.exit_code()
            }
        };

        self.disconnect(exit_code).await?;
        Ok(exit_code)
    }

    /// Stop the ticker and tell the scheduler how the job ended
    pub async fn disconnect(mut self, exit_code: i32) -> Result<()> {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }

        if self.scheduler_mode {
            self.send(&format!("BYE {}\n", exit_code)).await?;
        }

        tracing::info!("Disconnected with exit code {}", exit_code);
        Ok(())
    }

    fn spawn_ticker(&self, period: Duration) -> JoinHandle<()> {
        let heartbeat = Arc::clone(&self.heartbeat);
        let writer = Arc::clone(&self.writer);

        tokio::spawn(async move {
            // First beat one full period after greeting
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let beat = heartbeat.beat();
                let mut writer = writer.lock().await;
                if let Err(e) = write_line(&mut *writer, &beat).await {
                    tracing::warn!("Failed to send heartbeat: {}", e);
                }
            }
        })
    }

    async fn send(&self, line: &str) -> Result<()> {
        let mut writer = self.writer.lock().await;
        write_line(&mut *writer, line).await
    }
}

#[async_trait]
impl<R, W> JobContext for SchedulerSession<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    fn job(&self) -> JobInfo {
        self.job
    }

    fn report_progress(&self, processed: u64) {
        self.heartbeat
            .processed
            .fetch_add(processed, Ordering::SeqCst);
        self.heartbeat.alive.store(true, Ordering::SeqCst);
    }

    async fn complete(&self, upload_id: i32) -> Result<()> {
        self.report_progress(0);
        tracing::debug!(
            "Upload {} done, {} statements processed so far",
            upload_id,
            self.heartbeat.processed.load(Ordering::SeqCst)
        );

        if self.scheduler_mode {
            let beat = self.heartbeat.beat();
            self.send(&beat).await?;
        }
        Ok(())
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

fn parse_command(line: &str) -> Result<Command> {
    if matches!(line, "CLOSE" | "END") {
        return Ok(Command::Close);
    }

    if let Some(level) = line.strip_prefix("VERBOSE") {
        return level
            .trim()
            .parse::<u32>()
            .map(Command::Verbose)
            .map_err(|_| AppError::Protocol(format!("Malformed verbosity command '{}'", line)));
    }

    match line.parse::<i32>() {
        Ok(upload_id) if upload_id > 0 => Ok(Command::Upload(upload_id)),
        _ => Err(AppError::Protocol(format!(
            "Expected an upload id, got '{}'",
            line
        ))),
    }
}
