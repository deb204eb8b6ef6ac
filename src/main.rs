#![forbid(unsafe_code)]

//! `memcard-guard` — save-state synchronization guard binary.
//!
//! Backs up the PCSX2 memory-card directory to a restic repository before
//! and after a play session, restores it on request, and skips the
//! pre-run backup when the emulator is already running.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use memcard_guard::audit::FileAuditLog;
use memcard_guard::config::{SessionConfig, SessionMode, DEFAULT_PROCESS_NAME};
use memcard_guard::launcher::HostLauncher;
use memcard_guard::liveness::PgrepProbe;
use memcard_guard::orchestrator::SessionOrchestrator;
use memcard_guard::store::restic::ResticStore;
use memcard_guard::store::RetentionPolicy;
use memcard_guard::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "memcard-guard",
    about = "Sync/restore PCSX2 memory cards around an emulator session",
    version,
    long_about = None
)]
struct Cli {
    /// Restic repository locator.
    #[arg(short, long)]
    repo: String,

    /// Password for the restic repository.
    #[arg(short, long)]
    password: String,

    /// Memory-card directory under sync (default: the platform PCSX2
    /// location).
    #[arg(short, long)]
    memcard_dir: Option<PathBuf>,

    /// Restore memory cards from the latest snapshot instead of playing.
    #[arg(long)]
    restore: bool,

    /// Audit log file (default: pcsx2_sync.log in the home directory).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Daily snapshots to keep when pruning.
    #[arg(long, default_value_t = 7)]
    keep_daily: u32,

    /// Diagnostic log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Name (or path) of the emulator executable.
    #[arg(default_value = DEFAULT_PROCESS_NAME)]
    process: String,
}

fn main() -> ExitCode {
    let args = Cli::parse();
    if let Err(err) = init_tracing(args.log_format) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(%err, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args)) {
        Ok(code) => code,
        Err(err) => {
            error!(%err, "session failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<ExitCode> {
    let mode = if args.restore {
        SessionMode::RestoreOnly
    } else {
        SessionMode::RunAndSync
    };
    let config = SessionConfig::new(
        args.repo,
        args.password,
        args.memcard_dir,
        mode,
        args.process,
        args.log_file,
        RetentionPolicy {
            keep_daily: args.keep_daily,
        },
    )?;

    let audit = FileAuditLog::open(config.audit_log_path.clone())?;
    let store = ResticStore::new(config.repo.clone(), config.secret.clone());
    let probe = PgrepProbe;
    let launcher = HostLauncher;
    let orchestrator = SessionOrchestrator::new(&config, &store, &probe, &launcher, &audit);
    let outcome = orchestrator.run().await?;

    // The session's exit status mirrors the emulator's when it ran; a
    // restore-only session that got here succeeded.
    Ok(exit_code_from(outcome.launch_exit_code.unwrap_or(0)))
}

fn exit_code_from(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
