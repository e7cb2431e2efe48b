// # nsddns - Namesilo dynamic DNS updater
//
// A THIN integration layer over nsddns-core. Reconciliation logic lives in
// the core crate; this binary only:
// 1. Parses command-line flags
// 2. Loads the JSON configuration file
// 3. Initializes logging and the runtime
// 4. Runs one reconciliation and maps the result to an exit code
//
// It is meant to be invoked periodically by cron or a systemd timer. It
// never loops, sleeps or retries.
//
// ## Configuration
//
// ```json
// { "domain": "example.com", "host": "home", "api_key": "..." }
// ```
//
// Default path `/etc/nsddns/conf.json`, override with `--config` or
// `NSDDNS_CONFIG`.
//
// ## Example
//
// ```bash
// nsddns --config ./conf.json --dry-run --debug
// ```

use anyhow::{Context, Result};
use clap::Parser;
use nsddns_core::config::DEFAULT_CONFIG_PATH;
use nsddns_core::{NsddnsConfig, ReconcileEngine, ReconcileOutcome};
use nsddns_ip_http::HttpIpSource;
use nsddns_provider_namesilo::NamesiloProvider;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Record is current (updated, unchanged, or dry run)
/// - 1: Configuration or startup error
/// - 2: Runtime error (network, registrar, parse, record not found)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NsddnsExitCode {
    /// Successful run
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error
    RuntimeError = 2,
}

impl From<NsddnsExitCode> for ExitCode {
    fn from(code: NsddnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Keep a Namesilo A record pointed at this machine's public IP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file to read from
    #[arg(short, long, env = "NSDDNS_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable debug logging (overrides --log-level)
    #[arg(short, long)]
    debug: bool,

    /// Log level
    #[arg(
        long,
        env = "NSDDNS_LOG_LEVEL",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    log_level: String,

    /// Do not update the resource record
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    /// Effective tracing level
    fn level(&self) -> Level {
        if self.debug {
            return Level::DEBUG;
        }

        match self.log_level.as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.level())
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return NsddnsExitCode::ConfigError.into();
    }

    info!("Loading configuration from {}", args.config.display());
    let config = match NsddnsConfig::from_file(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{}", e);
            return NsddnsExitCode::ConfigError.into();
        }
    };

    // Strictly sequential: one thread, one request in flight at a time
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return NsddnsExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(run(config, args.dry_run));

    match result {
        Ok(outcome) => {
            report(&outcome);
            NsddnsExitCode::Success.into()
        }
        Err(e) => {
            error!("{:#}", e);
            exit_code_for(&e).into()
        }
    }
}

/// Build the engine from configuration and run one reconciliation
async fn run(config: NsddnsConfig, dry_run: bool) -> Result<ReconcileOutcome> {
    let hostname = config.full_hostname();
    let provider = NamesiloProvider::new(config.api_key.clone())?;

    let engine = ReconcileEngine::new(Box::new(HttpIpSource::default()), Box::new(provider), config)?
        .with_dry_run(dry_run);

    engine
        .run()
        .await
        .with_context(|| format!("Failed to reconcile A record for {}", hostname))
}

/// Log a one-line summary of a successful run
fn report(outcome: &ReconcileOutcome) {
    match (&outcome.new_record_id, outcome.needs_update) {
        (Some(id), _) => info!(
            "{} now points at {} (record id {})",
            outcome.hostname, outcome.current_ip, id
        ),
        (None, true) => info!(
            "DRY RUN: {} left at {} (current IP {})",
            outcome.hostname, outcome.record_value, outcome.current_ip
        ),
        (None, false) => info!(
            "{} already points at {}, nothing to do",
            outcome.hostname, outcome.current_ip
        ),
    }
}

/// Map a failed run to its exit code
fn exit_code_for(err: &anyhow::Error) -> NsddnsExitCode {
    match err.downcast_ref::<nsddns_core::Error>() {
        Some(e) if e.is_config() => NsddnsExitCode::ConfigError,
        _ => NsddnsExitCode::RuntimeError,
    }
}
