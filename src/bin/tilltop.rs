//! tilltop - Terminal retail management dashboard.
//!
//! Runs against the in-memory mock backend by default (seeded on first
//! run, persisted to a single dataset file) or against a REST API with
//! `--api-url`.
//!
//! Usage:
//!   tilltop                                # mock backend, ./tilltop.dat
//!   tilltop --data /tmp/shop.dat           # mock backend, custom blob
//!   tilltop --api-url http://host:8080/api # REST backend
//!   tilltop --refresh 30                   # reload active view every 30s

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use tilltop::api::{MockApi, RestApi, RetailApi};
use tilltop::tui::App;

/// Terminal retail management dashboard.
#[derive(Parser)]
#[command(name = "tilltop", about = "Retail management dashboard", version)]
struct Args {
    /// REST API base URL. Without it the in-memory mock backend is used.
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Dataset file for the mock backend.
    #[arg(long, default_value = "tilltop.dat", value_name = "PATH")]
    data: PathBuf,

    /// Artificial latency of the mock backend in milliseconds.
    #[arg(long, default_value = "150", value_name = "MS")]
    latency_ms: u64,

    /// Reload the active view every N seconds (0 = off).
    #[arg(long, default_value = "0", value_name = "SECS")]
    refresh: u64,

    /// UI tick interval in milliseconds (drives debounce and timers).
    #[arg(long, default_value = "100", value_name = "MS")]
    tick_ms: u64,

    /// Write logs to this file (the terminal is taken over by the UI).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(args: &Args) {
    let level = if args.quiet {
        Level::ERROR
    } else {
        match args.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tilltop={}", level)));

    match &args.log_file {
        Some(path) => {
            if let Ok(file) = File::create(path) {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false)
                    .init();
            }
        }
        // No log file: keep stderr, useful with 2> redirection.
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);

    let (api, backend): (Box<dyn RetailApi>, String) = match &args.api_url {
        Some(url) => match RestApi::new(url) {
            Ok(api) => (Box::new(api), url.clone()),
            Err(e) => {
                eprintln!("failed to create API client: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => (
            Box::new(MockApi::load_or_seed(
                args.data.clone(),
                Duration::from_millis(args.latency_ms),
            )),
            "mock".to_string(),
        ),
    };

    let refresh = (args.refresh > 0).then(|| Duration::from_secs(args.refresh));
    let app = App::new(api, backend, Duration::from_millis(args.tick_ms.max(10)), refresh);

    if let Err(e) = app.run() {
        eprintln!("terminal error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
