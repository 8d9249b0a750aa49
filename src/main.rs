//! Student grade book service entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use grade_book::api::{create_router, AppState};
use grade_book::config::Config;
use grade_book::gradebook::{self, LOW_GRADE_THRESHOLD};
use grade_book::metrics;
use grade_book::storage::{JsonFileStore, StudentStore};
use grade_book::utils::shutdown_signal;

/// Student grade book service.
#[derive(Parser, Debug)]
#[command(name = "grade-book")]
#[command(about = "Record-keeping service for student grades backed by a JSON file")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file holding the student list (overrides DATA_FILE).
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,

    /// List students with a grade below the minimum.
    LowPerformance,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("grade_book=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match &args.command {
        Some(Command::CheckConfig) => cmd_check_config(&args),
        Some(Command::LowPerformance) => cmd_low_performance(&args),
        Some(Command::Serve) | None => cmd_serve(&args).await,
    }
}

/// Load configuration and apply CLI overrides.
fn resolve_config(args: &Args) -> grade_book::Result<Config> {
    let mut config = Config::load()?;

    if let Some(data_file) = &args.data_file {
        config.data_file = data_file.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.verbose {
        config.verbose = true;
    }

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config(args: &Args) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("GRADE BOOK - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match resolve_config(args) {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    print!("Reading data file... ");
    let store = JsonFileStore::new(config.data_file.clone());
    match store.load() {
        Ok(students) => {
            println!("OK");
            println!("  Students stored: {}", students.len());
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Data file unreadable"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Data File: {}", config.data_file.display());
    println!("  Listen: {}:{}", config.bind_host, config.port);
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print students with any grade below the minimum.
fn cmd_low_performance(args: &Args) -> anyhow::Result<()> {
    let config = resolve_config(args)?;
    let store = JsonFileStore::new(config.data_file.clone());

    match gradebook::low_performers(&store) {
        Ok(students) => {
            println!("Students with a grade below {}:", LOW_GRADE_THRESHOLD);
            for student in students {
                let low: Vec<String> = student
                    .grades
                    .iter()
                    .filter(|(_, grade)| **grade < LOW_GRADE_THRESHOLD)
                    .map(|(subject, grade)| format!("{}={}", subject, grade))
                    .collect();
                println!(
                    "  [{}] {}: {}",
                    student.student_id,
                    student.student_name,
                    low.join(", ")
                );
            }
            Ok(())
        }
        Err(e) if e.is_client_error() => {
            println!("{}", e);
            Ok(())
        }
        Err(e) => Err(grade_book::AppError::from(e).into()),
    }
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(args: &Args) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let config = resolve_config(args).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Configuration loaded successfully");
    info!("Data file: {}", config.data_file.display());

    let mut app_state = AppState::new(JsonFileStore::new(config.data_file.clone()));
    if config.metrics_enabled {
        match metrics::install_prometheus() {
            Ok(handle) => app_state = app_state.with_prometheus(handle),
            Err(e) => warn!("Metrics disabled, recorder install failed: {}", e),
        }
    }

    let addr = config.bind_addr().map_err(|e| anyhow::anyhow!(e))?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(grade_book::AppError::from)?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
