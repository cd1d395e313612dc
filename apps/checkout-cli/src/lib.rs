//! # Checkout CLI Library
//!
//! Reads one command from a file, runs it against the cart engine, and
//! writes the result to another file.
//!
//! ## Module Organization
//! ```text
//! checkout_cli/
//! ├── lib.rs          ◄─── You are here (wiring & run)
//! ├── config.rs       ◄─── AppConfig: defaults → TOML → env → flags
//! ├── command.rs      ◄─── CommandRequest decoding and dispatch
//! └── error.rs        ◄─── AppError for failures around the engine
//! ```

pub mod command;
pub mod config;
pub mod error;

use std::path::PathBuf;

use checkout_core::{CartEngine, CartResponse};
use checkout_store::JsonFileStore;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use command::{execute, CommandRequest};
use config::AppConfig;
use error::{AppError, AppResult};

/// Command-line overrides. `None` leaves the configured value alone.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub db: Option<PathBuf>,
}

/// Runs one command.
///
/// ## Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                           One Invocation                                │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults, TOML file, CHECKOUT_* env, then flags                   │
/// │     • validate (non-empty paths, input != output)                       │
/// │                                                                         │
/// │  2. Build Engine ─────────────────────────────────────────────────────► │
/// │     • JsonFileStore at storage.path                                     │
/// │     • configured promotions appended via add_promotion                  │
/// │                                                                         │
/// │  3. Read Command ─────────────────────────────────────────────────────► │
/// │     • io.input decoded as { command, payload }                          │
/// │     • only text that is not a JSON object is an error                   │
/// │                                                                         │
/// │  4. Execute & Write ──────────────────────────────────────────────────► │
/// │     • result written to io.output as pretty JSON                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(options: RunOptions) -> AppResult<CartResponse> {
    let config = load_config(&options)?;
    run_with_config(&config)
}

/// Builds the effective configuration for `options`.
pub fn load_config(options: &RunOptions) -> AppResult<AppConfig> {
    let mut config = AppConfig::load(options.config.as_deref())?;

    if let Some(db) = &options.db {
        config.storage.path = db.clone();
    }
    if let Some(input) = &options.input {
        config.io.input = input.clone();
    }
    if let Some(output) = &options.output {
        config.io.output = output.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Runs one command with an already validated configuration.
pub fn run_with_config(config: &AppConfig) -> AppResult<CartResponse> {
    info!(
        db = %config.storage.path.display(),
        input = %config.io.input.display(),
        "Starting checkout"
    );

    let mut engine = CartEngine::new(JsonFileStore::new(&config.storage.path));
    for promotion in &config.promotions {
        engine.add_promotion(promotion.clone());
    }
    debug!(promotions = engine.list_promotions().len(), "Engine ready");

    let request = read_request(config)?;
    let response = execute(&mut engine, request);

    let json = serde_json::to_string_pretty(&response)?;
    std::fs::write(&config.io.output, json).map_err(|e| AppError::write(&config.io.output, e))?;

    info!(result = response.result, output = %config.io.output.display(), "Result written");
    Ok(response)
}

fn read_request(config: &AppConfig) -> AppResult<CommandRequest> {
    let path = &config.io.input;
    let raw = std::fs::read_to_string(path).map_err(|e| AppError::read(path, e))?;

    serde_json::from_str(&raw).map_err(|source| AppError::InvalidCommand {
        path: path.clone(),
        source,
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=checkout_core=trace` - Show trace for the engine only
/// - Default: INFO, DEBUG for the checkout crates
///
/// Logs go to stderr; stdout and the result file stay clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,checkout=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
