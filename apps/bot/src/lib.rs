//! # Tagpress Bot Library
//!
//! Orchestration layer for the Tagpress label bot: wires the pure state
//! machine to real storage and a real renderer, and runs a transport.
//!
//! ## Module Organization
//! ```text
//! tagpress_bot/
//! ├── lib.rs          ◄─── You are here (startup & wiring)
//! ├── registry.rs     ◄─── Per-user session registry + generation guard
//! ├── service.rs      ◄─── Step effect execution (save/generate/archive)
//! ├── rasterizer.rs   ◄─── Headless-browser PDF rendering
//! ├── console.rs      ◄─── Development transport (stdin/stdout)
//! └── error.rs        ◄─── Unified error type with user-facing messages
//! ```

pub mod console;
pub mod error;
pub mod rasterizer;
pub mod registry;
pub mod service;

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::BotError;
use rasterizer::ChromiumRasterizer;
use service::BotService;
use tagpress_store::FsBlobStore;

/// Runs the bot application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Determine Store Root ─────────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/tagpress-bot/                               │
/// │     • macOS: ~/Library/Application Support/com.tagpress.bot/            │
/// │     • Override: TAGPRESS_DATA_DIR                                       │
/// │                                                                         │
/// │  3. Open Blob Store ──────────────────────────────────────────────────► │
/// │     • Creates exports-json/, exports-csv/, documents/                   │
/// │                                                                         │
/// │  4. Wire Service ─────────────────────────────────────────────────────► │
/// │     • Chromium rasterizer (TAGPRESS_CHROMIUM override)                  │
/// │     • Empty session registry                                            │
/// │                                                                         │
/// │  5. Run Console Transport ────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), BotError> {
    init_tracing();

    info!("Starting Tagpress bot");

    let data_dir = get_data_dir()?;
    info!(?data_dir, "Store root determined");

    let store = FsBlobStore::open(data_dir).await?;
    let service = BotService::new(store, ChromiumRasterizer::new());

    console::run(&service).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tagpress=trace` - Show trace for tagpress crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tagpress=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Determines the blob store root based on the platform.
///
/// ## Development Override
/// Set `TAGPRESS_DATA_DIR` to use a custom path.
fn get_data_dir() -> Result<PathBuf, BotError> {
    if let Ok(path) = std::env::var("TAGPRESS_DATA_DIR") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "tagpress", "bot")
        .ok_or_else(|| BotError::Config("Could not determine app data directory".to_string()))?;

    Ok(proj_dirs.data_dir().to_path_buf())
}
