//! # Atelier Storefront Library
//!
//! Application shell for the Atelier storefront: owns the state, wires the
//! crates together and serves commands to the UI process.
//!
//! ## Module Organization
//! ```text
//! atelier_storefront/
//! ├── lib.rs          ◄─── You are here (bootstrap & run)
//! ├── invoke.rs       ◄─── JSON-lines request/response loop
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart + snapshot persistence
//! │   ├── config.rs   ◄─── Configuration state
//! │   └── payments.rs ◄─── Card processor
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── card.rs     ◄─── Card number feedback
//! │   ├── checkout.rs ◄─── Checkout command
//! │   └── config.rs   ◄─── Config command
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod invoke;
pub mod state;

use std::path::Path;

use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use atelier_store::{Database, DbConfig, SnapshotStore};
use state::{CartState, ConfigState, PaymentsState};

/// Everything a command may need, built once at startup.
#[derive(Debug)]
pub struct Storefront {
    pub cart: CartState,
    pub config: ConfigState,
    pub payments: PaymentsState,
}

impl Storefront {
    /// Builds the application state from configuration.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │                       Storefront Startup                                │
    /// │                                                                         │
    /// │  1. Pick Snapshot Store ──────────────────────────────────────────────► │
    /// │     • persist_cart = false → in-memory                                  │
    /// │     • otherwise open SQLite (WAL, migrations)                           │
    /// │     • open failed → warn, in-memory for this session                    │
    /// │                                                                         │
    /// │  2. Restore Cart ─────────────────────────────────────────────────────► │
    /// │     • "cart-storage" snapshot, version 0                                │
    /// │     • missing / other version / unreadable → empty cart                 │
    /// │                                                                         │
    /// │  3. Payments ─────────────────────────────────────────────────────────► │
    /// │     • MockProcessor with the configured latency                         │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn bootstrap(config: ConfigState) -> Self {
        let store = open_snapshot_store(&config).await;
        Self::with_store(config, store).await
    }

    /// Builds the application state on an explicit snapshot store.
    pub async fn with_store(config: ConfigState, store: SnapshotStore) -> Self {
        let cart = CartState::load(store).await;
        let payments = PaymentsState::from_config(&config);

        info!(
            store_name = %config.store_name,
            currency = %config.currency_code,
            persistent_cart = cart.is_persistent(),
            "Storefront ready"
        );

        Storefront {
            cart,
            config,
            payments,
        }
    }
}

async fn open_snapshot_store(config: &ConfigState) -> SnapshotStore {
    if !config.persist_cart {
        info!("Cart persistence disabled, cart lives for this session");
        return SnapshotStore::memory();
    }

    let Some(path) = config.database_path() else {
        warn!("Could not determine app data directory, cart lives for this session");
        return SnapshotStore::memory();
    };

    match open_database(&path).await {
        Ok(db) => {
            info!(path = %path.display(), "Client storage opened");
            SnapshotStore::sqlite(&db)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Client storage unavailable, cart lives for this session");
            SnapshotStore::memory()
        }
    }
}

async fn open_database(path: &Path) -> Result<Database, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(Database::new(DbConfig::new(path)).await?)
}

/// Runs the storefront shell on stdin/stdout until stdin closes.
pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    info!("Starting Atelier Storefront");

    let config = ConfigState::load_or_default(None);
    let app = Storefront::bootstrap(config).await;

    invoke::serve(&app, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=atelier=trace` - Show trace for atelier crates only
/// - Default: `info,atelier=debug,sqlx=warn`
///
/// Logs are written to stderr; stdout belongs to the invoke loop.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,atelier=debug,sqlx=warn"));

    // Already initialized when embedded in a host that set its own subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
