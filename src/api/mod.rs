//! HTTP API server.

mod error;
mod extract;
pub mod routes;
mod state;
mod system;
pub mod v1;


use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{ApiError, ErrorResponse};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use state::AppState;

use crate::db::Database;

pub const DEFAULT_PORT: u16 = 7070;

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Log verbosity (0 = info, 1 = debug, 2+ = trace)
    pub verbosity: u8,
    /// Serve the Scalar UI at /docs
    pub enable_docs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            verbosity: 0,
            enable_docs: false,
        }
    }
}

impl Config {
    /// Defaults overlaid with the environment: `BM_PORT`, then `PORT`.
    pub fn new() -> Self {
        let port = ["BM_PORT", "PORT"]
            .iter()
            .find_map(|key| env::var(key).ok()?.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            ..Self::default()
        }
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_docs(mut self, enable_docs: bool) -> Self {
        self.enable_docs = enable_docs;
        self
    }
}

/// Default log filter for a verbosity level when `RUST_LOG` is unset.
fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "bookmarks=info,tower_http=info",
        1 => "bookmarks=debug,tower_http=debug",
        _ => "bookmarks=trace,tower_http=trace",
    }
}

/// Initialize tracing subscriber with env filter
fn init_tracing(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbosity).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Run the API server over an already migrated database.
pub async fn run<D: Database + 'static>(config: Config, db: D) -> std::io::Result<()> {
    init_tracing(config.verbosity);

    let app = routes::create_router(AppState::new(db), config.enable_docs);

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await
}
