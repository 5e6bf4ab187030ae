//! API server command

use std::net::IpAddr;
use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};

use crate::api::{self, Config};
use crate::db::Database;
use crate::db::sqlite::SqliteDatabase;
use crate::paths::get_db_path;

/// Build the server configuration. Flags given on the command line win over
/// the environment.
pub fn build_config(
    host: Option<IpAddr>,
    port: Option<u16>,
    verbosity: u8,
    enable_docs: bool,
) -> Config {
    let mut config = Config::new()
        .with_verbosity(verbosity)
        .with_docs(enable_docs);
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    config
}

/// Run the API server
pub async fn run(
    host: Option<IpAddr>,
    port: Option<u16>,
    db: Option<PathBuf>,
    verbosity: u8,
    enable_docs: bool,
) -> Result<()> {
    let db_path = get_db_path(db);

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).into_diagnostic()?;
    }

    let database = SqliteDatabase::open(&db_path).await?;

    // Run migrations before starting the server
    database.migrate().await?;

    let config = build_config(host, port, verbosity, enable_docs);

    // Print startup banner before logging is initialized
    println!();
    println!("bm API server starting...");
    println!("   API:      http://{}:{}/api/v1", config.host, config.port);
    if config.enable_docs {
        println!("   Docs:     http://{}:{}/docs", config.host, config.port);
    }
    println!("   Database: {}", db_path.display());
    println!();

    api::run(config, database).await.into_diagnostic()?;

    Ok(())
}
