pub mod api_client;
mod commands;
pub mod error;
pub mod utils;

#[cfg(test)]
mod utils_test;

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use commands::PageParams;
use commands::bookmark::{BookmarkChanges, CreateBookmarkRequest, ListFilter};

#[derive(Parser)]
#[command(name = "bm")]
#[command(author, version, about = "Read-later bookmark inbox", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: BM_API_URL env or http://localhost:7070)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Api {
        /// Host address to bind to (default: 0.0.0.0)
        #[arg(long)]
        host: Option<IpAddr>,
        /// Port to listen on (default: BM_PORT, PORT or 7070)
        #[arg(long)]
        port: Option<u16>,
        /// Database file (default: BM_DB_PATH or the XDG data dir)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Increase log verbosity (-v debug, -vv trace)
        #[arg(short, long, action = ArgAction::Count)]
        verbose: u8,
        /// Serve API docs at /docs
        #[arg(long)]
        docs: bool,
    },
    /// List bookmarks
    List {
        /// Search url, title, tags and notes
        #[arg(short, long)]
        q: Option<String>,
        /// Filter by status (INBOX or DONE)
        #[arg(long)]
        status: Option<String>,
        /// Filter by tag substring
        #[arg(long)]
        tag: Option<String>,
        /// Sort by created_at, updated_at or title
        #[arg(long)]
        sort: Option<String>,
        /// Sort order (asc or desc)
        #[arg(long)]
        order: Option<String>,
        /// Maximum number of items (1-1000)
        #[arg(long)]
        limit: Option<u32>,
        /// Number of items to skip
        #[arg(long)]
        offset: Option<u32>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show a bookmark
    Get {
        id: i64,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Add a bookmark
    Add {
        url: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Change fields of a bookmark
    Update {
        id: i64,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Set the status of a bookmark (INBOX or DONE)
    Status { id: i64, status: String },
    /// Delete a bookmark
    Delete { id: i64 },
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();

    // reqwest is built without a bundled crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    let api_client = api_client::ApiClient::new(cli.api_url);

    let output = match cli.command {
        Commands::Api {
            host,
            port,
            db,
            verbose,
            docs,
        } => return commands::api::run(host, port, db, verbose, docs).await,
        Commands::List {
            q,
            status,
            tag,
            sort,
            order,
            limit,
            offset,
            format,
        } => {
            let filter = ListFilter {
                q: q.as_deref(),
                status: status.as_deref(),
                tag: tag.as_deref(),
            };
            let page = PageParams {
                limit,
                offset,
                sort: sort.as_deref(),
                order: order.as_deref(),
            };
            commands::bookmark::list_bookmarks(&api_client, filter, page, &format).await
        }
        Commands::Get { id, format } => {
            commands::bookmark::get_bookmark(&api_client, id, &format).await
        }
        Commands::Add {
            url,
            title,
            tags,
            notes,
        } => {
            let request = CreateBookmarkRequest {
                url,
                title,
                tags,
                notes,
            };
            commands::bookmark::create_bookmark(&api_client, request).await
        }
        Commands::Update {
            id,
            url,
            title,
            tags,
            notes,
            status,
        } => {
            let changes = BookmarkChanges {
                url,
                title,
                tags,
                notes,
                status,
            };
            commands::bookmark::update_bookmark(&api_client, id, changes).await
        }
        Commands::Status { id, status } => {
            commands::bookmark::set_status(&api_client, id, &status).await
        }
        Commands::Delete { id } => commands::bookmark::delete_bookmark(&api_client, id).await,
    }?;

    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_api_flags() {
        let cli = Cli::parse_from(["bm", "api", "--port", "8080", "-vv", "--docs"]);
        match cli.command {
            Commands::Api {
                port,
                verbose,
                docs,
                host,
                db,
            } => {
                assert_eq!(port, Some(8080));
                assert_eq!(verbose, 2);
                assert!(docs);
                assert!(host.is_none());
                assert!(db.is_none());
            }
            _ => panic!("expected api command"),
        }
    }

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::parse_from([
            "bm", "list", "--q", "rust", "--status", "inbox", "--limit", "5", "--format", "json",
        ]);
        match cli.command {
            Commands::List {
                q,
                status,
                limit,
                format,
                ..
            } => {
                assert_eq!(q.as_deref(), Some("rust"));
                assert_eq!(status.as_deref(), Some("inbox"));
                assert_eq!(limit, Some(5));
                assert_eq!(format, "json");
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_add_requires_title() {
        assert!(Cli::try_parse_from(["bm", "add", "example.com"]).is_err());
        assert!(Cli::try_parse_from(["bm", "add", "example.com", "--title", "Ex"]).is_ok());
    }
}
