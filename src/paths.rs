//! Path resolution for bookmark data.
//!
//! Follows the XDG base directory layout.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "bookmarks";
const DB_FILE: &str = "bookmarks.db";

/// Data directory: `$XDG_DATA_HOME/bookmarks`, else
/// `$HOME/.local/share/bookmarks`, else `./bookmarks`.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".local/share"))
        })
        .unwrap_or_else(|| PathBuf::from("."));

    data_home.join(APP_DIR)
}

/// Database file: explicit path, else `BM_DB_PATH`, else
/// `<data dir>/bookmarks.db`.
pub fn get_db_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| {
            env::var("BM_DB_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| get_data_dir().join(DB_FILE))
}
