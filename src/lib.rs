//! Read-later bookmark inbox.
//!
//! - [`normalize`]: field and filter normalization
//! - [`db`]: storage traits and the SQLite backend
//! - [`api`]: axum HTTP server
//! - [`cli`]: the `bm` command line client

pub mod api;
pub mod cli;
pub mod db;
pub mod normalize;
pub mod paths;
