//! V1 API handlers.

mod bookmarks;


pub use bookmarks::*;
