//! REST API over blog posts and their authors, stored in MongoDB.

pub mod author;
pub mod config;
pub mod database;
pub mod middleware;
pub mod post;
pub mod router;
pub mod server;
pub mod state;
pub mod utils;
