pub mod db;
pub mod memory;
pub mod mongo;
pub mod store;

pub use db::Database;
pub use store::{AuthorStore, PostStore};
