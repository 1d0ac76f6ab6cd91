use crate::author::service::AuthorService;
use crate::database::memory::{MemoryAuthorStore, MemoryPostStore};
use crate::database::mongo::{MongoAuthorStore, MongoPostStore};
use crate::database::{AuthorStore, Database, PostStore};
use crate::middleware::error_handler::json_config;
use crate::middleware::not_found::not_found;
use crate::post::post_service::PostService;
use crate::router::index::routes;
use actix_web::web;
use std::sync::Arc;

/// Everything a worker needs to serve requests. Cloning shares the same stores.
#[derive(Clone)]
pub struct AppState {
    pub post_service: web::Data<PostService>,
    pub author_service: web::Data<AuthorService>,
}

impl AppState {
    pub fn new(authors: Arc<dyn AuthorStore>, posts: Arc<dyn PostStore>) -> Self {
        AppState {
            post_service: web::Data::new(PostService::new(posts.clone(), authors.clone())),
            author_service: web::Data::new(AuthorService::new(authors, posts)),
        }
    }

    pub async fn from_database(database: &Database) -> Result<Self, mongodb::error::Error> {
        let authors = MongoAuthorStore::new(&database.database);
        authors.ensure_indexes().await?;
        let posts = MongoPostStore::new(&database.database);

        Ok(Self::new(Arc::new(authors), Arc::new(posts)))
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryAuthorStore::new()),
            Arc::new(MemoryPostStore::new()),
        )
    }

    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.post_service.clone())
            .app_data(self.author_service.clone())
            .app_data(json_config())
            .configure(routes)
            .default_service(web::to(not_found));
    }
}
