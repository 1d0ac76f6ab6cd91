use super::controller::{create_author, delete_author, get_authors, update_author};
use actix_web::web;

pub fn author_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/authors")
            .route("", web::get().to(get_authors))
            .route("", web::post().to(create_author))
            .route("/{id}", web::put().to(update_author))
            .route("/{id}", web::delete().to(delete_author)),
    );
}
