use crate::post::post_model::{CreatePostRequest, PostChanges, UpdatePostRequest};
use crate::post::post_service::PostService;
use crate::utils::error::CustomError;
use crate::utils::helpers::{ensure_ids_match, require_field};
use actix_web::{HttpResponse, web};

/// GET /blog-posts
pub async fn get_posts(post_service: web::Data<PostService>) -> Result<HttpResponse, CustomError> {
    let posts = post_service.list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /blog-posts/{id}
pub async fn get_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    let post = post_service.get_post(&post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /blog-posts
pub async fn create_post(
    post_service: web::Data<PostService>,
    body: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, CustomError> {
    let body = body.into_inner();

    let title = require_field(body.title, "title")?;
    let content = require_field(body.content, "content")?;
    let author_id = require_field(body.author_id, "author_id")?;

    let post = post_service
        .create_post(title, content, author_id, body.comments)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// PUT /blog-posts/{id}
pub async fn update_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    body: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse, CustomError> {
    let post_id = post_id.into_inner();
    let body = body.into_inner();

    ensure_ids_match(&post_id, body.id.as_deref())?;
    let changes = PostChanges::new(body.title, body.content)?;

    post_service.update_post(&post_id, changes).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /blog-posts/{id}
pub async fn delete_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    post_service.delete_post(&post_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
