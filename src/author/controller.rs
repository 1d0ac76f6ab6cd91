use crate::author::model::{AuthorChanges, CreateAuthorRequest, UpdateAuthorRequest};
use crate::author::service::AuthorService;
use crate::utils::error::CustomError;
use crate::utils::helpers::{ensure_ids_match, require_field};
use actix_web::{HttpResponse, web};

pub async fn get_authors(
    author_service: web::Data<AuthorService>,
) -> Result<HttpResponse, CustomError> {
    let authors = author_service.list_authors().await?;
    Ok(HttpResponse::Ok().json(authors))
}

pub async fn create_author(
    author_service: web::Data<AuthorService>,
    body: web::Json<CreateAuthorRequest>,
) -> Result<HttpResponse, CustomError> {
    let body = body.into_inner();

    let first_name = require_field(body.first_name, "firstName")?;
    let last_name = require_field(body.last_name, "lastName")?;
    let user_name = require_field(body.user_name, "userName")?;

    let author = author_service
        .create_author(first_name, last_name, user_name)
        .await?;

    Ok(HttpResponse::Created().json(author))
}

pub async fn update_author(
    author_id: web::Path<String>,
    author_service: web::Data<AuthorService>,
    body: web::Json<UpdateAuthorRequest>,
) -> Result<HttpResponse, CustomError> {
    let author_id = author_id.into_inner();
    let body = body.into_inner();

    ensure_ids_match(&author_id, body.id.as_deref())?;
    let changes = AuthorChanges::new(body.first_name, body.last_name, body.user_name)?;

    let author = author_service.update_author(&author_id, changes).await?;

    Ok(HttpResponse::Ok().json(author))
}

pub async fn delete_author(
    author_id: web::Path<String>,
    author_service: web::Data<AuthorService>,
) -> Result<HttpResponse, CustomError> {
    author_service.delete_author(&author_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
