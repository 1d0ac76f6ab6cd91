use crate::author::model::{Author, AuthorChanges, AuthorResponse};
use crate::database::store::USERNAME_TAKEN;
use crate::database::{AuthorStore, PostStore};
use crate::utils::error::CustomError;
use crate::utils::helpers::parse_object_id;
use log::info;
use std::sync::Arc;

pub struct AuthorService {
    authors: Arc<dyn AuthorStore>,
    posts: Arc<dyn PostStore>,
}

impl AuthorService {
    pub fn new(authors: Arc<dyn AuthorStore>, posts: Arc<dyn PostStore>) -> Self {
        AuthorService { authors, posts }
    }

    pub async fn list_authors(&self) -> Result<Vec<AuthorResponse>, CustomError> {
        let authors = self.authors.find_all().await?;
        Ok(authors.iter().map(Author::to_response).collect())
    }

    pub async fn create_author(
        &self,
        first_name: String,
        last_name: String,
        user_name: String,
    ) -> Result<AuthorResponse, CustomError> {
        let author = Author::new(first_name, last_name, user_name)?;

        // Advisory only: two racing requests can both pass this, the store decides.
        if self.user_name_exists(&author.user_name).await? {
            return Err(CustomError::ValidationError(USERNAME_TAKEN.to_string()));
        }

        let author = self.authors.insert(author).await?;
        info!("Created author {} ({})", author.id, author.user_name);

        Ok(author.to_response())
    }

    pub async fn update_author(
        &self,
        id: &str,
        changes: AuthorChanges,
    ) -> Result<AuthorResponse, CustomError> {
        let object_id = parse_object_id(id, "author")?;

        if let Some(user_name) = &changes.user_name {
            if let Some(existing) = self.authors.find_by_user_name(user_name).await? {
                if existing.id != object_id {
                    return Err(CustomError::ValidationError(USERNAME_TAKEN.to_string()));
                }
            }
        }

        let author = self
            .authors
            .update(&object_id, changes)
            .await?
            .ok_or_else(|| CustomError::NotFoundError(format!("No author with id `{}`", id)))?;

        Ok(author.to_response())
    }

    /// Deletes the author along with every post that references them.
    pub async fn delete_author(&self, id: &str) -> Result<(), CustomError> {
        let object_id = parse_object_id(id, "author")?;

        if self.authors.find_by_id(&object_id).await?.is_none() {
            return Err(CustomError::NotFoundError(format!(
                "No author with id `{}`",
                id
            )));
        }

        let removed = self.posts.delete_by_author(&object_id).await?;

        if !self.authors.delete(&object_id).await? {
            return Err(CustomError::NotFoundError(format!(
                "No author with id `{}`",
                id
            )));
        }

        info!("Deleted author {} and {} of their posts", id, removed);
        Ok(())
    }

    async fn user_name_exists(&self, user_name: &str) -> Result<bool, CustomError> {
        Ok(self.authors.find_by_user_name(user_name).await?.is_some())
    }
}
