use crate::author::model::{Author, AuthorChanges};
use crate::post::post_model::{BlogPost, PostChanges};
use crate::utils::error::CustomError;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

pub const USERNAME_TAKEN: &str = "Username already taken";

/// Persistence for authors. Implementations enforce `userName` uniqueness on write.
#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Author>, CustomError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Author>, CustomError>;

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<Author>, CustomError>;

    async fn insert(&self, author: Author) -> Result<Author, CustomError>;

    /// Returns the updated author, or `None` when no author has this id.
    async fn update(
        &self,
        id: &ObjectId,
        changes: AuthorChanges,
    ) -> Result<Option<Author>, CustomError>;

    /// Returns whether a document was removed.
    async fn delete(&self, id: &ObjectId) -> Result<bool, CustomError>;
}

/// Persistence for blog posts. Author references are stored, never resolved, here.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<BlogPost>, CustomError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<BlogPost>, CustomError>;

    async fn insert(&self, post: BlogPost) -> Result<BlogPost, CustomError>;

    async fn update(
        &self,
        id: &ObjectId,
        changes: PostChanges,
    ) -> Result<Option<BlogPost>, CustomError>;

    async fn delete(&self, id: &ObjectId) -> Result<bool, CustomError>;

    /// Removes every post referencing `author_id`, returning how many went.
    async fn delete_by_author(&self, author_id: &ObjectId) -> Result<u64, CustomError>;
}
