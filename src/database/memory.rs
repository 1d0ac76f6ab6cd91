//! In-memory stores, used by the test suite and when running without MongoDB.
//!
//! Data is lost when the process exits.

use crate::author::model::{Author, AuthorChanges};
use crate::database::store::{AuthorStore, PostStore, USERNAME_TAKEN};
use crate::post::post_model::{BlogPost, PostAuthor, PostChanges};
use crate::utils::error::CustomError;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryAuthorStore {
    authors: RwLock<Vec<Author>>,
}

impl MemoryAuthorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn user_name_taken(authors: &[Author], user_name: &str, except: Option<&ObjectId>) -> bool {
    authors
        .iter()
        .any(|a| a.user_name == user_name && Some(&a.id) != except)
}

#[async_trait]
impl AuthorStore for MemoryAuthorStore {
    async fn find_all(&self) -> Result<Vec<Author>, CustomError> {
        Ok(self.authors.read().await.clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Author>, CustomError> {
        Ok(self.authors.read().await.iter().find(|a| &a.id == id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<Author>, CustomError> {
        Ok(self
            .authors
            .read()
            .await
            .iter()
            .find(|a| a.user_name == user_name)
            .cloned())
    }

    async fn insert(&self, author: Author) -> Result<Author, CustomError> {
        let mut authors = self.authors.write().await;
        if user_name_taken(&authors, &author.user_name, None) {
            return Err(CustomError::ValidationError(USERNAME_TAKEN.to_string()));
        }
        authors.push(author.clone());
        Ok(author)
    }

    async fn update(
        &self,
        id: &ObjectId,
        changes: AuthorChanges,
    ) -> Result<Option<Author>, CustomError> {
        let mut authors = self.authors.write().await;
        if let Some(user_name) = &changes.user_name {
            if user_name_taken(&authors, user_name, Some(id)) {
                return Err(CustomError::ValidationError(USERNAME_TAKEN.to_string()));
            }
        }

        Ok(authors.iter_mut().find(|a| &a.id == id).map(|author| {
            changes.apply(author);
            author.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, CustomError> {
        let mut authors = self.authors.write().await;
        let before = authors.len();
        authors.retain(|a| &a.id != id);
        Ok(authors.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryPostStore {
    posts: RwLock<Vec<BlogPost>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn find_all(&self) -> Result<Vec<BlogPost>, CustomError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<BlogPost>, CustomError> {
        Ok(self.posts.read().await.iter().find(|p| &p.id == id).cloned())
    }

    async fn insert(&self, post: BlogPost) -> Result<BlogPost, CustomError> {
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn update(
        &self,
        id: &ObjectId,
        changes: PostChanges,
    ) -> Result<Option<BlogPost>, CustomError> {
        let mut posts = self.posts.write().await;
        Ok(posts.iter_mut().find(|p| &p.id == id).map(|post| {
            changes.apply(post);
            post.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, CustomError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| &p.id != id);
        Ok(posts.len() < before)
    }

    async fn delete_by_author(&self, author_id: &ObjectId) -> Result<u64, CustomError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.author != PostAuthor::Reference(*author_id));
        Ok((before - posts.len()) as u64)
    }
}
