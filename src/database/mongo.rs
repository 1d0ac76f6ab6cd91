use crate::author::model::{Author, AuthorChanges};
use crate::database::store::{AuthorStore, PostStore, USERNAME_TAKEN};
use crate::post::post_model::{BlogPost, PostChanges};
use crate::utils::error::CustomError;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::info;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::error::{Error, ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

pub const AUTHORS_COLLECTION: &str = "authors";
pub const POSTS_COLLECTION: &str = "blogPosts";

const DUPLICATE_KEY: i32 = 11000;

fn is_duplicate_key(err: &Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn write_error(err: Error) -> CustomError {
    if is_duplicate_key(&err) {
        CustomError::ValidationError(USERNAME_TAKEN.to_string())
    } else {
        CustomError::from(err)
    }
}

pub struct MongoAuthorStore {
    collection: Collection<Author>,
}

impl MongoAuthorStore {
    pub fn new(database: &mongodb::Database) -> Self {
        let collection = database.collection::<Author>(AUTHORS_COLLECTION);
        MongoAuthorStore { collection }
    }

    /// The unique index is what actually guarantees `userName` uniqueness.
    pub async fn ensure_indexes(&self) -> Result<(), Error> {
        let index = IndexModel::builder()
            .keys(doc! { "userName": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        let created = self.collection.create_index(index).await?;
        info!("Ensured index {} on {}", created.index_name, AUTHORS_COLLECTION);

        Ok(())
    }
}

#[async_trait]
impl AuthorStore for MongoAuthorStore {
    async fn find_all(&self) -> Result<Vec<Author>, CustomError> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<Author> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Author>, CustomError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<Author>, CustomError> {
        Ok(self
            .collection
            .find_one(doc! { "userName": user_name })
            .await?)
    }

    async fn insert(&self, author: Author) -> Result<Author, CustomError> {
        self.collection
            .insert_one(&author)
            .await
            .map_err(write_error)?;

        Ok(author)
    }

    async fn update(
        &self,
        id: &ObjectId,
        changes: AuthorChanges,
    ) -> Result<Option<Author>, CustomError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut set = Document::new();
        if let Some(first_name) = changes.first_name {
            set.insert("firstName", first_name);
        }
        if let Some(last_name) = changes.last_name {
            set.insert("lastName", last_name);
        }
        if let Some(user_name) = changes.user_name {
            set.insert("userName", user_name);
        }

        self.collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(write_error)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, CustomError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

pub struct MongoPostStore {
    collection: Collection<BlogPost>,
}

impl MongoPostStore {
    pub fn new(database: &mongodb::Database) -> Self {
        let collection = database.collection::<BlogPost>(POSTS_COLLECTION);
        MongoPostStore { collection }
    }
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn find_all(&self) -> Result<Vec<BlogPost>, CustomError> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<BlogPost> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<BlogPost>, CustomError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn insert(&self, post: BlogPost) -> Result<BlogPost, CustomError> {
        self.collection.insert_one(&post).await?;
        Ok(post)
    }

    async fn update(
        &self,
        id: &ObjectId,
        changes: PostChanges,
    ) -> Result<Option<BlogPost>, CustomError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut set = Document::new();
        if let Some(title) = changes.title {
            set.insert("title", title);
        }
        if let Some(content) = changes.content {
            set.insert("content", content);
        }

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, CustomError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_by_author(&self, author_id: &ObjectId) -> Result<u64, CustomError> {
        let result = self
            .collection
            .delete_many(doc! { "author": author_id })
            .await?;
        Ok(result.deleted_count)
    }
}
