use crate::utils::error::CustomError;
use crate::utils::helpers::{non_empty, non_empty_opt};
use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Comment {
    pub content: String,
}

/// Author data stored on posts written before authors became their own collection.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedAuthor {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// The `author` field of a stored post: an id into `authors`, or the older embedded form.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(try_from = "Bson", into = "Bson")]
pub enum PostAuthor {
    Reference(ObjectId),
    Embedded(EmbeddedAuthor),
}

impl TryFrom<Bson> for PostAuthor {
    type Error = String;

    fn try_from(value: Bson) -> Result<Self, Self::Error> {
        match value {
            Bson::ObjectId(id) => Ok(PostAuthor::Reference(id)),
            Bson::String(hex) => ObjectId::parse_str(&hex)
                .map(PostAuthor::Reference)
                .map_err(|e| e.to_string()),
            Bson::Document(document) => bson::from_document::<EmbeddedAuthor>(document)
                .map(PostAuthor::Embedded)
                .map_err(|e| e.to_string()),
            other => Err(format!("unsupported author value: {}", other)),
        }
    }
}

impl From<PostAuthor> for Bson {
    fn from(author: PostAuthor) -> Self {
        match author {
            PostAuthor::Reference(id) => Bson::ObjectId(id),
            PostAuthor::Embedded(embedded) => Bson::Document(doc! {
                "firstName": embedded.first_name,
                "lastName": embedded.last_name,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub author: PostAuthor,
    /// Native BSON date, the type other Mongo clients write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<bson::DateTime>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl BlogPost {
    pub fn new(
        title: String,
        content: String,
        author_id: ObjectId,
        comments: Vec<Comment>,
    ) -> Result<Self, CustomError> {
        Ok(BlogPost {
            id: ObjectId::new(),
            title: non_empty(title, "title")?,
            content: non_empty(content, "content")?,
            author: PostAuthor::Reference(author_id),
            created: Some(bson::DateTime::now()),
            comments,
        })
    }

    /// Projection sent to clients; `author_name` comes from the resolved author.
    pub fn to_response(&self, author_name: String) -> PostResponse {
        PostResponse {
            id: self.id.to_hex(),
            title: self.title.clone(),
            content: self.content.clone(),
            author: author_name,
            created: self.created.and_then(|created| {
                DateTime::<Utc>::from_timestamp_millis(created.timestamp_millis())
            }),
            comments: self.comments.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created: Option<DateTime<Utc>>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Allow-listed fields of a partial post update. `author` cannot be changed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    pub fn new(title: Option<String>, content: Option<String>) -> Result<Self, CustomError> {
        Ok(PostChanges {
            title: non_empty_opt(title, "title")?,
            content: non_empty_opt(content, "content")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    pub fn apply(&self, post: &mut BlogPost) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
    }
}
