use crate::database::{AuthorStore, PostStore};
use crate::post::post_model::{BlogPost, Comment, PostAuthor, PostChanges, PostResponse};
use crate::utils::error::CustomError;
use crate::utils::helpers::parse_object_id;
use crate::utils::model::author_name;
use log::info;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;

pub struct PostService {
    posts: Arc<dyn PostStore>,
    authors: Arc<dyn AuthorStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, authors: Arc<dyn AuthorStore>) -> Self {
        PostService { posts, authors }
    }

    pub async fn list_posts(&self) -> Result<Vec<PostResponse>, CustomError> {
        let posts = self.posts.find_all().await?;

        // one lookup per distinct author rather than per post
        let mut names: HashMap<ObjectId, String> = HashMap::new();
        let mut responses = Vec::with_capacity(posts.len());
        for post in &posts {
            let name = match &post.author {
                PostAuthor::Reference(author_id) => match names.get(author_id) {
                    Some(name) => name.clone(),
                    None => {
                        let name = self.resolve_author_name(post).await?;
                        names.insert(*author_id, name.clone());
                        name
                    }
                },
                PostAuthor::Embedded(_) => self.resolve_author_name(post).await?,
            };
            responses.push(post.to_response(name));
        }

        Ok(responses)
    }

    pub async fn get_post(&self, id: &str) -> Result<PostResponse, CustomError> {
        let object_id = parse_object_id(id, "blog post")?;

        let post = self
            .posts
            .find_by_id(&object_id)
            .await?
            .ok_or_else(|| CustomError::NotFoundError(format!("No blog post with id `{}`", id)))?;

        self.populate(&post).await
    }

    pub async fn create_post(
        &self,
        title: String,
        content: String,
        author_id: String,
        comments: Vec<Comment>,
    ) -> Result<PostResponse, CustomError> {
        let unknown_author =
            || CustomError::ValidationError(format!("Author with id `{}` not found", author_id));

        let author_object_id = ObjectId::parse_str(&author_id).map_err(|_| unknown_author())?;
        let post = BlogPost::new(title, content, author_object_id, comments)?;

        let author = self
            .authors
            .find_by_id(&author_object_id)
            .await?
            .ok_or_else(unknown_author)?;

        let post = self.posts.insert(post).await?;
        info!("Created blog post {} by {}", post.id, author.user_name);

        Ok(post.to_response(author_name(&author.first_name, &author.last_name)))
    }

    pub async fn update_post(&self, id: &str, changes: PostChanges) -> Result<(), CustomError> {
        let object_id = parse_object_id(id, "blog post")?;

        self.posts
            .update(&object_id, changes)
            .await?
            .ok_or_else(|| CustomError::NotFoundError(format!("No blog post with id `{}`", id)))?;

        Ok(())
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), CustomError> {
        let object_id = parse_object_id(id, "blog post")?;

        if !self.posts.delete(&object_id).await? {
            return Err(CustomError::NotFoundError(format!(
                "No blog post with id `{}`",
                id
            )));
        }

        info!("Deleted blog post {}", id);
        Ok(())
    }

    /// Second half of every read: resolve the author, then project.
    pub async fn populate(&self, post: &BlogPost) -> Result<PostResponse, CustomError> {
        let name = self.resolve_author_name(post).await?;
        Ok(post.to_response(name))
    }

    async fn resolve_author_name(&self, post: &BlogPost) -> Result<String, CustomError> {
        match &post.author {
            PostAuthor::Embedded(author) => Ok(author_name(&author.first_name, &author.last_name)),
            PostAuthor::Reference(author_id) => {
                let author = self.authors.find_by_id(author_id).await?.ok_or_else(|| {
                    CustomError::NotFoundError(format!(
                        "Author `{}` referenced by blog post `{}` does not exist",
                        author_id, post.id
                    ))
                })?;
                Ok(author_name(&author.first_name, &author.last_name))
            }
        }
    }
}
