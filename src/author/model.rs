use crate::utils::error::CustomError;
use crate::utils::helpers::{non_empty, non_empty_opt};
use crate::utils::model::display_name;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

impl Author {
    pub fn new(
        first_name: String,
        last_name: String,
        user_name: String,
    ) -> Result<Self, CustomError> {
        Ok(Author {
            id: ObjectId::new(),
            first_name: non_empty(first_name, "firstName")?,
            last_name: non_empty(last_name, "lastName")?,
            user_name: non_empty(user_name, "userName")?,
        })
    }

    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }

    pub fn to_response(&self) -> AuthorResponse {
        AuthorResponse {
            id: self.id.to_hex(),
            name: self.display_name(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            user_name: self.user_name.clone(),
        }
    }
}

/// What the API returns for an author.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

/// Allow-listed fields of a partial author update.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AuthorChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

impl AuthorChanges {
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        user_name: Option<String>,
    ) -> Result<Self, CustomError> {
        Ok(AuthorChanges {
            first_name: non_empty_opt(first_name, "firstName")?,
            last_name: non_empty_opt(last_name, "lastName")?,
            user_name: non_empty_opt(user_name, "userName")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.user_name.is_none()
    }

    pub fn apply(&self, author: &mut Author) {
        if let Some(first_name) = &self.first_name {
            author.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            author.last_name = last_name.clone();
        }
        if let Some(user_name) = &self.user_name {
            author.user_name = user_name.clone();
        }
    }
}
