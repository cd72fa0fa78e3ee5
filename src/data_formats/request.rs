use serde::{Deserialize, Serialize};

use crate::errors::RequestError;

fn required(value: Option<String>) -> Result<String, RequestError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RequestError::BadRequest),
    }
}

// ----------------- Topic Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct CreateTopicRequest {
    pub slug: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct NewTopic {
    pub slug: String,
    // Left to the NOT NULL column to reject.
    pub description: Option<String>,
}

impl CreateTopicRequest {
    pub fn validate(self) -> Result<NewTopic, RequestError> {
        Ok(NewTopic {
            slug: required(self.slug)?,
            description: self.description,
        })
    }
}

// ----------------- User Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<NewUser, RequestError> {
        Ok(NewUser {
            username: required(self.username)?,
            name: required(self.name)?,
            avatar_url: self.avatar_url.filter(|url| !url.is_empty()),
        })
    }
}

// ----------------- Article Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct CreateArticleRequest {
    pub author: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub topic: Option<String>,
    pub article_img_url: Option<String>,
}

#[derive(Debug)]
pub struct NewArticle {
    pub author: String,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub article_img_url: Option<String>,
}

impl CreateArticleRequest {
    pub fn validate(self) -> Result<NewArticle, RequestError> {
        Ok(NewArticle {
            author: required(self.author)?,
            title: required(self.title)?,
            body: required(self.body)?,
            topic: required(self.topic)?,
            article_img_url: self.article_img_url.filter(|url| !url.is_empty()),
        })
    }
}

/// Body of the vote endpoints for both articles and comments.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct VoteRequest {
    pub inc_votes: Option<i64>,
}

impl VoteRequest {
    pub fn validate(self) -> Result<i64, RequestError> {
        self.inc_votes.ok_or(RequestError::BadRequest)
    }
}

// ----------------- Comment Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct CommentRequest {
    pub username: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug)]
pub struct NewComment {
    pub author: String,
    pub body: String,
}

impl CommentRequest {
    pub fn validate(self) -> Result<NewComment, RequestError> {
        Ok(NewComment {
            author: required(self.username)?,
            body: required(self.body)?,
        })
    }
}
