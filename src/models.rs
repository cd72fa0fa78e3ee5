use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Article {
    pub article_id: i64,
    pub author: String,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub article_img_url: String,
    pub comment_count: i64,
}

/// List view of an article; the body is left out.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ArticleSummary {
    pub article_id: i64,
    pub author: String,
    pub title: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub article_img_url: String,
    pub comment_count: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub comment_id: i64,
    pub article_id: i64,
    pub author: String,
    pub body: String,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
}
