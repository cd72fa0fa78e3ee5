use serde::Serialize;

use crate::models::{Article, ArticleSummary, Comment, Topic, User};

#[derive(Debug, Serialize)]
pub struct TopicWrapper {
    pub topic: Topic,
}

#[derive(Debug, Serialize)]
pub struct MultipleTopicsWrapper {
    pub topics: Vec<Topic>,
}

#[derive(Debug, Serialize)]
pub struct UserWrapper {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct MultipleUsersWrapper {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct ArticleWrapper {
    pub article: Article,
}

#[derive(Debug, Serialize)]
pub struct UpdatedArticleWrapper {
    pub updated_article: Article,
}

#[derive(Debug, Serialize)]
pub struct MultipleArticlesWrapper {
    pub articles: Vec<ArticleSummary>,
    pub total_count: i64,
}

#[derive(Debug, Serialize)]
pub struct CommentWrapper {
    pub comment: Comment,
}

#[derive(Debug, Serialize)]
pub struct UpdatedCommentWrapper {
    #[serde(rename = "updatedComment")]
    pub updated_comment: Comment,
}

#[derive(Debug, Serialize)]
pub struct MultipleCommentsWrapper {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize)]
pub struct EndpointsWrapper {
    pub endpoints: serde_json::Value,
}
