use axum::{
    http::{StatusCode, Uri},
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::{
    data_formats::{
        ArticleListing, ArticleQueryParams, ArticleWrapper, CommentRequest, CommentWrapper,
        CreateArticleRequest, CreateTopicRequest, CreateUserRequest, EndpointsWrapper,
        MultipleArticlesWrapper, MultipleCommentsWrapper, MultipleTopicsWrapper,
        MultipleUsersWrapper, PageQueryParams, Pagination, TopicWrapper, UpdatedArticleWrapper,
        UpdatedCommentWrapper, UserWrapper, VoteRequest,
    },
    db_helpers::{
        add_comment_to_article_in_db, check_topic_exists, check_user_exists, create_article_in_db,
        delete_article_in_db, delete_comment_in_db, delete_user_in_db, get_article_by_id_in_db,
        get_comments_for_article_in_db, get_topic_by_slug_in_db, get_topics_in_db,
        get_user_by_username_in_db, get_users_in_db, insert_topic_in_db, insert_user_in_db,
        list_articles_in_db, update_article_votes_in_db, update_comment_votes_in_db, ArticlePage,
    },
    errors::RequestError,
    extractors::{ApiJson, ApiPath, ApiQuery},
    JsonResponse,
};

type JsonResult<T> = Result<JsonResponse<T>, RequestError>;

const ENDPOINTS: &str = include_str!("../endpoints.json");

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> RequestError {
    tracing::debug!("No route for {}", uri);
    RequestError::PathNotFound
}

pub async fn get_endpoints() -> JsonResult<EndpointsWrapper> {
    let endpoints = serde_json::from_str(ENDPOINTS).map_err(|e| {
        tracing::error!("endpoints.json is not valid JSON: {}", e);
        RequestError::ServerError
    })?;
    Ok((StatusCode::OK, Json(EndpointsWrapper { endpoints })))
}

// ----------------- Topic Handlers -----------------
pub async fn get_topics(Extension(pool): Extension<SqlitePool>) -> JsonResult<MultipleTopicsWrapper> {
    let topics = get_topics_in_db(&pool).await?;
    Ok((StatusCode::OK, Json(MultipleTopicsWrapper { topics })))
}

pub async fn get_topic(
    Extension(pool): Extension<SqlitePool>,
    ApiPath(slug): ApiPath<String>,
) -> JsonResult<TopicWrapper> {
    let topic = get_topic_by_slug_in_db(&pool, &slug).await?;
    Ok((StatusCode::OK, Json(TopicWrapper { topic })))
}

pub async fn add_topic(
    Extension(pool): Extension<SqlitePool>,
    ApiJson(request): ApiJson<CreateTopicRequest>,
) -> JsonResult<TopicWrapper> {
    let topic = insert_topic_in_db(&pool, request.validate()?).await?;
    Ok((StatusCode::CREATED, Json(TopicWrapper { topic })))
}

// ----------------- Article Handlers -----------------
pub async fn get_articles(
    Extension(pool): Extension<SqlitePool>,
    ApiQuery(params): ApiQuery<ArticleQueryParams>,
) -> JsonResult<MultipleArticlesWrapper> {
    let listing = ArticleListing::try_from(params)?;

    let (_, _, ArticlePage {
        articles,
        total_count,
    }) = tokio::try_join!(
        check_topic_exists(&pool, listing.topic.as_deref()),
        check_user_exists(&pool, listing.author.as_deref()),
        list_articles_in_db(&pool, &listing),
    )?;

    Ok((
        StatusCode::OK,
        Json(MultipleArticlesWrapper {
            articles,
            total_count,
        }),
    ))
}

pub async fn get_article(
    Extension(pool): Extension<SqlitePool>,
    ApiPath(article_id): ApiPath<i64>,
) -> JsonResult<ArticleWrapper> {
    let article = get_article_by_id_in_db(&pool, article_id).await?;
    Ok((StatusCode::OK, Json(ArticleWrapper { article })))
}

pub async fn add_article(
    Extension(pool): Extension<SqlitePool>,
    ApiJson(request): ApiJson<CreateArticleRequest>,
) -> JsonResult<ArticleWrapper> {
    let article = create_article_in_db(&pool, request.validate()?).await?;
    Ok((StatusCode::CREATED, Json(ArticleWrapper { article })))
}

pub async fn update_article_votes(
    Extension(pool): Extension<SqlitePool>,
    ApiPath(article_id): ApiPath<i64>,
    ApiJson(request): ApiJson<VoteRequest>,
) -> JsonResult<UpdatedArticleWrapper> {
    let inc_votes = request.validate()?;
    let updated_article = update_article_votes_in_db(&pool, article_id, inc_votes).await?;
    Ok((
        StatusCode::OK,
        Json(UpdatedArticleWrapper { updated_article }),
    ))
}

pub async fn delete_article(
    Extension(pool): Extension<SqlitePool>,
    ApiPath(article_id): ApiPath<i64>,
) -> Result<StatusCode, RequestError> {
    delete_article_in_db(&pool, article_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------- Comment Handlers -----------------
pub async fn get_article_comments(
    Extension(pool): Extension<SqlitePool>,
    ApiPath(article_id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<PageQueryParams>,
) -> JsonResult<MultipleCommentsWrapper> {
    let pagination = Pagination::try_from(params)?;

    let (_, comments) = tokio::try_join!(
        get_article_by_id_in_db(&pool, article_id),
        get_comments_for_article_in_db(&pool, article_id, pagination),
    )?;

    Ok((StatusCode::OK, Json(MultipleCommentsWrapper { comments })))
}

pub async fn add_article_comment(
    Extension(pool): Extension<SqlitePool>,
    ApiPath(article_id): ApiPath<i64>,
    ApiJson(request): ApiJson<CommentRequest>,
) -> JsonResult<CommentWrapper> {
    let comment = add_comment_to_article_in_db(&pool, article_id, request.validate()?).await?;
    Ok((StatusCode::CREATED, Json(CommentWrapper { comment })))
}

pub async fn update_comment_votes(
    Extension(pool): Extension<SqlitePool>,
    ApiPath(comment_id): ApiPath<i64>,
    ApiJson(request): ApiJson<VoteRequest>,
) -> JsonResult<UpdatedCommentWrapper> {
    let inc_votes = request.validate()?;
    let updated_comment = update_comment_votes_in_db(&pool, comment_id, inc_votes).await?;
    Ok((
        StatusCode::OK,
        Json(UpdatedCommentWrapper { updated_comment }),
    ))
}

pub async fn delete_comment(
    Extension(pool): Extension<SqlitePool>,
    ApiPath(comment_id): ApiPath<i64>,
) -> Result<StatusCode, RequestError> {
    delete_comment_in_db(&pool, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------- User Handlers -----------------
pub async fn get_users(Extension(pool): Extension<SqlitePool>) -> JsonResult<MultipleUsersWrapper> {
    let users = get_users_in_db(&pool).await?;
    Ok((StatusCode::OK, Json(MultipleUsersWrapper { users })))
}

pub async fn get_user(
    Extension(pool): Extension<SqlitePool>,
    ApiPath(username): ApiPath<String>,
) -> JsonResult<UserWrapper> {
    let user = get_user_by_username_in_db(&pool, &username).await?;
    Ok((StatusCode::OK, Json(UserWrapper { user })))
}

pub async fn add_user(
    Extension(pool): Extension<SqlitePool>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> JsonResult<UserWrapper> {
    let user = insert_user_in_db(&pool, request.validate()?).await?;
    Ok((StatusCode::CREATED, Json(UserWrapper { user })))
}

pub async fn delete_user(
    Extension(pool): Extension<SqlitePool>,
    ApiPath(username): ApiPath<String>,
) -> Result<StatusCode, RequestError> {
    delete_user_in_db(&pool, &username).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_document_lists_every_route() {
        let endpoints: serde_json::Value = serde_json::from_str(ENDPOINTS).unwrap();
        let endpoints = endpoints.as_object().unwrap();
        for route in [
            "GET /api",
            "GET /api/topics",
            "POST /api/topics",
            "GET /api/topics/:topic",
            "GET /api/articles",
            "POST /api/articles",
            "GET /api/articles/:article_id",
            "PATCH /api/articles/:article_id",
            "DELETE /api/articles/:article_id",
            "GET /api/articles/:article_id/comments",
            "POST /api/articles/:article_id/comments",
            "PATCH /api/comments/:comment_id",
            "DELETE /api/comments/:comment_id",
            "GET /api/users",
            "POST /api/users",
            "GET /api/users/:username",
            "DELETE /api/users/:username",
        ] {
            assert!(endpoints.contains_key(route), "{route} is undocumented");
        }
    }
}
