use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::NewTopic;
use crate::errors::RequestError;
use crate::models::Topic;

pub async fn get_topics_in_db(pool: &SqlitePool) -> Result<Vec<Topic>, RequestError> {
    let result = sqlx::query_as::<Sqlite, Topic>(
        r#"
        SELECT slug, description FROM topics
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(result)
}

pub async fn get_topic_by_slug_in_db(pool: &SqlitePool, slug: &str) -> Result<Topic, RequestError> {
    let result = sqlx::query_as::<Sqlite, Topic>(
        r#"
        SELECT slug, description FROM topics WHERE slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    match result {
        Some(topic) => Ok(topic),
        None => Err(RequestError::NotFound),
    }
}

/// Succeeds when no slug is given or the slug names an existing topic.
pub async fn check_topic_exists(pool: &SqlitePool, slug: Option<&str>) -> Result<(), RequestError> {
    if let Some(slug) = slug {
        get_topic_by_slug_in_db(pool, slug).await?;
    }
    Ok(())
}

pub async fn insert_topic_in_db(
    pool: &SqlitePool,
    NewTopic { slug, description }: NewTopic,
) -> Result<Topic, RequestError> {
    let mut tx = pool.begin().await?;
    let topic = sqlx::query_as::<Sqlite, Topic>(
        r#"
        INSERT INTO topics (slug, description)
        VALUES ($1, $2)
        RETURNING slug, description
        "#,
    )
    .bind(slug)
    .bind(description)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(topic)
}
