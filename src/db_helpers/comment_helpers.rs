use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::{NewComment, Pagination};
use crate::errors::RequestError;
use crate::models::Comment;

pub async fn get_comments_for_article_in_db(
    pool: &SqlitePool,
    article_id: i64,
    pagination: Pagination,
) -> Result<Vec<Comment>, RequestError> {
    let result = sqlx::query_as::<Sqlite, Comment>(
        r#"
        SELECT comment_id,
               article_id,
               author,
               body,
               votes,
               created_at
        FROM   comments
        WHERE  article_id = $1
        ORDER  BY created_at ASC, comment_id ASC
        LIMIT  $2 OFFSET $3
        "#,
    )
    .bind(article_id)
    .bind(pagination.limit)
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;
    Ok(result)
}

pub async fn add_comment_to_article_in_db(
    pool: &SqlitePool,
    article_id: i64,
    NewComment { author, body }: NewComment,
) -> Result<Comment, RequestError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query_as::<Sqlite, Comment>(
        r#"
        INSERT INTO comments (article_id, author, body)
        VALUES ($1, $2, $3)
        RETURNING comment_id, article_id, author, body, votes, created_at
        "#,
    )
    .bind(article_id)
    .bind(author)
    .bind(body)
    .fetch_one(&mut tx)
    .await?;

    tx.commit().await?;
    Ok(result)
}

pub async fn update_comment_votes_in_db(
    pool: &SqlitePool,
    comment_id: i64,
    inc_votes: i64,
) -> Result<Comment, RequestError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query_as::<Sqlite, Comment>(
        r#"
        UPDATE comments
        SET    votes = votes + $1
        WHERE  comment_id = $2
        RETURNING comment_id, article_id, author, body, votes, created_at
        "#,
    )
    .bind(inc_votes)
    .bind(comment_id)
    .fetch_optional(&mut tx)
    .await?;

    let result = match result {
        Some(comment) => comment,
        None => return Err(RequestError::NotFound),
    };

    tx.commit().await?;
    Ok(result)
}

pub async fn delete_comment_in_db(pool: &SqlitePool, comment_id: i64) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        DELETE FROM comments WHERE comment_id = $1
        "#,
    )
    .bind(comment_id)
    .execute(&mut tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound);
    }

    tx.commit().await?;
    Ok(())
}
