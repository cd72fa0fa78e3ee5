use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::NewUser;
use crate::errors::RequestError;
use crate::models::User;

pub async fn get_users_in_db(pool: &SqlitePool) -> Result<Vec<User>, RequestError> {
    let result = sqlx::query_as::<Sqlite, User>(
        r#"
        SELECT username, name, avatar_url FROM users
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(result)
}

pub async fn get_user_by_username_in_db(
    pool: &SqlitePool,
    username: &str,
) -> Result<User, RequestError> {
    let result = sqlx::query_as::<Sqlite, User>(
        r#"
        SELECT username, name, avatar_url FROM users WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    match result {
        Some(user) => Ok(user),
        None => Err(RequestError::NotFound),
    }
}

pub async fn check_user_exists(
    pool: &SqlitePool,
    username: Option<&str>,
) -> Result<(), RequestError> {
    if let Some(username) = username {
        get_user_by_username_in_db(pool, username).await?;
    }
    Ok(())
}

pub async fn insert_user_in_db(
    pool: &SqlitePool,
    NewUser {
        username,
        name,
        avatar_url,
    }: NewUser,
) -> Result<User, RequestError> {
    let mut tx = pool.begin().await?;
    let user = sqlx::query_as::<Sqlite, User>(
        r#"
        INSERT INTO users (username, name, avatar_url)
        VALUES ($1, $2, $3)
        RETURNING username, name, avatar_url
        "#,
    )
    .bind(username)
    .bind(name)
    .bind(avatar_url)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(user)
}

pub async fn delete_user_in_db(pool: &SqlitePool, username: &str) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        DELETE FROM users WHERE username = $1
        "#,
    )
    .bind(username)
    .execute(&mut tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound);
    }

    tx.commit().await?;
    Ok(())
}
