use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::{ArticleListing, NewArticle};
use crate::errors::RequestError;
use crate::models::{Article, ArticleSummary};

use super::QueryBuilder;

const SINGLE_ARTICLE_QUERY: &str = r#"
            SELECT articles.article_id,
                   articles.author,
                   articles.title,
                   articles.body,
                   articles.topic,
                   articles.created_at,
                   articles.votes,
                   articles.article_img_url,
                   COUNT(comments.comment_id) AS comment_count
            FROM   articles
                LEFT JOIN comments
                       ON comments.article_id = articles.article_id
            WHERE  articles.article_id = $1
            GROUP  BY articles.article_id
"#;

const ARTICLE_LIST_QUERY: &str = r#"
            SELECT articles.article_id,
                   articles.author,
                   articles.title,
                   articles.topic,
                   articles.created_at,
                   articles.votes,
                   articles.article_img_url,
                   COUNT(comments.comment_id) AS comment_count
            FROM   articles
                LEFT JOIN comments
                       ON comments.article_id = articles.article_id"#;

#[derive(Debug)]
pub struct ArticlePage {
    pub articles: Vec<ArticleSummary>,
    pub total_count: i64,
}

pub async fn list_articles_in_db(
    pool: &SqlitePool,
    listing: &ArticleListing,
) -> Result<ArticlePage, RequestError> {
    let (filter, params) = QueryBuilder::new(" WHERE ", " AND ")
        .add_param("articles.topic", listing.topic.as_deref())
        .add_param("articles.author", listing.author.as_deref())
        .build();

    let order = listing.order.keyword();
    // sort_by and order come from closed enums, never from raw input.
    let page_query = format!(
        "{ARTICLE_LIST_QUERY}{filter}
            GROUP  BY articles.article_id
            ORDER  BY {} {order}, articles.article_id {order}
            LIMIT  ? OFFSET ?",
        listing.sort_by.column(),
    );
    let count_query = format!("SELECT COUNT(*) FROM articles{filter}");

    let mut page = sqlx::query_as::<Sqlite, ArticleSummary>(&page_query);
    let mut count = sqlx::query_scalar::<Sqlite, i64>(&count_query);
    for param in params {
        page = page.bind(param.clone());
        count = count.bind(param);
    }
    let page = page
        .bind(listing.pagination.limit)
        .bind(listing.pagination.offset());

    let (articles, total_count) = tokio::try_join!(page.fetch_all(pool), count.fetch_one(pool))?;

    if listing.pagination.is_out_of_range(total_count) {
        tracing::debug!(
            page = listing.pagination.page,
            total_count,
            "requested page is past the last page"
        );
        return Err(RequestError::NotFound);
    }

    Ok(ArticlePage {
        articles,
        total_count,
    })
}

pub async fn get_article_by_id_in_db(pool: &SqlitePool, id: i64) -> Result<Article, RequestError> {
    let article = sqlx::query_as::<Sqlite, Article>(SINGLE_ARTICLE_QUERY)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match article {
        Some(article) => Ok(article),
        None => Err(RequestError::NotFound),
    }
}

pub async fn create_article_in_db(
    pool: &SqlitePool,
    NewArticle {
        author,
        title,
        body,
        topic,
        article_img_url,
    }: NewArticle,
) -> Result<Article, RequestError> {
    let mut tx = pool.begin().await?;

    // Without an image url the column default applies.
    let insert = match article_img_url {
        Some(article_img_url) => sqlx::query_scalar::<Sqlite, i64>(
            r#"
            INSERT INTO articles (author, title, body, topic, article_img_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING article_id
            "#,
        )
        .bind(author)
        .bind(title)
        .bind(body)
        .bind(topic)
        .bind(article_img_url),
        None => sqlx::query_scalar::<Sqlite, i64>(
            r#"
            INSERT INTO articles (author, title, body, topic)
            VALUES ($1, $2, $3, $4)
            RETURNING article_id
            "#,
        )
        .bind(author)
        .bind(title)
        .bind(body)
        .bind(topic),
    };
    let article_id = insert.fetch_one(&mut tx).await?;

    let article = sqlx::query_as::<Sqlite, Article>(SINGLE_ARTICLE_QUERY)
        .bind(article_id)
        .fetch_one(&mut tx)
        .await?;

    tx.commit().await?;
    Ok(article)
}

pub async fn update_article_votes_in_db(
    pool: &SqlitePool,
    id: i64,
    inc_votes: i64,
) -> Result<Article, RequestError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE articles
        SET    votes = votes + $1
        WHERE  article_id = $2
        "#,
    )
    .bind(inc_votes)
    .bind(id)
    .execute(&mut tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound);
    }

    let article = sqlx::query_as::<Sqlite, Article>(SINGLE_ARTICLE_QUERY)
        .bind(id)
        .fetch_one(&mut tx)
        .await?;

    tx.commit().await?;
    Ok(article)
}

pub async fn delete_article_in_db(pool: &SqlitePool, id: i64) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        DELETE FROM articles
        WHERE articles.article_id = $1
        "#,
    )
    .bind(id)
    .execute(&mut tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound);
    }

    tx.commit().await?;
    Ok(())
}
