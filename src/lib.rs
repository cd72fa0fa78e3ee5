mod config;
mod data_formats;
mod db_helpers;
mod errors;
mod extractors;
mod handlers;
mod models;

use std::net::TcpListener;
use std::str::FromStr;

use anyhow::Context;
pub use anyhow::Result;
use axum::http::StatusCode;
use axum::{routing::*, Extension, Json, Router};
pub use config::Config;
pub use data_formats::*;
pub use errors::{RequestError, RequestErrorJson};
use handlers::*;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub type JsonResponse<T> = (StatusCode, Json<T>);

pub async fn run_app(app: Router, listener: TcpListener) -> Result<()> {
    tracing::info!("Server started on {}", listener.local_addr()?);
    axum::Server::from_tcp(listener)?
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

pub async fn init_db(config: &Config) -> Result<SqlitePool> {
    let db_url = config.database_url.as_str();
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        tracing::info!("Creating database {}", db_url);
        Sqlite::create_database(db_url)
            .await
            .with_context(|| format!("Failed to create database {db_url}"))?;
    } else {
        tracing::info!("Database already exists");
    }

    let options = SqliteConnectOptions::from_str(db_url)
        .with_context(|| format!("Invalid DATABASE_URL {db_url}"))?
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .context("Failed to connect to the database")?;

    tracing::info!("Running Migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations completed");
    Ok(pool)
}

pub fn bind_listener(config: &Config) -> Result<TcpListener> {
    TcpListener::bind(config.address)
        .with_context(|| format!("Could not bind to {}", config.address))
}

/// Wires the routes to a database pool along with the shared middleware.
pub fn build_app(pool: SqlitePool) -> Router {
    make_router()
        .layer(Extension(pool))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
}

pub fn make_router() -> Router {
    Router::new()
        .route("/api", get(get_endpoints).fallback(not_found))
        .route("/api/health", get(alive).fallback(not_found))
        .route(
            "/api/topics",
            get(get_topics).post(add_topic).fallback(not_found),
        )
        .route("/api/topics/:topic", get(get_topic).fallback(not_found))
        .route(
            "/api/articles",
            get(get_articles).post(add_article).fallback(not_found),
        )
        .route(
            "/api/articles/:article_id",
            get(get_article)
                .patch(update_article_votes)
                .delete(delete_article)
                .fallback(not_found),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(get_article_comments)
                .post(add_article_comment)
                .fallback(not_found),
        )
        .route(
            "/api/comments/:comment_id",
            patch(update_comment_votes)
                .delete(delete_comment)
                .fallback(not_found),
        )
        .route("/api/users", get(get_users).post(add_user).fallback(not_found))
        .route(
            "/api/users/:username",
            get(get_user).delete(delete_user).fallback(not_found),
        )
        .fallback(not_found)
}
