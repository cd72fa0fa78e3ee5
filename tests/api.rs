mod common;

use anyhow::Result;
use common::{expect_error, expect_json, spawn_app};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn endpoints_document_is_served() -> Result<()> {
    let app = spawn_app().await?;
    let body = expect_json(app.get("/api").await?, StatusCode::OK).await?;
    let endpoints = body["endpoints"].as_object().expect("endpoints object");
    assert!(endpoints.contains_key("GET /api/articles"));
    assert!(endpoints["GET /api/articles"]["queries"].is_array());
    Ok(())
}

#[tokio::test]
async fn health_check_answers() -> Result<()> {
    let app = spawn_app().await?;
    let response = app.get("/api/health").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "alive");
    Ok(())
}

#[tokio::test]
async fn unknown_path_is_not_found() -> Result<()> {
    let app = spawn_app().await?;
    expect_error(
        app.get("/api/i-do-not-exist").await?,
        StatusCode::NOT_FOUND,
        "path not found",
    )
    .await?;
    expect_error(app.get("/nothing/here").await?, StatusCode::NOT_FOUND, "path not found").await
}

#[tokio::test]
async fn unregistered_method_is_not_found() -> Result<()> {
    let app = spawn_app().await?;
    let response = app
        .client
        .put(app.url("/api/topics"))
        .json(&json!({ "slug": "dogs" }))
        .send()
        .await?;
    expect_error(response, StatusCode::NOT_FOUND, "path not found").await?;
    expect_error(
        app.delete("/api/topics/cats").await?,
        StatusCode::NOT_FOUND,
        "path not found",
    )
    .await
}
