#![allow(dead_code)]

use std::net::TcpListener;

use anyhow::{Context, Result};
use newsroom::{build_app, init_db, run_app, Config};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use sqlx::Executor;
use tempfile::TempDir;

const TEST_DATA: &str = include_str!("../fixtures/test_data.sql");

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    // Keeps the database file alive for the lifetime of the test.
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<Response> {
        Ok(self.client.patch(self.url(path)).json(body).send().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }
}

/// Starts the server on an ephemeral port against a freshly seeded database.
pub async fn spawn_app() -> Result<TestApp> {
    let dir = tempfile::tempdir().context("failed to create temp dir")?;
    let listener = TcpListener::bind("127.0.0.1:0").context("failed to bind test listener")?;
    let address = listener.local_addr()?;

    let config = Config {
        database_url: format!("sqlite://{}", dir.path().join("newsroom.db").display()),
        address,
        max_connections: 5,
    };
    let pool = init_db(&config).await?;
    pool.execute(TEST_DATA).await.context("failed to seed test data")?;

    tokio::spawn(run_app(build_app(pool), listener));

    Ok(TestApp {
        base_url: format!("http://{}", address),
        client: reqwest::Client::new(),
        _dir: dir,
    })
}

/// Asserts the status and returns the decoded JSON body.
pub async fn expect_json(response: Response, status: StatusCode) -> Result<Value> {
    let actual = response.status();
    let body = response.json::<Value>().await?;
    assert_eq!(actual, status, "unexpected status, body: {}", body);
    Ok(body)
}

pub async fn expect_error(response: Response, status: StatusCode, message: &str) -> Result<()> {
    let body = expect_json(response, status).await?;
    assert_eq!(body["message"], message, "unexpected error body: {}", body);
    Ok(())
}
