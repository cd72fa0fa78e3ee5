//! Wrappers around the axum extractors whose rejections become a
//! `RequestError::BadRequest` with the usual JSON body.

use axum::extract::{FromRequest, FromRequestParts, Path, Query};
use axum::http::{request::Parts, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::errors::RequestError;

pub struct ApiPath<T>(pub T);

pub struct ApiQuery<T>(pub T);

pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = RequestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => {
                tracing::debug!("Rejected path parameters: {}", rejection);
                Err(RequestError::BadRequest)
            }
        }
    }
}

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RequestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => {
                tracing::debug!("Rejected query string: {}", rejection);
                Err(RequestError::BadRequest)
            }
        }
    }
}

#[axum::async_trait]
impl<S, B, T> FromRequest<S, B> for ApiJson<T>
where
    Json<T>: FromRequest<S, B, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
    B: Send + 'static,
{
    type Rejection = RequestError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection);
                Err(RequestError::BadRequest)
            }
        }
    }
}
