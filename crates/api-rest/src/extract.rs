//! Extractors whose rejections use the same `{"error": "..."}` body as every other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::ApiError;

/// JSON request body. Malformed JSON and mistyped fields answer 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
