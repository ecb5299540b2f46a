//! Request extractors whose rejections render as [`JsonApiError`].

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::JsonApiError;

/// JSON body; malformed or incomplete bodies are a 400 validation error.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(JsonApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(JsonApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(JsonApiError))]
pub struct ApiQuery<T>(pub T);
