// ABOUTME: HTTP rendering of AppError for axum handlers
// ABOUTME: JSON envelope for API endpoints, plain-text bodies for forms, flat JSON for lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorResponse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::{header, StatusCode};

fn status_of(error: &AppError) -> StatusCode {
    StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_of(&self);
        if status.is_server_error() {
            tracing::error!(code = ?self.code, error = %self, "Request failed");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

/// Error rendered as a `text/plain` body, used by HTML form endpoints
#[derive(Debug)]
pub struct PlainTextError(pub AppError);

impl From<AppError> for PlainTextError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for PlainTextError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        if status.is_server_error() {
            tracing::error!(code = ?self.0.code, error = %self.0, "Form request failed");
        }
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.0.message,
        )
            .into_response()
    }
}

/// Error rendered as `{"error": "<message>"}`, the shape the log form's lookups expect
#[derive(Debug)]
pub struct FlatJsonError(pub AppError);

impl From<AppError> for FlatJsonError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for FlatJsonError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        if status.is_server_error() {
            tracing::error!(code = ?self.0.code, error = %self.0, "Lookup request failed");
        }
        (status, Json(serde_json::json!({ "error": self.0.message }))).into_response()
    }
}
