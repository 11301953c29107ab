// ABOUTME: Route module organization for the apelog HTTP surface
// ABOUTME: Assembles every route group into one router with tracing, timeout, and request-id layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for apelog
//!
//! Each domain module owns its route definitions and thin handlers that delegate
//! to the service layer. [`router`] merges them and applies the shared layers.

/// Registration, login, and logout
pub mod auth;
/// Dashboard shell and its JSON filter endpoints
pub mod dashboard;
/// Url-encoded form decoding
pub mod forms;
/// Liveness and readiness
pub mod health;
/// Log submission
pub mod logs;
/// Landing, creation, history, and design pages
pub mod pages;
/// Program creation and log form lookups
pub mod programs;

pub use auth::AuthRoutes;
pub use dashboard::DashboardRoutes;
pub use health::HealthRoutes;
pub use logs::LogRoutes;
pub use pages::PageRoutes;
pub use programs::ProgramRoutes;

use crate::constants::http::{MAX_BODY_BYTES, REQUEST_TIMEOUT_SECS};
use crate::middleware::{request_id_middleware, RequestId};
use crate::resources::ServerResources;
use axum::{extract::Request, middleware, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info_span;

/// Build the complete application router
///
/// The request-id middleware is the outermost layer so the trace span and every
/// handler see the same id.
pub fn router(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(PageRoutes::routes(Arc::clone(resources)))
        .merge(AuthRoutes::routes(Arc::clone(resources)))
        .merge(ProgramRoutes::routes(Arc::clone(resources)))
        .merge(LogRoutes::routes(Arc::clone(resources)))
        .merge(DashboardRoutes::routes(Arc::clone(resources)))
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            let request_id = request
                .extensions()
                .get::<RequestId>()
                .map_or("-", RequestId::as_str);
            info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        }))
        .layer(middleware::from_fn(request_id_middleware))
}
