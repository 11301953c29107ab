// ABOUTME: Log submission route handler
// ABOUTME: Decodes the repeated-field form and commits the batch; lookup failures answer plain-text 400
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::forms::{parse_log_batch, FormFields};
use crate::errors::PlainTextError;
use crate::middleware::MaybeUser;
use crate::resources::ServerResources;
use crate::services::ingestion;
use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::post,
    Router,
};
use std::sync::Arc;
use tracing::info;

/// Log submission routes
pub struct LogRoutes;

impl LogRoutes {
    /// Create all log routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/submit-log", post(Self::handle_submit_log))
            .with_state(resources)
    }

    /// The form names its user; a signed-in browser that omits it logs as itself
    async fn handle_submit_log(
        State(resources): State<Arc<ServerResources>>,
        MaybeUser(session): MaybeUser,
        body: Bytes,
    ) -> Result<Response, PlainTextError> {
        let fields = FormFields::from_bytes(&body)?;
        let batch = parse_log_batch(&fields, session.map(|user| user.user_id))?;
        let receipt = ingestion::submit_batch(&resources.database, batch).await?;

        info!(
            week.id = receipt.week.id,
            session.id = receipt.session.id,
            written = receipt.written.len(),
            skipped = receipt.skipped,
            "Log submission stored"
        );
        Ok(Redirect::to("/").into_response())
    }
}
