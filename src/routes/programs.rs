// ABOUTME: Program creation, the per-program log form, and the log form's JSON lookups
// ABOUTME: Lookups for an unknown program answer 404 with {"error": "Program not found"}
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::forms::{parse_new_program, FormFields};
use crate::database::exercises;
use crate::errors::{AppError, AppResult, FlatJsonError, PlainTextError};
use crate::html;
use crate::middleware::AuthenticatedUser;
use crate::resources::ServerResources;
use crate::services::provisioning;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Program routes
pub struct ProgramRoutes;

impl ProgramRoutes {
    /// Create all program routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/create_program", post(Self::handle_create_program))
            .route("/log/:program_id", get(Self::handle_log_form))
            .route(
                "/get_training_days/:program_id",
                get(Self::handle_training_days),
            )
            .route(
                "/get_training_weeks/:program_id",
                get(Self::handle_training_weeks),
            )
            .with_state(resources)
    }

    async fn handle_create_program(
        State(resources): State<Arc<ServerResources>>,
        AuthenticatedUser(user): AuthenticatedUser,
        body: Bytes,
    ) -> Result<Response, PlainTextError> {
        let fields = FormFields::from_bytes(&body)?;
        let new_program = parse_new_program(&fields)?;
        let created = provisioning::create_program(&resources.database, &new_program).await?;

        info!(
            user.id = user.user_id,
            program.id = created.program.id,
            "Program created"
        );
        Ok(Redirect::to("/").into_response())
    }

    async fn handle_log_form(
        State(resources): State<Arc<ServerResources>>,
        AuthenticatedUser(user): AuthenticatedUser,
        Path(raw_id): Path<String>,
    ) -> Result<Html<String>, PlainTextError> {
        let program_id = parse_program_id(&raw_id)?;
        let program = provisioning::get_program(&resources.database, program_id).await?;
        let training_days = provisioning::training_days(&resources.database, program_id).await?;
        let total_weeks = provisioning::total_weeks(&resources.database, program_id).await?;
        let known_exercises = {
            let mut conn = resources.database.acquire().await?;
            exercises::list_exercises(&mut conn).await?
        };

        Ok(Html(html::log_form_page(
            &user,
            &program,
            &training_days,
            total_weeks,
            &known_exercises,
        )))
    }

    async fn handle_training_days(
        State(resources): State<Arc<ServerResources>>,
        Path(raw_id): Path<String>,
    ) -> Result<Response, FlatJsonError> {
        let program_id = parse_program_id(&raw_id)?;
        let split = provisioning::training_days(&resources.database, program_id).await?;
        Ok(Json(json!({ "training_days": split })).into_response())
    }

    async fn handle_training_weeks(
        State(resources): State<Arc<ServerResources>>,
        Path(raw_id): Path<String>,
    ) -> Result<Response, FlatJsonError> {
        let program_id = parse_program_id(&raw_id)?;
        let total_weeks = provisioning::total_weeks(&resources.database, program_id).await?;
        Ok(Json(json!({ "total_weeks": total_weeks })).into_response())
    }
}

/// Path ids are parsed here so a malformed id gets the route's own error body
fn parse_program_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::invalid_format("program_id", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_parse_program_id() {
        assert_eq!(parse_program_id("42").unwrap(), 42);

        let error = parse_program_id("abc").unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidFormat);
        assert_eq!(error.message, "Invalid value for program_id: 'abc'");
    }
}
