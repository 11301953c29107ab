// ABOUTME: Server-rendered page routes: landing, programs, history, and design views
// ABOUTME: Every page except the landing page requires a session and redirects to /login otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use crate::html;
use crate::middleware::{AuthenticatedUser, MaybeUser, RequestId};
use crate::resources::ServerResources;
use crate::services::{provisioning, reporting};
use axum::{extract::State, response::Html, routing::get, Router};
use std::sync::Arc;

/// Page routes
pub struct PageRoutes;

impl PageRoutes {
    /// Create all page routes
    ///
    /// `/create`, `/display`, and `/design` answer POST as well as GET so a form
    /// posted back to its own page re-renders it.
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_index))
            .route(
                "/create",
                get(Self::handle_create).post(Self::handle_create),
            )
            .route(
                "/display",
                get(Self::handle_display).post(Self::handle_display),
            )
            .route(
                "/design",
                get(Self::handle_design).post(Self::handle_design),
            )
            .with_state(resources)
    }

    async fn handle_index(MaybeUser(user): MaybeUser) -> Html<String> {
        Html(html::index_page(user.as_ref()))
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        AuthenticatedUser(user): AuthenticatedUser,
        request_id: RequestId,
    ) -> Result<Html<String>, AppError> {
        let programs = provisioning::list_programs(&resources.database)
            .await
            .map_err(|e| request_id.tag(e))?;
        Ok(Html(html::create_page(&user, &programs)))
    }

    async fn handle_display(
        State(resources): State<Arc<ServerResources>>,
        AuthenticatedUser(user): AuthenticatedUser,
        request_id: RequestId,
    ) -> Result<Html<String>, AppError> {
        let rows = reporting::history(&resources.database, user.user_id)
            .await
            .map_err(|e| request_id.tag(e))?;
        Ok(Html(html::display_page(&user, &rows)))
    }

    async fn handle_design(
        State(resources): State<Arc<ServerResources>>,
        AuthenticatedUser(user): AuthenticatedUser,
        request_id: RequestId,
    ) -> Result<Html<String>, AppError> {
        let layouts = provisioning::program_layouts(&resources.database)
            .await
            .map_err(|e| request_id.tag(e))?;
        Ok(Html(html::design_page(&user, &layouts)))
    }
}
