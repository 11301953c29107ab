// ABOUTME: Registration, login, and logout route handlers
// ABOUTME: Validation failures answer 200 with a plain-text "BAD APE!" message; success sets the session cookie
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use crate::html;
use crate::middleware::{RequestId, LOGIN_PATH};
use crate::models::User;
use crate::resources::ServerResources;
use crate::services::accounts::{self, AccountOutcome, Registration};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
struct RegisterForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

#[derive(Deserialize)]
struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Account routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all account routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/register",
                get(Self::handle_register_page).post(Self::handle_register),
            )
            .route("/login", get(Self::handle_login_page).post(Self::handle_login))
            .route("/logout", get(Self::handle_logout))
            .with_state(resources)
    }

    async fn handle_register_page() -> Html<String> {
        Html(html::register_page())
    }

    async fn handle_login_page() -> Html<String> {
        Html(html::login_page())
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        request_id: RequestId,
        Form(form): Form<RegisterForm>,
    ) -> Result<Response, AppError> {
        let registration = Registration {
            user_name: form.username,
            password: form.password,
            confirm_password: form.confirm_password,
        };
        accounts::register(&resources.database, &registration)
            .await
            .and_then(|outcome| Self::finish(&resources, outcome))
            .map_err(|e| request_id.tag(e))
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        request_id: RequestId,
        Form(form): Form<LoginForm>,
    ) -> Result<Response, AppError> {
        accounts::login(&resources.database, &form.username, &form.password)
            .await
            .and_then(|outcome| Self::finish(&resources, outcome))
            .map_err(|e| request_id.tag(e))
    }

    async fn handle_logout(State(resources): State<Arc<ServerResources>>) -> Response {
        (
            [(header::SET_COOKIE, resources.sessions.clear_cookie())],
            Redirect::to(LOGIN_PATH),
        )
            .into_response()
    }

    fn finish(resources: &ServerResources, outcome: AccountOutcome) -> Result<Response, AppError> {
        match outcome {
            AccountOutcome::Authenticated(user) => Self::start_session(resources, &user),
            AccountOutcome::Rejected(message) => Ok((StatusCode::OK, message).into_response()),
        }
    }

    fn start_session(resources: &ServerResources, user: &User) -> Result<Response, AppError> {
        let token = resources.sessions.issue(user)?;
        Ok((
            [(header::SET_COOKIE, resources.sessions.session_cookie(&token))],
            Redirect::to("/"),
        )
            .into_response())
    }
}
