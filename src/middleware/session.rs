// ABOUTME: Session cookie extractors for browser routes
// ABOUTME: Protected handlers take AuthenticatedUser, which redirects to /login when the session is missing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::SessionUser;
use crate::constants::session::COOKIE_NAME;
use crate::resources::ServerResources;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
    response::Redirect,
};
use axum_extra::headers::{Cookie, HeaderMapExt};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::debug;

/// Where unauthenticated browsers are sent
pub const LOGIN_PATH: &str = "/login";

/// Read one cookie from the request headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .typed_get::<Cookie>()
        .and_then(|cookie| cookie.get(name).map(str::to_owned))
}

fn session_from_parts(parts: &Parts, resources: &ServerResources) -> Option<SessionUser> {
    let token = get_cookie_value(&parts.headers, COOKIE_NAME)?;
    match resources.sessions.validate(&token) {
        Ok(user) => Some(user),
        Err(e) => {
            debug!(path = %parts.uri.path(), "Ignoring session cookie: {}", e.message);
            None
        }
    }
}

/// A request with a valid session; otherwise the browser is redirected to `/login`
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub SessionUser);

#[async_trait]
impl FromRequestParts<Arc<ServerResources>> for AuthenticatedUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        resources: &Arc<ServerResources>,
    ) -> Result<Self, Self::Rejection> {
        session_from_parts(parts, resources)
            .map(Self)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}

/// The session user when one is present; never rejects
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<SessionUser>);

#[async_trait]
impl FromRequestParts<Arc<ServerResources>> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        resources: &Arc<ServerResources>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(session_from_parts(parts, resources)))
    }
}
