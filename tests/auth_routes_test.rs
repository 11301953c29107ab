// ABOUTME: HTTP tests for registration, login, logout, and session-protected pages
// ABOUTME: Drives the full router with tower's oneshot and checks BAD APE! messages and cookies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use apelog::routes::router;
use axum::http::{header, Method, StatusCode};
use tower::ServiceExt;

fn location(response: &axum::response::Response) -> Option<&str> {
    response.headers().get(header::LOCATION)?.to_str().ok()
}

#[tokio::test]
async fn test_register_validation_messages() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let app = router(&resources);

    let cases = [
        ("username=&password=x&confirm_password=x", "BAD APE! Missing username"),
        ("username=ape&password=&confirm_password=", "BAD APE! Missing password"),
        ("username=ape&password=a&confirm_password=b", "BAD APE! Passwords do not match"),
    ];
    for (form, expected) in cases {
        let response = app
            .clone()
            .oneshot(common::request(Method::POST, "/register", Some(form), None))
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(common::body_string(response).await?, expected);
    }

    Ok(())
}

#[tokio::test]
async fn test_register_then_login_flow() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let app = router(&resources);
    let form = "username=ape&password=banana&confirm_password=banana";

    let response = app
        .clone()
        .oneshot(common::request(Method::POST, "/register", Some(form), None))
        .await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    let cookie = common::cookie_pair(&response).unwrap();
    assert!(cookie.starts_with("session="));

    let response = app
        .clone()
        .oneshot(common::request(Method::POST, "/register", Some(form), None))
        .await?;
    assert_eq!(
        common::body_string(response).await?,
        "BAD APE! Username already taken"
    );

    let response = app
        .clone()
        .oneshot(common::request(
            Method::POST,
            "/login",
            Some("username=ape&password=wrong"),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        common::body_string(response).await?,
        "BAD APE! Invalid username and/or password"
    );

    let response = app
        .clone()
        .oneshot(common::request(
            Method::POST,
            "/login",
            Some("username=ape&password=banana"),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = common::cookie_pair(&response).unwrap();

    let response = app
        .clone()
        .oneshot(common::request(Method::GET, "/create", None, Some(&cookie)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::body_string(response).await?.contains("ape"));

    Ok(())
}

#[tokio::test]
async fn test_login_validation_messages() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let app = router(&resources);

    let cases = [
        ("username=&password=x", "BAD APE! Missing username"),
        ("username=ape&password=", "BAD APE! Missing password"),
        ("username=nobody&password=x", "BAD APE! Invalid username and/or password"),
    ];
    for (form, expected) in cases {
        let response = app
            .clone()
            .oneshot(common::request(Method::POST, "/login", Some(form), None))
            .await?;
        assert_eq!(common::body_string(response).await?, expected);
    }

    Ok(())
}

#[tokio::test]
async fn test_protected_pages_redirect_to_login() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let app = router(&resources);

    for path in ["/create", "/display", "/design", "/dashboard/"] {
        let response = app
            .clone()
            .oneshot(common::request(Method::GET, path, None, None))
            .await?;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), Some("/login"), "{path}");
    }

    let response = app
        .clone()
        .oneshot(common::request(
            Method::GET,
            "/display",
            None,
            Some("session=not-a-token"),
        ))
        .await?;
    assert_eq!(location(&response), Some("/login"));

    Ok(())
}

#[tokio::test]
async fn test_logout_clears_cookie() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let app = router(&resources);

    let response = app
        .oneshot(common::request(Method::GET, "/logout", None, None))
        .await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()?;
    assert!(set_cookie.contains("Max-Age=0"));

    Ok(())
}

#[tokio::test]
async fn test_pages_render_for_signed_in_user() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let user = common::create_test_user(&resources.database, "silverback").await?;
    common::create_test_program(&resources.database, "PPL", 4, &[1, 3, 5]).await?;
    let cookie = common::session_cookie(&resources, &user)?;
    let app = router(&resources);

    for method in [Method::GET, Method::POST] {
        for path in ["/create", "/display", "/design"] {
            let response = app
                .clone()
                .oneshot(common::request(method.clone(), path, None, Some(&cookie)))
                .await?;
            assert_eq!(response.status(), StatusCode::OK, "{method} {path}");
        }
    }

    let response = app
        .oneshot(common::request(Method::GET, "/create", None, Some(&cookie)))
        .await?;
    assert!(common::body_string(response).await?.contains("PPL"));

    Ok(())
}
