// ABOUTME: HTTP middleware for request correlation and session handling
// ABOUTME: Provides request ID propagation and the session cookie extractors

pub mod request_id;
pub mod session;

pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use session::{get_cookie_value, AuthenticatedUser, MaybeUser, LOGIN_PATH};
