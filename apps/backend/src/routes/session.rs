//! Review session middleware

use axum::{body::Body, extract::Request, middleware::Next, response::Response};

use crate::error::{ApiError, Result};
use crate::services::sessions::DEFAULT_SESSION;

/// Header carrying the client's session id
pub const SESSION_HEADER: &str = "x-session-id";

const MAX_SESSION_ID_LEN: usize = 128;

/// Session id stored in request extensions
#[derive(Clone, Debug)]
pub struct ReviewSession {
    pub id: String,
}

/// Session middleware - extracts the session id from the `x-session-id` header
pub async fn session_middleware(mut request: Request<Body>, next: Next) -> Result<Response> {
    let id = match request.headers().get(SESSION_HEADER) {
        Some(value) => {
            let value = value
                .to_str()
                .map_err(|_| ApiError::BadRequest("Invalid x-session-id header".to_string()))?
                .trim();
            if value.len() > MAX_SESSION_ID_LEN {
                return Err(ApiError::BadRequest("x-session-id is too long".to_string()));
            }
            if value.is_empty() {
                DEFAULT_SESSION.to_string()
            } else {
                value.to_string()
            }
        }
        None => DEFAULT_SESSION.to_string(),
    };

    request.extensions_mut().insert(ReviewSession { id });

    Ok(next.run(request).await)
}
