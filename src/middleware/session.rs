use axum::{
    extract::{Request, State},
    http::{header::COOKIE, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::api::AppState;

/// Session attached to request extensions once the gate has passed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
}

/// Decides whether a session token is valid.
///
/// Issuing and verifying credentials happens elsewhere; pages only need a
/// yes/no before rendering.
#[async_trait::async_trait]
pub trait SessionGate: Send + Sync {
    async fn session(&self, token: &str) -> Option<Session>;
}

/// Accepts any well-formed UUID token
#[derive(Clone, Debug, Default)]
pub struct CookieSessionGate;

#[async_trait::async_trait]
impl SessionGate for CookieSessionGate {
    async fn session(&self, token: &str) -> Option<Session> {
        Uuid::parse_str(token).ok().map(|id| Session { id })
    }
}

/// Value of cookie `name`, if the request carries it
pub fn session_token(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Middleware that redirects requests without a valid session.
///
/// On success the `Session` is inserted into the request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = match session_token(request.headers(), &state.session_cookie) {
        Some(token) => state.session_gate.session(&token).await,
        None => None,
    };

    match session {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => {
            tracing::debug!(
                uri = %request.uri(),
                redirect = %state.auth_redirect,
                "No session, redirecting"
            );
            Redirect::to(&state.auth_redirect).into_response()
        }
    }
}
