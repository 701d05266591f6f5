//! Authorization Middleware
//! Mission: Gate protected routes behind bearer-token authentication

use crate::auth::api::AuthState;
use crate::auth::models::User;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The user resolved for the current request, injected into request
/// extensions for the wrapped handler.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware for protected routes.
///
/// Two-step check: the token signature must verify, and the subject must
/// still exist in the repository. Authorization therefore always reflects
/// the current store, not a snapshot at token-issue time: a valid token for
/// a since-deleted user is rejected exactly like a malformed one.
pub async fn require_auth(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    // A missing header degrades to an empty token, which fails signature
    // validation like any other garbage; no special case.
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    let token = header.strip_prefix("Bearer ").unwrap_or(header);

    let claims = state.jwt.parse_token(token).map_err(|_| AuthRejection)?;
    let user = state.users.get(&claims.sub).map_err(|_| AuthRejection)?;

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

/// Uniform rejection: one status, one body, whichever step failed, so the
/// caller cannot distinguish a bad signature from a deleted user.
#[derive(Debug)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, "unauthorized").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request as HttpRequest;

    #[tokio::test]
    async fn test_rejection_response_shape() {
        let response = AuthRejection.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"unauthorized");
    }

    #[test]
    fn test_current_user_extension() {
        let mut req = HttpRequest::new(Body::empty());
        assert!(req.extensions().get::<CurrentUser>().is_none());

        let user = User {
            email: "a@b.com".to_string(),
            password_digest: "digest".to_string(),
            favorite_cake: "citrus".to_string(),
        };
        req.extensions_mut().insert(CurrentUser(user));

        let current = req.extensions().get::<CurrentUser>().unwrap();
        assert_eq!(current.0.email, "a@b.com");
    }
}
