use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer};

use crate::auth::{extract_token, AuthError, JwtService};

/// JWT authentication middleware
///
/// Verifies the `Authorization` header and stores the caller's
/// `AuthenticatedUser` in the request extensions.
pub async fn jwt_auth_middleware(
    State(jwt_service): State<JwtService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeaderFormat)?;

    let token = extract_token(auth_header)?;
    let user = jwt_service.authenticate(token)?;

    tracing::debug!(user_id = user.user_id, "request authenticated");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// CORS configuration for browser clients
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Security headers middleware
pub fn security_headers_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    )
}
