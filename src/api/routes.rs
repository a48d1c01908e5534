use axum::{routing::get, Router};
use tower::Layer;
use tower_http::{
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use super::health::health_check;
use super::trainer::trainer_routes;
use crate::auth::{cors_layer, security_headers_layer, JwtService};
use crate::services::TrainerService;

pub fn create_routes(trainer_service: TrainerService, jwt_service: JwtService) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/trainer", trainer_routes(trainer_service, jwt_service))
        .layer(TraceLayer::new_for_http())
        .layer(security_headers_layer())
        .layer(cors_layer())
}

/// Full application service: the router behind trailing-slash normalization
///
/// Normalization has to wrap the router from the outside, since layers added
/// with `Router::layer` run after routing.
pub fn create_app(trainer_service: TrainerService, jwt_service: JwtService) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_routes(trainer_service, jwt_service))
}
