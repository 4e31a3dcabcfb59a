//! Route configuration.

use crate::auth::auth_middleware;
use crate::handlers;
use crate::state::AppState;
use axum::middleware;
use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        // Account creation and login issue the token; nothing to authenticate yet.
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        // Health check (intentionally unauthenticated for load balancers/probes)
        .route("/health", get(handlers::health_check));

    let protected_routes = Router::new()
        .route("/change_password", patch(handlers::change_password))
        .route("/array/create", post(handlers::create_array))
        .route(
            "/array",
            get(handlers::get_array).patch(handlers::patch_array),
        )
        .route("/array/sort/shell", post(handlers::sort_array))
        .route(
            "/requests_history",
            get(handlers::list_history).delete(handlers::clear_history),
        )
        // Auth runs before extractors, so a bad token always answers 401
        // even when the request parameters are malformed.
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
