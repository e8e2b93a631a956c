pub mod health;
pub mod send_email;
pub mod send_invitation;

use axum::middleware;
use axum::routing::post;
use axum::Router;

use crate::auth::require_function_secret;
use crate::state::AppState;

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/functions/v1", function_routes(state.clone()))
        .merge(health::health_routes())
        .with_state(state)
}

/// Function routes, behind the shared-secret check
fn function_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/send-email", post(send_email::send_email))
        .route(
            "/send-invitation-email",
            post(send_invitation::send_invitation_email),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            require_function_secret,
        ))
}
