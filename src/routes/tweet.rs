use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{
    handlers::tweet::{handle_rate_limits, handle_tweet_details},
    http_server::AppState,
    middlewares::jwt_auth,
};

pub fn tweet_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/tweet/details", post(handle_tweet_details))
        .route("/tweet/rate_limits", get(handle_rate_limits))
        .layer(middleware::from_fn_with_state(state, jwt_auth::jwt_auth))
}
