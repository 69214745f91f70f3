use axum::Router;

use crate::http_server::AppState;
use crate::routes::{
    admin::admin_routes, auth::auth_routes, tweet::tweet_routes, user::user_routes,
};

pub mod admin;
pub mod auth;
pub mod tweet;
pub mod user;

pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes(state.clone()))
        .merge(admin_routes(state.clone()))
        .merge(tweet_routes(state))
}
