use axum::{routing::post, Router};

use crate::{handlers::auth::handle_login, http_server::AppState};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/token", post(handle_login))
}
