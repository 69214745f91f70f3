use axum::{handler::Handler, middleware, routing::get, Router};

use crate::{handlers::user::handle_me, http_server::AppState, middlewares::jwt_auth};

pub fn user_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        "/user/me",
        get(handle_me.layer(middleware::from_fn_with_state(state, jwt_auth::jwt_auth))),
    )
}
