use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{
    handlers::admin::{handle_list_users, handle_new_user, handle_show_config},
    http_server::AppState,
    middlewares::jwt_auth,
};

pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/config", get(handle_show_config))
        .route("/admin/users", get(handle_list_users))
        .route("/admin/new_user", post(handle_new_user))
        .layer(middleware::from_fn_with_state(
            state,
            jwt_auth::jwt_admin_auth,
        ))
}
