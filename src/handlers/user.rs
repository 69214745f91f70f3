use axum::{Extension, Json};

use crate::models::user::{User, UserRecord};

/// GET /user/me
pub async fn handle_me(Extension(user): Extension<UserRecord>) -> Json<User> {
    Json(user.public())
}
