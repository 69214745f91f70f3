use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::{extract::State, http::StatusCode, Form, Json};
use serde::Serialize;

use crate::{
    errors::{AppError, StoreError},
    http_server::AppState,
    models::auth::NewUserForm,
    models::user::{User, UserRecord},
};

const REDACTED: &str = "<redacted>";

/// Configuration as exposed to admins; secret material is redacted.
#[derive(Debug, Serialize)]
pub struct ConfigView {
    pub server: crate::config::ServerConfig,
    pub provider: ProviderView,
    pub data: crate::config::DataConfig,
    pub logging: crate::config::LoggingConfig,
    pub jwt: JwtView,
}

#[derive(Debug, Serialize)]
pub struct ProviderView {
    pub base_url: String,
    pub query_id: String,
    pub bearer_token: &'static str,
    pub auth_token: &'static str,
    pub csrf_token: &'static str,
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct JwtView {
    pub secret: &'static str,
    pub exp_in_hours: i64,
}

/// GET /admin/config
pub async fn handle_show_config(State(state): State<AppState>) -> Json<ConfigView> {
    let config = &state.config;
    Json(ConfigView {
        server: config.server.clone(),
        provider: ProviderView {
            base_url: config.provider.base_url.clone(),
            query_id: config.provider.query_id.clone(),
            bearer_token: REDACTED,
            auth_token: REDACTED,
            csrf_token: REDACTED,
            timeout_seconds: config.provider.timeout_seconds,
        },
        data: config.data.clone(),
        logging: config.logging.clone(),
        jwt: JwtView {
            secret: REDACTED,
            exp_in_hours: config.jwt.exp_in_hours,
        },
    })
}

/// GET /admin/users
pub async fn handle_list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store.list().await)
}

/// POST /admin/new_user
/// Form-encoded, OAuth2 style: username, password, optional space-separated
/// scope stored as the user's groups.
pub async fn handle_new_user(
    State(state): State<AppState>,
    Form(body): Form<NewUserForm>,
) -> Result<(StatusCode, Json<User>), AppError> {
    tracing::info!("Creating user {}", body.username);

    if body.username.is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password must not be empty".to_string(),
        ));
    }

    let record = UserRecord {
        username: body.username,
        groups: body.scope.split_whitespace().map(str::to_string).collect(),
        disabled: false,
        password: hash_password(&body.password)?,
    };

    let user = state.store.add(record).await.map_err(|err| match err {
        StoreError::DuplicateUser(name) => {
            AppError::BadRequest(format!("User {} already exists", name))
        }
        other => AppError::Store(other),
    })?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    // Uses default Argon2id. Must match the login handler's config!
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::Server("Failed hashing password".to_string()))
}
