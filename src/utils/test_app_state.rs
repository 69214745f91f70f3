use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use tempfile::TempDir;

use crate::{
    config::Config,
    http_server::AppState,
    metrics::Metrics,
    models::{auth::TokenClaims, user::UserRecord},
    services::scraper::MockTweetProvider,
    user_store::UserStore,
};

/// Builds an AppState backed by a temp-dir user store and an expectation-free
/// provider mock. The returned TempDir guard must outlive the state.
pub async fn create_test_app_state() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let users_path = dir.path().join("users.json");
    tokio::fs::write(&users_path, "[]")
        .await
        .expect("seed user store");

    let mut config = Config::default();
    config.data.users_path = users_path.to_string_lossy().into_owned();
    config.data.audit_log_path = dir
        .path()
        .join("log/tweets.json")
        .to_string_lossy()
        .into_owned();

    let store = UserStore::load(&config.data.users_path)
        .await
        .expect("load user store");

    let state = AppState {
        store: Arc::new(store),
        provider: Arc::new(MockTweetProvider::new()),
        config: Arc::new(config),
        metrics: Arc::new(Metrics::new()),
    };

    (state, dir)
}

pub async fn create_test_user(
    state: &AppState,
    username: &str,
    password: &str,
    groups: &[&str],
) -> UserRecord {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .expect("hash password")
        .to_string();

    let record = UserRecord {
        username: username.to_string(),
        groups: groups.iter().map(ToString::to_string).collect(),
        disabled: false,
        password: password_hash,
    };

    state
        .store
        .add(record.clone())
        .await
        .expect("persist test user");

    record
}

pub fn generate_test_token(secret: &str, username: &str) -> String {
    let claims = TokenClaims {
        sub: username.to_string(),
        iat: 1,          // Just a valid past timestamp
        exp: 9999999999, // Far future timestamp
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign token")
}
