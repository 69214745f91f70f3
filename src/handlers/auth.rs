use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{extract::State, Form, Json};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::{
    errors::AppError,
    http_server::AppState,
    models::auth::{LoginForm, Token, TokenClaims},
    utils::jwt::get_default_jwt_config,
};

/// POST /token
/// Verifies username/password against the store and issues a bearer token.
pub async fn handle_login(
    State(state): State<AppState>,
    Form(body): Form<LoginForm>,
) -> Result<Json<Token>, AppError> {
    tracing::info!("Handling login for {}", body.username);

    let user = state
        .store
        .find_by_username(&body.username)
        .await
        .ok_or_else(|| AppError::Unauthorized("Incorrect username or password".to_string()))?;

    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|_| AppError::Server("Stored password hash is malformed".to_string()))?;

    Argon2::default()
        .verify_password(body.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized("Incorrect username or password".to_string()))?;

    let (iat, exp) = get_default_jwt_config(&state);
    let claims = TokenClaims {
        sub: user.username,
        iat,
        exp,
    };

    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt.secret.as_ref()),
    )
    .map_err(|_| AppError::Server("Failed generating token".to_string()))?;

    Ok(Json(Token::new(access_token, exp)))
}
