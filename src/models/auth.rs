use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct NewUserForm {
    pub username: String,
    pub password: String,
    /// Space-separated group names, OAuth2 scope style.
    #[serde(default)]
    pub scope: String,
}

#[derive(Debug, Serialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    /// Expiry as epoch milliseconds.
    pub expire: i64,
}

impl Token {
    pub fn new(access_token: String, exp_seconds: usize) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expire: exp_seconds as i64 * 1000,
        }
    }
}
