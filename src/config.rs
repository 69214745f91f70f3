use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    /// GraphQL query id for the tweet lookup operation; rotates upstream.
    pub query_id: String,
    pub bearer_token: String,
    pub auth_token: String,
    pub csrf_token: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub users_path: String,
    pub audit_log_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub exp_in_hours: i64,
}

impl Config {
    pub fn load(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::new(config_path, config::FileFormat::Toml))
            .add_source(config::Environment::with_prefix("TWEETGATE"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn get_jwt_expiration(&self) -> chrono::Duration {
        chrono::Duration::hours(self.jwt.exp_in_hours)
    }

    pub fn get_provider_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.provider.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                cors_origin: "https://twitter.com".to_string(),
            },
            provider: ProviderConfig {
                base_url: "https://twitter.com/i/api".to_string(),
                query_id: "V3vfsYzNEyD9tsf4xoFRgw".to_string(),
                bearer_token: "change-me".to_string(),
                auth_token: "change-me".to_string(),
                csrf_token: "change-me".to_string(),
                timeout_seconds: 30,
            },
            data: DataConfig {
                users_path: "conf/users.json".to_string(),
                audit_log_path: "log/tweets.json".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            jwt: JwtConfig {
                secret: "Change-in-production".to_string(),
                exp_in_hours: 24,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_address_formatting() {
        let config = Config::default();
        assert_eq!(config.get_server_address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_jwt_expiration_uses_configured_hours() {
        let mut config = Config::default();
        config.jwt.exp_in_hours = 2;
        assert_eq!(config.get_jwt_expiration(), chrono::Duration::hours(2));
    }
}
