use chrono::{Duration, Utc};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_PAYPAL_API_BASE: &str = "https://api-m.sandbox.paypal.com";
const DEFAULT_PURCHASE_PENDING_TTL_MINUTES: i64 = 60;

pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub bind_address: String,

    pub oauth_client_id: String,
    pub oauth_client_secret: String,
    pub oauth_redirect_url: String,
    pub oauth_auth_url: String,
    pub oauth_token_url: String,
    pub oauth_userinfo_url: String,

    pub paypal_client_id: String,
    pub paypal_client_secret: String,
    pub paypal_webhook_id: String,
    pub paypal_api_base: String,

    /// Minutes a purchase may stay pending before the expiry job cancels it.
    pub purchase_pending_ttl_minutes: i64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(AppError::ConfigErr(MissingEnvVar))` - A required variable is not set
    /// - `Err(AppError::ConfigErr(InvalidEnvVar))` - A numeric variable failed to parse
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            app_url: required("APP_URL")?.trim_end_matches('/').to_string(),
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            oauth_client_id: required("OAUTH_CLIENT_ID")?,
            oauth_client_secret: required("OAUTH_CLIENT_SECRET")?,
            oauth_redirect_url: required("OAUTH_REDIRECT_URL")?,
            oauth_auth_url: required("OAUTH_AUTH_URL")?,
            oauth_token_url: required("OAUTH_TOKEN_URL")?,
            oauth_userinfo_url: required("OAUTH_USERINFO_URL")?,
            paypal_client_id: required("PAYPAL_CLIENT_ID")?,
            paypal_client_secret: required("PAYPAL_CLIENT_SECRET")?,
            paypal_webhook_id: required("PAYPAL_WEBHOOK_ID")?,
            paypal_api_base: optional("PAYPAL_API_BASE")
                .unwrap_or_else(|| DEFAULT_PAYPAL_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            purchase_pending_ttl_minutes: match optional("PURCHASE_PENDING_TTL_MINUTES") {
                Some(value) => parse_positive_minutes("PURCHASE_PENDING_TTL_MINUTES", &value)?,
                None => DEFAULT_PURCHASE_PENDING_TTL_MINUTES,
            },
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Parses a positive number of minutes that can be subtracted from the current time.
fn parse_positive_minutes(name: &str, value: &str) -> Result<i64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason,
    };

    let minutes = value.parse::<i64>().map_err(|e| invalid(e.to_string()))?;
    if minutes <= 0 {
        return Err(invalid("must be greater than zero".to_string()));
    }

    Duration::try_minutes(minutes)
        .and_then(|duration| Utc::now().checked_sub_signed(duration))
        .ok_or_else(|| invalid("too large".to_string()))?;

    Ok(minutes)
}
