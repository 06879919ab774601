//! Client configuration
//!
//! Configuration is passed explicitly to each client; there are no
//! process-wide toggles.

use crate::{NgPaymentsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default Paystack API base URL
pub const PAYSTACK_BASE_URL: &str = "https://api.paystack.co";

/// Supported payment gateways
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Paystack,
}

impl ProviderKind {
    /// Get the provider identifier string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Paystack => "paystack",
        }
    }

    /// Default API base URL of the provider
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Paystack => PAYSTACK_BASE_URL,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = NgPaymentsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paystack" => Ok(ProviderKind::Paystack),
            other => Err(NgPaymentsError::config(format!(
                "Unsupported payment provider: {}",
                other
            ))),
        }
    }
}

/// Configuration for a payment provider client
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Gateway to talk to
    pub provider: ProviderKind,
    /// Public (publishable) key
    pub public_key: String,
    /// Secret key sent as the bearer credential
    pub secret_key: String,
    /// Application environment name
    pub app_env: String,
    /// API base URL
    pub base_url: String,
    /// Request timeout
    #[serde(with = "timeout_secs")]
    pub timeout: Option<Duration>,
    /// Initial HTTP exception mode
    pub http_exceptions: bool,
    /// Initial transaction exception mode
    pub transaction_exceptions: bool,
}

impl fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("provider", &self.provider)
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .field("app_env", &self.app_env)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("http_exceptions", &self.http_exceptions)
            .field("transaction_exceptions", &self.transaction_exceptions)
            .finish()
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Paystack,
            public_key: String::new(),
            secret_key: String::new(),
            app_env: "production".to_string(),
            base_url: PAYSTACK_BASE_URL.to_string(),
            timeout: None,
            http_exceptions: false,
            transaction_exceptions: true,
        }
    }
}

impl PaymentConfig {
    /// Create a new config with default settings
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: PaymentConfig = serde_json::from_str(&content)
            .map_err(|e| NgPaymentsError::config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(provider) = lookup("NG_PAYMENT_PROVIDER") {
            config.provider = provider.parse()?;
            config.base_url = config.provider.default_base_url().to_string();
        }

        if let Some(public_key) = lookup("PAYSTACK_PUBLIC_KEY") {
            config.public_key = public_key;
        }

        if let Some(secret_key) = lookup("PAYSTACK_SECRET_KEY") {
            config.secret_key = secret_key;
        }

        if let Some(base_url) = lookup("PAYSTACK_BASE_URL") {
            config.base_url = base_url;
        }

        if let Some(app_env) = lookup("APP_ENV") {
            config.app_env = app_env;
        }

        if let Some(timeout) = lookup("NG_PAYMENT_TIMEOUT_SECS") {
            let secs: u64 = timeout.parse().map_err(|e| {
                NgPaymentsError::config(format!("Invalid NG_PAYMENT_TIMEOUT_SECS: {}", e))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Some(enabled) = lookup("NG_PAYMENT_HTTP_EXCEPTIONS") {
            config.http_exceptions = parse_flag("NG_PAYMENT_HTTP_EXCEPTIONS", &enabled)?;
        }

        if let Some(enabled) = lookup("NG_PAYMENT_TRANSACTION_EXCEPTIONS") {
            config.transaction_exceptions =
                parse_flag("NG_PAYMENT_TRANSACTION_EXCEPTIONS", &enabled)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.secret_key.is_empty() {
            return Err(NgPaymentsError::config("Secret key is required"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(NgPaymentsError::config(
                "Base URL must start with http:// or https://",
            ));
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| NgPaymentsError::config(format!("Invalid base URL: {}", e)))?;

        Ok(())
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the application environment
    pub fn with_app_env(mut self, app_env: impl Into<String>) -> Self {
        self.app_env = app_env.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the initial HTTP exception mode
    pub fn with_http_exceptions(mut self, enabled: bool) -> Self {
        self.http_exceptions = enabled;
        self
    }

    /// Set the initial transaction exception mode
    pub fn with_transaction_exceptions(mut self, enabled: bool) -> Self {
        self.transaction_exceptions = enabled;
        self
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(NgPaymentsError::config(format!("Invalid {}: {}", name, other))),
    }
}

mod timeout_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        timeout: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match timeout {
            Some(timeout) => serializer.serialize_some(&timeout.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}
