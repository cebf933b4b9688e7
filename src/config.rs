use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::payments::providers::PaypalConfig;

/// Relay target used by the notify endpoint when `WEBHOOK_URL` is not set
pub const DEFAULT_NOTIFY_WEBHOOK_URL: &str =
    "https://hook.eu2.make.com/b1aiy7t7ciopehqg59o1hmcqvqxzhfzd";

pub const DEFAULT_PRODUCT_DESCRIPTION: &str = "경영컨설팅 보고서 1건";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub paypal: PaypalConfig,
    pub webhook: WebhookConfig,
    pub storage: StorageConfig,
    pub product: ProductConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    /// Directory served for every GET that no API route matches
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Receives completed payments and relayed notifications
    pub url: Option<String>,
    pub notify_fallback_url: String,
}

impl WebhookConfig {
    /// Target of the notify relay: the configured URL, else the fallback
    pub fn notify_url(&self) -> &str {
        self.url.as_deref().unwrap_or(&self.notify_fallback_url)
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub payments_dir: PathBuf,
}

/// The single product sold through checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductConfig {
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            amount: Decimal::new(500, 2),
            currency: "USD".to_string(),
            description: DEFAULT_PRODUCT_DESCRIPTION.to_string(),
        }
    }
}

impl ProductConfig {
    /// Amount as the two-decimal string the provider and the records use
    pub fn amount_value(&self) -> String {
        format!("{:.2}", self.amount)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "public".to_string())
                .into(),
        };

        let paypal = PaypalConfig::from_env().context("Invalid PayPal configuration")?;

        let webhook = WebhookConfig {
            url: env::var("WEBHOOK_URL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            notify_fallback_url: env::var("NOTIFY_FALLBACK_WEBHOOK_URL")
                .unwrap_or_else(|_| DEFAULT_NOTIFY_WEBHOOK_URL.to_string()),
        };

        let storage = StorageConfig {
            payments_dir: env::var("PAYMENTS_DIR")
                .unwrap_or_else(|_| "payments".to_string())
                .into(),
        };

        let defaults = ProductConfig::default();
        let product = ProductConfig {
            amount: match env::var("PRODUCT_AMOUNT") {
                Ok(amount) => Decimal::from_str(amount.trim())
                    .context("PRODUCT_AMOUNT must be a decimal number")?,
                Err(_) => defaults.amount,
            },
            currency: env::var("PRODUCT_CURRENCY").unwrap_or(defaults.currency),
            description: env::var("PRODUCT_DESCRIPTION").unwrap_or(defaults.description),
        };

        let config = Config {
            server,
            paypal,
            webhook,
            storage,
            product,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port < 1024 {
            return Err(anyhow!(
                "Port must be at least 1024, got {}",
                self.server.port
            ));
        }

        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&self.server.environment.as_str()) {
            return Err(anyhow!(
                "Environment must be one of: {:?}, got {}",
                valid_environments,
                self.server.environment
            ));
        }

        if self.paypal.client_id.trim().is_empty() {
            return Err(anyhow!("PAYPAL_CLIENT_ID cannot be empty"));
        }

        if self.paypal.client_secret.trim().is_empty() {
            return Err(anyhow!("PAYPAL_CLIENT_SECRET cannot be empty"));
        }

        if self.paypal.base_url.trim().is_empty() {
            return Err(anyhow!("PAYPAL_BASE_URL cannot be empty"));
        }

        if let Some(url) = &self.webhook.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow!("WEBHOOK_URL must be an http(s) URL, got {}", url));
            }
        }

        if self.product.amount <= Decimal::ZERO {
            return Err(anyhow!(
                "PRODUCT_AMOUNT must be greater than 0, got {}",
                self.product.amount
            ));
        }

        let currency = &self.product.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(anyhow!(
                "PRODUCT_CURRENCY must be a three-letter ISO code, got {}",
                currency
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                environment: "development".to_string(),
                static_dir: "public".into(),
            },
            paypal: PaypalConfig {
                client_id: "client".to_string(),
                client_secret: "secret".to_string(),
                ..Default::default()
            },
            webhook: WebhookConfig {
                url: None,
                notify_fallback_url: DEFAULT_NOTIFY_WEBHOOK_URL.to_string(),
            },
            storage: StorageConfig {
                payments_dir: "payments".into(),
            },
            product: ProductConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_rejects_privileged_port() {
        let mut config = valid_config();
        config.server.port = 80;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_environment() {
        let mut config = valid_config();
        config.server.environment = "qa".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_missing_credentials() {
        let mut config = valid_config();
        config.paypal.client_secret = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_product() {
        let mut config = valid_config();
        config.product.amount = dec!(0);
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.product.currency = "usd".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_http_webhook() {
        let mut config = valid_config();
        config.webhook.url = Some("ftp://example.com/hook".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_notify_url_falls_back() {
        let mut config = valid_config();
        assert_eq!(config.webhook.notify_url(), DEFAULT_NOTIFY_WEBHOOK_URL);

        config.webhook.url = Some("https://hooks.example.com/payments".to_string());
        assert_eq!(config.webhook.notify_url(), "https://hooks.example.com/payments");
    }

    #[test]
    fn test_amount_value_has_two_decimals() {
        assert_eq!(ProductConfig::default().amount_value(), "5.00");

        let product = ProductConfig {
            amount: dec!(12),
            ..Default::default()
        };
        assert_eq!(product.amount_value(), "12.00");
    }
}
