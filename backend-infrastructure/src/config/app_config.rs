use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{RuntimeConfig, SheetsConfig};

use crate::config::validation::{validate_timezone, validate_worksheet_title};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub bot_token: String,
    pub webhook_secret: Option<String>,
    pub public_base_url: Option<String>,
    pub spreadsheet_id: String,
    pub worksheet: String,
    pub google_credentials_b64: Option<String>,
    pub google_credentials_path: Option<String>,
    pub timezone: String,
    pub poll_timeout_seconds: u64,
    pub request_timeout_seconds: u64,
    pub max_body_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            api_token: None,
            bot_token: String::new(),
            webhook_secret: None,
            public_base_url: None,
            spreadsheet_id: String::new(),
            worksheet: "BabyLog".to_string(),
            google_credentials_b64: None,
            google_credentials_path: None,
            timezone: "Asia/Kolkata".to_string(),
            poll_timeout_seconds: 30,
            request_timeout_seconds: 15,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("SPROUT_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        if let Some(secret) = &self.webhook_secret {
            if secret.trim().is_empty() {
                self.webhook_secret = None;
            }
        }
        if let Some(encoded) = &self.google_credentials_b64 {
            if encoded.trim().is_empty() {
                self.google_credentials_b64 = None;
            }
        }
        if let Some(path) = &self.google_credentials_path {
            if path.trim().is_empty() {
                self.google_credentials_path = None;
            }
        }
        if let Some(url) = &self.public_base_url {
            let trimmed = url.trim().trim_end_matches('/');
            self.public_base_url = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            };
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.bot_token.trim().is_empty() {
            return Err(anyhow!("bot_token must not be empty"));
        }
        if self.spreadsheet_id.trim().is_empty() {
            return Err(anyhow!("spreadsheet_id must not be empty"));
        }
        validate_worksheet_title(&self.worksheet)?;
        validate_timezone(&self.timezone)?;
        if self.google_credentials_b64.is_none() && self.google_credentials_path.is_none() {
            return Err(anyhow!(
                "one of google_credentials_b64 or google_credentials_path must be set"
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> Result<RuntimeConfig> {
        let timezone = self
            .timezone
            .parse()
            .map_err(|_| anyhow!("unknown timezone '{}'", self.timezone))?;
        Ok(RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            bot_token: self.bot_token.clone(),
            webhook_secret: self.webhook_secret.clone(),
            public_base_url: self.public_base_url.clone(),
            timezone,
            poll_timeout_seconds: self.poll_timeout_seconds,
            request_timeout_seconds: self.request_timeout_seconds,
            max_body_bytes: self.max_body_bytes,
        })
    }

    pub fn to_sheets_config(&self) -> SheetsConfig {
        SheetsConfig {
            spreadsheet_id: self.spreadsheet_id.clone(),
            worksheet: self.worksheet.clone(),
            credentials_b64: self.google_credentials_b64.clone(),
            credentials_path: self.google_credentials_path.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("SPROUT_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("SPROUT_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("SPROUT_BOT_TOKEN") {
            self.bot_token = value;
        }
        if let Ok(value) = env::var("SPROUT_WEBHOOK_SECRET") {
            self.webhook_secret = Some(value);
        }
        if let Ok(value) = env::var("SPROUT_PUBLIC_BASE_URL") {
            self.public_base_url = Some(value);
        }
        if let Ok(value) = env::var("SPROUT_SPREADSHEET_ID") {
            self.spreadsheet_id = value;
        }
        if let Ok(value) = env::var("SPROUT_WORKSHEET") {
            self.worksheet = value;
        }
        if let Ok(value) = env::var("SPROUT_GOOGLE_CREDENTIALS_B64") {
            self.google_credentials_b64 = Some(value);
        }
        if let Ok(value) = env::var("SPROUT_GOOGLE_CREDENTIALS_PATH") {
            self.google_credentials_path = Some(value);
        }
        if let Ok(value) = env::var("SPROUT_TIMEZONE") {
            self.timezone = value;
        }
        if let Ok(value) = env::var("SPROUT_POLL_TIMEOUT_SECONDS") {
            self.poll_timeout_seconds = value.parse().unwrap_or(self.poll_timeout_seconds);
        }
        if let Ok(value) = env::var("SPROUT_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("SPROUT_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
    }
}
