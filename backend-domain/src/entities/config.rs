// Runtime configuration passed across layers

use chrono_tz::Tz;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub bot_token: String,
    pub webhook_secret: Option<String>,
    pub public_base_url: Option<String>,
    /// All stored timestamps and every "now" reference live in this zone.
    pub timezone: Tz,
    pub poll_timeout_seconds: u64,
    pub request_timeout_seconds: u64,
    pub max_body_bytes: u64,
}

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub worksheet: String,
    pub credentials_b64: Option<String>,
    pub credentials_path: Option<String>,
}
