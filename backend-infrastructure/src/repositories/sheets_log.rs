// Google-Sheets-backed activity log

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::Engine;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use backend_domain::ports::ActivityLogRepository;
use backend_domain::{ActivityRecord, SheetsConfig, LOG_HEADERS};

const SHEETS_SCOPE: &[&str] = &["https://www.googleapis.com/auth/spreadsheets"];
const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct SheetsActivityLog {
    client: Client,
    token_provider: Arc<dyn TokenProvider>,
    base_url: String,
    spreadsheet_id: String,
    worksheet: String,
}

/// Builds the service-account token provider from whichever credential
/// source the config carries: inline base64 JSON or a file path.
pub fn sheets_token_provider(config: &SheetsConfig) -> Result<Arc<dyn TokenProvider>> {
    if let Some(encoded) = &config.credentials_b64 {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .context("google credentials are not valid base64")?;
        let json = String::from_utf8(decoded).context("google credentials are not valid UTF-8")?;
        let account = CustomServiceAccount::from_json(&json)
            .context("google credentials are not a service account key")?;
        return Ok(Arc::new(account));
    }
    if let Some(path) = &config.credentials_path {
        let account = CustomServiceAccount::from_file(path)
            .context("google credentials file is not a service account key")?;
        return Ok(Arc::new(account));
    }
    Err(anyhow!("no google credentials configured"))
}

impl SheetsActivityLog {
    pub fn new(
        config: &SheetsConfig,
        token_provider: Arc<dyn TokenProvider>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            token_provider,
            base_url: SHEETS_BASE_URL.to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            worksheet: config.worksheet.clone(),
        })
    }

    async fn bearer(&self) -> Result<String> {
        let token = self
            .token_provider
            .token(SHEETS_SCOPE)
            .await
            .context("failed to obtain sheets access token")?;
        Ok(token.as_str().to_string())
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/{}/values/{}",
            self.base_url, self.spreadsheet_id, range
        )
    }

    fn data_range(&self) -> String {
        format!("{}!A:D", self.worksheet)
    }

    fn header_range(&self) -> String {
        format!("{}!A1:D1", self.worksheet)
    }

    async fn write_header(&self) -> Result<()> {
        let headers: Vec<String> = LOG_HEADERS.iter().map(ToString::to_string).collect();
        self.client
            .put(self.values_url(&self.header_range()))
            .bearer_auth(self.bearer().await?)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "values": [headers] }))
            .send()
            .await?
            .error_for_status()?;
        info!("header row written to worksheet '{}'", self.worksheet);
        Ok(())
    }

    async fn add_worksheet(&self) -> Result<()> {
        self.client
            .post(format!(
                "{}/{}:batchUpdate",
                self.base_url, self.spreadsheet_id
            ))
            .bearer_auth(self.bearer().await?)
            .json(&json!({
                "requests": [
                    { "addSheet": { "properties": { "title": self.worksheet } } }
                ]
            }))
            .send()
            .await?
            .error_for_status()?;
        info!("worksheet '{}' created", self.worksheet);
        Ok(())
    }
}

#[async_trait]
impl ActivityLogRepository for SheetsActivityLog {
    async fn ensure_header(&self) -> Result<()> {
        let response = self
            .client
            .get(self.values_url(&self.header_range()))
            .bearer_auth(self.bearer().await?)
            .send()
            .await?;
        // Range lookups on a missing worksheet come back as 400.
        if response.status() == StatusCode::BAD_REQUEST {
            self.add_worksheet().await?;
            self.write_header().await?;
            return Ok(());
        }
        let range: ValueRange = response.error_for_status()?.json().await?;
        if range.values.is_empty() {
            self.write_header().await?;
        }
        Ok(())
    }

    async fn append_activity(&self, record: &ActivityRecord) -> Result<()> {
        self.client
            .post(format!("{}:append", self.values_url(&self.data_range())))
            .bearer_auth(self.bearer().await?)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "values": [record.to_row()] }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<ActivityRecord>> {
        let range: ValueRange = self
            .client
            .get(self.values_url(&self.data_range()))
            .bearer_auth(self.bearer().await?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(range
            .values
            .iter()
            .skip(1)
            .map(|row| ActivityRecord::from_row(row))
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .get(self.values_url(&self.header_range()))
            .bearer_auth(self.bearer().await?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}
