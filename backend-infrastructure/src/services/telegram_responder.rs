// Telegram Bot API responder

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use backend_domain::ports::Responder;

const TELEGRAM_BASE_URL: &str = "https://api.telegram.org";

pub struct TelegramResponder {
    client: Client,
    base_url: String,
    token: String,
}

impl TelegramResponder {
    pub fn new(token: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: TELEGRAM_BASE_URL.to_string(),
            token: token.to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call(&self, method: &str, payload: Value) -> Result<()> {
        self.client
            .post(self.method_url(method))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// The persistent reply keyboard shown under the input box.
    fn main_keyboard() -> Value {
        json!({
            "keyboard": [
                [{"text": "Poop"}, {"text": "Pee"}],
                [{"text": "Feed"}, {"text": "Medication"}],
                [{"text": "Vitamin D"}],
                [{"text": "Summary"}, {"text": "Cold Start"}],
                [{"text": "Help"}]
            ],
            "resize_keyboard": true,
            "one_time_keyboard": false
        })
    }

    pub async fn set_webhook(&self, url: &str, secret: Option<&str>) -> Result<()> {
        let mut payload = json!({ "url": url });
        if let Some(secret) = secret {
            payload["secret_token"] = json!(secret);
        }
        self.call("setWebhook", payload).await?;
        info!("webhook registered at {}", url);
        Ok(())
    }

    pub async fn delete_webhook(&self) -> Result<()> {
        self.call("deleteWebhook", json!({})).await
    }

    /// Long-polls for updates. The per-request timeout is stretched past the
    /// poll window so the server-side wait does not trip the client timeout.
    pub async fn get_updates(&self, offset: i64, poll_timeout_seconds: u64) -> Result<Vec<Value>> {
        let response: Value = self
            .client
            .post(self.method_url("getUpdates"))
            .timeout(Duration::from_secs(poll_timeout_seconds + 10))
            .json(&json!({ "offset": offset, "timeout": poll_timeout_seconds }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response
            .get("result")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl Responder for TelegramResponder {
    async fn send_text(&self, chat_id: i64, text: &str, show_menu: bool) -> Result<()> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
        });
        if show_menu {
            payload["reply_markup"] = Self::main_keyboard();
        }
        self.call("sendMessage", payload).await
    }

    async fn send_attachment(
        &self,
        chat_id: i64,
        caption: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("image/svg+xml")?;
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part("document", part);
        self.client
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn check(&self) -> Result<()> {
        self.client
            .get(self.method_url("getMe"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_urls_embed_the_token() {
        let responder =
            TelegramResponder::new("123:abc", Duration::from_secs(5)).expect("responder");
        assert_eq!(
            responder.method_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn keyboard_lists_every_button_once() {
        let keyboard = TelegramResponder::main_keyboard();
        let rows = keyboard["keyboard"].as_array().expect("rows");
        let buttons: Vec<&str> = rows
            .iter()
            .flat_map(|row| row.as_array().expect("row").iter())
            .map(|button| button["text"].as_str().expect("text"))
            .collect();
        assert_eq!(
            buttons,
            vec![
                "Poop",
                "Pee",
                "Feed",
                "Medication",
                "Vitamin D",
                "Summary",
                "Cold Start",
                "Help"
            ]
        );
        assert_eq!(keyboard["resize_keyboard"], json!(true));
    }
}
