// Telegram update payloads, reduced to the fields the bot reads

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUpdate {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramMessage {
    pub chat: TelegramChat,
    #[serde(default)]
    pub from: Option<TelegramUser>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

impl TelegramMessage {
    /// Reporting identity carried into the log: the username when set,
    /// otherwise the numeric id.
    pub fn reporter_id(&self) -> String {
        match &self.from {
            Some(user) => user
                .username
                .clone()
                .unwrap_or_else(|| user.id.to_string()),
            None => "unknown".to_string(),
        }
    }
}
