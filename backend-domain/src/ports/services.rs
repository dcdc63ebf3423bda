use async_trait::async_trait;

use crate::services::ChartData;

#[async_trait]
pub trait Responder: Send + Sync {
    /// Sends formatted text (HTML emphasis) to a chat. `show_menu` attaches
    /// the persistent reply keyboard.
    async fn send_text(&self, chat_id: i64, text: &str, show_menu: bool) -> anyhow::Result<()>;
    /// Sends an image attachment with a caption.
    async fn send_attachment(
        &self,
        chat_id: i64,
        caption: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<()>;
    async fn check(&self) -> anyhow::Result<()>;
}

pub trait ChartRenderer: Send + Sync {
    fn render(&self, data: &ChartData) -> anyhow::Result<Vec<u8>>;
}
