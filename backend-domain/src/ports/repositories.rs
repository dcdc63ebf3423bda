use async_trait::async_trait;

use crate::entities::ActivityRecord;

#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// Re-creates the reserved header row when the store lacks one.
    async fn ensure_header(&self) -> anyhow::Result<()>;
    async fn append_activity(&self, record: &ActivityRecord) -> anyhow::Result<()>;
    /// Full snapshot of the log in append order, header row excluded.
    async fn fetch_all(&self) -> anyhow::Result<Vec<ActivityRecord>>;
    async fn ping(&self) -> anyhow::Result<()>;
}
