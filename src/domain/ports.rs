use crate::utils::error::Result;
use async_trait::async_trait;

/// 後端資料表寫入介面，由呼叫端注入
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts one flat record into `table`.
    async fn insert(&self, table: &str, record: serde_json::Value) -> Result<()>;
}

/// 預約通知 (例如聊天室 webhook)
#[async_trait]
pub trait BookingNotifier: Send + Sync {
    async fn notify(&self, content: &str) -> Result<()>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    async fn insert(&self, table: &str, record: serde_json::Value) -> Result<()> {
        (**self).insert(table, record).await
    }
}
