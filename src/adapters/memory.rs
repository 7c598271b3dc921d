use crate::domain::ports::{BookingNotifier, RecordStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 記憶體內的資料表，用於 `--dry-run` 與測試
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    tables: Arc<Mutex<HashMap<String, Vec<serde_json::Value>>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn rows(&self, table: &str) -> Vec<serde_json::Value> {
        let tables = self.tables.lock().await;
        tables.get(table).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, table: &str, record: serde_json::Value) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables.entry(table.to_string()).or_default().push(record);
        tracing::debug!("Stored record in memory table '{}'", table);
        Ok(())
    }
}

/// 收集通知內容而不送出
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    sent: Arc<Mutex<Vec<String>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<String> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl BookingNotifier for MemoryNotifier {
    async fn notify(&self, content: &str) -> Result<()> {
        self.sent.lock().await.push(content.to_string());
        Ok(())
    }
}
