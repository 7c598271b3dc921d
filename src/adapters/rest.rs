use crate::domain::ports::RecordStore;
use crate::utils::error::{Result, TravelError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 託管後端 (PostgREST 相容) 的資料表寫入
#[derive(Debug, Clone)]
pub struct RestRecordStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestRecordStore {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

#[async_trait]
impl RecordStore for RestRecordStore {
    async fn insert(&self, table: &str, record: serde_json::Value) -> Result<()> {
        let url = self.table_url(table);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(&serde_json::Value::Array(vec![record]))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Backend response status: {}", status);
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(TravelError::Submission {
            status: status.as_u16(),
            message: backend_message(&body),
        })
    }
}

/// 後端錯誤通常是 `{"message": "..."}`；否則原樣回傳內容
fn backend_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Failed to submit. Please try again.".to_string()
            } else {
                body.trim().to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn store(server: &MockServer) -> RestRecordStore {
        RestRecordStore::new(&server.base_url(), "anon-key", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_insert_posts_array_with_auth_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/rest/v1/bookings")
                .header("apikey", "anon-key")
                .header("authorization", "Bearer anon-key")
                .header("prefer", "return=minimal")
                .json_body(serde_json::json!([{"name": "Jane"}]));
            then.status(201);
        });

        store(&server)
            .insert("bookings", serde_json::json!({"name": "Jane"}))
            .await
            .unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_backend_error_message_is_verbatim() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/rest/v1/contact_messages");
            then.status(400).json_body(serde_json::json!({
                "code": "23502",
                "message": "null value in column \"email\" violates not-null constraint"
            }));
        });

        let err = store(&server)
            .insert("contact_messages", serde_json::json!({}))
            .await
            .unwrap_err();

        mock.assert();
        match err {
            TravelError::Submission { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(
                    message,
                    "null value in column \"email\" violates not-null constraint"
                );
            }
            other => panic!("expected submission error, got {:?}", other),
        }
    }

    #[test]
    fn test_backend_message_fallbacks() {
        assert_eq!(backend_message("gateway timeout"), "gateway timeout");
        assert_eq!(backend_message(""), "Failed to submit. Please try again.");
        assert_eq!(backend_message(r#"{"error": "x"}"#), r#"{"error": "x"}"#);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let store =
            RestRecordStore::new("https://abc.supabase.co/", "k", Duration::from_secs(1)).unwrap();
        assert_eq!(
            store.table_url("bookings"),
            "https://abc.supabase.co/rest/v1/bookings"
        );
    }
}
