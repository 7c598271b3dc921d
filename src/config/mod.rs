#[cfg(feature = "cli")]
pub mod cli;

use crate::adapters::{RestRecordStore, WebhookNotifier};
use crate::core::booking::DEFAULT_MAX_PARTY_SIZE;
use crate::core::catalog::Catalog;
use crate::core::responder::{default_rules, ReplyRule, Responder};
use crate::domain::submission::{BookingRecord, ContactRecord, Submission};
use crate::utils::error::{Result, TravelError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "travelco.toml";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: Option<BackendConfig>,
    pub notifications: Option<NotificationConfig>,
    pub catalog: Option<CatalogConfig>,
    pub booking: Option<BookingConfig>,
    pub logging: Option<LoggingConfig>,
    pub chat: Option<ChatConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub timeout_seconds: Option<u64>,
    pub bookings_table: Option<String>,
    pub contact_table: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub flight_webhook_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    pub max_party_size: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub fallback: Option<String>,
    #[serde(default)]
    pub rules: Vec<ReplyRule>,
}

static ENV_VAR_RE: OnceLock<Regex> = OnceLock::new();

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TravelError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 沒有設定檔時只從環境變數取得後端設定
    pub fn from_env() -> Self {
        let backend = match (std::env::var("SUPABASE_URL"), std::env::var("SUPABASE_ANON_KEY")) {
            (Ok(url), Ok(anon_key)) => Some(BackendConfig {
                url,
                anon_key,
                timeout_seconds: None,
                bookings_table: None,
                contact_table: None,
            }),
            _ => None,
        };
        let notifications = std::env::var("FLIGHT_WEBHOOK_URL")
            .ok()
            .map(|url| NotificationConfig {
                flight_webhook_url: Some(url),
                timeout_seconds: None,
            });

        Self {
            backend,
            notifications,
            ..Self::default()
        }
    }

    /// Explicit path must exist; otherwise `travelco.toml` if present, else the environment.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                tracing::debug!("No {} found, reading environment", DEFAULT_CONFIG_FILE);
                Ok(Self::from_env())
            }
        }
    }

    /// 替換環境變數 (例如 ${SUPABASE_ANON_KEY})；未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = ENV_VAR_RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(backend) = &self.backend {
            validate_url("backend.url", &backend.url)?;
            validate_non_empty_string("backend.anon_key", &backend.anon_key)?;
            if let Some(timeout) = backend.timeout_seconds {
                validate_positive_number("backend.timeout_seconds", timeout as usize, 1)?;
            }
            for (field, table) in [
                ("backend.bookings_table", &backend.bookings_table),
                ("backend.contact_table", &backend.contact_table),
            ] {
                if let Some(table) = table {
                    validate_non_empty_string(field, table)?;
                }
            }
        }

        if let Some(url) = self
            .notifications
            .as_ref()
            .and_then(|n| n.flight_webhook_url.as_deref())
        {
            validate_url("notifications.flight_webhook_url", url)?;
        }

        if let Some(path) = self.catalog.as_ref().and_then(|c| c.path.as_deref()) {
            validate_path("catalog.path", path)?;
        }

        if let Some(size) = self.booking.as_ref().and_then(|b| b.max_party_size) {
            validate_range("booking.max_party_size", size, 1, 100)?;
        }

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(TravelError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }

    pub fn backend(&self) -> Result<&BackendConfig> {
        validate_required_field("backend", &self.backend)
    }

    pub fn bookings_table(&self) -> &str {
        self.backend
            .as_ref()
            .and_then(|b| b.bookings_table.as_deref())
            .unwrap_or(BookingRecord::TABLE)
    }

    pub fn contact_table(&self) -> &str {
        self.backend
            .as_ref()
            .and_then(|b| b.contact_table.as_deref())
            .unwrap_or(ContactRecord::TABLE)
    }

    pub fn max_party_size(&self) -> u32 {
        self.booking
            .as_ref()
            .and_then(|b| b.max_party_size)
            .unwrap_or(DEFAULT_MAX_PARTY_SIZE)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    /// 設定檔指定的型錄，否則使用內建型錄
    pub fn load_catalog(&self) -> Result<Catalog> {
        match self.catalog.as_ref().and_then(|c| c.path.as_deref()) {
            Some(path) => Catalog::from_file(path),
            None => Catalog::builtin(),
        }
    }

    pub fn record_store(&self) -> Result<RestRecordStore> {
        let backend = self.backend()?;
        let timeout = backend.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        RestRecordStore::new(&backend.url, &backend.anon_key, Duration::from_secs(timeout))
    }

    pub fn flight_notifier(&self) -> Result<WebhookNotifier> {
        let notifications = validate_required_field("notifications", &self.notifications)?;
        let url = validate_required_field(
            "notifications.flight_webhook_url",
            &notifications.flight_webhook_url,
        )?;
        let timeout = notifications.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        WebhookNotifier::new(url, Duration::from_secs(timeout))
    }

    pub fn responder(&self) -> Responder {
        match &self.chat {
            Some(chat) => {
                let rules = if chat.rules.is_empty() {
                    default_rules()
                } else {
                    chat.rules.clone()
                };
                let responder = Responder::new(rules);
                match &chat.fallback {
                    Some(fallback) => responder.with_fallback(fallback.clone()),
                    None => responder,
                }
            }
            None => Responder::default(),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[backend]
url = "https://abc.supabase.co"
anon_key = "public-anon-key"
timeout_seconds = 5
bookings_table = "trip_bookings"

[notifications]
flight_webhook_url = "https://discord.com/api/webhooks/1/abc"

[booking]
max_party_size = 12

[logging]
level = "debug"
json = true

[[chat.rules]]
keywords = ["visa"]
responses = ["We help with visa paperwork."]
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.bookings_table(), "trip_bookings");
        assert_eq!(config.contact_table(), "contact_messages");
        assert_eq!(config.max_party_size(), 12);
        assert!(config.json_logs());
        assert_eq!(config.responder().rules().len(), 1);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.bookings_table(), "bookings");
        assert_eq!(config.max_party_size(), 10);
        assert_eq!(config.responder().rules().len(), 8);
        assert_eq!(config.load_catalog().unwrap().destinations().len(), 3);
        assert!(matches!(
            config.record_store(),
            Err(TravelError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TRAVELCO_TEST_BACKEND_URL", "https://test.supabase.co");

        let toml_content = r#"
[backend]
url = "${TRAVELCO_TEST_BACKEND_URL}"
anon_key = "${TRAVELCO_TEST_UNSET_KEY}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        let backend = config.backend().unwrap();
        assert_eq!(backend.url, "https://test.supabase.co");
        assert_eq!(backend.anon_key, "${TRAVELCO_TEST_UNSET_KEY}");

        std::env::remove_var("TRAVELCO_TEST_BACKEND_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = r#"
[backend]
url = "not-a-url"
anon_key = "k"
"#;
        assert!(AppConfig::from_toml_str(bad_url).unwrap().validate().is_err());

        let bad_party = r#"
[booking]
max_party_size = 0
"#;
        assert!(AppConfig::from_toml_str(bad_party).unwrap().validate().is_err());

        let bad_level = r#"
[logging]
level = "loud"
"#;
        assert!(AppConfig::from_toml_str(bad_level).unwrap().validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[notifications]\nflight_webhook_url = \"https://hooks.example.com/x\"\n")
            .unwrap();

        let config = AppConfig::load(temp_file.path().to_str()).unwrap();
        assert!(config.flight_notifier().is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(AppConfig::load(Some("/definitely/not/here/travelco.toml")).is_err());
    }
}
