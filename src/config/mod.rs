use crate::utils::error::Result;
use crate::utils::validation::{validate_endpoint, validate_non_blank, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "deferred-fetch.toml";
pub const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/api/rest_v1/page/related";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub deferred: DeferredConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// 標題會被接在這個路徑後面
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    /// 預設不檢查狀態碼，非 2xx 的 body 也照樣解析
    pub require_success_status: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: None,
            user_agent: None,
            require_success_status: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeferredConfig {
    pub delay_ms: u64,
}

impl Default for DeferredConfig {
    fn default() -> Self {
        Self { delay_ms: 1000 }
    }
}

impl DeferredConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，沒寫的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 檔案不存在時使用預設配置
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            tracing::debug!("Loading config from {}", path.as_ref().display());
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

impl Validate for FetchConfig {
    fn validate(&self) -> Result<()> {
        validate_endpoint("fetch.endpoint", &self.endpoint)?;

        if let Some(timeout) = self.timeout_seconds {
            validate_range("fetch.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(user_agent) = &self.user_agent {
            validate_non_blank("fetch.user_agent", user_agent)?;
        }

        Ok(())
    }
}

impl Validate for DeferredConfig {
    fn validate(&self) -> Result<()> {
        validate_range("deferred.delay_ms", self.delay_ms, 0, 60_000)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.fetch.validate()?;
        self.deferred.validate()
    }
}
