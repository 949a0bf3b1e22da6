use crate::adapters::http::DEFAULT_TIMEOUT_SECONDS;
use crate::core::{ConfigProvider, ServiceCatalog, ServiceEntry};
use crate::utils::error::{PanelError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_LLM_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_EXPORT_FILENAME: &str = "orders.csv";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: Option<String>,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: Option<String>,
    pub filename: Option<String>,
}

impl PanelConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PanelError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置；先解析再替換，環境變數的值不經過 TOML 跳脫規則
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let parse_error = |e: toml::de::Error| PanelError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        };

        let mut table: toml::Table = toml::from_str(content).map_err(parse_error)?;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PanelError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;
        for (_, value) in table.iter_mut() {
            Self::substitute_env_vars(value, &re);
        }

        toml::Value::Table(table).try_into().map_err(parse_error)
    }

    /// 替換字串值中的環境變數 (例如 ${SMM_API_KEY})，未設定的變數換成空字串
    fn substitute_env_vars(value: &mut toml::Value, re: &Regex) {
        match value {
            toml::Value::String(s) => {
                if re.is_match(s) {
                    *s = re
                        .replace_all(s, |caps: &regex::Captures| {
                            std::env::var(&caps[1]).unwrap_or_default()
                        })
                        .into_owned();
                }
            }
            toml::Value::Array(items) => {
                for item in items {
                    Self::substitute_env_vars(item, re);
                }
            }
            toml::Value::Table(table) => {
                for (_, item) in table.iter_mut() {
                    Self::substitute_env_vars(item, re);
                }
            }
            _ => {}
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name.as_deref().unwrap_or("default")
    }

    pub fn export_filename(&self) -> &str {
        self.export
            .filename
            .as_deref()
            .unwrap_or(DEFAULT_EXPORT_FILENAME)
    }
}

/// 空字串視同未設定（環境變數不存在時會被替換成空字串）
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl ConfigProvider for PanelConfig {
    fn provider_endpoint(&self) -> Option<&str> {
        non_empty(&self.provider.api_url)
    }

    fn provider_key(&self) -> Option<&str> {
        non_empty(&self.provider.api_key)
    }

    fn provider_timeout_seconds(&self) -> u64 {
        self.provider
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn llm_endpoint(&self) -> &str {
        non_empty(&self.llm.api_url).unwrap_or(DEFAULT_LLM_ENDPOINT)
    }

    fn llm_timeout_seconds(&self) -> u64 {
        self.llm.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn llm_key(&self) -> Option<&str> {
        non_empty(&self.llm.api_key)
    }

    fn llm_model(&self) -> &str {
        non_empty(&self.llm.model).unwrap_or(DEFAULT_LLM_MODEL)
    }

    fn output_path(&self) -> &str {
        non_empty(&self.export.output_path).unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn catalog(&self) -> Result<ServiceCatalog> {
        if self.services.is_empty() {
            return Ok(ServiceCatalog::demo());
        }
        ServiceCatalog::new(self.services.clone())
    }
}

impl Validate for PanelConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = self.provider_endpoint() {
            validate_url("provider.api_url", url)?;
        }
        validate_url("llm.api_url", self.llm_endpoint())?;
        validate_positive_number("provider.timeout_seconds", self.provider_timeout_seconds(), 1)?;
        validate_positive_number("llm.timeout_seconds", self.llm_timeout_seconds(), 1)?;
        validate_path("export.output_path", self.output_path())?;
        validate_path("export.filename", self.export_filename())?;
        self.catalog()?;
        Ok(())
    }
}
