use crate::utils::error::{PanelError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    #[serde(rename = "id")]
    pub service_id: u64,
    /// 每 1000 單位的價格，未定價則為 None
    #[serde(default)]
    pub price_per_1k: Option<Decimal>,
}

impl ServiceEntry {
    pub fn new(name: impl Into<String>, service_id: u64) -> Self {
        Self {
            name: name.into(),
            service_id,
            price_per_1k: None,
        }
    }

    pub fn with_price(mut self, price_per_1k: Decimal) -> Self {
        self.price_per_1k = Some(price_per_1k);
        self
    }
}

/// 啟動時建立的唯讀服務清單
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    entries: Vec<ServiceEntry>,
}

impl ServiceCatalog {
    pub fn new(entries: Vec<ServiceEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(PanelError::InvalidConfigValueError {
                field: "services".to_string(),
                value: "[]".to_string(),
                reason: "Catalog must contain at least one service".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(PanelError::InvalidConfigValueError {
                    field: "services.name".to_string(),
                    value: entry.name.clone(),
                    reason: "Service name cannot be empty".to_string(),
                });
            }
            if !seen.insert(entry.name.to_lowercase()) {
                return Err(PanelError::InvalidConfigValueError {
                    field: "services.name".to_string(),
                    value: entry.name.clone(),
                    reason: "Duplicate service name".to_string(),
                });
            }
            if let Some(price) = entry.price_per_1k {
                if price.is_sign_negative() {
                    return Err(PanelError::InvalidConfigValueError {
                        field: "services.price_per_1k".to_string(),
                        value: price.to_string(),
                        reason: "Price cannot be negative".to_string(),
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    /// 內建的示範清單
    pub fn demo() -> Self {
        Self {
            entries: vec![
                ServiceEntry::new("Instagram Followers", 101),
                ServiceEntry::new("YouTube Views", 102),
                ServiceEntry::new("TikTok Likes", 103),
            ],
        }
    }

    pub fn find(&self, name: &str) -> Option<&ServiceEntry> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|e| e.name == name)
            .or_else(|| self.entries.iter().find(|e| e.name.eq_ignore_ascii_case(name)))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn entries(&self) -> &[ServiceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::demo()
    }
}
