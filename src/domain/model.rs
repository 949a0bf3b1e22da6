use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 使用者在表單上填寫的內容，尚未經過檢查
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderForm {
    pub service: String,
    pub link: String,
    pub quantity: u32,
}

impl OrderForm {
    pub fn new(service: impl Into<String>, link: impl Into<String>, quantity: u32) -> Self {
        Self {
            service: service.into(),
            link: link.into(),
            quantity,
        }
    }
}

/// 送往供應商 API 的下單內容（不含金鑰）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub service_id: u64,
    pub link: String,
    pub quantity: u32,
}

/// 供應商的原始回應
#[derive(Debug, Clone)]
pub struct ProviderReply {
    pub raw: String,
    pub json: Option<serde_json::Value>,
}

impl ProviderReply {
    pub fn from_body(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let json = serde_json::from_str(&raw).ok();
        Self { raw, json }
    }

    /// 回應物件中有 `order` 欄位就算成功，數字或字串皆可
    pub fn order_id(&self) -> Option<String> {
        let value = self.json.as_ref()?.as_object()?.get("order")?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub timestamp: DateTime<Local>,
    pub service: String,
    pub link: String,
    pub quantity: u32,
    pub order_id: String,
    pub cost: Option<Decimal>,
}
