use crate::domain::model::{OrderRequest, ProviderReply};
use crate::domain::ports::{CompletionClient, OrderGateway};
use crate::utils::error::{PanelError, Result};
use async_trait::async_trait;

/// 缺少憑證時的替身，讓其他功能仍可使用
#[derive(Debug, Clone)]
pub struct Unconfigured {
    field: String,
}

impl Unconfigured {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    fn error(&self) -> PanelError {
        PanelError::MissingConfigError {
            field: self.field.clone(),
        }
    }
}

#[async_trait]
impl OrderGateway for Unconfigured {
    async fn place_order(&self, _request: &OrderRequest) -> Result<ProviderReply> {
        Err(self.error())
    }
}

#[async_trait]
impl CompletionClient for Unconfigured {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(self.error())
    }
}
