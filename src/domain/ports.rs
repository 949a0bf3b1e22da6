use crate::domain::catalog::ServiceCatalog;
use crate::domain::model::{OrderRequest, ProviderReply};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn provider_endpoint(&self) -> Option<&str>;
    fn provider_key(&self) -> Option<&str>;
    fn provider_timeout_seconds(&self) -> u64;
    fn llm_endpoint(&self) -> &str;
    fn llm_key(&self) -> Option<&str>;
    fn llm_timeout_seconds(&self) -> u64;
    fn llm_model(&self) -> &str;
    fn output_path(&self) -> &str;
    fn catalog(&self) -> Result<ServiceCatalog>;
}

/// 供應商下單介面；只負責傳輸，不判斷成功與否
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn place_order(&self, request: &OrderRequest) -> Result<ProviderReply>;
}

/// 語言模型補全介面，回傳第一個補全的文字
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl<T: OrderGateway + ?Sized> OrderGateway for Box<T> {
    async fn place_order(&self, request: &OrderRequest) -> Result<ProviderReply> {
        (**self).place_order(request).await
    }
}

#[async_trait]
impl<T: CompletionClient + ?Sized> CompletionClient for Box<T> {
    async fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt).await
    }
}
