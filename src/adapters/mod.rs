// Adapters layer: concrete implementations of the domain ports (HTTP clients).
// Local file storage lives with the CLI config in src/config/cli.rs.

pub mod http;
pub mod unconfigured;

use crate::core::session::PanelSession;
use crate::core::{CompletionClient, ConfigProvider, OrderGateway};
use crate::utils::error::{PanelError, Result};
use crate::utils::validation::validate_required_field;
use http::{OpenAiChatClient, SmmProviderClient};
use unconfigured::Unconfigured;

pub type DynSession = PanelSession<Box<dyn OrderGateway>, Box<dyn CompletionClient>>;

pub fn provider_client<C: ConfigProvider>(config: &C) -> Result<SmmProviderClient> {
    let endpoint = config.provider_endpoint().map(str::to_string);
    let api_key = config.provider_key().map(str::to_string);

    let endpoint = validate_required_field("provider.api_url", &endpoint)?;
    let api_key = validate_required_field("provider.api_key", &api_key)?;
    SmmProviderClient::with_timeout(
        endpoint.as_str(),
        api_key.as_str(),
        config.provider_timeout_seconds(),
    )
}

pub fn completion_client<C: ConfigProvider>(config: &C) -> Result<OpenAiChatClient> {
    let api_key = config.llm_key().map(str::to_string);
    let api_key = validate_required_field("llm.api_key", &api_key)?;
    OpenAiChatClient::with_timeout(
        config.llm_endpoint(),
        api_key.as_str(),
        config.llm_model(),
        config.llm_timeout_seconds(),
    )
}

/// 建立工作階段；缺少的憑證只會讓對應功能失敗
pub fn build_session<C: ConfigProvider>(config: &C) -> Result<DynSession> {
    let catalog = config.catalog()?;

    let gateway: Box<dyn OrderGateway> = match provider_client(config) {
        Ok(client) => Box::new(client),
        Err(PanelError::MissingConfigError { field }) => {
            tracing::warn!("⚠️ {} not set, ordering is disabled", field);
            Box::new(Unconfigured::new(field))
        }
        Err(e) => return Err(e),
    };

    let completion: Box<dyn CompletionClient> = match completion_client(config) {
        Ok(client) => Box::new(client),
        Err(PanelError::MissingConfigError { field }) => {
            tracing::warn!("⚠️ {} not set, suggestions are disabled", field);
            Box::new(Unconfigured::new(field))
        }
        Err(e) => return Err(e),
    };

    Ok(PanelSession::new(catalog, gateway, completion))
}
