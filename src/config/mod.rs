#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use toml_config::PanelConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "smm-panel")]
#[command(about = "Place SMM orders and ask a language model which service fits")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Provider order endpoint (overrides [provider].api_url)
    #[arg(long, env = "SMM_API_URL", global = true)]
    pub provider_url: Option<String>,

    /// Provider API key (overrides [provider].api_key)
    #[arg(long, env = "SMM_API_KEY", hide_env_values = true, global = true)]
    pub provider_key: Option<String>,

    /// Chat completions base URL (overrides [llm].api_url)
    #[arg(long, global = true)]
    pub llm_url: Option<String>,

    /// Language model API key (overrides [llm].api_key)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub llm_key: Option<String>,

    /// Model name (overrides [llm].model)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Directory for CSV exports (overrides [export].output_path)
    #[arg(long, global = true)]
    pub output_path: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the service catalog
    Services,

    /// Ask the language model which service matches a request
    Suggest {
        /// Free-text description of what you need
        #[arg(required = true, num_args = 1..)]
        request: Vec<String>,
    },

    /// Place a single order
    Order {
        #[arg(short, long)]
        service: String,

        #[arg(short, long)]
        link: String,

        #[arg(short, long, default_value = "100")]
        quantity: u32,

        /// Write the resulting ledger to this CSV file name
        #[arg(long)]
        export: Option<String>,

        /// Validate and show the request without sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Start an interactive session with its own order history
    Session,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入設定檔後套用命令列覆蓋
    pub fn resolve(&self) -> crate::Result<PanelConfig> {
        let mut config = match &self.config {
            Some(path) => PanelConfig::from_file(path)?,
            None => PanelConfig::default(),
        };

        if let Some(url) = &self.provider_url {
            config.provider.api_url = Some(url.clone());
        }
        if let Some(key) = &self.provider_key {
            config.provider.api_key = Some(key.clone());
        }
        if let Some(url) = &self.llm_url {
            config.llm.api_url = Some(url.clone());
        }
        if let Some(key) = &self.llm_key {
            config.llm.api_key = Some(key.clone());
        }
        if let Some(model) = &self.model {
            config.llm.model = Some(model.clone());
        }
        if let Some(path) = &self.output_path {
            config.export.output_path = Some(path.clone());
        }

        Ok(config)
    }
}
