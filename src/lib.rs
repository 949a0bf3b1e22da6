pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig, Command};

pub use adapters::{build_session, DynSession};
pub use config::toml_config::PanelConfig;
pub use core::session::PanelSession;
pub use utils::error::{PanelError, Result};
