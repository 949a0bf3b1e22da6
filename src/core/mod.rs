pub mod pricing;
pub mod session;
pub mod submitter;
pub mod suggestion;

pub use crate::domain::catalog::{ServiceCatalog, ServiceEntry};
pub use crate::domain::ledger::OrderLedger;
pub use crate::domain::model::{OrderForm, OrderRecord, OrderRequest, ProviderReply};
pub use crate::domain::ports::{CompletionClient, ConfigProvider, OrderGateway, Storage};
pub use crate::utils::error::Result;
