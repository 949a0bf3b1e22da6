use crate::core::submitter::{OrderSubmitter, PreparedOrder};
use crate::core::suggestion::SuggestionRequester;
use crate::domain::catalog::ServiceCatalog;
use crate::domain::ledger::OrderLedger;
use crate::domain::model::{OrderForm, OrderRecord};
use crate::domain::ports::{CompletionClient, OrderGateway, Storage};
use crate::utils::error::Result;

/// 一個使用者工作階段：目錄、兩個外部呼叫與本階段的帳本
pub struct PanelSession<G: OrderGateway, C: CompletionClient> {
    catalog: ServiceCatalog,
    submitter: OrderSubmitter<G>,
    requester: SuggestionRequester<C>,
    ledger: OrderLedger,
}

impl<G: OrderGateway, C: CompletionClient> PanelSession<G, C> {
    pub fn new(catalog: ServiceCatalog, gateway: G, completion: C) -> Self {
        Self {
            catalog,
            submitter: OrderSubmitter::new(gateway),
            requester: SuggestionRequester::new(completion),
            ledger: OrderLedger::new(),
        }
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    pub async fn suggest(&self, user_input: &str) -> Result<String> {
        self.requester.suggest(&self.catalog, user_input).await
    }

    pub fn prepare(&self, form: &OrderForm) -> Result<PreparedOrder> {
        self.submitter.prepare(&self.catalog, form)
    }

    pub async fn submit(&mut self, form: &OrderForm) -> Result<OrderRecord> {
        self.submitter
            .submit(&self.catalog, &mut self.ledger, form)
            .await
    }

    pub async fn export_csv<S: Storage>(&self, storage: &S, filename: &str) -> Result<String> {
        self.ledger.export_csv(storage, filename).await
    }
}
