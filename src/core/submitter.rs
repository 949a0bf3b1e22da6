use crate::core::pricing::estimate_cost;
use crate::domain::catalog::ServiceCatalog;
use crate::domain::ledger::OrderLedger;
use crate::domain::model::{OrderForm, OrderRecord, OrderRequest};
use crate::domain::ports::OrderGateway;
use crate::utils::error::{PanelError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range};
use chrono::Local;
use rust_decimal::Decimal;

pub const MIN_QUANTITY: u32 = 10;
pub const MAX_QUANTITY: u32 = 10_000;

/// 單次下單嘗試的階段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Idle,
    Validating,
    Rejected,
    Sending,
    Recorded,
    ProviderError,
    TransportError,
}

impl SubmissionStage {
    /// 一次嘗試結束時的終止階段
    pub fn outcome_of(result: &Result<OrderRecord>) -> Self {
        match result {
            Ok(_) => SubmissionStage::Recorded,
            Err(PanelError::ValidationError { .. }) => SubmissionStage::Rejected,
            Err(PanelError::ProviderError { .. }) => SubmissionStage::ProviderError,
            Err(_) => SubmissionStage::TransportError,
        }
    }
}

/// 通過檢查、可以送出的訂單
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedOrder {
    pub service: String,
    pub request: OrderRequest,
    pub estimated_cost: Option<Decimal>,
}

pub struct OrderSubmitter<G: OrderGateway> {
    gateway: G,
}

impl<G: OrderGateway> OrderSubmitter<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// 檢查表單並換算成供應商請求，不會發出任何網路請求
    pub fn prepare(&self, catalog: &ServiceCatalog, form: &OrderForm) -> Result<PreparedOrder> {
        let entry = catalog.find(&form.service).ok_or_else(|| {
            PanelError::validation(
                "service",
                format!(
                    "Unknown service '{}'. Choose from: {}",
                    form.service,
                    catalog.names().join(", ")
                ),
            )
        })?;

        validate_non_empty_string("link", &form.link)?;
        validate_range("quantity", form.quantity, MIN_QUANTITY, MAX_QUANTITY)?;

        Ok(PreparedOrder {
            service: entry.name.clone(),
            request: OrderRequest {
                service_id: entry.service_id,
                link: form.link.trim().to_string(),
                quantity: form.quantity,
            },
            estimated_cost: entry.price_per_1k.map(|p| estimate_cost(form.quantity, p)),
        })
    }

    /// 送出訂單；只有回應帶有 `order` 欄位時才寫入帳本
    pub async fn submit(
        &self,
        catalog: &ServiceCatalog,
        ledger: &mut OrderLedger,
        form: &OrderForm,
    ) -> Result<OrderRecord> {
        let result = self.attempt(catalog, ledger, form).await;

        log_stage(SubmissionStage::outcome_of(&result), form);
        match &result {
            Ok(record) => {
                tracing::info!("✅ Order {} recorded ({} in ledger)", record.order_id, ledger.len())
            }
            Err(e @ PanelError::ValidationError { .. }) => {
                tracing::warn!("⚠️ Order rejected before sending: {}", e)
            }
            Err(e) => tracing::error!("❌ Order failed: {}", e),
        }
        log_stage(SubmissionStage::Idle, form);

        result
    }

    async fn attempt(
        &self,
        catalog: &ServiceCatalog,
        ledger: &mut OrderLedger,
        form: &OrderForm,
    ) -> Result<OrderRecord> {
        log_stage(SubmissionStage::Validating, form);
        let prepared = self.prepare(catalog, form)?;

        log_stage(SubmissionStage::Sending, form);
        tracing::info!(
            "📤 Placing order: service={} (id {}), link={}, quantity={}",
            prepared.service,
            prepared.request.service_id,
            prepared.request.link,
            prepared.request.quantity
        );

        let reply = self.gateway.place_order(&prepared.request).await?;
        let Some(order_id) = reply.order_id() else {
            return Err(PanelError::provider(reply.raw));
        };

        let record = ledger.append(OrderRecord {
            timestamp: Local::now(),
            service: prepared.service,
            link: prepared.request.link,
            quantity: prepared.request.quantity,
            order_id,
            cost: prepared.estimated_cost,
        });
        Ok(record.clone())
    }
}

fn log_stage(stage: SubmissionStage, form: &OrderForm) {
    tracing::debug!("Order for '{}' -> {:?}", form.service, stage);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ServiceEntry;
    use crate::domain::model::ProviderReply;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    enum Scripted {
        Body(&'static str),
        Refused,
    }

    #[derive(Clone)]
    struct MockGateway {
        reply: Scripted,
        calls: Arc<Mutex<Vec<OrderRequest>>>,
    }

    impl MockGateway {
        fn new(reply: Scripted) -> Self {
            Self {
                reply,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn calls(&self) -> Vec<OrderRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OrderGateway for MockGateway {
        async fn place_order(&self, request: &OrderRequest) -> Result<ProviderReply> {
            self.calls.lock().unwrap().push(request.clone());
            match &self.reply {
                Scripted::Body(body) => Ok(ProviderReply::from_body(*body)),
                Scripted::Refused => Err(PanelError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
            }
        }
    }

    fn priced_catalog() -> ServiceCatalog {
        ServiceCatalog::new(vec![
            ServiceEntry::new("Instagram Followers", 1020).with_price(Decimal::new(150, 2)),
            ServiceEntry::new("YouTube Views", 1021),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_successful_order_is_recorded() {
        let gateway = MockGateway::new(Scripted::Body(r#"{"order": "12345"}"#));
        let submitter = OrderSubmitter::new(gateway.clone());
        let mut ledger = OrderLedger::new();

        let form = OrderForm::new("Instagram Followers", "user1", 500);
        let record = submitter
            .submit(&priced_catalog(), &mut ledger, &form)
            .await
            .unwrap();

        assert_eq!(record.order_id, "12345");
        assert_eq!(record.quantity, 500);
        assert_eq!(record.cost, Some(Decimal::new(75, 2)));
        assert_eq!(ledger.len(), 1);
        assert_eq!(
            gateway.calls(),
            vec![OrderRequest {
                service_id: 1020,
                link: "user1".to_string(),
                quantity: 500,
            }]
        );
    }

    #[tokio::test]
    async fn test_unpriced_service_has_no_cost() {
        let gateway = MockGateway::new(Scripted::Body(r#"{"order": 42}"#));
        let submitter = OrderSubmitter::new(gateway);
        let mut ledger = OrderLedger::new();

        let form = OrderForm::new("YouTube Views", "https://youtu.be/abc", 1000);
        let record = submitter
            .submit(&priced_catalog(), &mut ledger, &form)
            .await
            .unwrap();

        assert_eq!(record.order_id, "42");
        assert_eq!(record.cost, None);
    }

    #[tokio::test]
    async fn test_empty_link_never_sends() {
        let gateway = MockGateway::new(Scripted::Body(r#"{"order": "1"}"#));
        let submitter = OrderSubmitter::new(gateway.clone());
        let mut ledger = OrderLedger::new();

        for link in ["", "   "] {
            let form = OrderForm::new("Instagram Followers", link, 500);
            let err = submitter
                .submit(&priced_catalog(), &mut ledger, &form)
                .await
                .unwrap_err();
            assert!(matches!(err, PanelError::ValidationError { ref field, .. } if field == "link"));
        }

        assert!(gateway.calls().is_empty());
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_quantity_out_of_range_rejected() {
        let gateway = MockGateway::new(Scripted::Body(r#"{"order": "1"}"#));
        let submitter = OrderSubmitter::new(gateway.clone());
        let mut ledger = OrderLedger::new();

        for quantity in [0, 9, 10_001] {
            let form = OrderForm::new("Instagram Followers", "user1", quantity);
            let err = submitter
                .submit(&priced_catalog(), &mut ledger, &form)
                .await
                .unwrap_err();
            assert!(matches!(err, PanelError::ValidationError { ref field, .. } if field == "quantity"));
        }

        assert!(gateway.calls().is_empty());
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_service_rejected() {
        let gateway = MockGateway::new(Scripted::Body(r#"{"order": "1"}"#));
        let submitter = OrderSubmitter::new(gateway.clone());
        let mut ledger = OrderLedger::new();

        let form = OrderForm::new("Twitter Retweets", "user1", 100);
        let err = submitter
            .submit(&priced_catalog(), &mut ledger, &form)
            .await
            .unwrap_err();

        assert!(matches!(err, PanelError::ValidationError { ref field, .. } if field == "service"));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_not_recorded() {
        let gateway = MockGateway::new(Scripted::Body(r#"{"error": "Not enough funds"}"#));
        let submitter = OrderSubmitter::new(gateway.clone());
        let mut ledger = OrderLedger::new();

        let form = OrderForm::new("Instagram Followers", "user1", 500);
        let err = submitter
            .submit(&priced_catalog(), &mut ledger, &form)
            .await
            .unwrap_err();

        match err {
            PanelError::ProviderError { response } => assert!(response.contains("Not enough funds")),
            other => panic!("expected ProviderError, got {:?}", other),
        }
        assert_eq!(gateway.calls().len(), 1);
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_gateway_failure_not_recorded() {
        let gateway = MockGateway::new(Scripted::Refused);
        let submitter = OrderSubmitter::new(gateway);
        let mut ledger = OrderLedger::new();

        let form = OrderForm::new("Instagram Followers", "user1", 500);
        assert!(submitter
            .submit(&priced_catalog(), &mut ledger, &form)
            .await
            .is_err());
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_every_attempt_ends_in_a_terminal_stage() {
        let catalog = priced_catalog();
        let cases = [
            (Scripted::Body(r#"{"order": "1"}"#), "user1", SubmissionStage::Recorded),
            (Scripted::Body(r#"{"order": "1"}"#), "", SubmissionStage::Rejected),
            (
                Scripted::Body(r#"{"error": "Not enough funds"}"#),
                "user1",
                SubmissionStage::ProviderError,
            ),
            (Scripted::Refused, "user1", SubmissionStage::TransportError),
        ];

        for (reply, link, expected) in cases {
            let submitter = OrderSubmitter::new(MockGateway::new(reply));
            let mut ledger = OrderLedger::new();
            let form = OrderForm::new("Instagram Followers", link, 500);

            let result = submitter.submit(&catalog, &mut ledger, &form).await;

            assert_eq!(SubmissionStage::outcome_of(&result), expected);
            assert_eq!(ledger.len(), usize::from(expected == SubmissionStage::Recorded));
        }
    }

    #[test]
    fn test_prepare_trims_link_and_resolves_name() {
        let submitter = OrderSubmitter::new(MockGateway::new(Scripted::Refused));
        let form = OrderForm::new("instagram followers", "  user1 ", 10);

        let prepared = submitter.prepare(&priced_catalog(), &form).unwrap();

        assert_eq!(prepared.service, "Instagram Followers");
        assert_eq!(prepared.request.link, "user1");
        assert_eq!(prepared.estimated_cost, Some(Decimal::new(2, 2)));
    }
}
