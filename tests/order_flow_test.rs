use anyhow::Result;
use httpmock::prelude::*;
use rust_decimal::Decimal;
use smm_panel::core::OrderForm;
use smm_panel::{build_session, LocalStorage, PanelConfig, PanelError};
use tempfile::TempDir;

fn config_for(provider_url: &str, llm_url: &str) -> PanelConfig {
    let toml_content = format!(
        r#"
[provider]
name = "mock-reseller"
api_url = "{}"
api_key = "provider-secret"

[llm]
api_url = "{}"
api_key = "sk-test"
model = "gpt-4"

[[services]]
name = "Instagram Followers"
id = 1020
price_per_1k = 1.50

[[services]]
name = "TikTok Likes"
id = 1030
"#,
        provider_url, llm_url
    );
    PanelConfig::from_toml_str(&toml_content).unwrap()
}

#[tokio::test]
async fn test_successful_order_lands_in_ledger() -> Result<()> {
    let server = MockServer::start();
    let order_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2")
            .body_contains("key=provider-secret")
            .body_contains("action=add")
            .body_contains("service=1020")
            .body_contains("link=user1")
            .body_contains("quantity=500");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"order": "12345"}));
    });

    let config = config_for(&server.url("/api/v2"), &server.url("/v1"));
    let mut session = build_session(&config)?;

    let record = session
        .submit(&OrderForm::new("Instagram Followers", "user1", 500))
        .await?;

    order_mock.assert();
    assert_eq!(record.order_id, "12345");
    assert_eq!(record.quantity, 500);
    assert_eq!(record.cost, Some(Decimal::new(75, 2)));

    let records = session.ledger().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].order_id, "12345");
    assert_eq!(records[0].link, "user1");
    Ok(())
}

#[tokio::test]
async fn test_empty_link_never_reaches_provider() -> Result<()> {
    let server = MockServer::start();
    let order_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v2");
        then.status(200).json_body(serde_json::json!({"order": "1"}));
    });

    let config = config_for(&server.url("/api/v2"), &server.url("/v1"));
    let mut session = build_session(&config)?;

    let err = session
        .submit(&OrderForm::new("Instagram Followers", "", 500))
        .await
        .unwrap_err();

    assert!(matches!(err, PanelError::ValidationError { .. }));
    order_mock.assert_hits(0);
    assert!(session.ledger().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_provider_error_reply_is_not_recorded() -> Result<()> {
    let server = MockServer::start();
    let order_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v2");
        then.status(200)
            .json_body(serde_json::json!({"error": "Not enough funds"}));
    });

    let config = config_for(&server.url("/api/v2"), &server.url("/v1"));
    let mut session = build_session(&config)?;

    let err = session
        .submit(&OrderForm::new("Instagram Followers", "user1", 500))
        .await
        .unwrap_err();

    order_mock.assert_hits(1);
    match err {
        PanelError::ProviderError { response } => {
            assert!(response.contains("Not enough funds"))
        }
        other => panic!("expected ProviderError, got {:?}", other),
    }
    assert!(session.ledger().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() -> Result<()> {
    let config = config_for("http://127.0.0.1:1/api/v2", "http://127.0.0.1:1/v1");
    let mut session = build_session(&config)?;

    let err = session
        .submit(&OrderForm::new("TikTok Likes", "@someone", 100))
        .await
        .unwrap_err();

    assert!(matches!(err, PanelError::TransportError(_)));
    assert!(session.ledger().is_empty());

    let err = session.suggest("likes for my video").await.unwrap_err();
    assert!(matches!(err, PanelError::TransportError(_)));
    Ok(())
}

#[tokio::test]
async fn test_suggestion_is_returned_verbatim() -> Result<()> {
    let server = MockServer::start();
    let llm_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer sk-test")
            .body_contains("User request: I want 1000 followers on Instagram")
            .body_contains("Choose from: ['Instagram Followers', 'TikTok Likes']");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "You need: Instagram Followers"}}]
        }));
    });

    let config = config_for(&server.url("/api/v2"), &server.url("/v1"));
    let session = build_session(&config)?;

    let suggestion = session.suggest("I want 1000 followers on Instagram").await?;

    llm_mock.assert();
    assert_eq!(suggestion, "You need: Instagram Followers");
    assert!(session.ledger().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_export_keeps_insertion_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(POST).path("/api/v2").body_contains("link=first");
        then.status(200).json_body(serde_json::json!({"order": 3001}));
    });
    let failing = server.mock(|when, then| {
        when.method(POST).path("/api/v2").body_contains("link=broke");
        then.status(200)
            .json_body(serde_json::json!({"error": "Incorrect link"}));
    });
    let second = server.mock(|when, then| {
        when.method(POST).path("/api/v2").body_contains("link=second");
        then.status(200).json_body(serde_json::json!({"order": "3002"}));
    });

    let config = config_for(&server.url("/api/v2"), &server.url("/v1"));
    let mut session = build_session(&config)?;

    session
        .submit(&OrderForm::new("Instagram Followers", "first", 1000))
        .await?;
    assert!(session
        .submit(&OrderForm::new("TikTok Likes", "broke", 50))
        .await
        .is_err());
    session
        .submit(&OrderForm::new("TikTok Likes", "second", 50))
        .await?;

    first.assert();
    failing.assert();
    second.assert();

    let storage = LocalStorage::new(output_path.clone());
    let written = session.export_csv(&storage, "orders.csv").await?;
    let again = session.export_csv(&storage, "orders-again.csv").await?;

    let csv_content = std::fs::read_to_string(&written)?;
    assert_eq!(csv_content, std::fs::read_to_string(&again)?);

    let lines: Vec<&str> = csv_content.lines().collect();
    assert_eq!(lines.len(), 3); // Header + 2 records
    assert_eq!(lines[0], "Time,Service,Link,Quantity,Order ID,Cost");
    assert!(lines[1].ends_with(",Instagram Followers,first,1000,3001,1.50"));
    assert!(lines[2].ends_with(",TikTok Likes,second,50,3002,"));
    Ok(())
}
