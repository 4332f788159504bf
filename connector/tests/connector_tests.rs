//! Connection scopes, the health probe and the text summaries, end to end.

mod common;

use asf_connector::AsfConnector;
use common::fixtures::*;
use futures::future::join_all;
use serde_json::json;

#[tokio::test]
async fn test_scope_opens_and_releases_pool() {
    let mock = MockIpcServer::start().await;
    mock.mock_health_text("OK").await;
    mock.mock_json("GET", "/Api/ASF", 200, asf_info()).await;

    let connector = mock.connector();
    assert!(!connector.transport().is_pooled());

    let scope = connector.open().await.unwrap();
    assert!(connector.transport().is_pooled());
    assert_eq!(scope.health()["Success"], true);
    assert_eq!(scope.health()["Message"], "OK");
    scope.asf().get_info().await.unwrap();
    scope.close();
    assert!(!connector.transport().is_pooled());

    let scope = connector.open().await.unwrap();
    drop(scope);
    assert!(!connector.transport().is_pooled());

    assert_eq!(mock.count("/HealthCheck").await, 2);
}

#[tokio::test]
async fn test_calls_work_without_scope() {
    let mock = MockIpcServer::start().await;
    mock.mock_json("GET", "/Api/ASF", 200, asf_info()).await;

    let connector = mock.connector();
    let info = connector.asf().get_info().await.unwrap();

    assert_eq!(info["Result"]["Version"], "6.0.0.0");
    assert!(!connector.transport().is_pooled());
    assert_eq!(mock.count("/HealthCheck").await, 0);
}

#[tokio::test]
async fn test_failing_health_probe_does_not_fail_open() {
    let mock = MockIpcServer::start().await;
    mock.mock_health_status(503).await;

    let connector = mock.connector();
    let scope = connector.open().await.unwrap();

    assert_eq!(scope.health()["Success"], false);
    assert_eq!(scope.health()["StatusCode"], 503);
}

#[tokio::test]
async fn test_health_probe_against_closed_port() {
    let connector = AsfConnector::builder()
        .host("127.0.0.1")
        .port(closed_port())
        .build()
        .unwrap();

    let health = connector.health_check().await;
    assert_eq!(health["Success"], false);
    assert!(!health["Message"].as_str().unwrap().is_empty());

    let scope = connector.open().await.unwrap();
    assert_eq!(scope.health()["Success"], false);
}

#[tokio::test]
async fn test_health_probe_json_forms() {
    let mock = MockIpcServer::start().await;
    mock.mock_json("GET", "/HealthCheck", 200, json!({"status": "Healthy"}))
        .await;

    let health = mock.connector().health_check().await;
    assert_eq!(health["Success"], true);
    assert_eq!(health["Message"], "OK");
    assert_eq!(health["Result"]["status"], "Healthy");
}

#[tokio::test]
async fn test_health_probe_ignores_base_path() {
    let mock = MockIpcServer::start().await;
    mock.mock_health_text("Healthy").await;

    let connector = AsfConnector::builder()
        .host(mock.host.clone())
        .port(mock.port)
        .base_path("/CustomApi")
        .build()
        .unwrap();

    let health = connector.health_check().await;
    assert_eq!(health["Message"], "Healthy");
    assert_eq!(mock.count("/HealthCheck").await, 1);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_scope() {
    let mock = MockIpcServer::start().await;
    mock.mock_health_text("OK").await;
    mock.mock_json("GET", "/Api/ASF", 200, asf_info()).await;
    mock.mock_json("GET", "/Api/Bot/ASF", 200, idle_bot("b1")).await;

    let connector = mock.connector();
    let scope = connector.open().await.unwrap();

    let asf_calls = join_all((0..5).map(|_| scope.asf().get_info())).await;
    let bot_calls = join_all((0..5).map(|_| scope.bot().get_info("ASF"))).await;

    assert!(asf_calls.iter().all(|r| r.is_ok()));
    assert!(bot_calls.iter().all(|r| r.is_ok()));
    assert_eq!(mock.count("/Api/ASF").await, 5);
    assert_eq!(mock.count("/Api/Bot/ASF").await, 5);
}

#[tokio::test]
async fn test_scoped_closes_pool_after_closure() {
    let mock = MockIpcServer::start().await;
    mock.mock_health_text("OK").await;
    mock.mock_json("GET", "/Api/ASF", 200, asf_info()).await;

    let connector = mock.connector();
    let info = connector
        .scoped(|c| async move { c.asf().get_info().await })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(info["Success"], true);
    assert!(!connector.transport().is_pooled());
}

#[tokio::test]
async fn test_legacy_bot_info_and_redeem() {
    let mock = MockIpcServer::start().await;
    mock.mock_json("GET", "/Api/Bot/b1", 200, idle_bot("b1")).await;
    mock.mock_json("POST", "/Api/Bot/b1/Redeem", 200, redeem_ok("b1", "KEY1"))
        .await;
    mock.mock_json("GET", "/Api/Bot/ghost", 404, json!({"Message": "Bot not found"}))
        .await;

    let connector = mock.connector();
    assert_eq!(connector.get_bot_info("b1").await, "Bot b1: Idle.\n");
    assert_eq!(
        connector.bot_redeem("b1", "KEY1").await,
        "Bot b1: \n\t[KEY1] OK/NoDetail\n"
    );
    assert_eq!(
        connector.get_bot_info("ghost").await,
        "Getting bot info failed: Bot not found"
    );
}

#[tokio::test]
async fn test_legacy_send_command() {
    let mock = MockIpcServer::start().await;
    mock.mock_json("POST", "/Api/Command", 200, envelope(json!("<b1> Done!")))
        .await;

    let output = mock.connector().send_command("pause b1").await;
    assert_eq!(output, "<b1> Done!");
}

#[tokio::test]
async fn test_legacy_asf_info_passthrough() {
    let mock = MockIpcServer::start().await;
    mock.mock_json("GET", "/Api/ASF", 200, asf_info()).await;

    let info = mock.connector().get_asf_info().await.unwrap();
    assert_eq!(info, asf_info());
}
