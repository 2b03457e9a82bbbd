use anyhow::Result;
use httpmock::prelude::*;
use lga_revenue_sdk::{
    ApiConfig, ApplicationPayload, PeriodicUnit, RequestOptions, Sdk, SdkError,
};
use serde_json::json;

/// 建立回傳固定服務表的 mock server
async fn server_with_map() -> MockServer {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/revenue/core/services-map/");
            then.status(200).json_body(json!({
                "services": [
                    { "slug": "birth_certificate", "path": "birth-certificate-applications" },
                    { "slug": "hawking_permit", "path": "hawking-permits", "is_periodic": true }
                ]
            }));
        })
        .await;
    server
}

fn sdk_for(server: &MockServer) -> Sdk {
    Sdk::isolated(&ApiConfig::new(server.base_url()).with_bearer_token("staff-token")).unwrap()
}

#[tokio::test]
async fn test_create_posts_payload_to_resolved_path() -> Result<()> {
    let server = server_with_map().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/revenue/hawking-permits/")
                .header("authorization", "Bearer staff-token")
                .json_body(json!({
                    "payment_reference": "PAY-123",
                    "lga": 4,
                    "billing_unit": "month",
                    "billing_count": 6,
                    "holder_id": 77
                }));
            then.status(201).json_body(json!({ "id": 10, "status": "pending" }));
        })
        .await;

    let sdk = sdk_for(&server);
    let payload = ApplicationPayload::new("PAY-123")
        .with_lga(4)
        .with_billing(PeriodicUnit::Month, 6)
        .with_field("holder_id", json!(77));

    let created = sdk.revenue.create("hawking_permit", &payload, None).await?;

    assert_eq!(created["id"], 10);
    create.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_list_sends_query_params() -> Result<()> {
    let server = server_with_map().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/revenue/birth-certificate-applications/")
                .query_param("status", "approved")
                .query_param("page", "2");
            then.status(200).json_body(json!({ "count": 1, "results": [{ "id": 3 }] }));
        })
        .await;

    let sdk = sdk_for(&server);
    let body = sdk
        .revenue
        .list(
            "birth_certificate",
            &[("status", "approved"), ("page", "2")],
            None,
        )
        .await?;

    assert_eq!(body["count"], 1);
    list.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_retrieve_unknown_slug_uses_default_path() -> Result<()> {
    let server = server_with_map().await;
    let retrieve = server
        .mock_async(|when, then| {
            when.method(GET).path("/revenue/sales-taxs/15/");
            then.status(200).json_body(json!({ "id": 15 }));
        })
        .await;

    let sdk = sdk_for(&server);
    let body = sdk.revenue.retrieve("sales_tax", 15, None).await?;

    assert_eq!(body["id"], 15);
    retrieve.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_approve_defaults_to_empty_body() -> Result<()> {
    let server = server_with_map().await;
    let approve = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/revenue/birth-certificate-applications/8/approve/")
                .json_body(json!({}));
            then.status(200).json_body(json!({ "status": "approved" }));
        })
        .await;

    let sdk = sdk_for(&server);
    let body = sdk
        .revenue
        .approve("birth_certificate", 8, None, None)
        .await?;

    assert_eq!(body["status"], "approved");
    approve.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_reject_sends_reason() -> Result<()> {
    let server = server_with_map().await;
    let reject = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/revenue/birth-certificate-applications/8/reject/")
                .json_body(json!({ "rejection_reason": "Missing hospital record" }));
            then.status(200).json_body(json!({ "status": "rejected" }));
        })
        .await;

    let sdk = sdk_for(&server);
    let body = sdk
        .revenue
        .reject("birth_certificate", 8, "Missing hospital record", None)
        .await?;

    assert_eq!(body["status"], "rejected");
    reject.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_resubmit_with_path_override() -> Result<()> {
    let server = server_with_map().await;
    let resubmit = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/revenue/legacy/births/8/resubmit/")
                .json_body(json!({ "mother_name": "Ada" }));
            then.status(204);
        })
        .await;

    let sdk = sdk_for(&server);
    let opts = RequestOptions::with_path_override("legacy/births");
    let body = sdk
        .revenue
        .resubmit("birth_certificate", "8", &json!({ "mother_name": "Ada" }), Some(&opts))
        .await?;

    assert!(body.is_null());
    resubmit.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_http_errors_propagate_to_caller() {
    let server = server_with_map().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/revenue/birth-certificate-applications/404/");
            then.status(404).body("Not found.");
        })
        .await;

    let sdk = sdk_for(&server);
    let err = sdk
        .revenue
        .retrieve("birth_certificate", 404, None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    match err {
        SdkError::HttpStatus { body, url, .. } => {
            assert_eq!(body, "Not found.");
            assert!(url.ends_with("/revenue/birth-certificate-applications/404/"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
