//! Postman client tests against a mock server

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::net::TcpListener;
use std::time::Duration;

use atlas_application::ports::{CollectionSource, NetworkFault, SourceError};
use atlas_domain::{CollectionNode, UrlField};
use atlas_infrastructure::{API_KEY_HEADER, PostmanApiClient};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> PostmanApiClient {
    PostmanApiClient::new("PMAK-test", &server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_list_workspaces_sends_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/workspaces"))
        .and(header(API_KEY_HEADER, "PMAK-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "workspaces": [
                {"id": "ws-1", "name": "Sales", "type": "team"},
                {"id": "ws-2", "name": "Billing", "type": "personal"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let workspaces = client(&mock_server).list_workspaces().await.unwrap();

    let names: Vec<_> = workspaces.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["Sales", "Billing"]);
    assert_eq!(workspaces[0].id, "ws-1");
}

#[tokio::test]
async fn test_listings_filter_by_workspace() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/environments"))
        .and(query_param("workspace", "ws-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "environments": [{"id": "e1", "name": "Dev", "uid": "123-e1"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections"))
        .and(query_param("workspace", "ws-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collections": [{"id": "c1", "name": "Orders API", "uid": "123-c1"}]
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let environments = client.list_environments("ws-1").await.unwrap();
    let collections = client.list_collections("ws-1").await.unwrap();

    assert_eq!(environments[0].uid, "123-e1");
    assert_eq!(collections[0].uid, "123-c1");
    assert_eq!(collections[0].name, "Orders API");
}

#[tokio::test]
async fn test_get_environment_and_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/environments/123-e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "environment": {
                "id": "e1",
                "name": "Dev",
                "values": [
                    {"key": "baseUrl", "value": "https://dev.example.com", "enabled": true},
                    {"key": "token", "value": "t", "enabled": false}
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/123-c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": {
                "info": {"_postman_id": "c1", "name": "Orders API"},
                "item": [{
                    "name": "Orders",
                    "item": [{
                        "name": "List orders",
                        "request": {
                            "method": "GET",
                            "url": {
                                "protocol": "https",
                                "host": ["api", "example", "com"],
                                "path": ["v1", "orders"]
                            }
                        }
                    }]
                }],
                "variable": [{"key": "baseUrl", "value": "https://api.example.com"}]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);

    let environment = client.get_environment("123-e1").await.unwrap();
    assert_eq!(environment.uid, "123-e1");
    assert_eq!(environment.values.len(), 2);
    assert_eq!(environment.values[1].enabled, Some(false));

    let collection = client.get_collection("123-c1").await.unwrap();
    assert_eq!(collection.uid, "123-c1");
    assert_eq!(collection.name, "Orders API");
    assert_eq!(collection.variables.lookup("baseUrl"), Some("https://api.example.com"));

    let CollectionNode::Folder(folder) = &collection.items[0] else {
        panic!("expected folder");
    };
    let CollectionNode::Request(request) = &folder.children[0] else {
        panic!("expected request");
    };
    assert_eq!(
        request.url,
        Some(UrlField::structured(Some("https"), ["api", "example", "com"], ["v1", "orders"]))
    );
}

#[tokio::test]
async fn test_rate_limit_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/workspaces"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": "rateLimited",
            "message": "Rate limit exceeded. Please retry after 1704067230"
        })))
        .mount(&mock_server)
        .await;

    let error = client(&mock_server).list_workspaces().await.unwrap_err();

    match error {
        SourceError::RateLimited { message } => assert_eq!(
            message.as_deref(),
            Some("Rate limit exceeded. Please retry after 1704067230")
        ),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_keeps_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"name": "instanceNotFoundError", "message": "We could not find the collection you are looking for"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/workspaces"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);

    match client.get_collection("missing").await.unwrap_err() {
        SourceError::Api { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body.unwrap()["error"]["name"], "instanceNotFoundError");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(matches!(
        client.list_workspaces().await.unwrap_err(),
        SourceError::Api {
            status: 503,
            body: None
        }
    ));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/workspaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock_server)
        .await;

    assert!(matches!(
        client(&mock_server).list_workspaces().await.unwrap_err(),
        SourceError::Decode(_)
    ));
}

#[tokio::test]
async fn test_connection_refused_is_network_fault() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = PostmanApiClient::new(
        "PMAK-test",
        &format!("http://127.0.0.1:{port}"),
        Duration::from_secs(5),
    )
    .unwrap();

    match client.list_workspaces().await.unwrap_err() {
        SourceError::Network { fault, .. } => assert_eq!(fault, NetworkFault::ConnectionRefused),
        other => panic!("unexpected error: {other:?}"),
    }
}
