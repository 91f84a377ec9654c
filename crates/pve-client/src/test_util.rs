//! Shared wiremock helpers for the resource facade tests.

use crate::client::PveClient;
use pve_core::config::PveClientConfig;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) const TICKET: &str = "PVE:root@pam:AB=";

pub(crate) async fn mock_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api2/json/access/ticket"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "ticket": TICKET,
                "CSRFPreventionToken": "csrf-tok"
            }
        })))
        .mount(server)
        .await;
}

pub(crate) async fn connected_client(server: &MockServer) -> PveClient {
    mock_login(server).await;
    let config = PveClientConfig::new(
        format!("{}/api2/json/", server.uri()),
        "node1",
        "root",
        "secret",
    )
    .unwrap();
    PveClient::connect(config).await.unwrap()
}
