//! End-to-end session flow against a mocked cluster node.
//!
//! Exercises the full pipeline the way a calling application would: one
//! login at construction, followed by resource calls that all carry the
//! session cookie and CSRF token.

use pve_client::{ConnectionStatus, CreateLxcRequest, PveClient, PveClientConfig};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TICKET: &str = "PVE:root@pam:4EEC61E2::rsKoApxDTLYPn6H3NNT6iP2mv";
const COOKIE: &str = "PVEAuthCookie=PVE%3Aroot@pam%3A4EEC61E2%3A%3ArsKoApxDTLYPn6H3NNT6iP2mv";
const CSRF: &str = "4EEC61E2:lwk7od06fa1+DcPUwBTXCcndyAY";

async fn mock_cluster() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api2/json/access/ticket"))
        .and(body_string_contains("username=root"))
        .and(body_string_contains("realm=pam"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "ticket": TICKET, "CSRFPreventionToken": CSRF }
        })))
        .expect(1)
        .mount(&server)
        .await;

    server
}

async fn connect(server: &MockServer) -> PveClient {
    let config = PveClientConfig::new(
        format!("{}/api2/json/", server.uri()),
        "node1",
        "root",
        "secret",
    )
    .unwrap();
    PveClient::connect(config).await.unwrap()
}

#[tokio::test]
async fn full_container_lifecycle() {
    let server = mock_cluster().await;
    let upid = "UPID:node1:000C2B8C:00A24D21:67B2F2A1:vzcreate:200:root@pam:";

    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/node1/lxc"))
        .and(header("Cookie", COOKIE))
        .and(header("CSRFPreventionToken", CSRF))
        .and(body_string_contains("vmid=200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": upid })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api2/json/nodes/node1/tasks/UPID.*/status$"))
        .and(header("Cookie", COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "status": "stopped", "exitstatus": "OK" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/node1/lxc"))
        .and(header("Cookie", COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "vmid": "200", "status": "stopped" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api2/json/nodes/node1/lxc/200"))
        .and(header("Cookie", COOKIE))
        .and(header("CSRFPreventionToken", CSRF))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": "UPID:node1:000C2B8D:00A24D22:67B2F2A2:vzdestroy:200:root@pam:"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = connect(&server).await;
    assert_eq!(client.connection_status(), ConnectionStatus::Connected);

    let request = CreateLxcRequest::new(200, "debian-12-standard_12.2-1_amd64.tar.gz")
        .with_param("memory", "512");
    let created = client.create_lxc(&request).await.unwrap();
    assert_eq!(created, json!(upid));

    let status = client.task_status(upid).await.unwrap();
    assert_eq!(status, "stopped:OK");

    let containers = client.list_lxc().await.unwrap();
    assert_eq!(containers["200"]["status"], "stopped");

    client.delete_lxc(200).await.unwrap();
}

#[tokio::test]
async fn resource_rejection_carries_status_code() {
    let server = mock_cluster().await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/node1/qemu"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let err = client.list_qemu().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "NOK: error code = 500");
}

#[tokio::test]
async fn login_runs_exactly_once_across_calls() {
    let server = mock_cluster().await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/node1/lxc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(3)
        .mount(&server)
        .await;

    let client = connect(&server).await;
    for _ in 0..3 {
        client.list_lxc().await.unwrap();
    }
    // The expect(1) on the ticket mock verifies the single login when the
    // server drops at the end of the test.
}
