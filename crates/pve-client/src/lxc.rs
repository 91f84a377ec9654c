//! LXC container operations.
//!
//! Thin call sites over the dispatch pipeline: each method builds a fixed
//! relative path under `nodes/<node>/lxc`, selects the HTTP method, and
//! passes the normalized `data` payload through untouched. Only the list
//! operation reshapes its payload (re-keyed by `vmid`).

use crate::models::{index_by_vmid, CreateLxcRequest};
use crate::{PveClient, Result};
use serde_json::Value;
use std::collections::HashMap;

const NO_PARAMS: &[(&str, String)] = &[];

impl PveClient {
    /// List containers on this node, keyed by `vmid`.
    pub async fn list_lxc(&self) -> Result<HashMap<String, Value>> {
        let data = self.get(&self.node_path("lxc"), NO_PARAMS).await?;
        index_by_vmid(data)
    }

    /// Create a container. Returns the task UPID for the provisioning job.
    pub async fn create_lxc(&self, request: &CreateLxcRequest) -> Result<Value> {
        self.post(&self.node_path("lxc"), &request.to_form()).await
    }

    /// Destroy a container. Returns the task UPID.
    pub async fn delete_lxc(&self, vmid: u32) -> Result<Value> {
        self.delete(&self.node_path(&format!("lxc/{vmid}"))).await
    }

    /// Fetch the current status record of a container.
    pub async fn lxc_status(&self, vmid: u32) -> Result<Value> {
        self.get(&self.node_path(&format!("lxc/{vmid}/status/current")), NO_PARAMS)
            .await
    }

    /// Start a container. Returns the task UPID.
    pub async fn start_lxc(&self, vmid: u32) -> Result<Value> {
        self.post(&self.node_path(&format!("lxc/{vmid}/status/start")), NO_PARAMS)
            .await
    }

    /// Stop a container immediately (no clean shutdown). Returns the task UPID.
    pub async fn stop_lxc(&self, vmid: u32) -> Result<Value> {
        self.post(&self.node_path(&format!("lxc/{vmid}/status/stop")), NO_PARAMS)
            .await
    }

    /// Shut a container down cleanly. Returns the task UPID.
    pub async fn shutdown_lxc(&self, vmid: u32) -> Result<Value> {
        self.post(&self.node_path(&format!("lxc/{vmid}/status/shutdown")), NO_PARAMS)
            .await
    }

    /// Fetch the configuration record of a container.
    pub async fn lxc_config(&self, vmid: u32) -> Result<Value> {
        self.get(&self.node_path(&format!("lxc/{vmid}/config")), NO_PARAMS)
            .await
    }

    /// Update configuration keys of a container.
    pub async fn set_lxc_config(&self, vmid: u32, params: &[(&str, String)]) -> Result<Value> {
        self.put(&self.node_path(&format!("lxc/{vmid}/config")), params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::CreateLxcRequest;
    use crate::test_util::connected_client;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_lxc_rekeys_by_vmid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api2/json/nodes/node1/lxc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "vmid": "101", "status": "running" },
                    { "vmid": "102", "status": "stopped" }
                ]
            })))
            .mount(&server)
            .await;

        let client = connected_client(&server).await;
        let containers = client.list_lxc().await.unwrap();

        assert_eq!(containers.len(), 2);
        assert_eq!(containers["101"]["status"], "running");
        assert_eq!(containers["102"]["status"], "stopped");
    }

    #[tokio::test]
    async fn create_lxc_posts_template_volume() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api2/json/nodes/node1/lxc"))
            .and(body_string_contains("vmid=200"))
            // Form encoding turns the storage path into local%3Avztmpl%2F...
            .and(body_string_contains(
                "ostemplate=local%3Avztmpl%2Fdebian-12-standard_12.2-1_amd64.tar.gz",
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": "UPID:node1:0001" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server).await;
        let request = CreateLxcRequest::new(200, "debian-12-standard_12.2-1_amd64.tar.gz");
        let upid = client.create_lxc(&request).await.unwrap();
        assert_eq!(upid, json!("UPID:node1:0001"));
    }

    #[tokio::test]
    async fn delete_lxc_targets_vmid_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api2/json/nodes/node1/lxc/101"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": "UPID:node1:0002" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server).await;
        client.delete_lxc(101).await.unwrap();
    }

    #[tokio::test]
    async fn lifecycle_actions_post_to_status_paths() {
        let server = MockServer::start().await;
        for action in ["start", "stop", "shutdown"] {
            Mock::given(method("POST"))
                .and(path(format!("/api2/json/nodes/node1/lxc/101/status/{action}")))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!({ "data": "UPID:node1:0003" })),
                )
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = connected_client(&server).await;
        client.start_lxc(101).await.unwrap();
        client.stop_lxc(101).await.unwrap();
        client.shutdown_lxc(101).await.unwrap();
    }

    #[tokio::test]
    async fn config_roundtrip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api2/json/nodes/node1/lxc/101/status/current"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "status": "running" } })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api2/json/nodes/node1/lxc/101/config"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "memory": 512 } })),
            )
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api2/json/nodes/node1/lxc/101/config"))
            .and(body_string_contains("memory=1024"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server).await;

        let status = client.lxc_status(101).await.unwrap();
        assert_eq!(status["status"], "running");

        let config = client.lxc_config(101).await.unwrap();
        assert_eq!(config["memory"], 512);

        client
            .set_lxc_config(101, &[("memory", "1024".to_string())])
            .await
            .unwrap();
    }
}
