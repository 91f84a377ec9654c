//! QEMU virtual machine operations.
//!
//! Mirrors the LXC facade for the fully virtualized resource kind under
//! `nodes/<node>/qemu`.

use crate::models::{index_by_vmid, CreateQemuRequest};
use crate::{PveClient, Result};
use serde_json::Value;
use std::collections::HashMap;

const NO_PARAMS: &[(&str, String)] = &[];

impl PveClient {
    /// List virtual machines on this node, keyed by `vmid`.
    pub async fn list_qemu(&self) -> Result<HashMap<String, Value>> {
        let data = self.get(&self.node_path("qemu"), NO_PARAMS).await?;
        index_by_vmid(data)
    }

    /// Create a virtual machine. Returns the task UPID.
    pub async fn create_qemu(&self, request: &CreateQemuRequest) -> Result<Value> {
        self.post(&self.node_path("qemu"), &request.to_form()).await
    }

    /// Destroy a virtual machine. Returns the task UPID.
    pub async fn delete_qemu(&self, vmid: u32) -> Result<Value> {
        self.delete(&self.node_path(&format!("qemu/{vmid}"))).await
    }

    /// Fetch the current status record of a virtual machine.
    pub async fn qemu_status(&self, vmid: u32) -> Result<Value> {
        self.get(&self.node_path(&format!("qemu/{vmid}/status/current")), NO_PARAMS)
            .await
    }

    /// Start a virtual machine. Returns the task UPID.
    pub async fn start_qemu(&self, vmid: u32) -> Result<Value> {
        self.post(&self.node_path(&format!("qemu/{vmid}/status/start")), NO_PARAMS)
            .await
    }

    /// Stop a virtual machine immediately. Returns the task UPID.
    pub async fn stop_qemu(&self, vmid: u32) -> Result<Value> {
        self.post(&self.node_path(&format!("qemu/{vmid}/status/stop")), NO_PARAMS)
            .await
    }

    /// Shut a virtual machine down via ACPI. Returns the task UPID.
    pub async fn shutdown_qemu(&self, vmid: u32) -> Result<Value> {
        self.post(&self.node_path(&format!("qemu/{vmid}/status/shutdown")), NO_PARAMS)
            .await
    }

    /// Fetch the configuration record of a virtual machine.
    pub async fn qemu_config(&self, vmid: u32) -> Result<Value> {
        self.get(&self.node_path(&format!("qemu/{vmid}/config")), NO_PARAMS)
            .await
    }

    /// Update configuration keys of a virtual machine.
    pub async fn set_qemu_config(&self, vmid: u32, params: &[(&str, String)]) -> Result<Value> {
        self.put(&self.node_path(&format!("qemu/{vmid}/config")), params)
            .await
    }
}
