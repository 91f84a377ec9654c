//! Wire models and payload helpers.
//!
//! The API wraps every payload in a `{ "data": ... }` envelope and returns
//! resource records as untyped JSON; per-resource schemas are deliberately
//! not modelled. The helpers here re-key list payloads the way callers want
//! to look them up (by `vmid`, or by template name derived from `volid`).

use pve_core::Error;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Storage path prefix for container appliance templates.
pub const LXC_TEMPLATE_PREFIX: &str = "local:vztmpl/";

/// Storage path prefix for VM installer ISO volumes.
pub const QEMU_ISO_PREFIX: &str = "local:isol/";

const TEMPLATE_SUFFIX: &str = ".tar.gz";

/// Body of a successful `access/ticket` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketData {
    /// Raw session ticket; may be absent even on a 200 answer
    #[serde(default)]
    pub ticket: Option<String>,

    /// Anti-forgery token for state-changing requests
    #[serde(default, rename = "CSRFPreventionToken")]
    pub csrf_prevention_token: Option<String>,
}

/// Envelope of the `access/ticket` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketResponse {
    /// Ticket payload, if present
    #[serde(default)]
    pub data: Option<TicketData>,
}

/// Status of a long-running task, polled by UPID.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TaskStatus {
    /// Task state (`running`, `stopped`, ...)
    pub status: String,

    /// Exit status, present once the task finished
    #[serde(default)]
    pub exitstatus: Option<String>,
}

impl TaskStatus {
    /// Combine status and exit status into the `<status>[:<exitstatus>]`
    /// form callers poll against.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.exitstatus {
            Some(exit) => format!("{}:{exit}", self.status),
            None => self.status.clone(),
        }
    }
}

/// Parameters for creating an LXC container.
#[derive(Debug, Clone)]
pub struct CreateLxcRequest {
    /// Numeric identifier for the new container
    pub vmid: u32,

    /// Appliance template file name (without the storage prefix)
    pub template: String,

    /// Additional creation parameters passed through verbatim
    pub extra: Vec<(String, String)>,
}

impl CreateLxcRequest {
    /// Create a request for the given container id and template.
    #[must_use]
    pub fn new(vmid: u32, template: impl Into<String>) -> Self {
        Self {
            vmid,
            template: template.into(),
            extra: Vec::new(),
        }
    }

    /// Add an extra creation parameter (e.g. `memory`, `hostname`).
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Convert the request into form pairs for the creation POST.
    #[must_use]
    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut form = vec![
            ("vmid".to_string(), self.vmid.to_string()),
            (
                "ostemplate".to_string(),
                format!("{LXC_TEMPLATE_PREFIX}{}", self.template),
            ),
        ];
        form.extend(self.extra.iter().cloned());
        form
    }
}

/// Parameters for creating a QEMU virtual machine.
#[derive(Debug, Clone)]
pub struct CreateQemuRequest {
    /// Numeric identifier for the new VM
    pub vmid: u32,

    /// Installer ISO file name (without the storage prefix)
    pub iso: String,

    /// Additional creation parameters passed through verbatim
    pub extra: Vec<(String, String)>,
}

impl CreateQemuRequest {
    /// Create a request for the given VM id and installer ISO.
    #[must_use]
    pub fn new(vmid: u32, iso: impl Into<String>) -> Self {
        Self {
            vmid,
            iso: iso.into(),
            extra: Vec::new(),
        }
    }

    /// Add an extra creation parameter (e.g. `memory`, `sockets`).
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Convert the request into form pairs for the creation POST.
    ///
    /// Always carries `kvm=1`; full virtualization is the point of the
    /// `qemu` resource kind.
    #[must_use]
    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut form = vec![
            ("vmid".to_string(), self.vmid.to_string()),
            (
                "iso".to_string(),
                format!("{QEMU_ISO_PREFIX}{}", self.iso),
            ),
            ("kvm".to_string(), "1".to_string()),
        ];
        form.extend(self.extra.iter().cloned());
        form
    }
}

/// Re-key a list payload into a map from `vmid` to record.
///
/// The API reports `vmid` as either a string or a number depending on
/// endpoint and version; both key the map by their decimal form. Records
/// without a `vmid` are dropped.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] when the payload is not an array.
pub fn index_by_vmid(data: Value) -> Result<HashMap<String, Value>, Error> {
    let Value::Array(records) = data else {
        return Err(Error::MalformedResponse(
            "expected an array of resource records".to_string(),
        ));
    };

    let mut indexed = HashMap::with_capacity(records.len());
    for record in records {
        let key = match record.get("vmid") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => continue,
        };
        indexed.insert(key, record);
    }

    Ok(indexed)
}

/// Derive a template name from a storage `volid`.
///
/// Strips the `<storage>:<kind>/` prefix and the archive suffix, so
/// `local:vztmpl/ubuntu-10.04-standard_10.04-4_i386.tar.gz` becomes
/// `ubuntu-10.04-standard_10.04-4_i386`. Returns `None` when the volid has
/// no path component.
#[must_use]
pub fn template_name(volid: &str) -> Option<String> {
    let (_, file) = volid.split_once('/')?;
    let name = file.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(file);
    Some(name.to_string())
}

/// Re-key a storage content payload into a map from template name to record.
///
/// Records whose `volid` is missing or yields no name are dropped.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] when the payload is not an array.
pub fn index_templates(data: Value) -> Result<HashMap<String, Value>, Error> {
    let Value::Array(records) = data else {
        return Err(Error::MalformedResponse(
            "expected an array of storage content records".to_string(),
        ));
    };

    let mut indexed = HashMap::with_capacity(records.len());
    for record in records {
        let Some(name) = record
            .get("volid")
            .and_then(Value::as_str)
            .and_then(template_name)
        else {
            continue;
        };
        indexed.insert(name, record);
    }

    Ok(indexed)
}
