//! Storage content operations.
//!
//! Exposes the appliance templates available on the node's `local` storage,
//! re-keyed by template name so callers can pass the name straight to
//! [`crate::models::CreateLxcRequest`].

use crate::models::index_templates;
use crate::{PveClient, Result};
use serde_json::Value;
use std::collections::HashMap;

const NO_PARAMS: &[(&str, String)] = &[];

impl PveClient {
    /// List appliance templates on the `local` storage, keyed by name.
    ///
    /// The name is the `volid` stripped of its storage prefix and archive
    /// suffix.
    pub async fn list_templates(&self) -> Result<HashMap<String, Value>> {
        let data = self
            .get(&self.node_path("storage/local/content"), NO_PARAMS)
            .await?;
        index_templates(data)
    }
}
