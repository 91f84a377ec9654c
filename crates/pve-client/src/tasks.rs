//! Task status polling.
//!
//! State-changing operations return a UPID; callers poll
//! `nodes/<node>/tasks/<upid>/status` until the task leaves the `running`
//! state. The UPID's `:` separators must be percent-encoded before being
//! embedded in the path.

use crate::models::TaskStatus;
use crate::{PveClient, Result};

const NO_PARAMS: &[(&str, String)] = &[];

/// Percent-encode a UPID for use as a path segment.
fn encode_upid(upid: &str) -> String {
    upid.replace(':', "%3A")
}

impl PveClient {
    /// Poll the status of a task by UPID.
    ///
    /// Returns `"<status>"` while the task runs and `"<status>:<exitstatus>"`
    /// once it finished, e.g. `"running"` or `"stopped:OK"`.
    pub async fn task_status(&self, upid: &str) -> Result<String> {
        let path = self.node_path(&format!("tasks/{}/status", encode_upid(upid)));
        let data = self.get(&path, NO_PARAMS).await?;
        let status: TaskStatus = serde_json::from_value(data)?;
        Ok(status.describe())
    }
}
