//! Proxmox VE API client.
//!
//! Provides an asynchronous client for the Proxmox VE management API: a
//! one-time ticket login, a uniform request pipeline that attaches the
//! session cookie and CSRF token to every call, and thin resource operations
//! for LXC containers, QEMU virtual machines, storage templates, and task
//! status polling.
//!
//! ```no_run
//! use pve_client::{PveClient, PveClientConfig};
//!
//! # async fn run() -> pve_client::Result<()> {
//! let config = PveClientConfig::new(
//!     "https://pve.example.com:8006/api2/json/",
//!     "node1",
//!     "root",
//!     "password",
//! )?;
//! let client = PveClient::connect(config).await?;
//! let containers = client.list_lxc().await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod lxc;
pub mod models;
pub mod qemu;
pub mod storage;
pub mod tasks;

#[cfg(test)]
mod test_util;

pub use client::{PveClient, PveClientBuilder};
pub use models::{CreateLxcRequest, CreateQemuRequest, TaskStatus};
pub use pve_core::config::PveClientConfig;
pub use pve_core::ticket::ConnectionStatus;
pub use pve_core::Error;

/// Convenient result alias that reuses the shared error type.
pub type Result<T> = pve_core::Result<T>;
