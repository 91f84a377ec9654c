//! # pve-core
//!
//! Core types and utilities for working with the Proxmox VE management API.
//!
//! This crate provides foundational types, error handling, and HTTP client
//! settings shared by the Proxmox VE client crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`config`] - Configuration structures for Proxmox VE clients
//! - [`client`] - HTTP client settings and timeout defaults
//! - [`ticket`] - Authentication ticket state and cookie encoding

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod ticket;

// Re-export commonly used types
pub use error::{Error, Result};
