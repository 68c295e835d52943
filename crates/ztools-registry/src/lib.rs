//! HTTP client for a package registry service.
//!
//! Implements the [`RegistryClient`](ztools_core::RegistryClient) capability
//! used by the sequential installer:
//!
//! - `POST {url}/requests` with `{"package": "<identifier>"}` starts an install
//!   and returns `{"id": "<request id>"}`
//! - `GET {url}/requests/{id}` reports `pending`, `success` (with the resolved
//!   `package_id`) or `failure` (with an `error` message)
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use ztools_core::{InstallerConfig, PackageInstaller, RegistryConfig};
//! use ztools_registry::HttpRegistryClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpRegistryClient::new(RegistryConfig::default())?;
//! let mut installer = PackageInstaller::new(Arc::new(client), InstallerConfig::default());
//! let report = installer.install(["com.unity.cinemachine"]).await;
//! for (package, message) in report.failed() {
//!     eprintln!("{package}: {message}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Requests are never retried: a transport error fails the package it
//! belongs to and the installer moves on.

pub mod auth;
pub mod client;
pub mod types;

pub use auth::TokenProvider;
pub use client::{HttpRegistryClient, REGISTRY_USER_AGENT};
pub use types::{StatusResponse, SubmitRequest, SubmitResponse};
