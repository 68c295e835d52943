//! Sequential package installer.
//!
//! The package manager cannot run two install requests at once and packages
//! may depend on each other, so requests are submitted strictly one after the
//! other in list order. A failed install is logged and skipped; it never stops
//! the rest of the queue.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::config::InstallerConfig;
use crate::error::RegistryResult;

/// A package identifier: registry name or source-control URL. Never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRequest(String);

impl PackageRequest {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageRequest {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PackageRequest {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for PackageRequest {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

/// Opaque handle of a submitted install request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestHandle(pub String);

impl fmt::Display for RequestHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of an install request. `Success` and `Failure` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Success { package_id: String },
    Failure { message: String },
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A package registry able to install one package per request.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Start installing `request`.
    async fn submit(&self, request: &PackageRequest) -> RegistryResult<RequestHandle>;

    /// Current status of a submitted request.
    async fn poll(&self, handle: &RequestHandle) -> RegistryResult<RequestStatus>;
}

/// Terminal result for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed { package_id: String },
    Failed { message: String },
}

/// Outcomes of one drain, in submit order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub entries: Vec<(PackageRequest, InstallOutcome)>,
}

impl InstallReport {
    pub fn installed(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|(_, o)| match o {
            InstallOutcome::Installed { package_id } => Some(package_id.as_str()),
            InstallOutcome::Failed { .. } => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = (&PackageRequest, &str)> {
        self.entries.iter().filter_map(|(r, o)| match o {
            InstallOutcome::Failed { message } => Some((r, message.as_str())),
            InstallOutcome::Installed { .. } => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Installs queued packages one at a time against a [`RegistryClient`].
pub struct PackageInstaller {
    client: Arc<dyn RegistryClient>,
    config: InstallerConfig,
    pending: VecDeque<PackageRequest>,
    in_flight: Option<PackageRequest>,
}

impl PackageInstaller {
    pub fn new(client: Arc<dyn RegistryClient>, config: InstallerConfig) -> Self {
        Self {
            client,
            config,
            pending: VecDeque::new(),
            in_flight: None,
        }
    }

    /// Queue `packages` and drain the queue unless a drain is already running.
    pub async fn install<I, P>(&mut self, packages: I) -> InstallReport
    where
        I: IntoIterator<Item = P>,
        P: Into<PackageRequest>,
    {
        self.enqueue(packages);

        if self.pending.is_empty() || self.in_flight.is_some() {
            return InstallReport::default();
        }
        self.drain().await
    }

    /// Append packages to the queue; duplicates are kept.
    pub fn enqueue<I, P>(&mut self, packages: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PackageRequest>,
    {
        self.pending.extend(packages.into_iter().map(Into::into));
    }

    /// Number of queued requests not yet submitted.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Request currently being installed, if any.
    pub fn in_flight(&self) -> Option<&PackageRequest> {
        self.in_flight.as_ref()
    }

    /// Install every queued request in FIFO order.
    pub async fn drain(&mut self) -> InstallReport {
        let mut report = InstallReport::default();

        while let Some(request) = self.pending.pop_front() {
            self.in_flight = Some(request.clone());
            let outcome = self.install_one(&request).await;
            self.in_flight = None;

            match &outcome {
                InstallOutcome::Installed { package_id } => {
                    info!(package = %package_id, "installed");
                }
                InstallOutcome::Failed { message } => {
                    error!(package = %request, error = %message, "install failed");
                }
            }
            report.entries.push((request, outcome));

            if !self.pending.is_empty() {
                tokio::time::sleep(self.config.cooldown()).await;
            }
        }

        report
    }

    async fn install_one(&self, request: &PackageRequest) -> InstallOutcome {
        let handle = match self.client.submit(request).await {
            Ok(handle) => handle,
            Err(e) => {
                return InstallOutcome::Failed {
                    message: e.to_string(),
                }
            }
        };
        debug!(package = %request, request = %handle, "install request submitted");

        loop {
            match self.client.poll(&handle).await {
                Ok(RequestStatus::Pending) => {
                    tokio::time::sleep(self.config.poll_interval()).await;
                }
                Ok(RequestStatus::Success { package_id }) => {
                    return InstallOutcome::Installed { package_id };
                }
                Ok(RequestStatus::Failure { message }) => {
                    return InstallOutcome::Failed { message };
                }
                Err(e) if e.is_transient() => {
                    // the request may still be running; keep waiting on it
                    warn!(package = %request, request = %handle, error = %e, "status poll failed");
                    tokio::time::sleep(self.config.poll_interval()).await;
                }
                Err(e) => {
                    return InstallOutcome::Failed {
                        message: e.to_string(),
                    }
                }
            }
        }
    }
}
