//! Service control over the platform's systemd units.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::warn;

use crate::error::{DeviceError, Result};

/// Outcome of a best-effort service command.
///
/// The lifecycle controller never fails because a `systemctl` invocation
/// did; it distinguishes "the command demonstrably succeeded" from "the
/// command was submitted but nothing confirmed it" so stricter callers can
/// verify before trusting platform state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// The command ran and reported success.
    Confirmed,
    /// The command was submitted but success was not observed (spawn
    /// failure or non-zero exit, already logged).
    Unconfirmed,
}

impl SubmitStatus {
    pub fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Combine with the outcome of a subsequent command; any unconfirmed
    /// step taints the whole sequence.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Confirmed, Self::Confirmed) => Self::Confirmed,
            _ => Self::Unconfirmed,
        }
    }
}

/// Control surface for platform services.
#[async_trait]
pub trait ServiceController: Send + Sync {
    /// Submit a stop for `unit`.
    async fn stop_unit(&self, unit: &str) -> SubmitStatus;

    /// Submit a start for `unit`.
    async fn start_unit(&self, unit: &str) -> SubmitStatus;

    /// Readiness probe: whether `unit` is currently active.
    async fn is_active(&self, unit: &str) -> Result<bool>;
}

/// `systemctl`-backed service controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct Systemctl;

impl Systemctl {
    pub fn new() -> Self {
        Self
    }

    async fn run(verb: &str, unit: &str) -> SubmitStatus {
        match Command::new("systemctl").arg(verb).arg(unit).output().await {
            Ok(output) if output.status.success() => SubmitStatus::Confirmed,
            Ok(output) => {
                warn!(unit, verb, code = ?output.status.code(), "systemctl reported failure");
                SubmitStatus::Unconfirmed
            }
            Err(err) => {
                warn!(unit, verb, %err, "failed to spawn systemctl");
                SubmitStatus::Unconfirmed
            }
        }
    }
}

#[async_trait]
impl ServiceController for Systemctl {
    async fn stop_unit(&self, unit: &str) -> SubmitStatus {
        Self::run("stop", unit).await
    }

    async fn start_unit(&self, unit: &str) -> SubmitStatus {
        Self::run("start", unit).await
    }

    async fn is_active(&self, unit: &str) -> Result<bool> {
        let output = Command::new("systemctl")
            .arg("is-active")
            .arg("--quiet")
            .arg(unit)
            .output()
            .await
            .map_err(DeviceError::Io)?;
        Ok(output.status.success())
    }
}
