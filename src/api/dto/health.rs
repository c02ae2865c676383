//! Body of `GET /health`.
//!
//! ```json
//! { "status": "healthy", "version": "0.1.0", "checks": { "database": { "status": "ok" } } }
//! ```

use serde::Serialize;

/// Overall service state, derived from the component checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

/// Outcome of probing one dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeOutcome {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
pub struct ComponentCheck {
    pub status: ProbeOutcome,

    /// Error text when the probe failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentCheck {
    pub fn passed() -> Self {
        Self {
            status: ProbeOutcome::Ok,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: ProbeOutcome::Error,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: ComponentCheck,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: HealthChecks,
}

impl HealthResponse {
    /// Builds the report; the service is healthy only if the store answered.
    pub fn from_database(database: ComponentCheck) -> Self {
        let status = match database.status {
            ProbeOutcome::Ok => ServiceStatus::Healthy,
            ProbeOutcome::Error => ServiceStatus::Degraded,
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: HealthChecks { database },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}
