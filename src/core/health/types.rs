//! Health status types and check results

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Health status levels
///
/// `Operational < Degraded < Down` form a ladder that the monitor walks
/// one notch at a time. `Unknown` sits outside it until the first event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// No health event seen yet
    #[default]
    Unknown,
    /// Service is fully operational
    Operational,
    /// Service answers, but slowly or after recent failures
    Degraded,
    /// Service is unavailable
    Down,
}

impl HealthStatus {
    /// Check if the status allows requests
    pub fn allows_requests(&self) -> bool {
        !matches!(self, HealthStatus::Down)
    }

    fn rank(self) -> Option<u8> {
        match self {
            HealthStatus::Unknown => None,
            HealthStatus::Operational => Some(0),
            HealthStatus::Degraded => Some(1),
            HealthStatus::Down => Some(2),
        }
    }

    fn from_rank(rank: u8) -> Self {
        match rank {
            0 => HealthStatus::Operational,
            1 => HealthStatus::Degraded,
            _ => HealthStatus::Down,
        }
    }

    /// Next status when an event points at `target`
    ///
    /// Moves at most one notch along the ladder. From `Unknown` only
    /// `Operational` or `Degraded` are reachable.
    pub fn step_toward(self, target: HealthStatus) -> HealthStatus {
        let Some(target_rank) = target.rank() else {
            return self;
        };

        match self.rank() {
            None => {
                if target == HealthStatus::Operational {
                    HealthStatus::Operational
                } else {
                    HealthStatus::Degraded
                }
            }
            Some(current) if current < target_rank => Self::from_rank(current + 1),
            Some(current) if current > target_rank => Self::from_rank(current - 1),
            Some(_) => self,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "unknown",
            HealthStatus::Operational => "operational",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Down => "down",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a probe or a dispatch attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub success: bool,
    /// Response time in milliseconds
    pub response_time_ms: f64,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Error message if the check failed
    pub error: Option<String>,
}

impl HealthCheckResult {
    /// Create a successful result
    pub fn success(response_time: Duration) -> Self {
        Self {
            success: true,
            response_time_ms: response_time.as_secs_f64() * 1000.0,
            timestamp: chrono::Utc::now(),
            error: None,
        }
    }

    /// Create a failed result
    pub fn failure(error: impl Into<String>, response_time: Duration) -> Self {
        Self {
            success: false,
            response_time_ms: response_time.as_secs_f64() * 1000.0,
            timestamp: chrono::Utc::now(),
            error: Some(error.into()),
        }
    }

    /// Status this result argues for
    pub fn target_status(&self, degraded_threshold: Duration) -> HealthStatus {
        if !self.success {
            HealthStatus::Down
        } else if self.response_time_ms >= degraded_threshold.as_secs_f64() * 1000.0 {
            HealthStatus::Degraded
        } else {
            HealthStatus::Operational
        }
    }
}
