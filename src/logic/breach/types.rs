//! Breach-check result types.
//!
//! Every failure mode of the remote lookup is a value, never an error
//! crossing the client boundary; callers match exhaustively.

use serde::{Deserialize, Serialize};

/// Terminal state of one breach check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome")]
pub enum BreachOutcome {
    Found { count: u64 },
    NotFound,
    RateLimited,
    Timeout,
    NetworkError { message: String },
    ApiError { status: u16 },
}

impl BreachOutcome {
    pub fn is_breached(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Found { .. } | Self::NotFound)
    }

    /// Short failure label for the wire `error` field.
    pub fn error_label(&self) -> Option<&'static str> {
        match self {
            Self::Found { .. } | Self::NotFound => None,
            Self::RateLimited => Some("Rate limited"),
            Self::Timeout => Some("Timeout"),
            Self::NetworkError { .. } => Some("Network error"),
            Self::ApiError { .. } => Some("API request failed"),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Found { count } => format!("Password found in {} breaches", count),
            Self::NotFound => "Password not found in known breaches".to_string(),
            Self::RateLimited => "Too many requests. Please try again later.".to_string(),
            Self::Timeout => "Request timed out".to_string(),
            Self::NetworkError { .. } => "Unable to connect to breach database".to_string(),
            Self::ApiError { status } => {
                format!("Unable to check breaches (HTTP {})", status)
            }
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Found { .. } => {
                "This password has been exposed in data breaches. Choose a different password."
            }
            Self::NotFound => {
                "Good! This password has not been found in known data breaches."
            }
            Self::RateLimited => "Wait a moment before checking again.",
            Self::Timeout | Self::NetworkError { .. } => {
                "Breach check temporarily unavailable due to network issues."
            }
            Self::ApiError { .. } => "Breach check temporarily unavailable.",
        }
    }
}

/// Wire rendition of a breach check: either a result or an explicit error
/// field, always with a message and a recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct BreachReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_breached: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breach_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
    pub recommendation: String,
}

impl From<&BreachOutcome> for BreachReport {
    fn from(outcome: &BreachOutcome) -> Self {
        let (is_breached, breach_count) = match outcome {
            BreachOutcome::Found { count } => (Some(true), Some(*count)),
            BreachOutcome::NotFound => (Some(false), Some(0)),
            _ => (None, None),
        };

        Self {
            is_breached,
            breach_count,
            error: outcome.error_label().map(str::to_string),
            message: outcome.message(),
            recommendation: outcome.recommendation().to_string(),
        }
    }
}

/// Readiness of the remote breach-range service, as seen by the health
/// probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Reachable,
    DegradedStatus,
    Unreachable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_report() {
        let report = BreachReport::from(&BreachOutcome::Found { count: 3861493 });
        assert_eq!(report.is_breached, Some(true));
        assert_eq!(report.breach_count, Some(3861493));
        assert!(report.error.is_none());
        assert!(report.message.contains("3861493"));
    }

    #[test]
    fn test_not_found_report() {
        let report = BreachReport::from(&BreachOutcome::NotFound);
        assert_eq!(report.is_breached, Some(false));
        assert_eq!(report.breach_count, Some(0));
        assert!(report.error.is_none());
    }

    #[test]
    fn test_error_outcomes_carry_label_and_no_result() {
        let outcomes = [
            BreachOutcome::RateLimited,
            BreachOutcome::Timeout,
            BreachOutcome::NetworkError {
                message: "connection refused".to_string(),
            },
            BreachOutcome::ApiError { status: 503 },
        ];

        for outcome in outcomes {
            assert!(outcome.is_error());
            let report = BreachReport::from(&outcome);
            assert!(report.error.is_some());
            assert!(report.is_breached.is_none());
            assert!(report.breach_count.is_none());
            assert!(!report.message.is_empty());
            assert!(!report.recommendation.is_empty());
        }
    }

    #[test]
    fn test_api_error_message_carries_status() {
        assert!(BreachOutcome::ApiError { status: 503 }
            .message()
            .contains("503"));
    }

    #[test]
    fn test_rate_limited_label() {
        assert_eq!(
            BreachOutcome::RateLimited.error_label(),
            Some("Rate limited")
        );
    }
}
