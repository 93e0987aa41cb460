//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory scanned for classifier artifacts (*.onnx) and scaler.json
    pub model_dir: String,

    /// Base URL of the k-anonymity breach-range API
    pub hibp_base_url: String,

    /// Minimum interval between outbound breach-range requests (ms)
    pub breach_request_delay_ms: u64,

    /// Extra courtesy delay between batch items (ms)
    pub breach_batch_delay_ms: u64,

    /// Per-request timeout for breach lookups (s)
    pub breach_timeout_secs: u64,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            model_dir: env::var("MODEL_DIR").unwrap_or_else(|_| "models".to_string()),

            hibp_base_url: env::var("HIBP_BASE_URL")
                .unwrap_or_else(|_| "https://api.pwnedpasswords.com/range/".to_string()),

            breach_request_delay_ms: env::var("BREACH_REQUEST_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1500),

            breach_batch_delay_ms: env::var("BREACH_BATCH_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),

            breach_timeout_secs: env::var("BREACH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
