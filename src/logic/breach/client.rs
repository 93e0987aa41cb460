//! k-anonymity breach-lookup client.
//!
//! The remote service is queried by a 5-hex-char SHA-1 prefix only; the
//! full hash never leaves the process. One client instance owns a shared
//! throttle clock: no two outbound requests depart less than
//! `request_delay` apart, measured from the end of one exchange to the
//! start of the next, regardless of how many callers run concurrently.

use std::time::Duration;

use sha1::{Digest, Sha1};
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

use super::types::{BreachOutcome, ProbeStatus};

const USER_AGENT: &str = concat!("passguard-breach-check/", env!("CARGO_PKG_VERSION"));

/// Length of the hash prefix sent to the remote service.
const HASH_PREFIX_LEN: usize = 5;

/// Timeout for the health probe, shorter than the lookup budget.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct BreachConfig {
    pub base_url: String,
    /// Minimum interval between outbound range requests
    pub request_delay: Duration,
    /// Extra courtesy delay between batch items
    pub batch_delay: Duration,
    /// Per-request timeout budget
    pub timeout: Duration,
}

impl Default for BreachConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.pwnedpasswords.com/range/".to_string(),
            request_delay: Duration::from_millis(1500),
            batch_delay: Duration::from_millis(500),
            timeout: Duration::from_secs(10),
        }
    }
}

pub struct BreachClient {
    http: reqwest::Client,
    config: BreachConfig,
    /// End timestamp of the previous exchange; guarded so concurrent
    /// callers serialize their dispatches.
    last_request: Mutex<Option<Instant>>,
}

impl BreachClient {
    pub fn new(config: BreachConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            config,
            last_request: Mutex::new(None),
        }
    }

    /// Check a single password against the breach corpus. Every failure
    /// mode returns as a `BreachOutcome` value.
    pub async fn check(&self, password: &str) -> BreachOutcome {
        let digest = hash_password(password);
        let (prefix, suffix) = digest.split_at(HASH_PREFIX_LEN);
        let url = format!("{}{}", self.config.base_url, prefix);

        // The slot guard is held across the whole exchange; dropping it
        // before the response is consumed would let a second request
        // depart early.
        let mut slot = self.acquire_slot().await;
        let outcome = self.dispatch(&url, suffix).await;
        *slot = Some(Instant::now());

        outcome
    }

    async fn dispatch(&self, url: &str, suffix: &str) -> BreachOutcome {
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => return transport_outcome(e),
        };

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Rate limited by breach-range API");
            return BreachOutcome::RateLimited;
        }
        if !status.is_success() {
            tracing::error!("Breach-range API request failed with status {}", status);
            return BreachOutcome::ApiError {
                status: status.as_u16(),
            };
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return transport_outcome(e),
        };

        match scan_range_body(&body, suffix) {
            Ok(Some(count)) => BreachOutcome::Found { count },
            Ok(None) => BreachOutcome::NotFound,
            Err(message) => {
                tracing::error!("Malformed breach-range response: {}", message);
                BreachOutcome::NetworkError { message }
            }
        }
    }

    /// Check passwords strictly sequentially, in the given order, with an
    /// extra courtesy delay between items (skipped after the last one).
    pub async fn batch_check(&self, passwords: &[String]) -> Vec<BreachOutcome> {
        let mut results = Vec::with_capacity(passwords.len());

        for (i, password) in passwords.iter().enumerate() {
            tracing::info!("Checking password {}/{} for breaches", i + 1, passwords.len());
            results.push(self.check(password).await);

            if i + 1 < passwords.len() {
                tokio::time::sleep(self.config.batch_delay).await;
            }
        }

        results
    }

    /// Readiness probe against a fixed well-known range. Touches no
    /// password data.
    pub async fn probe(&self) -> ProbeStatus {
        let url = format!("{}00000", self.config.base_url);

        match self.http.head(&url).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) if response.status().is_success() => ProbeStatus::Reachable,
            Ok(_) => ProbeStatus::DegradedStatus,
            Err(_) => ProbeStatus::Unreachable,
        }
    }

    /// Wait until the minimum inter-request interval has elapsed and
    /// return the clock guard. The caller stamps the guard when its
    /// exchange completes.
    async fn acquire_slot(&self) -> MutexGuard<'_, Option<Instant>> {
        let guard = self.last_request.lock().await;

        if let Some(last) = *guard {
            let since = last.elapsed();
            if since < self.config.request_delay {
                tokio::time::sleep(self.config.request_delay - since).await;
            }
        }

        guard
    }
}

/// Uppercase hex SHA-1 digest - the breach-range wire format's lookup
/// key, not a storage hash.
pub fn hash_password(password: &str) -> String {
    hex::encode_upper(Sha1::digest(password.as_bytes()))
}

/// Scan a newline-delimited `SUFFIX:COUNT` body for an exact suffix
/// match. Comparison is case-sensitive; both sides are uppercase hex.
fn scan_range_body(body: &str, suffix: &str) -> Result<Option<u64>, String> {
    for line in body.lines() {
        let line = line.trim();
        let Some((hash_part, count)) = line.split_once(':') else {
            continue;
        };
        if hash_part == suffix {
            let count = count
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("unparseable breach count {:?}", count))?;
            return Ok(Some(count));
        }
    }
    Ok(None)
}

fn transport_outcome(e: reqwest::Error) -> BreachOutcome {
    if e.is_timeout() {
        tracing::error!("Breach-range API request timed out");
        BreachOutcome::Timeout
    } else {
        tracing::error!("Network error during breach check: {}", e);
        BreachOutcome::NetworkError {
            message: e.to_string(),
        }
    }
}
