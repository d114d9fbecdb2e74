//
//  satellite-link
//  api/retry.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Retry policy for transient failures.
//!
//! Retries are off by default and enabled per client with
//! [`SatelliteLinkClient::enable_retries`](crate::SatelliteLinkClient::enable_retries).
//! Only transient failures are retried:
//!
//! - connection-level failures and per-attempt timeouts
//! - `429 Too Many Requests`
//! - `5xx` responses other than `501 Not Implemented`
//!
//! Everything else, including a success status whose body fails to decode, is
//! returned to the caller after a single attempt.

use std::time::Duration;

use rand::Rng;
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;

use crate::api::common::ResponseEnvelope;

/// Retries used when [`RetryPolicy::new`] is given zero retries.
pub const DEFAULT_MAX_RETRIES: u32 = 4;

/// Upper bound on a single backoff delay when none is configured.
pub const DEFAULT_MAX_RETRY_INTERVAL: Duration = Duration::from_secs(30);

/// Delay before the first retry, doubled for every following attempt.
pub const INITIAL_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Exponential backoff retry policy.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use satellite_link::RetryPolicy;
///
/// let policy = RetryPolicy::new(3, Duration::from_millis(500));
/// assert_eq!(policy.max_retries(), 3);
///
/// // Zero values fall back to the defaults
/// let policy = RetryPolicy::new(0, Duration::ZERO);
/// assert_eq!(policy.max_retries(), 4);
/// assert_eq!(policy.max_retry_interval(), Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    max_retry_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            max_retry_interval: DEFAULT_MAX_RETRY_INTERVAL,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy. Zero values select [`DEFAULT_MAX_RETRIES`] and
    /// [`DEFAULT_MAX_RETRY_INTERVAL`].
    pub fn new(max_retries: u32, max_retry_interval: Duration) -> Self {
        let defaults = Self::default();
        Self {
            max_retries: if max_retries == 0 {
                defaults.max_retries
            } else {
                max_retries
            },
            max_retry_interval: if max_retry_interval.is_zero() {
                defaults.max_retry_interval
            } else {
                max_retry_interval
            },
        }
    }

    /// Maximum number of retries after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Upper bound on a single backoff delay.
    pub fn max_retry_interval(&self) -> Duration {
        self.max_retry_interval
    }

    /// Decides whether the outcome of attempt number `attempt` (1-based) should
    /// be retried.
    pub fn should_retry(
        &self,
        attempt: u32,
        outcome: &Result<ResponseEnvelope, reqwest::Error>,
    ) -> bool {
        if attempt > self.max_retries {
            return false;
        }
        match outcome {
            Ok(envelope) => is_transient_status(envelope.status),
            Err(err) => is_transient_error(err),
        }
    }

    /// Computes the delay before the retry that follows attempt `attempt`.
    ///
    /// The delay grows as `1s * 2^(attempt - 1)` with jitter in the upper half of
    /// that window, and never exceeds the maximum retry interval. A
    /// `Retry-After` header given in seconds takes precedence, still bounded by
    /// the maximum interval.
    pub fn backoff(&self, attempt: u32, response: Option<&ResponseEnvelope>) -> Duration {
        if let Some(delay) = response.and_then(retry_after) {
            return delay.min(self.max_retry_interval);
        }

        let exponent = attempt.saturating_sub(1).min(16);
        let ceiling = INITIAL_RETRY_INTERVAL
            .saturating_mul(1 << exponent)
            .min(self.max_retry_interval);
        let ceiling_ms = u64::try_from(ceiling.as_millis()).unwrap_or(u64::MAX);
        if ceiling_ms < 2 {
            return ceiling;
        }

        let jittered = rand::rng().random_range(ceiling_ms / 2..=ceiling_ms);
        Duration::from_millis(jittered)
    }
}

/// Returns `true` for status codes that are worth retrying.
pub fn is_transient_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || (status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED)
}

/// Returns `true` for transport errors that are worth retrying.
///
/// Builder errors mean the request itself is malformed and are never retried.
pub fn is_transient_error(err: &reqwest::Error) -> bool {
    if err.is_builder() {
        return false;
    }
    err.is_connect() || err.is_timeout() || err.is_request() || err.is_body()
}

fn retry_after(envelope: &ResponseEnvelope) -> Option<Duration> {
    envelope
        .headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
