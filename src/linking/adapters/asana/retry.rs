//! Retry classification and backoff for Asana requests.

use std::time::Duration;

/// Upper bound for computed backoff delays.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Upper bound honoured for server-provided `Retry-After` values.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Returns `true` for rate-limit and server-side statuses.
pub(super) const fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500..=599)
}

/// Returns `true` for timeouts and connection-level failures.
pub(super) fn is_retryable_transport_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect() || error.is_request()
}

/// Reads a `Retry-After` header expressed in whole seconds.
pub(super) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    let raw = headers.get(reqwest::header::RETRY_AFTER)?.to_str().ok()?;
    raw.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Delay before the next attempt, `attempt` counting from one.
///
/// A server-provided `Retry-After` wins over exponential backoff.
pub(super) fn retry_delay(
    base_delay: Duration,
    attempt: usize,
    retry_after: Option<Duration>,
) -> Duration {
    if let Some(delay) = retry_after {
        return delay.min(MAX_RETRY_AFTER);
    }
    let exponent = u32::try_from(attempt.saturating_sub(1).min(10)).unwrap_or(10);
    base_delay
        .saturating_mul(1_u32 << exponent)
        .min(MAX_BACKOFF)
}

/// Returns the response body, or a placeholder naming the read failure.
pub(super) fn body_or_placeholder<E>(body: Result<String, E>) -> String
where
    E: std::fmt::Display,
{
    body.unwrap_or_else(|err| format!("<unreadable body: {err}>"))
}

/// Truncates a response body for inclusion in an error message.
pub(super) fn truncate_for_error(body: &str, max_chars: usize) -> String {
    let mut truncated: String = body.chars().take(max_chars).collect();
    if body.chars().nth(max_chars).is_some() {
        truncated.push_str("...");
    }
    truncated
}
