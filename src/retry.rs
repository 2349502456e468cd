//! Bounded, fixed-delay retry policy applied to the transport-send step of API calls.
//!
//! Only HTTP 408 (Request Timeout) and 429 (Too Many Requests) are retried by default:
//! three retries, 300 ms apart, no jitter and no backoff. Business-level rejections and
//! network failures are never retried. The policy carries no state across calls.

// self
use crate::_prelude::*;

/// Outcome of consulting a [`RetryPolicy`] after an attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
	/// Send the request again after the given delay.
	Retry {
		/// Delay to wait before the next attempt.
		after: StdDuration,
	},
	/// Surface the response as-is.
	Stop,
}

/// Fixed-delay retry policy keyed on response status codes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
	/// Retries allowed after the first attempt.
	pub max_retries: u32,
	/// Delay between attempts.
	pub delay: StdDuration,
	/// Status codes that trigger a retry.
	pub retry_statuses: Vec<u16>,
}
impl RetryPolicy {
	const DEFAULT_DELAY: StdDuration = StdDuration::from_millis(300);
	const DEFAULT_MAX_RETRIES: u32 = 3;
	const DEFAULT_RETRY_STATUSES: [u16; 2] = [408, 429];

	/// Policy that never retries.
	pub fn none() -> Self {
		Self { max_retries: 0, ..Self::default() }
	}

	/// Overrides the number of retries after the first attempt.
	pub fn with_max_retries(mut self, max_retries: u32) -> Self {
		self.max_retries = max_retries;

		self
	}

	/// Overrides the fixed delay between attempts.
	pub fn with_delay(mut self, delay: StdDuration) -> Self {
		self.delay = delay;

		self
	}

	/// Total attempts the policy allows, including the first.
	pub fn max_attempts(&self) -> u32 {
		self.max_retries.saturating_add(1)
	}

	/// Returns `true` if `status` is one of the retryable codes.
	pub fn retries_status(&self, status: u16) -> bool {
		self.retry_statuses.contains(&status)
	}

	/// Decides what to do after `attempts_made` attempts ended with `status`.
	pub fn decide(&self, status: u16, attempts_made: u32) -> RetryDecision {
		if self.retries_status(status) && attempts_made <= self.max_retries {
			RetryDecision::Retry { after: self.delay }
		} else {
			RetryDecision::Stop
		}
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			max_retries: Self::DEFAULT_MAX_RETRIES,
			delay: Self::DEFAULT_DELAY,
			retry_statuses: Self::DEFAULT_RETRY_STATUSES.to_vec(),
		}
	}
}
