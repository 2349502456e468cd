//! Client-level error types shared by the token provider, the invoker, and the services.

// self
use crate::{_prelude::*, retry::RetryPolicy};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by every public operation.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem or rejected credentials.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The server answered with a non-success status.
	#[error("Auth Armor API responded with HTTP {status}: {body}")]
	HttpFailure {
		/// HTTP status code of the final attempt.
		status: u16,
		/// Raw response body captured for diagnostics.
		body: String,
	},
	/// Transport failure (network, I/O, request construction, payload encoding).
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl Error {
	/// HTTP status associated with the failure, when one was observed.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::HttpFailure { status, .. } => Some(*status),
			Self::Config(ConfigError::TokenGrant { status, .. }) => *status,
			Self::Transport(TransportError::Decode { status, .. }) => *status,
			_ => None,
		}
	}

	/// Returns `true` when the failure matches a status the *default* retry policy retries.
	///
	/// Clients built with a custom policy should use [`Error::is_retryable_with`] and pass
	/// [`RequestInvoker::retry_policy`](crate::invoke::RequestInvoker::retry_policy).
	pub fn is_retryable(&self) -> bool {
		self.is_retryable_with(&RetryPolicy::default())
	}

	/// Returns `true` when the failure matches a status `policy` retries.
	pub fn is_retryable_with(&self, policy: &RetryPolicy) -> bool {
		match self {
			Self::HttpFailure { status, .. } => policy.retries_status(*status),
			_ => false,
		}
	}

	/// Response body captured for HTTP failures.
	pub fn body(&self) -> Option<&str> {
		match self {
			Self::HttpFailure { body, .. } => Some(body),
			_ => None,
		}
	}
}

/// Configuration and validation failures; all are detectable before or at token acquisition.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required configuration value is blank.
	#[error("The required value `{field}` was not set.")]
	MissingField {
		/// Name of the missing field.
		field: &'static str,
	},
	/// A configured URL cannot be parsed or joined.
	#[error("The `{field}` URL is invalid.")]
	InvalidUrl {
		/// Name of the offending field.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The `{field}` endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Name of the offending field.
		field: &'static str,
		/// URL that failed validation.
		url: String,
	},
	/// The configured User-Agent cannot be sent as a header value.
	#[error("The User-Agent `{value}` is not a valid header value.")]
	InvalidUserAgent {
		/// Rejected value.
		value: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// The authorization server rejected the client-credentials grant.
	#[error("Error while obtaining an access token for client `{client_id}`: {message}.")]
	TokenGrant {
		/// Client identifier used for the exchange.
		client_id: String,
		/// Server-supplied error code or description.
		message: String,
		/// HTTP status of the token endpoint response, when available.
		status: Option<u16>,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while building, sending, or decoding a request.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {target}.")]
	Network {
		/// Endpoint family being called (`api`, `discovery`, `token`).
		target: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
	/// Request could not be assembled.
	#[error("HTTP request could not be constructed.")]
	Request(#[from] oauth2::http::Error),
	/// Request URL could not be assembled.
	#[error("Request URL `{url}` is invalid.")]
	InvalidUrl {
		/// Raw URL that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request path would be rewritten by URL normalization and reach another resource.
	#[error("Request path `{requested}` resolves to `{resolved}`.")]
	PathRewritten {
		/// Path as built by the caller.
		requested: String,
		/// Path after URL normalization.
		resolved: String,
	},
	/// Request payload could not be serialized.
	#[error("Request body could not be serialized.")]
	Encode(#[source] serde_json::Error),
	/// Response payload does not match the expected shape.
	#[error("Response body could not be deserialized.")]
	Decode {
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Transport failed with an unclassified message.
	#[error("HTTP client error: {message}.")]
	Other {
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		target: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { target, source: Box::new(src) }
	}
}
