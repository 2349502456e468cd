//! Error classifier mapping transport and HTTP outcomes into the client error taxonomy.
//!
//! - A non-2xx response becomes [`Error::HttpFailure`] carrying the status and raw body.
//! - Anything that goes wrong while building, sending, or decoding becomes
//!   [`Error::Transport`].
//! - Configuration failures never pass through here; they are raised at construction.

// crates.io
use oauth2::{HttpClientError, HttpResponse};
// self
use crate::{_prelude::*, error::TransportError};

/// Returns `true` for 2xx status codes.
pub fn is_success(status: u16) -> bool {
	(200..300).contains(&status)
}

/// Converts a non-success response into [`Error::HttpFailure`].
pub fn ensure_success(response: &HttpResponse) -> Result<()> {
	let status = response.status().as_u16();

	if is_success(status) {
		Ok(())
	} else {
		Err(http_failure(response))
	}
}

/// Builds [`Error::HttpFailure`] from a response, decoding the body lossily.
pub fn http_failure(response: &HttpResponse) -> Error {
	Error::HttpFailure {
		status: response.status().as_u16(),
		body: String::from_utf8_lossy(response.body()).into_owned(),
	}
}

/// Deserializes a JSON response body, keeping the failing JSON path on error.
pub fn decode_json<T>(response: &HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let body = response.body();
	// Empty bodies decode as `null` so unit-like responses still succeed.
	let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) { b"null" } else { body };
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
		TransportError::Decode { source, status: Some(response.status().as_u16()) }.into()
	})
}

/// Maps a failure reported by an [`oauth2::AsyncHttpClient`] into [`Error::Transport`].
pub fn map_http_client_error<E>(target: &'static str, err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(target, *inner).into(),
		HttpClientError::Http(inner) => TransportError::Request(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: format!("unclassified failure calling {target}") }
			.into(),
	}
}
