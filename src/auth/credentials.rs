//! OAuth client credentials validated at construction.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Client id/secret pair used for the client-credentials grant.
///
/// Both values are checked for blankness on construction, so a value of this type is always
/// usable for a token exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
	client_id: String,
	client_secret: TokenSecret,
}
impl ClientCredentials {
	/// Validates and wraps the provided credentials.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let client_id = client_id.into();
		let client_secret = TokenSecret::new(client_secret);

		if client_id.trim().is_empty() {
			return Err(ConfigError::MissingField { field: "client_id" });
		}
		if client_secret.is_blank() {
			return Err(ConfigError::MissingField { field: "client_secret" });
		}

		Ok(Self { client_id, client_secret })
	}

	/// OAuth client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// OAuth client secret.
	pub fn client_secret(&self) -> &TokenSecret {
		&self.client_secret
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.finish()
	}
}
