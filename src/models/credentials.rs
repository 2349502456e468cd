//! Credential records returned by the v4 credentials endpoints.

// self
use crate::{_prelude::*, models::PageInfo};

/// One credential registered to a user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GetCredentialResponse {
	/// Display name of the credential.
	pub name: Option<String>,
	/// Credential identifier.
	pub credential_id: String,
	/// Registration instant as sent by the server.
	pub date_created: Option<String>,
	/// Device family (`authenticator`, `webauthn`, `magiclink_email`).
	pub device_type: Option<String>,
	/// Whether the credential can be used.
	pub enabled: bool,
}

/// One page of credentials.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GetCredentialsPagedResponse {
	/// Credentials on this page.
	pub credential_records: Vec<GetCredentialResponse>,
	/// Paging metadata.
	pub page_info: PageInfo,
}
