//! Authentication flow records (authenticator, magic-link email, WebAuthn).

// self
use crate::{_prelude::*, models::ContextData};

/// Starts a push authentication on the Auth Armor authenticator app.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StartAuthenticatorAuthRequest {
	/// Username to authenticate.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	/// Action shown to the user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub action_name: Option<String>,
	/// Short message shown to the user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub short_msg: Option<String>,
	/// Caller-supplied nonce echoed in the validation result.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nonce: Option<String>,
	/// Seconds before the request expires.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timeout_in_seconds: Option<u32>,
	/// Asks the user to confirm a visual verification code.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub use_visual_verify: Option<bool>,
	/// Sends a push notification to enrolled devices.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub send_push: Option<bool>,
	/// End-user IP address.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ip_address: Option<String>,
	/// End-user agent string.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_agent: Option<String>,
	/// Data echoed back on validation.
	#[serde(skip_serializing_if = "ContextData::is_empty")]
	pub context_data: ContextData,
}

/// Result of starting an authenticator authentication.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StartAuthenticatorAuthResponse {
	/// Identifier of the pending authentication.
	pub auth_request_id: Option<Uuid>,
	/// Token later presented to validate the outcome.
	pub auth_validation_token: Option<String>,
	/// Auth profile the request targets.
	pub auth_profile_id: Option<Uuid>,
	/// Visual verification code, when requested.
	pub visual_verify_value: Option<String>,
	/// QR payload for usernameless flows.
	pub qr_code_data: Option<String>,
	/// Whether a push notification was sent.
	pub push_message_sent: bool,
	/// Server status code for the start call.
	pub response_code: Option<i32>,
	/// Server status message for the start call.
	pub response_message: Option<String>,
	/// Seconds before the request expires.
	pub timeout_in_seconds: Option<u32>,
	/// Absolute expiry instant as sent by the server.
	pub timeout_utc_datetime: Option<String>,
}

/// Starts a magic-link email authentication.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StartMagiclinkEmailAuthRequest {
	/// Username (email address) to authenticate.
	pub username: String,
	/// URL the magic link redirects to.
	pub auth_redirect_url: String,
	/// Action shown to the user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub action_name: Option<String>,
	/// Short message shown to the user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub short_msg: Option<String>,
	/// Seconds before the link expires.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timeout_in_seconds: Option<u32>,
	/// End-user IP address.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ip_address: Option<String>,
	/// End-user agent string.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_agent: Option<String>,
	/// Data echoed back on validation.
	#[serde(skip_serializing_if = "ContextData::is_empty")]
	pub context_data: ContextData,
}

/// Result of starting a magic-link email authentication.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StartMagiclinkEmailAuthResponse {
	/// Identifier of the pending authentication.
	pub auth_request_id: Option<Uuid>,
	/// Seconds before the link expires.
	pub timeout_in_seconds: Option<u32>,
	/// Absolute expiry instant as sent by the server.
	pub timeout_utc_datetime: Option<String>,
}

/// Starts a WebAuthn authentication.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StartWebAuthnAuthRequest {
	/// Username to authenticate.
	pub username: String,
	/// WebAuthn client configured in the Auth Armor dashboard.
	pub webauthn_client_id: Uuid,
	/// Action shown to the user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub action_name: Option<String>,
	/// Short message shown to the user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub short_msg: Option<String>,
	/// Seconds before the request expires.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timeout_in_seconds: Option<u32>,
	/// Data echoed back on validation.
	#[serde(skip_serializing_if = "ContextData::is_empty")]
	pub context_data: ContextData,
}

/// Challenge returned when a WebAuthn authentication starts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StartWebAuthnAuthResponse {
	/// Identifier of the pending authentication.
	pub auth_request_id: Option<Uuid>,
	/// Auth Armor signature that must be returned on finish.
	pub aa_sig: Option<String>,
	/// `PublicKeyCredentialRequestOptions` serialized as JSON for the browser.
	pub fido2_json_options: Option<String>,
	/// WebAuthn client the challenge belongs to.
	pub webauthn_client_id: Option<Uuid>,
}

/// Completes a WebAuthn authentication with the browser's assertion.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FinishWebAuthnAuthRequest {
	/// Identifier returned by the start call.
	pub auth_request_id: Uuid,
	/// Signature returned by the start call.
	pub aa_sig: String,
	/// Assertion produced by `navigator.credentials.get`.
	pub authenticator_response_data: serde_json::Value,
	/// WebAuthn client the challenge belongs to.
	pub webauthn_client_id: Uuid,
}

/// Validation material returned once a WebAuthn assertion is accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FinishWebAuthnAuthResponse {
	/// Identifier of the completed authentication.
	pub auth_request_id: Option<Uuid>,
	/// Token presented to the validate endpoint.
	pub auth_validation_token: Option<String>,
	/// Redirect target, when the flow is redirect-based.
	pub redirect_url: Option<String>,
}

/// Validates the outcome of any authentication flow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidateAuthRequest {
	/// Identifier of the authentication to validate.
	pub auth_request_id: String,
	/// Token issued for this authentication.
	pub auth_validation_token: String,
}
impl ValidateAuthRequest {
	/// Creates a validation request.
	pub fn new(auth_request_id: impl Into<String>, auth_validation_token: impl Into<String>) -> Self {
		Self {
			auth_request_id: auth_request_id.into(),
			auth_validation_token: auth_validation_token.into(),
		}
	}
}

/// Result of a validate call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidateAuthResponse {
	/// Validation outcome.
	pub validate_auth_response_details: ValidateAuthResponseDetails,
}
impl ValidateAuthResponse {
	/// Returns `true` when the authentication was approved.
	pub fn authorized(&self) -> bool {
		self.validate_auth_response_details.authorized
	}

	/// Profile of the user who approved the authentication.
	pub fn profile(&self) -> Option<&AuthProfileDetails> {
		self.validate_auth_response_details
			.auth_details
			.as_ref()?
			.response_details
			.as_ref()?
			.auth_profile_details
			.as_ref()
	}
}

/// Validation outcome details.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidateAuthResponseDetails {
	/// Whether the authentication was approved.
	pub authorized: bool,
	/// Request and response details, when available.
	pub auth_details: Option<AuthDetails>,
}

/// Details of an authentication request and its response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthDetails {
	/// What was asked of the user.
	pub request_details: Option<AuthRequestDetails>,
	/// How the user responded.
	pub response_details: Option<AuthResponseDetails>,
}

/// What was asked of the user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthRequestDetails {
	/// Identifier of the authentication.
	pub auth_request_id: Option<Uuid>,
	/// Authentication method (`authenticator`, `webauthn`, `magiclink_email`).
	pub auth_method: Option<String>,
	/// Action shown to the user.
	pub action_name: Option<String>,
	/// Short message shown to the user.
	pub short_msg: Option<String>,
	/// Nonce supplied when the authentication started.
	pub nonce: Option<String>,
	/// Data supplied when the authentication started.
	pub context_data: ContextData,
}

/// How the user responded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthResponseDetails {
	/// Final authentication status.
	pub auth_status: Option<String>,
	/// Numeric response code.
	pub auth_response_code: Option<i32>,
	/// Human-readable response message.
	pub auth_response_message: Option<String>,
	/// Profile that answered.
	pub auth_profile_details: Option<AuthProfileDetails>,
}

/// Identity of the user who answered an authentication.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthProfileDetails {
	/// Auth Armor user id.
	pub user_id: Option<Uuid>,
	/// Username.
	pub username: Option<String>,
}

/// Auth information stored for a past authentication.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GetAuthInfoResponse {
	/// Auth history identifier.
	pub auth_history_id: Option<Uuid>,
	/// User that was asked to authenticate.
	pub user_id: Option<Uuid>,
	/// Username that was asked to authenticate.
	pub username: Option<String>,
	/// Authentication method.
	pub auth_method: Option<String>,
	/// Final authentication status.
	pub auth_status: Option<String>,
	/// Numeric response code.
	pub auth_response_code: Option<i32>,
	/// Action shown to the user.
	pub action_name: Option<String>,
	/// Short message shown to the user.
	pub short_msg: Option<String>,
	/// Creation instant as sent by the server.
	pub date_created: Option<String>,
	/// Data supplied when the authentication started.
	pub context_data: ContextData,
}
