//! User registration records for the authenticator, WebAuthn, and magic-link email methods.

// self
use crate::{_prelude::*, models::ContextData};

/// Starts an authenticator app enrollment for a new user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StartAuthenticatorRegistrationRequest {
	/// Username for the new user.
	pub username: String,
	/// Revokes pending invites and issues a fresh one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reset_and_reinvite: Option<bool>,
	/// Revokes earlier invites for the same user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub revoke_previous_invites: Option<bool>,
}

/// Enrollment material for the authenticator app.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StartAuthenticatorRegistrationResponse {
	/// User being enrolled.
	pub user_id: Option<Uuid>,
	/// Username being enrolled.
	pub username: Option<String>,
	/// QR payload scanned by the authenticator app.
	pub qr_code_data: Option<String>,
	/// Enrollment link for mobile devices.
	pub registration_url: Option<String>,
	/// Expiry instant as sent by the server.
	pub date_expires: Option<String>,
}

/// Starts a WebAuthn registration for a new user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StartWebAuthnRegistrationRequest {
	/// Username for the new user.
	pub username: String,
	/// WebAuthn client configured in the Auth Armor dashboard.
	pub webauthn_client_id: Uuid,
	/// Display name shown by the browser.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Seconds before the challenge expires.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timeout_in_seconds: Option<u32>,
}

/// Adds a WebAuthn credential to an existing user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StartAddWebAuthnCredentialRequest {
	/// WebAuthn client configured in the Auth Armor dashboard.
	pub webauthn_client_id: Uuid,
	/// Seconds before the challenge expires.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timeout_in_seconds: Option<u32>,
}

/// Challenge returned when a WebAuthn registration starts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StartWebAuthnRegistrationResponse {
	/// Identifier of the pending registration.
	pub registration_id: Option<Uuid>,
	/// Auth Armor signature that must be returned on finish.
	pub aa_sig: Option<String>,
	/// `PublicKeyCredentialCreationOptions` serialized as JSON for the browser.
	pub fido2_json_options: Option<String>,
	/// WebAuthn client the challenge belongs to.
	pub webauthn_client_id: Option<Uuid>,
	/// User being registered, when already known.
	pub user_id: Option<Uuid>,
}

/// Completes a WebAuthn registration with the browser's attestation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FinishWebAuthnRegistrationRequest {
	/// Identifier returned by the start call.
	pub registration_id: Uuid,
	/// Signature returned by the start call.
	pub aa_sig: String,
	/// Attestation produced by `navigator.credentials.create`.
	pub authenticator_response_data: serde_json::Value,
	/// WebAuthn client the challenge belongs to.
	pub webauthn_client_id: Uuid,
}

/// Result of a completed WebAuthn registration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FinishWebAuthnRegistrationResponse {
	/// Registered user.
	pub user_id: Option<Uuid>,
	/// Registered username.
	pub username: Option<String>,
	/// New credential identifier.
	pub credential_id: Option<String>,
}

/// Starts a magic-link email registration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StartMagiclinkEmailRegistrationRequest {
	/// Email address the link is sent to.
	pub email_address: String,
	/// URL the magic link redirects to.
	pub registration_redirect_url: String,
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

/// Starts an email address change confirmed through a magic link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StartChangeMagiclinkEmailRequest {
	/// New email address.
	pub new_email_address: String,
	/// URL the magic link redirects to.
	pub registration_redirect_url: String,
	/// Action shown to the user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub action_name: Option<String>,
	/// Short message shown to the user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub short_msg: Option<String>,
	/// Seconds before the link expires.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timeout_in_seconds: Option<u32>,
	/// Data echoed back on validation.
	#[serde(skip_serializing_if = "ContextData::is_empty")]
	pub context_data: ContextData,
}

/// Result of starting a magic-link email registration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StartMagiclinkEmailRegistrationResponse {
	/// User the link was issued for.
	pub user_id: Option<Uuid>,
	/// Username the link was issued for.
	pub username: Option<String>,
	/// Seconds before the link expires.
	pub timeout_in_seconds: Option<u32>,
	/// Absolute expiry instant as sent by the server.
	pub timeout_utc_datetime: Option<String>,
}

/// Result of starting an email address change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StartChangeMagiclinkEmailResponse {
	/// User whose address is changing.
	pub user_id: Option<Uuid>,
	/// Username of that user.
	pub username: Option<String>,
	/// Address the confirmation link was sent to.
	pub new_email_address: Option<String>,
	/// Seconds before the link expires.
	pub timeout_in_seconds: Option<u32>,
	/// Absolute expiry instant as sent by the server.
	pub timeout_utc_datetime: Option<String>,
}

/// Validates the token carried by a magic-link registration email.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidateMagiclinkEmailRegistrationRequest {
	/// Token from the registration link.
	pub registration_validation_token: String,
}

/// Identity confirmed by a magic-link registration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidateMagiclinkEmailRegistrationResponse {
	/// Registered user.
	pub user_id: Option<Uuid>,
	/// Registered username.
	pub username: Option<String>,
	/// Confirmed email address.
	pub email_address: Option<String>,
	/// Data supplied when the registration started.
	pub context_data: ContextData,
}
