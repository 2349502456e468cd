//! Authentication endpoints: start and validate authenticator, magic-link email, and WebAuthn
//! flows, plus auth history lookups.

// self
use crate::{
	_prelude::*,
	http::ApiHttpClient,
	invoke::{ApiPath, RequestDescriptor, RequestInvoker},
	models::{
		FinishWebAuthnAuthRequest, FinishWebAuthnAuthResponse, GetAuthInfoResponse,
		StartAuthenticatorAuthRequest, StartAuthenticatorAuthResponse,
		StartMagiclinkEmailAuthRequest, StartMagiclinkEmailAuthResponse, StartWebAuthnAuthRequest,
		StartWebAuthnAuthResponse, ValidateAuthRequest, ValidateAuthResponse,
	},
};

const START_AUTHENTICATOR: &str = "/v3/auth/authenticator/start";
const VALIDATE_AUTHENTICATOR: &str = "/v3/auth/authenticator/validate/";
const START_MAGICLINK_EMAIL: &str = "/v3/auth/magiclink_email/start";
const VALIDATE_MAGICLINK_EMAIL: &str = "/v3/auth/magiclink_email/validate/";
const START_WEBAUTHN: &str = "/v3/auth/webauthn/start";
const FINISH_WEBAUTHN: &str = "/v3/auth/webauthn/finish";
// The API publishes this route without a leading slash.
const VALIDATE_WEBAUTHN: &str = "v3/auth/webauthn/validate/";
const AUTH_INFO: &str = "/v3/auth";

/// Authentication operations.
pub struct AuthService<C>
where
	C: ?Sized + ApiHttpClient,
{
	invoker: Arc<RequestInvoker<C>>,
}
impl<C> AuthService<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a service sharing `invoker`.
	pub fn new(invoker: Arc<RequestInvoker<C>>) -> Self {
		Self { invoker }
	}

	/// Looks up a past authentication by its auth history id.
	pub async fn get_auth_info(&self, auth_history_id: Uuid) -> Result<GetAuthInfoResponse> {
		let path = ApiPath::new(AUTH_INFO).segment(auth_history_id.to_string());

		self.invoker.invoke(RequestDescriptor::new("get_auth_info", Method::GET, path)).await
	}

	/// Starts a push authentication on the authenticator app.
	pub async fn start_authenticator_auth(
		&self,
		request: &StartAuthenticatorAuthRequest,
	) -> Result<StartAuthenticatorAuthResponse> {
		self.post("start_authenticator_auth", START_AUTHENTICATOR, request).await
	}

	/// Validates an authenticator authentication.
	///
	/// A rejected or expired authentication is a successful call whose
	/// [`ValidateAuthResponse::authorized`] is `false`.
	pub async fn validate_authenticator_auth(
		&self,
		request: &ValidateAuthRequest,
	) -> Result<ValidateAuthResponse> {
		self.post("validate_authenticator_auth", VALIDATE_AUTHENTICATOR, request).await
	}

	/// Sends a magic-link authentication email.
	pub async fn start_magiclink_email_auth(
		&self,
		request: &StartMagiclinkEmailAuthRequest,
	) -> Result<StartMagiclinkEmailAuthResponse> {
		self.post("start_magiclink_email_auth", START_MAGICLINK_EMAIL, request).await
	}

	/// Validates a magic-link email authentication.
	pub async fn validate_magiclink_email_auth(
		&self,
		request: &ValidateAuthRequest,
	) -> Result<ValidateAuthResponse> {
		self.post("validate_magiclink_email_auth", VALIDATE_MAGICLINK_EMAIL, request).await
	}

	/// Starts a WebAuthn authentication and returns the browser challenge.
	pub async fn start_webauthn_auth(
		&self,
		request: &StartWebAuthnAuthRequest,
	) -> Result<StartWebAuthnAuthResponse> {
		self.post("start_webauthn_auth", START_WEBAUTHN, request).await
	}

	/// Submits the browser assertion for a WebAuthn authentication.
	pub async fn finish_webauthn_auth(
		&self,
		request: &FinishWebAuthnAuthRequest,
	) -> Result<FinishWebAuthnAuthResponse> {
		self.post("finish_webauthn_auth", FINISH_WEBAUTHN, request).await
	}

	/// Validates a WebAuthn authentication.
	pub async fn validate_webauthn_auth(
		&self,
		request: &ValidateAuthRequest,
	) -> Result<ValidateAuthResponse> {
		self.post("validate_webauthn_auth", VALIDATE_WEBAUTHN, request).await
	}

	async fn post<B, R>(&self, operation: &'static str, path: &str, body: &B) -> Result<R>
	where
		B: Serialize + Sync,
		R: DeserializeOwned,
	{
		let descriptor = RequestDescriptor::new(operation, Method::POST, path).with_body(body);

		self.invoker.invoke(descriptor).await
	}
}
impl<C> Clone for AuthService<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self { invoker: self.invoker.clone() }
	}
}
impl<C> Debug for AuthService<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthService").field("invoker", &self.invoker).finish()
	}
}
