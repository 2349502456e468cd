//! User endpoints: lookup, update, listing, auth history, registration, and credentials.
//!
//! Operations addressing an existing user take a [`UserRef`]. A
//! [`UserRef::UserId`] is written into the path; a [`UserRef::Username`] leaves the path
//! segment empty and travels as the `username` query parameter instead.

// self
use crate::{
	_prelude::*,
	http::ApiHttpClient,
	invoke::{ApiPath, CredentialKind, Paging, RequestDescriptor, RequestInvoker, UserRef},
	models::{
		FinishWebAuthnRegistrationRequest, FinishWebAuthnRegistrationResponse,
		GetAuthHistoryPagedResponse, GetCredentialResponse, GetCredentialsPagedResponse,
		GetUsersPagedResponse, StartAddWebAuthnCredentialRequest,
		StartAuthenticatorRegistrationRequest, StartAuthenticatorRegistrationResponse,
		StartChangeMagiclinkEmailRequest, StartChangeMagiclinkEmailResponse,
		StartMagiclinkEmailRegistrationRequest,
		StartMagiclinkEmailRegistrationResponse, StartWebAuthnRegistrationRequest,
		StartWebAuthnRegistrationResponse, UpdateUserRequest, User,
		ValidateMagiclinkEmailRegistrationRequest, ValidateMagiclinkEmailRegistrationResponse,
	},
};

const USERS_V3: &str = "/v3/users";
const USERS_V4: &str = "/v4/users";

/// User management operations.
pub struct UserService<C>
where
	C: ?Sized + ApiHttpClient,
{
	invoker: Arc<RequestInvoker<C>>,
}
impl<C> UserService<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a service sharing `invoker`.
	pub fn new(invoker: Arc<RequestInvoker<C>>) -> Self {
		Self { invoker }
	}

	/// Fetches one user.
	pub async fn get_user(&self, user: &UserRef) -> Result<User> {
		let path = ApiPath::new(USERS_V3).user(user);

		self.invoker
			.invoke(RequestDescriptor::new("get_user", Method::GET, path).with_user(user))
			.await
	}

	/// Updates one user and returns the stored record.
	pub async fn update_user(&self, user: &UserRef, request: &UpdateUserRequest) -> Result<User> {
		let path = ApiPath::new(USERS_V3).user(user);

		self.invoker
			.invoke(
				RequestDescriptor::new("update_user", Method::PUT, path)
					.with_user(user)
					.with_body(request),
			)
			.await
	}

	/// Lists users.
	pub async fn get_users(&self, paging: &Paging) -> Result<GetUsersPagedResponse> {
		self.invoker
			.invoke(RequestDescriptor::new("get_users", Method::GET, USERS_V3).with_paging(paging))
			.await
	}

	/// Lists past authentications of one user.
	pub async fn get_user_auth_history(
		&self,
		user: &UserRef,
		paging: &Paging,
	) -> Result<GetAuthHistoryPagedResponse> {
		let path = ApiPath::new(USERS_V3).user(user).literal("auth_history");

		self.invoker
			.invoke(
				RequestDescriptor::new("get_user_auth_history", Method::GET, path)
					.with_user(user)
					.with_paging(paging),
			)
			.await
	}

	/// Enrolls a new user on the authenticator app.
	pub async fn start_authenticator_registration_for_new_user(
		&self,
		request: &StartAuthenticatorRegistrationRequest,
	) -> Result<StartAuthenticatorRegistrationResponse> {
		let path = ApiPath::new(USERS_V3).literal("authenticator/register/start");

		self.post("start_authenticator_registration_for_new_user", path, None, request).await
	}

	/// Enrolls an existing user on the authenticator app.
	pub async fn start_authenticator_registration_for_existing_user(
		&self,
		user: &UserRef,
	) -> Result<StartAuthenticatorRegistrationResponse> {
		let path = ApiPath::new(USERS_V3).user(user).literal("authenticator/register/start");

		self.invoker
			.invoke(
				RequestDescriptor::new(
					"start_authenticator_registration_for_existing_user",
					Method::POST,
					path,
				)
				.with_user(user),
			)
			.await
	}

	/// Starts a WebAuthn registration for a new user.
	pub async fn start_webauthn_registration_for_new_user(
		&self,
		request: &StartWebAuthnRegistrationRequest,
	) -> Result<StartWebAuthnRegistrationResponse> {
		let path = ApiPath::new(USERS_V3).literal("webauthn/register/start");

		self.post("start_webauthn_registration_for_new_user", path, None, request).await
	}

	/// Completes a WebAuthn registration for a new user.
	pub async fn finish_webauthn_registration_for_new_user(
		&self,
		request: &FinishWebAuthnRegistrationRequest,
	) -> Result<FinishWebAuthnRegistrationResponse> {
		let path = ApiPath::new(USERS_V3).literal("webauthn/register/finish");

		self.post("finish_webauthn_registration_for_new_user", path, None, request).await
	}

	/// Starts adding a WebAuthn credential to an existing user.
	pub async fn start_webauthn_registration_for_existing_user(
		&self,
		user: &UserRef,
		request: &StartAddWebAuthnCredentialRequest,
	) -> Result<StartWebAuthnRegistrationResponse> {
		let path = ApiPath::new(USERS_V3).user(user).literal("webauthn/register/start");

		self.post("start_webauthn_registration_for_existing_user", path, Some(user), request).await
	}

	/// Completes adding a WebAuthn credential to an existing user.
	pub async fn finish_webauthn_registration_for_existing_user(
		&self,
		user: &UserRef,
		request: &FinishWebAuthnRegistrationRequest,
	) -> Result<FinishWebAuthnRegistrationResponse> {
		let path = ApiPath::new(USERS_V3).user(user).literal("webauthn/register/finish");

		self.post("finish_webauthn_registration_for_existing_user", path, Some(user), request).await
	}

	/// Sends a magic-link registration email to a new user.
	pub async fn start_magiclink_email_registration_for_new_user(
		&self,
		request: &StartMagiclinkEmailRegistrationRequest,
	) -> Result<StartMagiclinkEmailRegistrationResponse> {
		let path = ApiPath::new(USERS_V3).literal("magiclink_email/register/start");

		self.post("start_magiclink_email_registration_for_new_user", path, None, request).await
	}

	/// Sends a magic-link registration email to an existing user.
	pub async fn start_magiclink_email_registration_for_existing_user(
		&self,
		user: &UserRef,
		request: &StartMagiclinkEmailRegistrationRequest,
	) -> Result<StartMagiclinkEmailRegistrationResponse> {
		let path = ApiPath::new(USERS_V3).user(user).literal("magiclink_email/register/start");

		self.post("start_magiclink_email_registration_for_existing_user", path, Some(user), request)
			.await
	}

	/// Starts an email address change confirmed through a magic link.
	pub async fn start_change_email(
		&self,
		user: &UserRef,
		request: &StartChangeMagiclinkEmailRequest,
	) -> Result<StartChangeMagiclinkEmailResponse> {
		let path = ApiPath::new(USERS_V3).user(user).literal("magiclink_email/update/start");

		self.post("start_change_email", path, Some(user), request).await
	}

	/// Validates the token carried by a magic-link registration email.
	pub async fn validate_magiclink_email_registration(
		&self,
		request: &ValidateMagiclinkEmailRegistrationRequest,
	) -> Result<ValidateMagiclinkEmailRegistrationResponse> {
		let path = ApiPath::new(USERS_V3).literal("register/magiclink_email/validate");

		self.post("validate_magiclink_email_registration", path, None, request).await
	}

	/// Lists a user's credentials, optionally restricted to one kind.
	pub async fn get_user_credentials(
		&self,
		user: &UserRef,
		kind: Option<CredentialKind>,
		paging: &Paging,
	) -> Result<GetCredentialsPagedResponse> {
		let mut path = ApiPath::new(USERS_V4).user(user).literal("credentials");

		if let Some(kind) = kind {
			path = path.literal(kind.as_str());
		}

		self.invoker
			.invoke(
				RequestDescriptor::new("get_user_credentials", Method::GET, path)
					.with_user(user)
					.with_paging(paging),
			)
			.await
	}

	/// Fetches one credential of a user.
	pub async fn get_user_credential(
		&self,
		user: &UserRef,
		credential_id: &str,
	) -> Result<GetCredentialResponse> {
		let path =
			ApiPath::new(USERS_V4).user(user).literal("credentials").segment(credential_id);
		let descriptor =
			RequestDescriptor::new("get_user_credential", Method::GET, path).with_user(user);

		self.invoker.invoke(descriptor).await
	}

	async fn post<B, R>(
		&self,
		operation: &'static str,
		path: ApiPath,
		user: Option<&UserRef>,
		body: &B,
	) -> Result<R>
	where
		B: Serialize + Sync,
		R: DeserializeOwned,
	{
		let mut descriptor = RequestDescriptor::new(operation, Method::POST, path);

		if let Some(user) = user {
			descriptor = descriptor.with_user(user);
		}

		self.invoker.invoke(descriptor.with_body(body)).await
	}
}
impl<C> Clone for UserService<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self { invoker: self.invoker.clone() }
	}
}
impl<C> Debug for UserService<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("UserService").field("invoker", &self.invoker).finish()
	}
}
