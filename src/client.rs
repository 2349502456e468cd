//! Client facade wiring the transport, token provider, invoker, and services together.

// self
use crate::{
	_prelude::*,
	auth::TokenProvider,
	config::ClientConfig,
	http::ApiHttpClient,
	invoke::RequestInvoker,
	services::{AuthService, UserService},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Client backed by the default reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestApiClient = Client<ReqwestHttpClient>;

/// Entry point for the Auth Armor API.
///
/// One transport instance is shared by discovery, token, and API calls, and one token cache
/// serves every service handed out by the client. Cloning is cheap.
pub struct Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	token_provider: Arc<TokenProvider<C>>,
	invoker: Arc<RequestInvoker<C>>,
	auth: AuthService<C>,
	users: UserService<C>,
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Builds a client with a reqwest transport honoring the configured timeout.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::from_config(&config)?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Client<C>
where
	C: ApiHttpClient,
{
	/// Builds a client around a caller-supplied transport.
	pub fn with_http_client(config: ClientConfig, http_client: C) -> Self {
		Self::with_shared_http_client(config, Arc::new(http_client))
	}
}
impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Builds a client around a transport that is already shared.
	pub fn with_shared_http_client(config: ClientConfig, http_client: Arc<C>) -> Self {
		let token_provider = Arc::new(TokenProvider::new(&config, http_client.clone()));
		let invoker =
			Arc::new(RequestInvoker::new(&config, http_client, token_provider.clone()));

		Self {
			auth: AuthService::new(invoker.clone()),
			users: UserService::new(invoker.clone()),
			token_provider,
			invoker,
		}
	}

	/// Authentication operations.
	pub fn auth(&self) -> &AuthService<C> {
		&self.auth
	}

	/// User management operations.
	pub fn users(&self) -> &UserService<C> {
		&self.users
	}

	/// Token provider shared by every service.
	pub fn token_provider(&self) -> &TokenProvider<C> {
		&self.token_provider
	}

	/// Request invoker shared by every service.
	pub fn invoker(&self) -> &RequestInvoker<C> {
		&self.invoker
	}
}
impl<C> Clone for Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			token_provider: self.token_provider.clone(),
			invoker: self.invoker.clone(),
			auth: self.auth.clone(),
			users: self.users.clone(),
		}
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("token_provider", &self.token_provider)
			.field("invoker", &self.invoker)
			.finish()
	}
}
