//! OIDC discovery and the OAuth 2.0 client-credentials exchange.
//!
//! The token endpoint is never configured directly: it is read from the authority's
//! discovery document on every refresh, then the `oauth2` crate performs the grant over the
//! shared [`ApiHttpClient`] transport.

pub use oauth2;

// crates.io
use oauth2::{
	AsyncHttpClient, AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	HttpClientError, RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError},
	http::header::ACCEPT,
};
// self
use crate::{
	_prelude::*,
	auth::{ClientCredentials, TokenSecret},
	config::ClientAuthMethod,
	error::{ConfigError, TransportError},
	http::{ApiHttpClient, ResponseMetadata, ResponseMetadataSlot},
	invoke::classify,
};

type TokenEndpointClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Well-known path of the OpenID Provider configuration document.
pub const DISCOVERY_PATH: &str = ".well-known/openid-configuration";

/// Subset of the OpenID Provider metadata the client relies on.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DiscoveryDocument {
	/// Issuer identifier advertised by the authority.
	#[serde(default)]
	pub issuer: Option<String>,
	/// Token endpoint used for the client-credentials grant.
	pub token_endpoint: Url,
}

/// Access token issued by a client-credentials grant.
#[derive(Clone, Debug)]
pub struct GrantedToken {
	/// Bearer token value.
	pub access_token: TokenSecret,
	/// Relative lifetime reported by the token endpoint.
	pub expires_in: Option<StdDuration>,
}

/// Resolves the discovery document address for `authority`.
pub fn discovery_url(authority: &Url) -> Result<Url> {
	let mut base = authority.clone();

	if !base.path().ends_with('/') {
		let path = format!("{}/", base.path());

		base.set_path(&path);
	}

	base.join(DISCOVERY_PATH)
		.map_err(|source| ConfigError::InvalidUrl { field: "authority", source }.into())
}

/// Fetches and decodes the authority's discovery document.
pub async fn fetch_discovery<C>(http_client: &C, authority: &Url) -> Result<DiscoveryDocument>
where
	C: ?Sized + ApiHttpClient,
{
	let url = discovery_url(authority)?;
	let request = oauth2::http::Request::builder()
		.method(Method::GET)
		.uri(url.as_str())
		.header(ACCEPT, "application/json")
		.body(Vec::new())
		.map_err(TransportError::from)?;
	let handle = http_client.with_metadata(ResponseMetadataSlot::default());
	let response = handle
		.call(request)
		.await
		.map_err(|err| classify::map_http_client_error("discovery", err))?;

	classify::ensure_success(&response)?;
	classify::decode_json(&response)
}

/// Client-credentials exchange bound to a discovered token endpoint.
pub(crate) struct ClientCredentialsExchange<C>
where
	C: ?Sized + ApiHttpClient,
{
	oauth_client: TokenEndpointClient,
	http_client: Arc<C>,
	client_id: String,
}
impl<C> ClientCredentialsExchange<C>
where
	C: ?Sized + ApiHttpClient,
{
	pub(crate) fn new(
		credentials: &ClientCredentials,
		token_endpoint: &Url,
		method: ClientAuthMethod,
		http_client: Arc<C>,
	) -> Self {
		let mut oauth_client = BasicClient::new(ClientId::new(credentials.client_id().to_owned()))
			.set_client_secret(ClientSecret::new(credentials.client_secret().expose().to_owned()))
			.set_token_uri(TokenUrl::from_url(token_endpoint.clone()));

		if matches!(method, ClientAuthMethod::ClientSecretPost) {
			oauth_client = oauth_client.set_auth_type(AuthType::RequestBody);
		}

		Self { oauth_client, http_client, client_id: credentials.client_id().to_owned() }
	}

	pub(crate) async fn exchange(&self) -> Result<GrantedToken> {
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(meta.clone());
		let response = self
			.oauth_client
			.exchange_client_credentials()
			.request_async(&handle)
			.await
			.map_err(|err| map_request_error(&self.client_id, meta.take(), err))?;

		Ok(GrantedToken {
			access_token: TokenSecret::new(response.access_token().secret().to_owned()),
			expires_in: response.expires_in(),
		})
	}
}

fn map_request_error<E>(
	client_id: &str,
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	let status = meta.and_then(|value| value.status);

	match err {
		RequestTokenError::ServerResponse(response) =>
			token_grant_error(client_id, server_message(&response), status),
		RequestTokenError::Request(error) => classify::map_http_client_error("token", error),
		RequestTokenError::Parse(source, _body) => match status {
			Some(code) if !classify::is_success(code) => {
				let message = format!("token endpoint returned HTTP {code}");

				token_grant_error(client_id, message, status)
			},
			_ => TransportError::Decode { source, status }.into(),
		},
		RequestTokenError::Other(message) => token_grant_error(client_id, message, status),
	}
}

fn server_message(response: &BasicErrorResponse) -> String {
	match response.error_description() {
		Some(description) => format!("{}: {description}", response.error().as_ref()),
		None => response.error().as_ref().to_owned(),
	}
}

fn token_grant_error(client_id: &str, message: String, status: Option<u16>) -> Error {
	ConfigError::TokenGrant { client_id: client_id.to_owned(), message, status }.into()
}
