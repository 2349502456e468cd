//! Validated client configuration.
//!
//! [`ClientConfig`] is the single input needed to build a [`Client`](crate::client::Client).
//! It can be assembled through [`ClientConfig::builder`] or deserialized from any serde
//! format; both paths run the same validation, so a blank `client_id`/`client_secret` or a
//! plain-HTTP endpoint fails before any network activity.

// crates.io
use url::Host;
// self
use crate::{_prelude::*, auth::ClientCredentials, error::ConfigError, retry::RetryPolicy};

/// Default Auth Armor API base address.
pub const DEFAULT_API_BASE: &str = "https://api.autharmor.com";
/// Default Auth Armor authorization server (OIDC authority).
pub const DEFAULT_AUTHORITY: &str = "https://login.autharmor.com";
/// User-Agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("autharmor-client/", env!("CARGO_PKG_VERSION"));

/// How client credentials are presented to the token endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	#[default]
	/// Form POST body parameters for `client_id`/`client_secret`.
	ClientSecretPost,
	/// HTTP Basic with `client_id`/`client_secret`.
	ClientSecretBasic,
}

/// Immutable, validated configuration consumed by the client.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ClientConfigBuilder")]
pub struct ClientConfig {
	/// Base address every API path is joined to.
	pub api_base: Url,
	/// Authorization server whose discovery document names the token endpoint.
	pub authority: Url,
	/// Client id/secret pair used for the client-credentials grant.
	pub credentials: ClientCredentials,
	/// Token endpoint authentication style.
	pub client_auth_method: ClientAuthMethod,
	/// Per-attempt transport timeout.
	pub request_timeout: StdDuration,
	/// Cached tokens expiring within this margin are refreshed early.
	pub token_refresh_margin: StdDuration,
	/// Retry policy applied to API calls.
	pub retry: RetryPolicy,
	/// User-Agent header attached to API calls.
	pub user_agent: String,
}
impl ClientConfig {
	/// Starts a builder seeded with the provided credentials and Auth Armor defaults.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> ClientConfigBuilder {
		ClientConfigBuilder::new(client_id, client_secret)
	}

	/// Refresh margin expressed as a signed duration for expiry arithmetic.
	pub(crate) fn refresh_margin(&self) -> Duration {
		Duration::try_from(self.token_refresh_margin).unwrap_or(Duration::MAX)
	}
}
impl TryFrom<ClientConfigBuilder> for ClientConfig {
	type Error = ConfigError;

	fn try_from(builder: ClientConfigBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}

/// Builder (and serde input shape) for [`ClientConfig`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ClientConfigBuilder {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: String,
	/// Optional API base override.
	pub api_base: Option<Url>,
	/// Optional authority override.
	pub authority: Option<Url>,
	/// Token endpoint authentication style.
	pub client_auth_method: ClientAuthMethod,
	/// Per-attempt transport timeout.
	pub request_timeout: StdDuration,
	/// Early refresh margin for cached tokens.
	pub token_refresh_margin: StdDuration,
	/// Retry policy applied to API calls.
	pub retry: RetryPolicy,
	/// Optional User-Agent override.
	pub user_agent: Option<String>,
}
impl ClientConfigBuilder {
	const DEFAULT_REFRESH_MARGIN: StdDuration = StdDuration::from_secs(60);
	const DEFAULT_REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(30);

	/// Creates a new builder for the provided credentials.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			..Self::default()
		}
	}

	/// Overrides the API base address.
	pub fn api_base(mut self, url: Url) -> Self {
		self.api_base = Some(url);

		self
	}

	/// Overrides the authorization server address.
	pub fn authority(mut self, url: Url) -> Self {
		self.authority = Some(url);

		self
	}

	/// Overrides the token endpoint authentication style.
	pub fn client_auth_method(mut self, method: ClientAuthMethod) -> Self {
		self.client_auth_method = method;

		self
	}

	/// Overrides the per-attempt timeout.
	pub fn request_timeout(mut self, timeout: StdDuration) -> Self {
		self.request_timeout = timeout;

		self
	}

	/// Overrides the early refresh margin (defaults to 60 seconds).
	pub fn token_refresh_margin(mut self, margin: StdDuration) -> Self {
		self.token_refresh_margin = margin;

		self
	}

	/// Overrides the retry policy.
	pub fn retry(mut self, policy: RetryPolicy) -> Self {
		self.retry = policy;

		self
	}

	/// Overrides the User-Agent header value.
	pub fn user_agent(mut self, value: impl Into<String>) -> Self {
		self.user_agent = Some(value.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let credentials = ClientCredentials::new(self.client_id, self.client_secret)?;
		let api_base = match self.api_base {
			Some(url) => url,
			None => parse_default("api_base", DEFAULT_API_BASE)?,
		};
		let authority = match self.authority {
			Some(url) => url,
			None => parse_default("authority", DEFAULT_AUTHORITY)?,
		};

		validate_endpoint("api_base", &api_base)?;
		validate_endpoint("authority", &authority)?;

		let user_agent = self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

		if oauth2::http::HeaderValue::from_str(&user_agent).is_err() {
			return Err(ConfigError::InvalidUserAgent { value: user_agent });
		}

		Ok(ClientConfig {
			api_base,
			authority,
			credentials,
			client_auth_method: self.client_auth_method,
			request_timeout: self.request_timeout,
			token_refresh_margin: self.token_refresh_margin,
			retry: self.retry,
			user_agent,
		})
	}
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self {
			client_id: String::new(),
			client_secret: String::new(),
			api_base: None,
			authority: None,
			client_auth_method: ClientAuthMethod::default(),
			request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
			token_refresh_margin: Self::DEFAULT_REFRESH_MARGIN,
			retry: RetryPolicy::default(),
			user_agent: None,
		}
	}
}

fn parse_default(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { field, source })
}

fn validate_endpoint(field: &'static str, url: &Url) -> Result<(), ConfigError> {
	if url.scheme() == "https" || is_loopback(url) {
		Ok(())
	} else {
		Err(ConfigError::InsecureEndpoint { field, url: url.to_string() })
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Ipv4(ip)) => ip.is_loopback(),
		Some(Host::Ipv6(ip)) => ip.is_loopback(),
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		None => false,
	}
}
