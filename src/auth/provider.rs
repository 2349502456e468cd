//! Client-credentials token provider with an in-memory, single-flight cache.
//!
//! [`TokenProvider::token`] answers from the cache while the token stays valid for longer than
//! the configured refresh margin. Otherwise it takes the refresh guard, re-checks the cache so
//! callers that queued behind an in-flight refresh reuse its result, and only then fetches the
//! discovery document and performs the `client_credentials` grant.

mod metrics;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	auth::{CachedToken, ClientCredentials, TokenSecret},
	config::{ClientAuthMethod, ClientConfig},
	http::ApiHttpClient,
	oauth::{self, ClientCredentialsExchange},
	obs::{self, CallKind, CallOutcome, CallSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Token provider backed by the default reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestTokenProvider = TokenProvider<ReqwestHttpClient>;

/// Obtains and caches bearer tokens for API calls.
pub struct TokenProvider<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	credentials: ClientCredentials,
	authority: Url,
	client_auth_method: ClientAuthMethod,
	refresh_margin: Duration,
	cache: RwLock<Option<CachedToken>>,
	refresh_guard: AsyncMutex<()>,
	metrics: RefreshMetrics,
}
impl<C> TokenProvider<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a provider for the configured credentials and authority.
	pub fn new(config: &ClientConfig, http_client: Arc<C>) -> Self {
		Self {
			http_client,
			credentials: config.credentials.clone(),
			authority: config.authority.clone(),
			client_auth_method: config.client_auth_method,
			refresh_margin: config.refresh_margin(),
			cache: RwLock::new(None),
			refresh_guard: AsyncMutex::new(()),
			metrics: RefreshMetrics::default(),
		}
	}

	/// Returns a token valid for longer than the refresh margin, refreshing when needed.
	pub async fn token(&self) -> Result<TokenSecret> {
		if let Some(token) = self.fresh_cached() {
			self.metrics.record_cache_hit();

			return Ok(token);
		}

		let _singleflight = self.refresh_guard.lock().await;

		// Another caller may have refreshed while this one waited for the guard.
		if let Some(token) = self.fresh_cached() {
			self.metrics.record_cache_hit();

			return Ok(token);
		}

		self.refresh().await
	}

	/// Returns the cached token record, fresh or not.
	pub fn cached(&self) -> Option<CachedToken> {
		self.cache.read().clone()
	}

	/// Drops the cached token so the next call performs a refresh.
	pub fn invalidate(&self) {
		self.cache.write().take();
	}

	/// Refresh counters for diagnostics.
	pub fn metrics(&self) -> &RefreshMetrics {
		&self.metrics
	}

	/// Client identifier used for the grant.
	pub fn client_id(&self) -> &str {
		self.credentials.client_id()
	}

	fn fresh_cached(&self) -> Option<TokenSecret> {
		self.cache
			.read()
			.as_ref()
			.filter(|token| token.is_fresh(self.refresh_margin))
			.map(|token| token.access_token.clone())
	}

	async fn refresh(&self) -> Result<TokenSecret> {
		const KIND: CallKind = CallKind::TokenRefresh;

		let span = CallSpan::new(KIND, "client_credentials");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.metrics.record_attempt();

		let result = span.instrument(self.exchange()).await;

		match &result {
			Ok(_) => {
				self.metrics.record_success();
				obs::record_call_outcome(KIND, CallOutcome::Success);
			},
			Err(err) => {
				self.metrics.record_failure();
				obs::record_call_outcome(KIND, CallOutcome::Failure);
				obs::trace_failure(err);
			},
		}

		result
	}

	async fn exchange(&self) -> Result<TokenSecret> {
		let discovery = oauth::fetch_discovery(self.http_client.as_ref(), &self.authority).await?;
		let issued_at = OffsetDateTime::now_utc();
		let granted = ClientCredentialsExchange::new(
			&self.credentials,
			&discovery.token_endpoint,
			self.client_auth_method,
			self.http_client.clone(),
		)
		.exchange()
		.await?;
		let access_token = granted.access_token.clone();

		// Tokens without a known expiry serve the current call only.
		*self.cache.write() =
			CachedToken::from_grant(granted.access_token, granted.expires_in, issued_at);

		Ok(access_token)
	}
}
impl<C> Debug for TokenProvider<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenProvider")
			.field("credentials", &self.credentials)
			.field("authority", &self.authority.as_str())
			.field("client_auth_method", &self.client_auth_method)
			.field("refresh_margin", &self.refresh_margin)
			.field("cached", &*self.cache.read())
			.finish()
	}
}
