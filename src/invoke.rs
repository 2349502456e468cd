//! Authenticated request pipeline shared by every endpoint service.
//!
//! [`RequestInvoker::invoke`] turns a [`RequestDescriptor`] into one logical API call:
//! resolve the URL, serialize the body, attach the bearer token, send through the retry
//! policy, then classify the final response.

pub mod classify;
pub mod descriptor;

pub use descriptor::*;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest,
	http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
};
// self
use crate::{
	_prelude::*,
	auth::{TokenProvider, TokenSecret},
	config::ClientConfig,
	error::TransportError,
	http::{ApiHttpClient, ResponseMetadataSlot},
	obs::{self, CallKind, CallOutcome, CallSpan},
	retry::{RetryDecision, RetryPolicy},
};

const JSON: &str = "application/json";

/// Sends authenticated requests to the Auth Armor API.
pub struct RequestInvoker<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	token_provider: Arc<TokenProvider<C>>,
	api_base: Url,
	retry: RetryPolicy,
	user_agent: String,
}
impl<C> RequestInvoker<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates an invoker sharing `http_client` and `token_provider`.
	pub fn new(
		config: &ClientConfig,
		http_client: Arc<C>,
		token_provider: Arc<TokenProvider<C>>,
	) -> Self {
		Self {
			http_client,
			token_provider,
			api_base: config.api_base.clone(),
			retry: config.retry.clone(),
			user_agent: config.user_agent.clone(),
		}
	}

	/// Token provider used to authenticate calls.
	pub fn token_provider(&self) -> &Arc<TokenProvider<C>> {
		&self.token_provider
	}

	/// Retry policy applied to every call.
	pub fn retry_policy(&self) -> &RetryPolicy {
		&self.retry
	}

	/// Executes `descriptor` and decodes the 2xx body into `R`.
	///
	/// Dropping the returned future cancels the call; no further attempt is made.
	pub async fn invoke<B, R>(&self, descriptor: RequestDescriptor<'_, B>) -> Result<R>
	where
		B: ?Sized + Serialize + Sync,
		R: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::Api;

		let span = CallSpan::new(KIND, descriptor.operation);
		let result = span
			.instrument(async move {
				let prepared = self.prepare(descriptor)?;
				let token = self.token_provider.token().await?;

				self.send(&prepared, &token).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(err) => {
				obs::record_call_outcome(KIND, CallOutcome::Failure);
				obs::trace_failure(err);
			},
		}

		result
	}

	/// Resolves `path` and the encoded query against the API base.
	///
	/// A `?` is always appended, even when the query is empty. Paths the URL parser would
	/// rewrite (dot segments, including their `%2e` forms) are rejected.
	pub fn resolve_url(&self, path: &str, query: &str) -> Result<Url> {
		let base = self.api_base.as_str().trim_end_matches('/');
		let path = path.trim_start_matches('/');
		let raw = format!("{base}/{path}?{query}");
		let url = Url::parse(&raw)
			.map_err(|source| TransportError::InvalidUrl { url: raw.clone(), source })?;
		let requested = format!("{}/{path}", self.api_base.path().trim_end_matches('/'));

		if url.path() != requested {
			return Err(TransportError::PathRewritten {
				requested,
				resolved: url.path().to_owned(),
			}
			.into());
		}

		Ok(url)
	}

	fn prepare<B>(&self, descriptor: RequestDescriptor<'_, B>) -> Result<PreparedRequest>
	where
		B: ?Sized + Serialize,
	{
		let url = self.resolve_url(&descriptor.path, &descriptor.encoded_query())?;
		let body = descriptor
			.body
			.map(serde_json::to_vec)
			.transpose()
			.map_err(TransportError::Encode)?;

		Ok(PreparedRequest { method: descriptor.method, url, body })
	}

	async fn send<R>(&self, prepared: &PreparedRequest, token: &TokenSecret) -> Result<R>
	where
		R: DeserializeOwned,
	{
		let mut attempts = 0;
		// One handle serves every attempt of the call.
		let handle = self.http_client.with_metadata(ResponseMetadataSlot::default());

		loop {
			attempts += 1;

			let request = self.build_request(prepared, token)?;

			obs::trace_attempt(&prepared.method, &prepared.url, attempts);
			obs::record_call_outcome(CallKind::Api, CallOutcome::Attempt);

			let response = handle
				.call(request)
				.await
				.map_err(|err| classify::map_http_client_error("api", err))?;
			let status = response.status().as_u16();

			if classify::is_success(status) {
				return classify::decode_json(&response);
			}

			match self.retry.decide(status, attempts) {
				RetryDecision::Retry { after } => {
					obs::trace_retry(status, attempts, after);
					obs::record_call_outcome(CallKind::Api, CallOutcome::Retry);
					tokio::time::sleep(after).await;
				},
				RetryDecision::Stop => return Err(classify::http_failure(&response)),
			}
		}
	}

	// `HttpRequest` is not `Clone`, so every attempt rebuilds it.
	fn build_request(
		&self,
		prepared: &PreparedRequest,
		token: &TokenSecret,
	) -> Result<HttpRequest> {
		let mut builder = oauth2::http::Request::builder()
			.method(prepared.method.clone())
			.uri(prepared.url.as_str())
			.header(AUTHORIZATION, token.bearer_header())
			.header(USER_AGENT, self.user_agent.as_str())
			.header(ACCEPT, JSON);

		if prepared.body.is_some() {
			builder = builder.header(CONTENT_TYPE, JSON);
		}

		builder
			.body(prepared.body.clone().unwrap_or_default())
			.map_err(|err| TransportError::from(err).into())
	}
}
impl<C> Debug for RequestInvoker<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestInvoker")
			.field("api_base", &self.api_base.as_str())
			.field("retry", &self.retry)
			.field("user_agent", &self.user_agent)
			.finish()
	}
}

#[derive(Debug)]
struct PreparedRequest {
	method: Method,
	url: Url,
	body: Option<Vec<u8>>,
}
