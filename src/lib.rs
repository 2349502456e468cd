//! Async client for the Auth Armor API: cached client-credentials tokens, bounded retries on
//! throttling, and a typed error taxonomy over every authentication and user endpoint.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod invoke;
pub mod models;
pub mod oauth;
pub mod obs;
pub mod retry;
pub mod services;
#[cfg(feature = "reqwest")]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for unit and integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::Client,
		config::{ClientConfig, ClientConfigBuilder},
		http::ReqwestHttpClient,
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = Client<ReqwestHttpClient>;

	/// Client id used by the integration test helpers.
	pub const TEST_CLIENT_ID: &str = "test-client";
	/// Client secret used by the integration test helpers.
	pub const TEST_CLIENT_SECRET: &str = "test-secret";

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.timeout(StdDuration::from_secs(2))
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Returns a config builder whose API base and authority both point at `base_url`.
	pub fn test_config_builder(base_url: &str) -> ClientConfigBuilder {
		let base = Url::parse(base_url).expect("Mock server URL should parse successfully.");

		ClientConfig::builder(TEST_CLIENT_ID, TEST_CLIENT_SECRET)
			.api_base(base.clone())
			.authority(base)
	}

	/// Constructs a [`Client`] whose API and authorization server both live on `base_url`.
	pub fn build_reqwest_test_client(base_url: &str) -> ReqwestTestClient {
		let config =
			test_config_builder(base_url).build().expect("Test configuration should validate.");

		Client::with_http_client(config, test_reqwest_http_client())
	}

	/// Encodes `claims` as an unsigned JWT so expiry decoding can be exercised in tests.
	pub fn unsigned_jwt(claims: &serde_json::Value) -> String {
		use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

		let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
		let payload = URL_SAFE_NO_PAD.encode(claims.to_string());

		format!("{header}.{payload}.signature")
	}

	/// Unsigned JWT whose `exp` claim lies `offset` away from now.
	pub fn jwt_expiring_in(offset: Duration) -> String {
		let exp = (OffsetDateTime::now_utc() + offset).unix_timestamp();

		unsigned_jwt(&serde_json::json!({ "sub": TEST_CLIENT_ID, "exp": exp }))
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use oauth2::http::Method;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;
	pub use uuid::Uuid;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
pub use uuid;
#[cfg(test)] use {color_eyre as _, httpmock as _};
