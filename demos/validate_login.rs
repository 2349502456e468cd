//! Demonstrates starting an authenticator push login and validating its outcome against a local
//! mock of the Auth Armor API, with the token cached across both calls.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use autharmor_client::{
	client::Client,
	config::ClientConfig,
	models::{StartAuthenticatorAuthRequest, ValidateAuthRequest},
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let discovery_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/.well-known/openid-configuration");
			then.status(200)
				.header("content-type", "application/json")
				.body(format!("{{\"token_endpoint\":\"{}\"}}", server.url("/connect/token")));
		})
		.await;
	let _grant = server
		.mock_async(|when, then| {
			when.method(POST).path("/connect/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let _start = server
		.mock_async(|when, then| {
			when.method(POST).path("/v3/auth/authenticator/start");
			then.status(200).header("content-type", "application/json").body(
				"{\"auth_request_id\":\"1d3c1a5e-4f0a-4b61-9f4f-0a8f7d3b2c11\",\
				 \"auth_validation_token\":\"demo-validation\",\"push_message_sent\":true}",
			);
		})
		.await;
	let _validate = server
		.mock_async(|when, then| {
			when.method(POST).path("/v3/auth/authenticator/validate/");
			then.status(200).header("content-type", "application/json").body(
				"{\"validate_auth_response_details\":{\"authorized\":true,\"auth_details\":\
				 {\"response_details\":{\"auth_profile_details\":{\"username\":\"alice\"}}}}}",
			);
		})
		.await;
	let base = Url::parse(&server.base_url())?;
	let config = ClientConfig::builder("demo-client", "super-secret")
		.api_base(base.clone())
		.authority(base)
		.build()?;
	let client = Client::new(config)?;
	let started = client
		.auth()
		.start_authenticator_auth(&StartAuthenticatorAuthRequest {
			username: Some("alice".into()),
			action_name: Some("Login".into()),
			..Default::default()
		})
		.await?;
	let request_id = started.auth_request_id.map(|id| id.to_string()).unwrap_or_default();
	let validation_token = started.auth_validation_token.unwrap_or_default();
	let outcome = client
		.auth()
		.validate_authenticator_auth(&ValidateAuthRequest::new(request_id, validation_token))
		.await?;
	let username = outcome.profile().and_then(|profile| profile.username.as_deref());

	println!("Authorized: {}, user: {}.", outcome.authorized(), username.unwrap_or("<unknown>"));

	discovery_mock.assert_async().await;

	Ok(())
}
