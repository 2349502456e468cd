// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use autharmor_client::{
	_preludet::*,
	client::Client,
	config::ClientConfig,
	error::{Error, TransportError},
	invoke::{RequestDescriptor, UserRef},
	models::UpdateUserRequest,
	oauth::oauth2::http,
	retry::RetryPolicy,
};

async fn mount_authority(server: &MockServer) {
	server
		.mock_async(|when, then| {
			when.method(GET).path("/.well-known/openid-configuration");
			then.status(200).json_body(json!({ "token_endpoint": server.url("/connect/token") }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/connect/token");
			then.status(200).json_body(json!({
				"access_token": jwt_expiring_in(Duration::hours(1)),
				"token_type": "bearer",
			}));
		})
		.await;
}

async fn client_with_authority(server: &MockServer) -> ReqwestTestClient {
	mount_authority(server).await;

	build_reqwest_test_client(&server.base_url())
}

#[tokio::test]
async fn throttled_responses_are_retried_four_times() {
	for status in [408, 429] {
		let server = MockServer::start_async().await;
		let client = client_with_authority(&server).await;
		let api = server
			.mock_async(|when, then| {
				when.method(GET).path("/v3/users");
				then.status(status).body("slow down");
			})
			.await;
		let started = std::time::Instant::now();
		let err = client
			.users()
			.get_users(&Default::default())
			.await
			.expect_err("Persistent throttling should surface as a failure.");

		api.assert_calls_async(4).await;

		assert!(started.elapsed() >= StdDuration::from_millis(900));

		match err {
			Error::HttpFailure { status: observed, body } => {
				assert_eq!(observed, status);
				assert_eq!(body, "slow down");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}
}

#[tokio::test]
async fn throttling_then_success_returns_the_payload() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let mut throttled = server
		.mock_async(|when, then| {
			when.method(GET).path("/v3/users");
			then.status(429);
		})
		.await;
	let client_task = {
		let client = client.clone();

		tokio::spawn(async move { client.users().get_users(&Default::default()).await })
	};

	// Let the first attempt hit the throttled mock, then switch the endpoint to succeed.
	tokio::time::sleep(StdDuration::from_millis(150)).await;
	throttled.delete_async().await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v3/users");
			then.status(200).json_body(json!({
				"users": [{ "username": "alice" }],
				"page_info": { "page_number": 1, "page_size": 10, "total_pages": 1, "total_records": 1 }
			}));
		})
		.await;

	let page = client_task
		.await
		.expect("Call task should not panic.")
		.expect("Call should succeed after throttling clears.");

	assert_eq!(page.users[0].username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
	for status in [400, 401, 403, 404] {
		let server = MockServer::start_async().await;
		let client = client_with_authority(&server).await;
		let api = server
			.mock_async(|when, then| {
				when.method(GET).path(format!("/v3/users/{}", Uuid::nil()));
				then.status(status).json_body(json!({ "message": "rejected" }));
			})
			.await;
		let err = client
			.users()
			.get_user(&UserRef::UserId(Uuid::nil()))
			.await
			.expect_err("Client errors should surface immediately.");

		api.assert_calls_async(1).await;

		assert_eq!(err.status(), Some(status));
		assert!(!err.is_retryable());
		assert_eq!(err.body(), Some("{\"message\":\"rejected\"}"));
	}
}

#[tokio::test]
async fn query_values_round_trip_through_encoding() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v3/users")
				.query_param("sort_column", "a&b=c d")
				.query_param("page_number", "1");
			then.status(200).json_body(json!({ "users": [] }));
		})
		.await;
	let descriptor = RequestDescriptor::new("custom", http::Method::GET, "/v3/users")
		.with_query("sort_column", "a&b=c d")
		.with_query("page_number", 1);
	let value: serde_json::Value =
		client.invoker().invoke(descriptor).await.expect("Encoded query should match.");

	api.assert_async().await;

	assert_eq!(value, json!({ "users": [] }));
}

#[tokio::test]
async fn requests_carry_bearer_token_and_user_agent() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let token = client.token_provider().token().await.expect("Token request should succeed.");
	let api = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path(format!("/v3/users/{}", Uuid::nil()))
				.header("authorization", format!("Bearer {}", token.expose()))
				.header("accept", "application/json")
				.header("content-type", "application/json")
				.header_exists("user-agent")
				.json_body(json!({ "new_username": "bob" }));
			then.status(200).json_body(json!({ "user_id": Uuid::nil(), "username": "bob" }));
		})
		.await;
	let user = client
		.users()
		.update_user(
			&UserRef::UserId(Uuid::nil()),
			&UpdateUserRequest { new_username: Some("bob".into()) },
		)
		.await
		.expect("Update should succeed.");

	api.assert_async().await;

	assert_eq!(user.username.as_deref(), Some("bob"));
}

#[tokio::test]
async fn mismatched_payload_is_a_transport_failure() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let _api = server
		.mock_async(|when, then| {
			when.method(GET).path("/v3/users");
			then.status(200).json_body(json!({ "users": "not-a-list" }));
		})
		.await;
	let err = client
		.users()
		.get_users(&Default::default())
		.await
		.expect_err("Mismatched payloads should fail.");

	match err {
		Error::Transport(TransportError::Decode { source, status }) => {
			assert_eq!(source.path().to_string(), "users");
			assert_eq!(status, Some(200));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn attempt_timeout_surfaces_as_transport_without_retry() {
	let server = MockServer::start_async().await;

	mount_authority(&server).await;

	let api = server
		.mock_async(|when, then| {
			when.method(GET).path("/v3/users");
			then.status(200).delay(StdDuration::from_secs(2)).json_body(json!({ "users": [] }));
		})
		.await;
	let base = Url::parse(&server.base_url()).expect("Mock server URL should parse.");
	let config = ClientConfig::builder(TEST_CLIENT_ID, TEST_CLIENT_SECRET)
		.api_base(base.clone())
		.authority(base)
		.request_timeout(StdDuration::from_millis(300))
		.build()
		.expect("Test configuration should validate.");
	let client = Client::new(config).expect("Reqwest transport should build.");
	let err = client
		.users()
		.get_users(&Default::default())
		.await
		.expect_err("Slow responses should time out.");

	assert!(matches!(err, Error::Transport(TransportError::Network { target: "api", .. })));

	api.assert_calls_async(1).await;
}

#[tokio::test]
async fn dropped_call_stops_retrying() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET).path("/v3/users");
			then.status(429);
		})
		.await;

	client.token_provider().token().await.expect("Token request should succeed.");

	let outcome = tokio::time::timeout(
		StdDuration::from_millis(150),
		client.users().get_users(&Default::default()),
	)
	.await;

	assert!(outcome.is_err(), "The call should still be waiting to retry.");

	tokio::time::sleep(StdDuration::from_millis(800)).await;
	api.assert_calls_async(1).await;
}

#[tokio::test]
async fn retry_policy_is_configurable() {
	let server = MockServer::start_async().await;

	mount_authority(&server).await;

	let api = server
		.mock_async(|when, then| {
			when.method(GET).path("/v3/users");
			then.status(503);
		})
		.await;
	let policy = RetryPolicy {
		retry_statuses: vec![503],
		..RetryPolicy::default().with_max_retries(1).with_delay(StdDuration::from_millis(10))
	};
	let config = test_config_builder(&server.base_url())
		.retry(policy)
		.build()
		.expect("Test configuration should validate.");
	let client = Client::with_http_client(config, test_reqwest_http_client());
	let err = client
		.users()
		.get_users(&Default::default())
		.await
		.expect_err("Persistent 503 should fail.");

	assert_eq!(err.status(), Some(503));
	assert!(err.is_retryable_with(client.invoker().retry_policy()));
	assert!(!err.is_retryable());

	api.assert_calls_async(2).await;
}
