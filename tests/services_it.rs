// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::json;
// self
use autharmor_client::{
	_preludet::*,
	error::TransportError,
	invoke::{CredentialKind, Paging, UserRef},
	models::{
		FinishWebAuthnAuthRequest, FinishWebAuthnRegistrationRequest,
		StartAddWebAuthnCredentialRequest, StartAuthenticatorAuthRequest,
		StartAuthenticatorRegistrationRequest, StartChangeMagiclinkEmailRequest,
		StartMagiclinkEmailAuthRequest, StartMagiclinkEmailRegistrationRequest,
		StartWebAuthnAuthRequest, StartWebAuthnRegistrationRequest, ValidateAuthRequest,
		ValidateMagiclinkEmailRegistrationRequest,
	},
};

const USER_ID: &str = "6f1ee5a2-4a5e-4a5b-9e43-6b1c5f0f3b1a";

async fn client_with_authority(server: &MockServer) -> ReqwestTestClient {
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

	build_reqwest_test_client(&server.base_url())
}

fn user_id() -> Uuid {
	Uuid::parse_str(USER_ID).expect("User id fixture should parse.")
}

async fn mount_route(server: &MockServer, method: httpmock::Method, path: String) -> Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(method).path(path);
			then.status(200).json_body(json!({}));
		})
		.await
}

#[tokio::test]
async fn get_user_by_username_uses_query_and_empty_segment() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET).path("/v3/users/").query_param("username", "alice");
			then.status(200).json_body(json!({
				"user_id": USER_ID,
				"username": "alice",
				"date_created": "2024-01-01T00:00:00"
			}));
		})
		.await;
	let user = client
		.users()
		.get_user(&UserRef::username("alice"))
		.await
		.expect("Lookup by username should succeed.");

	api.assert_async().await;

	assert_eq!(user.username.as_deref(), Some("alice"));
	assert_eq!(user.user_id, Some(user_id()));
}

#[tokio::test]
async fn repeated_get_returns_equivalent_records() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/v3/users/{USER_ID}"));
			then.status(200).json_body(json!({ "user_id": USER_ID, "username": "alice" }));
		})
		.await;
	let user = UserRef::UserId(user_id());
	let first = client.users().get_user(&user).await.expect("First lookup should succeed.");
	let second = client.users().get_user(&user).await.expect("Second lookup should succeed.");

	api.assert_calls_async(2).await;

	assert_eq!(first, second);
}

#[tokio::test]
async fn validate_authenticator_reports_authorized_profile() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let api = server
		.mock_async(|when, then| {
			when.method(POST).path("/v3/auth/authenticator/validate/").json_body(json!({
				"auth_request_id": "req-1",
				"auth_validation_token": "good-token",
			}));
			then.status(200).json_body(json!({
				"validate_auth_response_details": {
					"authorized": true,
					"auth_details": {
						"response_details": {
							"auth_status": "Success",
							"auth_profile_details": { "user_id": USER_ID, "username": "alice" }
						}
					}
				}
			}));
		})
		.await;
	let response = client
		.auth()
		.validate_authenticator_auth(&ValidateAuthRequest::new("req-1", "good-token"))
		.await
		.expect("Validation should succeed.");

	api.assert_async().await;

	assert!(response.authorized());

	let profile = response.profile().expect("Authorized responses should carry a profile.");

	assert_eq!(profile.username.as_deref(), Some("alice"));
	assert_eq!(profile.user_id, Some(user_id()));
}

#[tokio::test]
async fn validate_authenticator_rejection_is_not_an_error() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let _api = server
		.mock_async(|when, then| {
			when.method(POST).path("/v3/auth/authenticator/validate/");
			then.status(200).json_body(json!({
				"validate_auth_response_details": { "authorized": false }
			}));
		})
		.await;
	let response = client
		.auth()
		.validate_authenticator_auth(&ValidateAuthRequest::new("req-1", "expired-token"))
		.await
		.expect("A rejected validation should still decode.");

	assert!(!response.authorized());
	assert!(response.profile().is_none());
}

#[tokio::test]
async fn webauthn_validate_route_resolves_without_leading_slash() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let api = server
		.mock_async(|when, then| {
			when.method(POST).path("/v3/auth/webauthn/validate/");
			then.status(200).json_body(json!({
				"validate_auth_response_details": { "authorized": true }
			}));
		})
		.await;
	let response = client
		.auth()
		.validate_webauthn_auth(&ValidateAuthRequest::new("req-2", "token"))
		.await
		.expect("WebAuthn validation should succeed.");

	api.assert_async().await;

	assert!(response.authorized());
}

#[tokio::test]
async fn start_authenticator_auth_posts_payload() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let api = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v3/auth/authenticator/start")
				.json_body(json!({ "username": "alice", "action_name": "Login" }));
			then.status(200).json_body(json!({
				"auth_request_id": USER_ID,
				"auth_validation_token": "validation-token",
				"push_message_sent": true
			}));
		})
		.await;
	let response = client
		.auth()
		.start_authenticator_auth(&StartAuthenticatorAuthRequest {
			username: Some("alice".into()),
			action_name: Some("Login".into()),
			..Default::default()
		})
		.await
		.expect("Start should succeed.");

	api.assert_async().await;

	assert!(response.push_message_sent);
	assert_eq!(response.auth_validation_token.as_deref(), Some("validation-token"));
}

#[tokio::test]
async fn get_auth_info_puts_history_id_in_path() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/v3/auth/{USER_ID}"));
			then.status(200).json_body(json!({ "auth_history_id": USER_ID, "auth_status": "Success" }));
		})
		.await;
	let info = client.auth().get_auth_info(user_id()).await.expect("Lookup should succeed.");

	api.assert_async().await;

	assert_eq!(info.auth_status.as_deref(), Some("Success"));
}

#[tokio::test]
async fn credentials_by_kind_pass_paging_verbatim() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(format!("/v4/users/{USER_ID}/credentials/webauthn"))
				.query_param("page_number", "2")
				.query_param("page_size", "5")
				.query_param("sort_direction", "desc")
				.query_param("sort_column", "date_created");
			then.status(200).json_body(json!({
				"credential_records": [{
					"name": "Laptop",
					"credential_id": "cred-1",
					"device_type": "webauthn",
					"enabled": true
				}],
				"page_info": { "page_number": 2, "page_size": 5, "total_pages": 2, "total_records": 6 }
			}));
		})
		.await;
	let page = client
		.users()
		.get_user_credentials(
			&UserRef::UserId(user_id()),
			Some(CredentialKind::WebAuthn),
			&Paging::new(2, 5, "desc", "date_created"),
		)
		.await
		.expect("Credential listing should succeed.");

	api.assert_async().await;

	assert_eq!(page.credential_records[0].credential_id, "cred-1");
	assert_eq!(page.page_info.total_records, 6);
}

#[tokio::test]
async fn credential_detail_by_username_keeps_empty_user_segment() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v4/users//credentials/cred-1")
				.query_param("username", "alice");
			then.status(200).json_body(json!({ "credential_id": "cred-1", "enabled": false }));
		})
		.await;
	let credential = client
		.users()
		.get_user_credential(&UserRef::username("alice"), "cred-1")
		.await
		.expect("Credential lookup should succeed.");

	api.assert_async().await;

	assert!(!credential.enabled);
}

#[tokio::test]
async fn existing_user_registration_by_id_has_no_body() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let api = server
		.mock_async(|when, then| {
			when.method(POST).path(format!("/v3/users/{USER_ID}/authenticator/register/start"));
			then.status(200).json_body(json!({ "user_id": USER_ID, "qr_code_data": "qr" }));
		})
		.await;
	let response = client
		.users()
		.start_authenticator_registration_for_existing_user(&UserRef::UserId(user_id()))
		.await
		.expect("Registration start should succeed.");

	api.assert_async().await;

	assert_eq!(response.qr_code_data.as_deref(), Some("qr"));
}

#[tokio::test]
async fn magiclink_registration_round_trip() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let start = server
		.mock_async(|when, then| {
			when.method(POST).path("/v3/users/magiclink_email/register/start").json_body(json!({
				"email_address": "alice@example.com",
				"registration_redirect_url": "https://app.example.com/register"
			}));
			then.status(200).json_body(json!({ "timeout_in_seconds": 600 }));
		})
		.await;
	let validate = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v3/users/register/magiclink_email/validate")
				.json_body(json!({ "registration_validation_token": "reg-token" }));
			then.status(200).json_body(json!({
				"user_id": USER_ID,
				"username": "alice@example.com",
				"email_address": "alice@example.com"
			}));
		})
		.await;
	let started = client
		.users()
		.start_magiclink_email_registration_for_new_user(&StartMagiclinkEmailRegistrationRequest {
			email_address: "alice@example.com".into(),
			registration_redirect_url: "https://app.example.com/register".into(),
			..Default::default()
		})
		.await
		.expect("Registration start should succeed.");
	let validated = client
		.users()
		.validate_magiclink_email_registration(&ValidateMagiclinkEmailRegistrationRequest {
			registration_validation_token: "reg-token".into(),
		})
		.await
		.expect("Registration validation should succeed.");

	start.assert_async().await;
	validate.assert_async().await;

	assert_eq!(started.timeout_in_seconds, Some(600));
	assert_eq!(validated.username.as_deref(), Some("alice@example.com"));
}

#[tokio::test]
async fn dot_segment_credential_ids_never_leave_the_client() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let parent = mount_route(&server, GET, format!("/v4/users/{USER_ID}/")).await;
	let listing = mount_route(&server, GET, format!("/v4/users/{USER_ID}/credentials/")).await;

	for credential_id in ["..", "."] {
		let err = client
			.users()
			.get_user_credential(&UserRef::UserId(user_id()), credential_id)
			.await
			.expect_err("Dot-segment ids should be rejected.");

		assert!(
			matches!(err, Error::Transport(TransportError::PathRewritten { .. })),
			"credential id {credential_id:?} produced {err:?}"
		);
	}

	parent.assert_calls_async(0).await;
	listing.assert_calls_async(0).await;
}

#[tokio::test]
async fn auth_flow_routes_hit_their_endpoints() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let auth = client.auth();
	let magiclink_start = mount_route(&server, POST, "/v3/auth/magiclink_email/start".into()).await;
	let magiclink_validate =
		mount_route(&server, POST, "/v3/auth/magiclink_email/validate/".into()).await;
	let webauthn_start = mount_route(&server, POST, "/v3/auth/webauthn/start".into()).await;
	let webauthn_finish = mount_route(&server, POST, "/v3/auth/webauthn/finish".into()).await;

	auth.start_magiclink_email_auth(&StartMagiclinkEmailAuthRequest::default())
		.await
		.expect("Magic-link start should succeed.");
	auth.validate_magiclink_email_auth(&ValidateAuthRequest::new("req", "token"))
		.await
		.expect("Magic-link validation should succeed.");
	auth.start_webauthn_auth(&StartWebAuthnAuthRequest::default())
		.await
		.expect("WebAuthn start should succeed.");
	auth.finish_webauthn_auth(&FinishWebAuthnAuthRequest::default())
		.await
		.expect("WebAuthn finish should succeed.");

	magiclink_start.assert_async().await;
	magiclink_validate.assert_async().await;
	webauthn_start.assert_async().await;
	webauthn_finish.assert_async().await;
}

#[tokio::test]
async fn registration_routes_hit_their_endpoints() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let users = client.users();
	let user = UserRef::UserId(user_id());
	let authenticator_new =
		mount_route(&server, POST, "/v3/users/authenticator/register/start".into()).await;
	let webauthn_new_start =
		mount_route(&server, POST, "/v3/users/webauthn/register/start".into()).await;
	let webauthn_new_finish =
		mount_route(&server, POST, "/v3/users/webauthn/register/finish".into()).await;
	let webauthn_existing_start =
		mount_route(&server, POST, format!("/v3/users/{USER_ID}/webauthn/register/start")).await;
	let webauthn_existing_finish =
		mount_route(&server, POST, format!("/v3/users/{USER_ID}/webauthn/register/finish")).await;
	let magiclink_existing = mount_route(
		&server,
		POST,
		format!("/v3/users/{USER_ID}/magiclink_email/register/start"),
	)
	.await;
	let change_email =
		mount_route(&server, POST, format!("/v3/users/{USER_ID}/magiclink_email/update/start"))
			.await;
	let auth_history = mount_route(&server, GET, format!("/v3/users/{USER_ID}/auth_history")).await;

	users
		.start_authenticator_registration_for_new_user(
			&StartAuthenticatorRegistrationRequest::default(),
		)
		.await
		.expect("Authenticator registration should succeed.");
	users
		.start_webauthn_registration_for_new_user(&StartWebAuthnRegistrationRequest::default())
		.await
		.expect("WebAuthn registration start should succeed.");
	users
		.finish_webauthn_registration_for_new_user(&FinishWebAuthnRegistrationRequest::default())
		.await
		.expect("WebAuthn registration finish should succeed.");
	users
		.start_webauthn_registration_for_existing_user(
			&user,
			&StartAddWebAuthnCredentialRequest::default(),
		)
		.await
		.expect("WebAuthn credential start should succeed.");
	users
		.finish_webauthn_registration_for_existing_user(
			&user,
			&FinishWebAuthnRegistrationRequest::default(),
		)
		.await
		.expect("WebAuthn credential finish should succeed.");
	users
		.start_magiclink_email_registration_for_existing_user(
			&user,
			&StartMagiclinkEmailRegistrationRequest::default(),
		)
		.await
		.expect("Magic-link registration should succeed.");
	users
		.start_change_email(&user, &StartChangeMagiclinkEmailRequest::default())
		.await
		.expect("Email change should succeed.");
	users
		.get_user_auth_history(&user, &Paging::default())
		.await
		.expect("Auth history should succeed.");

	for mock in [
		&authenticator_new,
		&webauthn_new_start,
		&webauthn_new_finish,
		&webauthn_existing_start,
		&webauthn_existing_finish,
		&magiclink_existing,
		&change_email,
		&auth_history,
	] {
		mock.assert_async().await;
	}
}

#[tokio::test]
async fn change_email_reports_pending_address() {
	let server = MockServer::start_async().await;
	let client = client_with_authority(&server).await;
	let api = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(format!("/v3/users/{USER_ID}/magiclink_email/update/start"))
				.json_body_includes(r#"{ "new_email_address": "new@example.com" }"#);
			then.status(200).json_body(json!({
				"user_id": USER_ID,
				"username": "alice",
				"new_email_address": "new@example.com",
				"timeout_in_seconds": 300
			}));
		})
		.await;
	let response = client
		.users()
		.start_change_email(
			&UserRef::UserId(user_id()),
			&StartChangeMagiclinkEmailRequest {
				new_email_address: "new@example.com".into(),
				registration_redirect_url: "https://app.example.com/confirm".into(),
				..Default::default()
			},
		)
		.await
		.expect("Email change should start.");

	api.assert_async().await;

	assert_eq!(response.user_id, Some(user_id()));
	assert_eq!(response.new_email_address.as_deref(), Some("new@example.com"));
	assert_eq!(response.timeout_in_seconds, Some(300));
}
