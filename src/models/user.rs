//! User records and auth history.

// self
use crate::{_prelude::*, models::{ContextData, PageInfo}};

/// Auth Armor user record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct User {
	/// User id.
	pub user_id: Option<Uuid>,
	/// Username.
	pub username: Option<String>,
	/// Creation instant as sent by the server.
	pub date_created: Option<String>,
	/// Last update instant as sent by the server.
	pub date_last_updated: Option<String>,
}

/// Response of the single-user lookup.
pub type GetUserResponse = User;

/// Changes applied by the update-user endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UpdateUserRequest {
	/// New username.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub new_username: Option<String>,
}

/// One page of users.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GetUsersPagedResponse {
	/// Users on this page.
	pub users: Vec<User>,
	/// Paging metadata.
	pub page_info: PageInfo,
}

/// One authentication attempt recorded for a user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthHistoryRecord {
	/// Auth history identifier.
	pub auth_history_id: Option<Uuid>,
	/// Authentication method.
	pub auth_method: Option<String>,
	/// Final authentication status.
	pub auth_status: Option<String>,
	/// Action shown to the user.
	pub action_name: Option<String>,
	/// Short message shown to the user.
	pub short_msg: Option<String>,
	/// Creation instant as sent by the server.
	pub date_created: Option<String>,
	/// Data supplied when the authentication started.
	pub context_data: ContextData,
}

/// One page of auth history records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GetAuthHistoryPagedResponse {
	/// Records on this page.
	pub auth_history_records: Vec<AuthHistoryRecord>,
	/// Paging metadata.
	pub page_info: PageInfo,
}
