//! Request and response records exchanged with the Auth Armor API.
//!
//! Field names follow the API's snake_case JSON. Responses tolerate unknown fields and default
//! anything the server omits, so additive API changes never break decoding.

pub mod auth;
pub mod credentials;
pub mod registration;
pub mod user;

pub use auth::*;
pub use credentials::*;
pub use registration::*;
pub use user::*;

// self
use crate::_prelude::*;

/// Free-form key/value data echoed back by the API.
pub type ContextData = BTreeMap<String, String>;

/// Paging metadata attached to list responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageInfo {
	/// Current page, 1-based.
	pub page_number: u32,
	/// Page size used by the server.
	pub page_size: u32,
	/// Total number of pages.
	pub total_pages: u32,
	/// Total number of records across pages.
	pub total_records: u64,
	/// Sort column applied by the server.
	pub sort_column: Option<String>,
	/// Sort direction applied by the server.
	pub sort_direction: Option<String>,
}
