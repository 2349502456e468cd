//! Request descriptors, path builders, and the query encoder.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
// self
use crate::_prelude::*;

/// Characters escaped in paths and query components: everything outside the RFC 3986
/// unreserved set.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Everything the invoker needs to issue one API call.
///
/// Descriptors borrow their body, are built by the services, and are consumed by
/// [`RequestInvoker::invoke`](crate::invoke::RequestInvoker::invoke).
#[derive(Clone, Debug)]
pub struct RequestDescriptor<'a, B = ()>
where
	B: ?Sized,
{
	/// Stable operation name used for spans and metrics.
	pub operation: &'static str,
	/// HTTP method.
	pub method: Method,
	/// Path relative to the API base; a leading `/` is optional.
	pub path: String,
	/// Query parameters; ordering is irrelevant.
	pub query: BTreeMap<String, String>,
	/// Optional JSON payload.
	pub body: Option<&'a B>,
}
impl RequestDescriptor<'_> {
	/// Creates a body-less descriptor.
	pub fn new(operation: &'static str, method: Method, path: impl Into<String>) -> Self {
		Self { operation, method, path: path.into(), query: BTreeMap::new(), body: None }
	}
}
impl<'a, B> RequestDescriptor<'a, B>
where
	B: ?Sized,
{
	/// Attaches a JSON payload.
	pub fn with_body<T>(self, body: &'a T) -> RequestDescriptor<'a, T>
	where
		T: ?Sized,
	{
		RequestDescriptor {
			operation: self.operation,
			method: self.method,
			path: self.path,
			query: self.query,
			body: Some(body),
		}
	}

	/// Adds a query parameter; later values replace earlier ones with the same key.
	pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
		self.query.insert(key.into(), value.to_string());

		self
	}

	/// Adds the paging parameters verbatim.
	pub fn with_paging(mut self, paging: &Paging) -> Self {
		paging.append_to(&mut self.query);

		self
	}

	/// Adds the `username` query parameter when `user` is a non-blank username.
	pub fn with_user(mut self, user: &UserRef) -> Self {
		if let UserRef::Username(name) = user
			&& !name.trim().is_empty()
		{
			self.query.insert("username".into(), name.clone());
		}

		self
	}

	/// Encoded query string (without the leading `?`).
	pub fn encoded_query(&self) -> String {
		encode_query(&self.query)
	}
}

/// Incremental path builder that percent-encodes every pushed segment.
///
/// Empty segments are preserved, so `/v3/users/{user}` resolves to `/v3/users/` when the user
/// is addressed by username.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiPath(String);
impl ApiPath {
	/// Starts from a literal, already-encoded prefix such as `/v3/users`.
	pub fn new(prefix: &str) -> Self {
		Self(prefix.trim_end_matches('/').to_owned())
	}

	/// Appends one percent-encoded segment.
	pub fn segment(mut self, segment: impl AsRef<str>) -> Self {
		self.0.push('/');
		self.0.extend(utf8_percent_encode(segment.as_ref(), COMPONENT));

		self
	}

	/// Appends the path form of `user`: its id, or an empty segment for usernames.
	pub fn user(self, user: &UserRef) -> Self {
		match user {
			UserRef::UserId(id) => self.segment(id.to_string()),
			UserRef::Username(_) => self.segment(""),
		}
	}

	/// Appends a literal, already-encoded suffix such as `auth_history`.
	pub fn literal(mut self, suffix: &str) -> Self {
		self.0.push('/');
		self.0.push_str(suffix.trim_matches('/'));

		self
	}

	/// Returns the built path.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl From<ApiPath> for String {
	fn from(path: ApiPath) -> Self {
		path.0
	}
}
impl Display for ApiPath {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Identifies a user either by username or by id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UserRef {
	/// Username, sent as the `username` query parameter.
	Username(String),
	/// User id, substituted into the path.
	UserId(Uuid),
}
impl UserRef {
	/// Addresses a user by username.
	pub fn username(name: impl Into<String>) -> Self {
		Self::Username(name.into())
	}
}
impl From<Uuid> for UserRef {
	fn from(id: Uuid) -> Self {
		Self::UserId(id)
	}
}
impl From<&str> for UserRef {
	fn from(name: &str) -> Self {
		Self::Username(name.to_owned())
	}
}
impl From<String> for UserRef {
	fn from(name: String) -> Self {
		Self::Username(name)
	}
}

/// Paging and sorting parameters for list endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
	/// 1-based page number.
	pub page_number: Option<u32>,
	/// Page size.
	pub page_size: Option<u32>,
	/// Sort direction, passed through verbatim (`asc`/`desc`).
	pub sort_direction: Option<String>,
	/// Column to sort by, passed through verbatim.
	pub sort_column: Option<String>,
}
impl Paging {
	/// Creates a fully specified page request.
	pub fn new(
		page_number: u32,
		page_size: u32,
		sort_direction: impl Into<String>,
		sort_column: impl Into<String>,
	) -> Self {
		Self {
			page_number: Some(page_number),
			page_size: Some(page_size),
			sort_direction: Some(sort_direction.into()),
			sort_column: Some(sort_column.into()),
		}
	}

	/// Requests a page without sorting.
	pub fn page(page_number: u32, page_size: u32) -> Self {
		Self { page_number: Some(page_number), page_size: Some(page_size), ..Self::default() }
	}

	fn append_to(&self, query: &mut BTreeMap<String, String>) {
		if let Some(value) = self.page_number {
			query.insert("page_number".into(), value.to_string());
		}
		if let Some(value) = self.page_size {
			query.insert("page_size".into(), value.to_string());
		}
		if let Some(value) = &self.sort_direction {
			query.insert("sort_direction".into(), value.clone());
		}
		if let Some(value) = &self.sort_column {
			query.insert("sort_column".into(), value.clone());
		}
	}
}

/// Credential families exposed by the credentials endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
	/// Auth Armor authenticator app.
	Authenticator,
	/// WebAuthn/passkey credential.
	#[serde(rename = "webauthn")]
	WebAuthn,
	/// Magic link sent by email.
	MagiclinkEmail,
}
impl CredentialKind {
	/// Path segment used by the credentials endpoints.
	pub const fn as_str(self) -> &'static str {
		match self {
			CredentialKind::Authenticator => "authenticator",
			CredentialKind::WebAuthn => "webauthn",
			CredentialKind::MagiclinkEmail => "magiclink_email",
		}
	}
}
impl Display for CredentialKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Percent-encodes each key and value and joins the pairs with `&`.
pub fn encode_query(query: &BTreeMap<String, String>) -> String {
	let mut encoded = String::new();

	for (key, value) in query {
		if !encoded.is_empty() {
			encoded.push('&');
		}

		encoded.extend(utf8_percent_encode(key, COMPONENT));
		encoded.push('=');
		encoded.extend(utf8_percent_encode(value, COMPONENT));
	}

	encoded
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn query_encoding_escapes_reserved_characters() {
		let descriptor = RequestDescriptor::new("test", Method::GET, "/v3/users")
			.with_query("q", "a&b=c d")
			.with_query("plain", "A-z_0.9~");

		assert_eq!(descriptor.encoded_query(), "plain=A-z_0.9~&q=a%26b%3Dc%20d");
		assert_eq!(encode_query(&BTreeMap::new()), "");
	}

	#[test]
	fn user_ref_resolves_path_or_query() {
		let id = Uuid::nil();
		let by_id = ApiPath::new("/v3/users").user(&UserRef::UserId(id)).literal("auth_history");
		let by_name = ApiPath::new("/v3/users").user(&UserRef::username("alice"));

		assert_eq!(by_id.as_str(), format!("/v3/users/{id}/auth_history"));
		assert_eq!(by_name.as_str(), "/v3/users/");

		let descriptor = RequestDescriptor::new("get_user", Method::GET, by_name)
			.with_user(&UserRef::username("alice"));

		assert_eq!(descriptor.encoded_query(), "username=alice");

		let blank = RequestDescriptor::new("get_user", Method::GET, "/v3/users/")
			.with_user(&UserRef::username("  "));

		assert!(blank.query.is_empty());
	}

	#[test]
	fn segments_are_percent_encoded() {
		let path = ApiPath::new("/v3/auth/").segment("a/b c");

		assert_eq!(path.to_string(), "/v3/auth/a%2Fb%20c");
	}

	#[test]
	fn paging_is_passed_through() {
		let descriptor = RequestDescriptor::new("get_users", Method::GET, "/v3/users")
			.with_paging(&Paging::new(2, 25, "desc", "date_created"));

		assert_eq!(
			descriptor.encoded_query(),
			"page_number=2&page_size=25&sort_column=date_created&sort_direction=desc"
		);
	}

	#[test]
	fn credential_kind_labels() {
		assert_eq!(CredentialKind::WebAuthn.as_str(), "webauthn");
		assert_eq!(
			serde_json::to_string(&CredentialKind::MagiclinkEmail)
				.expect("Credential kind should serialize."),
			"\"magiclink_email\""
		);
	}
}
