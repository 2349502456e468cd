//! Cached access token with an expiry derived from the JWT `exp` claim.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access token held by the token provider together with its expiry instant.
///
/// Records are immutable; a refresh replaces the whole value.
#[derive(Clone)]
pub struct CachedToken {
	/// Bearer token value.
	pub access_token: TokenSecret,
	/// Instant after which the token must not be sent.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Creates a record for the provided token and expiry.
	pub fn new(access_token: TokenSecret, expires_at: OffsetDateTime) -> Self {
		Self { access_token, expires_at }
	}

	/// Derives a record from a token endpoint response.
	///
	/// The JWT `exp` claim wins; `expires_in` (relative to `issued_at`) is the fallback.
	/// Returns `None` when neither yields an expiry, in which case the token must not be cached.
	pub fn from_grant(
		access_token: TokenSecret,
		expires_in: Option<StdDuration>,
		issued_at: OffsetDateTime,
	) -> Option<Self> {
		let expires_at = jwt_expiry(access_token.expose()).or_else(|| {
			let relative = Duration::try_from(expires_in?).ok()?;

			issued_at.checked_add(relative)
		})?;

		Some(Self::new(access_token, expires_at))
	}

	/// Returns `true` if the token stays valid for longer than `margin` after `now`.
	pub fn is_fresh_at(&self, now: OffsetDateTime, margin: Duration) -> bool {
		let margin = if margin.is_negative() { Duration::ZERO } else { margin };

		match self.expires_at.checked_sub(margin) {
			Some(deadline) => deadline > now,
			None => false,
		}
	}

	/// Convenience helper that checks freshness against the current UTC instant.
	pub fn is_fresh(&self, margin: Duration) -> bool {
		self.is_fresh_at(OffsetDateTime::now_utc(), margin)
	}
}
impl Debug for CachedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedToken")
			.field("access_token", &"<redacted>")
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

#[derive(Deserialize)]
struct ExpiryClaims {
	exp: Option<i64>,
}

/// Reads the `exp` claim of a compact JWT without validating its signature.
pub fn jwt_expiry(token: &str) -> Option<OffsetDateTime> {
	let mut parts = token.split('.');
	let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);

	if parts.next().is_some() {
		return None;
	}

	let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
	let claims = serde_json::from_slice::<ExpiryClaims>(&bytes).ok()?;

	OffsetDateTime::from_unix_timestamp(claims.exp?).ok()
}
