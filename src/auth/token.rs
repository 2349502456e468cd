//! Bearer token models: the redacted secret wrapper and the cached, expiry-aware token.

pub mod cached;
pub mod secret;
