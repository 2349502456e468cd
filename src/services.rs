//! Typed endpoint services.
//!
//! Services are stateless routers: each operation names its method, path, query, and payload,
//! then hands a [`RequestDescriptor`](crate::invoke::RequestDescriptor) to the shared
//! [`RequestInvoker`](crate::invoke::RequestInvoker). Errors propagate unchanged.

pub mod auth;
pub mod user;

pub use auth::AuthService;
pub use user::UserService;
