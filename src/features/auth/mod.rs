//! Session token verification.
//!
//! Login and token issuance belong to the identity provider; this service
//! only verifies the HS256 bearer tokens it hands out and exposes the
//! caller as an [`model::AuthenticatedUser`].

mod validator;

pub mod model;

pub use validator::JwtValidator;
