//! Immutable account credentials for the identity endpoint.

// self
use crate::{_prelude::*, auth::SecretString};

/// API account credentials; loaded once and used to build the authentication request body.
#[derive(Clone, Debug)]
pub struct Credentials {
	username: String,
	password: SecretString,
}
impl Credentials {
	/// Creates credentials from an API username and password.
	pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
		Self { username: username.into(), password: password.into() }
	}

	/// Returns the API username.
	pub fn username(&self) -> &str {
		&self.username
	}

	/// Returns the API password wrapper.
	pub fn password(&self) -> &SecretString {
		&self.password
	}
}
