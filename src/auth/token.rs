//! Redacted wrapper around the token issued by the authentication endpoint.

// self
use crate::_prelude::*;

/// API token returned by the authentication endpoint.
///
/// The value is a bearer credential, so formatting never prints it; use [`ApiToken::expose`] at
/// the single point where the caller hands it over.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);
impl ApiToken {
	/// Wraps a token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Consumes the wrapper and returns the raw token.
	pub fn into_inner(self) -> String {
		self.0
	}
}
impl AsRef<str> for ApiToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for ApiToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ApiToken").field(&"<redacted>").finish()
	}
}
impl Display for ApiToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
