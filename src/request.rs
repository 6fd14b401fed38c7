//! Request bodies sent to the authentication endpoint.
//!
//! [`TokenRequest`] holds what a caller chooses (login, label, lifetime, flags). Turning it into
//! an [`AuthRequest`] stamps a fresh nonce, and signing an [`AuthRequest`] yields a
//! [`SignedRequest`] that owns the exact JSON text the signature covers. Transports only ever
//! receive a [`SignedRequest`], so the bytes on the wire are the bytes that were signed.

// self
use crate::{
	_prelude::*,
	auth::{self, PrivateKey, Signature},
	error::SigningError,
};

/// Token lifetime used when the caller does not pick one.
pub const DEFAULT_EXPIRATION_TIME: &str = "30 minutes";

/// Caller-facing parameters for a token request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRequest {
	/// TransIP account name.
	pub login: String,
	/// Label shown for the token in the control panel.
	pub label: String,
	/// Human-readable lifetime such as `30 minutes` or `1 week`; the service caps it at one month.
	pub expiration_time: String,
	/// Restricts the token to read-only API calls.
	pub read_only: bool,
	/// Lifts the account's IP whitelist for this token.
	pub global_key: bool,
}
impl TokenRequest {
	/// Creates a request with the default lifetime and both flags off.
	pub fn new(login: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			login: login.into(),
			label: label.into(),
			expiration_time: DEFAULT_EXPIRATION_TIME.into(),
			read_only: false,
			global_key: false,
		}
	}

	/// Overrides the token lifetime.
	pub fn with_expiration_time(mut self, expiration_time: impl Into<String>) -> Self {
		self.expiration_time = expiration_time.into();

		self
	}

	/// Sets the read-only flag.
	pub fn with_read_only(mut self, read_only: bool) -> Self {
		self.read_only = read_only;

		self
	}

	/// Sets the global-key flag.
	pub fn with_global_key(mut self, global_key: bool) -> Self {
		self.global_key = global_key;

		self
	}

	/// Builds the wire body with a freshly generated nonce.
	pub fn to_body(&self) -> AuthRequest {
		self.to_body_with_nonce(auth::generate_nonce())
	}

	/// Builds the wire body with a caller-supplied nonce.
	pub fn to_body_with_nonce(&self, nonce: impl Into<String>) -> AuthRequest {
		AuthRequest {
			login: self.login.clone(),
			nonce: nonce.into(),
			read_only: self.read_only,
			expiration_time: self.expiration_time.clone(),
			label: self.label.clone(),
			global_key: self.global_key,
		}
	}
}

/// JSON body of `POST /v6/auth`.
///
/// Field order is the serialization order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
	/// TransIP account name.
	pub login: String,
	/// Per-request nonce.
	pub nonce: String,
	/// Read-only flag.
	pub read_only: bool,
	/// Requested lifetime.
	pub expiration_time: String,
	/// Token label.
	pub label: String,
	/// Global-key flag.
	pub global_key: bool,
}
impl AuthRequest {
	/// Serializes the body once and signs that exact text.
	pub fn sign(&self, key: &PrivateKey) -> Result<SignedRequest, SigningError> {
		let body = serde_json::to_string(self)?;
		let signature = key.sign(body.as_bytes())?;

		Ok(SignedRequest { body, signature })
	}
}

/// Serialized request body paired with its detached signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
	body: String,
	signature: Signature,
}
impl SignedRequest {
	/// JSON text that was signed and must be transmitted unchanged.
	pub fn body(&self) -> &str {
		&self.body
	}

	/// Signature over [`SignedRequest::body`].
	pub fn signature(&self) -> &Signature {
		&self.signature
	}
}
