//! Transport primitives for the token exchange.
//!
//! [`AuthHttpClient`] is the crate's only dependency on an HTTP stack. It receives a
//! [`SignedRequest`] rather than a body it could re-encode, and hands back the raw status and
//! body so the requester owns response interpretation.

// crates.io
#[cfg(feature = "reqwest")]
use reqwest::{
	header::{CONTENT_TYPE, HeaderValue},
	redirect::Policy,
};
// self
use crate::{_prelude::*, request::SignedRequest};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Header carrying the base64 request signature.
pub const SIGNATURE_HEADER: &str = "Signature";
/// Content type of the request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Status and body of the endpoint's answer, whatever the status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}

/// Blocking HTTP transport able to post a signed request.
///
/// Implementations must send [`SignedRequest::body`] byte for byte, with
/// `Content-Type: application/json` and the [`SIGNATURE_HEADER`] set to
/// [`SignedRequest::signature`]. Any HTTP status counts as a response; only failures to obtain
/// one are errors.
pub trait AuthHttpClient
where
	Self: Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Posts `request` to `url`.
	fn post_signed(
		&self,
		url: &Url,
		request: &SignedRequest,
	) -> Result<AuthResponse, Self::TransportError>;
}
impl<T> AuthHttpClient for Arc<T>
where
	T: ?Sized + AuthHttpClient,
{
	type TransportError = T::TransportError;

	fn post_signed(
		&self,
		url: &Url,
		request: &SignedRequest,
	) -> Result<AuthResponse, Self::TransportError> {
		(**self).post_signed(url, request)
	}
}

/// Thin wrapper around the blocking [`ReqwestClient`].
///
/// The authentication endpoint answers directly, so redirects are never followed; a redirect
/// surfaces as a non-201 response instead of replaying the signed body elsewhere.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client with redirects disabled.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.redirect(Policy::none())
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AuthHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn post_signed(
		&self,
		url: &Url,
		request: &SignedRequest,
	) -> Result<AuthResponse, ReqwestError> {
		let response = self
			.0
			.post(url.clone())
			.header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
			.header(SIGNATURE_HEADER, request.signature().as_str())
			.body(request.body().to_owned())
			.send()?;
		let status = response.status().as_u16();
		let body = response.bytes()?.to_vec();

		Ok(AuthResponse { status, body })
	}
}
