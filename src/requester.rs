//! Token requester: sign the request body, post it, and read the issued token.
//!
//! The exchange is a single linear round trip with no retries and no caching. A transport
//! failure or any status other than `201 Created` ends the invocation with an error.

// self
use crate::{
	_prelude::*,
	auth::{ApiToken, PrivateKey},
	endpoint::AuthEndpoint,
	error::TransportError,
	http::{AuthHttpClient, AuthResponse},
	obs::{Stage, StageSpan},
	request::{AuthRequest, SignedRequest, TokenRequest},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

const STATUS_CREATED: u16 = 201;
const ERROR_PREVIEW_LIMIT: usize = 256;

#[derive(Deserialize)]
struct TokenResponse {
	token: ApiToken,
}

#[derive(Deserialize)]
struct ErrorResponse {
	error: String,
}

/// Requests API tokens from a single authentication endpoint.
#[derive(Clone)]
pub struct TokenRequester<C>
where
	C: ?Sized + AuthHttpClient,
{
	/// HTTP client used for the exchange.
	pub http_client: Arc<C>,
	/// Endpoint the signed request is posted to.
	pub endpoint: AuthEndpoint,
}
impl<C> TokenRequester<C>
where
	C: ?Sized + AuthHttpClient,
{
	/// Creates a requester for the production endpoint on top of `http_client`.
	pub fn with_http_client(http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), endpoint: AuthEndpoint::default() }
	}

	/// Replaces the endpoint.
	pub fn with_endpoint(mut self, endpoint: AuthEndpoint) -> Self {
		self.endpoint = endpoint;

		self
	}

	/// Serializes `body` once and signs that exact text with `key`.
	pub fn sign(&self, body: &AuthRequest, key: &PrivateKey) -> Result<SignedRequest> {
		StageSpan::new(Stage::Sign).in_scope(|| body.sign(key).map_err(Error::from))
	}

	/// Posts a signed request and returns the issued token.
	pub fn submit(&self, signed: &SignedRequest) -> Result<ApiToken> {
		StageSpan::new(Stage::Submit).in_scope(|| {
			tracing::debug!(endpoint = %self.endpoint, "posting signed request");

			let response = self
				.http_client
				.post_signed(self.endpoint.url(), signed)
				.map_err(TransportError::network)?;

			tracing::debug!(status = response.status, "authentication endpoint answered");

			read_token(response)
		})
	}

	/// Builds a body with a fresh nonce, signs it, submits it, and returns the token.
	pub fn create_token(&self, request: &TokenRequest, key: &PrivateKey) -> Result<ApiToken> {
		StageSpan::new(Stage::CreateToken).in_scope(|| {
			let body = request.to_body();

			tracing::info!(
				login = %body.login,
				label = %body.label,
				nonce = %body.nonce,
				read_only = body.read_only,
				global_key = body.global_key,
				"requesting API token"
			);

			let signed = self.sign(&body, key)?;

			self.submit(&signed)
		})
	}
}
#[cfg(feature = "reqwest")]
impl TokenRequester<ReqwestHttpClient> {
	/// Creates a requester backed by a fresh blocking reqwest client.
	pub fn new() -> Result<Self> {
		Ok(Self::with_http_client(ReqwestHttpClient::new()?))
	}
}
impl<C> Debug for TokenRequester<C>
where
	C: ?Sized + AuthHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRequester").field("endpoint", &self.endpoint).finish()
	}
}

/// Requests a token from the production endpoint with the default reqwest transport.
#[cfg(feature = "reqwest")]
pub fn create_token(request: &TokenRequest, key: &PrivateKey) -> Result<ApiToken> {
	TokenRequester::new()?.create_token(request, key)
}

fn read_token(response: AuthResponse) -> Result<ApiToken> {
	let status = response.status;

	if status != STATUS_CREATED {
		return Err(Error::Request { message: error_message(status, &response.body), status });
	}

	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
	let parsed: TokenResponse = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::MalformedResponse { source, status })?;

	Ok(parsed.token)
}

fn error_message(status: u16, body: &[u8]) -> String {
	if let Ok(ErrorResponse { error }) = serde_json::from_slice(body) {
		return error;
	}

	let text = String::from_utf8_lossy(body);
	let text = text.trim();

	if text.is_empty() {
		status_reason(status).unwrap_or("empty response body").into()
	} else {
		text.chars().take(ERROR_PREVIEW_LIMIT).collect()
	}
}

#[cfg(feature = "reqwest")]
fn status_reason(status: u16) -> Option<&'static str> {
	reqwest::StatusCode::from_u16(status).ok()?.canonical_reason()
}
#[cfg(not(feature = "reqwest"))]
fn status_reason(_: u16) -> Option<&'static str> {
	None
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::Mutex;
	// self
	use super::*;
	use crate::{auth::Signature, error::SigningError};

	const PKCS8_PEM: &str =
		include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/private_key.pem"));

	#[derive(Debug)]
	struct Unreachable;
	impl Display for Unreachable {
		fn fmt(&self, f: &mut Formatter) -> FmtResult {
			f.write_str("Connection refused.")
		}
	}
	impl StdError for Unreachable {}

	/// Records what the requester hands to the transport and replays a canned answer.
	#[derive(Default)]
	struct RecordingHttpClient {
		answer: Option<AuthResponse>,
		seen: Mutex<Vec<(Url, String, Signature)>>,
	}
	impl RecordingHttpClient {
		fn answering(status: u16, body: &str) -> Self {
			Self {
				answer: Some(AuthResponse { status, body: body.as_bytes().to_vec() }),
				..Default::default()
			}
		}

		fn seen(&self) -> Vec<(Url, String, Signature)> {
			self.seen.lock().expect("Recording mutex should not be poisoned.").clone()
		}
	}
	impl AuthHttpClient for RecordingHttpClient {
		type TransportError = Unreachable;

		fn post_signed(
			&self,
			url: &Url,
			request: &SignedRequest,
		) -> Result<AuthResponse, Unreachable> {
			self.seen.lock().expect("Recording mutex should not be poisoned.").push((
				url.clone(),
				request.body().to_owned(),
				request.signature().clone(),
			));

			self.answer.clone().ok_or(Unreachable)
		}
	}

	fn key() -> PrivateKey {
		PrivateKey::from_pem(PKCS8_PEM).expect("PKCS#8 fixture should parse.")
	}

	fn requester(client: &Arc<RecordingHttpClient>) -> TokenRequester<RecordingHttpClient> {
		TokenRequester::with_http_client(Arc::clone(client))
	}

	#[test]
	fn transport_receives_the_signed_bytes() {
		let client = Arc::new(RecordingHttpClient::answering(201, "{\"token\":\"abc123\"}"));
		let key = key();
		let token = requester(&client)
			.create_token(&TokenRequest::new("demo-user", "ci-label"), &key)
			.expect("Token request should succeed.");

		assert_eq!(token.expose(), "abc123");

		let seen = client.seen();

		assert_eq!(seen.len(), 1);

		let (url, body, signature) = &seen[0];

		assert_eq!(url.as_str(), "https://api.transip.nl/v6/auth");
		signature
			.verify(&key.public_key(), body.as_bytes())
			.expect("Transmitted body must be the signed body.");

		let sent: AuthRequest = serde_json::from_str(body).expect("Sent body should be JSON.");

		assert_eq!(sent.expiration_time, "30 minutes");
		assert!(!sent.read_only);
		assert!(!sent.global_key);
	}

	#[test]
	fn non_created_status_maps_to_request_error() {
		let client =
			Arc::new(RecordingHttpClient::answering(409, "{\"error\":\"invalid signature\"}"));
		let err = requester(&client)
			.create_token(&TokenRequest::new("demo-user", "ci-label"), &key())
			.expect_err("A 409 must fail the request.");

		assert!(matches!(
			&err,
			Error::Request { message, status: 409 } if message == "invalid signature"
		));
	}

	#[test]
	fn error_bodies_without_json_fall_back_to_text() {
		assert_eq!(error_message(502, b"  upstream down \n"), "upstream down");
		assert_eq!(error_message(599, b""), "empty response body");
		assert_eq!(error_message(400, b"{\"message\":\"nope\"}"), "{\"message\":\"nope\"}");
		assert_eq!(error_message(500, "x".repeat(1_000).as_bytes()).len(), ERROR_PREVIEW_LIMIT);
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn empty_error_bodies_use_the_status_reason() {
		let err = read_token(AuthResponse { status: 503, body: Vec::new() })
			.expect_err("A 503 must fail the request.");

		assert!(matches!(
			&err,
			Error::Request { message, status: 503 } if message == "Service Unavailable"
		));
		assert!(err.to_string().contains("Service Unavailable"));
		assert_eq!(error_message(401, b"  \n"), "Unauthorized");
	}

	#[test]
	fn created_without_token_is_malformed() {
		let client = Arc::new(RecordingHttpClient::answering(201, "{\"tokens\":\"abc123\"}"));
		let err = requester(&client)
			.create_token(&TokenRequest::new("demo-user", "ci-label"), &key())
			.expect_err("A 201 without a token must fail.");

		assert!(matches!(err, Error::MalformedResponse { status: 201, .. }));
	}

	#[test]
	fn transport_failures_map_to_network_errors() {
		let client = Arc::new(RecordingHttpClient::default());
		let err = requester(&client)
			.create_token(&TokenRequest::new("demo-user", "ci-label"), &key())
			.expect_err("Transport failures must surface.");

		assert!(matches!(err, Error::Network(TransportError::Network { .. })));
	}

	#[test]
	fn sign_is_verifiable_and_submit_reuses_it() {
		let client = Arc::new(RecordingHttpClient::answering(201, "{\"token\":\"abc123\"}"));
		let requester = requester(&client);
		let key = key();
		let body = TokenRequest::new("demo-user", "ci-label").to_body_with_nonce("5f5e100012345");
		let signed = requester.sign(&body, &key).expect("Signing should succeed.");

		signed
			.signature()
			.verify(&key.public_key(), signed.body().as_bytes())
			.expect("Signature should verify.");
		requester.submit(&signed).expect("Submit should succeed.");

		let seen = client.seen();

		assert_eq!(seen[0].1, signed.body());
		assert_eq!(&seen[0].2, signed.signature());
	}

	#[test]
	fn signature_mismatch_is_a_signing_error() {
		let key = key();
		let err = Signature::from(String::from("AAAA"))
			.verify(&key.public_key(), b"{}")
			.expect_err("A bogus signature must not verify.");

		assert!(matches!(Error::from(err), Error::Signing(SigningError::Mismatch(_))));
	}
}
