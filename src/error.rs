//! Crate-level error types shared across key loading, signing, and the token exchange.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Private key could not be read or parsed.
	#[error(transparent)]
	InvalidKey(#[from] KeyError),
	/// Request body could not be signed.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Network(#[from] TransportError),

	/// Authentication endpoint answered with a status other than `201 Created`.
	#[error("Authentication endpoint rejected the request: {message} (status code = {status}).")]
	Request {
		/// Server-reported `error` field, or a fallback built from the response.
		message: String,
		/// HTTP status code returned by the endpoint.
		status: u16,
	},
	/// Authentication endpoint reported success but the body carried no usable token.
	#[error("Authentication endpoint returned a malformed token response.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code returned by the endpoint.
		status: u16,
	},
}
impl Error {
	/// Returns the HTTP status attached to endpoint-level failures.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Request { status, .. } | Self::MalformedResponse { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Failures raised while loading a private key.
#[derive(Debug, ThisError)]
pub enum KeyError {
	/// Key file could not be read.
	#[error("Private key file `{path}` could not be read.")]
	Read {
		/// Path that was passed as the key argument.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Key text does not contain a PEM block.
	#[error("Private key is not PEM encoded.")]
	NotPem,
	/// PKCS#8 (`BEGIN PRIVATE KEY`) decoding failed.
	#[error("Private key is not a valid PKCS#8 RSA key.")]
	Pkcs8(#[source] rsa::pkcs8::Error),
	/// PKCS#1 (`BEGIN RSA PRIVATE KEY`) decoding failed.
	#[error("Private key is not a valid PKCS#1 RSA key.")]
	Pkcs1(#[source] rsa::pkcs1::Error),
}

/// Failures raised while producing a request signature.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	Serialize(#[from] serde_json::Error),
	/// RSA signing primitive failed.
	#[error("RSA/SHA-512 signing failed.")]
	Rsa(#[source] rsa::signature::Error),
	/// Signature text is not valid base64.
	#[error("Signature is not valid base64.")]
	Decode(#[from] base64::DecodeError),
	/// Signature does not match the signed bytes.
	#[error("Signature does not match the message.")]
	Mismatch(#[source] rsa::signature::Error),
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Authentication endpoint is invalid.
	#[error(transparent)]
	Endpoint(#[from] crate::endpoint::EndpointError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the authentication endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
