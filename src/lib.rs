//! Sign a nonce-bearing request with an RSA private key and exchange it for a short-lived TransIP
//! API token.
//!
//! The whole exchange is a single linear workflow: build the request body, sign its exact JSON
//! bytes with RSA/SHA-512, `POST` body and signature to the authentication endpoint, and read the
//! `token` field from the `201 Created` response.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cli;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod obs;
pub mod request;
pub mod requester;

#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::PrivateKey, endpoint::AuthEndpoint, http::ReqwestHttpClient,
		requester::TokenRequester,
	};

	/// Path to the PKCS#8 private key fixture shipped with the test suite.
	pub const FIXTURE_PRIVATE_KEY: &str =
		concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/private_key.pem");
	/// Path to the PKCS#1 encoding of the same private key.
	pub const FIXTURE_PRIVATE_KEY_PKCS1: &str =
		concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/private_key_pkcs1.pem");
	/// Path to the public half of the fixture key.
	pub const FIXTURE_PUBLIC_KEY: &str =
		concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/public_key.pem");

	/// Loads the PKCS#8 fixture key.
	pub fn fixture_private_key() -> PrivateKey {
		PrivateKey::from_pem_file(FIXTURE_PRIVATE_KEY).expect("Failed to load fixture private key.")
	}

	/// Builds a requester pointed at a mock endpoint (typically `httpmock`'s `server.url(..)`).
	pub fn test_requester(endpoint: &str) -> TokenRequester<ReqwestHttpClient> {
		let endpoint = AuthEndpoint::parse(endpoint).expect("Failed to parse mock endpoint.");
		let http_client =
			ReqwestHttpClient::new().expect("Failed to build Reqwest client for tests.");

		TokenRequester::with_http_client(http_client).with_endpoint(endpoint)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		path::{Path, PathBuf},
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Error as ReqwestError, blocking::Client as ReqwestClient};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use rsa;
pub use url;
#[cfg(feature = "reqwest")] pub use requester::create_token;
use color_eyre as _;
#[cfg(test)] use httpmock as _;
