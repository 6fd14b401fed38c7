//! Authentication endpoint configuration.

// self
use crate::_prelude::*;

/// Production TransIP authentication endpoint.
pub const DEFAULT_AUTH_ENDPOINT: &str = "https://api.transip.nl/v6/auth";

/// Errors raised while validating an endpoint URL.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum EndpointError {
	/// URL text could not be parsed.
	#[error("Authentication endpoint `{url}` is not a valid URL.")]
	Parse {
		/// Text that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTPS unless they point at the local machine.
	#[error("The authentication endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Validated URL the signed request is posted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthEndpoint(Url);
impl AuthEndpoint {
	/// Validates an already parsed URL.
	pub fn new(url: Url) -> Result<Self, EndpointError> {
		validate_endpoint(&url)?;

		Ok(Self(url))
	}

	/// Parses and validates URL text.
	pub fn parse(url: &str) -> Result<Self, EndpointError> {
		let parsed =
			Url::parse(url).map_err(|source| EndpointError::Parse { url: url.to_owned(), source })?;

		Self::new(parsed)
	}

	/// Returns the underlying URL.
	pub fn url(&self) -> &Url {
		&self.0
	}
}
impl Default for AuthEndpoint {
	fn default() -> Self {
		let url = Url::parse(DEFAULT_AUTH_ENDPOINT).expect("Default endpoint must be a valid URL.");

		Self(url)
	}
}
impl FromStr for AuthEndpoint {
	type Err = EndpointError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}
impl Display for AuthEndpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.0.as_str())
	}
}

fn validate_endpoint(url: &Url) -> Result<(), EndpointError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(EndpointError::InsecureEndpoint { url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(url::Host::Ipv4(addr)) => addr.is_loopback(),
		Some(url::Host::Ipv6(addr)) => addr.is_loopback(),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_points_at_transip() {
		assert_eq!(AuthEndpoint::default().url().as_str(), DEFAULT_AUTH_ENDPOINT);
	}

	#[test]
	fn insecure_remote_endpoints_are_rejected() {
		let err = AuthEndpoint::parse("http://api.transip.nl/v6/auth")
			.expect_err("Plain HTTP to a remote host must be rejected.");

		assert!(matches!(err, EndpointError::InsecureEndpoint { .. }));
		assert!(AuthEndpoint::parse("ftp://127.0.0.1/auth").is_err());
	}

	#[test]
	fn loopback_endpoints_may_use_http() {
		AuthEndpoint::parse("http://127.0.0.1:8080/v6/auth").expect("IPv4 loopback should pass.");
		AuthEndpoint::parse("http://localhost:8080/v6/auth").expect("localhost should pass.");
		AuthEndpoint::parse("http://[::1]:8080/v6/auth").expect("IPv6 loopback should pass.");
	}

	#[test]
	fn malformed_urls_are_reported() {
		let err = "not a url".parse::<AuthEndpoint>().expect_err("Garbage should not parse.");

		assert!(matches!(err, EndpointError::Parse { .. }));
	}
}
