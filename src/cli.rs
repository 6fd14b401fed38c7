//! Command-line surface: argument model, dry-run report, and logging setup.

// crates.io
use clap::Parser;
use tracing_subscriber::EnvFilter;
// self
use crate::{
	_prelude::*,
	endpoint::{AuthEndpoint, DEFAULT_AUTH_ENDPOINT},
	request::{DEFAULT_EXPIRATION_TIME, TokenRequest},
};
#[cfg(feature = "reqwest")]
use crate::{auth::PrivateKey, requester::TokenRequester};

const DEFAULT_LOG_FILTER: &str = "warn";

/// Create TransIP API tokens.
#[derive(Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
	/// The TransIP user.
	pub login: String,
	/// The private key generated from the TransIP console, as PEM text or a path to a PEM file.
	///
	/// See: https://www.transip.nl/cp/account/api/
	#[arg(allow_hyphen_values = true)]
	pub key: String,
	/// The label for the created token.
	pub label: String,
	/// The expiration time of the created token, with a maximum of 1 month.
	///
	/// Examples: '30 minutes', '1 hour', '1 day', '1 week', '2 weeks', '1 month'.
	#[arg(long, default_value = DEFAULT_EXPIRATION_TIME)]
	pub expiration_time: String,
	/// When specified the created token can only be used in read only mode.
	#[arg(long)]
	pub read_only: bool,
	/// When specified the created token is not bound to the whitelist and can be used everywhere.
	#[arg(long)]
	pub global_key: bool,
	/// Print the parsed arguments instead of requesting a token.
	#[arg(long)]
	pub dry_run: bool,
	/// Authentication endpoint override.
	#[arg(long, env = "TRANSIP_AUTH_ENDPOINT", default_value = DEFAULT_AUTH_ENDPOINT, hide = true)]
	pub endpoint: AuthEndpoint,
}
impl Args {
	/// Converts the arguments into a [`TokenRequest`].
	pub fn token_request(&self) -> TokenRequest {
		TokenRequest::new(&self.login, &self.label)
			.with_expiration_time(&self.expiration_time)
			.with_read_only(self.read_only)
			.with_global_key(self.global_key)
	}

	/// Renders the arguments with the key hidden.
	pub fn dry_run_report(&self) -> String {
		format!(
			"Arguments passed:\n\
			=================\n\
			User:            {}\n\
			Key:             <hidden>\n\
			Label:           {}\n\
			Read-only:       {}\n\
			Global:          {}\n\
			Expiration time: {}",
			self.login, self.label, self.read_only, self.global_key, self.expiration_time,
		)
	}

	/// Executes the command and returns the text to print on stdout.
	///
	/// In dry-run mode the key is never read and the endpoint is never contacted.
	#[cfg(feature = "reqwest")]
	pub fn run(&self) -> Result<String> {
		if self.dry_run {
			return Ok(self.dry_run_report());
		}

		let key = PrivateKey::load(&self.key)?;
		let requester = TokenRequester::new()?.with_endpoint(self.endpoint.clone());
		let token = requester.create_token(&self.token_request(), &key)?;

		Ok(token.into_inner())
	}
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Stdout stays reserved for the token. Calling this twice is harmless.
pub fn init_tracing() {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
	let _ =
		tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
