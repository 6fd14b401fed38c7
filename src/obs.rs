//! Tracing helpers for the token exchange.
//!
//! Every stage runs inside a `transip_token.request` span carrying a `stage` field, and
//! [`record_outcome`] emits one event per attempt/success/failure with matching labels. Key
//! material and issued tokens are never recorded.

// self
use crate::_prelude::*;

/// Stages of the token exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
	/// Serializing and signing the request body.
	Sign,
	/// Posting the signed request and reading the response.
	Submit,
	/// The whole `create_token` workflow.
	CreateToken,
}
impl Stage {
	/// Returns a stable label suitable for span or event fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Stage::Sign => "sign",
			Stage::Submit => "submit",
			Stage::CreateToken => "create_token",
		}
	}
}
impl Display for Stage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// How far a stage of the exchange got.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// The stage was entered.
	Attempt,
	/// The stage returned its result to the requester.
	Success,
	/// The stage failed and the invocation ends with that error.
	Failure,
}
impl Outcome {
	/// Label written to the `outcome` event field.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Span wrapper used by the requester.
#[derive(Clone, Debug)]
pub struct StageSpan {
	stage: Stage,
	span: tracing::Span,
}
impl StageSpan {
	/// Creates a new span tagged with the provided stage.
	pub fn new(stage: Stage) -> Self {
		let span = tracing::info_span!("transip_token.request", stage = stage.as_str());

		Self { stage, span }
	}

	/// Enters the span until the returned guard drops.
	pub fn entered(self) -> tracing::span::EnteredSpan {
		self.span.entered()
	}

	/// Runs `f` inside the span and records its outcome.
	pub fn in_scope<T, E>(self, f: impl FnOnce() -> Result<T, E>) -> Result<T, E>
	where
		E: Display,
	{
		let stage = self.stage;
		let _guard = self.entered();

		record_outcome(stage, Outcome::Attempt);

		let result = f();

		match &result {
			Ok(_) => record_outcome(stage, Outcome::Success),
			Err(e) => {
				tracing::warn!(stage = stage.as_str(), error = %e, "token exchange stage failed");
				record_outcome(stage, Outcome::Failure);
			},
		}

		result
	}
}

/// Records a stage outcome as a debug event.
pub fn record_outcome(stage: Stage, outcome: Outcome) {
	tracing::debug!(stage = stage.as_str(), outcome = outcome.as_str(), "token exchange stage");
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(Stage::Sign.to_string(), "sign");
		assert_eq!(Stage::Submit.to_string(), "submit");
		assert_eq!(Stage::CreateToken.to_string(), "create_token");
		assert_eq!(Outcome::Attempt.to_string(), "attempt");
		assert_eq!(Outcome::Success.to_string(), "success");
		assert_eq!(Outcome::Failure.to_string(), "failure");
	}

	#[test]
	fn in_scope_passes_results_through() {
		let ok: Result<u8, String> = StageSpan::new(Stage::Sign).in_scope(|| Ok(42));
		let err: Result<u8, String> =
			StageSpan::new(Stage::Submit).in_scope(|| Err("boom".into()));

		assert_eq!(ok, Ok(42));
		assert_eq!(err, Err("boom".into()));
	}
}
