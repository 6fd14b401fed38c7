//! Detached RSA/SHA-512 signatures in the base64 form carried by the `Signature` header.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use rsa::{
	RsaPrivateKey, RsaPublicKey,
	pkcs1v15::{Signature as RsaSignature, SigningKey, VerifyingKey},
	signature::{SignatureEncoding, Signer, Verifier},
};
use sha2::Sha512;
// self
use crate::{_prelude::*, error::SigningError};

/// Base64-encoded PKCS#1 v1.5 signature over SHA-512.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(String);
impl Signature {
	/// Signs `message` with `key`.
	pub fn sign(key: &RsaPrivateKey, message: &[u8]) -> Result<Self, SigningError> {
		let signer = SigningKey::<Sha512>::new(key.clone());
		let signature = signer.try_sign(message).map_err(SigningError::Rsa)?;

		Ok(Self(STANDARD.encode(signature.to_bytes())))
	}

	/// Verifies this signature against `message` using `key`.
	pub fn verify(&self, key: &RsaPublicKey, message: &[u8]) -> Result<(), SigningError> {
		let raw = STANDARD.decode(&self.0)?;
		let signature = RsaSignature::try_from(raw.as_slice()).map_err(SigningError::Mismatch)?;

		VerifyingKey::<Sha512>::new(key.clone())
			.verify(message, &signature)
			.map_err(SigningError::Mismatch)
	}

	/// Returns the base64 text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl From<String> for Signature {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl AsRef<str> for Signature {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Debug for Signature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Signature({})", self.0)
	}
}
impl Display for Signature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
