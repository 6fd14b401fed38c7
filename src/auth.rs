//! Request authentication primitives: nonces, private keys, signatures, and issued tokens.

pub mod key;
pub mod nonce;
pub mod signature;
pub mod token;

pub use key::*;
pub use nonce::*;
pub use signature::*;
pub use token::*;
