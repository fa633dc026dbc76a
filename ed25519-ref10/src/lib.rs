// -*- mode: rust; -*-
//
// This file is part of ed25519-dalek.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! Ed25519 key generation, signing, and verification, on top of the
//! arithmetic in `curve25519-ref10`.
//!
//! # Example
//!
//! Creating an ed25519 signature on a message is simple.
//!
//! First, we need to generate a `SigningKey`, which includes both public and
//! secret halves of an asymmetric key.  To do so, we need a cryptographically
//! secure pseudorandom number generator (CSPRNG).  For this example, we'll use
//! the operating system's builtin PRNG:
//!
//! ```
//! # #[cfg(all(feature = "std", feature = "rand_core"))]
//! # fn main() -> Result<(), ed25519_ref10::SignatureError> {
//! use rand::rngs::OsRng;
//! use ed25519_ref10::{Signature, SigningKey};
//!
//! let mut csprng = OsRng;
//! let signing_key: SigningKey = SigningKey::generate(&mut csprng)?;
//!
//! let message: &[u8] = b"This is a test of the tsunami alert system.";
//! let signature: Signature = signing_key.sign(message);
//!
//! let verifying_key = signing_key.verifying_key();
//! assert!(verifying_key.verify(message, &signature).is_ok());
//!
//! // The boolean form takes raw bytes.
//! assert!(ed25519_ref10::verify(
//!     &signature.to_bytes(),
//!     verifying_key.as_bytes(),
//!     message,
//! ));
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "std", feature = "rand_core")))]
//! # fn main() {}
//! ```
//!
//! The traits from the `signature` crate are implemented as well, so
//! code generic over `Signer` and `Verifier` works unchanged.
//!
//! # Signed messages
//!
//! With `alloc`, [`SigningKey::sign_attached`] produces the 64-byte
//! signature followed by the message, and [`VerifyingKey::open`] checks
//! such a buffer and hands back the message.
//!
//! # Features
//!
//! * `rand_core`: [`SigningKey::generate`].
//! * `serde`: serialization of [`Signature`] and [`VerifyingKey`] as
//!   fixed-size byte tuples.
//! * `zeroize`: secret material is wiped when a [`SigningKey`] is dropped.
//! * `tracing`: key generation and verification emit `tracing` events.
//!   No secret material is ever logged.

#![no_std]
#![warn(future_incompatible, rust_2018_idioms)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

mod constants;
mod errors;
mod signature;
mod signing;
mod verifying;

pub use crate::constants::*;
pub use crate::errors::*;
pub use crate::signature::*;
pub use crate::signing::*;
pub use crate::verifying::*;

pub use ::signature::{Error, SignatureEncoding, Signer, Verifier};

use curve25519_ref10::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_ref10::traits::Identity;
use subtle::Choice;

/// Check a detached signature given as raw bytes.
///
/// Returns `true` only if `signature` is 64 bytes, `public_key` is the
/// 32-byte canonical encoding of a curve point, and the signature is valid
/// for `message` under that key.  Why a check failed is not reported.
pub fn verify(signature: &[u8], public_key: &[u8], message: &[u8]) -> bool {
    let (Ok(signature), Ok(public_key)) = (
        Signature::try_from(signature),
        CompressedEdwardsY::from_slice(public_key),
    ) else {
        return false;
    };
    verify_encoded_key(&public_key, message, &signature)
}

/// Check a signed message (signature followed by message) given as raw
/// bytes.
pub fn verify_attached(signed_message: &[u8], public_key: &[u8]) -> bool {
    if signed_message.len() < SIGNATURE_LENGTH {
        return false;
    }
    let (signature, message) = signed_message.split_at(SIGNATURE_LENGTH);
    verify(signature, public_key, message)
}

// A key that does not decompress is swapped for the identity and the full
// equation still runs; the failed decode is folded into the final answer.
fn verify_encoded_key(
    public_key: &CompressedEdwardsY,
    message: &[u8],
    signature: &Signature,
) -> bool {
    let decoded = public_key.decompress();
    let key_ok = Choice::from(decoded.is_some() as u8);
    let point = decoded.unwrap_or_else(EdwardsPoint::identity);

    verifying::verify_uniform(public_key, &point, key_ok, message, signature).into()
}
