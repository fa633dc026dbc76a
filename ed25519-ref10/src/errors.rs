// -*- mode: rust; -*-
//
// This file is part of ed25519-dalek.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! Errors which may occur when parsing keys and/or signatures to or from wire formats.

// rustc seems to think the typenames in match statements (e.g. in
// Display) should be snake cased, for some reason.
#![allow(non_snake_case)]

use core::fmt;
use core::fmt::Display;

#[cfg(feature = "std")]
use std::error::Error;

/// Internal errors.  Most application-level developers will likely not
/// need to pay any attention to these.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum InternalError {
    PointDecompression,
    /// An error in the length of bytes handed to a constructor.
    ///
    /// To use this, pass a string specifying the `name` of the type which is
    /// returning the error, and the `length` in bytes which its constructor
    /// expects.
    BytesLength {
        name: &'static str,
        length: usize,
    },
    /// The verification equation wasn't satisfied
    Verify,
    /// The random source could not produce key material.
    Entropy,
    /// The public half of a keypair did not match the secret half.
    MismatchedKeypair,
}

impl Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InternalError::PointDecompression => write!(f, "Cannot decompress Edwards point"),
            InternalError::BytesLength { name: n, length: l } => {
                write!(f, "{} must be {} bytes in length", n, l)
            }
            InternalError::Verify => write!(f, "Verification equation was not satisfied"),
            InternalError::Entropy => write!(f, "Random number generator failed"),
            InternalError::MismatchedKeypair => {
                write!(f, "Public key does not match the secret key")
            }
        }
    }
}

#[cfg(feature = "std")]
impl Error for InternalError {}

/// The broad class of a [`SignatureError`].
///
/// Every reason a signature, key or signed message fails to parse or verify
/// is reported as [`ErrorKind::InvalidEncoding`]; the precise cause is only
/// visible in the `Display` output.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A key, signature or signed message had the wrong size.
    InvalidLength,
    /// A point or scalar was malformed, or the signature did not verify.
    InvalidEncoding,
    /// The random source failed while generating a key.
    EntropyFailure,
    /// A keypair's public half was not derived from its secret half.
    MismatchedKeypair,
}

/// Errors which may occur while processing signatures and keypairs.
///
/// This error may arise due to:
///
/// * Being given bytes with a length different to what was expected.
///
/// * A problem decompressing the curve point for a `VerifyingKey`.
///
/// * A problem with the format of `s`, a scalar, in the `Signature`.  This
///   is raised unless `s` is the canonical encoding of an integer below
///   the group order.
///
/// * Failure of a signature to satisfy the verification equation.
///
/// * Failure of the random number generator during key generation.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct SignatureError(pub(crate) InternalError);

impl SignatureError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self.0 {
            InternalError::BytesLength { .. } => ErrorKind::InvalidLength,
            InternalError::PointDecompression | InternalError::Verify => {
                ErrorKind::InvalidEncoding
            }
            InternalError::Entropy => ErrorKind::EntropyFailure,
            InternalError::MismatchedKeypair => ErrorKind::MismatchedKeypair,
        }
    }
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "std")]
impl Error for SignatureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl From<InternalError> for SignatureError {
    fn from(err: InternalError) -> SignatureError {
        SignatureError(err)
    }
}

/// The `signature` crate's error is opaque: the cause is dropped.
impl From<SignatureError> for signature::Error {
    fn from(_err: SignatureError) -> signature::Error {
        signature::Error::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_names_the_failing_type() {
        let err: SignatureError = InternalError::BytesLength {
            name: "Signature",
            length: 64,
        }
        .into();
        assert_eq!(format!("{}", err), "Signature must be 64 bytes in length");
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
    }

    #[test]
    fn encoding_failures_share_a_kind() {
        for internal in [InternalError::PointDecompression, InternalError::Verify] {
            assert_eq!(SignatureError(internal).kind(), ErrorKind::InvalidEncoding);
        }
        assert_eq!(
            SignatureError(InternalError::Entropy).kind(),
            ErrorKind::EntropyFailure
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn signature_error_hides_cause() {
        use std::error::Error as _;

        let err: signature::Error = SignatureError(InternalError::Verify).into();
        assert!(err.source().is_none());
    }
}
