// -*- mode: rust; -*-
//
// This file is part of ed25519-dalek.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! An ed25519 signature.

use core::fmt::Debug;

use curve25519_ref10::edwards::CompressedEdwardsY;
use curve25519_ref10::scalar::Scalar;

use subtle::CtOption;

use crate::constants::*;
use crate::errors::*;

/// An ed25519 signature.
///
/// # Note
///
/// These signatures are "detached": they do **not** include a copy of the
/// message which has been signed.  See
/// [`SigningKey::sign_attached`](crate::SigningKey::sign_attached) for the
/// attached form.
///
/// Parsing only checks the length.  Whether `s` is a canonical scalar is
/// checked when the signature is verified, so that every malformed
/// signature fails in the same place.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Signature {
    /// `R` is the compressed commitment point \\(rB\\), where \\(r\\) is
    /// derived by hashing the nonce half of the expanded secret key
    /// together with the message.
    pub(crate) R: CompressedEdwardsY,

    /// `s` is the little-endian encoding of \\(k a + r \bmod \ell\\),
    /// with \\(k\\) the challenge hash of `R`, the public key, and the
    /// message.
    pub(crate) s: [u8; 32],
}

impl Debug for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Signature( R: {:?}, s: {:?} )", &self.R, &self.s)
    }
}

impl Signature {
    /// Parse a signature from its 64-byte encoding, `R` followed by `s`.
    #[allow(non_snake_case)]
    #[inline]
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Signature {
        let mut R = [0u8; 32];
        let mut s = [0u8; 32];
        R.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Signature::from_components(R, s)
    }

    /// Assemble a signature from the encodings of `R` and `s`.
    #[allow(non_snake_case)]
    #[inline]
    pub fn from_components(R: [u8; 32], s: [u8; 32]) -> Signature {
        Signature {
            R: CompressedEdwardsY(R),
            s,
        }
    }

    /// Parse a signature from a slice, which must be exactly
    /// [`SIGNATURE_LENGTH`] bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Signature, SignatureError> {
        let bytes: &[u8; SIGNATURE_LENGTH] =
            bytes.try_into().map_err(|_| InternalError::BytesLength {
                name: "Signature",
                length: SIGNATURE_LENGTH,
            })?;
        Ok(Signature::from_bytes(bytes))
    }

    /// Convert this `Signature` to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut signature_bytes = [0u8; SIGNATURE_LENGTH];
        signature_bytes[..32].copy_from_slice(self.R.as_bytes());
        signature_bytes[32..].copy_from_slice(&self.s);
        signature_bytes
    }

    /// The encoding of the commitment point `R`.
    pub fn r_bytes(&self) -> &[u8; 32] {
        self.R.as_bytes()
    }

    /// The encoding of the response scalar `s`.
    pub fn s_bytes(&self) -> &[u8; 32] {
        &self.s
    }

    /// Decode `s`, rejecting anything that is not the canonical encoding
    /// of an integer below \\(\ell\\).  This includes every encoding with
    /// any of the top three bits set.
    pub(crate) fn scalar(&self) -> CtOption<Scalar> {
        Scalar::from_canonical_bytes(self.s)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<Signature, SignatureError> {
        Signature::from_slice(bytes)
    }
}

impl From<[u8; SIGNATURE_LENGTH]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LENGTH]) -> Signature {
        Signature::from_bytes(&bytes)
    }
}

impl From<Signature> for [u8; SIGNATURE_LENGTH] {
    fn from(signature: Signature) -> [u8; SIGNATURE_LENGTH] {
        signature.to_bytes()
    }
}

impl signature::SignatureEncoding for Signature {
    type Repr = [u8; SIGNATURE_LENGTH];
}

#[cfg(feature = "serde")]
impl serde::Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;

        let mut tup = serializer.serialize_tuple(SIGNATURE_LENGTH)?;
        for byte in self.to_bytes().iter() {
            tup.serialize_element(byte)?;
        }
        tup.end()
    }
}

#[cfg(feature = "serde")]
impl<'d> serde::Deserialize<'d> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'d>,
    {
        struct SignatureVisitor;

        impl<'d> serde::de::Visitor<'d> for SignatureVisitor {
            type Value = Signature;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("An ed25519 signature as 64 bytes, as specified in RFC8032.")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Signature, A::Error>
            where
                A: serde::de::SeqAccess<'d>,
            {
                let mut bytes = [0u8; SIGNATURE_LENGTH];
                #[allow(clippy::needless_range_loop)]
                for i in 0..SIGNATURE_LENGTH {
                    bytes[i] = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &"expected 64 bytes"))?;
                }
                Ok(Signature::from_bytes(&bytes))
            }
        }

        deserializer.deserialize_tuple(SIGNATURE_LENGTH, SignatureVisitor)
    }
}
