// -*- mode: rust; -*-
//
// This file is part of ed25519-dalek.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! ed25519 public keys.

use core::fmt::Debug;
use core::hash::{Hash, Hasher};

use curve25519_ref10::edwards::CompressedEdwardsY;
use curve25519_ref10::edwards::EdwardsPoint;
use curve25519_ref10::scalar::Scalar;
use curve25519_ref10::traits::Identity;

use sha2::{Digest, Sha512};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::constants::*;
use crate::errors::*;
use crate::signature::*;

/// An ed25519 public key.
///
/// # Note
///
/// The `Eq` and `Hash` impls here use the compressed Edwards y encoding.
/// Decompression only accepts canonical encodings, so two keys are equal
/// exactly when their points are.
// Invariant: `point` is always the decompression of `compressed`
#[derive(Copy, Clone, Eq)]
pub struct VerifyingKey {
    /// Serialized compressed Edwards-y point.
    pub(crate) compressed: CompressedEdwardsY,

    /// Decompressed Edwards point used for curve arithmetic operations.
    pub(crate) point: EdwardsPoint,
}

impl Debug for VerifyingKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "VerifyingKey({:?})", self.compressed)
    }
}

impl AsRef<[u8]> for VerifyingKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Hash for VerifyingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl PartialEq<VerifyingKey> for VerifyingKey {
    fn eq(&self, other: &VerifyingKey) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl VerifyingKey {
    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.compressed.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.compressed.as_bytes()
    }

    /// Construct a `VerifyingKey` from its 32-byte encoding.
    ///
    /// The encoding must be the canonical compression of a point on the
    /// curve; anything else is reported as an encoding error.
    ///
    /// # Example
    ///
    /// ```
    /// use ed25519_ref10::{SignatureError, VerifyingKey, PUBLIC_KEY_LENGTH};
    ///
    /// # fn doctest() -> Result<VerifyingKey, SignatureError> {
    /// let public_key_bytes: [u8; PUBLIC_KEY_LENGTH] = [
    ///    215,  90, 152,   1, 130, 177,  10, 183, 213,  75, 254, 211, 201, 100,   7,  58,
    ///     14, 225, 114, 243, 218, 166,  35,  37, 175,   2,  26, 104, 247,   7,   81, 26];
    ///
    /// let public_key = VerifyingKey::from_bytes(&public_key_bytes)?;
    /// # Ok(public_key)
    /// # }
    /// # fn main() {
    /// #     assert!(doctest().is_ok());
    /// # }
    /// ```
    #[inline]
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<VerifyingKey, SignatureError> {
        let compressed = CompressedEdwardsY(*bytes);
        let point = compressed
            .decompress()
            .ok_or(InternalError::PointDecompression)?;

        Ok(VerifyingKey { compressed, point })
    }

    /// The public key \\([a]B\\) for the secret scalar `a`.
    pub(crate) fn from_secret_scalar(a: &Scalar) -> VerifyingKey {
        let point = EdwardsPoint::mul_base(a);
        let compressed = point.compress();

        VerifyingKey { compressed, point }
    }

    /// Returns whether this is a _weak_ public key, i.e., if this public key has low order.
    ///
    /// Weak keys are still accepted by [`VerifyingKey::verify`]; callers who
    /// care can check this first.
    pub fn is_weak(&self) -> bool {
        self.point.is_small_order()
    }

    /// Hash \\( R \| A \| M \\) to the challenge scalar \\(k\\).
    #[allow(non_snake_case)]
    pub(crate) fn compute_challenge(
        R: &CompressedEdwardsY,
        A: &CompressedEdwardsY,
        M: &[u8],
    ) -> Scalar {
        let mut h = Sha512::new();
        h.update(R.as_bytes());
        h.update(A.as_bytes());
        h.update(M);

        Scalar::from_hash(h)
    }

    /// Verify a detached `signature` on `message` with this public key.
    ///
    /// # Returns
    ///
    /// `Ok(())` if `s` is a canonical scalar below \\(\ell\\) and
    /// \\([s]B - [k]A\\) encodes to exactly the signature's `R` bytes.
    /// Every failure returns the same error, whichever check failed.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        let valid = verify_uniform(
            &self.compressed,
            &self.point,
            Choice::from(1),
            message,
            signature,
        );

        #[cfg(feature = "tracing")]
        tracing::trace!(
            valid = bool::from(valid),
            message_len = message.len(),
            "ed25519 signature checked"
        );

        if bool::from(valid) {
            Ok(())
        } else {
            Err(InternalError::Verify.into())
        }
    }

    /// Verify a signed message (a 64-byte signature followed by the
    /// message) and return the message on success.
    ///
    /// The returned slice borrows from `signed_message`; nothing is
    /// returned unless the signature is valid.
    pub fn open<'m>(&self, signed_message: &'m [u8]) -> Result<&'m [u8], SignatureError> {
        if signed_message.len() < SIGNATURE_LENGTH {
            return Err(InternalError::BytesLength {
                name: "SignedMessage",
                length: SIGNATURE_LENGTH,
            }
            .into());
        }
        let (signature_bytes, message) = signed_message.split_at(SIGNATURE_LENGTH);
        let signature = Signature::from_slice(signature_bytes)?;
        self.verify(message, &signature)?;

        Ok(message)
    }
}

/// Evaluate \\([s]B - [k]A\\) for `signature` on `message` and return its
/// encoding, together with whether the key and `s` were well formed.
///
/// `point` must be the decompression of `A` when `key_ok` is set, and is
/// ignored otherwise.  An undecodable key is replaced by the identity and a
/// non-canonical `s` by its reduction mod \\(\ell\\), so a malformed input
/// costs the same hash and double-base multiplication as a message mismatch.
#[allow(non_snake_case)]
pub(crate) fn recompute_r(
    A: &CompressedEdwardsY,
    point: &EdwardsPoint,
    key_ok: Choice,
    message: &[u8],
    signature: &Signature,
) -> (CompressedEdwardsY, Choice) {
    let s_ok = signature.scalar().is_some();
    let s = Scalar::from_bytes_mod_order(signature.s);
    let minus_A = -EdwardsPoint::conditional_select(&EdwardsPoint::identity(), point, key_ok);

    let k = VerifyingKey::compute_challenge(&signature.R, A, message);
    // -[k]A + [s]B = R
    let expected_R = EdwardsPoint::vartime_double_scalar_mul_basepoint(&k, &minus_A, &s).compress();

    (expected_R, key_ok & s_ok)
}

/// The verification decision: the key decoded, `s` is canonical, and the
/// recomputed `R` matches byte for byte.  Non-canonical `R` encodings
/// therefore never verify.
#[allow(non_snake_case)]
pub(crate) fn verify_uniform(
    A: &CompressedEdwardsY,
    point: &EdwardsPoint,
    key_ok: Choice,
    message: &[u8],
    signature: &Signature,
) -> Choice {
    let (expected_R, well_formed) = recompute_r(A, point, key_ok, message, signature);
    well_formed & expected_R.ct_eq(&signature.R)
}

impl signature::Verifier<Signature> for VerifyingKey {
    /// Verify a signature on a message with this keypair's public key.
    ///
    /// The error is opaque; use [`VerifyingKey::verify`] for a
    /// [`SignatureError`].
    fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), signature::Error> {
        VerifyingKey::verify(self, message, signature).map_err(signature::Error::from)
    }
}

impl TryFrom<&[u8]> for VerifyingKey {
    type Error = SignatureError;

    #[inline]
    fn try_from(bytes: &[u8]) -> Result<VerifyingKey, SignatureError> {
        let bytes: &[u8; PUBLIC_KEY_LENGTH] =
            bytes.try_into().map_err(|_| InternalError::BytesLength {
                name: "VerifyingKey",
                length: PUBLIC_KEY_LENGTH,
            })?;
        VerifyingKey::from_bytes(bytes)
    }
}

impl From<VerifyingKey> for EdwardsPoint {
    fn from(vk: VerifyingKey) -> EdwardsPoint {
        vk.point
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for VerifyingKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.compressed, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'d> serde::Deserialize<'d> for VerifyingKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'d>,
    {
        let compressed = <CompressedEdwardsY as serde::Deserialize>::deserialize(deserializer)?;
        VerifyingKey::from_bytes(compressed.as_bytes()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::signing::SigningKey;
    use curve25519_ref10::constants::{BASEPOINT_ORDER, ED25519_BASEPOINT_POINT};

    #[test]
    fn off_curve_key_is_rejected() {
        let err = VerifyingKey::from_bytes(&[0xff; PUBLIC_KEY_LENGTH]).unwrap_err();
        assert_eq!(err.0, InternalError::PointDecompression);
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
    }

    #[test]
    fn wrong_length_key_is_rejected() {
        let err = VerifyingKey::try_from(&[9u8; 31][..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
    }

    #[test]
    fn identity_key_is_weak() {
        let mut identity = [0u8; 32];
        identity[0] = 1;
        let vk = VerifyingKey::from_bytes(&identity).unwrap();
        assert!(vk.is_weak());

        let vk = VerifyingKey::from_bytes(ED25519_BASEPOINT_POINT.compress().as_bytes()).unwrap();
        assert!(!vk.is_weak());
    }

    #[test]
    fn derived_key_round_trips() {
        let vk = SigningKey::from_bytes(&[0x42; 32]).verifying_key();
        let parsed = VerifyingKey::from_bytes(&vk.to_bytes()).unwrap();
        assert_eq!(vk, parsed);
        assert_eq!(EdwardsPoint::from(parsed), vk.point);
    }

    #[test]
    fn short_signed_message_is_rejected() {
        let vk = SigningKey::from_bytes(&[7u8; 32]).verifying_key();
        let err = vk.open(&[0u8; SIGNATURE_LENGTH - 1]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
    }

    // s + ℓ, little-endian with carry.  Still fits in 32 bytes.
    fn add_group_order(s: &[u8; 32]) -> [u8; 32] {
        let ell = BASEPOINT_ORDER.to_bytes();
        let mut out = [0u8; 32];
        let mut carry = 0u16;
        for i in 0..32 {
            let sum = s[i] as u16 + ell[i] as u16 + carry;
            out[i] = sum as u8;
            carry = sum >> 8;
        }
        assert_eq!(carry, 0);
        out
    }

    #[test]
    fn every_failure_evaluates_the_equation() {
        let signing_key = SigningKey::from_bytes(&[0x42; 32]);
        let vk = signing_key.verifying_key();
        let message = b"one path for every failure";
        let signature = signing_key.sign(message);
        let s_reduced = Scalar::from_bytes_mod_order(signature.s);

        let (r, well_formed) =
            recompute_r(&vk.compressed, &vk.point, Choice::from(1), message, &signature);
        assert_eq!(r, signature.R);
        assert!(bool::from(well_formed));

        // Wrong message: well formed, wrong R.
        let (r, well_formed) = recompute_r(
            &vk.compressed,
            &vk.point,
            Choice::from(1),
            b"another message",
            &signature,
        );
        assert!(bool::from(well_formed));
        assert_ne!(r, signature.R);

        // s + ℓ: the equation runs on s mod ℓ and lands on R, but the
        // encoding of s is refused.
        let malleated =
            Signature::from_components(signature.R.to_bytes(), add_group_order(&signature.s));
        let (r, well_formed) =
            recompute_r(&vk.compressed, &vk.point, Choice::from(1), message, &malleated);
        assert_eq!(r, signature.R);
        assert!(!bool::from(well_formed));

        // Undecodable key: the point is ignored and the identity used, so
        // the result is [s]B.
        let bad_key = CompressedEdwardsY([0xff; 32]);
        let (r, well_formed) =
            recompute_r(&bad_key, &vk.point, Choice::from(0), message, &signature);
        assert_eq!(r, EdwardsPoint::mul_base(&s_reduced).compress());
        assert!(!bool::from(well_formed));
    }

    #[test]
    fn every_failure_reports_the_same_error() {
        let signing_key = SigningKey::from_bytes(&[0x42; 32]);
        let vk = signing_key.verifying_key();
        let message = b"one path for every failure";
        let signature = signing_key.sign(message);

        let mismatch = vk.verify(b"another message", &signature).unwrap_err();
        let malleated =
            Signature::from_components(signature.R.to_bytes(), add_group_order(&signature.s));
        let out_of_range = vk.verify(message, &malleated).unwrap_err();
        assert_eq!(mismatch, out_of_range);
        assert_eq!(mismatch.0, InternalError::Verify);

        let mut high_bits = signature.to_bytes();
        high_bits[63] |= 0xe0;
        let high_bits = vk.verify(message, &Signature::from_bytes(&high_bits)).unwrap_err();
        assert_eq!(mismatch, high_bits);

        assert!(crate::verify(&signature.to_bytes(), vk.as_bytes(), message));
        assert!(!crate::verify(&signature.to_bytes(), &[0xff; 32], message));
        assert!(!crate::verify(&malleated.to_bytes(), vk.as_bytes(), message));
        assert!(!crate::verify(&signature.to_bytes(), vk.as_bytes(), b"another message"));
    }
}
