// -*- mode: rust; -*-
//
// This file is part of ed25519-dalek.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! ed25519 signing keys.

use core::fmt::{self, Debug, Formatter};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "rand_core")]
use rand_core::CryptoRngCore;

use curve25519_ref10::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_ref10::scalar::Scalar;

use sha2::{Digest, Sha512};
use subtle::{Choice, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::*;
use crate::errors::*;
use crate::signature::*;
use crate::verifying::*;

/// The 32-byte seed from which an ed25519 key pair is derived.
pub type SecretKey = [u8; SECRET_KEY_LENGTH];

/// The seed of a key pair, hashed and split into its two working halves.
///
/// The lower half of `SHA-512(seed)` is clamped to give the signing scalar
/// \\(a\\); the upper half is the prefix hashed into every nonce.  It is
/// rebuilt for every signature and wiped when dropped.
pub(crate) struct ExpandedSecretKey {
    pub(crate) scalar: Scalar,
    pub(crate) hash_prefix: [u8; 32],
}

#[cfg(feature = "zeroize")]
impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
        self.hash_prefix.zeroize();
    }
}

impl From<&SecretKey> for ExpandedSecretKey {
    fn from(secret_key: &SecretKey) -> ExpandedSecretKey {
        let hash = Sha512::digest(secret_key);
        let mut lower = [0u8; 32];
        let mut upper = [0u8; 32];
        lower.copy_from_slice(&hash[..32]);
        upper.copy_from_slice(&hash[32..]);

        let scalar = Scalar::from_bits_clamped(lower);

        #[cfg(feature = "zeroize")]
        lower.zeroize();

        ExpandedSecretKey {
            scalar,
            hash_prefix: upper,
        }
    }
}

impl ExpandedSecretKey {
    /// `R = [r]B` with `r = H(prefix || M)`, then `s = H(R || A || M) a + r`.
    #[allow(non_snake_case)]
    pub(crate) fn sign(&self, message: &[u8], verifying_key: &VerifyingKey) -> Signature {
        let mut h = Sha512::new();
        h.update(self.hash_prefix);
        h.update(message);

        let r = Scalar::from_hash(h);
        let R: CompressedEdwardsY = EdwardsPoint::mul_base(&r).compress();

        let k = VerifyingKey::compute_challenge(&R, &verifying_key.compressed, message);
        let s = Scalar::multiply_add(&k, &self.scalar, &r);

        Signature { R, s: s.to_bytes() }
    }
}

/// An ed25519 signing key: the 32-byte seed together with its public half.
#[derive(Clone)]
pub struct SigningKey {
    pub(crate) secret_key: SecretKey,
    pub(crate) verifying_key: VerifyingKey,
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for SigningKey {
    fn zeroize(&mut self) {
        self.secret_key.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl Drop for SigningKey {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for SigningKey {}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret_key[..].ct_eq(&other.secret_key[..])
    }
}

impl Eq for SigningKey {}

impl PartialEq for SigningKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl From<&SecretKey> for SigningKey {
    fn from(seed: &SecretKey) -> Self {
        SigningKey::from_bytes(seed)
    }
}

impl From<SecretKey> for SigningKey {
    fn from(seed: SecretKey) -> Self {
        SigningKey::from_bytes(&seed)
    }
}

impl TryFrom<&[u8]> for SigningKey {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<SigningKey, SignatureError> {
        let seed: &SecretKey = bytes.try_into().map_err(|_| InternalError::BytesLength {
            name: "SecretKey",
            length: SECRET_KEY_LENGTH,
        })?;
        Ok(SigningKey::from_bytes(seed))
    }
}

impl From<&SigningKey> for VerifyingKey {
    fn from(signing_key: &SigningKey) -> VerifyingKey {
        signing_key.verifying_key()
    }
}

impl SigningKey {
    /// Derive a key pair from a 32-byte seed.
    ///
    /// Every seed is valid, and the same seed always yields the same pair.
    #[inline]
    pub fn from_bytes(secret_key: &SecretKey) -> SigningKey {
        let expanded = ExpandedSecretKey::from(secret_key);
        let verifying_key = VerifyingKey::from_secret_scalar(&expanded.scalar);
        SigningKey {
            secret_key: *secret_key,
            verifying_key,
        }
    }

    /// Parse the 64-byte keypair form: the seed followed by the public key.
    ///
    /// # Returns
    ///
    /// An error if the trailing 32 bytes are not the public key the seed
    /// derives.
    pub fn from_keypair_bytes(bytes: &[u8; KEYPAIR_LENGTH]) -> Result<SigningKey, SignatureError> {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        seed.copy_from_slice(&bytes[..SECRET_KEY_LENGTH]);
        let signing_key = SigningKey::from_bytes(&seed);

        #[cfg(feature = "zeroize")]
        seed.zeroize();

        if signing_key.verifying_key().as_bytes()[..] != bytes[SECRET_KEY_LENGTH..] {
            return Err(InternalError::MismatchedKeypair.into());
        }
        Ok(signing_key)
    }

    /// The seed followed by the public key.
    pub fn to_keypair_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut bytes = [0u8; KEYPAIR_LENGTH];
        bytes[..SECRET_KEY_LENGTH].copy_from_slice(&self.secret_key);
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(self.verifying_key.as_bytes());
        bytes
    }

    /// Copy out the seed.
    #[inline]
    pub fn to_bytes(&self) -> SecretKey {
        self.secret_key
    }

    /// Borrow the seed.
    #[inline]
    pub fn as_bytes(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Get the [`VerifyingKey`] for this [`SigningKey`].
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Generate a key pair from 32 bytes of randomness drawn from `csprng`.
    ///
    /// # Returns
    ///
    /// [`ErrorKind::EntropyFailure`] if the generator cannot supply the
    /// bytes; no key material is returned in that case.
    ///
    /// # Example
    ///
    /// ```
    /// # #[cfg(all(feature = "std", feature = "rand_core"))]
    /// # fn main() -> Result<(), ed25519_ref10::SignatureError> {
    /// use ed25519_ref10::SigningKey;
    /// use rand::rngs::OsRng;
    ///
    /// let signing_key = SigningKey::generate(&mut OsRng)?;
    /// let signature = signing_key.sign(b"hello");
    /// signing_key.verifying_key().verify(b"hello", &signature)?;
    /// # Ok(())
    /// # }
    /// # #[cfg(not(all(feature = "std", feature = "rand_core")))]
    /// # fn main() {}
    /// ```
    #[cfg(feature = "rand_core")]
    pub fn generate<R: CryptoRngCore + ?Sized>(csprng: &mut R) -> Result<SigningKey, SignatureError> {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        if let Err(_err) = csprng.try_fill_bytes(&mut seed) {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "entropy source failed during ed25519 key generation");

            return Err(InternalError::Entropy.into());
        }

        let signing_key = SigningKey::from_bytes(&seed);

        #[cfg(feature = "zeroize")]
        seed.zeroize();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            verifying_key = ?signing_key.verifying_key.compressed,
            "generated ed25519 key pair"
        );

        Ok(signing_key)
    }

    /// Sign `message`, producing a detached 64-byte signature.
    ///
    /// Signing is deterministic: the same key and message always give the
    /// same signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        ExpandedSecretKey::from(&self.secret_key).sign(message, &self.verifying_key)
    }

    /// Sign `message` and return the signature followed by the message.
    #[cfg(feature = "alloc")]
    pub fn sign_attached(&self, message: &[u8]) -> Vec<u8> {
        let signature = self.sign(message);
        let mut signed = Vec::with_capacity(SIGNATURE_LENGTH + message.len());
        signed.extend_from_slice(&signature.to_bytes());
        signed.extend_from_slice(message);
        signed
    }

    /// Verify a signature on a message with this key pair's public half.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        self.verifying_key.verify(message, signature)
    }
}

impl signature::Signer<Signature> for SigningKey {
    /// Sign a message with this signing key's secret key.
    fn try_sign(&self, message: &[u8]) -> Result<Signature, signature::Error> {
        Ok(SigningKey::sign(self, message))
    }
}

impl signature::Verifier<Signature> for SigningKey {
    fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), signature::Error> {
        self.verifying_key
            .verify(message, signature)
            .map_err(signature::Error::from)
    }
}

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl signature::KeypairRef for SigningKey {
    type VerifyingKey = VerifyingKey;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expansion_clamps_the_scalar_half() {
        let expanded = ExpandedSecretKey::from(&[0u8; 32]);
        let hash = Sha512::digest([0u8; 32]);
        let mut lower = [0u8; 32];
        lower.copy_from_slice(&hash[..32]);

        assert_eq!(expanded.scalar, Scalar::from_bits_clamped(lower));
        assert_eq!(&expanded.hash_prefix[..], &hash[32..]);
        assert_eq!(
            SigningKey::from_bytes(&[0u8; 32]).verifying_key.point,
            EdwardsPoint::mul_base_clamped(lower)
        );
    }

    #[test]
    fn keypair_bytes_must_match() {
        let signing_key = SigningKey::from_bytes(&[3u8; 32]);
        let mut bytes = signing_key.to_keypair_bytes();
        assert_eq!(SigningKey::from_keypair_bytes(&bytes).unwrap(), signing_key);

        bytes[40] ^= 1;
        let err = SigningKey::from_keypair_bytes(&bytes).unwrap_err();
        assert_eq!(err.0, InternalError::MismatchedKeypair);
    }

    #[test]
    fn debug_omits_the_seed() {
        let signing_key = SigningKey::from_bytes(&[0xab; 32]);
        let printed = format!("{:?}", signing_key);
        assert!(printed.starts_with("SigningKey { verifying_key"));
        assert!(printed.ends_with(", .. }"));
        assert!(!printed.contains("seed"));
    }

    #[test]
    fn equality_is_on_the_seed() {
        let a = SigningKey::from_bytes(&[1u8; 32]);
        let b = SigningKey::from_bytes(&[1u8; 32]);
        let c = SigningKey::from_bytes(&[2u8; 32]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
