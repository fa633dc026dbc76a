// -*- mode: rust; -*-
//
// This file is part of curve25519-dalek.
// Copyright (c) 2016-2021 isis lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// Portions Copyright 2017 Brian Smith
// See LICENSE for licensing information.
//
// Authors:
// - Isis Agora Lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>
// - Brian Smith <brian@briansmith.org>

//! Arithmetic on scalars (integers mod the group order).
//!
//! The Ed25519 basepoint has prime order
//! $$
//! \ell = 2\^{252} + 27742317777372353535851937790883648493.
//! $$
//!
//! This module provides the `Scalar` type, which represents an integer
//! modulo \\(\ell\\), stored as 32 little-endian bytes.  Arithmetic is
//! done the ref10 way: the bytes are split into 21-bit signed limbs held
//! in `i64`s, and products are folded back below \\(\ell\\) using the
//! identity
//! $$
//! 2\^{252} \equiv -27742317777372353535851937790883648493 \pmod \ell,
//! $$
//! written as six 21-bit signed digits.  Every routine here runs in
//! constant time, except `non_adjacent_form`, which is only ever applied
//! to public scalars.
//!
//! # Constructing a scalar
//!
//! * [`Scalar::from_bytes_mod_order`] and
//!   [`Scalar::from_bytes_mod_order_wide`] reduce 32 or 64 bytes mod
//!   \\(\ell\\);
//! * [`Scalar::from_canonical_bytes`] accepts only the unique encoding of
//!   a value below \\(\ell\\) and returns a `CtOption`;
//! * [`Scalar::from_hash`] reduces a 64-byte digest (with the `digest`
//!   feature);
//! * [`Scalar::from_bits_clamped`] applies Ed25519 clamping and reduces.
//!
//! ```
//! use curve25519_ref10::scalar::Scalar;
//!
//! let one_plus_l = [
//!     0xee, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58,
//!     0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
//!     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
//!     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
//! ];
//!
//! assert_eq!(Scalar::from_bytes_mod_order(one_plus_l), Scalar::ONE);
//! assert!(bool::from(Scalar::from_canonical_bytes(one_plus_l).is_none()));
//! ```

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Index, Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConstantTimeEq;
use subtle::CtOption;

#[cfg(feature = "digest")]
use digest::generic_array::typenum::U64;
#[cfg(feature = "digest")]
use digest::Digest;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// The `Scalar` struct holds an element of \\(\mathbb Z / \ell\mathbb Z \\).
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Copy, Clone, Hash)]
pub struct Scalar {
    /// Little-endian encoding of the integer.
    ///
    /// Bit 255 is always clear, since the radix-16 and NAF recodings need
    /// a value below \\(2\^{255}\\).  Every public constructor also
    /// reduces below \\(\ell\\); only crate-internal literals (the
    /// order itself, clamped integers) may sit between \\(\ell\\) and
    /// \\(2\^{255}\\).
    pub(crate) bytes: [u8; 32],
}

impl Scalar {
    /// The scalar \\( 0 \\).
    pub const ZERO: Self = Self { bytes: [0u8; 32] };

    /// The scalar \\( 1 \\).
    pub const ONE: Self = Self {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    };

    /// The scalar \\( -1 \\), i.e. \\( \ell - 1 \\).
    pub const MINUS_ONE: Self = Self {
        bytes: [
            0xec, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ],
    };

    /// Construct a `Scalar` by reducing a 256-bit little-endian integer
    /// modulo the group order \\( \ell \\).
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&bytes);
        Scalar::from_bytes_mod_order_wide(&wide)
    }

    /// Construct a `Scalar` by reducing a 512-bit little-endian integer
    /// modulo the group order \\( \ell \\).
    pub fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        let mut s = [0i64; 24];
        unpack_limbs(input, &mut s);
        Scalar {
            bytes: reduce_limbs(s),
        }
    }

    /// Attempt to construct a `Scalar` from a canonical byte representation.
    ///
    /// # Return
    ///
    /// - `Some(s)`, where `s` is the `Scalar` corresponding to `bytes`,
    ///   if `bytes` is a canonical byte representation modulo the group order \\( \ell \\);
    /// - `None` if `bytes` is not a canonical byte representation.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> CtOption<Scalar> {
        let high_bit_unset = (bytes[31] >> 7).ct_eq(&0);
        let candidate = Scalar { bytes };
        CtOption::new(candidate, high_bit_unset & candidate.is_canonical())
    }

    /// Construct a `Scalar` from the low 255 bits of a little-endian 256-bit integer, clamping
    /// it in the manner of Ed25519 secret keys, and reducing the result modulo \\( \ell \\).
    ///
    /// The multiplication \\( [s]B \\) of a clamped secret scalar by the
    /// basepoint does not care about the reduction, since \\(B\\) has order
    /// \\(\ell\\).
    pub fn from_bits_clamped(bytes: [u8; 32]) -> Scalar {
        Scalar::from_bytes_mod_order(clamp_integer(bytes))
    }

    /// Construct a scalar from an existing `Digest` instance.
    ///
    /// Use this instead of hashing into a byte buffer when the input
    /// arrives in several pieces, as it does in Ed25519 where the hash
    /// covers \\( R \\), the public key and the message in turn.
    ///
    /// # Example
    ///
    /// ```
    /// # #[cfg(feature = "digest")]
    /// # {
    /// use curve25519_ref10::scalar::Scalar;
    /// use sha2::{Digest, Sha512};
    ///
    /// let mut h = Sha512::new();
    /// h.update(b"To really appreciate architecture, you may even need to commit a murder.");
    /// h.update(b"While the programs used for The Manhattan Transcripts are of the most extreme");
    ///
    /// let s = Scalar::from_hash(h);
    /// assert!(bool::from(Scalar::from_canonical_bytes(s.to_bytes()).is_some()));
    /// # }
    /// ```
    #[cfg(feature = "digest")]
    #[cfg_attr(docsrs, doc(cfg(feature = "digest")))]
    pub fn from_hash<D>(hash: D) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut output = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());
        Scalar::from_bytes_mod_order_wide(&output)
    }

    /// Convert this `Scalar` to its underlying sequence of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// View the little-endian byte encoding of the integer representing this Scalar.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Check whether this `Scalar` is the canonical representative mod \\(\ell\\).
    fn is_canonical(&self) -> Choice {
        self.ct_eq(&Scalar::from_bytes_mod_order(self.bytes))
    }

    /// Compute \\( ab + c \bmod \ell \\) in constant time.
    ///
    /// The inputs need not be reduced, but must be below \\(2\^{256}\\);
    /// the result always is.  This is the single primitive the other
    /// scalar operations are built from.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    pub fn multiply_add(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar {
        let mut x = [0i64; 12];
        let mut y = [0i64; 12];
        let mut z = [0i64; 12];
        unpack_limbs(&a.bytes, &mut x);
        unpack_limbs(&b.bytes, &mut y);
        unpack_limbs(&c.bytes, &mut z);

        // Schoolbook product of the limbs, plus c in the low half.
        let mut s = [0i64; 24];
        s[..12].copy_from_slice(&z);
        for i in 0..12 {
            for j in 0..12 {
                s[i + j] += x[i] * y[j];
            }
        }

        // Bring every limb back near 21 bits before folding.
        for i in (0..23).step_by(2) {
            carry_centered(&mut s, i);
        }
        for i in (1..22).step_by(2) {
            carry_centered(&mut s, i);
        }

        Scalar {
            bytes: reduce_limbs(s),
        }
    }

    /// Compute a width-\\(5\\) "Non-Adjacent Form" of this scalar.
    ///
    /// A width-\\(w\\) NAF of a positive integer \\(k\\) is an expression
    /// $$
    /// k = \sum_{i=0}\^m n\_i 2\^i,
    /// $$
    /// where each nonzero
    /// coefficient \\(n\_i\\) is odd and bounded by \\(|n\_i| < 2\^{w-1}\\),
    /// \\(n\_{m-1}\\) is nonzero, and at most one of any \\(w\\)
    /// consecutive coefficients is nonzero.  (Hankerson, Menezes,
    /// Vanstone; def 3.32).
    ///
    /// The digits are produced with the ref10 sliding window: each set
    /// bit absorbs the following bits (up to six positions ahead) into a
    /// signed odd digit of absolute value at most 15, borrowing from
    /// higher positions when the digit would overflow.
    ///
    /// This runs in variable time and must only be used with public
    /// scalars.
    pub(crate) fn non_adjacent_form(&self) -> [i8; 256] {
        // This requires that the scalar is below 2^255 so that the final
        // carry never falls off the top.
        debug_assert!(self[31] <= 127);

        let mut naf = [0i8; 256];
        for (i, digit) in naf.iter_mut().enumerate() {
            *digit = ((self.bytes[i >> 3] >> (i & 7)) & 1) as i8;
        }

        for i in 0..256 {
            if naf[i] == 0 {
                continue;
            }
            for b in 1..=6 {
                if i + b >= 256 {
                    break;
                }
                if naf[i + b] == 0 {
                    continue;
                }
                let shifted = naf[i + b] << b;
                if naf[i] + shifted <= 15 {
                    naf[i] += shifted;
                    naf[i + b] = 0;
                } else if naf[i] - shifted >= -15 {
                    naf[i] -= shifted;
                    for k in (i + b)..256 {
                        if naf[k] == 0 {
                            naf[k] = 1;
                            break;
                        }
                        naf[k] = 0;
                    }
                } else {
                    break;
                }
            }
        }

        naf
    }

    /// Write this scalar in radix 16, with coefficients in \\([-8,8)\\),
    /// i.e., compute \\(a\_i\\) such that
    /// $$
    ///    a = a\_0 + a\_1 16\^1 + \cdots + a_{63} 16\^{63},
    /// $$
    /// with \\(-8 \leq a_i < 8\\) for \\(0 \leq i < 63\\) and \\(-8 \leq a_{63} \leq 8\\).
    ///
    /// The largest value that can be decomposed like this is just over \\(2^{255}\\). Thus, in
    /// order to not error, the top bit MUST NOT be set, i.e., `Self` MUST be less than
    /// \\(2^{255}\\).
    pub(crate) fn as_radix_16(&self) -> [i8; 64] {
        debug_assert!(self[31] <= 127);
        let mut output = [0i8; 64];

        // Step 1: change radix.
        // Convert from radix 256 (bytes) to radix 16 (nibbles)
        for i in 0..32 {
            output[2 * i] = (self.bytes[i] & 15) as i8;
            output[2 * i + 1] = ((self.bytes[i] >> 4) & 15) as i8;
        }
        // Precondition note: since self[31] <= 127, output[63] <= 7

        // Step 2: recenter coefficients from [0,16) to [-8,8)
        for i in 0..63 {
            let carry = (output[i] + 8) >> 4;
            output[i] -= carry << 4;
            output[i + 1] += carry;
        }
        // Precondition note: output[63] is not recentered.  It
        // increases by carry <= 1.  Thus output[63] <= 8.

        output
    }
}

/// _Clamps_ the given little-endian representation of a 32-byte integer. Clamping the value puts
/// it in the range:
///
/// **n ∈ 2^254 + 8\*{0, 1, 2, 3, . . ., 2^251 − 1}**
///
/// # Explanation of clamping
///
/// The low three bits are cleared so that the scalar is a multiple of
/// the cofactor 8, which removes any small-order component from
/// \\( [n]P \\).  Bit 255 is cleared and bit 254 is set so that every
/// clamped scalar has the same bit length.
#[must_use]
pub const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
    bytes
}

/// Split little-endian bytes into 21-bit limbs.  The last limb keeps
/// every remaining bit, so `8 * bytes.len()` need not be a multiple of 21.
fn unpack_limbs(bytes: &[u8], limbs: &mut [i64]) {
    const MASK: u64 = (1 << 21) - 1;
    let n = limbs.len();
    for (i, limb) in limbs.iter_mut().enumerate() {
        let bit = 21 * i;
        let mut window = 0u64;
        for (k, byte) in bytes[bit / 8..].iter().take(4).enumerate() {
            window |= (*byte as u64) << (8 * k);
        }
        window >>= bit % 8;
        if i + 1 < n {
            window &= MASK;
        }
        *limb = window as i64;
    }
}

/// Concatenate twelve nonnegative 21-bit limbs into 32 bytes.
fn pack_limbs(limbs: &[i64; 12]) -> [u8; 32] {
    let mut s = [0u8; 32];
    let mut acc: u64 = 0;
    let mut acc_bits = 0;
    let mut k = 0;
    for limb in limbs.iter() {
        acc |= (*limb as u64) << acc_bits;
        acc_bits += 21;
        while acc_bits >= 8 {
            s[k] = acc as u8;
            acc >>= 8;
            acc_bits -= 8;
            k += 1;
        }
    }
    s[k] = acc as u8;
    s
}

/// Rounded carry from limb `i` into limb `i + 1`.
#[inline(always)]
fn carry_centered(s: &mut [i64], i: usize) {
    let carry = (s[i] + (1 << 20)) >> 21;
    s[i + 1] += carry;
    s[i] -= carry << 21;
}

/// Floor carry from limb `i` into limb `i + 1`.
#[inline(always)]
fn carry_floor(s: &mut [i64], i: usize) {
    let carry = s[i] >> 21;
    s[i + 1] += carry;
    s[i] -= carry << 21;
}

/// Fold limb `k >= 12` into limbs `k - 12 ..= k - 7`, using
/// \\( 2\^{252} \equiv -c \pmod \ell \\) with \\( c \\) written in
/// signed 21-bit digits.
#[inline(always)]
fn fold(s: &mut [i64], k: usize) {
    let v = s[k];
    s[k - 12] += v * 666643;
    s[k - 11] += v * 470296;
    s[k - 10] += v * 654183;
    s[k - 9] -= v * 997805;
    s[k - 8] += v * 136657;
    s[k - 7] -= v * 683901;
    s[k] = 0;
}

/// Reduce 24 limbs of about 21 bits each (the low twelve of which may
/// exceed that slightly) to the canonical encoding of their value mod
/// \\( \ell \\).
fn reduce_limbs(mut s: [i64; 24]) -> [u8; 32] {
    for k in (18..24).rev() {
        fold(&mut s, k);
    }

    for i in (6..17).step_by(2) {
        carry_centered(&mut s, i);
    }
    for i in (7..16).step_by(2) {
        carry_centered(&mut s, i);
    }

    for k in (12..18).rev() {
        fold(&mut s, k);
    }

    for i in (0..11).step_by(2) {
        carry_centered(&mut s, i);
    }
    for i in (1..12).step_by(2) {
        carry_centered(&mut s, i);
    }

    fold(&mut s, 12);
    for i in 0..12 {
        carry_floor(&mut s, i);
    }

    fold(&mut s, 12);
    for i in 0..11 {
        carry_floor(&mut s, i);
    }

    let mut limbs = [0i64; 12];
    limbs.copy_from_slice(&s[..12]);
    pack_limbs(&limbs)
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scalar").field("bytes", &self.bytes).finish()
    }
}

impl Eq for Scalar {}
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl Index<usize> for Scalar {
    type Output = u8;

    /// Byte `index` of the little-endian encoding.
    fn index(&self, index: usize) -> &u8 {
        &self.bytes[index]
    }
}

impl Default for Scalar {
    fn default() -> Scalar {
        Scalar::ZERO
    }
}

impl From<u64> for Scalar {
    /// Construct a scalar from the given `u64`.
    ///
    /// # Example
    ///
    /// ```
    /// use curve25519_ref10::scalar::Scalar;
    ///
    /// let fourtytwo = Scalar::from(42u64);
    /// let six = Scalar::from(6u64);
    /// let seven = Scalar::from(7u64);
    ///
    /// assert!(fourtytwo == six * seven);
    /// ```
    fn from(x: u64) -> Scalar {
        let mut s_bytes = [0u8; 32];
        s_bytes[..8].copy_from_slice(&x.to_le_bytes());
        Scalar { bytes: s_bytes }
    }
}

impl<'b> MulAssign<&'b Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: &'b Scalar) {
        *self = &*self * rhs;
    }
}

forward_assign_op!(MulAssign::mul_assign, Scalar, Scalar);

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        Scalar::multiply_add(self, rhs, &Scalar::ZERO)
    }
}

forward_binop!(Mul::mul, Scalar, Scalar => Scalar);

impl<'b> AddAssign<&'b Scalar> for Scalar {
    fn add_assign(&mut self, rhs: &'b Scalar) {
        *self = &*self + rhs;
    }
}

forward_assign_op!(AddAssign::add_assign, Scalar, Scalar);

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'b Scalar) -> Scalar {
        Scalar::multiply_add(self, &Scalar::ONE, rhs)
    }
}

forward_binop!(Add::add, Scalar, Scalar => Scalar);

impl<'b> SubAssign<&'b Scalar> for Scalar {
    fn sub_assign(&mut self, rhs: &'b Scalar) {
        *self = &*self - rhs;
    }
}

forward_assign_op!(SubAssign::sub_assign, Scalar, Scalar);

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        // a - b = a + (l - 1) * b
        Scalar::multiply_add(rhs, &Scalar::MINUS_ONE, self)
    }
}

forward_binop!(Sub::sub, Scalar, Scalar => Scalar);

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Scalar::multiply_add(self, &Scalar::MINUS_ONE, &Scalar::ZERO)
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        -&self
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl serde::Serialize for Scalar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeTuple;
        let mut tuple = serializer.serialize_tuple(32)?;
        self.bytes.iter().try_for_each(|byte| tuple.serialize_element(byte))?;
        tuple.end()
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl<'de> serde::Deserialize<'de> for Scalar {
    /// Only canonical encodings (below \\(\ell\\)) are accepted.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CanonicalScalar;

        impl<'de> serde::de::Visitor<'de> for CanonicalScalar {
            type Value = Scalar;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("32 bytes encoding an integer below the group order")
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Scalar, A::Error> {
                let mut bytes = [0u8; 32];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Option::from(Scalar::from_canonical_bytes(bytes))
                    .ok_or_else(|| serde::de::Error::custom("scalar is not reduced mod l"))
            }
        }

        deserializer.deserialize_tuple(32, CanonicalScalar)
    }
}
