// -*- mode: rust; -*-
//
// This file is part of curve25519-dalek.
// Copyright (c) 2016-2021 isis lovecruft
// Copyright (c) 2016-2020 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Group operations for Curve25519, in Edwards form.
//!
//! ## Encoding and Decoding
//!
//! Encoding is done by converting to and from a `CompressedEdwardsY`
//! struct, which is a typed wrapper around `[u8; 32]`.  Decoding is
//! strict: the \\(y\\)-coordinate must be canonically encoded, and an
//! encoding of \\(x = 0\\) with the sign bit set is refused.
//!
//! ## Equality Testing
//!
//! The `EdwardsPoint` struct implements the [`subtle::ConstantTimeEq`]
//! trait for constant-time equality checking, and the Rust `Eq` trait
//! for variable-time equality checking.  Both compare the underlying
//! affine points, whatever the projective scaling.
//!
//! ## Cofactor-related functions
//!
//! The group of points on the curve has order \\(8\ell\\).  The eight
//! points of small order are detected by [`EdwardsPoint::is_small_order`],
//! and [`EdwardsPoint::mul_by_cofactor`] multiplies by \\(8\\).
//!
//! ## Scalar Multiplication
//!
//! Scalar multiplication on Edwards points is provided by:
//!
//! * the `*` operator between a `Scalar` and a `EdwardsPoint`, which
//! performs constant-time variable-base scalar multiplication;
//!
//! * the `*` operator between a `Scalar` and a
//! `EdwardsBasepointTable`, and [`EdwardsPoint::mul_base`], which perform
//! constant-time fixed-base scalar multiplication;
//!
//! * [`EdwardsPoint::vartime_double_scalar_mul_basepoint`], which
//! computes \\(aA + bB\\) in variable time, for signature verification.
//!
//! ## Validity Checking
//!
//! `EdwardsPoint` objects can only be created via successful
//! decompression of a compressed point, or else by operations on other
//! (valid) `EdwardsPoint`s, so they always hold a point on the curve.

// Coordinates in projective space are traditionally written in capitals.
#![allow(non_snake_case)]

use core::array::TryFromSliceError;
use core::fmt::Debug;
use core::ops::{Add, Neg, Sub};
use core::ops::{AddAssign, SubAssign};
use core::ops::{Mul, MulAssign};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::constants;

use crate::field::FieldElement;
use crate::scalar::{clamp_integer, Scalar};

use crate::backend::serial::curve_models::AffineNielsPoint;
use crate::backend::serial::curve_models::ProjectiveNielsPoint;
use crate::backend::serial::curve_models::ProjectivePoint;

use crate::window::LookupTable;

use crate::traits::ValidityCheck;
use crate::traits::{Identity, IsIdentity};

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// In "Edwards y" / "Ed25519" format, the curve point \\((x,y)\\) is
/// determined by the \\(y\\)-coordinate and the sign of \\(x\\).
///
/// The first 255 bits of a `CompressedEdwardsY` represent the
/// \\(y\\)-coordinate.  The high bit of the 32nd byte gives the sign of \\(x\\).
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Copy, Clone, Hash)]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl ConstantTimeEq for CompressedEdwardsY {
    fn ct_eq(&self, other: &CompressedEdwardsY) -> Choice {
        self.as_bytes().ct_eq(other.as_bytes())
    }
}

impl Eq for CompressedEdwardsY {}
impl PartialEq for CompressedEdwardsY {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Debug for CompressedEdwardsY {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("CompressedEdwardsY").field(&self.0).finish()
    }
}

impl CompressedEdwardsY {
    /// View this `CompressedEdwardsY` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedEdwardsY` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Attempt to decompress to an `EdwardsPoint`.
    ///
    /// Returns `None` if the input is not the canonical \\(y\\)-coordinate
    /// of a curve point, or if it asks for the negative of \\(x = 0\\).
    pub fn decompress(&self) -> Option<EdwardsPoint> {
        let sign = Choice::from(self.0[31] >> 7);
        let Y = FieldElement::from_bytes(&self.0);

        // Reject y >= p: re-encoding must give back the low 255 bits.
        let mut low_bits = self.0;
        low_bits[31] &= 0x7f;
        let canonical = Y.to_bytes()[..].ct_eq(&low_bits[..]);

        // x^2 = (y^2 - 1) / (d y^2 + 1)
        let yy = Y.square();
        let numerator = &yy - &FieldElement::ONE;
        let denominator = &(&yy * &constants::EDWARDS_D) + &FieldElement::ONE;
        let (on_curve, mut X) = FieldElement::sqrt_ratio_i(&numerator, &denominator);

        if !bool::from(canonical & on_curve) {
            return None;
        }
        // The root comes back nonnegative, and 0 has no negative.
        if bool::from(X.is_zero() & sign) {
            return None;
        }
        X.conditional_negate(sign);

        Some(EdwardsPoint {
            T: &X * &Y,
            X,
            Y,
            Z: FieldElement::ONE,
        })
    }
}

impl TryFrom<&[u8]> for CompressedEdwardsY {
    type Error = TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<CompressedEdwardsY, TryFromSliceError> {
        Self::from_slice(slice)
    }
}

impl CompressedEdwardsY {
    /// Construct a `CompressedEdwardsY` from a slice of bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TryFromSliceError`] if the input `bytes` slice does not have
    /// a length of 32.
    pub fn from_slice(bytes: &[u8]) -> Result<CompressedEdwardsY, TryFromSliceError> {
        bytes.try_into().map(CompressedEdwardsY)
    }
}

impl Identity for CompressedEdwardsY {
    fn identity() -> CompressedEdwardsY {
        CompressedEdwardsY([
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ])
    }
}

impl Default for CompressedEdwardsY {
    fn default() -> CompressedEdwardsY {
        CompressedEdwardsY::identity()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for CompressedEdwardsY {
    /// Reset this `CompressedEdwardsY` to the compressed form of the identity element.
    fn zeroize(&mut self) {
        self.0.zeroize();
        self.0[0] = 1;
    }
}

// ------------------------------------------------------------------------
// Serde support
// ------------------------------------------------------------------------
// Both types travel as a 32-byte tuple.  An `EdwardsPoint` is compressed
// on the way out and must decompress on the way in.

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl Serialize for CompressedEdwardsY {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeTuple;
        let mut tuple = serializer.serialize_tuple(32)?;
        self.0.iter().try_for_each(|byte| tuple.serialize_element(byte))?;
        tuple.end()
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl Serialize for EdwardsPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.compress().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
struct Bytes32Visitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for Bytes32Visitor {
    type Value = CompressedEdwardsY;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a compressed Edwards point as 32 bytes")
    }

    fn visit_seq<A: serde::de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = seq
                .next_element()?
                .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
        }
        Ok(CompressedEdwardsY(bytes))
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl<'de> Deserialize<'de> for CompressedEdwardsY {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_tuple(32, Bytes32Visitor)
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl<'de> Deserialize<'de> for EdwardsPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CompressedEdwardsY::deserialize(deserializer)?
            .decompress()
            .ok_or_else(|| serde::de::Error::custom("not a canonical Edwards point encoding"))
    }
}

// ------------------------------------------------------------------------
// Internal point representations
// ------------------------------------------------------------------------

/// A point on the Edwards form of Curve25519, in extended coordinates
/// \\((X:Y:Z:T)\\) with \\(x = X/Z\\), \\(y = Y/Z\\) and \\(XY = ZT\\).
#[derive(Copy, Clone)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

// ------------------------------------------------------------------------
// Constructors
// ------------------------------------------------------------------------

impl Identity for EdwardsPoint {
    fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }
}

impl Default for EdwardsPoint {
    fn default() -> EdwardsPoint {
        EdwardsPoint::identity()
    }
}

// ------------------------------------------------------------------------
// Zeroize implementations for wiping points from memory
// ------------------------------------------------------------------------

#[cfg(feature = "zeroize")]
impl Zeroize for EdwardsPoint {
    /// Reset this `EdwardsPoint` to the identity element.
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Y = FieldElement::ONE;
        self.Z = FieldElement::ONE;
        self.T.zeroize();
    }
}

// ------------------------------------------------------------------------
// Validity checks (for debugging, not CT)
// ------------------------------------------------------------------------

impl ValidityCheck for EdwardsPoint {
    fn is_valid(&self) -> bool {
        let point_on_curve = self.as_projective().is_valid();
        let on_segre_image = (&self.X * &self.Y) == (&self.Z * &self.T);

        point_on_curve && on_segre_image
    }
}

// ------------------------------------------------------------------------
// Constant-time assignment
// ------------------------------------------------------------------------

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &EdwardsPoint, b: &EdwardsPoint, choice: Choice) -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Y: FieldElement::conditional_select(&a.Y, &b.Y, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
            T: FieldElement::conditional_select(&a.T, &b.T, choice),
        }
    }
}

// ------------------------------------------------------------------------
// Equality
// ------------------------------------------------------------------------

impl ConstantTimeEq for EdwardsPoint {
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        // X1/Z1 = X2/Z2 iff X1 Z2 = X2 Z1, and the same for Y.
        let same_x = (&self.X * &other.Z).ct_eq(&(&other.X * &self.Z));
        let same_y = (&self.Y * &other.Z).ct_eq(&(&other.Y * &self.Z));
        same_x & same_y
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for EdwardsPoint {}

// ------------------------------------------------------------------------
// Point conversions
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Cache this point as an addend, multiplying \\(T\\) through by \\(2d\\).
    pub(crate) fn as_projective_niels(&self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: &self.Y + &self.X,
            Y_minus_X: &self.Y - &self.X,
            Z: self.Z,
            T2d: &self.T * &constants::EDWARDS_D2,
        }
    }

    /// Drop \\(T\\).
    pub(crate) const fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Affine \\((x, y)\\), at the cost of one inversion.
    fn to_affine(&self) -> (FieldElement, FieldElement) {
        let z_inv = self.Z.invert();
        (&self.X * &z_inv, &self.Y * &z_inv)
    }

    /// Normalize to \\(Z = 1\\) and cache as a table entry.
    pub(crate) fn as_affine_niels(&self) -> AffineNielsPoint {
        let (x, y) = self.to_affine();
        AffineNielsPoint {
            y_plus_x: &y + &x,
            y_minus_x: &y - &x,
            xy2d: &(&x * &y) * &constants::EDWARDS_D2,
        }
    }

    /// Encode as \\(y\\) with the sign of \\(x\\) in the top bit.
    pub fn compress(&self) -> CompressedEdwardsY {
        let (x, y) = self.to_affine();
        let mut bytes = y.to_bytes();
        bytes[31] |= x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(bytes)
    }
}

// ------------------------------------------------------------------------
// Doubling
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// \\(2P\\), through the cheaper projective doubling.
    pub(crate) fn double(&self) -> EdwardsPoint {
        self.as_projective().double().as_extended()
    }
}

// ------------------------------------------------------------------------
// Addition and Subtraction
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &other.as_projective_niels()).as_extended()
    }
}

forward_binop!(Add::add, EdwardsPoint, EdwardsPoint => EdwardsPoint);

impl<'b> AddAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn add_assign(&mut self, rhs: &'b EdwardsPoint) {
        *self = &*self + rhs;
    }
}

forward_assign_op!(AddAssign::add_assign, EdwardsPoint, EdwardsPoint);

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self - &other.as_projective_niels()).as_extended()
    }
}

forward_binop!(Sub::sub, EdwardsPoint, EdwardsPoint => EdwardsPoint);

impl<'b> SubAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn sub_assign(&mut self, rhs: &'b EdwardsPoint) {
        *self = &*self - rhs;
    }
}

forward_assign_op!(SubAssign::sub_assign, EdwardsPoint, EdwardsPoint);

// ------------------------------------------------------------------------
// Negation
// ------------------------------------------------------------------------

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -(&self.X),
            Y: self.Y,
            Z: self.Z,
            T: -(&self.T),
        }
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Scalar multiplication
// ------------------------------------------------------------------------

impl<'b> MulAssign<&'b Scalar> for EdwardsPoint {
    fn mul_assign(&mut self, scalar: &'b Scalar) {
        *self = &*self * scalar;
    }
}

forward_assign_op!(MulAssign::mul_assign, EdwardsPoint, Scalar);

forward_binop!(Mul::mul, EdwardsPoint, Scalar => EdwardsPoint);
forward_binop!(Mul::mul, Scalar, EdwardsPoint => EdwardsPoint);

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    /// Constant-time variable-base multiplication.  Prefer
    /// [`EdwardsPoint::mul_base`] when the point is the basepoint.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        crate::backend::variable_base_mul(self, scalar)
    }
}

impl<'a, 'b> Mul<&'b EdwardsPoint> for &'a Scalar {
    type Output = EdwardsPoint;

    fn mul(self, point: &'b EdwardsPoint) -> EdwardsPoint {
        point * self
    }
}

impl EdwardsPoint {
    /// Fixed-base scalar multiplication by the Ed25519 base point.
    ///
    /// Uses the lazily built [`constants::ED25519_BASEPOINT_TABLE`].
    pub fn mul_base(scalar: &Scalar) -> Self {
        &*constants::ED25519_BASEPOINT_TABLE * scalar
    }

    /// Multiply this point by `clamp_integer(bytes)`.
    ///
    /// The clamped integer is used as is, without reduction mod
    /// \\(\ell\\); it is below \\(2\^{255}\\), so its radix-16 digits exist.
    pub fn mul_clamped(self, bytes: [u8; 32]) -> Self {
        let s = Scalar {
            bytes: clamp_integer(bytes),
        };
        s * self
    }

    /// Multiply the basepoint by `clamp_integer(bytes)`. For a description of clamping, see
    /// [`clamp_integer`].
    pub fn mul_base_clamped(bytes: [u8; 32]) -> Self {
        let s = Scalar {
            bytes: clamp_integer(bytes),
        };
        Self::mul_base(&s)
    }

    /// Compute \\(aA + bB\\) in variable time, where \\(B\\) is the Ed25519 basepoint.
    ///
    /// Only use this with public scalars and points.
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
    ) -> EdwardsPoint {
        crate::backend::vartime_double_base_mul(a, A, b)
    }
}

/// Precomputed multiples of a fixed point \\(B\\), for constant-time
/// \\(aB\\).
///
/// Entry \\(i\\) holds \\(B_i, 2B_i, \ldots, 8B_i\\) for
/// \\(B_i = 256\^i B\\), \\(i = 0, \ldots, 31\\), in affine Niels form.
/// The Ed25519 table is [`constants::ED25519_BASEPOINT_TABLE`].
#[derive(Clone)]
#[repr(transparent)]
pub struct EdwardsBasepointTable(pub(crate) [LookupTable<AffineNielsPoint>; 32]);

impl EdwardsBasepointTable {
    /// Precompute the table for `basepoint`.
    pub fn create(basepoint: &EdwardsPoint) -> EdwardsBasepointTable {
        let mut entries = [LookupTable::default(); 32];
        let mut B_i = *basepoint;
        for entry in entries.iter_mut() {
            *entry = LookupTable::from(&B_i);
            B_i = B_i.mul_by_pow_2(8);
        }
        EdwardsBasepointTable(entries)
    }

    /// The point this table was built for.
    pub fn basepoint(&self) -> EdwardsPoint {
        (&EdwardsPoint::identity() + &self.0[0].select(1)).as_extended()
    }

    /// Constant-time \\(aB\\), as in ref10's `ge_scalarmult_base`.
    ///
    /// With signed radix-16 digits \\(a = \sum_j a_j 16\^j\\), split the
    /// sum by parity of \\(j\\):
    /// $$
    ///     aB = 16 \sum_i a_{2i+1} B_i + \sum_i a_{2i} B_i.
    /// $$
    /// Every term is one signed selection from table \\(i\\).
    pub fn mul_base(&self, scalar: &Scalar) -> EdwardsPoint {
        let digits = scalar.as_radix_16();

        let mut acc = EdwardsPoint::identity();
        for (i, table) in self.0.iter().enumerate() {
            acc = (&acc + &table.select(digits[2 * i + 1])).as_extended();
        }
        acc = acc.mul_by_pow_2(4);
        for (i, table) in self.0.iter().enumerate() {
            acc = (&acc + &table.select(digits[2 * i])).as_extended();
        }
        acc
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsBasepointTable {
    type Output = EdwardsPoint;

    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        self.mul_base(scalar)
    }
}

impl<'a, 'b> Mul<&'a EdwardsBasepointTable> for &'b Scalar {
    type Output = EdwardsPoint;

    fn mul(self, table: &'a EdwardsBasepointTable) -> EdwardsPoint {
        table.mul_base(self)
    }
}

impl Debug for EdwardsBasepointTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl EdwardsPoint {
    /// \\(8P\\).
    pub fn mul_by_cofactor(&self) -> EdwardsPoint {
        self.mul_by_pow_2(3)
    }

    /// \\(2\^k P\\) for \\(k \geq 1\\).  Intermediate doublings stay
    /// projective; only the last result is extended.
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut acc = self.as_projective().double();
        for _ in 1..k {
            acc = acc.as_projective().double();
        }
        acc.as_extended()
    }

    /// Whether \\(P\\) lies in the eight-torsion subgroup, i.e.
    /// \\(8P = \mathcal O\\).
    pub fn is_small_order(&self) -> bool {
        self.mul_by_cofactor().is_identity()
    }
}

// ------------------------------------------------------------------------
// Debug traits
// ------------------------------------------------------------------------

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EdwardsPoint")
            .field("X", &self.X)
            .field("Y", &self.Y)
            .field("Z", &self.Z)
            .field("T", &self.T)
            .finish()
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::ED25519_BASEPOINT_COMPRESSED;
    use crate::constants::ED25519_BASEPOINT_POINT;
    use crate::constants::ED25519_BASEPOINT_TABLE;

    // x(B) = 15112221349535400772501151409588531511454012693041857206046113283949847762202
    static BASE_X_COORD_BYTES: [u8; 32] = [
        0x1a, 0xd5, 0x25, 0x8f, 0x60, 0x2d, 0x56, 0xc9, 0xb2, 0xa7, 0x25, 0x95, 0x60, 0xc7, 0x2c,
        0x69, 0x5c, 0xdc, 0xd6, 0xfd, 0x31, 0xe2, 0xa4, 0xc0, 0xfe, 0x53, 0x6e, 0xcd, 0xd3, 0x36,
        0x69, 0x21,
    ];

    // [2]B
    static BASE2_CMPRSSD: CompressedEdwardsY = CompressedEdwardsY([
        0xc9, 0xa3, 0xf8, 0x6a, 0xae, 0x46, 0x5f, 0x0e, 0x56, 0x51, 0x38, 0x64, 0x51, 0x0f, 0x39,
        0x97, 0x56, 0x1f, 0xa2, 0xc9, 0xe8, 0x5e, 0xa2, 0x1d, 0xc2, 0x29, 0x23, 0x09, 0xf3, 0xcd,
        0x60, 0x22,
    ]);

    // [16]B
    static BASE16_CMPRSSD: CompressedEdwardsY = CompressedEdwardsY([
        0xeb, 0x27, 0x67, 0xc1, 0x37, 0xab, 0x7a, 0xd8, 0x27, 0x9c, 0x07, 0x8e, 0xff, 0x11, 0x6a,
        0xb0, 0x78, 0x6e, 0xad, 0x3a, 0x2e, 0x0f, 0x98, 0x9f, 0x72, 0xc3, 0x7f, 0x82, 0xf2, 0x96,
        0x96, 0x70,
    ]);

    // a = 4493907448824000747700850167940867464579944529806937181821189941592931634714
    static A_SCALAR: Scalar = Scalar {
        bytes: [
            0x1a, 0x0e, 0x97, 0x8a, 0x90, 0xf6, 0x62, 0x2d, 0x37, 0x47, 0x02, 0x3f, 0x8a, 0xd8,
            0x26, 0x4d, 0xa7, 0x58, 0xaa, 0x1b, 0x88, 0xe0, 0x40, 0xd1, 0x58, 0x9e, 0x7b, 0x7f,
            0x23, 0x76, 0xef, 0x09,
        ],
    };

    // b = 2506056684125797857694181776241676200180934651973138769173342316833279714961
    static B_SCALAR: Scalar = Scalar {
        bytes: [
            0x91, 0x26, 0x7a, 0xcf, 0x25, 0xc2, 0x09, 0x1b, 0xa2, 0x17, 0x74, 0x7b, 0x66, 0xf0,
            0xb3, 0x2e, 0x9d, 0xf2, 0xa5, 0x67, 0x41, 0xcf, 0xda, 0xc4, 0x56, 0xa7, 0xd4, 0xaa,
            0xb8, 0x60, 0x8a, 0x05,
        ],
    };

    // [a]B
    static A_TIMES_BASEPOINT: CompressedEdwardsY = CompressedEdwardsY([
        0xea, 0x27, 0xe2, 0x60, 0x53, 0xdf, 0x1b, 0x59, 0x56, 0xf1, 0x4d, 0x5d, 0xec, 0x3c, 0x34,
        0xc3, 0x84, 0xa2, 0x69, 0xb7, 0x4c, 0xc3, 0x80, 0x3e, 0xa8, 0xe2, 0xe7, 0xc9, 0x42, 0x5e,
        0x40, 0xa5,
    ]);

    // [a]([a]B) + [b]B
    static DOUBLE_SCALAR_MULT_RESULT: CompressedEdwardsY = CompressedEdwardsY([
        0x7d, 0xfd, 0x6c, 0x45, 0xaf, 0x6d, 0x6e, 0x0e, 0xba, 0x20, 0x37, 0x1a, 0x23, 0x64, 0x59,
        0xc4, 0xc0, 0x46, 0x83, 0x43, 0xde, 0x70, 0x4b, 0x85, 0x09, 0x6f, 0xfe, 0x35, 0x4f, 0x13,
        0x2b, 0x42,
    ]);

    // A point of order 8.
    static EIGHT_TORSION_1: CompressedEdwardsY = CompressedEdwardsY([
        0xc7, 0x17, 0x6a, 0x70, 0x3d, 0x4d, 0xd8, 0x4f, 0xba, 0x3c, 0x0b, 0x76, 0x0d, 0x10, 0x67,
        0x0f, 0x2a, 0x20, 0x53, 0xfa, 0x2c, 0x39, 0xcc, 0xc6, 0x4e, 0xc7, 0xfd, 0x77, 0x92, 0xac,
        0x03, 0x7a,
    ]);

    // (0, -1), of order 2.
    static EIGHT_TORSION_4: CompressedEdwardsY = CompressedEdwardsY([
        0xec, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x7f,
    ]);

    #[test]
    fn basepoint_round_trips_through_compression() {
        let B = ED25519_BASEPOINT_COMPRESSED.decompress().unwrap();
        assert!(B.is_valid());
        assert_eq!(B.X, FieldElement::from_bytes(&BASE_X_COORD_BYTES));
        assert_eq!(B, ED25519_BASEPOINT_POINT);
        assert_eq!(B.compress(), ED25519_BASEPOINT_COMPRESSED);
        assert_eq!(B.as_projective().as_extended(), B);
    }

    #[test]
    fn sign_bit_selects_negative_x() {
        let mut bytes = ED25519_BASEPOINT_COMPRESSED.to_bytes();
        bytes[31] |= 0x80;
        let minus_B = CompressedEdwardsY(bytes).decompress().unwrap();
        // Decompression sets Z = 1, so the coordinates match exactly.
        assert_eq!(minus_B.X, -&ED25519_BASEPOINT_POINT.X);
        assert_eq!(minus_B.Y, ED25519_BASEPOINT_POINT.Y);
        assert_eq!(minus_B.T, -&ED25519_BASEPOINT_POINT.T);
        assert_eq!(minus_B, -ED25519_BASEPOINT_POINT);
        assert_eq!(minus_B.compress(), CompressedEdwardsY(bytes));
    }

    #[test]
    fn decompression_rejects_non_square() {
        // y = 2 gives a ratio (y^2 - 1)/(dy^2 + 1) with no square root.
        let mut y_two = [0u8; 32];
        y_two[0] = 2;
        assert!(CompressedEdwardsY(y_two).decompress().is_none());
    }

    #[test]
    fn decompression_rejects_non_canonical_y() {
        // p + 1 is a non-canonical encoding of y = 1.
        let mut p_plus_one = [0xff; 32];
        p_plus_one[0] = 0xee;
        p_plus_one[31] = 0x7f;
        assert!(CompressedEdwardsY(p_plus_one).decompress().is_none());

        // p itself would encode y = 0.
        let mut p = p_plus_one;
        p[0] = 0xed;
        assert!(CompressedEdwardsY(p).decompress().is_none());

        // All 0xFF: y = 2^255 - 1, also out of range.
        assert!(CompressedEdwardsY([0xff; 32]).decompress().is_none());
    }

    #[test]
    fn decompression_rejects_negative_zero() {
        // y = 1 gives x = 0, which has no negative.
        let mut bytes = CompressedEdwardsY::identity().to_bytes();
        assert!(CompressedEdwardsY(bytes).decompress().unwrap().is_identity());
        bytes[31] |= 0x80;
        assert!(CompressedEdwardsY(bytes).decompress().is_none());
    }

    #[test]
    fn decompression_of_y_zero_has_order_four() {
        let P = CompressedEdwardsY([0u8; 32]).decompress().unwrap();
        assert!(P.is_valid());
        assert!(!P.double().is_identity());
        assert!(P.double().double().is_identity());
        assert!(P.is_small_order());
    }

    #[test]
    fn doubling_agrees_across_representations() {
        let B = ED25519_BASEPOINT_POINT;
        assert_eq!(B.double().compress(), BASE2_CMPRSSD);
        assert_eq!((B + B).compress(), BASE2_CMPRSSD);
        assert_eq!((&B + &B.as_projective_niels()).as_extended().compress(), BASE2_CMPRSSD);
        assert_eq!((&B + &B.as_affine_niels()).as_extended().compress(), BASE2_CMPRSSD);
        assert_eq!(EdwardsPoint::mul_base(&Scalar::from(2u64)).compress(), BASE2_CMPRSSD);
        assert_eq!(B.mul_by_pow_2(4).compress(), BASE16_CMPRSSD);
    }

    #[test]
    fn equality_ignores_projective_scaling() {
        let two = FieldElement::from_bytes(&{
            let mut b = [0u8; 32];
            b[0] = 2;
            b
        });
        let scaled_identity = EdwardsPoint {
            X: FieldElement::ZERO,
            Y: two,
            Z: two,
            T: FieldElement::ZERO,
        };
        assert!(bool::from(scaled_identity.ct_eq(&EdwardsPoint::identity())));

        // [a]B from the table has Z != 1; its affine Niels form must agree.
        let aB = &*ED25519_BASEPOINT_TABLE * &A_SCALAR;
        let via_niels = (&EdwardsPoint::identity() + &aB.as_affine_niels()).as_extended();
        assert_eq!(via_niels, aB);
    }

    #[test]
    fn fixed_and_variable_base_known_answer() {
        assert_eq!(EdwardsPoint::mul_base(&Scalar::ONE), ED25519_BASEPOINT_POINT);
        assert_eq!(ED25519_BASEPOINT_TABLE.basepoint(), ED25519_BASEPOINT_POINT);
        assert_eq!(EdwardsPoint::mul_base(&A_SCALAR).compress(), A_TIMES_BASEPOINT);
        assert_eq!((&ED25519_BASEPOINT_POINT * &A_SCALAR).compress(), A_TIMES_BASEPOINT);
        assert_eq!(&*ED25519_BASEPOINT_TABLE * &A_SCALAR, &A_SCALAR * &ED25519_BASEPOINT_POINT);
    }

    #[test]
    fn minus_one_times_basepoint_is_negation() {
        let B = ED25519_BASEPOINT_POINT;
        assert!((&B * &Scalar::MINUS_ONE + B).is_identity());
    }

    #[test]
    fn table_for_another_point() {
        let P = &Scalar::from(24u64) * &ED25519_BASEPOINT_POINT;
        let table = EdwardsBasepointTable::create(&P);
        assert_eq!(table.basepoint(), P);
        assert_eq!(&table * &A_SCALAR, &P * &A_SCALAR);
    }

    #[test]
    fn table_accepts_unreduced_scalar() {
        // 2^255 - 1: the top bit is clear, so radix-16 digits exist.
        let mut bytes = [0xff; 32];
        bytes[31] = 0x7f;
        let a = Scalar { bytes };
        let aB_1 = &*ED25519_BASEPOINT_TABLE * &a;
        let aB_2 = &ED25519_BASEPOINT_POINT * &a;
        assert_eq!(aB_1, aB_2);
        let reduced = Scalar::from_bytes_mod_order(a.bytes);
        assert_eq!(aB_1, EdwardsPoint::mul_base(&reduced));
    }

    #[test]
    fn mul_by_cofactor_is_times_eight() {
        let eight_B = &Scalar::from(8u64) * &ED25519_BASEPOINT_POINT;
        assert_eq!(ED25519_BASEPOINT_POINT.mul_by_cofactor(), eight_B);
    }

    #[test]
    fn impl_sub_and_neg() {
        let B = ED25519_BASEPOINT_POINT;
        let two_B = B.double();
        assert_eq!(two_B - B, B);
        assert_eq!(B - two_B, -B);
        assert!((B + (-B)).is_identity());

        let mut acc = two_B;
        acc -= B;
        assert_eq!(acc, B);
        acc += B;
        assert_eq!(acc, two_B);
    }

    #[test]
    fn mul_assign() {
        let mut P = ED25519_BASEPOINT_POINT;
        P *= A_SCALAR;
        assert_eq!(P.compress(), A_TIMES_BASEPOINT);
    }

    #[test]
    fn small_order_detection() {
        assert!(!ED25519_BASEPOINT_POINT.is_small_order());
        let order_eight = EIGHT_TORSION_1.decompress().unwrap();
        assert!(order_eight.is_small_order());
        assert!(!order_eight.mul_by_pow_2(2).is_identity());
        let order_two = EIGHT_TORSION_4.decompress().unwrap();
        assert!(order_two.is_small_order());
        assert!(order_two.double().is_identity());
        assert_eq!(order_eight.mul_by_pow_2(2), order_two);
        // a torsion component does not make the sum small
        assert!(!(ED25519_BASEPOINT_POINT + order_eight).is_small_order());
        assert!(EdwardsPoint::identity().is_small_order());
    }

    #[test]
    fn identity_encodes_as_y_one() {
        let O = EdwardsPoint::identity();
        assert!(O.is_identity());
        assert!(!ED25519_BASEPOINT_POINT.is_identity());
        assert_eq!(O.compress(), CompressedEdwardsY::identity());
        assert_eq!(CompressedEdwardsY::default().as_bytes()[0], 1);
    }

    /// Repeated multiplication, to trip the limb-bound debug assertions
    /// and overflow checks if any carry chain is short.
    #[test]
    fn repeated_scalar_mul_stays_in_bounds() {
        let mut P = ED25519_BASEPOINT_POINT;
        for _ in 0..1_000 {
            P *= &A_SCALAR;
        }
        assert!(P.is_valid());
    }

    #[test]
    fn scalar_mul_commutes_operands() {
        let B = ED25519_BASEPOINT_POINT;
        assert_eq!(B * A_SCALAR, A_SCALAR * B);
        assert_eq!(&B * &A_SCALAR, &A_SCALAR * &B);
    }

    #[test]
    fn double_scalar_mul_known_answer() {
        let A = A_TIMES_BASEPOINT.decompress().unwrap();
        let result =
            EdwardsPoint::vartime_double_scalar_mul_basepoint(&A_SCALAR, &A, &B_SCALAR);
        assert_eq!(result.compress(), DOUBLE_SCALAR_MULT_RESULT);
    }

    #[test]
    fn double_scalar_mul_basepoint_matches_constant_time_path() {
        let A = A_TIMES_BASEPOINT.decompress().unwrap();
        let expected = &A * &A_SCALAR + EdwardsPoint::mul_base(&B_SCALAR);
        let result =
            EdwardsPoint::vartime_double_scalar_mul_basepoint(&A_SCALAR, &A, &B_SCALAR);
        assert_eq!(result, expected);

        let zero = EdwardsPoint::vartime_double_scalar_mul_basepoint(
            &Scalar::ZERO,
            &A,
            &Scalar::ZERO,
        );
        assert!(zero.is_identity());

        let minus = EdwardsPoint::vartime_double_scalar_mul_basepoint(
            &Scalar::MINUS_ONE,
            &A,
            &Scalar::ONE,
        );
        assert_eq!(minus, ED25519_BASEPOINT_POINT - A);
    }

    #[test]
    fn mul_base_clamped() {
        let bytes = A_SCALAR.to_bytes();
        let clamped = Scalar::from_bits_clamped(bytes);
        assert_eq!(EdwardsPoint::mul_base_clamped(bytes), EdwardsPoint::mul_base(&clamped));
        assert_eq!(
            ED25519_BASEPOINT_POINT.mul_clamped(bytes),
            EdwardsPoint::mul_base(&clamped)
        );
    }

    #[test]
    fn compressed_from_slice() {
        let bytes = ED25519_BASEPOINT_COMPRESSED.to_bytes();
        assert_eq!(
            CompressedEdwardsY::from_slice(&bytes).unwrap(),
            ED25519_BASEPOINT_COMPRESSED
        );
        assert!(CompressedEdwardsY::from_slice(&bytes[..31]).is_err());
        assert!(CompressedEdwardsY::try_from(&[0u8; 33][..]).is_err());
    }

    #[cfg(feature = "zeroize")]
    #[test]
    fn zeroize_resets_to_identity() {
        let mut P = ED25519_BASEPOINT_POINT;
        P.zeroize();
        assert!(P.is_identity());
        let mut C = ED25519_BASEPOINT_COMPRESSED;
        C.zeroize();
        assert_eq!(C, CompressedEdwardsY::identity());
    }
}
