// -*- mode: rust; -*-
//
// This file is part of curve25519-dalek.
// Copyright (c) 2016-2021 isis lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\).
//!
//! The limb-level operations (add, multiply, square, carry, freeze) live
//! with the limb type in `backend::serial::u32::field`.  This module adds
//! the operations built out of those: exponentiation chains for inversion
//! and square roots, and the sign and zero tests used by point encoding.

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::backend;
use crate::constants;

/// An element of \\( \mathbb Z / (2\^{255} - 19)\\), held in the ref10
/// ten-limb layout.
pub(crate) type FieldElement = backend::serial::u32::field::FieldElement2625;

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for FieldElement {
    /// Limbs are redundant, so both sides are frozen to their canonical
    /// encoding before the bytes are compared.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl FieldElement {
    /// The low bit of the canonical encoding.  Ed25519 calls `x`
    /// "negative" when this bit is set.
    pub(crate) fn is_negative(&self) -> Choice {
        Choice::from(self.to_bytes()[0] & 1)
    }

    /// Whether this is zero mod \\(p\\).
    pub(crate) fn is_zero(&self) -> Choice {
        self.to_bytes().ct_eq(&[0u8; 32])
    }

    /// The shared prefix of the inversion and square root chains.
    ///
    /// Returns \\((z\^{2\^{250}-1}, z\^{11})\\), in 250 squarings and 11
    /// multiplications.
    fn pow22501(&self) -> (FieldElement, FieldElement) {
        let z = self;
        let z2 = z.square();
        let z8 = z2.pow2k(2);
        let z9 = z * &z8;
        let z11 = &z2 * &z9;
        let z22 = z11.square();

        // Write z_a_b for z^(2^a - 2^b).
        let z_5_0 = &z9 * &z22;
        let z_10_0 = &z_5_0.pow2k(5) * &z_5_0;
        let z_20_0 = &z_10_0.pow2k(10) * &z_10_0;
        let z_40_0 = &z_20_0.pow2k(20) * &z_20_0;
        let z_50_0 = &z_40_0.pow2k(10) * &z_10_0;
        let z_100_0 = &z_50_0.pow2k(50) * &z_50_0;
        let z_200_0 = &z_100_0.pow2k(100) * &z_100_0;
        let z_250_0 = &z_200_0.pow2k(50) * &z_50_0;

        (z_250_0, z11)
    }

    /// \\(z\^{-1} = z\^{p-2}\\).  Zero maps to zero.
    pub(crate) fn invert(&self) -> FieldElement {
        // p - 2 = 2^255 - 21 = (2^250 - 1) * 2^5 + 11
        let (z_250_0, z11) = self.pow22501();
        &z_250_0.pow2k(5) * &z11
    }

    /// \\(z\^{(p-5)/8} = z\^{2\^{252}-3}\\).
    pub(crate) fn pow_p58(&self) -> FieldElement {
        // 2^252 - 3 = (2^250 - 1) * 2^2 + 1
        let (z_250_0, _) = self.pow22501();
        self * &z_250_0.pow2k(2)
    }

    /// Square root of the ratio `u/v`, folded into one exponentiation.
    ///
    /// Let \\(r = u v\^3 (u v\^7)\^{(p-5)/8}\\).  When `u/v` is a square,
    /// \\(v r\^2\\) is \\(u\\) or \\(-u\\), and in the second case
    /// \\(r \sqrt{-1}\\) is the root instead.  When `u/v` is not a square,
    /// \\(v r\^2 = \pm u \sqrt{-1}\\) and \\(r \sqrt{-1}\\) is a root of
    /// `i*u/v`.  If `v` is zero then so is `r`.
    ///
    /// # Return
    ///
    /// The root is always the nonnegative one.
    ///
    /// | inputs                         | result                        |
    /// |--------------------------------|-------------------------------|
    /// | `v != 0`, `u/v` square         | `(Choice(1), +sqrt(u/v))`     |
    /// | `u == 0`                       | `(Choice(1), 0)`              |
    /// | `v == 0`, `u != 0`             | `(Choice(0), 0)`              |
    /// | `u/v` nonsquare                | `(Choice(0), +sqrt(i*u/v))`   |
    pub(crate) fn sqrt_ratio_i(u: &FieldElement, v: &FieldElement) -> (Choice, FieldElement) {
        let v3 = &v.square() * v;
        let v7 = &v3.square() * v;
        let mut r = &(u * &v3) * &(u * &v7).pow_p58();
        let vr2 = v * &r.square();

        let minus_u = -u;
        let root_found = vr2.ct_eq(u);
        let needs_i = vr2.ct_eq(&minus_u);
        let nonsquare = vr2.ct_eq(&(&minus_u * &constants::SQRT_M1));

        let r_times_i = &r * &constants::SQRT_M1;
        r.conditional_assign(&r_times_i, needs_i | nonsquare);

        let r_is_negative = r.is_negative();
        r.conditional_negate(r_is_negative);

        (root_found | needs_i, r)
    }
}
