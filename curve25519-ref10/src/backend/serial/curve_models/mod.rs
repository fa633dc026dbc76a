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

//! Internal curve representations which are not part of the public API.
//!
//! # Curve representations
//!
//! The curve is \\(-x\^2 + y\^2 = 1 + dx\^2y\^2\\).  Each step of a
//! scalar multiplication uses whichever coordinate system makes it
//! cheapest, in the manner of ref10's `ge_p1p1`, `ge_p2`, `ge_p3`,
//! `ge_cached` and `ge_precomp`:
//!
//! | type | coordinates | role |
//! |---|---|---|
//! | `CompletedPoint` | \\(((X:Z),(Y:T))\\), \\(x = X/Z\\), \\(y = Y/T\\) | output of every addition and doubling |
//! | `ProjectivePoint` | \\((X:Y:Z)\\) | input to doubling |
//! | [`EdwardsPoint`] | \\((X:Y:Z:T)\\) with \\(XY = ZT\\) | input to addition |
//! | `ProjectiveNielsPoint` | \\((Y+X, Y-X, Z, 2dT)\\) | cached addend |
//! | `AffineNielsPoint` | \\((y+x, y-x, 2dxy)\\) | precomputed table entry |
//!
//! A `CompletedPoint` costs \\(3 \mathrm M\\) to bring to
//! `ProjectivePoint` and \\(4 \mathrm M\\) to bring to `EdwardsPoint`, so
//! a run of doublings stays projective and only the last one is
//! extended.  The addition formulas are the unified ones of
//! [_Twisted Edwards Curves Revisited_][hwcd08], with \\(a = -1\\).
//!
//! [hwcd08]: https://www.iacr.org/archive/asiacrypt2008/53500329/53500329.pdf

#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::{Add, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallySelectable;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::constants;

use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::traits::{Identity, ValidityCheck};

/// \\((X:Y:Z)\\) on the \\(\mathbb P\^2\\) model; \\((x,y)\\) is
/// \\((x:y:1)\\).
#[derive(Copy, Clone)]
pub struct ProjectivePoint {
    pub X: FieldElement,
    pub Y: FieldElement,
    pub Z: FieldElement,
}

/// \\(((X:Z),(Y:T))\\) on \\(\mathbb P\^1 \times \mathbb P\^1\\); the
/// affine point \\((x,y)\\) is \\(((x:1),(y:1))\\).
#[derive(Copy, Clone)]
pub struct CompletedPoint {
    pub X: FieldElement,
    pub Y: FieldElement,
    pub Z: FieldElement,
    pub T: FieldElement,
}

/// An affine point cached as \\((y+x, y-x, 2dxy)\\).
// Affine coordinates are unique, so the derived equality is sound.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct AffineNielsPoint {
    pub y_plus_x: FieldElement,
    pub y_minus_x: FieldElement,
    pub xy2d: FieldElement,
}

/// An extended point cached as \\((Y+X, Y-X, Z, 2dT)\\).
#[derive(Copy, Clone)]
pub struct ProjectiveNielsPoint {
    pub Y_plus_X: FieldElement,
    pub Y_minus_X: FieldElement,
    pub Z: FieldElement,
    pub T2d: FieldElement,
}

#[cfg(feature = "zeroize")]
impl Zeroize for AffineNielsPoint {
    fn zeroize(&mut self) {
        self.y_plus_x.zeroize();
        self.y_minus_x.zeroize();
        self.xy2d.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for ProjectiveNielsPoint {
    fn zeroize(&mut self) {
        self.Y_plus_X.zeroize();
        self.Y_minus_X.zeroize();
        self.Z.zeroize();
        self.T2d.zeroize();
    }
}

// ------------------------------------------------------------------------
// Identities
// ------------------------------------------------------------------------

impl Identity for ProjectivePoint {
    fn identity() -> ProjectivePoint {
        ProjectivePoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
        }
    }
}

impl Identity for ProjectiveNielsPoint {
    fn identity() -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: FieldElement::ONE,
            Y_minus_X: FieldElement::ONE,
            Z: FieldElement::ONE,
            T2d: FieldElement::ZERO,
        }
    }
}

impl Identity for AffineNielsPoint {
    fn identity() -> AffineNielsPoint {
        AffineNielsPoint {
            y_plus_x: FieldElement::ONE,
            y_minus_x: FieldElement::ONE,
            xy2d: FieldElement::ZERO,
        }
    }
}

impl Default for ProjectiveNielsPoint {
    fn default() -> ProjectiveNielsPoint {
        ProjectiveNielsPoint::identity()
    }
}

impl Default for AffineNielsPoint {
    fn default() -> AffineNielsPoint {
        AffineNielsPoint::identity()
    }
}

impl ValidityCheck for ProjectivePoint {
    fn is_valid(&self) -> bool {
        // (Y^2 - X^2) Z^2 = Z^4 + d X^2 Y^2
        let x2 = self.X.square();
        let y2 = self.Y.square();
        let z2 = self.Z.square();
        let lhs = &(&y2 - &x2) * &z2;
        let rhs = &z2.square() + &(&constants::EDWARDS_D * &(&x2 * &y2));

        lhs == rhs
    }
}

// ------------------------------------------------------------------------
// Constant-time selection
// ------------------------------------------------------------------------

impl ConditionallySelectable for ProjectiveNielsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectiveNielsPoint {
            Y_plus_X: FieldElement::conditional_select(&a.Y_plus_X, &b.Y_plus_X, choice),
            Y_minus_X: FieldElement::conditional_select(&a.Y_minus_X, &b.Y_minus_X, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
            T2d: FieldElement::conditional_select(&a.T2d, &b.T2d, choice),
        }
    }
}

impl ConditionallySelectable for AffineNielsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        AffineNielsPoint {
            y_plus_x: FieldElement::conditional_select(&a.y_plus_x, &b.y_plus_x, choice),
            y_minus_x: FieldElement::conditional_select(&a.y_minus_x, &b.y_minus_x, choice),
            xy2d: FieldElement::conditional_select(&a.xy2d, &b.xy2d, choice),
        }
    }
}

// ------------------------------------------------------------------------
// Conversions
// ------------------------------------------------------------------------

impl ProjectivePoint {
    /// \\((XZ : YZ : Z\^2 : XY)\\), for \\(3 \mathrm M + 1 \mathrm S\\).
    pub fn as_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: &self.X * &self.Z,
            Y: &self.Y * &self.Z,
            Z: self.Z.square(),
            T: &self.X * &self.Y,
        }
    }

    /// ref10's `ge_p2_dbl`.  Returns a `CompletedPoint`, so a following
    /// doubling can go through [`CompletedPoint::as_projective`].
    pub fn double(&self) -> CompletedPoint {
        let a = self.X.square();
        let b = self.Y.square();
        let c = self.Z.square2();
        let b_plus_a = &b + &a;
        let g = &b - &a;
        let e = &(&self.X + &self.Y).square() - &b_plus_a;

        CompletedPoint {
            X: e,
            Y: b_plus_a,
            Z: g,
            T: &c - &g,
        }
    }
}

impl CompletedPoint {
    /// \\((XT : YZ : ZT)\\), for \\(3 \mathrm M\\).
    pub fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: &self.X * &self.T,
            Y: &self.Y * &self.Z,
            Z: &self.Z * &self.T,
        }
    }

    /// \\((XT : YZ : ZT : XY)\\), for \\(4 \mathrm M\\).
    pub fn as_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: &self.X * &self.T,
            Y: &self.Y * &self.Z,
            Z: &self.Z * &self.T,
            T: &self.X * &self.Y,
        }
    }

    /// Finish an addition from `a = (Y1-X1)(Y2-X2)`, `b = (Y1+X1)(Y2+X2)`,
    /// `c = 2d T1 T2` and `d = 2 Z1 Z2`.  Subtraction passes the products
    /// against the negated addend.
    fn from_hwcd_products(
        a: &FieldElement,
        b: &FieldElement,
        c: &FieldElement,
        d: &FieldElement,
    ) -> CompletedPoint {
        CompletedPoint {
            X: b - a,
            Y: b + a,
            Z: d + c,
            T: d - c,
        }
    }
}

// ------------------------------------------------------------------------
// Mixed additions.  The left operand is always extended.
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b ProjectiveNielsPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    /// ref10's `ge_add`.
    fn add(self, q: &'b ProjectiveNielsPoint) -> CompletedPoint {
        let a = &(&self.Y - &self.X) * &q.Y_minus_X;
        let b = &(&self.Y + &self.X) * &q.Y_plus_X;
        let c = &self.T * &q.T2d;
        let zz = &self.Z * &q.Z;
        let d = &zz + &zz;
        CompletedPoint::from_hwcd_products(&a, &b, &c, &d)
    }
}

impl<'a, 'b> Sub<&'b ProjectiveNielsPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    /// ref10's `ge_sub`: `-q` swaps `Y+X` with `Y-X` and negates `2dT`.
    fn sub(self, q: &'b ProjectiveNielsPoint) -> CompletedPoint {
        let a = &(&self.Y - &self.X) * &q.Y_plus_X;
        let b = &(&self.Y + &self.X) * &q.Y_minus_X;
        let c = -&(&self.T * &q.T2d);
        let zz = &self.Z * &q.Z;
        let d = &zz + &zz;
        CompletedPoint::from_hwcd_products(&a, &b, &c, &d)
    }
}

impl<'a, 'b> Add<&'b AffineNielsPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    /// ref10's `ge_madd`; the addend has \\(Z = 1\\).
    fn add(self, q: &'b AffineNielsPoint) -> CompletedPoint {
        let a = &(&self.Y - &self.X) * &q.y_minus_x;
        let b = &(&self.Y + &self.X) * &q.y_plus_x;
        let c = &self.T * &q.xy2d;
        let d = &self.Z + &self.Z;
        CompletedPoint::from_hwcd_products(&a, &b, &c, &d)
    }
}

impl<'a, 'b> Sub<&'b AffineNielsPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    /// ref10's `ge_msub`.
    fn sub(self, q: &'b AffineNielsPoint) -> CompletedPoint {
        let a = &(&self.Y - &self.X) * &q.y_plus_x;
        let b = &(&self.Y + &self.X) * &q.y_minus_x;
        let c = -&(&self.T * &q.xy2d);
        let d = &self.Z + &self.Z;
        CompletedPoint::from_hwcd_products(&a, &b, &c, &d)
    }
}

impl<'a> Neg for &'a ProjectiveNielsPoint {
    type Output = ProjectiveNielsPoint;

    fn neg(self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: self.Y_minus_X,
            Y_minus_X: self.Y_plus_X,
            Z: self.Z,
            T2d: -&self.T2d,
        }
    }
}

impl<'a> Neg for &'a AffineNielsPoint {
    type Output = AffineNielsPoint;

    fn neg(self) -> AffineNielsPoint {
        AffineNielsPoint {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            xy2d: -&self.xy2d,
        }
    }
}

// ------------------------------------------------------------------------
// Debug traits
// ------------------------------------------------------------------------

impl Debug for ProjectivePoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProjectivePoint")
            .field("X", &self.X)
            .field("Y", &self.Y)
            .field("Z", &self.Z)
            .finish()
    }
}

impl Debug for CompletedPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CompletedPoint")
            .field("X", &self.X)
            .field("Y", &self.Y)
            .field("Z", &self.Z)
            .field("T", &self.T)
            .finish()
    }
}

impl Debug for AffineNielsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AffineNielsPoint")
            .field("y_plus_x", &self.y_plus_x)
            .field("y_minus_x", &self.y_minus_x)
            .field("xy2d", &self.xy2d)
            .finish()
    }
}

impl Debug for ProjectiveNielsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProjectiveNielsPoint")
            .field("Y_plus_X", &self.Y_plus_X)
            .field("Y_minus_X", &self.Y_minus_X)
            .field("Z", &self.Z)
            .field("T2d", &self.T2d)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::ED25519_BASEPOINT_POINT;

    #[test]
    fn projective_double_matches_extended_addition() {
        let B = ED25519_BASEPOINT_POINT;
        let doubled = B.as_projective().double().as_extended();
        let added = (&B + &B.as_projective_niels()).as_extended();
        assert_eq!(doubled.compress(), added.compress());
        assert!(doubled.as_projective().is_valid());
    }

    #[test]
    fn affine_and_projective_niels_additions_agree() {
        let B = ED25519_BASEPOINT_POINT;
        let P = B.double();
        let via_affine = (&P + &B.as_affine_niels()).as_extended();
        let via_projective = (&P + &B.as_projective_niels()).as_extended();
        assert_eq!(via_affine, via_projective);

        let back = (&via_affine - &B.as_affine_niels()).as_extended();
        assert_eq!(back, P);
        let back = (&via_projective - &B.as_projective_niels()).as_extended();
        assert_eq!(back, P);
    }

    #[test]
    fn adding_cached_identity_is_noop() {
        let B = ED25519_BASEPOINT_POINT;
        let sum = (&B + &ProjectiveNielsPoint::identity()).as_extended();
        assert_eq!(sum, B);
        let sum = (&B + &AffineNielsPoint::identity()).as_extended();
        assert_eq!(sum, B);
    }

    #[test]
    fn negated_niels_point_subtracts() {
        let B = ED25519_BASEPOINT_POINT;
        let P = B.double();
        let via_neg = (&P + &(-&B.as_projective_niels())).as_extended();
        assert_eq!(via_neg, B);
        let via_neg = (&P + &(-&B.as_affine_niels())).as_extended();
        assert_eq!(via_neg, B);
    }

    #[test]
    fn unified_addition_doubles() {
        // The same formula handles P + P.
        let B = ED25519_BASEPOINT_POINT;
        let via_add = (&B + &B.as_affine_niels()).as_extended();
        assert_eq!(via_add, B.as_projective().double().as_extended());
    }
}
