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

//! \\(aA + bB\\) by interleaved width-5 NAF, as in ref10's
//! `ge_double_scalarmult_vartime`.  Only for public inputs.

#![allow(non_snake_case)]

use crate::backend::serial::curve_models::{CompletedPoint, ProjectiveNielsPoint, ProjectivePoint};
use crate::constants;
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::NafLookupTable5;

/// Add the signed odd multiple `digit·P` taken from `odd` to `sum`.
macro_rules! add_naf_digit {
    ($sum:ident, $digit:expr, $odd:expr) => {
        let digit: i8 = $digit;
        if digit > 0 {
            $sum = &$sum.as_extended() + &$odd.select(digit as usize);
        } else if digit < 0 {
            $sum = &$sum.as_extended() - &$odd.select(digit.unsigned_abs() as usize);
        }
    };
}

/// Compute \\(aA + bB\\) in variable time, where \\(B\\) is the Ed25519 basepoint.
pub fn mul(a: &Scalar, A: &EdwardsPoint, b: &Scalar) -> EdwardsPoint {
    let a_naf = a.non_adjacent_form();
    let b_naf = b.non_adjacent_form();

    let top = match (0..256).rev().find(|&i| a_naf[i] != 0 || b_naf[i] != 0) {
        Some(top) => top,
        None => return EdwardsPoint::identity(),
    };

    let odd_A = NafLookupTable5::<ProjectiveNielsPoint>::from(A);
    let odd_B = &*constants::AFFINE_ODD_MULTIPLES_OF_BASEPOINT;

    let mut acc = ProjectivePoint::identity();
    for i in (0..=top).rev() {
        let mut sum: CompletedPoint = acc.double();
        add_naf_digit!(sum, a_naf[i], odd_A);
        add_naf_digit!(sum, b_naf[i], odd_B);
        acc = sum.as_projective();
    }

    acc.as_extended()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::ED25519_BASEPOINT_POINT;
    use crate::traits::IsIdentity;

    #[test]
    fn zero_scalars_give_identity() {
        let A = ED25519_BASEPOINT_POINT.double();
        assert!(mul(&Scalar::ZERO, &A, &Scalar::ZERO).is_identity());
    }

    #[test]
    fn single_terms() {
        let A = ED25519_BASEPOINT_POINT.double();
        let seven = Scalar::from(7u64);
        assert_eq!(mul(&seven, &A, &Scalar::ZERO), &A * &seven);
        assert_eq!(mul(&Scalar::ZERO, &A, &seven), &ED25519_BASEPOINT_POINT * &seven);
    }

    #[test]
    fn negative_digits() {
        // -1 mod l has NAF digits of both signs.
        let minus_one = -Scalar::ONE;
        let A = ED25519_BASEPOINT_POINT;
        assert!(mul(&minus_one, &A, &Scalar::ONE).is_identity());
    }
}
