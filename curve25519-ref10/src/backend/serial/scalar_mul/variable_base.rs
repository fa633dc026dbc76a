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

#![allow(non_snake_case)]

use crate::backend::serial::curve_models::ProjectiveNielsPoint;
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::LookupTable;

/// Constant-time \\(sP\\) for secret \\(s\\), by Horner's rule over the
/// signed radix-16 digits of \\(s\\).
pub(crate) fn mul(point: &EdwardsPoint, scalar: &Scalar) -> EdwardsPoint {
    let multiples = LookupTable::<ProjectiveNielsPoint>::from(point);
    // Digits lie in [-8, 8), except the top one which may be 8.
    let digits = scalar.as_radix_16();

    let mut q = &EdwardsPoint::identity() + &multiples.select(digits[63]);
    for &digit in digits[..63].iter().rev() {
        // q <- 16 q + digit P, staying projective through the doublings
        for _ in 0..4 {
            q = q.as_projective().double();
        }
        q = &q.as_extended() + &multiples.select(digit);
    }
    q.as_extended()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::ED25519_BASEPOINT_POINT;
    use crate::traits::IsIdentity;

    #[test]
    fn small_multiples_match_repeated_addition() {
        let B = ED25519_BASEPOINT_POINT;
        let mut acc = EdwardsPoint::identity();
        for k in 0u64..20 {
            assert_eq!(mul(&B, &Scalar::from(k)), acc);
            acc = &acc + &B;
        }
    }

    #[test]
    fn order_times_basepoint_is_identity() {
        // l - 1 followed by one more addition wraps to the identity
        let B = ED25519_BASEPOINT_POINT;
        let almost = mul(&B, &Scalar::MINUS_ONE);
        assert!((&almost + &B).is_identity());
        assert_eq!(almost, -B);
    }
}
