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

//! Property tests for point encoding and scalar arithmetic.

#![allow(non_snake_case)]

use curve25519_ref10::constants::{ED25519_BASEPOINT_POINT, ED25519_BASEPOINT_TABLE};
use curve25519_ref10::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_ref10::scalar::Scalar;

use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Scalar> {
    any::<[u8; 32]>().prop_map(Scalar::from_bytes_mod_order)
}

proptest! {
    #[test]
    fn decode_inverts_encode(s in scalar()) {
        let P = EdwardsPoint::mul_base(&s);
        let decoded = P.compress().decompress();
        prop_assert_eq!(decoded, Some(P));
    }

    #[test]
    fn decode_accepts_only_canonical_encodings(bytes in any::<[u8; 32]>()) {
        let repr = CompressedEdwardsY(bytes);
        if let Some(P) = repr.decompress() {
            prop_assert_eq!(P.compress(), repr);
        }
    }

    #[test]
    fn fixed_and_variable_base_agree(s in scalar()) {
        let fixed = &*ED25519_BASEPOINT_TABLE * &s;
        let variable = &ED25519_BASEPOINT_POINT * &s;
        prop_assert_eq!(fixed, variable);
    }

    #[test]
    fn double_base_matches_separate_products(a in scalar(), b in scalar(), k in scalar()) {
        let A = EdwardsPoint::mul_base(&k);
        let expected = &A * &a + EdwardsPoint::mul_base(&b);
        prop_assert_eq!(EdwardsPoint::vartime_double_scalar_mul_basepoint(&a, &A, &b), expected);
    }

    #[test]
    fn scalar_ring_laws(a in scalar(), b in scalar(), c in scalar()) {
        prop_assert_eq!(Scalar::multiply_add(&a, &b, &c), &(&a * &b) + &c);
        prop_assert_eq!(&(&a - &b) + &b, a);
        prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        prop_assert_eq!(-(-a), a);
    }

    #[test]
    fn reduced_scalars_are_canonical(bytes in any::<[u8; 32]>(), wide in any::<[u8; 32]>()) {
        let s = Scalar::from_bytes_mod_order(bytes);
        prop_assert!(bool::from(Scalar::from_canonical_bytes(s.to_bytes()).is_some()));

        let mut input = [0u8; 64];
        input[..32].copy_from_slice(&bytes);
        input[32..].copy_from_slice(&wide);
        let w = Scalar::from_bytes_mod_order_wide(&input);
        prop_assert!(bool::from(Scalar::from_canonical_bytes(w.to_bytes()).is_some()));
    }

    #[test]
    fn scalar_mul_distributes_over_points(a in scalar(), b in scalar()) {
        let sum = EdwardsPoint::mul_base(&(&a + &b));
        prop_assert_eq!(sum, EdwardsPoint::mul_base(&a) + EdwardsPoint::mul_base(&b));
    }
}
