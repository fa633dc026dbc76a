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

//! Serde round trips for the public types.

#![cfg(feature = "serde")]

use curve25519_ref10::constants::{ED25519_BASEPOINT_COMPRESSED, ED25519_BASEPOINT_POINT};
use curve25519_ref10::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_ref10::scalar::Scalar;

#[test]
fn serde_bincode_basepoint_roundtrip() {
    let encoded = bincode::serialize(&ED25519_BASEPOINT_POINT).unwrap();
    let enc_compressed = bincode::serialize(&ED25519_BASEPOINT_COMPRESSED).unwrap();
    assert_eq!(encoded, enc_compressed);

    // Check that the encoding is 32 bytes exactly
    assert_eq!(encoded.len(), 32);

    let dec_uncompressed: EdwardsPoint = bincode::deserialize(&encoded).unwrap();
    let dec_compressed: CompressedEdwardsY = bincode::deserialize(&encoded).unwrap();

    assert_eq!(dec_uncompressed, ED25519_BASEPOINT_POINT);
    assert_eq!(dec_compressed, ED25519_BASEPOINT_COMPRESSED);

    // Check that the encoding itself matches the usual one
    let raw_bytes = ED25519_BASEPOINT_COMPRESSED.as_bytes();
    let bp: EdwardsPoint = bincode::deserialize(raw_bytes).unwrap();
    assert_eq!(bp, ED25519_BASEPOINT_POINT);
}

#[test]
fn serde_rejects_invalid_points() {
    let mut bytes = [0u8; 32];
    bytes[0] = 2;
    let point: Result<EdwardsPoint, _> = bincode::deserialize(&bytes);
    assert!(point.is_err());

    // The compressed form is only a byte wrapper and accepts anything.
    let compressed: CompressedEdwardsY = bincode::deserialize(&bytes).unwrap();
    assert_eq!(compressed.to_bytes(), bytes);
}

#[test]
fn serde_truncated_input_fails() {
    let encoded = bincode::serialize(&Scalar::ONE).unwrap();
    let scalar: Result<Scalar, _> = bincode::deserialize(&encoded[..31]);
    assert!(scalar.is_err());
    let point: Result<EdwardsPoint, _> = bincode::deserialize(&encoded[..31]);
    assert!(point.is_err());
}
