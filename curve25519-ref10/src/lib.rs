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

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(
    clippy::unwrap_used,
    rust_2018_idioms,
    trivial_casts,
    unused_lifetimes,
    unused_qualifications
)]

//! Arithmetic on edwards25519, the twisted Edwards form of Curve25519.
//!
//! This crate provides the three arithmetic layers an Ed25519
//! implementation needs:
//!
//! * field arithmetic modulo \\(p = 2\^{255} - 19\\), on ten signed limbs
//!   of alternating 26 and 25 bits;
//! * group operations on the curve \\(-x\^2 + y\^2 = 1 + dx\^2y\^2\\) in
//!   extended, projective, completed and Niels coordinates, with
//!   canonical point compression and decompression;
//! * scalar arithmetic modulo the prime order
//!   \\(\ell = 2\^{252} + 27742317777372353535851937790883648493\\)
//!   of the basepoint.
//!
//! Everything that may touch secret data runs in constant time.  The only
//! variable-time routine is
//! [`EdwardsPoint::vartime_double_scalar_mul_basepoint`](edwards::EdwardsPoint::vartime_double_scalar_mul_basepoint),
//! which exists for signature verification.

//------------------------------------------------------------------------
// External dependencies:
//------------------------------------------------------------------------

#[cfg(feature = "alloc")]
#[allow(unused_imports)]
#[macro_use]
extern crate alloc;

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(feature = "digest")]
pub use digest;

#[cfg(not(any(feature = "std", feature = "critical-section")))]
compile_error!(
    "curve25519-ref10 needs either the `std` or the `critical-section` feature \
     to initialize its precomputed basepoint tables"
);

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

//------------------------------------------------------------------------
// curve25519-ref10 public modules
//------------------------------------------------------------------------

// Scalar arithmetic mod l = 2^252 + ..., the order of the basepoint
pub mod scalar;

// Point operations on the Edwards form of Curve25519
pub mod edwards;

// Useful constants, like the Ed25519 basepoint
pub mod constants;

// External (and internal) traits.
pub mod traits;

//------------------------------------------------------------------------
// curve25519-ref10 internal modules
//------------------------------------------------------------------------

// Finite field arithmetic mod p = 2^255 - 19
pub(crate) mod field;

// Arithmetic backends (the ref10 2^25.5 limbs) live here
pub(crate) mod backend;

// Generic code for window lookups
pub(crate) mod window;

pub use crate::{edwards::EdwardsPoint, scalar::Scalar};
