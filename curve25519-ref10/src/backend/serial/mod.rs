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

//! Serial implementations of field, scalar, point arithmetic.
//!
//! Point operations use the mixed-model strategy described in
//! [`curve_models`]; the scalar multiplication loops are in [`scalar_mul`].

pub mod u32;

pub mod curve_models;

pub mod scalar_mul;
