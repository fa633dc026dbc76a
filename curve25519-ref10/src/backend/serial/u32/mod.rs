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

//! The `u32` backend uses `u32`s and a `(u32, u32) -> u64` multiplier.
//!
//! Field elements use the ref10 \\(2\^{25.5}\\) radix.  Scalars are
//! handled directly on bytes in `crate::scalar`, in ref10 fashion, so this
//! backend only carries the field type and its constants.

pub mod field;

pub mod constants;
