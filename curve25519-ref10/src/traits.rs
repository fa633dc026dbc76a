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

//! Traits shared by the point types.

use subtle::ConstantTimeEq;

/// Types with a neutral element.
pub trait Identity {
    /// The neutral element \\(\mathcal O\\).
    fn identity() -> Self;
}

/// Comparison against [`Identity::identity`].
pub trait IsIdentity {
    /// Whether `self` is the neutral element.
    fn is_identity(&self) -> bool;
}

impl<T> IsIdentity for T
where
    T: ConstantTimeEq + Identity,
{
    fn is_identity(&self) -> bool {
        self.ct_eq(&T::identity()).into()
    }
}

/// Curve-equation check for internal representations.  Only used by
/// tests and debug assertions; it is not constant time.
#[allow(dead_code)]
pub(crate) trait ValidityCheck {
    fn is_valid(&self) -> bool;
}
