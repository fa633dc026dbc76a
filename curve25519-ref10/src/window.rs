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

//! Tables of small multiples of a point.
//!
//! [`LookupTable`] serves the constant-time signed radix-16 loops and
//! [`NafLookupTable5`] the variable-time width-5 NAF loop.

#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::Add;

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::backend::serial::curve_models::{
    AffineNielsPoint, CompletedPoint, ProjectiveNielsPoint,
};
use crate::edwards::EdwardsPoint;
use crate::traits::Identity;

/// A cached form that table entries are stored in.
pub trait CachedPoint: Copy {
    fn from_extended(P: &EdwardsPoint) -> Self;
}

impl CachedPoint for ProjectiveNielsPoint {
    fn from_extended(P: &EdwardsPoint) -> Self {
        P.as_projective_niels()
    }
}

impl CachedPoint for AffineNielsPoint {
    fn from_extended(P: &EdwardsPoint) -> Self {
        P.as_affine_niels()
    }
}

/// \\([P, 2P, \ldots, 8P]\\), read only through the constant-time
/// [`LookupTable::select`].
#[derive(Copy, Clone)]
pub struct LookupTable<T>(pub(crate) [T; 8]);

impl<T> LookupTable<T>
where
    T: Identity + ConditionallySelectable + ConditionallyNegatable,
{
    /// \\(xP\\) for \\(-8 \leq x \leq 8\\), touching every entry
    /// regardless of \\(x\\).  This is ref10's `select` with `cmov`.
    pub fn select(&self, x: i8) -> T {
        debug_assert!((-8..=8).contains(&x));

        let sign_mask = x >> 7;
        let magnitude = ((x ^ sign_mask) - sign_mask) as u8;

        let mut selected = T::identity();
        for (entry, k) in self.0.iter().zip(1u8..) {
            selected.conditional_assign(entry, magnitude.ct_eq(&k));
        }
        selected.conditional_negate(Choice::from((sign_mask & 1) as u8));
        selected
    }
}

impl<T: Copy + Default> Default for LookupTable<T> {
    fn default() -> Self {
        LookupTable([T::default(); 8])
    }
}

impl<T: Debug> Debug for LookupTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("LookupTable").field(&self.0).finish()
    }
}

impl<'a, T> From<&'a EdwardsPoint> for LookupTable<T>
where
    T: CachedPoint,
    for<'c, 'd> &'c EdwardsPoint: Add<&'d T, Output = CompletedPoint>,
{
    fn from(P: &'a EdwardsPoint) -> Self {
        let cached_P = T::from_extended(P);
        let mut entries = [cached_P; 8];
        let mut kP = *P;
        for entry in entries.iter_mut().skip(1) {
            kP = (&kP + &cached_P).as_extended();
            *entry = T::from_extended(&kP);
        }
        LookupTable(entries)
    }
}

/// \\([A, 3A, 5A, \ldots, 15A]\\), indexed directly by public NAF digits.
#[derive(Copy, Clone)]
pub(crate) struct NafLookupTable5<T>(pub(crate) [T; 8]);

impl<T: Copy> NafLookupTable5<T> {
    /// \\(xA\\) for odd \\(0 < x < 16\\).  Variable time.
    pub fn select(&self, x: usize) -> T {
        debug_assert!(x % 2 == 1 && x < 16);
        self.0[x >> 1]
    }
}

impl<T: Debug> Debug for NafLookupTable5<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("NafLookupTable5").field(&self.0).finish()
    }
}

impl<'a, T> From<&'a EdwardsPoint> for NafLookupTable5<T>
where
    T: CachedPoint,
    for<'c, 'd> &'c EdwardsPoint: Add<&'d T, Output = CompletedPoint>,
{
    fn from(A: &'a EdwardsPoint) -> Self {
        let cached_2A = T::from_extended(&A.double());
        let mut entries = [T::from_extended(A); 8];
        let mut odd = *A;
        for entry in entries.iter_mut().skip(1) {
            odd = (&odd + &cached_2A).as_extended();
            *entry = T::from_extended(&odd);
        }
        NafLookupTable5(entries)
    }
}
