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

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\), using \\(32\\)-bit
//! limbs with \\(64\\)-bit products.
//!
//! This is the ref10 representation: ten signed limbs in alternating
//! radix \\(2\^{26}\\) and \\(2\^{25}\\).  Limbs are allowed to grow
//! between multiplications; every multiplication and squaring ends with
//! the same carry chain, and encoding first carries and then freezes the
//! value to its canonical representative.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// A `FieldElement2625` represents an element of the field
/// \\( \mathbb Z / (2\^{255} - 19)\\).
///
/// An element \\(t\\) with limbs \\(t\_0, \ldots, t\_9\\) represents the
/// integer
/// $$
/// t\_0 + t\_1 2\^{26} + t\_2 2\^{51} + t\_3 2\^{77} + t\_4 2\^{102} +
/// t\_5 2\^{128} + t\_6 2\^{153} + t\_7 2\^{179} + t\_8 2\^{204} +
/// t\_9 2\^{230}.
/// $$
///
/// Limbs are signed.  After a multiplication or squaring the limbs are
/// bounded by \\(1.01 \cdot 2\^{25}\\) (even) and \\(1.01 \cdot
/// 2\^{24}\\) (odd); the product routines accept inputs up to
/// \\(1.65 \cdot 2\^{26}\\) and \\(1.65 \cdot 2\^{25}\\), which leaves room
/// for a few additions or subtractions between multiplications.
///
/// The backend-specific type `FieldElement2625` should not be used
/// outside of the `curve25519_ref10::field` module.
#[derive(Copy, Clone)]
pub struct FieldElement2625(pub(crate) [i32; 10]);

impl Debug for FieldElement2625 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement2625({:?})", &self.0[..])
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement2625 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<'b> AddAssign<&'b FieldElement2625> for FieldElement2625 {
    fn add_assign(&mut self, rhs: &'b FieldElement2625) {
        for i in 0..10 {
            self.0[i] += rhs.0[i];
        }
    }
}

impl<'a, 'b> Add<&'b FieldElement2625> for &'a FieldElement2625 {
    type Output = FieldElement2625;
    fn add(self, rhs: &'b FieldElement2625) -> FieldElement2625 {
        let mut output = *self;
        output += rhs;
        output
    }
}

impl<'b> SubAssign<&'b FieldElement2625> for FieldElement2625 {
    fn sub_assign(&mut self, rhs: &'b FieldElement2625) {
        for i in 0..10 {
            self.0[i] -= rhs.0[i];
        }
    }
}

impl<'a, 'b> Sub<&'b FieldElement2625> for &'a FieldElement2625 {
    type Output = FieldElement2625;
    fn sub(self, rhs: &'b FieldElement2625) -> FieldElement2625 {
        let mut output = *self;
        output -= rhs;
        output
    }
}

impl<'b> MulAssign<&'b FieldElement2625> for FieldElement2625 {
    fn mul_assign(&mut self, rhs: &'b FieldElement2625) {
        let result = &*self * rhs;
        self.0 = result.0;
    }
}

impl<'a, 'b> Mul<&'b FieldElement2625> for &'a FieldElement2625 {
    type Output = FieldElement2625;

    /// Schoolbook multiplication.  Limbs of odd index carry half a bit
    /// less than their position suggests, so the products of two odd limbs
    /// are doubled; the wraparound past \\(2\^{255}\\) is folded back in by
    /// multiplying by 19.
    #[rustfmt::skip] // keep alignment of h[*] calculations
    fn mul(self, rhs: &'b FieldElement2625) -> FieldElement2625 {
        let f: [i64; 10] = widen(&self.0);
        let g: [i64; 10] = widen(&rhs.0);

        let f1_2 = 2 * f[1];
        let f3_2 = 2 * f[3];
        let f5_2 = 2 * f[5];
        let f7_2 = 2 * f[7];
        let f9_2 = 2 * f[9];

        let g1_19 = 19 * g[1];
        let g2_19 = 19 * g[2];
        let g3_19 = 19 * g[3];
        let g4_19 = 19 * g[4];
        let g5_19 = 19 * g[5];
        let g6_19 = 19 * g[6];
        let g7_19 = 19 * g[7];
        let g8_19 = 19 * g[8];
        let g9_19 = 19 * g[9];

        let h0 = f[0]*g[0] + f1_2*g9_19 + f[2]*g8_19 + f3_2*g7_19 + f[4]*g6_19 + f5_2*g5_19 + f[6]*g4_19 + f7_2*g3_19 + f[8]*g2_19 + f9_2*g1_19;
        let h1 = f[0]*g[1] + f[1]*g[0]  + f[2]*g9_19 + f[3]*g8_19 + f[4]*g7_19 + f[5]*g6_19 + f[6]*g5_19 + f[7]*g4_19 + f[8]*g3_19 + f[9]*g2_19;
        let h2 = f[0]*g[2] + f1_2*g[1]  + f[2]*g[0]  + f3_2*g9_19 + f[4]*g8_19 + f5_2*g7_19 + f[6]*g6_19 + f7_2*g5_19 + f[8]*g4_19 + f9_2*g3_19;
        let h3 = f[0]*g[3] + f[1]*g[2]  + f[2]*g[1]  + f[3]*g[0]  + f[4]*g9_19 + f[5]*g8_19 + f[6]*g7_19 + f[7]*g6_19 + f[8]*g5_19 + f[9]*g4_19;
        let h4 = f[0]*g[4] + f1_2*g[3]  + f[2]*g[2]  + f3_2*g[1]  + f[4]*g[0]  + f5_2*g9_19 + f[6]*g8_19 + f7_2*g7_19 + f[8]*g6_19 + f9_2*g5_19;
        let h5 = f[0]*g[5] + f[1]*g[4]  + f[2]*g[3]  + f[3]*g[2]  + f[4]*g[1]  + f[5]*g[0]  + f[6]*g9_19 + f[7]*g8_19 + f[8]*g7_19 + f[9]*g6_19;
        let h6 = f[0]*g[6] + f1_2*g[5]  + f[2]*g[4]  + f3_2*g[3]  + f[4]*g[2]  + f5_2*g[1]  + f[6]*g[0]  + f7_2*g9_19 + f[8]*g8_19 + f9_2*g7_19;
        let h7 = f[0]*g[7] + f[1]*g[6]  + f[2]*g[5]  + f[3]*g[4]  + f[4]*g[3]  + f[5]*g[2]  + f[6]*g[1]  + f[7]*g[0]  + f[8]*g9_19 + f[9]*g8_19;
        let h8 = f[0]*g[8] + f1_2*g[7]  + f[2]*g[6]  + f3_2*g[5]  + f[4]*g[4]  + f5_2*g[3]  + f[6]*g[2]  + f7_2*g[1]  + f[8]*g[0]  + f9_2*g9_19;
        let h9 = f[0]*g[9] + f[1]*g[8]  + f[2]*g[7]  + f[3]*g[6]  + f[4]*g[5]  + f[5]*g[4]  + f[6]*g[3]  + f[7]*g[2]  + f[8]*g[1]  + f[9]*g[0];

        FieldElement2625::reduce([h0, h1, h2, h3, h4, h5, h6, h7, h8, h9])
    }
}

impl<'a> Neg for &'a FieldElement2625 {
    type Output = FieldElement2625;
    fn neg(self) -> FieldElement2625 {
        let mut output = *self;
        output.negate();
        output
    }
}

impl ConditionallySelectable for FieldElement2625 {
    fn conditional_select(
        a: &FieldElement2625,
        b: &FieldElement2625,
        choice: Choice,
    ) -> FieldElement2625 {
        let mut output = [0i32; 10];
        for i in 0..10 {
            output[i] = i32::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldElement2625(output)
    }

    fn conditional_assign(&mut self, other: &FieldElement2625, choice: Choice) {
        for i in 0..10 {
            self.0[i].conditional_assign(&other.0[i], choice);
        }
    }
}

/// Sign-extend every limb so that all products are formed in 64 bits.
#[inline(always)]
fn widen(limbs: &[i32; 10]) -> [i64; 10] {
    let mut out = [0i64; 10];
    for i in 0..10 {
        out[i] = limbs[i] as i64;
    }
    out
}

/// Width in bits of limb `i`.
#[inline(always)]
const fn limb_bits(i: usize) -> u32 {
    if i % 2 == 0 {
        26
    } else {
        25
    }
}

/// Rounded carry out of limb `i` into limb `i + 1`, wrapping limb 9
/// into limb 0 with a factor of 19.  Leaves limb `i` centered around 0.
///
/// `i` is always a literal at the call site, so the branches below never
/// depend on field data.
#[inline(always)]
fn carry_centered(h: &mut [i64; 10], i: usize) {
    let bits = limb_bits(i);
    let c = (h[i] + (1i64 << (bits - 1))) >> bits;
    h[i] -= c << bits;
    if i == 9 {
        h[0] += c * 19;
    } else {
        h[i + 1] += c;
    }
}

/// Floor carry out of limb `i`, leaving limb `i` in `[0, 2^bits)`.  The
/// carry out of limb 9 is discarded.
#[inline(always)]
fn carry_floor(h: &mut [i32; 10], i: usize) {
    let bits = limb_bits(i);
    let c = h[i] >> bits;
    h[i] -= c << bits;
    if i != 9 {
        h[i + 1] += c;
    }
}

impl FieldElement2625 {
    /// The scalar \\( 0 \\).
    pub const ZERO: FieldElement2625 = FieldElement2625([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// The scalar \\( 1 \\).
    pub const ONE: FieldElement2625 = FieldElement2625([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// The scalar \\( -1 \\).
    #[cfg(test)]
    pub const MINUS_ONE: FieldElement2625 = FieldElement2625([-1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Invert the sign of this field element
    pub fn negate(&mut self) {
        for i in 0..10 {
            self.0[i] = -self.0[i];
        }
    }

    /// Run the ref10 carry chain over 64-bit limb accumulators.
    ///
    /// On input every \\(|h\_i|\\) must be below \\(2\^{62}\\); on output the
    /// limbs are within \\(2\^{25}\\) (even) and \\(2\^{24}\\) (odd),
    /// except limb 1 which may be \\(1.01 \cdot 2\^{24}\\).
    fn reduce(mut h: [i64; 10]) -> FieldElement2625 {
        // Two interleaved chains, 0 -> 1 -> 2 -> 3 -> 4 -> 5 and
        // 4 -> 5 -> 6 -> 7 -> 8 -> 9, then the wraparound 9 -> 0 -> 1.
        carry_centered(&mut h, 0);
        carry_centered(&mut h, 4);
        carry_centered(&mut h, 1);
        carry_centered(&mut h, 5);
        carry_centered(&mut h, 2);
        carry_centered(&mut h, 6);
        carry_centered(&mut h, 3);
        carry_centered(&mut h, 7);
        carry_centered(&mut h, 4);
        carry_centered(&mut h, 8);
        carry_centered(&mut h, 9);
        carry_centered(&mut h, 0);

        let mut output = [0i32; 10];
        for i in 0..10 {
            output[i] = h[i] as i32;
        }
        FieldElement2625(output)
    }

    /// Load a `FieldElement2625` from the low 255 bits of a 256-bit
    /// input.
    ///
    /// # Warning
    ///
    /// This function does not check that the input used the canonical
    /// representative.  It masks the high bit, but it will happily
    /// decode 2^255 - 18 to 1.  Applications that require a canonical
    /// encoding of every field element should decode, re-encode to
    /// the canonical encoding, and check that the input was
    /// canonical.
    #[rustfmt::skip] // keep alignment of h[*] values
    pub fn from_bytes(data: &[u8; 32]) -> FieldElement2625 {
        #[inline]
        fn load3(b: &[u8]) -> i64 {
            (b[0] as i64) | ((b[1] as i64) << 8) | ((b[2] as i64) << 16)
        }

        #[inline]
        fn load4(b: &[u8]) -> i64 {
            load3(b) | ((b[3] as i64) << 24)
        }

        let mut h = [0i64; 10];
        h[0] =  load4(&data[ 0..]);
        h[1] =  load3(&data[ 4..]) << 6;
        h[2] =  load3(&data[ 7..]) << 5;
        h[3] =  load3(&data[10..]) << 3;
        h[4] =  load3(&data[13..]) << 2;
        h[5] =  load4(&data[16..]);
        h[6] =  load3(&data[20..]) << 7;
        h[7] =  load3(&data[23..]) << 5;
        h[8] =  load3(&data[26..]) << 4;
        h[9] = (load3(&data[29..]) & 0x7f_ffff) << 2;

        FieldElement2625::reduce(h)
    }

    /// Serialize this `FieldElement2625` to a 32-byte array.  The
    /// encoding is canonical.
    pub fn to_bytes(self) -> [u8; 32] {
        // Bring the limbs into the range the freeze below expects.
        let mut h = FieldElement2625::reduce(widen(&self.0)).0;

        // Compute q = floor(h / p), which is 0 or 1 for the bounded h.
        let mut q = (19 * h[9] + (1 << 24)) >> 25;
        for i in 0..10 {
            q = (h[i] + q) >> limb_bits(i);
        }

        // h - p*q = h + 19q - 2^255 q; the 2^255 q term is the carry out
        // of limb 9, which the floor carries drop.
        h[0] += 19 * q;
        for i in 0..10 {
            carry_floor(&mut h, i);
        }

        // Every limb is now in [0, 2^26) or [0, 2^25); concatenate them.
        let mut s = [0u8; 32];
        let mut acc: u64 = 0;
        let mut acc_bits: u32 = 0;
        let mut k = 0;
        for i in 0..10 {
            acc |= (h[i] as u64) << acc_bits;
            acc_bits += limb_bits(i);
            while acc_bits >= 8 {
                s[k] = acc as u8;
                acc >>= 8;
                acc_bits -= 8;
                k += 1;
            }
        }
        s[31] = acc as u8;

        // Check that high bit is cleared
        debug_assert!((s[31] & 0b1000_0000u8) == 0u8);

        s
    }

    #[rustfmt::skip] // keep alignment of h[*] calculations
    fn square_inner(&self) -> [i64; 10] {
        let f: [i64; 10] = widen(&self.0);

        let f0_2  = 2 * f[0];
        let f1_2  = 2 * f[1];
        let f2_2  = 2 * f[2];
        let f3_2  = 2 * f[3];
        let f4_2  = 2 * f[4];
        let f5_2  = 2 * f[5];
        let f6_2  = 2 * f[6];
        let f7_2  = 2 * f[7];
        let f5_38 = 38 * f[5];
        let f6_19 = 19 * f[6];
        let f7_38 = 38 * f[7];
        let f8_19 = 19 * f[8];
        let f9_38 = 38 * f[9];

        let mut h = [0i64; 10];
        h[0] = f[0]*f[0] + f1_2*f9_38 + f2_2*f8_19 + f3_2*f7_38 + f4_2*f6_19 + f[5]*f5_38;
        h[1] = f0_2*f[1] + f[2]*f9_38 + f3_2*f8_19 + f[4]*f7_38 + f5_2*f6_19;
        h[2] = f0_2*f[2] + f1_2*f[1]  + f3_2*f9_38 + f4_2*f8_19 + f5_2*f7_38 + f[6]*f6_19;
        h[3] = f0_2*f[3] + f1_2*f[2]  + f[4]*f9_38 + f5_2*f8_19 + f[6]*f7_38;
        h[4] = f0_2*f[4] + f1_2*f3_2  + f[2]*f[2]  + f5_2*f9_38 + f6_2*f8_19 + f[7]*f7_38;
        h[5] = f0_2*f[5] + f1_2*f[4]  + f2_2*f[3]  + f[6]*f9_38 + f7_2*f8_19;
        h[6] = f0_2*f[6] + f1_2*f5_2  + f2_2*f[4]  + f3_2*f[3]  + f7_2*f9_38 + f[8]*f8_19;
        h[7] = f0_2*f[7] + f1_2*f[6]  + f2_2*f[5]  + f3_2*f[4]  + f[8]*f9_38;
        h[8] = f0_2*f[8] + f1_2*f7_2  + f2_2*f[6]  + f3_2*f5_2  + f[4]*f[4]  + f[9]*f9_38;
        h[9] = f0_2*f[9] + f1_2*f[8]  + f2_2*f[7]  + f3_2*f[6]  + f4_2*f[5];

        h
    }

    /// Compute `self^2`.
    pub fn square(&self) -> FieldElement2625 {
        FieldElement2625::reduce(self.square_inner())
    }

    /// Compute `2*self^2`.
    pub fn square2(&self) -> FieldElement2625 {
        let mut coeffs = self.square_inner();
        for coeff in coeffs.iter_mut() {
            *coeff += *coeff;
        }
        FieldElement2625::reduce(coeffs)
    }

    /// Given `k > 0`, return `self^(2^k)`.
    pub fn pow2k(&self, k: u32) -> FieldElement2625 {
        debug_assert!(k > 0);
        let mut z = self.square();
        for _ in 1..k {
            z = z.square();
        }
        z
    }

    /// Multiply by a small constant `c < 2^31`.  Only the curve constant
    /// checks need this; the Ed25519 formulas themselves never do.
    #[cfg(test)]
    pub fn mul_small(&self, c: u32) -> FieldElement2625 {
        let c = c as i64;
        let mut h = widen(&self.0);
        for limb in h.iter_mut() {
            *limb *= c;
        }
        FieldElement2625::reduce(h)
    }
}
