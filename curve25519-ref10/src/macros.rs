// -*- mode: rust; -*-
//
// This file is part of curve25519-dalek.
// Copyright (c) 2016-2021 isis agora lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Internal macros.
//!
//! Arithmetic is written once, on references.  These forward the
//! by-value operand combinations to that impl.

/// Forward `T op &U`, `&T op U` and `T op U` to `&T op &U`.
macro_rules! forward_binop {
    ($op:ident :: $method:ident, $lhs:ty, $rhs:ty => $out:ty) => {
        impl<'b> $op<&'b $rhs> for $lhs {
            type Output = $out;
            fn $method(self, rhs: &'b $rhs) -> $out {
                $op::$method(&self, rhs)
            }
        }

        impl<'a> $op<$rhs> for &'a $lhs {
            type Output = $out;
            fn $method(self, rhs: $rhs) -> $out {
                $op::$method(self, &rhs)
            }
        }

        impl $op<$rhs> for $lhs {
            type Output = $out;
            fn $method(self, rhs: $rhs) -> $out {
                $op::$method(&self, &rhs)
            }
        }
    };
}

/// Forward `T op= U` to `T op= &U`.
macro_rules! forward_assign_op {
    ($op:ident :: $method:ident, $lhs:ty, $rhs:ty) => {
        impl $op<$rhs> for $lhs {
            fn $method(&mut self, rhs: $rhs) {
                $op::$method(self, &rhs)
            }
        }
    };
}
