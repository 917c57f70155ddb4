//! Portable double-width integers.
//!
//! `Uint64`/`Int64` are built from two `u32` halves and `Uint128`/`Int128`
//! from two `u64` halves. Every operation only needs native arithmetic on a
//! single half, so the same code runs on targets without a native integer
//! of the full width. Multiplication is schoolbook over quarter digits and
//! division is normalized long division with at most two downward
//! corrections per quotient digit.
//!
//! All arithmetic wraps on overflow. Division by zero panics, like native
//! integer division.
//!
//! [`Fixed48_16`] is the intermediate used for slope cross products. It is
//! a native `i64` unless the `portable-wideint` feature routes it through
//! [`Int64`].

use core::cmp::Ordering;
use core::ops::{Add, Mul, Neg, Not, Shl, Shr, Sub};

macro_rules! wide_int {
    (
        $(#[$umeta:meta])*
        $uname:ident,
        $(#[$smeta:meta])*
        $sname:ident,
        half = $half:ty,
        signed_half = $shalf:ty,
        native = $unative:ty,
        signed_native = $snative:ty,
    ) => {
        $(#[$umeta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $uname {
            pub lo: $half,
            pub hi: $half,
        }

        impl $uname {
            pub const BITS: u32 = 2 * <$half>::BITS;
            const HALF_BITS: u32 = <$half>::BITS;
            const QUARTER_BITS: u32 = <$half>::BITS / 2;
            const QUARTER_MASK: $half = (1 << (<$half>::BITS / 2)) - 1;

            pub const ZERO: Self = Self { lo: 0, hi: 0 };
            pub const ONE: Self = Self { lo: 1, hi: 0 };
            pub const MAX: Self = Self {
                lo: <$half>::MAX,
                hi: <$half>::MAX,
            };

            #[inline]
            pub const fn from_halves(hi: $half, lo: $half) -> Self {
                Self { lo, hi }
            }

            #[inline]
            pub const fn from_half(lo: $half) -> Self {
                Self { lo, hi: 0 }
            }

            #[inline]
            pub fn is_zero(self) -> bool {
                self.lo == 0 && self.hi == 0
            }

            /// Full-width product of two halves.
            ///
            /// Each operand is split into two quarter digits; the four
            /// partial products fit a half each and the middle column
            /// carries into the high half explicitly.
            pub fn mul_halves(a: $half, b: $half) -> Self {
                let q = Self::QUARTER_BITS;
                let al = a & Self::QUARTER_MASK;
                let ah = a >> q;
                let bl = b & Self::QUARTER_MASK;
                let bh = b >> q;

                let r0 = al * bl;
                let mut r1 = al * bh;
                let r2 = ah * bl;
                let mut r3 = ah * bh;

                // cannot overflow: (B-1)^2 + (B-1) < B^2
                r1 += r0 >> q;
                r1 = r1.wrapping_add(r2);
                if r1 < r2 {
                    r3 += 1 << q;
                }

                Self {
                    hi: r3 + (r1 >> q),
                    lo: (r1 << q) + (r0 & Self::QUARTER_MASK),
                }
            }

            #[inline]
            pub fn wrapping_add(self, b: Self) -> Self {
                let lo = self.lo.wrapping_add(b.lo);
                let carry = (lo < self.lo) as $half;
                Self {
                    lo,
                    hi: self.hi.wrapping_add(b.hi).wrapping_add(carry),
                }
            }

            #[inline]
            pub fn wrapping_sub(self, b: Self) -> Self {
                let lo = self.lo.wrapping_sub(b.lo);
                let borrow = (lo > self.lo) as $half;
                Self {
                    lo,
                    hi: self.hi.wrapping_sub(b.hi).wrapping_sub(borrow),
                }
            }

            /// Low `BITS` bits of the product.
            pub fn wrapping_mul(self, b: Self) -> Self {
                let mut s = Self::mul_halves(self.lo, b.lo);
                s.hi = s
                    .hi
                    .wrapping_add(self.lo.wrapping_mul(b.hi))
                    .wrapping_add(self.hi.wrapping_mul(b.lo));
                s
            }

            #[inline]
            pub fn wrapping_neg(self) -> Self {
                (!self).wrapping_add(Self::ONE)
            }

            /// Logical shift left. `n` must be below `BITS`.
            pub fn shl(self, n: u32) -> Self {
                debug_assert!(n < Self::BITS);
                if n == 0 {
                    self
                } else if n >= Self::HALF_BITS {
                    Self {
                        hi: self.lo << (n - Self::HALF_BITS),
                        lo: 0,
                    }
                } else {
                    Self {
                        hi: (self.hi << n) | (self.lo >> (Self::HALF_BITS - n)),
                        lo: self.lo << n,
                    }
                }
            }

            /// Logical shift right. `n` must be below `BITS`.
            pub fn shr(self, n: u32) -> Self {
                debug_assert!(n < Self::BITS);
                if n == 0 {
                    self
                } else if n >= Self::HALF_BITS {
                    Self {
                        hi: 0,
                        lo: self.hi >> (n - Self::HALF_BITS),
                    }
                } else {
                    Self {
                        hi: self.hi >> n,
                        lo: (self.lo >> n) | (self.hi << (Self::HALF_BITS - n)),
                    }
                }
            }

            pub fn leading_zeros(self) -> u32 {
                if self.hi != 0 {
                    self.hi.leading_zeros()
                } else {
                    Self::HALF_BITS + self.lo.leading_zeros()
                }
            }

            /// Divide a wide numerator by a normalized half divisor.
            ///
            /// Requires the top bit of `den` to be set and `num.hi < den`,
            /// so the quotient fits a half. Two quotient digits are
            /// estimated from the divisor's upper quarter and each is
            /// corrected downward at most twice.
            fn div_rem_normalized(num: Self, den: $half) -> ($half, $half) {
                debug_assert!(den.leading_zeros() == 0);
                debug_assert!(num.hi < den);

                let q = Self::QUARTER_BITS;
                let base: $half = 1 << q;
                let d1 = den >> q;
                let d0 = den & Self::QUARTER_MASK;
                let n1 = num.lo >> q;
                let n0 = num.lo & Self::QUARTER_MASK;

                let mut q1 = num.hi / d1;
                let mut rhat = num.hi - q1 * d1;
                while q1 >= base || q1 * d0 > ((rhat << q) | n1) {
                    q1 -= 1;
                    rhat += d1;
                    if rhat >= base {
                        break;
                    }
                }

                // partial remainder, exact modulo one half
                let r21 = ((num.hi << q) | n1).wrapping_sub(q1.wrapping_mul(den));

                let mut q0 = r21 / d1;
                let mut rhat = r21 - q0 * d1;
                while q0 >= base || q0 * d0 > ((rhat << q) | n0) {
                    q0 -= 1;
                    rhat += d1;
                    if rhat >= base {
                        break;
                    }
                }

                let rem = ((r21 << q) | n0).wrapping_sub(q0.wrapping_mul(den));
                ((q1 << q) | q0, rem)
            }

            /// Quotient and remainder of an unsigned division.
            ///
            /// # Panics
            ///
            /// Panics if `den` is zero.
            pub fn div_rem(self, den: Self) -> (Self, Self) {
                let num = self;

                if den.hi == 0 {
                    if den.lo == 0 {
                        panic!("attempt to divide by zero");
                    }
                    // qq = NN / 0d: the high digit is a plain half division,
                    // the low digit a normalized wide-by-half division.
                    let q_hi = num.hi / den.lo;
                    let r_hi = num.hi % den.lo;
                    let norm = den.lo.leading_zeros();
                    let d = den.lo << norm;
                    let n = Self::from_halves(r_hi, num.lo).shl(norm);
                    let (q_lo, r) = Self::div_rem_normalized(n, d);
                    return (Self::from_halves(q_hi, q_lo), Self::from_half(r >> norm));
                }

                if den > num {
                    return (Self::ZERO, num);
                }

                let norm = den.hi.leading_zeros();
                if norm == 0 {
                    // den has its top bit set so the quotient is exactly one
                    return (Self::ONE, num.wrapping_sub(den));
                }

                // Normalize both operands; the numerator spills into a
                // third half `n2`.
                let d = den.shl(norm);
                let n2 = num.hi >> (Self::HALF_BITS - norm);
                let n = num.shl(norm);

                let (mut qhat, mut rhat) =
                    Self::div_rem_normalized(Self::from_halves(n2, n.hi), d.hi);
                loop {
                    if Self::mul_halves(qhat, d.lo) <= Self::from_halves(rhat, n.lo) {
                        break;
                    }
                    qhat -= 1;
                    let (r, carry) = rhat.overflowing_add(d.hi);
                    rhat = r;
                    if carry {
                        break;
                    }
                }

                let rem = n.wrapping_sub(Self::from_half(qhat).wrapping_mul(d));
                (Self::from_half(qhat), rem.shr(norm))
            }
        }

        impl Ord for $uname {
            fn cmp(&self, other: &Self) -> Ordering {
                (self.hi, self.lo).cmp(&(other.hi, other.lo))
            }
        }

        impl PartialOrd for $uname {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Add for $uname {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }
        }

        impl Sub for $uname {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }
        }

        impl Mul for $uname {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }
        }

        impl Not for $uname {
            type Output = Self;
            #[inline]
            fn not(self) -> Self {
                Self {
                    lo: !self.lo,
                    hi: !self.hi,
                }
            }
        }

        impl Shl<u32> for $uname {
            type Output = Self;
            #[inline]
            fn shl(self, n: u32) -> Self {
                $uname::shl(self, n)
            }
        }

        impl Shr<u32> for $uname {
            type Output = Self;
            #[inline]
            fn shr(self, n: u32) -> Self {
                $uname::shr(self, n)
            }
        }

        impl From<$half> for $uname {
            #[inline]
            fn from(v: $half) -> Self {
                Self::from_half(v)
            }
        }

        impl From<$unative> for $uname {
            #[inline]
            fn from(v: $unative) -> Self {
                Self {
                    lo: v as $half,
                    hi: (v >> <$half>::BITS) as $half,
                }
            }
        }

        impl From<$uname> for $unative {
            #[inline]
            fn from(v: $uname) -> Self {
                (<$unative>::from(v.hi) << <$half>::BITS) | <$unative>::from(v.lo)
            }
        }

        $(#[$smeta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $sname($uname);

        impl $sname {
            pub const BITS: u32 = $uname::BITS;
            pub const ZERO: Self = Self($uname::ZERO);
            pub const ONE: Self = Self($uname::ONE);

            #[inline]
            pub const fn from_halves(hi: $half, lo: $half) -> Self {
                Self($uname::from_halves(hi, lo))
            }

            /// Two's complement bit pattern.
            #[inline]
            pub const fn to_bits(self) -> $uname {
                self.0
            }

            #[inline]
            pub const fn from_bits(bits: $uname) -> Self {
                Self(bits)
            }

            #[inline]
            pub fn hi(self) -> $half {
                self.0.hi
            }

            #[inline]
            pub fn lo(self) -> $half {
                self.0.lo
            }

            #[inline]
            pub fn is_negative(self) -> bool {
                (self.0.hi as $shalf) < 0
            }

            #[inline]
            pub fn is_zero(self) -> bool {
                self.0.is_zero()
            }

            /// Full-width signed product of two halves.
            pub fn mul_halves(a: $shalf, b: $shalf) -> Self {
                let p = $uname::mul_halves(a.unsigned_abs(), b.unsigned_abs());
                if (a < 0) != (b < 0) {
                    Self(p.wrapping_neg())
                } else {
                    Self(p)
                }
            }

            #[inline]
            pub fn wrapping_add(self, b: Self) -> Self {
                Self(self.0.wrapping_add(b.0))
            }

            #[inline]
            pub fn wrapping_sub(self, b: Self) -> Self {
                Self(self.0.wrapping_sub(b.0))
            }

            #[inline]
            pub fn wrapping_mul(self, b: Self) -> Self {
                Self(self.0.wrapping_mul(b.0))
            }

            #[inline]
            pub fn wrapping_neg(self) -> Self {
                Self(self.0.wrapping_neg())
            }

            /// Magnitude as an unsigned value.
            #[inline]
            pub fn unsigned_abs(self) -> $uname {
                if self.is_negative() {
                    self.0.wrapping_neg()
                } else {
                    self.0
                }
            }

            #[inline]
            pub fn shl(self, n: u32) -> Self {
                Self(self.0.shl(n))
            }

            /// Arithmetic shift right. `n` must be below `BITS`.
            pub fn shr(self, n: u32) -> Self {
                debug_assert!(n < Self::BITS);
                let half_bits = <$half>::BITS;
                let hi = self.0.hi as $shalf;
                if n == 0 {
                    self
                } else if n >= half_bits {
                    Self::from_halves((hi >> (half_bits - 1)) as $half, (hi >> (n - half_bits)) as $half)
                } else {
                    Self::from_halves(
                        (hi >> n) as $half,
                        (self.0.lo >> n) | (self.0.hi << (half_bits - n)),
                    )
                }
            }

            /// Quotient truncated toward zero; the remainder carries the
            /// numerator's sign.
            ///
            /// # Panics
            ///
            /// Panics if `den` is zero.
            pub fn div_rem(self, den: Self) -> (Self, Self) {
                let (q, r) = self.unsigned_abs().div_rem(den.unsigned_abs());
                let quo = if self.is_negative() != den.is_negative() {
                    q.wrapping_neg()
                } else {
                    q
                };
                let rem = if self.is_negative() { r.wrapping_neg() } else { r };
                (Self(quo), Self(rem))
            }
        }

        impl Ord for $sname {
            fn cmp(&self, other: &Self) -> Ordering {
                match (self.is_negative(), other.is_negative()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => self.0.cmp(&other.0),
                }
            }
        }

        impl PartialOrd for $sname {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Add for $sname {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }
        }

        impl Sub for $sname {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }
        }

        impl Mul for $sname {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }
        }

        impl Neg for $sname {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                self.wrapping_neg()
            }
        }

        impl Not for $sname {
            type Output = Self;
            #[inline]
            fn not(self) -> Self {
                Self(!self.0)
            }
        }

        impl Shl<u32> for $sname {
            type Output = Self;
            #[inline]
            fn shl(self, n: u32) -> Self {
                $sname::shl(self, n)
            }
        }

        impl Shr<u32> for $sname {
            type Output = Self;
            #[inline]
            fn shr(self, n: u32) -> Self {
                $sname::shr(self, n)
            }
        }

        impl From<$shalf> for $sname {
            #[inline]
            fn from(v: $shalf) -> Self {
                let hi = if v < 0 { <$half>::MAX } else { 0 };
                Self::from_halves(hi, v as $half)
            }
        }

        impl From<$snative> for $sname {
            #[inline]
            fn from(v: $snative) -> Self {
                Self($uname::from(v as $unative))
            }
        }

        impl From<$sname> for $snative {
            #[inline]
            fn from(v: $sname) -> Self {
                <$unative>::from(v.0) as $snative
            }
        }
    };
}

wide_int! {
    /// Unsigned 64-bit integer made of two `u32` halves.
    Uint64,
    /// Signed 64-bit integer in two's complement over [`Uint64`].
    Int64,
    half = u32,
    signed_half = i32,
    native = u64,
    signed_native = i64,
}

wide_int! {
    /// Unsigned 128-bit integer made of two `u64` halves.
    Uint128,
    /// Signed 128-bit integer in two's complement over [`Uint128`].
    Int128,
    half = u64,
    signed_half = i64,
    native = u128,
    signed_native = i128,
}

// ============================================================================
// 48.16 intermediate
// ============================================================================

/// Wide intermediate for products of two 16.16 values.
#[cfg(not(feature = "portable-wideint"))]
pub type Fixed48_16 = i64;

/// Wide intermediate for products of two 16.16 values.
#[cfg(feature = "portable-wideint")]
pub type Fixed48_16 = Int64;

/// Exact signed 32x32 -> 64 product.
#[inline]
pub fn mul_32x32(a: i32, b: i32) -> Fixed48_16 {
    #[cfg(not(feature = "portable-wideint"))]
    {
        i64::from(a) * i64::from(b)
    }
    #[cfg(feature = "portable-wideint")]
    {
        Int64::mul_halves(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn u64_div_rem(a: u64, b: u64) -> (u64, u64) {
        let (q, r) = Uint64::from(a).div_rem(Uint64::from(b));
        (q.into(), r.into())
    }

    fn u128_div_rem(a: u128, b: u128) -> (u128, u128) {
        let (q, r) = Uint128::from(a).div_rem(Uint128::from(b));
        (q.into(), r.into())
    }

    #[test]
    fn test_mul_halves_extremes() {
        let p = Uint64::mul_halves(u32::MAX, u32::MAX);
        assert_eq!(u64::from(p), (u32::MAX as u64) * (u32::MAX as u64));
        let p = Uint128::mul_halves(u64::MAX, u64::MAX);
        assert_eq!(u128::from(p), (u64::MAX as u128) * (u64::MAX as u128));
        assert_eq!(u64::from(Uint64::mul_halves(0, 12345)), 0);
    }

    #[test]
    fn test_signed_mul_halves() {
        for &(a, b) in &[
            (-1i32, 1i32),
            (i32::MIN, i32::MIN),
            (i32::MIN, i32::MAX),
            (-65536, 65536),
            (7, -3),
        ] {
            assert_eq!(i64::from(Int64::mul_halves(a, b)), a as i64 * b as i64);
        }
    }

    #[test]
    fn test_add_sub_carry() {
        let a = Uint64::from_halves(0, u32::MAX);
        let b = a + Uint64::ONE;
        assert_eq!(b, Uint64::from_halves(1, 0));
        assert_eq!(b - Uint64::ONE, a);
        assert_eq!(Uint64::ZERO - Uint64::ONE, Uint64::MAX);
    }

    #[test]
    fn test_shifts() {
        let v = Uint64::from(0x8000_0001_0000_0003u64);
        assert_eq!(u64::from(v << 4), 0x8000_0001_0000_0003u64 << 4);
        assert_eq!(u64::from(v >> 36), 0x8000_0001_0000_0003u64 >> 36);
        assert_eq!(u64::from(v << 32), 0x0000_0003_0000_0000);

        let s = Int64::from(-0x1234_5678_9abci64);
        assert_eq!(i64::from(s >> 5), -0x1234_5678_9abci64 >> 5);
        assert_eq!(i64::from(s >> 40), -0x1234_5678_9abci64 >> 40);
        assert_eq!(i64::from(s >> 63), -1);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(Uint64::ZERO.leading_zeros(), 64);
        assert_eq!(Uint64::ONE.leading_zeros(), 63);
        assert_eq!(Uint64::from(1u64 << 40).leading_zeros(), 23);
        assert_eq!(Uint128::from(1u128 << 100).leading_zeros(), 27);
    }

    #[test]
    fn test_signed_compare() {
        assert!(Int64::from(-1i32) < Int64::from(0i32));
        assert!(Int64::from(i64::MIN) < Int64::from(-1i64));
        assert!(Int64::from(i64::MAX) > Int64::from(1i64));
        assert!(Int64::from(-5i32) < Int64::from(-4i32));
    }

    #[test]
    fn test_div_rem_known_values() {
        assert_eq!(u64_div_rem(100, 7), (14, 2));
        assert_eq!(u64_div_rem(u64::MAX, 1), (u64::MAX, 0));
        assert_eq!(u64_div_rem(u64::MAX, u64::MAX), (1, 0));
        assert_eq!(u64_div_rem(5, u64::MAX), (0, 5));
        assert_eq!(u64_div_rem(u64::MAX, 0x8000_0000_0000_0000), (1, 0x7fff_ffff_ffff_ffff));
        assert_eq!(
            u64_div_rem(0xffff_fffe_0000_0001, 0xffff_ffff),
            (0xffff_ffff, 0)
        );
        // divisor with a small high half exercises the digit corrections
        assert_eq!(
            u64_div_rem(0x7fff_8000_0000_0000, 0x0000_8000_0000_0001),
            (0x7fff_8000_0000_0000 / 0x0000_8000_0000_0001, 0x7fff_8000_0000_0000 % 0x0000_8000_0000_0001)
        );
        let a = 0x0000_7fff_ffff_ffff_ffff_0000_0000_0000u128;
        let b = 0x0000_0000_0000_8000_0000_0000_0000_0001u128;
        assert_eq!(u128_div_rem(a, b), (a / b, a % b));
    }

    #[test]
    fn test_signed_div_rem_truncates() {
        for &(a, b) in &[(7i64, 2i64), (-7, 2), (7, -2), (-7, -2), (i64::MIN + 1, 3)] {
            let (q, r) = Int64::from(a).div_rem(Int64::from(b));
            assert_eq!(i64::from(q), a / b);
            assert_eq!(i64::from(r), a % b);
        }
    }

    #[test]
    #[should_panic(expected = "divide by zero")]
    fn test_div_by_zero_panics() {
        let _ = Uint64::from(10u64).div_rem(Uint64::ZERO);
    }

    #[test]
    fn test_mul_32x32() {
        let p = mul_32x32(-0x7fff_0000, 0x7fff_0000);
        assert!(p < Fixed48_16::from(0i32));
        assert_eq!(
            p,
            Fixed48_16::from(0i32) - mul_32x32(0x7fff_0000, 0x7fff_0000)
        );
    }

    proptest! {
        #[test]
        fn prop_uint64_mul(a: u32, b: u32) {
            prop_assert_eq!(u64::from(Uint64::mul_halves(a, b)), a as u64 * b as u64);
        }

        #[test]
        fn prop_uint64_wrapping_mul(a: u64, b: u64) {
            let p = Uint64::from(a).wrapping_mul(Uint64::from(b));
            prop_assert_eq!(u64::from(p), a.wrapping_mul(b));
        }

        #[test]
        fn prop_uint64_div_rem(a: u64, b in 1u64..) {
            prop_assert_eq!(u64_div_rem(a, b), (a / b, a % b));
        }

        #[test]
        fn prop_uint64_div_rem_small_divisor(a: u64, b in 1u64..=u32::MAX as u64) {
            prop_assert_eq!(u64_div_rem(a, b), (a / b, a % b));
        }

        #[test]
        fn prop_uint64_div_then_mul(a: u64, b in 1u64..) {
            let (q, r) = Uint64::from(a).div_rem(Uint64::from(b));
            prop_assert_eq!(q * Uint64::from(b) + r, Uint64::from(a));
            prop_assert!(r < Uint64::from(b));
        }

        #[test]
        fn prop_int64_div_rem(a: i64, b in prop::num::i64::ANY.prop_filter("nonzero", |b| *b != 0)) {
            prop_assume!(!(a == i64::MIN && b == -1));
            let (q, r) = Int64::from(a).div_rem(Int64::from(b));
            prop_assert_eq!(i64::from(q), a / b);
            prop_assert_eq!(i64::from(r), a % b);
        }

        #[test]
        fn prop_int64_cmp(a: i64, b: i64) {
            prop_assert_eq!(Int64::from(a).cmp(&Int64::from(b)), a.cmp(&b));
        }

        #[test]
        fn prop_uint128_mul(a: u64, b: u64) {
            prop_assert_eq!(u128::from(Uint128::mul_halves(a, b)), a as u128 * b as u128);
        }

        #[test]
        fn prop_uint128_div_rem(a: u128, b in 1u128..) {
            prop_assert_eq!(u128_div_rem(a, b), (a / b, a % b));
        }

        #[test]
        fn prop_uint128_div_rem_small_divisor(a: u128, b in 1u128..=u64::MAX as u128) {
            prop_assert_eq!(u128_div_rem(a, b), (a / b, a % b));
        }

        #[test]
        fn prop_int128_mul_halves(a: i64, b: i64) {
            prop_assert_eq!(i128::from(Int128::mul_halves(a, b)), a as i128 * b as i128);
        }
    }
}
