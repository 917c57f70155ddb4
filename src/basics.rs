//! Foundation types: 16.16 fixed-point scalars, points, rectangles and
//! fill rules that every other module builds on.

use core::ops::{Add, Neg, Sub};

// ============================================================================
// 16.16 fixed point
// ============================================================================

/// Signed 16.16 fixed-point scalar.
///
/// The integer range is roughly +-32767.99998 with a resolution of 1/65536.
pub type Fixed = i32;

pub const FIXED_SHIFT: u32 = 16;
pub const FIXED_ONE: Fixed = 1 << FIXED_SHIFT;
pub const FIXED_HALF: Fixed = 1 << (FIXED_SHIFT - 1);
pub const FIXED_FRAC_MASK: Fixed = FIXED_ONE - 1;

/// Convert an integer to fixed point.
#[inline]
pub fn fixed_from_int(i: i32) -> Fixed {
    i << FIXED_SHIFT
}

/// Convert a double to fixed point by scaling and truncating toward zero.
///
/// Values outside the representable range saturate.
#[inline]
pub fn fixed_from_double(d: f64) -> Fixed {
    (d * FIXED_ONE as f64) as Fixed
}

/// Convert a 26.6 fixed-point value (as used by font rasterizers).
#[inline]
pub fn fixed_from_26_6(i: i32) -> Fixed {
    i << (FIXED_SHIFT - 6)
}

#[inline]
pub fn fixed_to_double(f: Fixed) -> f64 {
    f as f64 / FIXED_ONE as f64
}

/// Returns `true` if `f` has no fractional bits.
#[inline]
pub fn fixed_is_integer(f: Fixed) -> bool {
    (f & FIXED_FRAC_MASK) == 0
}

/// Integer part, rounding toward negative infinity.
#[inline]
pub fn fixed_integer_part(f: Fixed) -> i32 {
    f >> FIXED_SHIFT
}

/// Round half up to the nearest integer.
#[inline]
pub fn fixed_round_to_int(f: Fixed) -> i32 {
    ((f as i64 + FIXED_HALF as i64) >> FIXED_SHIFT) as i32
}

#[inline]
pub fn fixed_floor_to_int(f: Fixed) -> i32 {
    f >> FIXED_SHIFT
}

#[inline]
pub fn fixed_ceil_to_int(f: Fixed) -> i32 {
    (f >> FIXED_SHIFT) + !fixed_is_integer(f) as i32
}

// ============================================================================
// Fill rule
// ============================================================================

/// Winding rule used to decide which regions of a polygon are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Inside where the winding number is non-zero.
    #[default]
    NonZero,
    /// Inside where the winding number is odd.
    EvenOdd,
}

// ============================================================================
// Rect
// ============================================================================

/// A rectangle defined by two corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Grow the rectangle to contain (x, y).
    pub fn add_point(&mut self, x: T, y: T) {
        if x < self.x1 {
            self.x1 = x;
        }
        if y < self.y1 {
            self.y1 = y;
        }
        if x > self.x2 {
            self.x2 = x;
        }
        if y > self.y2 {
            self.y2 = y;
        }
    }
}

/// Compute the union (bounding box) of two rectangles.
pub fn unite_rectangles<T: Copy + PartialOrd>(r1: &Rect<T>, r2: &Rect<T>) -> Rect<T> {
    let mut r = *r1;
    if r.x2 < r2.x2 {
        r.x2 = r2.x2;
    }
    if r.y2 < r2.y2 {
        r.y2 = r2.y2;
    }
    if r.x1 > r2.x1 {
        r.x1 = r2.x1;
    }
    if r.y1 > r2.y1 {
        r.y1 = r2.y1;
    }
    r
}

/// Rectangle with fixed-point coordinates.
pub type RectFixed = Rect<Fixed>;
/// Rectangle with `f64` coordinates.
pub type RectD = Rect<f64>;

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Copy + Add<Output = T>> Add for PointBase<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Copy + Sub<Output = T>> Sub for PointBase<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Copy + Neg<Output = T>> Neg for PointBase<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Point in 16.16 device coordinates.
pub type PointFixed = PointBase<Fixed>;
pub type PointD = PointBase<f64>;

impl PointFixed {
    /// Build a fixed point from double coordinates.
    #[inline]
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self::new(fixed_from_double(x), fixed_from_double(y))
    }

    #[inline]
    pub fn to_f64(self) -> PointD {
        PointD::new(fixed_to_double(self.x), fixed_to_double(self.y))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fixed_from_int() {
        assert_eq!(fixed_from_int(1), 65536);
        assert_eq!(fixed_from_int(-3), -3 * 65536);
        assert_eq!(fixed_from_int(0), 0);
    }

    #[test]
    fn test_fixed_from_double_truncates() {
        assert_eq!(fixed_from_double(1.5), 0x18000);
        // 1/65536 * 0.9 truncates to zero instead of rounding up
        assert_eq!(fixed_from_double(0.9 / 65536.0), 0);
        assert_eq!(fixed_from_double(-0.9 / 65536.0), 0);
        assert_eq!(fixed_from_double(-2.25), -0x24000);
    }


    #[test]
    fn test_fixed_from_26_6() {
        assert_eq!(fixed_from_26_6(64), FIXED_ONE);
        assert_eq!(fixed_from_26_6(32), FIXED_HALF);
        assert_eq!(fixed_from_26_6(-64), -FIXED_ONE);
    }

    #[test]
    fn test_fixed_integer_queries() {
        assert!(fixed_is_integer(fixed_from_int(7)));
        assert!(!fixed_is_integer(fixed_from_double(7.5)));
        assert_eq!(fixed_integer_part(fixed_from_double(7.75)), 7);
        assert_eq!(fixed_integer_part(fixed_from_double(-0.5)), -1);
    }

    #[test]
    fn test_fixed_rounding() {
        assert_eq!(fixed_round_to_int(fixed_from_double(2.5)), 3);
        assert_eq!(fixed_round_to_int(fixed_from_double(2.49)), 2);
        assert_eq!(fixed_round_to_int(fixed_from_double(-2.5)), -2);
        assert_eq!(fixed_floor_to_int(fixed_from_double(-2.25)), -3);
        assert_eq!(fixed_ceil_to_int(fixed_from_double(2.25)), 3);
        assert_eq!(fixed_ceil_to_int(fixed_from_int(2)), 2);
        assert_eq!(fixed_round_to_int(i32::MAX), 32768);
    }

    #[test]
    fn test_rect_add_point() {
        let mut r = RectFixed::new(0, 0, 0, 0);
        r.add_point(-5, 10);
        assert_eq!(r, RectFixed::new(-5, 0, 0, 10));
        r.add_point(-1, 5);
        assert_eq!(r, RectFixed::new(-5, 0, 0, 10));
    }

    #[test]
    fn test_unite_rectangles() {
        let r1 = RectD::new(0.0, 0.0, 10.0, 10.0);
        let r2 = RectD::new(5.0, -5.0, 15.0, 8.0);
        let u = unite_rectangles(&r1, &r2);
        assert_eq!(u, RectD::new(0.0, -5.0, 15.0, 10.0));
    }

    #[test]
    fn test_point_ops() {
        let a = PointFixed::new(10, 20);
        let b = PointFixed::new(3, -4);
        assert_eq!(a + b, PointFixed::new(13, 16));
        assert_eq!(a - b, PointFixed::new(7, 24));
        assert_eq!(-b, PointFixed::new(-3, 4));
    }

    #[test]
    fn test_point_f64_conversion() {
        let p = PointFixed::from_f64(1.5, -2.0);
        assert_eq!(p, PointFixed::new(0x18000, -0x20000));
        let d = p.to_f64();
        assert_eq!(d, PointD::new(1.5, -2.0));
    }

    proptest! {
        #[test]
        fn prop_fixed_round_trip_within_resolution(d in -32767.99f64..32767.99) {
            let back = fixed_to_double(fixed_from_double(d));
            prop_assert!((back - d).abs() < 1.0 / 65536.0, "{} -> {}", d, back);
        }
    }
}
