//! Direction vectors between fixed-point points and their angular order.
//!
//! Two slopes are ordered by the sign of their cross product, computed in
//! [`Fixed48_16`] so the 32x32 products never overflow. The order is only
//! meaningful while the angle swept from `a` to `b` stays below pi; callers
//! are responsible for that precondition.

use core::cmp::Ordering;

use crate::basics::{Fixed, PointFixed};
use crate::wideint::{mul_32x32, Fixed48_16};

/// Displacement between two points, in 16.16 units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Slope {
    pub dx: Fixed,
    pub dy: Fixed,
}

impl Slope {
    /// Slope from `a` to `b`.
    ///
    /// The difference of two `Fixed` values needs 33 bits. When either
    /// delta falls outside `-Fixed::MAX..=Fixed::MAX`, both are halved
    /// toward zero, which keeps the direction to within one unit and keeps
    /// `new(b, a) == new(a, b).reversed()`.
    #[inline]
    pub fn new(a: PointFixed, b: PointFixed) -> Self {
        let dx = b.x as i64 - a.x as i64;
        let dy = b.y as i64 - a.y as i64;
        let limit = Fixed::MAX as i64;
        let div = if dx.abs() > limit || dy.abs() > limit { 2 } else { 1 };
        Self {
            dx: (dx / div) as Fixed,
            dy: (dy / div) as Fixed,
        }
    }

    #[inline]
    pub fn from_deltas(dx: Fixed, dy: Fixed) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }

    /// Angular order of `a` relative to `b`.
    ///
    /// When the cross product is zero, a zero slope sorts after any
    /// other slope so that an empty displacement never looks clockwise.
    pub fn compare(a: &Slope, b: &Slope) -> Ordering {
        let ady_bdx: Fixed48_16 = mul_32x32(a.dy, b.dx);
        let bdy_adx: Fixed48_16 = mul_32x32(b.dy, a.dx);

        match ady_bdx.cmp(&bdy_adx) {
            Ordering::Equal => {}
            ord => return ord,
        }

        if a.is_zero() {
            return Ordering::Greater;
        }
        if b.is_zero() {
            return Ordering::Less;
        }
        Ordering::Equal
    }

    /// Returns `true` if turning from `a` to `b` goes clockwise.
    #[inline]
    pub fn clockwise(a: &Slope, b: &Slope) -> bool {
        Self::compare(a, b) == Ordering::Less
    }

    /// Negation of [`Slope::clockwise`]; collinear slopes count as
    /// counter-clockwise.
    #[inline]
    pub fn counter_clockwise(a: &Slope, b: &Slope) -> bool {
        !Self::clockwise(a, b)
    }
}

impl core::ops::Neg for Slope {
    type Output = Self;
    fn neg(self) -> Self {
        self.reversed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::fixed_from_int;
    use proptest::prelude::*;

    fn slope(dx: i32, dy: i32) -> Slope {
        Slope::from_deltas(fixed_from_int(dx), fixed_from_int(dy))
    }

    #[test]
    fn test_new_from_points() {
        let s = Slope::new(PointFixed::new(10, 20), PointFixed::new(15, 5));
        assert_eq!(s, Slope::from_deltas(5, -15));
    }

    #[test]
    fn test_compare_cross_product_sign() {
        let east = slope(1, 0);
        let south = slope(0, 1);
        // y grows downward in device space, so east -> south turns clockwise
        // on screen while the cross product a.dy*b.dx - b.dy*a.dx is negative.
        assert_eq!(Slope::compare(&east, &south), Ordering::Less);
        assert_eq!(Slope::compare(&south, &east), Ordering::Greater);
        assert!(Slope::clockwise(&east, &south));
        assert!(Slope::counter_clockwise(&south, &east));
    }

    #[test]
    fn test_compare_parallel_is_equal() {
        let a = slope(2, 3);
        let b = slope(4, 6);
        assert_eq!(Slope::compare(&a, &b), Ordering::Equal);
        assert!(!Slope::clockwise(&a, &b));
        assert!(Slope::counter_clockwise(&a, &b));
    }

    #[test]
    fn test_compare_zero_slopes() {
        let zero = Slope::default();
        let east = slope(1, 0);
        assert_eq!(Slope::compare(&zero, &east), Ordering::Greater);
        assert_eq!(Slope::compare(&east, &zero), Ordering::Less);
        assert_eq!(Slope::compare(&zero, &zero), Ordering::Greater);
    }

    #[test]
    fn test_compare_extreme_magnitudes() {
        // products overflow 32 bits but not 48.16
        let a = Slope::from_deltas(i32::MAX, i32::MAX - 1);
        let b = Slope::from_deltas(i32::MAX - 1, i32::MAX);
        assert_eq!(Slope::compare(&a, &b), Ordering::Less);
        assert_eq!(Slope::compare(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_new_across_full_range_halves_deltas() {
        let left = PointFixed::new(fixed_from_int(-20000), 0);
        let right = PointFixed::new(fixed_from_int(20000), 0);
        let east = Slope::new(left, right);
        assert_eq!(east, Slope::from_deltas(fixed_from_int(20000), 0));
        assert_eq!(Slope::new(right, left), east.reversed());

        let lo = PointFixed::new(i32::MIN, i32::MIN);
        let hi = PointFixed::new(i32::MAX, 6);
        let s = Slope::new(lo, hi);
        assert!(s.dx > 0 && s.dy > 0);
        assert_eq!(s.dx, i32::MAX);
        assert_eq!(s.dy, (1 << 30) + 3);
        // the reverse never lands on i32::MIN, so it can be negated again
        assert_eq!(Slope::new(hi, lo), s.reversed());
        assert_eq!(Slope::new(PointFixed::new(0, 0), PointFixed::new(i32::MIN, 0)).dx, i32::MIN / 2);
    }

    #[test]
    fn test_reversed() {
        let s = slope(3, -4);
        assert_eq!(s.reversed(), slope(-3, 4));
        assert_eq!(-s, s.reversed());
    }

    proptest! {
        #[test]
        fn prop_trichotomy(ax in -1_000_000i32..1_000_000, ay in -1_000_000i32..1_000_000,
                           bx in -1_000_000i32..1_000_000, by in -1_000_000i32..1_000_000) {
            let a = Slope::from_deltas(ax, ay);
            let b = Slope::from_deltas(bx, by);
            let ab = Slope::compare(&a, &b);
            let ba = Slope::compare(&b, &a);
            prop_assume!(!a.is_zero() && !b.is_zero());
            let held = [
                Slope::clockwise(&a, &b),
                ab == Ordering::Equal,
                Slope::clockwise(&b, &a),
            ];
            prop_assert_eq!(held.iter().filter(|&&h| h).count(), 1);
            prop_assert_eq!(ab, ba.reverse());
        }

        #[test]
        fn prop_counter_clockwise_is_negation(ax: i32, ay: i32, bx: i32, by: i32) {
            let a = Slope::from_deltas(ax, ay);
            let b = Slope::from_deltas(bx, by);
            prop_assert_eq!(Slope::counter_clockwise(&a, &b), !Slope::clockwise(&a, &b));
        }

        #[test]
        fn prop_compare_matches_i128(ax: i32, ay: i32, bx: i32, by: i32) {
            let a = Slope::from_deltas(ax, ay);
            let b = Slope::from_deltas(bx, by);
            let cross = ay as i128 * bx as i128 - by as i128 * ax as i128;
            let ord = Slope::compare(&a, &b);
            if cross != 0 {
                prop_assert_eq!(ord, cross.cmp(&0));
            }
        }
    }
}
