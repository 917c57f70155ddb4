//! Adaptive flattening of a single cubic Bezier segment.
//!
//! The curve is bisected with de Casteljau's construction until the
//! control points of every piece lie within the tolerance of that piece's
//! chord. Subdivision stays in 16.16 fixed point (one halving shift per
//! midpoint); only the error estimate is computed in `f64`.

use crate::basics::{Fixed, PointFixed, FIXED_ONE};
use crate::error::{Error, Result};
use crate::slope::Slope;

// ============================================================================
// Constants
// ============================================================================

/// Depth past which a piece is emitted whatever its error.
pub const SPLINE_RECURSION_LIMIT: u32 = 32;

/// Smallest tolerance honored; finer than one fixed-point step cannot be
/// represented in the output anyway.
const MIN_TOLERANCE: f64 = 1.0 / FIXED_ONE as f64;

// ============================================================================
// Knots
// ============================================================================

/// The four control points of a cubic segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplineKnots {
    pub a: PointFixed,
    pub b: PointFixed,
    pub c: PointFixed,
    pub d: PointFixed,
}

impl SplineKnots {
    /// Split at t = 1/2, returning the left and right halves.
    fn split(&self) -> (SplineKnots, SplineKnots) {
        let ab = lerp_half(self.a, self.b);
        let bc = lerp_half(self.b, self.c);
        let cd = lerp_half(self.c, self.d);
        let abbc = lerp_half(ab, bc);
        let bccd = lerp_half(bc, cd);
        let mid = lerp_half(abbc, bccd);

        (
            SplineKnots {
                a: self.a,
                b: ab,
                c: abbc,
                d: mid,
            },
            SplineKnots {
                a: mid,
                b: bccd,
                c: cd,
                d: self.d,
            },
        )
    }

    /// Upper bound on the squared distance between the curve and the
    /// chord `a-d`: the larger squared distance from `b` or `c` to that
    /// segment.
    fn error_squared(&self) -> f64 {
        let a = self.a.to_f64();
        let b = self.b.to_f64();
        let c = self.c.to_f64();
        let mut bdx = b.x - a.x;
        let mut bdy = b.y - a.y;
        let mut cdx = c.x - a.x;
        let mut cdy = c.y - a.y;

        if self.a != self.d {
            let d = self.d.to_f64();
            let dx = d.x - a.x;
            let dy = d.y - a.y;
            let v = dx * dx + dy * dy;

            // project onto the chord, clamped to its endpoints
            let u = bdx * dx + bdy * dy;
            if u >= v {
                bdx -= dx;
                bdy -= dy;
            } else if u > 0.0 {
                bdx -= u / v * dx;
                bdy -= u / v * dy;
            }

            let u = cdx * dx + cdy * dy;
            if u >= v {
                cdx -= dx;
                cdy -= dy;
            } else if u > 0.0 {
                cdx -= u / v * dx;
                cdy -= u / v * dy;
            }
        }

        let berr = bdx * bdx + bdy * bdy;
        let cerr = cdx * cdx + cdy * cdy;
        berr.max(cerr)
    }
}

/// Midpoint of two fixed values without rounding bias.
#[inline]
fn lerp_half_fixed(a: Fixed, b: Fixed) -> Fixed {
    a + ((b as i64 - a as i64) >> 1) as Fixed
}

#[inline]
fn lerp_half(a: PointFixed, b: PointFixed) -> PointFixed {
    PointFixed::new(lerp_half_fixed(a.x, b.x), lerp_half_fixed(a.y, b.y))
}

// ============================================================================
// Spline
// ============================================================================

/// One cubic Bezier segment with its end tangents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spline {
    knots: SplineKnots,
    initial_slope: Slope,
    final_slope: Slope,
}

impl Spline {
    /// Build a spline from its control points.
    ///
    /// The initial tangent runs from `a` to the first of `b`, `c`, `d` that
    /// differs from it; the final tangent runs into `d` from the last of
    /// `c`, `b`, `a` that differs. Fails with [`Error::Degenerate`] when all
    /// four points coincide.
    pub fn new(a: PointFixed, b: PointFixed, c: PointFixed, d: PointFixed) -> Result<Self> {
        let initial_slope = if a != b {
            Slope::new(a, b)
        } else if a != c {
            Slope::new(a, c)
        } else if a != d {
            Slope::new(a, d)
        } else {
            return Err(Error::Degenerate);
        };

        let final_slope = if c != d {
            Slope::new(c, d)
        } else if b != d {
            Slope::new(b, d)
        } else {
            Slope::new(a, d)
        };

        Ok(Self {
            knots: SplineKnots { a, b, c, d },
            initial_slope,
            final_slope,
        })
    }

    pub fn knots(&self) -> &SplineKnots {
        &self.knots
    }

    pub fn initial_slope(&self) -> Slope {
        self.initial_slope
    }

    pub fn final_slope(&self) -> Slope {
        self.final_slope
    }

    /// Flatten into a polyline from `a` to `d` whose pieces stay within
    /// `tolerance` device units of the curve.
    pub fn decompose(&self, tolerance: f64) -> Result<Vec<PointFixed>> {
        let mut points = Vec::new();
        self.decompose_into(tolerance, &mut points)?;
        Ok(points)
    }

    /// Like [`Spline::decompose`] but appends to `out`. A point equal to
    /// the last point already in `out` is not repeated.
    pub fn decompose_into(&self, tolerance: f64, out: &mut Vec<PointFixed>) -> Result<()> {
        let start = out.len();
        let tolerance = tolerance.max(MIN_TOLERANCE);
        let mut flattener = Flattener {
            out,
            tolerance_squared: tolerance * tolerance,
            depth_limited: false,
        };
        flattener.decompose(&self.knots, 0)?;
        flattener.add_point(self.knots.d)?;

        if flattener.depth_limited {
            log::warn!(
                "spline flattening hit recursion limit {SPLINE_RECURSION_LIMIT}; output may exceed tolerance"
            );
        }
        log::trace!(
            "flattened spline into {} points at tolerance {tolerance}",
            flattener.out.len() - start
        );
        Ok(())
    }
}

/// Recursion state for one flattening pass.
struct Flattener<'a> {
    out: &'a mut Vec<PointFixed>,
    tolerance_squared: f64,
    depth_limited: bool,
}

impl Flattener<'_> {
    fn add_point(&mut self, p: PointFixed) -> Result<()> {
        if self.out.last() == Some(&p) {
            return Ok(());
        }
        self.out.try_reserve(1)?;
        self.out.push(p);
        Ok(())
    }

    fn decompose(&mut self, knots: &SplineKnots, level: u32) -> Result<()> {
        if knots.error_squared() < self.tolerance_squared {
            return self.add_point(knots.a);
        }
        if level >= SPLINE_RECURSION_LIMIT {
            self.depth_limited = true;
            return self.add_point(knots.a);
        }

        let (left, right) = knots.split();
        self.decompose(&left, level + 1)?;
        self.decompose(&right, level + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{fixed_from_int, fixed_to_double};

    fn pt(x: i32, y: i32) -> PointFixed {
        PointFixed::new(fixed_from_int(x), fixed_from_int(y))
    }

    fn arch() -> Spline {
        Spline::new(pt(0, 0), pt(0, 100), pt(100, 100), pt(100, 0)).unwrap()
    }

    fn bezier_at(k: &SplineKnots, t: f64) -> (f64, f64) {
        let mt = 1.0 - t;
        let w = [mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t];
        let ps = [k.a, k.b, k.c, k.d];
        let mut x = 0.0;
        let mut y = 0.0;
        for (wi, p) in w.iter().zip(ps.iter()) {
            x += wi * fixed_to_double(p.x);
            y += wi * fixed_to_double(p.y);
        }
        (x, y)
    }

    fn dist_to_segment(px: f64, py: f64, a: PointFixed, b: PointFixed) -> f64 {
        let (ax, ay) = (fixed_to_double(a.x), fixed_to_double(a.y));
        let (bx, by) = (fixed_to_double(b.x), fixed_to_double(b.y));
        let (dx, dy) = (bx - ax, by - ay);
        let len2 = dx * dx + dy * dy;
        let t = if len2 == 0.0 {
            0.0
        } else {
            (((px - ax) * dx + (py - ay) * dy) / len2).clamp(0.0, 1.0)
        };
        let (cx, cy) = (ax + t * dx, ay + t * dy);
        ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
    }

    /// Largest distance from a curve sample to the polyline.
    fn max_deviation(spline: &Spline, points: &[PointFixed]) -> f64 {
        let mut worst: f64 = 0.0;
        for i in 0..=400 {
            let (x, y) = bezier_at(spline.knots(), i as f64 / 400.0);
            let d = points
                .windows(2)
                .map(|w| dist_to_segment(x, y, w[0], w[1]))
                .fold(f64::INFINITY, f64::min);
            worst = worst.max(d);
        }
        worst
    }

    #[test]
    fn test_degenerate() {
        let p = pt(5, 5);
        assert_eq!(Spline::new(p, p, p, p).unwrap_err(), Error::Degenerate);
    }

    #[test]
    fn test_initial_slope_skips_coincident_points() {
        let s = Spline::new(pt(0, 0), pt(0, 0), pt(10, 5), pt(20, 0)).unwrap();
        assert_eq!(s.initial_slope(), Slope::new(pt(0, 0), pt(10, 5)));

        let s = Spline::new(pt(0, 0), pt(0, 0), pt(0, 0), pt(20, 0)).unwrap();
        assert_eq!(s.initial_slope(), Slope::new(pt(0, 0), pt(20, 0)));
    }

    #[test]
    fn test_final_slope_skips_coincident_points() {
        let s = Spline::new(pt(0, 0), pt(10, 10), pt(20, 0), pt(20, 0)).unwrap();
        assert_eq!(s.final_slope(), Slope::new(pt(10, 10), pt(20, 0)));

        let s = Spline::new(pt(0, 0), pt(20, 0), pt(20, 0), pt(20, 0)).unwrap();
        assert_eq!(s.final_slope(), Slope::new(pt(0, 0), pt(20, 0)));
    }

    #[test]
    fn test_arch_scenario() {
        let s = arch();
        let points = s.decompose(0.1).unwrap();

        assert_eq!(points.first(), Some(&pt(0, 0)));
        assert_eq!(points.last(), Some(&pt(100, 0)));
        assert!(points.len() >= 4, "only {} points", points.len());
        for w in points.windows(2) {
            assert!(w[1].x > w[0].x, "x not increasing: {:?}", w);
        }
    }

    #[test]
    fn test_no_consecutive_duplicates() {
        let points = arch().decompose(0.01).unwrap();
        for w in points.windows(2) {
            assert_ne!(w[0], w[1]);
        }
    }

    #[test]
    fn test_straight_curve_is_two_points() {
        let s = Spline::new(pt(0, 0), pt(10, 10), pt(20, 20), pt(30, 30)).unwrap();
        let points = s.decompose(0.1).unwrap();
        assert_eq!(points, vec![pt(0, 0), pt(30, 30)]);
    }

    #[test]
    fn test_deviation_within_tolerance() {
        let s = arch();
        for &tol in &[1.0, 0.25, 0.1, 0.01] {
            let points = s.decompose(tol).unwrap();
            let dev = max_deviation(&s, &points);
            assert!(dev <= tol + 0.001, "tolerance {tol}: deviation {dev}");
        }
    }

    #[test]
    fn test_finer_tolerance_never_coarser() {
        let s = Spline::new(pt(10, 80), pt(40, 10), pt(65, 10), pt(95, 80)).unwrap();
        let coarse = s.decompose(2.0).unwrap();
        let fine = s.decompose(0.05).unwrap();
        assert!(fine.len() >= coarse.len());
        assert!(max_deviation(&s, &fine) <= max_deviation(&s, &coarse) + 1e-3);
    }

    #[test]
    fn test_decompose_into_appends_without_duplicate_start() {
        let s = arch();
        let mut out = vec![pt(-10, 0), pt(0, 0)];
        s.decompose_into(0.5, &mut out).unwrap();
        assert_eq!(out[0], pt(-10, 0));
        assert_eq!(out[1], pt(0, 0));
        assert_ne!(out[2], pt(0, 0));
        assert_eq!(*out.last().unwrap(), pt(100, 0));
    }

    #[test]
    fn test_zero_tolerance_terminates() {
        let s = Spline::new(pt(0, 0), pt(0, 1), pt(1, 1), pt(1, 0)).unwrap();
        let points = s.decompose(0.0).unwrap();
        assert_eq!(points.first(), Some(&pt(0, 0)));
        assert_eq!(points.last(), Some(&pt(1, 0)));
    }

    #[test]
    fn test_chord_wider_than_half_range() {
        let s = Spline::new(pt(-20000, 0), pt(-10000, 100), pt(10000, 100), pt(20000, 0)).unwrap();
        assert_eq!(s.initial_slope(), Slope::from_deltas(fixed_from_int(10000), fixed_from_int(100)));
        assert_eq!(s.final_slope(), Slope::from_deltas(fixed_from_int(10000), fixed_from_int(-100)));

        let points = s.decompose(0.1).unwrap();
        assert_eq!(points.first(), Some(&pt(-20000, 0)));
        assert_eq!(points.last(), Some(&pt(20000, 0)));
        for w in points.windows(2) {
            assert!(w[1].x > w[0].x);
        }
        assert!(max_deviation(&s, &points) <= 0.1 + 0.001);
    }

    #[test]
    fn test_error_squared_across_full_range() {
        let k = SplineKnots {
            a: PointFixed::new(i32::MIN, 0),
            b: PointFixed::new(0, fixed_from_int(3)),
            c: PointFixed::new(0, fixed_from_int(-4)),
            d: PointFixed::new(i32::MAX, 0),
        };
        assert!((k.error_squared() - 16.0).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_half_extremes() {
        assert_eq!(lerp_half_fixed(i32::MIN, i32::MAX), -1);
        assert_eq!(lerp_half_fixed(3, 4), 3);
        assert_eq!(lerp_half_fixed(4, 3), 3);
    }
}
