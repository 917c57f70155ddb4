//! Bounding rectangle calculation.
//!
//! Computes a conservative axis-aligned box over every point stored in a
//! path. Curve control points are included as-is: they bound the curve
//! (a Bezier lies in the convex hull of its knots) without flattening it.

use crate::basics::{fixed_to_double, PointFixed, RectD, RectFixed};
use crate::path_storage::{PathElement, PathStorage};

/// Accumulates fixed-point points into a box.
#[derive(Debug, Clone, Copy, Default)]
struct BoundsAccumulator {
    rect: Option<RectFixed>,
}

impl BoundsAccumulator {
    fn add(&mut self, p: PointFixed) {
        match &mut self.rect {
            Some(r) => r.add_point(p.x, p.y),
            None => self.rect = Some(RectFixed::new(p.x, p.y, p.x, p.y)),
        }
    }
}

/// Compute the bounding rectangle of a path in device units.
///
/// Move-to, line-to and all three curve-to points contribute; close-path
/// contributes nothing. Returns `None` for a path without points.
pub fn path_bounds(path: &PathStorage) -> Option<RectD> {
    let mut acc = BoundsAccumulator::default();
    for element in path {
        match element {
            PathElement::MoveTo(p) | PathElement::LineTo(p) => acc.add(p),
            PathElement::CurveTo(b, c, d) => {
                acc.add(b);
                acc.add(c);
                acc.add(d);
            }
            PathElement::ClosePath => {}
        }
    }

    acc.rect.map(|r| {
        RectD::new(
            fixed_to_double(r.x1),
            fixed_to_double(r.y1),
            fixed_to_double(r.x2),
            fixed_to_double(r.y2),
        )
    })
}

/// Bounding rectangle of a set of fixed-point points.
pub fn points_bounds(points: &[PointFixed]) -> Option<RectFixed> {
    let mut acc = BoundsAccumulator::default();
    for &p in points {
        acc.add(p);
    }
    acc.rect
}
