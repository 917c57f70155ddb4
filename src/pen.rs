//! Polygonal pen approximating a circular brush.
//!
//! The pen is a convex polygon centred on the origin. Each vertex knows
//! the slopes of the two edges meeting at it, so for any stroke direction
//! exactly one vertex is "active": the one whose edge interval contains
//! that direction. Sweeping the pen along a flattened curve while keeping
//! the active vertex in sync with the local tangent traces one side of
//! the stroke outline.

use std::f64::consts::PI;

use crate::basics::{fixed_from_double, PointFixed, FIXED_ONE};
use crate::error::Result;
use crate::path_storage::Direction;
use crate::polygon::Polygon;
use crate::slope::Slope;
use crate::spline::Spline;
use crate::trans_affine::TransAffine;

/// Smallest tolerance used to size a pen.
const MIN_TOLERANCE: f64 = 1.0 / FIXED_ONE as f64;

/// Upper bound on the vertex count.
///
/// A pen that spans the whole 16.16 range at the smallest tolerance needs
/// about 103000 vertices.
pub const MAX_PEN_VERTICES: usize = 1 << 18;

// ============================================================================
// PenVertex
// ============================================================================

/// One pen vertex, as an offset from the pen centre in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenVertex {
    pub point: PointFixed,
    /// Device-space angle of `point` in `[0, 2*pi)`; the sort key.
    pub theta: f64,
    /// Slope of the edge arriving from the previous vertex.
    pub slope_cw: Slope,
    /// Slope of the edge leaving toward the next vertex.
    pub slope_ccw: Slope,
}

impl PenVertex {
    fn new(point: PointFixed) -> Self {
        let mut theta = (point.y as f64).atan2(point.x as f64);
        if theta < 0.0 {
            theta += 2.0 * PI;
        }
        Self {
            point,
            theta,
            slope_cw: Slope::default(),
            slope_ccw: Slope::default(),
        }
    }
}

/// Number of vertices a pen of `radius` needs so that its edges stay
/// within `tolerance` of the true circle once mapped through `matrix`.
///
/// The determinant is used as a worst-case stretch, as if all of the
/// transform's area expansion happened along one axis. The result is even
/// and at least 4, and never above [`MAX_PEN_VERTICES`].
pub fn vertices_needed(radius: f64, tolerance: f64, matrix: &TransAffine) -> usize {
    let expansion = matrix.expansion_factor();
    let tolerance = tolerance.max(MIN_TOLERANCE);

    let n = if tolerance >= expansion * radius {
        4
    } else {
        // acos rounds to 0 once the ratio drops below f64 epsilon, and
        // a NaN ratio compares false; both land on the cap
        let theta = (1.0 - tolerance / (expansion * radius)).acos();
        let steps = (PI / theta).ceil();
        if steps < MAX_PEN_VERTICES as f64 {
            steps as usize
        } else {
            MAX_PEN_VERTICES
        }
    };

    let n = n + n % 2;
    n.max(4)
}

// ============================================================================
// Pen
// ============================================================================

/// A convex polygonal pen.
///
/// An empty pen (no vertices) stands for a zero-width stroke and draws
/// nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pen {
    radius: f64,
    tolerance: f64,
    vertices: Vec<PenVertex>,
}

impl Pen {
    /// A pen without vertices.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a pen of user-space `radius` under `matrix`.
    ///
    /// Vertices are spaced evenly in user space and mapped through the
    /// linear part of the matrix. For a reflecting matrix the angles are
    /// walked backward so the device-space vertex order stays
    /// counter-clockwise.
    pub fn new(radius: f64, tolerance: f64, matrix: &TransAffine) -> Result<Self> {
        if radius <= 0.0 {
            return Ok(Self::empty());
        }

        let n = vertices_needed(radius, tolerance, matrix);
        let reflect = matrix.determinant() < 0.0;

        let mut vertices = Vec::new();
        vertices.try_reserve_exact(n)?;
        for i in 0..n {
            let mut theta = 2.0 * PI * i as f64 / n as f64;
            if reflect {
                theta = -theta;
            }
            let (sin, cos) = theta.sin_cos();
            let mut dx = radius * cos;
            let mut dy = radius * sin;
            matrix.transform_distance(&mut dx, &mut dy);
            vertices.push(PenVertex::new(PointFixed::new(
                fixed_from_double(dx),
                fixed_from_double(dy),
            )));
        }

        let mut pen = Self {
            radius,
            tolerance,
            vertices,
        };
        pen.compute_slopes();
        log::debug!("pen radius {radius} tolerance {tolerance}: {n} vertices");
        Ok(pen)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[PenVertex] {
        &self.vertices
    }

    fn compute_slopes(&mut self) {
        let n = self.vertices.len();
        for i in 0..n {
            let prev = self.vertices[(i + n - 1) % n].point;
            let next = self.vertices[(i + 1) % n].point;
            let v = &mut self.vertices[i];
            v.slope_cw = Slope::new(prev, v.point);
            v.slope_ccw = Slope::new(v.point, next);
        }
    }

    /// Insert extra vertices, keeping the pen sorted by angle.
    ///
    /// Used to place exact face points on a per-segment copy of the pen.
    /// Duplicate vertices are removed and all slopes recomputed. A point
    /// that rounding has left on or inside its neighbours' chord is
    /// dropped again, so every vertex keeps a strict clockwise turn and
    /// the active-vertex intervals still tile the circle.
    pub fn add_points(&mut self, points: &[PointFixed]) -> Result<()> {
        self.vertices.try_reserve(points.len())?;
        self.vertices
            .extend(points.iter().map(|&p| PenVertex::new(p)));
        self.vertices.sort_by(|a, b| a.theta.total_cmp(&b.theta));
        self.vertices.dedup_by(|b, a| a.point == b.point);
        self.compute_slopes();
        self.remove_reflex_vertices();
        Ok(())
    }

    fn remove_reflex_vertices(&mut self) {
        while self.vertices.len() > 3 {
            let reflex = self
                .vertices
                .iter()
                .position(|v| !Slope::clockwise(&v.slope_cw, &v.slope_ccw));
            match reflex {
                Some(i) => {
                    log::trace!("dropping reflex pen vertex {:?}", self.vertices[i].point);
                    self.vertices.remove(i);
                    self.compute_slopes();
                }
                None => break,
            }
        }
    }

    // ---------------------------------------------------------------
    // Active vertex search
    // ---------------------------------------------------------------

    /// Vertex active on the clockwise side of a stroke heading along
    /// `slope`: the first whose edge interval contains it.
    ///
    /// The strict/non-strict split between [`Slope::clockwise`] and
    /// [`Slope::counter_clockwise`] matters here: `slope_ccw` of one vertex
    /// equals `slope_cw` of the next, and a slope lying exactly on that
    /// shared edge must select the later vertex.
    pub fn find_active_cw_vertex_index(&self, slope: &Slope) -> Option<usize> {
        self.vertices.iter().position(|v| {
            Slope::clockwise(slope, &v.slope_ccw) && Slope::counter_clockwise(slope, &v.slope_cw)
        })
    }

    /// Vertex active on the counter-clockwise side of a stroke heading
    /// along `slope`, searched from the last vertex down.
    pub fn find_active_ccw_vertex_index(&self, slope: &Slope) -> Option<usize> {
        let reversed = slope.reversed();
        self.vertices.iter().rposition(|v| {
            Slope::counter_clockwise(&v.slope_ccw, &reversed)
                && Slope::clockwise(&v.slope_cw, &reversed)
        })
    }

    // ---------------------------------------------------------------
    // Stroking
    // ---------------------------------------------------------------

    /// Trace one side of the outline of `points` into `polygon`.
    ///
    /// `initial` and `final_` are the tangents at the first and last
    /// point of the forward walk; in reverse they are swapped and negated.
    pub fn stroke_spline_half(
        &self,
        points: &[PointFixed],
        initial: Slope,
        final_: Slope,
        direction: Direction,
        polygon: &mut Polygon,
    ) -> Result<()> {
        let n = self.vertices.len();
        if n == 0 || points.is_empty() {
            return Ok(());
        }

        let (start, stop, step, initial_slope, final_slope): (isize, isize, isize, Slope, Slope) =
            match direction {
                Direction::Forward => (0, points.len() as isize, 1, initial, final_),
                Direction::Reverse => (
                    points.len() as isize - 1,
                    -1,
                    -1,
                    final_.reversed(),
                    initial.reversed(),
                ),
            };

        let mut active = self.find_active_cw_vertex_index(&initial_slope).unwrap_or(0);

        let mut i = start;
        while i != stop {
            let pt = points[i as usize];
            polygon.add_point(offset_point(pt, self.vertices[active].point))?;

            let slope = if i + step == stop {
                final_slope
            } else {
                Slope::new(pt, points[(i + step) as usize])
            };
            // a zero slope is counter-clockwise of every edge and would
            // spin the pen forever
            if slope.is_zero() {
                i += step;
                continue;
            }

            let v = &self.vertices[active];
            if Slope::counter_clockwise(&slope, &v.slope_ccw) {
                active = (active + 1) % n;
            } else if Slope::clockwise(&slope, &v.slope_cw) {
                active = (active + n - 1) % n;
            } else {
                i += step;
            }
        }
        Ok(())
    }

    /// Outline of the polyline `points` as one closed contour: the
    /// forward side, then the reverse side.
    pub fn stroke_points(
        &self,
        points: &[PointFixed],
        initial: Slope,
        final_: Slope,
        polygon: &mut Polygon,
    ) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        polygon.close()?;
        self.stroke_spline_half(points, initial, final_, Direction::Forward, polygon)?;
        self.stroke_spline_half(points, initial, final_, Direction::Reverse, polygon)?;
        polygon.close()
    }

    /// Flatten `spline` and append its stroked outline to `polygon`.
    pub fn stroke_spline(&self, spline: &Spline, tolerance: f64, polygon: &mut Polygon) -> Result<()> {
        let points = spline.decompose(tolerance)?;
        self.stroke_points(
            &points,
            spline.initial_slope(),
            spline.final_slope(),
            polygon,
        )
    }
}

#[inline]
fn offset_point(p: PointFixed, offset: PointFixed) -> PointFixed {
    PointFixed::new(p.x.saturating_add(offset.x), p.y.saturating_add(offset.y))
}
