//! Stroke outline construction.
//!
//! A path is stroked segment by segment: every line or curve is swept by
//! the pen along both of its sides and the result is emitted as one
//! closed contour. The union of those contours under the non-zero rule
//! is the stroked area with butt ends.
//!
//! Before each segment the pen is copied and the exact face points of the
//! segment's ends are inserted into it, so the outline starts and ends on
//! the true perpendicular rather than on the nearest pen vertex.

use crate::basics::{fixed_from_double, fixed_to_double, FillRule, PointFixed};
use crate::config::{LineCap, StrokeStyle};
use crate::error::{Error, Result};
use crate::path_storage::{Direction, PathStorage, PathVisitor};
use crate::pen::Pen;
use crate::polygon::Polygon;
use crate::slope::Slope;
use crate::spline::Spline;
use crate::trans_affine::TransAffine;

/// Stroke `path` (device coordinates) with `style` (user-space widths)
/// under `matrix`.
pub fn stroke_path(
    path: &PathStorage,
    style: &StrokeStyle,
    matrix: &TransAffine,
    tolerance: f64,
) -> Result<Polygon> {
    let mut stroker = Stroker::new(style, matrix, tolerance)?;
    stroker.stroke(path)?;
    Ok(stroker.into_polygon())
}

// ============================================================================
// Stroker
// ============================================================================

/// Path visitor that accumulates stroke outlines into a polygon.
pub struct Stroker {
    pen: Pen,
    matrix: TransAffine,
    matrix_inverse: TransAffine,
    det_positive: bool,
    half_width: f64,
    tolerance: f64,
    polygon: Polygon,

    current_point: PointFixed,
    subpath_start: PointFixed,
    num_segments: usize,
}

impl Stroker {
    /// Prepare a stroker. The pen is built once here and copied per
    /// segment.
    ///
    /// Fails with [`Error::InvalidMatrix`] if the stroke has width and
    /// `matrix` cannot be inverted.
    pub fn new(style: &StrokeStyle, matrix: &TransAffine, tolerance: f64) -> Result<Self> {
        let half_width = style.half_width();
        let pen = Pen::new(half_width, tolerance, matrix)?;
        let matrix_inverse = if pen.is_empty() {
            TransAffine::new()
        } else {
            matrix.inverted()?
        };

        if style.is_dashed() || style.line_cap() != LineCap::Butt {
            log::trace!(
                "stroker draws butt-ended undashed segments; cap {:?} and {} dashes left to the caller",
                style.line_cap(),
                style.dash().len()
            );
        }

        Ok(Self {
            pen,
            matrix: *matrix,
            matrix_inverse,
            det_positive: matrix.determinant() >= 0.0,
            half_width,
            tolerance,
            polygon: Polygon::new(FillRule::NonZero),
            current_point: PointFixed::default(),
            subpath_start: PointFixed::default(),
            num_segments: 0,
        })
    }

    /// Stroke every sub-path of `path`.
    pub fn stroke(&mut self, path: &PathStorage) -> Result<()> {
        if self.pen.is_empty() {
            log::debug!("zero-width stroke; nothing to draw");
            return Ok(());
        }
        path.interpret(Direction::Forward, self)?;
        log::debug!(
            "stroked {} segments into {} contours",
            self.num_segments,
            self.polygon.num_contours()
        );
        Ok(())
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn into_polygon(self) -> Polygon {
        self.polygon
    }

    /// Offset from a segment end to its counter-clockwise face point for
    /// a segment heading along `slope`.
    ///
    /// The perpendicular is taken in user space, where the pen is round,
    /// and mapped back to device space. The clockwise face point is the
    /// negation.
    fn face_offset(&self, slope: &Slope) -> PointFixed {
        let mut dx = fixed_to_double(slope.dx);
        let mut dy = fixed_to_double(slope.dy);
        self.matrix_inverse.transform_distance(&mut dx, &mut dy);
        let (ux, uy) = normalize(dx, dy);

        let (mut fx, mut fy) = if self.det_positive {
            (-uy * self.half_width, ux * self.half_width)
        } else {
            (uy * self.half_width, -ux * self.half_width)
        };
        self.matrix.transform_distance(&mut fx, &mut fy);
        PointFixed::new(fixed_from_double(fx), fixed_from_double(fy))
    }

    /// Per-segment pen with the face points for both ends inserted.
    fn segment_pen(&self, initial: &Slope, final_: &Slope) -> Result<Pen> {
        let start = self.face_offset(initial);
        let end = self.face_offset(final_);
        let mut pen = self.pen.clone();
        pen.add_points(&[start, -start, end, -end])?;
        Ok(pen)
    }

    fn stroke_line(&mut self, p1: PointFixed, p2: PointFixed) -> Result<()> {
        if p1 == p2 {
            return Ok(());
        }
        let slope = Slope::new(p1, p2);
        let pen = self.segment_pen(&slope, &slope)?;
        pen.stroke_points(&[p1, p2], slope, slope, &mut self.polygon)?;
        self.num_segments += 1;
        log::trace!("line segment stroked with {} pen vertices", pen.num_vertices());
        Ok(())
    }

    fn stroke_curve(&mut self, spline: &Spline) -> Result<()> {
        let initial = spline.initial_slope();
        let final_ = spline.final_slope();
        let pen = self.segment_pen(&initial, &final_)?;
        pen.stroke_spline(spline, self.tolerance, &mut self.polygon)?;
        self.num_segments += 1;
        log::trace!("curve segment stroked with {} pen vertices", pen.num_vertices());
        Ok(())
    }
}

impl PathVisitor for Stroker {
    fn move_to(&mut self, p: PointFixed) -> Result<()> {
        self.current_point = p;
        self.subpath_start = p;
        Ok(())
    }

    fn line_to(&mut self, p: PointFixed) -> Result<()> {
        self.stroke_line(self.current_point, p)?;
        self.current_point = p;
        Ok(())
    }

    fn curve_to(&mut self, b: PointFixed, c: PointFixed, d: PointFixed) -> Result<()> {
        match Spline::new(self.current_point, b, c, d) {
            Ok(spline) => self.stroke_curve(&spline)?,
            Err(Error::Degenerate) => return self.line_to(d),
            Err(e) => return Err(e),
        }
        self.current_point = d;
        Ok(())
    }

    fn close_path(&mut self) -> Result<()> {
        self.stroke_line(self.current_point, self.subpath_start)?;
        self.current_point = self.subpath_start;
        Ok(())
    }
}

/// Unit vector along `(dx, dy)`; axis-aligned inputs are snapped exactly.
fn normalize(dx: f64, dy: f64) -> (f64, f64) {
    if dx == 0.0 {
        (0.0, if dy > 0.0 { 1.0 } else { -1.0 })
    } else if dy == 0.0 {
        (if dx > 0.0 { 1.0 } else { -1.0 }, 0.0)
    } else {
        let mag = dx.hypot(dy);
        (dx / mag, dy / mag)
    }
}
