//! Path storage: the recorded sequence of drawing operations.
//!
//! Operations and their point arguments live in two contiguous `Vec`s.
//! Each [`PathOp`] consumes a fixed number of points from the argument
//! buffer, so the buffers can be walked forward or backward without
//! per-op bookkeeping.

use crate::basics::{fixed_from_double, fixed_to_double, PointD, PointFixed, RectD};
use crate::bounding_rect::path_bounds;
use crate::error::{Error, Result};

/// A recorded path operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathOp {
    MoveTo,
    LineTo,
    CurveTo,
    ClosePath,
}

impl PathOp {
    /// Number of points the operation consumes from the argument buffer.
    #[inline]
    pub const fn num_args(self) -> usize {
        match self {
            PathOp::MoveTo | PathOp::LineTo => 1,
            PathOp::CurveTo => 3,
            PathOp::ClosePath => 0,
        }
    }
}

/// Order in which [`PathStorage::interpret`] visits operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

/// One operation together with its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathElement {
    MoveTo(PointFixed),
    LineTo(PointFixed),
    CurveTo(PointFixed, PointFixed, PointFixed),
    ClosePath,
}

/// Receiver of the operations replayed by [`PathStorage::interpret`].
///
/// The first error returned by a callback stops the walk and is
/// propagated to the caller.
pub trait PathVisitor {
    fn move_to(&mut self, p: PointFixed) -> Result<()>;
    fn line_to(&mut self, p: PointFixed) -> Result<()>;
    fn curve_to(&mut self, b: PointFixed, c: PointFixed, d: PointFixed) -> Result<()>;
    fn close_path(&mut self) -> Result<()>;
}

/// Append-only path in 16.16 device coordinates.
///
/// Tracks the current point (valid once a `move_to` has been issued) and
/// the start of the current sub-path, which `close_path` returns to.
#[derive(Debug, Clone)]
pub struct PathStorage {
    ops: Vec<PathOp>,
    points: Vec<PointFixed>,
    current_point: PointFixed,
    has_current_point: bool,
    last_move_point: PointFixed,
}

impl PathStorage {
    /// Create an empty path.
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            points: Vec::new(),
            current_point: PointFixed::default(),
            has_current_point: false,
            last_move_point: PointFixed::default(),
        }
    }

    /// Remove all operations (keeps allocated memory).
    pub fn reset(&mut self) {
        self.ops.clear();
        self.points.clear();
        self.current_point = PointFixed::default();
        self.has_current_point = false;
        self.last_move_point = PointFixed::default();
    }

    // ---------------------------------------------------------------
    // Path construction
    // ---------------------------------------------------------------

    /// Record `op` with its arguments. Storage for both is reserved
    /// before anything is pushed, so a failed append leaves the path
    /// untouched.
    fn add(&mut self, op: PathOp, args: &[PointFixed]) -> Result<()> {
        debug_assert_eq!(op.num_args(), args.len());
        self.ops.try_reserve(1)?;
        self.points.try_reserve(args.len())?;
        self.ops.push(op);
        self.points.extend_from_slice(args);
        Ok(())
    }

    fn require_current_point(&self) -> Result<PointFixed> {
        if self.has_current_point {
            Ok(self.current_point)
        } else {
            Err(Error::NoCurrentPoint)
        }
    }

    /// Begin a new sub-path at `p`.
    pub fn move_to_fixed(&mut self, p: PointFixed) -> Result<()> {
        self.add(PathOp::MoveTo, &[p])?;
        self.current_point = p;
        self.has_current_point = true;
        self.last_move_point = p;
        Ok(())
    }

    /// Straight segment from the current point to `p`.
    pub fn line_to_fixed(&mut self, p: PointFixed) -> Result<()> {
        self.require_current_point()?;
        self.add(PathOp::LineTo, &[p])?;
        self.current_point = p;
        Ok(())
    }

    /// Cubic segment from the current point through `b` and `c` to `d`.
    pub fn curve_to_fixed(&mut self, b: PointFixed, c: PointFixed, d: PointFixed) -> Result<()> {
        self.require_current_point()?;
        self.add(PathOp::CurveTo, &[b, c, d])?;
        self.current_point = d;
        Ok(())
    }

    /// Close the current sub-path; the current point returns to the
    /// sub-path start.
    pub fn close_path(&mut self) -> Result<()> {
        self.require_current_point()?;
        self.add(PathOp::ClosePath, &[])?;
        self.current_point = self.last_move_point;
        Ok(())
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.move_to_fixed(PointFixed::from_f64(x, y))
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.line_to_fixed(PointFixed::from_f64(x, y))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> Result<()> {
        self.curve_to_fixed(
            PointFixed::from_f64(x1, y1),
            PointFixed::from_f64(x2, y2),
            PointFixed::from_f64(x3, y3),
        )
    }

    /// Relative `move_to`: offsets are added to the current point.
    pub fn rel_move_to(&mut self, dx: f64, dy: f64) -> Result<()> {
        let p = self.rel_to_abs(dx, dy)?;
        self.move_to_fixed(p)
    }

    pub fn rel_line_to(&mut self, dx: f64, dy: f64) -> Result<()> {
        let p = self.rel_to_abs(dx, dy)?;
        self.line_to_fixed(p)
    }

    /// Relative `curve_to`: all three points are offsets from the current
    /// point at the time of the call.
    #[allow(clippy::too_many_arguments)]
    pub fn rel_curve_to(
        &mut self,
        dx1: f64,
        dy1: f64,
        dx2: f64,
        dy2: f64,
        dx3: f64,
        dy3: f64,
    ) -> Result<()> {
        let b = self.rel_to_abs(dx1, dy1)?;
        let c = self.rel_to_abs(dx2, dy2)?;
        let d = self.rel_to_abs(dx3, dy3)?;
        self.curve_to_fixed(b, c, d)
    }

    fn rel_to_abs(&self, dx: f64, dy: f64) -> Result<PointFixed> {
        let cp = self.require_current_point()?;
        Ok(PointFixed::new(
            cp.x + fixed_from_double(dx),
            cp.y + fixed_from_double(dy),
        ))
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    /// The current point, if one has been established.
    pub fn current_point(&self) -> Option<PointFixed> {
        self.has_current_point.then_some(self.current_point)
    }

    pub fn current_point_f64(&self) -> Option<PointD> {
        self.current_point()
            .map(|p| PointD::new(fixed_to_double(p.x), fixed_to_double(p.y)))
    }

    pub fn has_current_point(&self) -> bool {
        self.has_current_point
    }

    pub fn last_move_point(&self) -> PointFixed {
        self.last_move_point
    }

    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn points(&self) -> &[PointFixed] {
        &self.points
    }

    /// Iterate the recorded operations in issue order.
    pub fn iter(&self) -> PathIter<'_> {
        PathIter {
            path: self,
            op: 0,
            arg: 0,
        }
    }

    /// Control-point bounding box in device units.
    pub fn bounds(&self) -> Option<RectD> {
        path_bounds(self)
    }

    // ---------------------------------------------------------------
    // Interpretation
    // ---------------------------------------------------------------

    /// Replay the path into `visitor`.
    ///
    /// In reverse, operations are visited last to first and the argument
    /// cursor walks backward by each op's arity; the arguments of a single
    /// op keep their stored order.
    pub fn interpret<V: PathVisitor + ?Sized>(
        &self,
        direction: Direction,
        visitor: &mut V,
    ) -> Result<()> {
        match direction {
            Direction::Forward => {
                let mut arg = 0;
                for &op in &self.ops {
                    let n = op.num_args();
                    dispatch(visitor, op, &self.points[arg..arg + n])?;
                    arg += n;
                }
            }
            Direction::Reverse => {
                let mut arg = self.points.len();
                for &op in self.ops.iter().rev() {
                    let n = op.num_args();
                    arg -= n;
                    dispatch(visitor, op, &self.points[arg..arg + n])?;
                }
            }
        }
        Ok(())
    }
}

impl Default for PathStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn dispatch<V: PathVisitor + ?Sized>(visitor: &mut V, op: PathOp, args: &[PointFixed]) -> Result<()> {
    match op {
        PathOp::MoveTo => visitor.move_to(args[0]),
        PathOp::LineTo => visitor.line_to(args[0]),
        PathOp::CurveTo => visitor.curve_to(args[0], args[1], args[2]),
        PathOp::ClosePath => visitor.close_path(),
    }
}

// ===================================================================
// PathIter
// ===================================================================

/// Forward iterator over the elements of a [`PathStorage`].
pub struct PathIter<'a> {
    path: &'a PathStorage,
    op: usize,
    arg: usize,
}

impl Iterator for PathIter<'_> {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        let op = *self.path.ops.get(self.op)?;
        let pts = &self.path.points[self.arg..self.arg + op.num_args()];
        self.op += 1;
        self.arg += op.num_args();
        Some(match op {
            PathOp::MoveTo => PathElement::MoveTo(pts[0]),
            PathOp::LineTo => PathElement::LineTo(pts[0]),
            PathOp::CurveTo => PathElement::CurveTo(pts[0], pts[1], pts[2]),
            PathOp::ClosePath => PathElement::ClosePath,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.path.ops.len() - self.op;
        (n, Some(n))
    }
}

impl ExactSizeIterator for PathIter<'_> {}

impl<'a> IntoIterator for &'a PathStorage {
    type Item = PathElement;
    type IntoIter = PathIter<'a>;

    fn into_iter(self) -> PathIter<'a> {
        self.iter()
    }
}
