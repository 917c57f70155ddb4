//! Output polygon handed to the scan converter.
//!
//! A polygon is a set of implicitly closed contours in 16.16 device
//! coordinates, tagged with the fill rule the consumer must apply. The
//! non-horizontal edges the tessellator works on are derived from the
//! contours on demand.

use crate::basics::{fixed_from_double, unite_rectangles, FillRule, PointD, PointFixed, RectFixed};
use crate::bounding_rect::points_bounds;
use crate::error::Result;

/// A directed polygon edge with its endpoints sorted top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub top: PointFixed,
    pub bottom: PointFixed,
    /// `true` when the contour runs downward along this edge.
    pub clockwise: bool,
}

impl Edge {
    /// Edge from `p1` to `p2`, or `None` for a horizontal edge.
    pub fn new(p1: PointFixed, p2: PointFixed) -> Option<Edge> {
        if p1.y == p2.y {
            return None;
        }
        Some(if p1.y < p2.y {
            Edge {
                top: p1,
                bottom: p2,
                clockwise: true,
            }
        } else {
            Edge {
                top: p2,
                bottom: p1,
                clockwise: false,
            }
        })
    }

    /// Winding contribution: +1 for downward edges, -1 for upward ones.
    #[inline]
    pub fn direction(&self) -> i32 {
        if self.clockwise {
            1
        } else {
            -1
        }
    }
}

/// Closed contours plus the fill rule that gives them meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    contours: Vec<Vec<PointFixed>>,
    current: Vec<PointFixed>,
    fill_rule: FillRule,
}

impl Polygon {
    pub fn new(fill_rule: FillRule) -> Self {
        Self {
            contours: Vec::new(),
            current: Vec::new(),
            fill_rule,
        }
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn set_fill_rule(&mut self, fill_rule: FillRule) {
        self.fill_rule = fill_rule;
    }

    /// Close the open contour, if any, and start a new one at `p`.
    pub fn move_to(&mut self, p: PointFixed) -> Result<()> {
        self.close()?;
        self.add_point(p)
    }

    /// Extend the open contour to `p`; starts a contour if none is open.
    /// A point equal to the previous one is dropped.
    pub fn add_point(&mut self, p: PointFixed) -> Result<()> {
        if self.current.last() == Some(&p) {
            return Ok(());
        }
        self.current.try_reserve(1)?;
        self.current.push(p);
        Ok(())
    }

    #[inline]
    pub fn line_to(&mut self, p: PointFixed) -> Result<()> {
        self.add_point(p)
    }

    /// Finish the open contour. The closing edge back to its first point
    /// is implicit.
    pub fn close(&mut self) -> Result<()> {
        if self.current.is_empty() {
            return Ok(());
        }
        self.contours.try_reserve(1)?;
        self.contours.push(std::mem::take(&mut self.current));
        Ok(())
    }

    /// Closed contours in the order they were finished.
    pub fn contours(&self) -> &[Vec<PointFixed>] {
        &self.contours
    }

    pub fn num_contours(&self) -> usize {
        self.contours.len()
    }

    /// All non-horizontal edges of the closed contours.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.contours.iter().flat_map(|c| {
            let n = c.len();
            (0..n).filter_map(move |i| Edge::new(c[i], c[(i + 1) % n]))
        })
    }

    pub fn num_edges(&self) -> usize {
        self.edges().count()
    }

    /// `true` when no closed contour produces an edge.
    pub fn is_empty(&self) -> bool {
        self.edges().next().is_none()
    }

    /// Bounding box of all closed contours.
    pub fn extents(&self) -> Option<RectFixed> {
        self.contours
            .iter()
            .filter_map(|c| points_bounds(c))
            .reduce(|a, b| unite_rectangles(&a, &b))
    }

    /// Winding number of the polygon around `(x, y)`, counted along a ray
    /// toward +x. Edges are half-open at the bottom.
    pub fn winding_number(&self, x: f64, y: f64) -> i32 {
        let px = fixed_from_double(x) as f64;
        let py = fixed_from_double(y) as f64;
        let mut winding = 0;
        for e in self.edges() {
            let (tx, ty) = (e.top.x as f64, e.top.y as f64);
            let (bx, by) = (e.bottom.x as f64, e.bottom.y as f64);
            if py < ty || py >= by {
                continue;
            }
            let ex = tx + (py - ty) * (bx - tx) / (by - ty);
            if ex > px {
                winding += e.direction();
            }
        }
        winding
    }

    /// Hit test honoring the polygon's fill rule.
    pub fn hit_test(&self, p: PointD) -> bool {
        let w = self.winding_number(p.x, p.y);
        match self.fill_rule {
            FillRule::NonZero => w != 0,
            FillRule::EvenOdd => w % 2 != 0,
        }
    }
}
