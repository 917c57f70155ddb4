//! Path filling: converts a path into closed polygon contours.

use crate::basics::{FillRule, PointFixed};
use crate::config::FlattenOptions;
use crate::error::{Error, Result};
use crate::path_storage::{Direction, PathStorage, PathVisitor};
use crate::polygon::Polygon;
use crate::spline::Spline;

/// Flatten `path` into a polygon tagged with `fill_rule`.
///
/// Every sub-path becomes one implicitly closed contour; curves are
/// flattened to within `tolerance` device units.
pub fn fill_path(path: &PathStorage, tolerance: f64, fill_rule: FillRule) -> Result<Polygon> {
    let mut filler = Filler {
        polygon: Polygon::new(fill_rule),
        tolerance,
        current_point: PointFixed::default(),
        subpath_start: PointFixed::default(),
        open: false,
        scratch: Vec::new(),
    };
    path.interpret(Direction::Forward, &mut filler)?;
    filler.polygon.close()?;

    log::debug!(
        "filled path of {} ops into {} contours",
        path.num_ops(),
        filler.polygon.num_contours()
    );
    Ok(filler.polygon)
}

/// [`fill_path`] with tolerance and fill rule taken from `options`.
pub fn fill_path_with(path: &PathStorage, options: &FlattenOptions) -> Result<Polygon> {
    fill_path(path, options.tolerance, options.fill_rule)
}

struct Filler {
    polygon: Polygon,
    tolerance: f64,
    current_point: PointFixed,
    subpath_start: PointFixed,
    open: bool,
    scratch: Vec<PointFixed>,
}

impl Filler {
    /// Drawing after a `close_path` continues from the sub-path start.
    fn ensure_open(&mut self) -> Result<()> {
        if !self.open {
            self.polygon.move_to(self.current_point)?;
            self.open = true;
        }
        Ok(())
    }
}

impl PathVisitor for Filler {
    fn move_to(&mut self, p: PointFixed) -> Result<()> {
        self.polygon.move_to(p)?;
        self.current_point = p;
        self.subpath_start = p;
        self.open = true;
        Ok(())
    }

    fn line_to(&mut self, p: PointFixed) -> Result<()> {
        self.ensure_open()?;
        self.polygon.line_to(p)?;
        self.current_point = p;
        Ok(())
    }

    fn curve_to(&mut self, b: PointFixed, c: PointFixed, d: PointFixed) -> Result<()> {
        let spline = match Spline::new(self.current_point, b, c, d) {
            Ok(spline) => spline,
            Err(Error::Degenerate) => return self.line_to(d),
            Err(e) => return Err(e),
        };

        self.ensure_open()?;
        self.scratch.clear();
        spline.decompose_into(self.tolerance, &mut self.scratch)?;
        for &p in self.scratch.iter().skip(1) {
            self.polygon.line_to(p)?;
        }
        self.current_point = d;
        Ok(())
    }

    fn close_path(&mut self) -> Result<()> {
        self.polygon.close()?;
        self.current_point = self.subpath_start;
        self.open = false;
        Ok(())
    }
}
