//! Stroke and flattening parameters.
//!
//! `StrokeStyle` carries the full set of stroke parameters a drawing
//! context tracks. The outline builder in [`crate::stroker`] consumes the
//! line width; caps, joins, miter limit and dashes are recorded for the
//! layers that render them.

use crate::basics::FillRule;

/// Default flattening tolerance, in device units.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

// ============================================================================
// Enums
// ============================================================================

/// Line cap style for open sub-path endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt = 0,
    Round = 1,
    Square = 2,
}

/// Line join style at sub-path corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter = 0,
    Round = 1,
    Bevel = 2,
}

// ============================================================================
// StrokeStyle
// ============================================================================

/// Stroke parameters in user-space units.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    line_width: f64,
    line_cap: LineCap,
    line_join: LineJoin,
    miter_limit: f64,
    dash: Vec<f64>,
    dash_offset: f64,
}

impl StrokeStyle {
    pub fn new() -> Self {
        Self {
            line_width: 2.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            dash: Vec::new(),
            dash_offset: 0.0,
        }
    }

    pub fn set_line_width(&mut self, w: f64) {
        self.line_width = w.max(0.0);
    }
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Radius of the pen that draws this style.
    pub fn half_width(&self) -> f64 {
        self.line_width * 0.5
    }

    pub fn set_line_cap(&mut self, lc: LineCap) {
        self.line_cap = lc;
    }
    pub fn line_cap(&self) -> LineCap {
        self.line_cap
    }

    pub fn set_line_join(&mut self, lj: LineJoin) {
        self.line_join = lj;
    }
    pub fn line_join(&self) -> LineJoin {
        self.line_join
    }

    pub fn set_miter_limit(&mut self, ml: f64) {
        self.miter_limit = ml;
    }
    pub fn miter_limit(&self) -> f64 {
        self.miter_limit
    }

    /// Set the miter limit from the smallest join angle (radians) that
    /// still gets a mitered corner.
    pub fn set_miter_limit_theta(&mut self, t: f64) {
        self.miter_limit = 1.0 / (t * 0.5).sin();
    }

    /// Set the dash pattern. Negative lengths are clamped to zero; a
    /// pattern whose lengths are all zero disables dashing.
    pub fn set_dash(&mut self, dash: &[f64], offset: f64) {
        self.dash.clear();
        if dash.iter().any(|&d| d > 0.0) {
            self.dash.extend(dash.iter().map(|&d| d.max(0.0)));
        }
        self.dash_offset = offset;
    }
    pub fn dash(&self) -> &[f64] {
        &self.dash
    }
    pub fn dash_offset(&self) -> f64 {
        self.dash_offset
    }

    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// FlattenOptions
// ============================================================================

/// Parameters shared by fill and stroke conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlattenOptions {
    pub tolerance: f64,
    pub fill_rule: FillRule,
}

impl FlattenOptions {
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            fill_rule: FillRule::NonZero,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self::new()
    }
}
