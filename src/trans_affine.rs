//! Affine transformation matrix.
//!
//! The current transform maps user space to device space. The pen uses
//! its linear part to shape vertices; the stroker needs the inverse to
//! measure line widths in user space.

use crate::error::{Error, Result};

/// 2D affine transformation matrix.
///
/// Stores six components: `[sx, shy, shx, sy, tx, ty]` representing the
/// matrix:
///
/// ```text
///   | sx  shx tx |
///   | shy  sy ty |
///   |  0    0  1 |
/// ```
///
/// Transform: `x' = x*sx + y*shx + tx`, `y' = x*shy + y*sy + ty`.
#[derive(Debug, Clone, Copy)]
pub struct TransAffine {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl TransAffine {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Identity matrix.
    pub fn new() -> Self {
        Self {
            sx: 1.0,
            shy: 0.0,
            shx: 0.0,
            sy: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Custom matrix from six components.
    pub fn new_custom(sx: f64, shy: f64, shx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self {
            sx,
            shy,
            shx,
            sy,
            tx,
            ty,
        }
    }

    /// Non-uniform scaling matrix.
    pub fn new_scaling(x: f64, y: f64) -> Self {
        Self::new_custom(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    /// Uniform scaling matrix.
    pub fn new_scaling_uniform(s: f64) -> Self {
        Self::new_custom(s, 0.0, 0.0, s, 0.0, 0.0)
    }

    // ====================================================================
    // Inversion
    // ====================================================================

    /// Inverse of the matrix.
    ///
    /// Fails with [`Error::InvalidMatrix`] when the determinant is zero or
    /// not finite.
    pub fn inverted(&self) -> Result<TransAffine> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(Error::InvalidMatrix);
        }
        let d = 1.0 / det;
        let sx = self.sy * d;
        let sy = self.sx * d;
        let shy = -self.shy * d;
        let shx = -self.shx * d;
        Ok(Self {
            sx,
            shy,
            shx,
            sy,
            tx: -self.tx * sx - self.ty * shx,
            ty: -self.tx * shy - self.ty * sy,
        })
    }

    // ====================================================================
    // Transformations
    // ====================================================================

    /// Forward transform of a displacement (2x2 only, no translation).
    #[inline]
    pub fn transform_distance(&self, dx: &mut f64, dy: &mut f64) {
        let tmp = *dx;
        *dx = tmp * self.sx + *dy * self.shx;
        *dy = tmp * self.shy + *dy * self.sy;
    }

    // ====================================================================
    // Auxiliary
    // ====================================================================

    /// Determinant of the 2x2 portion.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.sx * self.sy - self.shy * self.shx
    }

    /// Area scale factor of the linear part.
    #[inline]
    pub fn expansion_factor(&self) -> f64 {
        self.determinant().abs()
    }
}

impl Default for TransAffine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
