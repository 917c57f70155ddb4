//! # fixpath
//!
//! Fixed-point path geometry: the numeric core between a vector drawing
//! API and a scan converter.
//!
//! Paths are stored in 16.16 fixed-point device coordinates. Filling
//! flattens them into closed polygon contours; stroking sweeps a
//! polygonal pen along every segment and emits the outline as contours
//! to be filled with the non-zero rule.
//!
//! - Exact angular comparison of segment directions through wide
//!   (64-bit and 128-bit) integer arithmetic
//! - Adaptive cubic Bezier flattening to a device-space tolerance
//! - Pen polygons sized to a tolerance under any affine transform
//! - Stroke outlines with exact perpendicular end faces
//!
//! ## Pipeline
//!
//! 1. **Path**: `move_to` / `line_to` / `curve_to` / `close_path` into
//!    [`path_storage::PathStorage`]
//! 2. **Flatten**: curves become polylines via [`spline::Spline`]
//! 3. **Outline**: [`filler::fill_path`] or [`stroker::stroke_path`]
//! 4. **Polygon**: [`polygon::Polygon`] contours and edges for the
//!    tessellator

// Foundation types & numerics
pub mod basics;
pub mod error;
pub mod slope;
pub mod wideint;

// Geometry primitives
pub mod bounding_rect;
pub mod config;
pub mod path_storage;
pub mod spline;
pub mod trans_affine;

// Outline construction
pub mod filler;
pub mod pen;
pub mod polygon;
pub mod stroker;
