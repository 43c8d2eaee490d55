//! Map outline generation: ring simplification, projection into an SVG view
//! box, and the offline province boundary driver.
//!
//! Geometry is carried in [`geo`] types: a ring is a `LineString<f64>` whose
//! last coordinate connects back to the first, and a region is a
//! `MultiPolygon<f64>` of its outer rings.

pub mod boundary;
mod projection;
mod simplify;

pub use projection::{combined_bounds, ring_to_path, Projection};
pub use simplify::{perpendicular_distance, sample_ring, simplify, DEFAULT_MAX_POINTS};

pub use geo::{Coord, LineString, MultiPolygon, Polygon, Rect};
