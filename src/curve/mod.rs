//! Path curve math
//!
//! Stateless queries over cubic Bezier segments, consumed by path authoring
//! and path following on the host side:
//! - evaluation, first and second derivatives, normals
//! - De Casteljau splitting
//! - length estimation and tight bounding boxes

pub mod bezier;
pub mod bounds;

pub use bezier::{COEFF_EPSILON, CubicBezier, NORMAL_EPSILON};
pub use bounds::Aabb;
