//! Cubic Bezier curve geometry
//!
//! A segment is defined by two anchors (the endpoints) and two control points
//! shaping the curvature between them. Every query is a pure function of the
//! four points, so a `CubicBezier` can be copied freely between path followers.
//!
//! Parameter `t` runs from 0 (first anchor) to 1 (second anchor). Evaluators
//! clamp out-of-range values instead of rejecting them, since callers stepping
//! along a path routinely overshoot by a rounding error.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use crate::error::CurveError;

/// Minimum sine of the angle between tangent and second derivative for a
/// normal to be defined; independent of the curve's scale
pub const NORMAL_EPSILON: f32 = 1e-6;

/// Derivative coefficients below this are treated as zero when solving for
/// stationary points
pub const COEFF_EPSILON: f32 = 1e-6;

/// A cubic Bezier segment: anchor, control, control, anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub anchor1: Vec3,
    pub control1: Vec3,
    pub control2: Vec3,
    pub anchor2: Vec3,
}

impl CubicBezier {
    pub fn new(anchor1: Vec3, control1: Vec3, control2: Vec3, anchor2: Vec3) -> Self {
        Self {
            anchor1,
            control1,
            control2,
            anchor2,
        }
    }

    /// Build from the first four points of a path slice
    pub fn from_slice(points: &[Vec3]) -> Result<Self, CurveError> {
        match points {
            [a1, c1, c2, a2, ..] => Ok(Self::new(*a1, *c1, *c2, *a2)),
            _ => Err(CurveError::TooFewPoints {
                found: points.len(),
            }),
        }
    }

    pub fn points(&self) -> [Vec3; 4] {
        [self.anchor1, self.control1, self.control2, self.anchor2]
    }

    /// Point on the curve at `t` (Bernstein form)
    pub fn evaluate(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.anchor1 * (u * u * u)
            + self.control1 * (3.0 * u * u * t)
            + self.control2 * (3.0 * u * t * t)
            + self.anchor2 * (t * t * t)
    }

    /// First derivative at `t`; the tangent direction for a follower
    pub fn derivative(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        (self.control1 - self.anchor1) * (3.0 * u * u)
            + (self.control2 - self.control1) * (6.0 * u * t)
            + (self.anchor2 - self.control2) * (3.0 * t * t)
    }

    pub fn second_derivative(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        (self.control2 - 2.0 * self.control1 + self.anchor1) * (6.0 * u)
            + (self.anchor2 - 2.0 * self.control2 + self.control1) * (6.0 * t)
    }

    /// Unit vector perpendicular to the tangent, in the osculating plane
    ///
    /// Fails on straight stretches and inflection points, where the tangent
    /// and second derivative are parallel (or either vanishes) and no plane is
    /// defined. Callers pick their own fallback (typically a fixed up vector).
    pub fn normal(&self, t: f32) -> Result<Vec3, CurveError> {
        let tangent = self.derivative(t);
        let second = self.second_derivative(t);
        let binormal = second.cross(tangent);
        let normal = binormal.cross(tangent);

        // |(s x t) x t| = |t|^2 |s| sin(angle)
        let scale = tangent.length_squared() * second.length();
        let length = normal.length();
        if !(scale > 0.0) || !(length >= NORMAL_EPSILON * scale) {
            return Err(CurveError::DegenerateNormal { t: t.clamp(0.0, 1.0) });
        }
        Ok(normal / length)
    }

    /// Split into two curves at `t` (De Casteljau)
    ///
    /// The halves trace exactly the original shape; the first ends and the
    /// second starts at `evaluate(t)`. At t = 0 or 1 one half collapses to a
    /// point.
    pub fn split(&self, t: f32) -> (CubicBezier, CubicBezier) {
        let t = t.clamp(0.0, 1.0);
        let a1 = self.anchor1.lerp(self.control1, t);
        let a2 = self.control1.lerp(self.control2, t);
        let a3 = self.control2.lerp(self.anchor2, t);
        let b1 = a1.lerp(a2, t);
        let b2 = a2.lerp(a3, t);
        let on_curve = b1.lerp(b2, t);

        (
            CubicBezier::new(self.anchor1, a1, b1, on_curve),
            CubicBezier::new(on_curve, b2, a3, self.anchor2),
        )
    }

    /// Cheap length estimate: mean of the chord and the control polygon
    ///
    /// The true arc length always lies between the two, so this is exact for
    /// evenly spaced colinear points and within the gap otherwise.
    pub fn estimate_length(&self) -> f32 {
        let chord = self.anchor1.distance(self.anchor2);
        let control_net = self.anchor1.distance(self.control1)
            + self.control1.distance(self.control2)
            + self.control2.distance(self.anchor2);
        (chord + control_net) / 2.0
    }

    /// Parameters in [0, 1] where the derivative on some axis is zero
    ///
    /// Roots are listed x axis first, then y, then z. A double root appears
    /// once.
    pub fn extreme_point_times(&self) -> Vec<f32> {
        let (p0, p1, p2, p3) = (self.anchor1, self.control1, self.control2, self.anchor2);

        // Derivative as a*t^2 + b*t + c, per axis
        let a = 3.0 * (-p0 + 3.0 * p1 - 3.0 * p2 + p3);
        let b = 6.0 * (p0 - 2.0 * p1 + p2);
        let c = 3.0 * (p1 - p0);

        let mut times = Vec::new();
        for axis in 0..3 {
            push_stationary_times(a[axis], b[axis], c[axis], &mut times);
        }
        times
    }

    /// Tight axis-aligned box around the whole segment
    pub fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::from_point(self.anchor1);
        aabb.extend(self.anchor2);
        for t in self.extreme_point_times() {
            aabb.extend(self.evaluate(t));
        }
        aabb
    }

    /// Evenly spaced points from anchor to anchor
    pub fn sample(&self, num_points: usize) -> Vec<Vec3> {
        (0..num_points)
            .map(|i| {
                let t = i as f32 / (num_points - 1).max(1) as f32;
                self.evaluate(t)
            })
            .collect()
    }
}

impl From<[Vec3; 4]> for CubicBezier {
    fn from([a1, c1, c2, a2]: [Vec3; 4]) -> Self {
        Self::new(a1, c1, c2, a2)
    }
}

impl From<CubicBezier> for [Vec3; 4] {
    fn from(curve: CubicBezier) -> Self {
        curve.points()
    }
}

/// Roots in [0, 1] of `a*t^2 + b*t + c`
fn push_stationary_times(a: f32, b: f32, c: f32, times: &mut Vec<f32>) {
    let mut push = |t: f32| {
        if (0.0..=1.0).contains(&t) {
            times.push(t);
        }
    };

    if a.abs() < COEFF_EPSILON {
        // Derivative is linear on this axis
        if b.abs() >= COEFF_EPSILON {
            push(-c / b);
        }
        return;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return;
    }

    // q-form avoids cancellation when b^2 dominates 4ac
    let s = discriminant.sqrt();
    let q = -0.5 * (b + b.signum() * s);
    if q == 0.0 {
        // b and c both zero: double root at the origin
        push(0.0);
        return;
    }

    push(q / a);
    if discriminant != 0.0 {
        push(c / q);
    }
}
