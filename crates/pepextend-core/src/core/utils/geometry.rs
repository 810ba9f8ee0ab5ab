use nalgebra::{Rotation3, Unit, Vector3};
use std::f64::consts::PI;
use thiserror::Error;

/// Below this value `sin(theta)` is treated as zero and the azimuth is undefined.
const POLE_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Division by zero: cannot normalize a zero-length vector")]
    DivisionByZero,
    #[error("Cannot normalize a vector with a non-finite length")]
    NonFiniteLength,
}

/// A displacement vector expressed as radius, polar angle from +Z and azimuth in the XY plane.
///
/// Angles are in radians. `theta` lies in `[0, pi]` and `phi` in `[-pi, pi]` for values
/// produced by [`to_spherical`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spherical {
    pub r: f64,
    pub theta: f64,
    pub phi: f64,
}

pub fn magnitude(v: &Vector3<f64>) -> f64 {
    v.dot(v).sqrt()
}

pub fn add(u: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    u + v
}

pub fn subtract(u: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    u - v
}

pub fn scale(scalar: f64, v: &Vector3<f64>) -> Vector3<f64> {
    v * scalar
}

pub fn dot(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    u.dot(v)
}

/// Divides every component of `v` by its magnitude.
///
/// # Errors
///
/// Returns [`GeometryError::DivisionByZero`] when `v` has zero length instead of
/// producing a vector of NaNs, and [`GeometryError::NonFiniteLength`] when a component
/// is NaN or infinite.
pub fn normalize(v: &Vector3<f64>) -> Result<Vector3<f64>, GeometryError> {
    let length = magnitude(v);
    if !length.is_finite() {
        return Err(GeometryError::NonFiniteLength);
    }
    if length == 0.0 {
        return Err(GeometryError::DivisionByZero);
    }
    Ok(v / length)
}

/// Converts a Cartesian displacement into spherical coordinates.
///
/// A zero vector maps to the sentinel `(0, 0, 0)`, which callers must read as
/// "no well-defined direction". A vector lying on the Z axis has no defined azimuth;
/// `phi` is reported as `0` in that case.
pub fn to_spherical(v: &Vector3<f64>) -> Spherical {
    let r = magnitude(v);
    if r == 0.0 {
        return Spherical::default();
    }

    let theta = (v.z / r).clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    if sin_theta.abs() < POLE_TOLERANCE {
        return Spherical { r, theta, phi: 0.0 };
    }

    let mut phi = (v.x / (r * sin_theta)).clamp(-1.0, 1.0).acos();
    if v.y < 0.0 && phi > 0.0 {
        phi = -phi;
    }
    Spherical { r, theta, phi }
}

pub fn to_cartesian(r: f64, theta: f64, phi: f64) -> Vector3<f64> {
    Vector3::new(
        r * theta.sin() * phi.cos(),
        r * theta.sin() * phi.sin(),
        r * theta.cos(),
    )
}

/// Returns the smallest rotation taking direction `from` onto direction `to`.
///
/// Antiparallel inputs have no unique minimal rotation; a half turn about an axis
/// perpendicular to `from` is used for them.
pub fn rotation_to_align(from: &Vector3<f64>, to: &Vector3<f64>) -> Rotation3<f64> {
    Rotation3::rotation_between(from, to).unwrap_or_else(|| {
        let helper = if from.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let axis = Unit::new_normalize(from.cross(&helper));
        Rotation3::from_axis_angle(&axis, PI)
    })
}
