//! # Orientation solver
//!
//! Computes the rotation that turns a reference direction onto a target
//! direction and expresses it as three sequential rotation angles.
//!
//! ## Angle convention
//!
//! Angles are `(phi, theta, psi)` in degrees, applied as extrinsic rotations
//! about X, then Y, then Z. The equivalent matrix is
//!
//! ```text
//! R = Rz(psi) * Ry(theta) * Rx(phi)
//! ```
//!
//! which is the same convention as `nalgebra::Rotation3::from_euler_angles`
//! (roll, pitch, yaw).
//!
//! ## Parallel and antiparallel inputs
//!
//! The Rodrigues construction divides by the squared sine of the angle between
//! the two directions. When that sine is below [`SINGULARITY_EPSILON`] the
//! solver does not build the matrix at all: aligned inputs give the identity,
//! opposed inputs give a half turn about an axis orthogonal to the reference.
//!
//! ## Examples
//!
//! ```rust
//! use areasource::orientation::solve;
//! use areasource::vector::Vec3;
//!
//! let reference = Vec3::new(0.0, 1.0, 0.0);
//! let target = Vec3::new(0.0, 0.0, 1.0);
//! let angles = solve(reference, target).unwrap();
//!
//! let rotated = angles.apply(reference);
//! assert!(rotated.max_abs_diff(&target) < 1e-9);
//! ```

use nalgebra::{Matrix3, Rotation3};
use serde::{Deserialize, Serialize};

use crate::constants::{DEG2RAD, MIN_VECTOR_NORM, RAD2DEG, SINGULARITY_EPSILON};
use crate::errors::{AreaSourceError, Result};
use crate::vector::Vec3;

/// Three sequential rotation angles in degrees (X, then Y, then Z, extrinsic)
///
/// Serialized as `[phi, theta, psi]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct RotationAngles {
    /// Rotation about X in degrees
    pub phi: f64,
    /// Rotation about Y in degrees
    pub theta: f64,
    /// Rotation about Z in degrees
    pub psi: f64,
}

impl RotationAngles {
    /// No rotation at all
    pub const IDENTITY: RotationAngles = RotationAngles {
        phi: 0.0,
        theta: 0.0,
        psi: 0.0,
    };

    pub fn new(phi: f64, theta: f64, psi: f64) -> Self {
        RotationAngles { phi, theta, psi }
    }

    /// Builds the angles from radians
    pub fn from_radians(phi: f64, theta: f64, psi: f64) -> Self {
        RotationAngles::new(phi * RAD2DEG, theta * RAD2DEG, psi * RAD2DEG)
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.phi, self.theta, self.psi]
    }

    /// The angles in radians, same order
    pub fn to_radians(&self) -> [f64; 3] {
        [self.phi * DEG2RAD, self.theta * DEG2RAD, self.psi * DEG2RAD]
    }

    /// Rotation matrix `Rz(psi) * Ry(theta) * Rx(phi)`
    pub fn to_rotation_matrix(&self) -> Rotation3<f64> {
        let [roll, pitch, yaw] = self.to_radians();
        Rotation3::from_euler_angles(roll, pitch, yaw)
    }

    /// Rotates a vector by these angles
    pub fn apply(&self, v: Vec3) -> Vec3 {
        Vec3::from_vector3(self.to_rotation_matrix() * v.to_vector3())
    }

    /// True when every angle is within `tolerance` degrees of zero
    pub fn is_identity(&self, tolerance: f64) -> bool {
        self.as_array().iter().all(|a| a.abs() <= tolerance)
    }
}

impl From<[f64; 3]> for RotationAngles {
    fn from(arr: [f64; 3]) -> Self {
        RotationAngles::new(arr[0], arr[1], arr[2])
    }
}

impl From<RotationAngles> for [f64; 3] {
    fn from(angles: RotationAngles) -> Self {
        angles.as_array()
    }
}

/// How two unit directions relate to each other
enum Alignment {
    /// General case, carries the Rodrigues rotation matrix
    Rotated(Matrix3<f64>),
    /// Already pointing the same way
    Parallel { cosine: f64 },
    /// Pointing in opposite directions, carries the unit reference
    Antiparallel { cosine: f64, reference: Vec3 },
}

/// Normalizes a direction, rejecting zero and non-finite vectors
fn unit_direction(name: &'static str, v: Vec3) -> Result<Vec3> {
    let invalid = || AreaSourceError::InvalidVector {
        name,
        x: v.x,
        y: v.y,
        z: v.z,
    };
    if !v.is_finite() || v.magnitude() < MIN_VECTOR_NORM {
        return Err(invalid());
    }
    v.normalize().ok_or_else(invalid)
}

fn align(reference: Vec3, target: Vec3) -> Result<Alignment> {
    let a = unit_direction("reference", reference)?;
    let b = unit_direction("target", target)?;

    let v = a.cross(&b);
    let c = a.dot(&b);
    let s = v.magnitude();

    if s < SINGULARITY_EPSILON {
        return Ok(if c > 0.0 {
            Alignment::Parallel { cosine: c }
        } else {
            Alignment::Antiparallel {
                cosine: c,
                reference: a,
            }
        });
    }

    // Rodrigues: R = I + K + K² (1 - c) / s²
    let k = v.to_vector3().cross_matrix();
    let r = Matrix3::identity() + k + k * k * ((1.0 - c) / (s * s));
    Ok(Alignment::Rotated(r))
}

/// Unit axis orthogonal to `a`, built from the basis axis least aligned with it
fn orthogonal_axis(a: Vec3) -> Vec3 {
    let components = [a.x.abs(), a.y.abs(), a.z.abs()];
    let mut least = 0;
    for (i, value) in components.iter().enumerate() {
        if *value < components[least] {
            least = i;
        }
    }
    // a is a unit vector, so it can never be parallel to its least aligned axis
    let axis = a.cross(&Vec3::unit_axis(least));
    axis / axis.magnitude()
}

/// Half turn about a unit axis: `2 u uᵀ - I`
fn half_turn(axis: Vec3) -> Matrix3<f64> {
    let u = axis.to_vector3();
    u * u.transpose() * 2.0 - Matrix3::identity()
}

/// Extracts `(phi, theta, psi)` in degrees from a rotation matrix
///
/// Uses the XYZ decomposition of `R = Rz(psi) * Ry(theta) * Rx(phi)`. When
/// `theta` is at ±90° (gimbal lock, `sqrt(R00² + R10²) < 1e-6`) `psi` is
/// fixed to zero and the whole in-plane rotation is assigned to `phi`.
pub fn euler_xyz_from_matrix(r: &Matrix3<f64>) -> RotationAngles {
    let sy = (r[(0, 0)] * r[(0, 0)] + r[(1, 0)] * r[(1, 0)]).sqrt();
    let singular = sy < SINGULARITY_EPSILON;

    let (x, y, z) = if !singular {
        (
            r[(2, 1)].atan2(r[(2, 2)]),
            (-r[(2, 0)]).atan2(sy),
            r[(1, 0)].atan2(r[(0, 0)]),
        )
    } else {
        ((-r[(1, 2)]).atan2(r[(1, 1)]), (-r[(2, 0)]).atan2(sy), 0.0)
    };

    RotationAngles::from_radians(x, y, z)
}

/// Rotation matrix taking the direction of `reference` onto that of `target`
///
/// Inputs need not be unit length. Parallel inputs give the identity and
/// antiparallel inputs a half turn about an axis orthogonal to `reference`.
pub fn rotation_between(reference: Vec3, target: Vec3) -> Result<Rotation3<f64>> {
    let matrix = match align(reference, target)? {
        Alignment::Rotated(r) => r,
        Alignment::Parallel { .. } => Matrix3::identity(),
        Alignment::Antiparallel { reference, .. } => half_turn(orthogonal_axis(reference)),
    };
    Ok(Rotation3::from_matrix_unchecked(matrix))
}

/// Computes the rotation angles that point `reference` along `target`
///
/// Both vectors are normalized internally; callers should pass them as they
/// are. A zero or non-finite input yields [`AreaSourceError::InvalidVector`].
///
/// Parallel inputs return [`RotationAngles::IDENTITY`]. Antiparallel inputs
/// return a half turn; its angle triple is not unique but re-applying it maps
/// `reference` onto `target`.
pub fn solve(reference: Vec3, target: Vec3) -> Result<RotationAngles> {
    match align(reference, target)? {
        Alignment::Rotated(r) => Ok(euler_xyz_from_matrix(&r)),
        Alignment::Parallel { .. } => Ok(RotationAngles::IDENTITY),
        Alignment::Antiparallel { reference, .. } => {
            Ok(euler_xyz_from_matrix(&half_turn(orthogonal_axis(reference))))
        }
    }
}

/// Like [`solve`], but refuses parallel and antiparallel inputs
///
/// Returns [`AreaSourceError::SingularRotation`] instead of resolving the
/// degenerate case, for callers that want to handle it themselves.
pub fn solve_strict(reference: Vec3, target: Vec3) -> Result<RotationAngles> {
    match align(reference, target)? {
        Alignment::Rotated(r) => Ok(euler_xyz_from_matrix(&r)),
        Alignment::Parallel { cosine } | Alignment::Antiparallel { cosine, .. } => {
            Err(AreaSourceError::SingularRotation { cosine })
        }
    }
}
