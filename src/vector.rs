//! # Three-dimensional vector module
//!
//! `Vec3` is the value type passed between the mesh layer, the patch metrics
//! and the orientation solver. It represents either a point (a mesh vertex, a
//! patch centroid) or a direction (a patch normal, the emitter reference
//! direction); the interpretation depends on context.
//!
//! Components are stored as plain `f64` values with no implicit normalization.
//! Conversions to and from `nalgebra::Vector3<f64>` are provided for the
//! matrix work in the orientation solver.
//!
//! ## Examples
//!
//! ```rust
//! use areasource::vector::Vec3;
//!
//! let x_axis = Vec3::new(1.0, 0.0, 0.0);
//! let y_axis = Vec3::new(0.0, 1.0, 0.0);
//!
//! assert_eq!(x_axis.dot(&y_axis), 0.0);
//! assert_eq!(x_axis.cross(&y_axis), Vec3::new(0.0, 0.0, 1.0));
//! ```

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A point or direction in 3-D Euclidean space
///
/// Serialized as a plain `[x, y, z]` array so configuration files and
/// placement output stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Creates a new vector from its components
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vec3::new(0.0, 0.0, 0.0)
    }

    /// Unit vector along the given axis index (0 = X, 1 = Y, 2 = Z)
    ///
    /// # Panics
    ///
    /// Panics if `axis > 2`.
    pub fn unit_axis(axis: usize) -> Self {
        match axis {
            0 => Vec3::new(1.0, 0.0, 0.0),
            1 => Vec3::new(0.0, 1.0, 0.0),
            2 => Vec3::new(0.0, 0.0, 1.0),
            _ => panic!("axis index {axis} out of range"),
        }
    }

    /// Calculates the magnitude (length) of the vector
    ///
    /// # Examples
    ///
    /// ```rust
    /// use areasource::vector::Vec3;
    ///
    /// assert_eq!(Vec3::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    /// ```
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns a unit vector in the same direction
    ///
    /// Returns `None` when the magnitude is zero or not finite, since no
    /// direction can be recovered from such a vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use areasource::vector::Vec3;
    ///
    /// let unit = Vec3::new(3.0, 4.0, 0.0).normalize().unwrap();
    /// assert_eq!(unit, Vec3::new(0.6, 0.8, 0.0));
    /// assert!(Vec3::zero().normalize().is_none());
    /// ```
    pub fn normalize(&self) -> Option<Vec3> {
        let mag = self.magnitude();
        if mag == 0.0 || !mag.is_finite() {
            None
        } else {
            Some(*self / mag)
        }
    }

    /// Dot product with another vector
    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another vector
    ///
    /// ```text
    /// cross = (y₁*z₂ - z₁*y₂, z₁*x₂ - x₁*z₂, x₁*y₂ - y₁*x₂)
    /// ```
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Euclidean distance between two points
    pub fn distance(&self, other: &Vec3) -> f64 {
        (*self - *other).magnitude()
    }

    /// True when every component is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Arithmetic mean of a set of points, `None` for an empty slice
    pub fn mean(points: &[Vec3]) -> Option<Vec3> {
        if points.is_empty() {
            return None;
        }
        let sum = points.iter().fold(Vec3::zero(), |acc, p| acc + *p);
        Some(sum / points.len() as f64)
    }

    /// Largest absolute component difference to another vector
    pub fn max_abs_diff(&self, other: &Vec3) -> f64 {
        let d = *self - *other;
        d.x.abs().max(d.y.abs()).max(d.z.abs())
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Vec3::new(vec.x, vec.y, vec.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(arr: [f64; 3]) -> Self {
        Vec3::new(arr[0], arr[1], arr[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

// Arithmetic operations for convenience
impl std::ops::Add for Vec3 {
    type Output = Vec3;

    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, scalar: f64) -> Vec3 {
        Vec3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::Div<f64> for Vec3 {
    type Output = Vec3;

    fn div(self, scalar: f64) -> Vec3 {
        Vec3::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
