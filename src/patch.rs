//! Planar patch metrics
//!
//! Measures a planar, roughly rectangular mesh patch: where its center is, how
//! large its two edges are and which way it faces.
//!
//! The measurements are heuristics that match how exporters lay out a single
//! rectangular face:
//!
//! - the centroid is the mean of *every* vertex, which equals the rectangle
//!   center only for a single quad or a symmetric triangulation;
//! - the edge lengths come from the first three vertices alone, assumed to be
//!   a right-angled corner of the rectangle (the longest of the three pairwise
//!   distances is the diagonal and is dropped);
//! - the normal follows the winding of those first three vertices, so it may
//!   point into the surface rather than out of it.

use serde::{Deserialize, Serialize};

use crate::constants::DEGENERATE_SINE;
use crate::errors::{AreaSourceError, Result};
use crate::vector::Vec3;

/// The two in-plane edge lengths of a patch, `minor <= major`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatchDimensions {
    pub major: f64,
    pub minor: f64,
}

impl PatchDimensions {
    /// Builds dimensions from two edge lengths in any order
    pub fn new(a: f64, b: f64) -> Self {
        PatchDimensions {
            major: a.max(b),
            minor: a.min(b),
        }
    }

    /// Area of the emitter rectangle, `major * minor`
    pub fn area(&self) -> f64 {
        self.major * self.minor
    }
}

/// Centroid, edge lengths and unit normal of a planar patch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatchMetrics {
    pub centroid: Vec3,
    pub dimensions: PatchDimensions,
    /// Unit normal, sign set by the winding of the first three vertices
    pub normal: Vec3,
}

impl PatchMetrics {
    /// The same patch seen from the other side
    pub fn flipped(&self) -> Self {
        PatchMetrics {
            normal: -self.normal,
            ..*self
        }
    }
}

/// Measures a patch from its vertex list
///
/// Requires at least three vertices, all finite, and a first triangle with
/// non-zero area. Otherwise returns [`AreaSourceError::DegeneratePatch`].
///
/// # Examples
///
/// ```rust
/// use areasource::patch::measure;
/// use areasource::vector::Vec3;
///
/// let metrics = measure(&[
///     Vec3::new(0.0, 0.0, 0.0),
///     Vec3::new(3.0, 0.0, 0.0),
///     Vec3::new(0.0, 4.0, 0.0),
/// ])
/// .unwrap();
///
/// assert_eq!(metrics.dimensions.major, 4.0);
/// assert_eq!(metrics.dimensions.minor, 3.0);
/// assert_eq!(metrics.normal, Vec3::new(0.0, 0.0, 1.0));
/// ```
pub fn measure(vertices: &[Vec3]) -> Result<PatchMetrics> {
    let (v0, v1, v2) = match vertices {
        [v0, v1, v2, ..] => (*v0, *v1, *v2),
        _ => {
            return Err(AreaSourceError::DegeneratePatch(format!(
                "need at least 3 vertices, got {}",
                vertices.len()
            )))
        }
    };

    if let Some(i) = vertices.iter().position(|v| !v.is_finite()) {
        return Err(AreaSourceError::DegeneratePatch(format!(
            "vertex {i} is not finite"
        )));
    }

    let centroid = Vec3::mean(vertices).unwrap_or_default();

    let mut lengths = [v0.distance(&v1), v1.distance(&v2), v0.distance(&v2)];
    lengths.sort_by(f64::total_cmp);
    let dimensions = PatchDimensions {
        major: lengths[1],
        minor: lengths[0],
    };

    let normal = triangle_normal(v0, v1, v2)?;

    Ok(PatchMetrics {
        centroid,
        dimensions,
        normal,
    })
}

/// Unit normal of a triangle, `(v1 - v0) x (v2 - v0)` normalized
fn triangle_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Result<Vec3> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let cross = e1.cross(&e2);

    let edge_product = e1.magnitude() * e2.magnitude();
    if edge_product == 0.0 || cross.magnitude() / edge_product < DEGENERATE_SINE {
        return Err(AreaSourceError::DegeneratePatch(
            "first three vertices are collinear or coincident".to_string(),
        ));
    }

    cross.normalize().ok_or_else(|| {
        AreaSourceError::DegeneratePatch("normal of first triangle is undefined".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_right_triangle_dimensions() {
        let metrics = measure(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
        ])
        .unwrap();

        assert_eq!(metrics.dimensions, PatchDimensions::new(3.0, 4.0));
        assert_eq!(metrics.dimensions.major, 4.0);
        assert_eq!(metrics.dimensions.minor, 3.0);
        assert_eq!(metrics.normal, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_dimensions_order_and_area() {
        let dims = PatchDimensions::new(0.1, 0.3);
        assert_eq!(dims, PatchDimensions::new(0.3, 0.1));
        assert_eq!(dims.major, 0.3);
        assert_relative_eq!(dims.area(), 0.03, epsilon = 1e-15);
        assert_eq!(PatchDimensions::new(3.0, 4.0).area(), 12.0);
    }

    #[test]
    fn test_winding_sets_normal_sign() {
        let metrics = measure(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(metrics.normal, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(metrics.flipped().normal, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(metrics.flipped().dimensions, metrics.dimensions);
    }

    #[test]
    fn test_quad_centroid() {
        let metrics = measure(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ])
        .unwrap();

        assert_eq!(metrics.centroid, Vec3::new(1.0, 0.5, 0.0));
        // First three vertices: edges 2 and 1, diagonal sqrt(5) dropped
        assert_relative_eq!(metrics.dimensions.major, 2.0);
        assert_relative_eq!(metrics.dimensions.minor, 1.0);
    }

    #[test]
    fn test_centroid_uses_every_vertex() {
        // An extra interior vertex pulls the mean away from the rectangle center
        let metrics = measure(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
        ])
        .unwrap();
        assert_relative_eq!(metrics.centroid.x, 0.9);
        assert_relative_eq!(metrics.centroid.y, 0.9);
    }

    #[test]
    fn test_tilted_patch_normal_is_unit_and_orthogonal() {
        let v0 = Vec3::new(1.0, 1.0, 1.0);
        let v1 = v0 + Vec3::new(0.3, 0.0, 0.4);
        let v2 = v0 + Vec3::new(0.0, 0.2, 0.0);
        let metrics = measure(&[v0, v1, v2]).unwrap();

        assert_relative_eq!(metrics.normal.magnitude(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(metrics.normal.dot(&(v1 - v0)), 0.0, epsilon = 1e-12);
        assert_relative_eq!(metrics.normal.dot(&(v2 - v0)), 0.0, epsilon = 1e-12);
        assert_relative_eq!(metrics.dimensions.major, 0.5, epsilon = 1e-12);
        assert_relative_eq!(metrics.dimensions.minor, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_too_few_vertices() {
        for vertices in [
            vec![],
            vec![Vec3::zero()],
            vec![Vec3::zero(), Vec3::new(1.0, 0.0, 0.0)],
        ] {
            assert!(matches!(
                measure(&vertices),
                Err(AreaSourceError::DegeneratePatch(_))
            ));
        }
    }

    #[test]
    fn test_collinear_first_triangle() {
        let result = measure(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]);
        assert!(matches!(result, Err(AreaSourceError::DegeneratePatch(_))));

        let coincident = measure(&[Vec3::zero(), Vec3::zero(), Vec3::new(0.0, 1.0, 0.0)]);
        assert!(matches!(
            coincident,
            Err(AreaSourceError::DegeneratePatch(_))
        ));
    }

    #[test]
    fn test_small_patch_is_not_degenerate() {
        // A 1 mm x 2 mm patch expressed in meters
        let metrics = measure(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.002),
            Vec3::new(0.001, 0.0, 0.0),
        ])
        .unwrap();
        assert_relative_eq!(metrics.dimensions.major, 0.002);
        assert_relative_eq!(metrics.dimensions.minor, 0.001);
        assert_relative_eq!(metrics.normal.y.abs(), 1.0);
    }

    #[test]
    fn test_non_finite_vertex() {
        let result = measure(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(f64::NAN, 0.0, 0.0),
        ]);
        assert!(matches!(result, Err(AreaSourceError::DegeneratePatch(_))));
    }
}
