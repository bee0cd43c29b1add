//! Mesh descriptions that supply patch vertices
//!
//! The placement layer only needs a list of points per patch. `MeshSource`
//! is that narrow interface; `stl` provides the file-backed implementation.

pub mod stl;

pub use self::stl::{parse_ascii_stl, read_ascii_stl, strip_color_lines, StlFile};

use crate::errors::Result;
use crate::vector::Vec3;

/// Anything that can produce the vertex list of one patch
pub trait MeshSource {
    /// Vertices in the order the patch metrics should see them
    fn vertices(&self) -> Result<Vec<Vec3>>;

    /// Human readable name used in log messages
    fn describe(&self) -> String {
        "mesh".to_string()
    }
}

impl MeshSource for Vec<Vec3> {
    fn vertices(&self) -> Result<Vec<Vec3>> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory vertices", self.len())
    }
}

impl MeshSource for [Vec3] {
    fn vertices(&self) -> Result<Vec<Vec3>> {
        Ok(self.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_source() {
        let points = vec![Vec3::new(1.0, 2.0, 3.0), Vec3::zero()];
        assert_eq!(points.vertices().unwrap(), points);
        assert_eq!(points.describe(), "2 in-memory vertices");
        assert_eq!(points[..1].vertices().unwrap(), vec![Vec3::new(1.0, 2.0, 3.0)]);
    }
}
