//! Areasource: turn planar mesh patches into rectangular area source emitters
//!
//! Given the vertices of a flat, roughly rectangular mesh patch, this crate
//! works out where a rectangular emitter should sit (the patch centroid), how
//! large it should be (the two edge lengths) and how it should be rotated so
//! that its reference direction points along the patch normal.
//!
//! # Main Components
//!
//! - `orientation`: rotation angles taking one direction onto another
//! - `patch`: centroid, edge lengths and normal of a planar patch
//! - `mesh`: vertex extraction from ASCII STL files
//! - `placement`: configuration and the per-patch pipeline
//!
//! # Example
//!
//! ```rust
//! use areasource::{place, PlacementConfig, Vec3};
//!
//! // A 100 mm x 200 mm inlet in the XZ plane
//! let vertices = [
//!     Vec3::new(0.0, 0.0, 0.0),
//!     Vec3::new(0.0, 0.0, 200.0),
//!     Vec3::new(100.0, 0.0, 0.0),
//!     Vec3::new(100.0, 0.0, 200.0),
//! ];
//!
//! let placement = place(&vertices, &PlacementConfig::default()).unwrap();
//! assert!((placement.scale[0] - 0.2).abs() < 1e-12);
//! assert!((placement.scale[2] - 0.1).abs() < 1e-12);
//! ```

pub mod constants;
pub mod errors;
pub mod mesh;
pub mod orientation;
pub mod patch;
pub mod placement;
pub mod vector;

// Re-export commonly used types
pub use errors::{AreaSourceError, Result};
pub use mesh::{MeshSource, StlFile};
pub use orientation::{solve, solve_strict, RotationAngles};
pub use patch::{measure, PatchDimensions, PatchMetrics};
pub use placement::{place, place_from_source, EmitterPlacement, PlacementConfig};
pub use vector::Vec3;
