//! Area source placement
//!
//! Ties the mesh, patch and orientation modules together for one patch:
//! scale the vertices into scene units, measure the patch, then rotate the
//! emitter's reference direction onto the patch normal.
//!
//! The emitter is a rectangle whose local scale is `[major, 0, minor]` (width
//! along X, no thickness along its emission axis Y, depth along Z). Scene
//! writing is left to the caller; [`EmitterPlacement`] serializes to JSON.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constants::MM_TO_M;
use crate::errors::{io_err, AreaSourceError, Result};
use crate::mesh::MeshSource;
use crate::orientation::{solve, RotationAngles};
use crate::patch::{measure, PatchMetrics};
use crate::vector::Vec3;

/// Settings shared by every patch in a batch
///
/// All fields are optional in JSON; missing ones take the defaults below.
///
/// ```json
/// { "reference_direction": [0, 1, 0], "reverse_direction": false, "unit_scale": 0.001 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacementConfig {
    /// Direction a new emitter points along before rotation
    pub reference_direction: Vec3,
    /// Emit against the patch normal instead of along it
    pub reverse_direction: bool,
    /// Factor from mesh units to scene units (mm to m by default)
    pub unit_scale: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        PlacementConfig {
            reference_direction: Vec3::new(0.0, 1.0, 0.0),
            reverse_direction: false,
            unit_scale: MM_TO_M,
        }
    }
}

impl PlacementConfig {
    /// Parses and validates a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PlacementConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.unit_scale.is_finite() || self.unit_scale <= 0.0 {
            return Err(AreaSourceError::Config(format!(
                "unit_scale must be a positive number, got {}",
                self.unit_scale
            )));
        }
        if self.reference_direction.normalize().is_none() {
            return Err(AreaSourceError::Config(format!(
                "reference_direction {} has no direction",
                self.reference_direction
            )));
        }
        Ok(())
    }

    /// The reference direction handed to the solver, negated when reversed
    pub fn effective_reference(&self) -> Vec3 {
        if self.reverse_direction {
            -self.reference_direction
        } else {
            self.reference_direction
        }
    }
}

/// Everything needed to create one rectangular area source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmitterPlacement {
    /// Patch centroid in scene units
    pub position: Vec3,
    /// Local emitter scale `[major, 0, minor]`
    pub scale: [f64; 3],
    /// Rotation taking the reference direction onto the patch normal
    pub euler_angles: RotationAngles,
    /// Unit normal of the patch the angles were solved for
    pub normal: Vec3,
}

impl EmitterPlacement {
    pub fn from_metrics(metrics: &PatchMetrics, euler_angles: RotationAngles) -> Self {
        EmitterPlacement {
            position: metrics.centroid,
            scale: [metrics.dimensions.major, 0.0, metrics.dimensions.minor],
            euler_angles,
            normal: metrics.normal,
        }
    }
}

/// Computes the emitter placement for one patch given in mesh units
pub fn place(vertices: &[Vec3], config: &PlacementConfig) -> Result<EmitterPlacement> {
    config.validate()?;

    let scaled: Vec<Vec3> = vertices.iter().map(|v| *v * config.unit_scale).collect();
    let metrics = measure(&scaled)?;
    let euler_angles = solve(config.effective_reference(), metrics.normal)?;

    debug!(
        "Patch of {} vertices: center {}, {} x {} (area {}), normal {}, angles {:?}",
        vertices.len(),
        metrics.centroid,
        metrics.dimensions.major,
        metrics.dimensions.minor,
        metrics.dimensions.area(),
        metrics.normal,
        euler_angles.as_array()
    );

    Ok(EmitterPlacement::from_metrics(&metrics, euler_angles))
}

/// Reads the vertices from a mesh source and places an emitter on them
pub fn place_from_source<S: MeshSource + ?Sized>(
    source: &S,
    config: &PlacementConfig,
) -> Result<EmitterPlacement> {
    info!("Placing area source on {}", source.describe());
    let vertices = source.vertices()?;
    place(&vertices, config)
}
