//! Constants module for patch and orientation calculations

use std::f64::consts::PI;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;

// Tolerances
/// Below this sine the reference and target directions are treated as parallel
pub const SINGULARITY_EPSILON: f64 = 1e-6;
/// Smallest vector magnitude accepted as a direction
pub const MIN_VECTOR_NORM: f64 = 1e-12;
/// Smallest sine between the two edges of the first patch triangle
pub const DEGENERATE_SINE: f64 = 1e-9;

// Units
/// Millimeters to meters, the scale mesh exporters usually need
pub const MM_TO_M: f64 = 1e-3;
