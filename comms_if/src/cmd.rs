//! # Velocity command messages

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The velocity command output by the controller, to be executed by the
/// vehicle's velocity tracker.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct VelocityCmd {
    /// Commanded velocity along the world X axis.
    ///
    /// Units: meters/second
    pub x_ms: f64,

    /// Commanded velocity along the world Y axis.
    ///
    /// Units: meters/second
    pub y_ms: f64,

    /// Commanded velocity along the world Z axis.
    ///
    /// Units: meters/second
    pub z_ms: f64,

    /// Commanded yaw rate.
    ///
    /// Units: radians/second
    pub yaw_rate_rads: f64,
}
