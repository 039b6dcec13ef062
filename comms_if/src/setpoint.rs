//! # Desired trajectory setpoint messages

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A setpoint published by the trajectory source.
///
/// Desired pose and desired velocity arrive as two independent messages, so
/// the pair held by the controller may be transiently inconsistent until the
/// matching message arrives.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub enum SetpointMsg {
    /// Desired pose as `(x, y, z, yaw)`.
    ///
    /// Units: meters for the translational components, radians for yaw
    Pose([f64; 4]),

    /// Desired velocity as `(vx, vy, vz, yaw_rate)`.
    ///
    /// Units: meters/second for the translational components, radians/second
    /// for the yaw rate
    Velocity([f64; 4]),
}
