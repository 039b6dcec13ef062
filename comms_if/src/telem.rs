//! # Vehicle telemetry messages

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single odometry sample from the vehicle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct TelemSample {
    /// Time at which the sample was taken
    pub timestamp: DateTime<Utc>,

    /// Position of the vehicle in the world frame.
    ///
    /// Units: meters
    pub position_m: [f64; 3],

    /// Attitude of the vehicle as a quaternion rotating the world frame into
    /// the body frame, in `(x, y, z, w)` order.
    pub attitude_q: [f64; 4],

    /// Linear velocity of the vehicle in the world frame.
    ///
    /// Units: meters/second
    pub velocity_ms: [f64; 3],

    /// Angular velocity of the vehicle about the vertical axis.
    ///
    /// Units: radians/second
    pub yaw_rate_rads: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TelemSample {
    /// Return the yaw (heading) of the vehicle in radians.
    ///
    /// This is the Z component of the ZYX Euler angle decomposition of the
    /// attitude quaternion, in the range [-pi, pi].
    pub fn yaw_rad(&self) -> f64 {
        let [x, y, z, w] = self.attitude_q;

        (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z))
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// A sample with the given yaw-only attitude
    fn sample_with_yaw(yaw_rad: f64) -> TelemSample {
        TelemSample {
            timestamp: Utc::now(),
            position_m: [0.0; 3],
            attitude_q: [0.0, 0.0, (yaw_rad / 2.0).sin(), (yaw_rad / 2.0).cos()],
            velocity_ms: [0.0; 3],
            yaw_rate_rads: 0.0,
        }
    }

    #[test]
    fn test_yaw_extraction() {
        const PI: f64 = std::f64::consts::PI;

        for &yaw in [0.0, 0.5, -0.5, PI / 2.0, -PI / 2.0, 3.0, -3.0].iter() {
            let sample = sample_with_yaw(yaw);
            assert!((sample.yaw_rad() - yaw).abs() < 1e-12);
        }
    }
}
