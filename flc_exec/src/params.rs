//! # Executable parameters
//!
//! Loaded from `params/net.toml` under the software root at startup.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the controller executable.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FlcExecParams {
    /// Endpoint of the vehicle's odometry publisher
    pub telem_endpoint: String,

    /// Endpoint of the trajectory source's setpoint publisher
    pub setpoint_endpoint: String,

    /// Endpoint to bind the ground station uplink server to
    pub uplink_endpoint: String,

    /// Endpoint to bind the velocity command publisher to
    pub cmd_endpoint: String,
}
