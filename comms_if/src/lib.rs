//! # Communications interface crate.
//!
//! Provides all common communications interfaces for the software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Velocity command output by the controller
pub mod cmd;

/// Network module
pub mod net;

/// Desired trajectory setpoint messages
pub mod setpoint;

/// Telemetry (odometry) messages from the vehicle
pub mod telem;

/// Uplink commands (gain tunes and direct setpoints) and their responses
pub mod uplink;
