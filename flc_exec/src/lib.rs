//! # Controller library.
//!
//! This library allows other crates in the workspace to access items defined
//! inside the controller crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Command server - publishes velocity commands to the vehicle
pub mod cmd_server;

/// Global data store for the executable
pub mod data_store;

/// Fuzzy control module - converts pose/velocity errors into velocity commands
pub mod fuzzy_ctrl;

/// Executable parameters
pub mod params;

/// Setpoint client - recieves desired pose/velocity from the trajectory source
pub mod setpoint_client;

/// Telemetry client - recieves odometry samples from the vehicle
pub mod telem_client;

/// Uplink client - recieves gain tunes and direct setpoints from the ground
pub mod uplink_client;
