//! Fuzzy control module
//!
//! A double-input interval type-2 fuzzy logic position controller. Each cycle
//! the module combines the saturated pose and velocity errors through a
//! sliding-mode fuzzy law and synthesizes a four axis velocity command.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod gains;
pub mod law;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use gains::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Index of the X axis in the controller's 4-vectors.
pub const AXIS_X: usize = 0;

/// Index of the Y axis in the controller's 4-vectors.
pub const AXIS_Y: usize = 1;

/// Index of the Z axis in the controller's 4-vectors.
pub const AXIS_Z: usize = 2;

/// Index of the yaw axis in the controller's 4-vectors.
pub const AXIS_YAW: usize = 3;

/// Desired-pose altitude above which the controller will compute commands.
///
/// The zero-initialised desired pose already satisfies this, so in practice
/// it is the fresh-telemetry flag which holds the controller dormant before
/// the first odometry sample arrives.
pub const GATE_SENTINEL_Z_M: f64 = -10.0;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during FuzzyCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum FuzzyCtrlError {
    #[error("Could not initialise the status report archive: {0}")]
    ArchiveInitError(String),
}
