//! Uplink command processor.
//!
//! Routes uplink commands into the controller's input for this cycle,
//! whether they arrived over the network or from a script.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;

// Internal
use comms_if::uplink::UplinkCmd;
use flc_lib::data_store::DataStore;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute an uplink command against the data store.
pub fn exec(ds: &mut DataStore, cmd: &UplinkCmd) {
    match cmd {
        UplinkCmd::Tune(tune) => {
            info!("Recieved tune command: {:?}", tune);

            // Multiple tunes in one cycle are merged, later ones win
            ds.fuzzy_ctrl_input.tune
                .get_or_insert_with(Default::default)
                .merge(tune);
        }
        UplinkCmd::SetpointPose(pose_d) => {
            info!("Recieved pose setpoint: {:?}", pose_d);
            ds.fuzzy_ctrl_input.pose_d = Some(*pose_d);
        }
        UplinkCmd::SetpointVelocity(velocity_d) => {
            info!("Recieved velocity setpoint: {:?}", velocity_d);
            ds.fuzzy_ctrl_input.velocity_d = Some(*velocity_d);
        }
    }
}
