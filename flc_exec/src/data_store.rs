//! # Executable data store
//!
//! The data store holds all the data used by the executable in a central
//! location, passed into each part of the cyclic processing as needed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use crate::fuzzy_ctrl;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // ----- CYCLE MANAGEMENT -----

    /// Number of completed cycles since the start of the session
    pub num_cycles: u128,

    /// Number of consecutive cycles which have overrun their period
    pub num_consec_cycle_overruns: u64,

    // ----- FUZZY CONTROL -----

    pub fuzzy_ctrl: fuzzy_ctrl::FuzzyCtrl,
    pub fuzzy_ctrl_input: fuzzy_ctrl::InputData,
    pub fuzzy_ctrl_output: fuzzy_ctrl::OutputData,
    pub fuzzy_ctrl_status_rpt: fuzzy_ctrl::StatusReport,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform cycle start operations, clearing the per-cycle items.
    pub fn cycle_start(&mut self) {
        self.fuzzy_ctrl_input = fuzzy_ctrl::InputData::default();
        self.fuzzy_ctrl_output = fuzzy_ctrl::OutputData::default();
        self.fuzzy_ctrl_status_rpt = fuzzy_ctrl::StatusReport::default();
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::cmd::VelocityCmd;

    #[test]
    fn test_cycle_start_clears_per_cycle_items() {
        let mut ds = DataStore::default();

        // Leftovers from a previous cycle
        ds.fuzzy_ctrl_input.pose_d = Some([1.0, 2.0, 3.0, 0.5]);
        ds.fuzzy_ctrl_output.cmd = Some(VelocityCmd::default());
        ds.fuzzy_ctrl_status_rpt.gate_open = true;
        ds.num_cycles = 42;
        ds.num_consec_cycle_overruns = 3;

        ds.cycle_start();

        // Per-cycle items are wiped
        assert!(ds.fuzzy_ctrl_input.pose_d.is_none());
        assert!(ds.fuzzy_ctrl_output.cmd.is_none());
        assert!(!ds.fuzzy_ctrl_status_rpt.gate_open);

        // Counters and module state persist across cycles
        assert_eq!(ds.num_cycles, 42);
        assert_eq!(ds.num_consec_cycle_overruns, 3);
    }
}
