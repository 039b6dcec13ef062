//! Main controller executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop (100 Hz):
//!         - Uplink command processing and handling
//!         - Telemetry and setpoint acquisition
//!         - Fuzzy control processing
//!         - Velocity command publication
//!
//! # Modules
//!
//! All cyclicly processed modules (e.g. `fuzzy_ctrl`) shall meet the
//! following requirements:
//!     1. Provide a public struct implementing the `util::module::State`
//!        trait.

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use flc_lib::{
    cmd_server::CmdServer,
    data_store::DataStore,
    fuzzy_ctrl::{self, Gains},
    params::FlcExecParams,
    setpoint_client::SetpointClient,
    telem_client::TelemClient,
    uplink_client::UplinkClient,
};

mod uplink_processor;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::{eyre, WrapErr}, Report};
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use comms_if::uplink::UplinkResponse;
use util::{
    archive::Archived,
    host,
    logger::{logger_init, LevelFilter},
    module::State,
    raise_error,
    script_interpreter::{PendingCmds, ScriptInterpreter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.01;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "flc_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("UAV Fuzzy Controller Executable\n");
    info!(
        "Running on: {:#?}",
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: FlcExecParams = util::params::load(
        "net.toml"
    ).wrap_err("Could not load exec params")?;

    info!("Exec parameters loaded");

    // ---- PROCESS CLI ARGUMENTS ----

    // The exec accepts an optional set of six gains followed by an optional
    // uplink script path. Without gains the built in defaults are used,
    // without a script the uplink is served over the network.
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    let (gains, script_path) = match args.len() {
        1 => (Gains::default(), None),
        2 => (Gains::default(), Some(args[1].clone())),
        7 => (
            Gains::from_cli(&args[1..7])
                .wrap_err("Could not parse the gains from the CLI")?,
            None
        ),
        8 => (
            Gains::from_cli(&args[1..7])
                .wrap_err("Could not parse the gains from the CLI")?,
            Some(args[7].clone())
        ),
        n => return Err(eyre!(
            "Expected zero or six gains followed by an optional script path, \
            found {} arguments", n - 1
        ))
    };

    info!("Starting gains: {:?}", gains);

    // ---- INITIALISE UPLINK SOURCE ----

    // Uplink source is used to determine whether we're getting commands from
    // a script or from the ground.
    let mut uplink_source = UplinkSource::None;
    let mut use_uplink_client = false;

    match script_path {
        Some(ref path) => {
            info!("Loading uplink script from \"{}\"", path);

            let si = ScriptInterpreter::new(path)
                .wrap_err("Failed to load script")?;

            info!(
                "Loaded script lasts {:.02} s and contains {} commands\n",
                si.get_duration(),
                si.get_num_cmds()
            );

            uplink_source = UplinkSource::Script(si);
        }
        None => {
            info!("No script provided, remote control via the UplinkClient will be used\n");
            use_uplink_client = true;
        }
    }

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.fuzzy_ctrl.init(
        fuzzy_ctrl::InitData {
            gains,
            cycle_period_s: CYCLE_PERIOD_S,
        },
        &session
    ).wrap_err("Failed to initialise FuzzyCtrl")?;
    info!("FuzzyCtrl init complete");

    info!("Module initialisation complete\n");

    // ---- INITIALISE NETWORK ----

    info!("Initialising network");

    let zmq_ctx = comms_if::net::zmq::Context::new();

    if use_uplink_client {
        uplink_source = UplinkSource::Remote(
            UplinkClient::new(&zmq_ctx, &exec_params.uplink_endpoint)
                .wrap_err("Failed to initialise the UplinkClient")?
        );
        info!("UplinkClient initialised");
    }

    let telem_client = TelemClient::new(&zmq_ctx, &exec_params.telem_endpoint)
        .wrap_err("Failed to initialise the TelemClient")?;
    info!("TelemClient initialised");

    let setpoint_client = SetpointClient::new(&zmq_ctx, &exec_params.setpoint_endpoint)
        .wrap_err("Failed to initialise the SetpointClient")?;
    info!("SetpointClient initialised");

    let cmd_server = CmdServer::new(&zmq_ctx, &exec_params.cmd_endpoint)
        .wrap_err("Failed to initialise the CmdServer")?;
    info!("CmdServer initialised");

    info!("Network initialisation complete");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start();

        // ---- UPLINK PROCESSING ----

        // Branch depending on the source
        match uplink_source {
            // If no source no point in continuing so break
            UplinkSource::None => raise_error!("No uplink source present"),

            UplinkSource::Remote(ref client) => {
                // Get commands until none remain
                loop {
                    match client.recieve_cmd() {
                        Ok(Some(cmd)) => {
                            uplink_processor::exec(&mut ds, &cmd);

                            match client.send_response(UplinkResponse::Ok) {
                                Ok(_) => (),
                                Err(e) => warn!("Could not respond to uplink command: {}", e)
                            }
                        }
                        Ok(None) => break,
                        Err(e) => return Err(e)
                            .wrap_err("An error occured while recieving uplink commands")
                    }
                }
            }

            UplinkSource::Script(ref mut si) =>
                match si.get_pending_cmds() {
                    PendingCmds::None => (),
                    PendingCmds::Some(cmd_vec) => {
                        for cmd in cmd_vec.iter() {
                            uplink_processor::exec(&mut ds, cmd);
                        }
                    }
                    // Exit if end of script reached
                    PendingCmds::EndOfScript => {
                        info!("End of uplink script reached, stopping");
                        break
                    }
                }
        };

        // ---- DATA INPUT ----

        // Latest odometry from the vehicle
        match telem_client.recv_latest() {
            Ok(Some(telem)) => ds.fuzzy_ctrl_input.telem = Some(telem),
            Ok(None) => (),
            Err(e) => warn!("TelemClient error: {}", e)
        }

        // Latest setpoints from the trajectory source. Setpoints recieved
        // over the uplink this cycle take priority.
        match setpoint_client.recv_latest() {
            Ok(pending) => {
                if ds.fuzzy_ctrl_input.pose_d.is_none() {
                    ds.fuzzy_ctrl_input.pose_d = pending.pose_d;
                }
                if ds.fuzzy_ctrl_input.velocity_d.is_none() {
                    ds.fuzzy_ctrl_input.velocity_d = pending.velocity_d;
                }
            }
            Err(e) => warn!("SetpointClient error: {}", e)
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        // FuzzyCtrl processing
        match ds.fuzzy_ctrl.proc(&ds.fuzzy_ctrl_input) {
            Ok((o, r)) => {
                ds.fuzzy_ctrl_output = o;
                ds.fuzzy_ctrl_status_rpt = r;
            },
            Err(e) => warn!("Error during FuzzyCtrl processing: {}", e)
        };

        // ---- COMMAND PUBLICATION ----

        if let Some(ref cmd) = ds.fuzzy_ctrl_output.cmd {
            match cmd_server.publish(cmd) {
                Ok(_) => (),
                Err(e) => warn!("CmdServer error: {}", e)
            }
        }

        // ---- WRITE ARCHIVES ----

        match ds.fuzzy_ctrl.write() {
            Ok(_) => (),
            Err(e) => warn!("Could not write the FuzzyCtrl archive: {}", e)
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(CYCLE_PERIOD_S)
            .checked_sub(cycle_dur)
        {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    info!("End of execution after {} cycles", ds.num_cycles);

    Ok(())
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Various sources for the uplink commands incoming to the exec.
#[allow(dead_code)]
enum UplinkSource {
    None,
    Remote(UplinkClient),
    Script(ScriptInterpreter)
}
