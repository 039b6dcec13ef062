//! Interactive uplink console.
//!
//! Issues commands directly to the controller exec over the uplink
//! request/reply link. Supported commands:
//!
//!     tune <gain> <value>          update a single controller gain
//!     pose <x> <y> <z> <yaw>       set the desired pose
//!     vel <vx> <vy> <vz> <rate>    set the desired velocity
//!     exit                         quit the console

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::{eyre, WrapErr}, Report};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::env;

// Internal
use comms_if::net::{zmq, MonitoredSocket, SocketOptions};
use comms_if::uplink::{TuneCmd, UplinkCmd};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const PROMPT: &str = "uplink $ ";

/// Default endpoint of the exec's uplink server
const DEFAULT_ENDPOINT: &str = "tcp://localhost:5022";

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // The endpoint may be overriden with a single CLI argument
    let args: Vec<String> = env::args().collect();
    let endpoint = match args.len() {
        1 => DEFAULT_ENDPOINT.to_string(),
        2 => args[1].clone(),
        n => return Err(eyre!(
            "Expected at most one argument (the uplink endpoint), found {}",
            n - 1
        ))
    };

    // Connect the request socket to the exec
    let ctx = zmq::Context::new();
    let socket_options = SocketOptions {
        block_on_first_connect: false,
        connect_timeout: 1000,
        recv_timeout: 1000,
        send_timeout: 1000,
        req_correlate: true,
        req_relaxed: true,
        ..Default::default()
    };

    let socket = MonitoredSocket::new(&ctx, zmq::REQ, socket_options, &endpoint)
        .wrap_err("Could not create the uplink socket")?;

    println!("Uplink console connected to {}", endpoint);

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(PROMPT);
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;

                let line = line.trim();
                if line.is_empty() {
                    continue
                }
                if line == "exit" || line == "quit" {
                    break
                }

                match parse(line) {
                    Ok(cmd) => send(&socket, &cmd),
                    Err(e) => println!("{}", e)
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Unhandled error: {:?}", err);
                break
            }
        }
    }

    println!("Exiting...");

    Ok(())
}

/// Parse a console line into an uplink command.
fn parse(line: &str) -> Result<UplinkCmd, String> {
    let split: Vec<&str> = line.split_whitespace().collect();

    match split[0] {
        "tune" => {
            if split.len() != 3 {
                return Err("Usage: tune <gain> <value>".into())
            }

            let value: f64 = split[2].parse()
                .map_err(|_| format!("\"{}\" is not a number", split[2]))?;

            let mut tune = TuneCmd::default();
            match split[1] {
                "k_p" => tune.k_p = Some(value),
                "k_d" => tune.k_d = Some(value),
                "k_a" => tune.k_a = Some(value),
                "k_b" => tune.k_b = Some(value),
                "alpha_p" => tune.alpha_p = Some(value),
                "alpha_d" => tune.alpha_d = Some(value),
                g => return Err(format!("\"{}\" is not a known gain", g))
            }

            Ok(UplinkCmd::Tune(tune))
        }
        "pose" | "vel" => {
            if split.len() != 5 {
                return Err(format!("Usage: {} <a> <b> <c> <d>", split[0]))
            }

            let mut vals = [0f64; 4];
            for (i, s) in split[1..5].iter().enumerate() {
                vals[i] = s.parse()
                    .map_err(|_| format!("\"{}\" is not a number", s))?;
            }

            match split[0] {
                "pose" => Ok(UplinkCmd::SetpointPose(vals)),
                _ => Ok(UplinkCmd::SetpointVelocity(vals))
            }
        }
        c => Err(format!("\"{}\" is not a known command", c))
    }
}

/// Send a command to the exec and print its response.
fn send(socket: &MonitoredSocket, cmd: &UplinkCmd) {
    let json = match cmd.to_json() {
        Ok(j) => j,
        Err(e) => {
            println!("Could not serialise the command: {}", e);
            return
        }
    };

    if let Err(e) = socket.send(&json as &str, 0) {
        println!("Could not send the command: {}", e);
        return
    }

    match socket.recv_string(0) {
        Ok(Ok(response)) => println!("{}", response),
        Ok(Err(_)) => println!("Recieved a non UTF-8 response"),
        Err(e) => println!("No response from the exec: {}", e)
    }
}
