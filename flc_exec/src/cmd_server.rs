//! # Command server
//!
//! Publishes the velocity commands produced by the controller for the
//! vehicle's velocity tracker to execute.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use thiserror::Error;

// Internal
use comms_if::cmd::VelocityCmd;
use comms_if::net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Server publishing velocity commands to the vehicle.
pub struct CmdServer {
    socket: MonitoredSocket,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur in the command server.
#[derive(Debug, Error)]
pub enum CmdServerError {
    #[error("Could not create the command socket: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not serialise the command: {0}")]
    SerialiseError(serde_json::Error),

    #[error("Could not send the command: {0}")]
    SendError(zmq::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CmdServer {
    /// Create a new command server bound to the given endpoint.
    pub fn new(ctx: &zmq::Context, endpoint: &str) -> Result<Self, CmdServerError> {
        let socket_options = SocketOptions {
            bind: true,
            block_on_first_connect: false,
            send_timeout: 100,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(ctx, zmq::PUB, socket_options, endpoint)
            .map_err(CmdServerError::SocketError)?;

        Ok(Self { socket })
    }

    /// Publish a velocity command.
    pub fn publish(&self, cmd: &VelocityCmd) -> Result<(), CmdServerError> {
        let json = serde_json::to_string(cmd)
            .map_err(CmdServerError::SerialiseError)?;

        self.socket.send(&json as &str, 0)
            .map_err(CmdServerError::SendError)
    }
}
