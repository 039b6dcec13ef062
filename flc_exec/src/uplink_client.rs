//! # Uplink client
//!
//! Serves the ground station's request/reply link. Each request carries one
//! uplink command, the reply reports whether it was accepted.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;
use thiserror::Error;

// Internal
use comms_if::net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions};
use comms_if::uplink::{UplinkCmd, UplinkResponse};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Client recieving uplink commands from the ground station.
pub struct UplinkClient {
    socket: MonitoredSocket,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur in the uplink client.
#[derive(Debug, Error)]
pub enum UplinkClientError {
    #[error("Could not create the uplink socket: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not recieve from the uplink socket: {0}")]
    RecvError(zmq::Error),

    #[error("Could not send the uplink response: {0}")]
    SendError(zmq::Error),

    #[error("Could not serialise the uplink response: {0}")]
    SerialiseError(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl UplinkClient {
    /// Create a new uplink client bound to the given endpoint.
    pub fn new(ctx: &zmq::Context, endpoint: &str) -> Result<Self, UplinkClientError> {
        let socket_options = SocketOptions {
            bind: true,
            block_on_first_connect: false,
            recv_timeout: 0,
            send_timeout: 100,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(ctx, zmq::REP, socket_options, endpoint)
            .map_err(UplinkClientError::SocketError)?;

        Ok(Self { socket })
    }

    /// Recieve a pending uplink command, if any.
    ///
    /// Unparsable requests are answered with an `Invalid` response here so
    /// the request/reply cadence of the link is preserved, and `None` is
    /// returned. Valid commands must be answered by the caller with
    /// [`UplinkClient::send_response`].
    pub fn recieve_cmd(&self) -> Result<Option<UplinkCmd>, UplinkClientError> {
        let req = match self.socket.recv_string(0) {
            Ok(Ok(s)) => s,
            Ok(Err(_)) => {
                warn!("Recieved a non UTF-8 uplink request");
                self.send_response(UplinkResponse::Invalid)?;
                return Ok(None)
            }
            Err(zmq::Error::EAGAIN) => return Ok(None),
            Err(e) => return Err(UplinkClientError::RecvError(e)),
        };

        match UplinkCmd::from_json(&req) {
            Ok(cmd) => Ok(Some(cmd)),
            Err(e) => {
                warn!("Recieved an invalid uplink command: {}", e);
                self.send_response(UplinkResponse::Invalid)?;
                Ok(None)
            }
        }
    }

    /// Send a response to the last recieved command.
    pub fn send_response(&self, response: UplinkResponse) -> Result<(), UplinkClientError> {
        let json = serde_json::to_string(&response)
            .map_err(UplinkClientError::SerialiseError)?;

        self.socket.send(&json as &str, 0)
            .map_err(UplinkClientError::SendError)
    }
}
