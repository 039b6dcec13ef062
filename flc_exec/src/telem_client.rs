//! # Telemetry client
//!
//! Subscribes to the vehicle's odometry stream and hands the most recent
//! sample to the controller each cycle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use thiserror::Error;

// Internal
use comms_if::net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions};
use comms_if::telem::TelemSample;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Client recieving odometry samples from the vehicle.
pub struct TelemClient {
    socket: MonitoredSocket,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur in the telemetry client.
#[derive(Debug, Error)]
pub enum TelemClientError {
    #[error("Could not create the telemetry socket: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not subscribe to the telemetry stream: {0}")]
    SubscribeError(zmq::Error),

    #[error("Could not recieve from the telemetry socket: {0}")]
    RecvError(zmq::Error),

    #[error("Recieved telemetry is not valid UTF-8")]
    NonUtf8Telem,

    #[error("Could not parse the recieved telemetry: {0}")]
    ParseError(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TelemClient {
    /// Create a new telemetry client connected to the given endpoint.
    ///
    /// The client does not block waiting for the vehicle, the controller
    /// stays dormant until samples start arriving.
    pub fn new(ctx: &zmq::Context, endpoint: &str) -> Result<Self, TelemClientError> {
        let socket_options = SocketOptions {
            block_on_first_connect: false,
            connect_timeout: 1000,
            recv_timeout: 0,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(ctx, zmq::SUB, socket_options, endpoint)
            .map_err(TelemClientError::SocketError)?;

        socket.set_subscribe(&[])
            .map_err(TelemClientError::SubscribeError)?;

        Ok(Self { socket })
    }

    /// Drain the socket and return the most recent sample, or `None` if no
    /// sample arrived since the last call.
    ///
    /// Samples which have been overtaken by a newer one are discarded, the
    /// controller only ever acts on the latest odometry.
    pub fn recv_latest(&self) -> Result<Option<TelemSample>, TelemClientError> {
        let mut latest = None;

        loop {
            match self.socket.recv_string(0) {
                Ok(Ok(s)) => {
                    latest = Some(
                        serde_json::from_str(&s)
                            .map_err(TelemClientError::ParseError)?
                    );
                }
                Ok(Err(_)) => return Err(TelemClientError::NonUtf8Telem),
                Err(zmq::Error::EAGAIN) => break,
                Err(e) => return Err(TelemClientError::RecvError(e)),
            }
        }

        Ok(latest)
    }
}
