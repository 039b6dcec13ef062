//! # Setpoint client
//!
//! Subscribes to the trajectory source's setpoint stream. Desired pose and
//! desired velocity arrive as independent messages and are latched
//! independently by the controller.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use thiserror::Error;

// Internal
use comms_if::net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions};
use comms_if::setpoint::SetpointMsg;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Client recieving desired pose and velocity from the trajectory source.
pub struct SetpointClient {
    socket: MonitoredSocket,
}

/// The setpoints recieved during one cycle.
///
/// Either or both may be `None` if no message of that kind arrived.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingSetpoints {
    /// The most recent desired pose, `(x, y, z, yaw)`
    pub pose_d: Option<[f64; 4]>,

    /// The most recent desired velocity, `(vx, vy, vz, yaw_rate)`
    pub velocity_d: Option<[f64; 4]>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur in the setpoint client.
#[derive(Debug, Error)]
pub enum SetpointClientError {
    #[error("Could not create the setpoint socket: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not subscribe to the setpoint stream: {0}")]
    SubscribeError(zmq::Error),

    #[error("Could not recieve from the setpoint socket: {0}")]
    RecvError(zmq::Error),

    #[error("Recieved setpoint is not valid UTF-8")]
    NonUtf8Setpoint,

    #[error("Could not parse the recieved setpoint: {0}")]
    ParseError(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SetpointClient {
    /// Create a new setpoint client connected to the given endpoint.
    pub fn new(ctx: &zmq::Context, endpoint: &str) -> Result<Self, SetpointClientError> {
        let socket_options = SocketOptions {
            block_on_first_connect: false,
            connect_timeout: 1000,
            recv_timeout: 0,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(ctx, zmq::SUB, socket_options, endpoint)
            .map_err(SetpointClientError::SocketError)?;

        socket.set_subscribe(&[])
            .map_err(SetpointClientError::SubscribeError)?;

        Ok(Self { socket })
    }

    /// Drain the socket and return the most recent setpoint of each kind
    /// recieved since the last call.
    pub fn recv_latest(&self) -> Result<PendingSetpoints, SetpointClientError> {
        let mut pending = PendingSetpoints::default();

        loop {
            match self.socket.recv_string(0) {
                Ok(Ok(s)) => {
                    let msg: SetpointMsg = serde_json::from_str(&s)
                        .map_err(SetpointClientError::ParseError)?;

                    match msg {
                        SetpointMsg::Pose(p) => pending.pose_d = Some(p),
                        SetpointMsg::Velocity(v) => pending.velocity_d = Some(v),
                    }
                }
                Ok(Err(_)) => return Err(SetpointClientError::NonUtf8Setpoint),
                Err(zmq::Error::EAGAIN) => break,
                Err(e) => return Err(SetpointClientError::RecvError(e)),
            }
        }

        Ok(pending)
    }
}
