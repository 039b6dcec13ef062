//! # Uplink command module
//!
//! This module provides the uplink commands sent to the controller by the
//! ground station (or replayed from a script), and the responses returned
//! for them.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use serde_json::{self, Value};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A gain tune command.
///
/// Each field is optional and applied independently, there is no atomicity
/// across the six gains.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct TuneCmd {
    /// Proportional (position error) gain
    pub k_p: Option<f64>,

    /// Derivative (velocity error) gain
    pub k_d: Option<f64>,

    /// Fuzzy output gain
    pub k_a: Option<f64>,

    /// Fuzzy output integral gain
    pub k_b: Option<f64>,

    /// Position fuzzy-set spread parameter
    pub alpha_p: Option<f64>,

    /// Derivative fuzzy-set spread parameter
    pub alpha_d: Option<f64>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An uplink command.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub enum UplinkCmd {
    /// Update one or more controller gains
    Tune(TuneCmd),

    /// Set the desired pose directly, `(x, y, z, yaw)`
    SetpointPose([f64; 4]),

    /// Set the desired velocity directly, `(vx, vy, vz, yaw_rate)`
    SetpointVelocity([f64; 4]),
}

/// Response to an uplink command.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub enum UplinkResponse {
    /// The command was accepted
    Ok,

    /// The command could not be parsed
    Invalid,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum UplinkParseError {
    #[error("Command contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Command has an invalid type ({0})")]
    InvalidType(String),

    #[error("Command payload could not be read: {0}")]
    InvalidPayload(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TuneCmd {
    /// Merge another tune into this one.
    ///
    /// Fields set in `other` overwrite the matching fields of `self`, fields
    /// which are `None` in `other` are left untouched.
    pub fn merge(&mut self, other: &TuneCmd) {
        if other.k_p.is_some() { self.k_p = other.k_p }
        if other.k_d.is_some() { self.k_d = other.k_d }
        if other.k_a.is_some() { self.k_a = other.k_a }
        if other.k_b.is_some() { self.k_b = other.k_b }
        if other.alpha_p.is_some() { self.alpha_p = other.alpha_p }
        if other.alpha_d.is_some() { self.alpha_d = other.alpha_d }
    }
}

impl UplinkCmd {

    /// Parse a new command from a JSON packet.
    ///
    /// Packets have the shape `{"type": "TUNE"|"POSE"|"VEL", "payload": ...}`
    /// where the payload is a `TuneCmd` object for `TUNE` and a four element
    /// array for `POSE` and `VEL`.
    pub fn from_json(json_str: &str) -> Result<Self, UplinkParseError> {
        // Parse the JSON string into a value
        let val: Value = match serde_json::from_str(json_str) {
            Ok(v) => v,
            Err(e) => return Err(UplinkParseError::InvalidJson(e))
        };

        // Get the type of the command
        let cmd_type = match val["type"].as_str() {
            Some(s) => s,
            None => return Err(UplinkParseError::InvalidType(String::from(
                "Expected \"type\" to be a string"
            )))
        };

        // Deserialise the payload based on the type
        match cmd_type {
            "TUNE" => serde_json::from_value(val["payload"].clone())
                .map(UplinkCmd::Tune)
                .map_err(UplinkParseError::InvalidPayload),
            "POSE" => serde_json::from_value(val["payload"].clone())
                .map(UplinkCmd::SetpointPose)
                .map_err(UplinkParseError::InvalidPayload),
            "VEL" => serde_json::from_value(val["payload"].clone())
                .map(UplinkCmd::SetpointVelocity)
                .map_err(UplinkParseError::InvalidPayload),
            t => Err(UplinkParseError::InvalidType(
                format!("{} is not a recognised command type", t)
            ))
        }
    }

    /// Serialise the command into the JSON packet format read by
    /// [`UplinkCmd::from_json`].
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let (cmd_type, payload) = match self {
            UplinkCmd::Tune(t) => ("TUNE", serde_json::to_value(t)?),
            UplinkCmd::SetpointPose(p) => ("POSE", serde_json::to_value(p)?),
            UplinkCmd::SetpointVelocity(v) => ("VEL", serde_json::to_value(v)?),
        };

        serde_json::to_string(&serde_json::json!({
            "type": cmd_type,
            "payload": payload
        }))
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_tune() {
        let cmd = UplinkCmd::from_json(
            r#"{"type": "TUNE", "payload": {"k_p": 2.0, "alpha_d": 0.25}}"#
        ).unwrap();

        match cmd {
            UplinkCmd::Tune(t) => {
                assert_eq!(t.k_p, Some(2.0));
                assert_eq!(t.k_d, None);
                assert_eq!(t.k_a, None);
                assert_eq!(t.k_b, None);
                assert_eq!(t.alpha_p, None);
                assert_eq!(t.alpha_d, Some(0.25));
            },
            c => panic!("Expected a Tune command, got {:?}", c)
        }
    }

    #[test]
    fn test_parse_setpoints() {
        let cmd = UplinkCmd::from_json(
            r#"{"type": "POSE", "payload": [1.0, 2.0, 3.0, 0.5]}"#
        ).unwrap();

        match cmd {
            UplinkCmd::SetpointPose(p) => assert_eq!(p, [1.0, 2.0, 3.0, 0.5]),
            c => panic!("Expected a SetpointPose command, got {:?}", c)
        }

        let cmd = UplinkCmd::from_json(
            r#"{"type": "VEL", "payload": [0.0, 0.0, -0.5, 0.0]}"#
        ).unwrap();

        match cmd {
            UplinkCmd::SetpointVelocity(v) => assert_eq!(v, [0.0, 0.0, -0.5, 0.0]),
            c => panic!("Expected a SetpointVelocity command, got {:?}", c)
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let tune = TuneCmd {
            k_b: Some(5.0),
            ..Default::default()
        };

        let json = UplinkCmd::Tune(tune).to_json().unwrap();

        match UplinkCmd::from_json(&json).unwrap() {
            UplinkCmd::Tune(t) => assert_eq!(t.k_b, Some(5.0)),
            c => panic!("Expected a Tune command, got {:?}", c)
        }
    }

    #[test]
    fn test_merge() {
        let mut tune = TuneCmd {
            k_p: Some(1.0),
            k_d: Some(0.1),
            ..Default::default()
        };

        tune.merge(&TuneCmd {
            k_d: Some(0.2),
            alpha_p: Some(0.5),
            ..Default::default()
        });

        assert_eq!(tune.k_p, Some(1.0));
        assert_eq!(tune.k_d, Some(0.2));
        assert_eq!(tune.alpha_p, Some(0.5));
        assert_eq!(tune.alpha_d, None);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            UplinkCmd::from_json("not json"),
            Err(UplinkParseError::InvalidJson(_))
        ));

        assert!(matches!(
            UplinkCmd::from_json(r#"{"type": "WARP", "payload": null}"#),
            Err(UplinkParseError::InvalidType(_))
        ));

        assert!(matches!(
            UplinkCmd::from_json(r#"{"type": "POSE", "payload": [1.0]}"#),
            Err(UplinkParseError::InvalidPayload(_))
        ));
    }
}
