//! Controller gains

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use comms_if::uplink::TuneCmd;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The six tunable gains of the controller.
///
/// Applied uniformly across all four axes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Gains {
    /// Proportional (position error) gain
    pub k_p: f64,

    /// Derivative (velocity error) gain
    pub k_d: f64,

    /// Fuzzy output gain
    pub k_a: f64,

    /// Fuzzy output integral gain
    pub k_b: f64,

    /// Position fuzzy-set spread parameter
    pub alpha1: f64,

    /// Derivative fuzzy-set spread parameter
    pub alpha2: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Gains {
    fn default() -> Self {
        Self {
            k_p: 1.0,
            k_d: 0.004,
            k_a: 0.077,
            k_b: 7.336,
            alpha1: 0.5,
            alpha2: 0.5,
        }
    }
}

impl Gains {
    /// Apply a tune command, overwriting only the gains the tune carries.
    pub fn apply(&mut self, tune: &TuneCmd) {
        if let Some(k_p) = tune.k_p { self.k_p = k_p }
        if let Some(k_d) = tune.k_d { self.k_d = k_d }
        if let Some(k_a) = tune.k_a { self.k_a = k_a }
        if let Some(k_b) = tune.k_b { self.k_b = k_b }
        if let Some(alpha_p) = tune.alpha_p { self.alpha1 = alpha_p }
        if let Some(alpha_d) = tune.alpha_d { self.alpha2 = alpha_d }
    }

    /// Parse a full set of gains from six command line arguments, in the
    /// order `k_p k_d k_a k_b alpha1 alpha2`.
    pub fn from_cli(args: &[String]) -> Result<Self, std::num::ParseFloatError> {
        Ok(Self {
            k_p: args[0].parse()?,
            k_d: args[1].parse()?,
            k_a: args[2].parse()?,
            k_b: args[3].parse()?,
            alpha1: args[4].parse()?,
            alpha2: args[5].parse()?,
        })
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let gains = Gains::default();

        assert_eq!(gains.k_p, 1.0);
        assert_eq!(gains.k_d, 0.004);
        assert_eq!(gains.k_a, 0.077);
        assert_eq!(gains.k_b, 7.336);
        assert_eq!(gains.alpha1, 0.5);
        assert_eq!(gains.alpha2, 0.5);
    }

    #[test]
    fn test_apply_tune() {
        let mut gains = Gains::default();

        gains.apply(&TuneCmd {
            k_p: Some(2.0),
            alpha_d: Some(0.25),
            ..Default::default()
        });

        assert_eq!(gains.k_p, 2.0);
        assert_eq!(gains.alpha2, 0.25);

        // Unset fields are untouched
        assert_eq!(gains.k_d, 0.004);
        assert_eq!(gains.k_a, 0.077);
        assert_eq!(gains.k_b, 7.336);
        assert_eq!(gains.alpha1, 0.5);
    }

    #[test]
    fn test_from_cli() {
        let args: Vec<String> = vec!["1.5", "0.01", "0.1", "5.0", "0.4", "0.6"]
            .into_iter()
            .map(String::from)
            .collect();

        let gains = Gains::from_cli(&args).unwrap();

        assert_eq!(gains.k_p, 1.5);
        assert_eq!(gains.k_d, 0.01);
        assert_eq!(gains.k_a, 0.1);
        assert_eq!(gains.k_b, 5.0);
        assert_eq!(gains.alpha1, 0.4);
        assert_eq!(gains.alpha2, 0.6);

        let bad: Vec<String> = vec!["1.5", "x", "0.1", "5.0", "0.4", "0.6"]
            .into_iter()
            .map(String::from)
            .collect();

        assert!(Gains::from_cli(&bad).is_err());
    }
}
