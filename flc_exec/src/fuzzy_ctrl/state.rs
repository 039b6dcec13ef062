//! Fuzzy control state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;
use nalgebra::Vector4;
use serde::Serialize;

// Internal
use comms_if::cmd::VelocityCmd;
use comms_if::telem::TelemSample;
use comms_if::uplink::TuneCmd;
use util::archive::{Archived, Archiver};
use util::maths::denormalize_angle;
use util::module::State;
use util::session::{self, Session};

use super::{law, FuzzyCtrlError, Gains, AXIS_X, AXIS_Y, AXIS_YAW, AXIS_Z, GATE_SENTINEL_Z_M};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Fuzzy control module state.
#[derive(Default)]
pub struct FuzzyCtrl {
    /// The current controller gains
    gains: Gains,

    /// The cycle period in seconds
    dt_s: f64,

    /// Current vehicle pose `(x, y, z, yaw)`, from telemetry
    pose: Vector4<f64>,

    /// Current vehicle velocity `(vx, vy, vz, yaw_rate)`, from telemetry
    velocity: Vector4<f64>,

    /// Desired pose `(x, y, z, yaw)`
    pose_d: Vector4<f64>,

    /// Desired velocity `(vx, vy, vz, yaw_rate)`
    velocity_d: Vector4<f64>,

    /// Accumulated pose error integral
    error_i: Vector4<f64>,

    /// Accumulated fuzzy output integral
    phi_i: Vector4<f64>,

    /// True if a telemetry sample has arrived since the last cycle
    fresh_telem: bool,

    /// The report for this cycle
    report: StatusReport,

    /// Status report archiver
    arch_report: Archiver,
}

/// Initialisation data for the fuzzy control module.
pub struct InitData {
    /// The gains to start the controller with
    pub gains: Gains,

    /// The cycle period in seconds
    pub cycle_period_s: f64,
}

/// Input data for a single cycle of processing.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputData {
    /// An odometry sample recieved this cycle, if any
    pub telem: Option<TelemSample>,

    /// A new desired pose `(x, y, z, yaw)` recieved this cycle, if any
    pub pose_d: Option<[f64; 4]>,

    /// A new desired velocity `(vx, vy, vz, yaw_rate)` recieved this cycle,
    /// if any
    pub velocity_d: Option<[f64; 4]>,

    /// A gain tune recieved this cycle, if any
    pub tune: Option<TuneCmd>,
}

/// Output data for a single cycle of processing.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputData {
    /// The velocity command for this cycle, or `None` if the controller is
    /// dormant
    pub cmd: Option<VelocityCmd>,
}

/// A report on the status of the fuzzy control module.
///
/// All fields are scalars or arrays so the report serialises to a single CSV
/// row.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusReport {
    /// Session time at which the report was archived
    pub time_s: f64,

    /// True if the desired pose gate was open this cycle
    pub gate_open: bool,

    /// True if a telemetry sample arrived this cycle
    pub fresh_telem: bool,

    /// The pose error `(x, y, z, yaw)`
    pub error: [f64; 4],

    /// The velocity error `(vx, vy, vz, yaw_rate)`
    pub error_d: [f64; 4],

    /// The saturated pose error signal
    pub sigma1: [f64; 4],

    /// The saturated velocity error signal
    pub sigma2: [f64; 4],

    /// The fuzzy law output
    pub phi_p: [f64; 4],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for FuzzyCtrl {
    type InitData = InitData;
    type InitError = FuzzyCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = FuzzyCtrlError;

    /// Initialise the fuzzy control module.
    ///
    /// Stores the starting gains and cycle period and creates the status
    /// report archive in the session's archive directory.
    fn init(&mut self, init_data: InitData, session: &Session)
        -> Result<(), FuzzyCtrlError>
    {
        self.gains = init_data.gains;
        self.dt_s = init_data.cycle_period_s;

        self.arch_report = Archiver::from_path(session, "fuzzy_ctrl_report.csv")
            .map_err(|e| FuzzyCtrlError::ArchiveInitError(format!("{}", e)))?;

        Ok(())
    }

    /// Cyclic processing of the fuzzy control module.
    ///
    /// Applies any incoming tune, telemetry and setpoints, then if the gate
    /// is open and fresh telemetry arrived this cycle synthesizes a velocity
    /// command from the fuzzy law. The fresh telemetry flag is consumed
    /// whether or not a command is produced.
    fn proc(&mut self, input_data: &InputData)
        -> Result<(OutputData, StatusReport), FuzzyCtrlError>
    {
        let mut output = OutputData::default();
        self.report = StatusReport::default();

        // Apply any incoming gain tune before this cycle's computation
        if let Some(ref tune) = input_data.tune {
            self.gains.apply(tune);
            info!("Gains updated: {:?}", self.gains);
        }

        // Latch incoming telemetry into the pose and velocity vectors
        if let Some(ref telem) = input_data.telem {
            self.pose = Vector4::new(
                telem.position_m[0],
                telem.position_m[1],
                telem.position_m[2],
                telem.yaw_rad(),
            );
            self.velocity = Vector4::new(
                telem.velocity_ms[0],
                telem.velocity_ms[1],
                telem.velocity_ms[2],
                telem.yaw_rate_rads,
            );
            self.fresh_telem = true;
        }

        // Latch incoming setpoints. The two may arrive on different cycles,
        // the controller tracks whatever pair it last saw.
        if let Some(pose_d) = input_data.pose_d {
            self.pose_d = Vector4::from(pose_d);
        }
        if let Some(velocity_d) = input_data.velocity_d {
            self.velocity_d = Vector4::from(velocity_d);
        }

        let gate_open = self.pose_d[AXIS_Z] > GATE_SENTINEL_Z_M;

        self.report.gate_open = gate_open;
        self.report.fresh_telem = self.fresh_telem;

        if gate_open && self.fresh_telem {
            // Shift the stored yaw by whole turns so the yaw error does not
            // wrap at the +/-pi boundary
            self.pose[AXIS_YAW] = denormalize_angle(
                self.pose[AXIS_YAW],
                self.pose_d[AXIS_YAW],
            );

            let error = self.pose_d - self.pose;
            let error_d = self.velocity_d - self.velocity;

            self.error_i += error * self.dt_s;

            let k_p = self.gains.k_p;
            let k_d = self.gains.k_d;

            let sigma1 = error.map(|e| law::bound(k_p * e));
            let sigma2 = error_d.map(|e| law::bound(k_d * e));

            let phi_p = sigma1.zip_map(&sigma2, law::phi);

            self.phi_i += phi_p * self.dt_s;

            let a = self.gains.alpha1 * self.gains.alpha2;

            let cmd = phi_p * self.gains.k_a
                + self.phi_i * self.gains.k_b
                + self.error_i * (1.0 - a);

            // The yaw axis takes the raw fuzzy output, the output gains and
            // integral feedback apply to the translational axes only
            output.cmd = Some(VelocityCmd {
                x_ms: cmd[AXIS_X],
                y_ms: cmd[AXIS_Y],
                z_ms: cmd[AXIS_Z],
                yaw_rate_rads: phi_p[AXIS_YAW],
            });

            self.report.error = error.into();
            self.report.error_d = error_d.into();
            self.report.sigma1 = sigma1.into();
            self.report.sigma2 = sigma2.into();
            self.report.phi_p = phi_p.into();
        }

        // The telemetry sample is consumed even if the gate was shut
        self.fresh_telem = false;

        Ok((output, self.report))
    }
}

impl Archived for FuzzyCtrl {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.report.time_s = session::get_elapsed_seconds();
        self.arch_report.serialise(self.report)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Utc;

    const DT_S: f64 = 0.01;

    /// A controller with the given gains, as if initialised without an
    /// archive.
    fn test_ctrl(gains: Gains) -> FuzzyCtrl {
        FuzzyCtrl {
            gains,
            dt_s: DT_S,
            ..Default::default()
        }
    }

    /// An odometry sample with the given pose and velocity.
    fn telem(position: [f64; 3], yaw: f64, velocity: [f64; 3], yaw_rate: f64)
        -> TelemSample
    {
        TelemSample {
            timestamp: Utc::now(),
            position_m: position,
            attitude_q: [0.0, 0.0, (yaw / 2.0).sin(), (yaw / 2.0).cos()],
            velocity_ms: velocity,
            yaw_rate_rads: yaw_rate,
        }
    }

    #[test]
    fn test_equilibrium() {
        let mut ctrl = test_ctrl(Gains::default());

        // Vehicle already at the desired pose, at rest
        let input = InputData {
            telem: Some(telem([1.0, 2.0, 3.0], 0.5, [0.0; 3], 0.0)),
            pose_d: Some([1.0, 2.0, 3.0, 0.5]),
            ..Default::default()
        };

        for _ in 0..10 {
            let (output, report) = ctrl.proc(&input).unwrap();

            let cmd = output.cmd.unwrap();

            // Yaw comes back through the quaternion so allow a small slack
            assert!(cmd.x_ms.abs() < 1e-9);
            assert!(cmd.y_ms.abs() < 1e-9);
            assert!(cmd.z_ms.abs() < 1e-9);
            assert!(cmd.yaw_rate_rads.abs() < 1e-9);

            assert!(report.gate_open);
            assert!(report.fresh_telem);
        }

        // The integrators have not wound up
        assert!(ctrl.error_i.norm() < 1e-9);
        assert!(ctrl.phi_i.norm() < 1e-9);
    }

    #[test]
    fn test_proportional_step() {
        // Unity proportional path, no derivative or fuzzy integral action
        let gains = Gains {
            k_p: 1.0,
            k_d: 0.0,
            k_a: 1.0,
            k_b: 0.0,
            alpha1: 0.0,
            alpha2: 0.0,
        };
        let mut ctrl = test_ctrl(gains);

        // Constant 0.3 m error along X, no velocity error
        let input = InputData {
            telem: Some(telem([0.0; 3], 0.0, [0.0; 3], 0.0)),
            pose_d: Some([0.3, 0.0, 0.0, 0.0]),
            ..Default::default()
        };

        for n in 1..=10 {
            let (output, report) = ctrl.proc(&input).unwrap();

            let cmd = output.cmd.unwrap();

            // sigma1 = 0.3, sigma2 = 0, so phi = 0.3, and the error
            // integral grows by 0.3 * dt each cycle
            let expected = 0.3 + 0.3 * DT_S * (n as f64);

            assert_relative_eq!(cmd.x_ms, expected, epsilon = 1e-12);
            assert_relative_eq!(cmd.y_ms, 0.0, epsilon = 1e-12);
            assert_relative_eq!(report.sigma1[AXIS_X], 0.3, epsilon = 1e-12);
            assert_relative_eq!(report.phi_p[AXIS_X], 0.3, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_saturation() {
        let mut ctrl = test_ctrl(Gains::default());

        // A very large error saturates the bounded error signal at 1
        let input = InputData {
            telem: Some(telem([0.0; 3], 0.0, [0.0; 3], 0.0)),
            pose_d: Some([100.0, 0.0, 0.0, 0.0]),
            ..Default::default()
        };

        let (output, report) = ctrl.proc(&input).unwrap();

        assert_eq!(report.sigma1[AXIS_X], 1.0);
        assert_eq!(report.phi_p[AXIS_X], 1.0);

        // The integral feedback term is unbounded however
        let expected = 0.077 * 1.0 + 7.336 * DT_S + 0.75 * 100.0 * DT_S;
        assert_relative_eq!(
            output.cmd.unwrap().x_ms, expected, epsilon = 1e-12
        );
    }

    #[test]
    fn test_yaw_bypass() {
        // Inflated output gains must not touch the yaw axis
        let gains = Gains {
            k_a: 100.0,
            k_b: 50.0,
            ..Default::default()
        };
        let mut ctrl = test_ctrl(gains);

        let input = InputData {
            telem: Some(telem([0.0; 3], 0.0, [0.0; 3], 0.0)),
            pose_d: Some([0.0, 0.0, 0.0, 0.5]),
            ..Default::default()
        };

        let (output, report) = ctrl.proc(&input).unwrap();

        assert_relative_eq!(
            output.cmd.unwrap().yaw_rate_rads,
            report.phi_p[AXIS_YAW],
            epsilon = 1e-15
        );
        assert_relative_eq!(
            report.phi_p[AXIS_YAW], 0.5, epsilon = 1e-12
        );
    }

    #[test]
    fn test_yaw_wrap() {
        let mut ctrl = test_ctrl(Gains::default());

        // Current and desired yaw on opposite sides of the wrap boundary,
        // the true separation is 2pi - 6 radians, not 6
        let input = InputData {
            telem: Some(telem([0.0; 3], 3.0, [0.0; 3], 0.0)),
            pose_d: Some([0.0, 0.0, 0.0, -3.0]),
            ..Default::default()
        };

        let (_, report) = ctrl.proc(&input).unwrap();

        assert_relative_eq!(
            report.error[AXIS_YAW],
            std::f64::consts::TAU - 6.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_gate_shut() {
        let mut ctrl = test_ctrl(Gains::default());

        // A desired altitude at or below the sentinel keeps the controller
        // dormant even with fresh telemetry
        let input = InputData {
            telem: Some(telem([0.0; 3], 0.0, [0.0; 3], 0.0)),
            pose_d: Some([0.0, 0.0, -20.0, 0.0]),
            ..Default::default()
        };

        let (output, report) = ctrl.proc(&input).unwrap();

        assert!(output.cmd.is_none());
        assert!(!report.gate_open);
        assert!(report.fresh_telem);
    }

    #[test]
    fn test_fresh_telem_consumed() {
        let mut ctrl = test_ctrl(Gains::default());

        let input = InputData {
            telem: Some(telem([0.0; 3], 0.0, [0.0; 3], 0.0)),
            pose_d: Some([0.3, 0.0, 0.0, 0.0]),
            ..Default::default()
        };

        let (output, _) = ctrl.proc(&input).unwrap();
        assert!(output.cmd.is_some());

        // No telemetry on the second cycle, no command either
        let (output, report) = ctrl.proc(&InputData::default()).unwrap();
        assert!(output.cmd.is_none());
        assert!(!report.fresh_telem);
    }

    #[test]
    fn test_setpoints_latch_independently() {
        let mut ctrl = test_ctrl(Gains::default());

        // Desired velocity arrives some cycles before the desired pose
        let (output, _) = ctrl.proc(&InputData {
            telem: Some(telem([0.0; 3], 0.0, [0.0; 3], 0.0)),
            velocity_d: Some([0.0, 1.0, 0.0, 0.0]),
            ..Default::default()
        }).unwrap();
        assert!(output.cmd.is_some());

        let (_, report) = ctrl.proc(&InputData {
            telem: Some(telem([0.0; 3], 0.0, [0.0; 3], 0.0)),
            pose_d: Some([0.3, 0.0, 0.0, 0.0]),
            ..Default::default()
        }).unwrap();

        // Both setpoints remain in force
        assert_relative_eq!(report.error[AXIS_X], 0.3, epsilon = 1e-12);
        assert_relative_eq!(report.error_d[AXIS_Y], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tune_applies_before_proc() {
        let mut ctrl = test_ctrl(Gains::default());

        let input = InputData {
            telem: Some(telem([0.0; 3], 0.0, [0.0; 3], 0.0)),
            pose_d: Some([0.3, 0.0, 0.0, 0.0]),
            tune: Some(TuneCmd {
                k_p: Some(2.0),
                ..Default::default()
            }),
            ..Default::default()
        };

        let (_, report) = ctrl.proc(&input).unwrap();

        // The tuned k_p is in force on the same cycle
        assert_relative_eq!(report.sigma1[AXIS_X], 0.6, epsilon = 1e-12);
    }
}
