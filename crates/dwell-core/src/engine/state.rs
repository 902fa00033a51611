use nalgebra::Point3;
use std::fmt;

/// Lifecycle phase of the sampling driver.
///
/// Phases advance strictly in order; no transition skips a predecessor.
/// Calling a driver operation out of order is a fatal configuration error,
/// not a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Uninitialized,
    PositionsReady,
    SystemBuilt,
    IntegratorReady,
    Running,
    Done,
}

impl fmt::Display for DriverPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverPhase::Uninitialized => "Uninitialized",
            DriverPhase::PositionsReady => "PositionsReady",
            DriverPhase::SystemBuilt => "SystemBuilt",
            DriverPhase::IntegratorReady => "IntegratorReady",
            DriverPhase::Running => "Running",
            DriverPhase::Done => "Done",
        };
        write!(f, "{}", name)
    }
}

/// One recorded snapshot of the ensemble: the xy projection of every
/// particle position at the start of an iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub iteration: usize,
    pub points: Vec<(f64, f64)>,
}

/// The outcome of a completed sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingResult {
    /// Snapshots recorded at the start of each iteration, in order.
    pub frames: Vec<Frame>,
    /// Full 3D positions from the last state query of the run. For a
    /// zero-iteration run this is the initial placement.
    pub final_positions: Vec<Point3<f64>>,
}
