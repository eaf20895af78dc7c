use crate::Float;
use thiserror::Error;

/// Fatal configuration problems, detected before any stepping occurs.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("domain must be at least 3 cells wide and 2 cells tall, got {nx}x{ny}")]
    InvalidDimensions { nx: usize, ny: usize },

    #[error(
        "obstacle at ({cx}, {cy}) with radius {radius} lies fully outside the {nx}x{ny} domain"
    )]
    ObstacleOutsideDomain {
        cx: Float,
        cy: Float,
        radius: Float,
        nx: usize,
        ny: usize,
    },

    #[error("relaxation time tau = {tau} is unstable, tau must be greater than 0.5")]
    UnstableRelaxationTime { tau: Float },

    #[error("neither tau nor reynolds_number is set, one of the two is required")]
    MissingRelaxationTime,

    #[error("inlet velocity {velocity} is at or above the lattice sound speed {limit}")]
    InletVelocityTooLarge { velocity: Float, limit: Float },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Conditions that abort a running simulation.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(
        "inlet density reconstruction gave non-positive density {density} at row {row}, step {step}"
    )]
    NonPositiveInletDensity {
        density: Float,
        row: usize,
        step: usize,
    },

    #[error(
        "simulation diverged at step {step}: max velocity {max_velocity} exceeds limit {limit}"
    )]
    Diverged {
        step: usize,
        max_velocity: Float,
        limit: Float,
    },
}
