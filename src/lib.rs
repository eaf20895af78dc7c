pub mod config;
pub mod error;
pub mod grid;
pub mod io;
pub mod lattice;
pub mod monitor;
pub mod post;
pub mod solver;

pub use config::Config;
pub use error::{ConfigError, SimulationError};
pub use grid::{Lattice, Node};
pub use monitor::StabilityReport;
pub use post::FlowSnapshot;
pub use solver::{RunState, RunSummary, Solver};

pub type Float = f64;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum NodeType {
    Fluid = 0,
    Solid = 1,
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::*;

    /// A channel with the cylinder of the reference scenario: center
    /// (16, 16), radius 6, tau 0.6, uniform inlet at 0.05.
    pub fn test_config(nx: usize, ny: usize) -> Config {
        Config {
            domain: DomainConfig { nx, ny },
            obstacle: ObstacleConfig {
                cx: 16.0,
                cy: 16.0,
                radius: 6.0,
            },
            physics: PhysicsConfig {
                inlet_velocity: 0.05,
                inlet_profile: InletProfile::Uniform,
                inlet_perturbation: 0.0,
                reynolds_number: None,
                tau: Some(0.6),
            },
            simulation: SimulationConfig {
                steps: 100,
                max_velocity: None,
            },
            output: OutputConfig {
                directory: "results".to_string(),
                interval: 0,
            },
        }
    }
}
