use crate::error::ConfigError;
use crate::lattice::CS;
use crate::Float;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub domain: DomainConfig,
    pub obstacle: ObstacleConfig,
    pub physics: PhysicsConfig,
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    pub nx: usize,
    pub ny: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleConfig {
    pub cx: Float,
    pub cy: Float,
    pub radius: Float,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Peak inlet speed in lattice units.
    pub inlet_velocity: Float,
    #[serde(default)]
    pub inlet_profile: InletProfile,
    /// Transverse sinusoidal inlet component that seeds the wake
    /// instability. Zero keeps the inlet strictly horizontal.
    #[serde(default)]
    pub inlet_perturbation: Float,
    pub reynolds_number: Option<Float>,
    pub tau: Option<Float>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InletProfile {
    #[default]
    Uniform,
    Parabolic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub steps: usize,
    /// Hard divergence limit on the velocity magnitude. Defaults to the
    /// lattice sound speed.
    pub max_velocity: Option<Float>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: String,
    /// Emit a snapshot every this many steps. Zero disables output.
    #[serde(default)]
    pub interval: usize,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // The outflow extrapolation reads one column upstream and the
        // vorticity stencil reads both neighbors, so the domain needs at
        // least three columns and two rows.
        if self.domain.nx < 3 || self.domain.ny < 2 {
            return Err(ConfigError::InvalidDimensions {
                nx: self.domain.nx,
                ny: self.domain.ny,
            });
        }
        let obstacle = &self.obstacle;
        let outside_x = obstacle.cx + obstacle.radius < 0.0
            || obstacle.cx - obstacle.radius > (self.domain.nx - 1) as Float;
        let outside_y = obstacle.cy + obstacle.radius < 0.0
            || obstacle.cy - obstacle.radius > (self.domain.ny - 1) as Float;
        if outside_x || outside_y {
            return Err(ConfigError::ObstacleOutsideDomain {
                cx: obstacle.cx,
                cy: obstacle.cy,
                radius: obstacle.radius,
                nx: self.domain.nx,
                ny: self.domain.ny,
            });
        }
        if self.physics.inlet_velocity.abs() >= CS {
            return Err(ConfigError::InletVelocityTooLarge {
                velocity: self.physics.inlet_velocity,
                limit: CS,
            });
        }
        let tau = self.tau()?;
        if tau <= 0.5 {
            return Err(ConfigError::UnstableRelaxationTime { tau });
        }
        Ok(())
    }

    /// Relaxation time, either given directly or derived from the Reynolds
    /// number through nu = u_in * r / Re and tau = 3 nu + 1/2.
    pub fn tau(&self) -> Result<Float, ConfigError> {
        if let Some(tau) = self.physics.tau {
            return Ok(tau);
        }
        match self.physics.reynolds_number {
            Some(reynolds) => {
                let viscosity =
                    self.physics.inlet_velocity * self.obstacle.radius / reynolds;
                Ok(3.0 * viscosity + 0.5)
            }
            None => Err(ConfigError::MissingRelaxationTime),
        }
    }

    /// Kinematic viscosity in lattice units, nu = (tau - 1/2) / 3.
    pub fn viscosity(&self) -> Result<Float, ConfigError> {
        Ok((self.tau()? - 0.5) / 3.0)
    }

    pub fn divergence_limit(&self) -> Float {
        self.simulation.max_velocity.unwrap_or(CS)
    }

    /// Prescribed inlet velocity for each row of the inlet column.
    pub fn inlet_profile(&self) -> Vec<Float> {
        let ny = self.domain.ny;
        let u_max = self.physics.inlet_velocity;
        match self.physics.inlet_profile {
            InletProfile::Uniform => vec![u_max; ny],
            InletProfile::Parabolic => {
                let height = (ny - 1) as Float;
                (0..ny)
                    .map(|j| {
                        let y = j as Float / height;
                        4.0 * u_max * y * (1.0 - y)
                    })
                    .collect()
            }
        }
    }
}
