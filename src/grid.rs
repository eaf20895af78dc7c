pub mod bc;

use crate::config::Config;
use crate::error::ConfigError;
use crate::lattice::{equilibrium, C, D, OPPOSITE, Q};
use crate::{Float, NodeType};
use rayon::prelude::*;

/// Densities below this magnitude are treated as numerically vanished: the
/// velocity update skips the divide and the monitor reports the cell.
pub const DENSITY_EPSILON: Float = 1e-12;

#[derive(Clone)]
pub struct Node {
    pub node_type: NodeType,

    pub density: Float,

    pub velocity: [Float; D],

    pub f: Box<[Float; Q]>,

    pub f_eq: Box<[Float; Q]>,

    pub f_star: Box<[Float; Q]>,
}

impl Node {
    pub fn new(node_type: NodeType, density: Float, velocity: [Float; D]) -> Self {
        let f_eq = Box::new(equilibrium(density, velocity));
        Self {
            node_type,
            density,
            velocity,
            f: f_eq.clone(),
            f_star: f_eq.clone(),
            f_eq,
        }
    }

    pub fn update_density(&mut self) {
        if self.node_type == NodeType::Solid {
            return;
        }
        self.density = self.f.iter().sum();
    }

    pub fn update_velocity(&mut self) {
        if self.node_type == NodeType::Solid {
            return;
        }
        if self.density.abs() < DENSITY_EPSILON {
            // Vanished density, guarded divide. The monitor picks this up.
            self.velocity = [0.0; D];
            return;
        }
        let f = &self.f;
        self.velocity[0] = (f[1] - f[3] + f[5] - f[6] - f[7] + f[8]) / self.density;
        self.velocity[1] = (f[2] - f[4] + f[5] + f[6] - f[7] - f[8]) / self.density;
    }

    pub fn update_moments(&mut self) {
        self.update_density();
        self.update_velocity();
    }

    pub fn equilibrium(&mut self) {
        if self.node_type == NodeType::Solid {
            return;
        }
        *self.f_eq = equilibrium(self.density, self.velocity);
    }

    pub fn collision_step(&mut self, omega: Float, omega_prime: Float) {
        if self.node_type == NodeType::Solid {
            return;
        }
        for q in 0..Q {
            self.f_star[q] = omega_prime * self.f[q] + omega * self.f_eq[q];
        }
    }

    /// Full-way reversal for a stationary no-slip wall. The populations that
    /// streamed into the wall this step are reversed into the post-collision
    /// buffer, so the next streaming pass carries them back into the
    /// adjacent fluid cells.
    pub fn bounce_back(&mut self) {
        let incoming = *self.f;
        for q in 0..Q {
            self.f_star[q] = incoming[OPPOSITE[q]];
        }
    }
}

pub struct Lattice {
    pub nx: usize,
    pub ny: usize,
    pub tau: Float,
    pub omega: Float,
    pub omega_prime: Float,
    /// Prescribed horizontal inlet velocity per row of the x = 0 column.
    pub inlet_profile: Vec<Float>,
    /// Amplitude of the transverse inlet component that seeds vortex
    /// shedding. Zero keeps the run symmetric about the centerline.
    pub inlet_perturbation: Float,
    pub nodes: Vec<Node>,
}

impl Lattice {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let tau = config.tau()?;
        let omega = 1.0 / tau;
        let omega_prime = 1.0 - omega;
        let nx = config.domain.nx;
        let ny = config.domain.ny;
        let inlet_profile = config.inlet_profile();

        let obstacle = &config.obstacle;
        let r_2 = obstacle.radius * obstacle.radius;
        let mut nodes = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let dx = i as Float - obstacle.cx;
                let dy = j as Float - obstacle.cy;
                let node = if dx * dx + dy * dy <= r_2 {
                    // Solid nodes start at rest so the in-mask velocity is
                    // identically zero for the whole run.
                    Node::new(NodeType::Solid, 1.0, [0.0; D])
                } else {
                    Node::new(NodeType::Fluid, 1.0, [inlet_profile[j], 0.0])
                };
                nodes.push(node);
            }
        }

        Ok(Self {
            nx,
            ny,
            tau,
            omega,
            omega_prime,
            inlet_profile,
            inlet_perturbation: config.physics.inlet_perturbation,
            nodes,
        })
    }

    pub fn get_node(&self, i: usize, j: usize) -> &Node {
        &self.nodes[i + self.nx * j]
    }

    pub fn get_node_mut(&mut self, i: usize, j: usize) -> &mut Node {
        let index = i + self.nx * j;
        &mut self.nodes[index]
    }

    pub fn is_solid(&self, i: usize, j: usize) -> bool {
        self.get_node(i, j).node_type == NodeType::Solid
    }

    pub fn obstacle_mask(&self) -> Vec<bool> {
        self.nodes
            .iter()
            .map(|node| node.node_type == NodeType::Solid)
            .collect()
    }

    pub fn update_moments(&mut self) {
        self.nodes
            .par_iter_mut()
            .for_each(|node| node.update_moments());
    }

    pub fn equilibrium(&mut self) {
        self.nodes.par_iter_mut().for_each(|node| node.equilibrium());
    }

    pub fn collision_step(&mut self) {
        let omega = self.omega;
        let omega_prime = self.omega_prime;
        self.nodes
            .par_iter_mut()
            .for_each(|node| node.collision_step(omega, omega_prime));
    }

    /// Push streaming from the post-collision buffer into the population
    /// buffer. Both axes wrap; the y wrap is the periodic transverse
    /// boundary, while the x-wrapped slots are scratch values that the inlet
    /// and outlet handlers overwrite in the same step.
    pub fn streaming_step(&mut self) {
        for j in 0..self.ny {
            for i in 0..self.nx {
                for q in 0..Q {
                    let [cx, cy] = C[q];
                    let new_i = ((i as i32) + cx).rem_euclid(self.nx as i32) as usize;
                    let new_j = ((j as i32) + cy).rem_euclid(self.ny as i32) as usize;
                    let value = self.nodes[i + self.nx * j].f_star[q];
                    self.nodes[new_i + self.nx * new_j].f[q] = value;
                }
            }
        }
    }

    pub fn bounce_back(&mut self) {
        self.nodes
            .par_iter_mut()
            .filter(|node| node.node_type == NodeType::Solid)
            .for_each(|node| node.bounce_back());
    }
}
