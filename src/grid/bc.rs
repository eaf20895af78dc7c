use super::Lattice;
use crate::error::SimulationError;
use crate::lattice::Q_WEST;
use crate::{Float, NodeType};

/// Step period of the sinusoidal transverse inlet component.
const PERTURBATION_PERIOD: Float = 100.0;

impl Lattice {
    /// Zou/He velocity inlet on the west face. The populations leaving the
    /// domain (f3, f6, f7) and the tangential set (f0, f2, f4) are known
    /// after streaming; density and the three unknowns pointing into the
    /// domain are reconstructed so the macroscopic velocity matches the
    /// prescribed profile exactly.
    pub fn zou_he_inlet(&mut self, step: usize) -> Result<(), SimulationError> {
        let uy_perturbation = if self.inlet_perturbation != 0.0 {
            self.inlet_perturbation
                * (2.0 * std::f64::consts::PI * step as Float / PERTURBATION_PERIOD).sin()
        } else {
            0.0
        };
        for j in 0..self.ny {
            let ux = self.inlet_profile[j];
            let uy = uy_perturbation;
            let node = self.get_node_mut(0, j);
            if node.node_type == NodeType::Solid {
                // Solid inlet cells are already handled by bounce-back.
                continue;
            }
            let f = &mut node.f;
            let rho = (f[0] + f[2] + f[4] + 2.0 * (f[3] + f[6] + f[7])) / (1.0 - ux);
            if rho <= 0.0 {
                return Err(SimulationError::NonPositiveInletDensity {
                    density: rho,
                    row: j,
                    step,
                });
            }
            f[1] = f[3] + (2.0 / 3.0) * rho * ux;
            f[5] = f[7] - 0.5 * (f[2] - f[4]) + 0.5 * rho * uy + (1.0 / 6.0) * rho * ux;
            f[8] = f[6] + 0.5 * (f[2] - f[4]) - 0.5 * rho * uy + (1.0 / 6.0) * rho * ux;
        }
        Ok(())
    }

    /// Zero-gradient outflow on the east face: the populations entering the
    /// domain from outside (f3, f6, f7) are copied from one cell upstream so
    /// disturbances leave without reflecting. Runs after the inlet handler,
    /// so the corner rows hold the extrapolated value last.
    pub fn outflow_outlet(&mut self) {
        let outlet = self.nx - 1;
        let upstream = self.nx - 2;
        for j in 0..self.ny {
            for q in Q_WEST {
                let value = self.nodes[upstream + self.nx * j].f[q];
                self.nodes[outlet + self.nx * j].f[q] = value;
            }
        }
    }
}
