use crate::grid::Lattice;
use crate::Float;

/// Read-only macroscopic fields handed to visualization and file output.
/// Row-major with x fastest, matching the node layout.
#[derive(Clone)]
pub struct FlowSnapshot {
    pub nx: usize,
    pub ny: usize,
    pub density: Vec<Float>,
    pub velocity_x: Vec<Float>,
    pub velocity_y: Vec<Float>,
    pub vorticity: Vec<Float>,
    pub mask: Vec<bool>,
}

impl FlowSnapshot {
    pub fn index(&self, i: usize, j: usize) -> usize {
        i + self.nx * j
    }

    pub fn velocity_magnitude(&self, i: usize, j: usize) -> Float {
        let n = self.index(i, j);
        (self.velocity_x[n] * self.velocity_x[n] + self.velocity_y[n] * self.velocity_y[n]).sqrt()
    }
}

impl Lattice {
    /// Snapshot of the current macroscopic fields. Moments must already be
    /// up to date with the populations (the driver refreshes them before
    /// emitting).
    pub fn snapshot(&self) -> FlowSnapshot {
        let density = self.nodes.iter().map(|node| node.density).collect();
        let velocity_x: Vec<Float> = self.nodes.iter().map(|node| node.velocity[0]).collect();
        let velocity_y: Vec<Float> = self.nodes.iter().map(|node| node.velocity[1]).collect();
        let mask = self.obstacle_mask();
        let vorticity = vorticity(&velocity_x, &velocity_y, self.nx, self.ny, &mask);
        FlowSnapshot {
            nx: self.nx,
            ny: self.ny,
            density,
            velocity_x,
            velocity_y,
            vorticity,
            mask,
        }
    }
}

/// Curl of the velocity field, w = dv/dx - du/dy, by central differences.
/// Domain-edge cells fall back to one-sided differences; masked cells are
/// reported as zero.
pub fn vorticity(
    velocity_x: &[Float],
    velocity_y: &[Float],
    nx: usize,
    ny: usize,
    mask: &[bool],
) -> Vec<Float> {
    let at = |i: usize, j: usize| i + nx * j;
    let mut curl = vec![0.0; nx * ny];
    for j in 0..ny {
        for i in 0..nx {
            if mask[at(i, j)] {
                continue;
            }
            let dv_dx = if i == 0 {
                velocity_y[at(1, j)] - velocity_y[at(0, j)]
            } else if i == nx - 1 {
                velocity_y[at(nx - 1, j)] - velocity_y[at(nx - 2, j)]
            } else {
                0.5 * (velocity_y[at(i + 1, j)] - velocity_y[at(i - 1, j)])
            };
            let du_dy = if j == 0 {
                velocity_x[at(i, 1)] - velocity_x[at(i, 0)]
            } else if j == ny - 1 {
                velocity_x[at(i, ny - 1)] - velocity_x[at(i, ny - 2)]
            } else {
                0.5 * (velocity_x[at(i, j + 1)] - velocity_x[at(i, j - 1)])
            };
            curl[at(i, j)] = dv_dx - du_dy;
        }
    }
    curl
}
