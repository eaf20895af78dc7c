use crate::grid::{Lattice, DENSITY_EPSILON};
use crate::lattice::Q;
use crate::{Float, NodeType};
use rayon::prelude::*;

/// Per-step numerical health counters. Negative populations and near-zero
/// densities are quality regressions that are reported but tolerated;
/// non-finite populations and super-sonic velocities are fatal and the
/// driver escalates them.
#[derive(Debug, Clone, Copy, Default)]
pub struct StabilityReport {
    pub step: usize,
    pub negative_populations: usize,
    pub non_finite_populations: usize,
    pub near_zero_densities: usize,
    pub max_velocity: Float,
}

impl StabilityReport {
    pub fn is_clean(&self) -> bool {
        self.negative_populations == 0
            && self.non_finite_populations == 0
            && self.near_zero_densities == 0
    }
}

/// Full-grid scan over the fluid cells. Moments must be in sync with the
/// populations.
pub fn scan(lattice: &Lattice, step: usize) -> StabilityReport {
    let (negative, non_finite, near_zero, max_velocity) = lattice
        .nodes
        .par_iter()
        .filter(|node| node.node_type == NodeType::Fluid)
        .map(|node| {
            let mut negative = 0;
            let mut non_finite = 0;
            for q in 0..Q {
                if !node.f[q].is_finite() {
                    non_finite += 1;
                } else if node.f[q] < 0.0 {
                    negative += 1;
                }
            }
            let near_zero = usize::from(node.density.abs() < DENSITY_EPSILON);
            let velocity =
                (node.velocity[0] * node.velocity[0] + node.velocity[1] * node.velocity[1]).sqrt();
            (negative, non_finite, near_zero, velocity)
        })
        .reduce(
            || (0, 0, 0, 0.0),
            |a, b| (a.0 + b.0, a.1 + b.1, a.2 + b.2, Float::max(a.3, b.3)),
        );
    StabilityReport {
        step,
        negative_populations: negative,
        non_finite_populations: non_finite,
        near_zero_densities: near_zero,
        max_velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Lattice;
    use crate::test_support::test_config;

    fn fresh_lattice() -> Lattice {
        let mut lattice = Lattice::from_config(&test_config(64, 32)).unwrap();
        lattice.update_moments();
        lattice
    }

    #[test]
    fn clean_lattice_reports_clean() {
        let report = scan(&fresh_lattice(), 3);
        assert!(report.is_clean());
        assert_eq!(report.step, 3);
        assert!((report.max_velocity - 0.05).abs() < 1e-13);
    }

    #[test]
    fn negative_populations_are_counted() {
        let mut lattice = fresh_lattice();
        lattice.get_node_mut(2, 2).f[5] = -0.01;
        lattice.get_node_mut(9, 4).f[1] = -0.02;
        let report = scan(&lattice, 0);
        assert_eq!(report.negative_populations, 2);
        assert!(!report.is_clean());
    }

    #[test]
    fn non_finite_populations_are_counted_separately() {
        let mut lattice = fresh_lattice();
        lattice.get_node_mut(2, 2).f[0] = Float::NAN;
        lattice.get_node_mut(2, 2).f[1] = Float::INFINITY;
        let report = scan(&lattice, 0);
        assert_eq!(report.non_finite_populations, 2);
        assert_eq!(report.negative_populations, 0);
    }

    #[test]
    fn vanished_density_is_counted() {
        let mut lattice = fresh_lattice();
        *lattice.get_node_mut(4, 4).f = [0.0; Q];
        lattice.update_moments();
        let report = scan(&lattice, 0);
        assert_eq!(report.near_zero_densities, 1);
    }

    #[test]
    fn solid_cells_are_not_scanned() {
        let mut lattice = fresh_lattice();
        // (16, 16) is the cylinder center.
        lattice.get_node_mut(16, 16).f[2] = -1.0;
        let report = scan(&lattice, 0);
        assert_eq!(report.negative_populations, 0);
    }
}
