use crate::Float;

pub const D: usize = 2;

pub const Q: usize = 9;

pub const C: [[i32; D]; Q] = [
    [0, 0],
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
    [1, 1],
    [-1, 1],
    [-1, -1],
    [1, -1],
];

pub const W: [Float; Q] = [
    4.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

/// Reversed direction for each velocity index.
pub const OPPOSITE: [usize; Q] = [0, 3, 4, 1, 2, 7, 8, 5, 6];

pub const Q_EAST: [usize; 3] = [1, 5, 8];

pub const Q_WEST: [usize; 3] = [3, 6, 7];

pub const Q_NORTH: [usize; 3] = [2, 5, 6];

pub const Q_SOUTH: [usize; 3] = [4, 7, 8];

pub const CS_2: Float = 1.0 / 3.0;

pub const CS_2_INV: Float = 3.0;

pub const CS_4_INV: Float = 9.0;

/// Lattice speed of sound, 1/sqrt(3).
pub const CS: Float = 0.577_350_269_189_625_8;

/// Second-order discrete Maxwell-Boltzmann equilibrium for one cell.
pub fn equilibrium(density: Float, velocity: [Float; D]) -> [Float; Q] {
    let [ux, uy] = velocity;
    let u_2 = ux * ux + uy * uy;
    let mut f_eq = [0.0; Q];
    for q in 0..Q {
        let cx = C[q][0] as Float;
        let cy = C[q][1] as Float;
        let u_dot_c = ux * cx + uy * cy;
        f_eq[q] = W[q]
            * density
            * (1.0 + CS_2_INV * u_dot_c + 0.5 * CS_4_INV * u_dot_c * u_dot_c
                - 0.5 * CS_2_INV * u_2);
    }
    f_eq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let sum: Float = W.iter().sum();
        assert!((sum - 1.0).abs() < 1e-15);
    }

    #[test]
    fn weighted_velocities_have_zero_net_momentum() {
        let mut cx_sum = 0.0;
        let mut cy_sum = 0.0;
        for q in 0..Q {
            cx_sum += W[q] * C[q][0] as Float;
            cy_sum += W[q] * C[q][1] as Float;
        }
        assert!(cx_sum.abs() < 1e-15);
        assert!(cy_sum.abs() < 1e-15);
    }

    #[test]
    fn opposite_is_an_involution_reversing_velocities() {
        assert_eq!(OPPOSITE[0], 0);
        for q in 0..Q {
            assert_eq!(OPPOSITE[OPPOSITE[q]], q);
            assert_eq!(C[OPPOSITE[q]][0], -C[q][0]);
            assert_eq!(C[OPPOSITE[q]][1], -C[q][1]);
        }
    }

    #[test]
    fn face_sets_point_into_their_face() {
        for q in Q_EAST {
            assert_eq!(C[q][0], 1);
        }
        for q in Q_WEST {
            assert_eq!(C[q][0], -1);
        }
        for q in Q_NORTH {
            assert_eq!(C[q][1], 1);
        }
        for q in Q_SOUTH {
            assert_eq!(C[q][1], -1);
        }
    }

    #[test]
    fn equilibrium_recovers_density_and_momentum() {
        let density = 1.3;
        let velocity = [0.05, -0.02];
        let f_eq = equilibrium(density, velocity);

        let rho: Float = f_eq.iter().sum();
        assert!((rho - density).abs() < 1e-14);

        let mut mx = 0.0;
        let mut my = 0.0;
        for q in 0..Q {
            mx += f_eq[q] * C[q][0] as Float;
            my += f_eq[q] * C[q][1] as Float;
        }
        assert!((mx - density * velocity[0]).abs() < 1e-14);
        assert!((my - density * velocity[1]).abs() < 1e-14);
    }

    #[test]
    fn equilibrium_at_rest_reduces_to_weights() {
        let f_eq = equilibrium(1.0, [0.0, 0.0]);
        for q in 0..Q {
            assert!((f_eq[q] - W[q]).abs() < 1e-15);
        }
    }
}
