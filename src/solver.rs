use crate::config::Config;
use crate::error::{ConfigError, SimulationError};
use crate::grid::Lattice;
use crate::monitor::{self, StabilityReport};
use crate::post::FlowSnapshot;
use crate::Float;
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Completed,
}

/// Aggregate counters for a finished run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub steps_completed: usize,
    pub negative_populations: usize,
    pub near_zero_densities: usize,
    pub peak_velocity: Float,
}

impl RunSummary {
    pub fn absorb(&mut self, report: &StabilityReport) {
        self.negative_populations += report.negative_populations;
        self.near_zero_densities += report.near_zero_densities;
        self.peak_velocity = self.peak_velocity.max(report.max_velocity);
    }
}

/// The time-marching driver. Owns the grid state; every step runs the fixed
/// cycle moments -> equilibrium -> collision -> streaming -> bounce-back ->
/// inlet -> outflow, then scans for numerical trouble.
pub struct Solver {
    pub lattice: Lattice,
    steps: usize,
    output_interval: usize,
    divergence_limit: Float,
    time_step: usize,
    state: RunState,
}

impl Solver {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let lattice = Lattice::from_config(config)?;
        Ok(Self {
            lattice,
            steps: config.simulation.steps,
            output_interval: config.output.interval,
            divergence_limit: config.divergence_limit(),
            time_step: 0,
            state: RunState::Running,
        })
    }

    pub fn time_step(&self) -> usize {
        self.time_step
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Advance the simulation by one step. The pass order is the algorithm,
    /// not a detail: collision before streaming, boundaries after streaming,
    /// bounce-back before the inlet, outflow last.
    pub fn step(&mut self) -> Result<StabilityReport, SimulationError> {
        self.lattice.update_moments();
        self.lattice.equilibrium();
        self.lattice.collision_step();
        self.lattice.streaming_step();
        self.lattice.bounce_back();
        self.lattice.zou_he_inlet(self.time_step)?;
        self.lattice.outflow_outlet();
        self.time_step += 1;

        // Refresh the moments so the report and any emitted snapshot
        // describe the state the step actually produced.
        self.lattice.update_moments();
        let report = monitor::scan(&self.lattice, self.time_step);
        if !report.is_clean() {
            warn!(
                "step {}: {} negative populations, {} non-finite populations, {} vanished densities",
                report.step,
                report.negative_populations,
                report.non_finite_populations,
                report.near_zero_densities
            );
        }
        if report.non_finite_populations > 0 || report.max_velocity > self.divergence_limit {
            self.state = RunState::Completed;
            return Err(SimulationError::Diverged {
                step: report.step,
                max_velocity: report.max_velocity,
                limit: self.divergence_limit,
            });
        }
        debug!(
            "step {}: max velocity {:.6}",
            report.step, report.max_velocity
        );
        Ok(report)
    }

    /// Run the configured number of steps, handing a snapshot to the
    /// callback at every output interval.
    pub fn run<F>(&mut self, mut on_snapshot: F) -> Result<RunSummary, SimulationError>
    where
        F: FnMut(usize, &FlowSnapshot),
    {
        let mut summary = RunSummary::default();
        for _ in 0..self.steps {
            let report = self.step()?;
            summary.absorb(&report);
            if self.output_interval > 0 && self.time_step % self.output_interval == 0 {
                on_snapshot(self.time_step, &self.lattice.snapshot());
            }
        }
        summary.steps_completed = self.time_step;
        self.state = RunState::Completed;
        Ok(summary)
    }
}
