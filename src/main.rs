use anyhow::Result;
use clap::{arg, command, value_parser};
use colored::*;
use indicatif::ProgressBar;
use lbm_karman as lbm;
use lbm_karman::solver::RunSummary;
use lbm_karman::{Config, Solver};
use log::info;
use rayon::ThreadPoolBuilder;

fn main() -> Result<()> {
    env_logger::init();

    let matches = command!()
        .arg(
            arg!(
                -c --config <FILE> "Path to the JSON run configuration"
            )
            .required(true),
        )
        .arg(
            arg!(
                -n --number_of_threads <NUMBER_OF_THREADS> "Sets the number of worker threads"
            )
            .required(false)
            .value_parser(value_parser!(usize)),
        )
        .get_matches();

    if let Some(&num_threads) = matches.get_one::<usize>("number_of_threads") {
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;
    }

    let config_path = matches.get_one::<String>("config").unwrap();
    let config = Config::from_file(config_path)?;
    info!("domain: {}x{}", config.domain.nx, config.domain.ny);
    info!(
        "obstacle: center ({}, {}), radius {}",
        config.obstacle.cx, config.obstacle.cy, config.obstacle.radius
    );
    info!("tau: {}, viscosity: {}", config.tau()?, config.viscosity()?);
    info!(
        "inlet velocity: {}, steps: {}",
        config.physics.inlet_velocity, config.simulation.steps
    );

    let mut solver = Solver::new(&config)?;
    let output_dir = config.output.directory.clone();
    let interval = config.output.interval;
    lbm::io::create_output_directory(&output_dir)?;
    lbm::io::write_obstacle_mask(&output_dir, &solver.lattice.snapshot())?;

    let progress = ProgressBar::new(config.simulation.steps as u64);
    let mut summary = RunSummary::default();
    for _ in 0..config.simulation.steps {
        let report = solver.step()?;
        summary.absorb(&report);
        progress.inc(1);
        if interval > 0 && solver.time_step() % interval == 0 {
            let snapshot = solver.lattice.snapshot();
            lbm::io::write_snapshot(&output_dir, solver.time_step(), &snapshot)?;
        }
    }
    summary.steps_completed = solver.time_step();
    progress.finish();

    println!(
        "\n{} {} steps, peak velocity {:.6}",
        "Completed:".green().bold(),
        summary.steps_completed,
        summary.peak_velocity
    );
    if summary.negative_populations > 0 || summary.near_zero_densities > 0 {
        println!(
            "{} {} negative populations, {} vanished densities over the run",
            "Warning:".yellow().bold(),
            summary.negative_populations,
            summary.near_zero_densities
        );
    }
    println!("Output written to {}.", output_dir.yellow().bold());

    Ok(())
}
