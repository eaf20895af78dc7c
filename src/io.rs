use crate::post::FlowSnapshot;
use crate::Float;
use colored::*;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const VELOCITY_FILE: &str = "velocity.dat";

pub const VORTICITY_FILE: &str = "vorticity.dat";

pub const MASK_FILE: &str = "mask.dat";

pub fn create_output_directory(path_str: &str) -> io::Result<()> {
    let path = Path::new(path_str);
    if !path.exists() {
        println!("Creating the {} path.\n", path_str.yellow().bold());
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// One row per cell, x fastest, preceded by a `nx ny` header line.
fn write_field_rows<I>(path: &Path, nx: usize, ny: usize, rows: I) -> io::Result<()>
where
    I: Iterator<Item = Vec<Float>>,
{
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "{:>8} {:>8}", nx, ny)?;
    for row in rows {
        for value in row {
            write!(file, " {:>16.8e}", value)?;
        }
        writeln!(file)?;
    }
    Ok(())
}

/// Writes the static obstacle mask once per run, 0/1 per cell.
pub fn write_obstacle_mask(output_dir: &str, snapshot: &FlowSnapshot) -> io::Result<()> {
    let path = Path::new(output_dir).join(MASK_FILE);
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "{:>8} {:>8}", snapshot.nx, snapshot.ny)?;
    for solid in &snapshot.mask {
        writeln!(file, " {:>8}", u8::from(*solid))?;
    }
    Ok(())
}

/// Writes `velocity.dat` (u_x, u_y) and `vorticity.dat` for one emitted
/// step under `<output_dir>/<step>/`.
pub fn write_snapshot(output_dir: &str, step: usize, snapshot: &FlowSnapshot) -> io::Result<()> {
    let step_path = Path::new(output_dir).join(step.to_string());
    fs::create_dir_all(&step_path)?;

    write_field_rows(
        &step_path.join(VELOCITY_FILE),
        snapshot.nx,
        snapshot.ny,
        snapshot
            .velocity_x
            .iter()
            .zip(snapshot.velocity_y.iter())
            .map(|(&ux, &uy)| vec![ux, uy]),
    )?;

    write_field_rows(
        &step_path.join(VORTICITY_FILE),
        snapshot.nx,
        snapshot.ny,
        snapshot.vorticity.iter().map(|&w| vec![w]),
    )?;

    Ok(())
}
