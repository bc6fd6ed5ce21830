//! camdyn CLI - cam mechanism design from the command line
//!
//! Loads a cam design from TOML, evaluates it, and reports kinematics,
//! outline, and design checks.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use camdyn::{
    radius_range, smallest_passing, sweep_base_radius, CamDesign, CamTable, DesignReport,
    Violation,
};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "camdyn")]
#[command(about = "Cam and follower design calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a design and print a summary or the full table
    Eval {
        /// Path to a design .toml file
        design: PathBuf,
        /// Print the sampled table as JSON; a straight stretch has an
        /// infinite radius of curvature, written as null
        #[arg(long)]
        json: bool,
        /// Keep every Nth row of the JSON table
        #[arg(long, default_value_t = 1)]
        every: usize,
    },
    /// Check a design against its pressure angle and curvature limits
    Check {
        /// Path to a design .toml file
        design: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Try a range of base radii and report which satisfy the limits
    Sweep {
        /// Path to a design .toml file
        design: PathBuf,
        /// Smallest base radius to try
        #[arg(long)]
        from: f64,
        /// Largest base radius to try
        #[arg(long)]
        to: f64,
        /// Base radius increment
        #[arg(long, default_value_t = 1.0)]
        step: f64,
    },
    /// Print an example design file
    Example,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            design,
            json,
            every,
        } => eval(&design, json, every)?,
        Commands::Check { design, json } => check(&design, json)?,
        Commands::Sweep {
            design,
            from,
            to,
            step,
        } => sweep(&design, from, to, step)?,
        Commands::Example => {
            print!("{}", CamDesign::example().to_toml_string()?);
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable; `RUST_LOG` overrides
/// the default `warn` level.
fn init_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn load(path: &Path) -> Result<CamDesign> {
    CamDesign::load(path).with_context(|| format!("failed to load design {}", path.display()))
}

fn eval(path: &Path, json: bool, every: usize) -> Result<()> {
    let design = load(path)?;
    let table = design.evaluate()?;

    if json {
        let rows = every_nth(&table, every);
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let summary = design.summary();
    println!("cam design: {}", design.name);
    println!("  Follower: {}", design.geometry.follower);
    println!("  Base radius: {}", design.geometry.base_radius);
    println!("  Segments: {}", summary.segment_count);
    println!("  Total duration: {}°", summary.total_duration);
    println!("  Stroke: {}", summary.stroke());
    println!("  Samples: {} (step {}°)", table.len(), table.step);

    if let Some(extrema) = table.extrema() {
        println!("\nKinematics:");
        println!(
            "  Max lift: {:.4} at {}°",
            extrema.max_displacement.value, extrema.max_displacement.theta
        );
        println!(
            "  Peak velocity: {:.4} at {}°",
            extrema.velocity.value, extrema.velocity.theta
        );
        println!(
            "  Peak acceleration: {:.4} at {}°",
            extrema.acceleration.value, extrema.acceleration.theta
        );
        println!("  Peak jerk: {:.4} at {}°", extrema.jerk.value, extrema.jerk.theta);
    }

    let outline = table.outline();
    println!("\nOutline:");
    println!("  Max radius: {:.4}", outline.max_radius());
    println!("  Min radius: {:.4}", outline.min_radius());
    println!("  Closure gap: {:.3e}", outline.closure_gap());

    print_report(&table.check(&design.geometry, &design.limits));
    Ok(())
}

fn check(path: &Path, json: bool) -> Result<()> {
    let design = load(path)?;
    let report = design.evaluate()?.check(&design.geometry, &design.limits);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
        for violation in &report.violations {
            match violation {
                Violation::PressureAngle { theta, value } => {
                    println!("  {theta}°: pressure angle {value:.3}°")
                }
                Violation::Undercut { theta, radius } => {
                    println!("  {theta}°: undercut, radius of curvature {radius:.4}")
                }
                Violation::Cusp { theta, radius } => {
                    println!("  {theta}°: cusp, radius of curvature {radius:.4}")
                }
            }
        }
    }

    if !report.passes() {
        anyhow::bail!(
            "{} fails its limits at {} samples",
            design.name,
            report.violations.len()
        );
    }
    Ok(())
}

fn sweep(path: &Path, from: f64, to: f64, step: f64) -> Result<()> {
    let design = load(path)?;
    let radii = radius_range(from, to, step)?;
    info!(candidates = radii.len(), "starting base radius sweep");
    let candidates = sweep_base_radius(&design, &radii)?;

    println!("{:>12} {:>14} {:>14}  result", "base radius", "max |α| (°)", "min ρ");
    for c in &candidates {
        println!(
            "{:>12.3} {:>14.3} {:>14.4}  {}",
            c.base_radius,
            c.report.worst_pressure_angle.value.abs(),
            c.report.min_radius_of_curvature.value,
            if c.passes() { "ok" } else { "fail" }
        );
    }

    match smallest_passing(&candidates) {
        Some(best) => println!("\nSmallest passing base radius: {best}"),
        None => println!("\nNo candidate satisfies the limits"),
    }
    Ok(())
}

fn print_report(report: &DesignReport) {
    println!("\nDesign check:");
    println!(
        "  Worst pressure angle: {:.3}° at {}°",
        report.worst_pressure_angle.value, report.worst_pressure_angle.theta
    );
    println!(
        "  Min radius of curvature: {:.4} at {}°",
        report.min_radius_of_curvature.value, report.min_radius_of_curvature.theta
    );
    if report.concave_samples > 0 {
        println!("  Concave samples: {}", report.concave_samples);
    }
    println!(
        "  Result: {}",
        if report.passes() { "pass" } else { "FAIL" }
    );
}

/// Every `n`th row, always ending on the closing 360° row.
///
/// serde_json has no encoding for an infinite `f64`, so the radius of
/// curvature of a straight stretch comes out as `null`.
fn every_nth(table: &CamTable, n: usize) -> Vec<camdyn::SampledPoint> {
    let n = n.max(1);
    let mut rows: Vec<_> = table.points.iter().step_by(n).copied().collect();
    if let Some(last) = table.points.last() {
        if (table.points.len() - 1) % n != 0 {
            rows.push(*last);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_eval() {
        let cli = Cli::parse_from(["camdyn", "eval", "cam.toml", "--json", "--every", "10"]);
        match cli.command {
            Commands::Eval { design, json, every } => {
                assert_eq!(design, PathBuf::from("cam.toml"));
                assert!(json);
                assert_eq!(every, 10);
            }
            _ => panic!("expected eval"),
        }
    }

    #[test]
    fn test_json_rows_write_infinite_radius_as_null() {
        let table = CamDesign::example().with_step(1.0).evaluate().unwrap();
        let mut rows = every_nth(&table, 90);
        rows[1].radius_of_curvature = f64::INFINITY;
        let json = serde_json::to_string(&rows).unwrap();
        assert!(json.contains("\"radius_of_curvature\":null"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value[0]["radius_of_curvature"].is_f64());
    }

    #[test]
    fn test_every_nth_keeps_closing_row() {
        let table = CamDesign::example().with_step(1.0).evaluate().unwrap();
        let rows = every_nth(&table, 7);
        assert_eq!(rows[0].theta, 0.0);
        assert_eq!(rows[1].theta, 7.0);
        assert_eq!(rows.last().unwrap().theta, 360.0);
        assert_eq!(every_nth(&table, 1).len(), 361);
        assert_eq!(every_nth(&table, 0).len(), 361);
        // 360 is a multiple of 10: no duplicate closing row
        assert_eq!(every_nth(&table, 10).len(), 37);
    }
}
