use std::time::{Duration, Instant};

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use prettytable::{row, Table};
use rand::{rngs::StdRng, SeedableRng};

use crate::controller::SortController;
use crate::engine::{EngineConfig, RunOutcome, RunReport, SortKind, StepEvent};
use crate::model::ArrayModel;

/// One row of the comparison table.
#[derive(Debug, Clone, Copy)]
pub struct BenchRow {
    pub report: RunReport,

    /// How long the animation would take at speed 1.
    pub animated: Duration,

    /// How long the unpaced run took.
    pub wall: Duration,
}

/// Runs every algorithm over the same shuffled array without pacing and returns one row per
/// algorithm. `seed` makes the arrangement reproducible.
pub async fn run_bench(size: usize, seed: Option<u64>, progress: bool) -> Result<Vec<BenchRow>> {
    let mut input = ArrayModel::new(size, 100.0);
    match seed {
        Some(seed) => input.shuffle_with(&mut StdRng::seed_from_u64(seed)),
        None => input.shuffle(),
    }

    let base_delay = EngineConfig::default().base_delay;
    let config = EngineConfig::default().with_base_delay(Duration::ZERO);

    let mut rows = Vec::with_capacity(SortKind::ALL.len());
    for algorithm in SortKind::ALL {
        let (mut controller, mut events) =
            SortController::with_model(config.clone(), input.clone());
        controller.select_algorithm(algorithm);

        let pb = if progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(ProgressStyle::with_template(&format!(
            "{algorithm} -> {{spinner:.green}} [{{elapsed_precise}}] Steps: {{pos}}"
        ))?);

        let now = Instant::now();
        controller.start();
        while let Some(event) = events.recv().await {
            match event {
                StepEvent::Redraw(frame) if frame.step.is_some() => pb.inc(1),
                StepEvent::Finished(_) => break,
                _ => {}
            }
        }
        let wall = now.elapsed();
        pb.finish_and_clear();

        let Some(report) = controller.wait().await else {
            anyhow::bail!("{algorithm} did not finish");
        };
        rows.push(BenchRow {
            report,
            animated: base_delay.mul_f64(report.stats.steps as f64),
            wall,
        });
    }

    Ok(rows)
}

pub fn print_bench(size: usize, rows: &[BenchRow]) {
    println!(
        "{} {}",
        "List Size -> ".bold().underline().blue(),
        size.to_string().bold()
    );

    let mut table = Table::new();
    table.add_row(row![
        "Sorter".bold(),
        "Steps".bold(),
        "Moves".bold(),
        "Animation at 1x".bold(),
        "Time Taken".bold()
    ]);

    for bench in rows {
        let steps = match bench.report.outcome {
            RunOutcome::Completed => bench.report.stats.steps.to_string().normal(),
            RunOutcome::Cancelled => "cancelled".red(),
        };
        table.add_row(row![
            bench.report.algorithm.name(),
            steps,
            bench.report.stats.moves.to_string(),
            format!("{:?}", bench.animated),
            format!("{:?}", bench.wall)
        ]);
    }

    table.printstd();
    println!();
}
