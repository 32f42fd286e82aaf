//! # Introduction
//!
//! Sorting algorithms that can be watched. Bars of different heights are sorted one paced,
//! observable step at a time; the run can be sped up, slowed down, paused, muted or cancelled
//! while it is going.
//!
//! - [`model`] holds the bars and the shuffle.
//! - [`engine`] turns bubble, insertion, merge and selection sort into step-driven processes.
//! - [`controller`] is the session the UI drives: start, pause, mute, reset.
//!
//! Drawing and sound are left to whoever drains the [`engine::StepReceiver`]; [`render`] has a
//! terminal version.

pub mod bench;
pub mod controller;
pub mod engine;
pub mod model;
pub mod render;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use controller::SortController;
use engine::{EngineConfig, SortKind, StepEvent};
use render::TerminalRenderer;

/// Watch or compare the sorters on the commandline. Install the `sortviz` crate and run
/// `sortviz sort --help` to see what options are available
#[derive(Debug, Args)]
#[command(flatten_help = true, subcommand_required = true)]
pub struct SortArgs {
    #[command(subcommand)]
    command: SortCommands,
}

#[derive(Clone, Subcommand, Debug)]
#[command(arg_required_else_help = true)]
enum SortCommands {
    /// Animate one algorithm in the terminal. Ctrl-C cancels the run.
    Run {
        /// Algorithm to animate
        #[arg(short, long, value_enum, default_value_t = SortKind::Bubble)]
        algorithm: SortKind,

        /// Number of bars
        #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
        size: u16,

        /// Divides the delay between steps
        #[arg(long, default_value_t = 1.0)]
        speed: f64,

        /// Delay between steps at speed 1, in milliseconds
        #[arg(long, default_value_t = 1000)]
        base_delay_ms: u64,

        /// Do not ring the bell when bars move
        #[arg(long)]
        muted: bool,

        /// Length of the tallest bar in columns
        #[arg(long, default_value_t = 60)]
        width: usize,
    },

    /// Run every algorithm on the same array and compare their step counts.
    Bench {
        /// Number of bars
        #[arg(short, long, default_value_t = 100, value_parser = clap::value_parser!(u16).range(1..))]
        size: u16,

        /// Seed for the shuffle, for reproducible tables
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl SortArgs {
    pub fn run(self) -> Result<()> {
        let runtime = tokio::runtime::Runtime::new().context("starting the async runtime")?;

        match self.command {
            SortCommands::Run {
                algorithm,
                size,
                speed,
                base_delay_ms,
                muted,
                width,
            } => {
                let config = EngineConfig::default()
                    .with_size(size as usize)
                    .with_speed(speed)
                    .with_base_delay(Duration::from_millis(base_delay_ms))
                    .muted(muted);
                runtime.block_on(animate(config, algorithm, width))
            }
            SortCommands::Bench { size, seed } => {
                let rows = runtime.block_on(bench::run_bench(size as usize, seed, true))?;
                bench::print_bench(size as usize, &rows);
                Ok(())
            }
        }
    }
}

// Plays the part of the UI thread: owns the renderer and drains the step channel.
async fn animate(config: EngineConfig, algorithm: SortKind, width: usize) -> Result<()> {
    let mut renderer = TerminalRenderer::stdout(width, config.max_height);
    let (mut controller, mut events) = SortController::new(config);
    controller.select_algorithm(algorithm);
    controller.start();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(StepEvent::Redraw(frame)) => renderer.draw(&frame)?,
                Some(StepEvent::SoundTick) => renderer.tick()?,
                Some(StepEvent::Finished(report)) => {
                    renderer.summary(&report)?;
                    break;
                }
                None => break,
            },
            signal = tokio::signal::ctrl_c() => {
                signal.context("listening for ctrl-c")?;
                controller.cancel();
            }
        }
    }

    controller.wait().await;
    Ok(())
}
