//! A terminal stand-in for the bar chart and the tick sound.
//!
//! Each bar is drawn as a horizontal row of blocks scaled to the tallest bar; the evaluated bar is
//! blue and the rest green. Sound ticks ring the terminal bell.

use std::io::{self, Write};

use colored::Colorize;

use crate::engine::{Frame, RunOutcome, RunReport};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const BELL: &str = "\x07";

pub struct TerminalRenderer<W: Write> {
    out: W,
    width: usize,
    max_height: f32,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout(width: usize, max_height: f32) -> Self {
        Self::new(io::stdout(), width, max_height)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, width: usize, max_height: f32) -> Self {
        Self {
            out,
            width: width.max(1),
            max_height,
        }
    }

    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let mut screen = String::from(CLEAR_SCREEN);
        for (i, &height) in frame.values.iter().enumerate() {
            let bar = "█".repeat(self.bar_len(height));
            let bar = if frame.evaluated == Some(i) {
                bar.blue()
            } else {
                bar.green()
            };
            screen.push_str(&format!("{bar}\n"));
        }

        self.out.write_all(screen.as_bytes())?;
        self.out.flush()
    }

    pub fn tick(&mut self) -> io::Result<()> {
        self.out.write_all(BELL.as_bytes())?;
        self.out.flush()
    }

    pub fn summary(&mut self, report: &RunReport) -> io::Result<()> {
        let outcome = match report.outcome {
            RunOutcome::Completed => "sorted".green().bold(),
            RunOutcome::Cancelled => "cancelled".red().bold(),
        };
        writeln!(
            self.out,
            "\n{} {} {outcome} after {} steps ({} moves)",
            "==>".green().bold(),
            report.algorithm.name().bold().cyan(),
            report.stats.steps.to_string().bold(),
            report.stats.moves.to_string().bold(),
        )?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn bar_len(&self, height: f32) -> usize {
        if self.max_height <= 0.0 {
            return 0;
        }
        let scaled = (height / self.max_height * self.width as f32).round();
        (scaled.max(0.0) as usize).clamp(1, self.width)
    }
}
