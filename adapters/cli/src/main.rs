#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that builds a circuit and animates its evaluation.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::{info, LevelFilter};
use ricochet_circuits_rendering::{
    render_storyboard, AnimationEncoder, PreviewBackend, RenderStyle,
};
use ricochet_circuits_rendering_image::{GifAnimationEncoder, RasterCanvas};
use ricochet_circuits_rendering_macroquad::MacroquadBackend;
use ricochet_circuits_system_animation::{expand_history, FrameTiming};
use ricochet_circuits_system_circuits::Circuit;
use ricochet_circuits_system_movement::settle;
use ricochet_circuits_world::{query, Board};

/// Circuits selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CircuitArg {
    /// Two inputs feeding one half adder.
    HalfAdder,
    /// Three inputs feeding two chained half adders.
    FullAdder,
}

impl From<CircuitArg> for Circuit {
    fn from(value: CircuitArg) -> Self {
        match value {
            CircuitArg::HalfAdder => Circuit::HalfAdder,
            CircuitArg::FullAdder => Circuit::FullAdder,
        }
    }
}

/// Animate sliding-robot logic circuits.
#[derive(Debug, Parser)]
#[command(name = "ricochet-circuits", version, long_about = None)]
struct CliArgs {
    /// Circuit to build and animate.
    #[arg(long, value_enum, default_value_t = CircuitArg::HalfAdder)]
    circuit: CircuitArg,

    /// Destination GIF; defaults to images/<circuit>.gif.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file overriding the render style.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Display time of each interior frame in milliseconds.
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u64).range(1..))]
    frame_ms: u64,

    /// How many frame durations the first and last frames are held for.
    #[arg(long, default_value_t = 10)]
    hold: u32,

    /// GIF quantisation speed; 1 gives the best palette, 30 the fastest encode.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i32).range(1..=30))]
    gif_speed: i32,

    /// Play the animation in a window instead of writing a file.
    #[arg(long)]
    preview: bool,

    /// Disable vertical sync in the preview window.
    #[arg(long, requires = "preview")]
    no_vsync: bool,

    /// Raise log verbosity; repeat for trace output.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl CliArgs {
    fn output_path(&self, circuit: Circuit) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Path::new("images").join(format!("{}.gif", circuit.name())))
    }

    fn timing(&self) -> FrameTiming {
        FrameTiming::new(Duration::from_millis(self.frame_ms), self.hold)
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Entry point for the Ricochet Circuits command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();
    run(&args)
}

fn run(args: &CliArgs) -> Result<()> {
    let circuit = Circuit::from(args.circuit);
    let board = circuit
        .build()
        .with_context(|| format!("failed to build the {circuit} circuit"))?;
    report_outputs(&board)?;

    let storyboard = expand_history(&board).context("failed to expand move history")?;
    let style = match &args.style {
        Some(path) => RenderStyle::load(path)?,
        None => RenderStyle::default(),
    };
    let durations = storyboard.durations(args.timing());

    if args.preview {
        return MacroquadBackend::new()
            .with_vsync(!args.no_vsync)
            .with_window_title(format!("Ricochet Circuits: {circuit}"))
            .play(storyboard, style, durations);
    }

    let output = args.output_path(circuit);
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let frames: Vec<_> = render_storyboard(&storyboard, &style, RasterCanvas::new)
        .into_iter()
        .map(RasterCanvas::into_image)
        .collect();
    GifAnimationEncoder::create(&output)?
        .with_speed(args.gif_speed)
        .encode(frames, &durations)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}

fn report_outputs(board: &Board) -> Result<()> {
    let settled = settle(board).context("failed to replay move history")?;
    for (robot, cell) in settled.iter() {
        if let Some(label) = query::label(board, robot) {
            info!("{label} ends at {cell}");
        }
    }
    Ok(())
}
