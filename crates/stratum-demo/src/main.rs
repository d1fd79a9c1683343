//! Drive a scripted session through the control tree and print what it drew.

use std::{fs, io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use stratum::{
    Configuration, DrawCommand, DrawSink, RenderOrder, Theme, UiContext, render::NullSink,
};
use stratum_demo::{Demo, Script};
use tracing::{Level, info};

/// CLI flags for the headless demo.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of frames to run.
    #[clap(short, long, default_value_t = 120)]
    frames: usize,

    /// Print every draw command as it is submitted.
    #[clap(short, long)]
    commands: bool,

    /// Colour the final tree dump.
    #[clap(long)]
    color: bool,

    /// Log engine internals to stderr.
    #[clap(short, long)]
    verbose: bool,

    /// Engine configuration as JSON.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Theme as JSON.
    #[clap(long)]
    theme: Option<PathBuf>,
}

/// Prints draw commands to stdout.
struct PrintSink {
    /// Frame being drawn.
    frame: usize,
}

impl DrawSink for PrintSink {
    fn submit(&mut self, order: RenderOrder, command: DrawCommand) {
        println!(
            "frame {:>4} [{}:{}] {:?}",
            self.frame, order.layer, order.order, command
        );
    }
}

/// Run the demo.
pub fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::TRACE
        } else {
            Level::WARN
        })
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .init();

    let config = match &args.config {
        Some(path) => Configuration::from_json(&fs::read_to_string(path)?)?,
        None => Configuration::default(),
    };
    let theme = match &args.theme {
        Some(path) => Theme::from_json(&fs::read_to_string(path)?)?,
        None => Theme::default(),
    };

    let mut ui = UiContext::new(config, theme)?;
    let mut demo = Demo::new();
    let mut script = Script::new();

    for frame in 0..args.frames {
        ui.begin_frame(script.next_frame())?;
        let declared = demo.declare(&mut ui);
        let report = if args.commands {
            ui.end_frame(&mut PrintSink { frame })?
        } else {
            ui.end_frame(&mut NullSink)?
        };
        declared?;

        for fault in &report.faults {
            println!(
                "frame {frame:>4} fault in {} ({}): {}",
                fault.identity, fault.hook, fault.error
            );
        }
        for cue in &report.sounds {
            println!("frame {frame:>4} sound {} for {}", cue.name, cue.identity);
        }
    }

    info!(nodes = ui.node_count(), "session finished");
    println!("{}", demo.summary());
    print!("{}", ui.dump(args.color)?);
    Ok(())
}
