/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::{error, info};
use std::path::PathBuf;
use std::thread::Builder;

/* Custom libraries */
use control::ControlInput;
use elevator::{SimRng, Simulation, SimulationDriver};
use render::{FrameSink, SinkKind};
use shared::{Command, Frame};

/* Modules */
mod config;
mod control;
mod elevator;
mod render;
mod shared;

/// Single-car elevator animation driven by a timer loop.
#[derive(Parser, Debug)]
#[clap(name = "elevator-animation", version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[clap(long, default_value = "config.toml")]
    config: PathBuf,

    /// Seed for every random draw, random when omitted
    #[clap(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[clap(long)]
    ticks: Option<u64>,

    /// Render surface: log, json or ascii
    #[clap(long)]
    sink: Option<SinkKind>,

    /// Do not read manual controls from stdin
    #[clap(long)]
    no_input: bool,
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Load the configuration, command line wins
    let mut config = unwrap_or_exit!(config::load_config(&args.config));
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    if args.ticks.is_some() {
        config.simulation.max_ticks = args.ticks;
    }
    if let Some(sink) = args.sink {
        config.render.sink = sink;
    }
    unwrap_or_exit!(config.validate());

    let seed = config.simulation.seed.unwrap_or_else(rand::random);
    info!("Using seed {}", seed);

    // Initialize channels
    let (command_tx, command_rx) = cbc::unbounded::<Command>();
    let (frame_tx, frame_rx) = cbc::unbounded::<Frame>();

    // Start the render surface
    let frame_sink = FrameSink::new(config.render.sink, frame_rx);
    let frame_sink_thread = unwrap_or_exit!(Builder::new()
        .name("frame_sink".into())
        .spawn(move || frame_sink.run()));

    // Start the control input
    if args.no_input {
        drop(command_tx);
    } else {
        let control_input = ControlInput::new(command_tx);
        unwrap_or_exit!(Builder::new()
            .name("control_input".into())
            .spawn(move || control_input.run(std::io::stdin().lock())));
    }

    // Start the simulation
    let simulation = Simulation::new(&config, SimRng::from_seed_u64(seed));
    let driver = SimulationDriver::new(&config, simulation, command_rx, frame_tx);
    let driver_thread = unwrap_or_exit!(Builder::new()
        .name("simulation_driver".into())
        .spawn(move || driver.run()));

    match driver_thread.join() {
        Ok(frame) => info!("Final state: floor {}, {}", frame.current_floor, frame.occupancy),
        Err(_) => error!("Simulation driver panicked"),
    }
    if frame_sink_thread.join().is_err() {
        error!("Render surface panicked");
    }
}
