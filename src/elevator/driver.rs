use crate::config::Config;
use crate::elevator::motion::{Simulation, TickOutcome};
use crate::elevator::rng::RandomSource;
use crate::shared::{Command, Frame};
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

enum Event {
    Tick,
    DwellElapsed,
    Command(Command),
    InputClosed,
}

/**
 * Runs the simulation against wall-clock timers.
 *
 * The driver is the single writer of the `Simulation`. A periodic tick drives the
 * motion and a redraw, a one-shot dwell timer armed at the end of every arrival
 * resumes the car, and manual commands arrive over a channel. After each redraw a
 * `Frame` is published for the render surface.
 *
 * # Fields
 * - `simulation`:      The simulation state.
 * - `command_rx`:      Receives manual control actions.
 * - `frame_tx`:        Publishes frames to the render surface.
 * - `tick_interval`:   Period of the motion tick.
 * - `dwell_time`:      How long the car pauses after an arrival.
 * - `frame_interval`:  Publish a frame on every n-th moving tick.
 * - `max_ticks`:       Stop after this many ticks, if set.
 */
pub struct SimulationDriver<R: RandomSource> {
    simulation: Simulation<R>,
    command_rx: cbc::Receiver<Command>,
    frame_tx: Option<cbc::Sender<Frame>>,
    tick_interval: Duration,
    dwell_time: Duration,
    frame_interval: u64,
    max_ticks: Option<u64>,
}

impl<R: RandomSource> SimulationDriver<R> {
    pub fn new(
        config: &Config,
        simulation: Simulation<R>,
        command_rx: cbc::Receiver<Command>,
        frame_tx: cbc::Sender<Frame>,
    ) -> SimulationDriver<R> {
        SimulationDriver {
            simulation,
            command_rx,
            frame_tx: Some(frame_tx),
            tick_interval: Duration::from_millis(config.simulation.tick_interval_ms),
            dwell_time: Duration::from_millis(config.simulation.dwell_time_ms),
            frame_interval: config.render.frame_interval,
            max_ticks: config.simulation.max_ticks,
        }
    }

    /// Runs until a quit command or the tick limit, then returns the final frame.
    pub fn run(mut self) -> Frame {
        let ticker = cbc::tick(self.tick_interval);
        let mut dwell_rx: cbc::Receiver<Instant> = cbc::never();
        let mut moving_ticks: u64 = 0;

        info!(
            "Simulation started: {} floors, tick {:?}, dwell {:?}",
            self.simulation.shaft().n_floors(),
            self.tick_interval,
            self.dwell_time
        );
        self.publish();

        loop {
            let event = cbc::select! {
                recv(ticker) -> _ => Event::Tick,
                recv(dwell_rx) -> _ => Event::DwellElapsed,
                recv(self.command_rx) -> command => match command {
                    Ok(command) => Event::Command(command),
                    Err(_) => Event::InputClosed,
                },
            };

            match event {
                Event::Tick => {
                    match self.simulation.tick() {
                        TickOutcome::Paused => {}
                        TickOutcome::Moved => {
                            moving_ticks += 1;
                            if moving_ticks % self.frame_interval == 0 {
                                self.publish();
                            }
                        }
                        TickOutcome::Arrived(_) => {
                            dwell_rx = cbc::after(self.dwell_time);
                            self.publish();
                        }
                    }

                    if let Some(max_ticks) = self.max_ticks {
                        if self.simulation.ticks() >= max_ticks {
                            info!("Tick limit of {} reached", max_ticks);
                            break;
                        }
                    }
                }
                Event::DwellElapsed => {
                    dwell_rx = cbc::never();
                    self.simulation.resume();
                    self.publish();
                }
                Event::Command(Command::Quit) => {
                    info!("Quit requested");
                    break;
                }
                Event::Command(command) => {
                    self.apply(command);
                    self.publish();
                }
                Event::InputClosed => {
                    debug!("Command channel closed, running without manual control");
                    self.command_rx = cbc::never();
                }
            }
        }

        let frame = self.simulation.frame();
        info!(
            "Simulation stopped after {} ticks at floor {}, {}",
            frame.tick, frame.current_floor, frame.occupancy
        );
        frame
    }

    fn apply(&mut self, command: Command) {
        debug!("Applying command {:?}", command);
        match command {
            Command::GoUp => self.simulation.go_up(),
            Command::GoDown => self.simulation.go_down(),
            Command::AddPassenger => {
                self.simulation.add_passenger();
            }
            Command::RemovePassengers => {
                self.simulation.remove_passenger();
            }
            Command::Quit => {}
        }
    }

    fn publish(&mut self) {
        let disconnected = match &self.frame_tx {
            Some(frame_tx) => frame_tx.send(self.simulation.frame()).is_err(),
            None => false,
        };
        if disconnected {
            warn!("Render surface disconnected, frames are dropped");
            self.frame_tx = None;
        }
    }
}
