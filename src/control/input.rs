use crate::shared::Command;
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use std::io::BufRead;

/**
 * Manual control panel.
 *
 * Reads one command per line (`up`, `down`, `add`, `remove`, `quit`) and forwards
 * it to the simulation driver. Stops on end of input, on `quit`, or when the
 * driver is gone.
 *
 * # Fields
 * - `command_tx`:  Sends parsed commands to the simulation driver.
 */
pub struct ControlInput {
    command_tx: cbc::Sender<Command>,
}

impl ControlInput {
    pub fn new(command_tx: cbc::Sender<Command>) -> ControlInput {
        ControlInput { command_tx }
    }

    pub fn run<B: BufRead>(self, reader: B) {
        info!("Controls: up | down | add | remove | quit");

        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Error reading control input: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };

            if self.command_tx.send(command).is_err() {
                debug!("Simulation driver gone, control input stopped");
                return;
            }
            if command == Command::Quit {
                return;
            }
        }

        debug!("Control input closed");
    }
}
