/*
 * Unit tests for the simulation driver
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_driver_quit_stops_run
 * - test_driver_tick_limit_without_input
 * - test_driver_applies_commands
 * - test_driver_dwell_then_resume
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod driver_tests {
    use crate::config::Config;
    use crate::elevator::{Simulation, SimRng, SimulationDriver};
    use crate::shared::{Command, Frame};
    use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
    use std::thread::{spawn, JoinHandle};
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn setup_driver(
        tick_interval_ms: u64,
        dwell_time_ms: u64,
        max_ticks: Option<u64>,
    ) -> (JoinHandle<Frame>, Sender<Command>, Receiver<Frame>) {
        // Arrange mock channels
        let (command_tx, command_rx) = unbounded::<Command>();
        let (frame_tx, frame_rx) = unbounded::<Frame>();

        let mut config = Config::default();
        config.simulation.tick_interval_ms = tick_interval_ms;
        config.simulation.dwell_time_ms = dwell_time_ms;
        config.simulation.max_ticks = max_ticks;

        let simulation = Simulation::new(&config, SimRng::from_seed_u64(7));
        let driver = SimulationDriver::new(&config, simulation, command_rx, frame_tx);

        (spawn(move || driver.run()), command_tx, frame_rx)
    }

    fn next_frame(frame_rx: &Receiver<Frame>) -> Frame {
        match frame_rx.recv_timeout(TIMEOUT) {
            Ok(frame) => frame,
            Err(RecvTimeoutError::Timeout) => panic!("Timed out waiting for frame_rx"),
            Err(e) => panic!("Error receiving from frame_rx: {:?}", e),
        }
    }

    #[test]
    fn test_driver_quit_stops_run() {
        // Arrange
        let (driver_thread, command_tx, frame_rx) = setup_driver(10, 3000, None);
        let initial = next_frame(&frame_rx);

        // Act
        command_tx.send(Command::Quit).unwrap();
        let last = driver_thread.join().unwrap();

        // Assert
        assert_eq!(initial.current_floor, 1);
        assert_eq!(initial.passengers, 0);
        assert!(last.tick >= initial.tick);
    }

    #[test]
    fn test_driver_tick_limit_without_input() {
        // Arrange: no manual control at all
        let (driver_thread, command_tx, frame_rx) = setup_driver(1, 5, Some(100));
        drop(command_tx);

        // Act
        let last = driver_thread.join().unwrap();
        let frames: Vec<Frame> = frame_rx.iter().collect();

        // Assert
        assert_eq!(last.tick, 100);
        assert!(!frames.is_empty());
        assert!(frames.iter().all(|f| f.tick <= 100));
        assert!(frames.iter().all(|f| f.passengers <= 5));
    }

    #[test]
    fn test_driver_applies_commands() {
        // Arrange: ticks far enough apart that only commands produce frames
        let (driver_thread, command_tx, frame_rx) = setup_driver(60_000, 3000, None);
        next_frame(&frame_rx);

        // Act / Assert
        command_tx.send(Command::AddPassenger).unwrap();
        let frame = next_frame(&frame_rx);
        assert_eq!(frame.passengers, 1);
        assert_eq!(frame.occupancy, "Passengers: 1/5");

        command_tx.send(Command::RemovePassengers).unwrap();
        let frame = next_frame(&frame_rx);
        assert_eq!(frame.passengers, 0);
        assert_eq!(frame.message, "Removed 1 passengers.");

        command_tx.send(Command::GoUp).unwrap();
        let frame = next_frame(&frame_rx);
        assert_eq!(frame.message, "Going up");

        // Cleanup
        command_tx.send(Command::Quit).unwrap();
        driver_thread.join().unwrap();
    }

    #[test]
    fn test_driver_dwell_then_resume() {
        // Arrange
        let (driver_thread, command_tx, frame_rx) = setup_driver(1, 20, None);

        // Act: wait for the first arrival
        let arrived = loop {
            let frame = next_frame(&frame_rx);
            if frame.paused {
                break frame;
            }
        };
        let resumed = next_frame(&frame_rx);

        // Assert
        assert_eq!(arrived.car.y, 450);
        assert!(arrived.message.starts_with("Passengers exiting at floor 1: 0"));
        assert!(!resumed.paused);
        assert_eq!(resumed.message, "");
        assert_eq!(resumed.car.y, 450);
        assert_eq!(resumed.passengers, arrived.passengers);

        // Cleanup
        command_tx.send(Command::Quit).unwrap();
        driver_thread.join().unwrap();
    }
}
