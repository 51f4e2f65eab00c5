/*
 * Unit tests for the control input
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_input_forwards_commands
 * - test_input_stops_after_quit
 * - test_input_stops_when_driver_gone
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod input_tests {
    use crate::control::ControlInput;
    use crate::shared::Command;
    use crossbeam_channel::unbounded;
    use std::io::Cursor;

    #[test]
    fn test_input_forwards_commands() {
        // Arrange
        let (command_tx, command_rx) = unbounded::<Command>();
        let input = Cursor::new("up\n\n  Down \nadd\nfly\nr\n");

        // Act
        ControlInput::new(command_tx).run(input);
        let commands: Vec<Command> = command_rx.iter().collect();

        // Assert: blank and unknown lines are skipped
        assert_eq!(
            commands,
            vec![
                Command::GoUp,
                Command::GoDown,
                Command::AddPassenger,
                Command::RemovePassengers,
            ]
        );
    }

    #[test]
    fn test_input_stops_after_quit() {
        // Arrange
        let (command_tx, command_rx) = unbounded::<Command>();
        let input = Cursor::new("add\nquit\nadd\n");

        // Act
        ControlInput::new(command_tx).run(input);
        let commands: Vec<Command> = command_rx.iter().collect();

        // Assert
        assert_eq!(commands, vec![Command::AddPassenger, Command::Quit]);
    }

    #[test]
    fn test_input_stops_when_driver_gone() {
        // Arrange
        let (command_tx, command_rx) = unbounded::<Command>();
        drop(command_rx);

        // Act / Assert: returns instead of looping on a dead channel
        ControlInput::new(command_tx).run(Cursor::new("up\ndown\n"));
    }
}
