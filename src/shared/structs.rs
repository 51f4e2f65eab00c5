/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Manual control actions accepted by the simulation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    GoUp,
    GoDown,
    AddPassenger,
    RemovePassengers,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Command::GoUp),
            "down" | "d" => Ok(Command::GoDown),
            "add" | "a" => Ok(Command::AddPassenger),
            "remove" | "r" => Ok(Command::RemovePassengers),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command '{}'", other)),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FloorLine {
    pub floor: u8,
    pub y: i32,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct CarRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/**
 * Read-only snapshot handed to the render surface after each redraw.
 *
 * # Fields
 * - `floor_lines`:     One line per floor, bottom floor first.
 * - `car`:             Pixel rectangle of the car.
 * - `credits`:         Credits text.
 * - `occupancy`:       Occupancy ratio text, e.g. "Passengers: 3/5".
 * - `message`:         Current status message, empty while idle.
 * - `current_floor`:   Floor the car is heading for.
 */
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub window_width: i32,
    pub window_height: i32,
    pub floor_lines: Vec<FloorLine>,
    pub car: CarRect,
    pub credits: String,
    pub occupancy: String,
    pub message: String,
    pub current_floor: u8,
    pub direction: Direction,
    pub paused: bool,
    pub passengers: u32,
}
