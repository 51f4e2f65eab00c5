/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, error, info};
use serde::Deserialize;
use std::str::FromStr;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Direction, Frame};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Log a line whenever the visible state changes.
    Log,
    /// One JSON document per frame on stdout.
    Json,
    /// Redraw the shaft as text on stdout.
    Ascii,
}

impl FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "log" => Ok(SinkKind::Log),
            "json" => Ok(SinkKind::Json),
            "ascii" => Ok(SinkKind::Ascii),
            other => Err(format!("unknown sink '{}', expected log, json or ascii", other)),
        }
    }
}

/**
 * Render surface consumer.
 *
 * Reads frames until the driver closes the channel.
 */
pub struct FrameSink {
    kind: SinkKind,
    frame_rx: cbc::Receiver<Frame>,
}

/// The part of a frame worth a log line when it changes.
#[derive(PartialEq)]
struct Visible {
    floor: u8,
    paused: bool,
    passengers: u32,
    message: String,
}

impl FrameSink {
    pub fn new(kind: SinkKind, frame_rx: cbc::Receiver<Frame>) -> FrameSink {
        FrameSink { kind, frame_rx }
    }

    pub fn run(self) {
        let mut last: Option<Visible> = None;

        for frame in self.frame_rx.iter() {
            match self.kind {
                SinkKind::Log => log_frame(&frame, &mut last),
                SinkKind::Json => match serde_json::to_string(&frame) {
                    Ok(line) => println!("{}", line),
                    Err(e) => error!("Failed to serialize frame {}: {}", frame.tick, e),
                },
                SinkKind::Ascii => print!("\x1B[2J\x1B[H{}", render_ascii(&frame)),
            }
        }

        debug!("Frame channel closed, render surface stopped");
    }
}

fn log_frame(frame: &Frame, last: &mut Option<Visible>) {
    let visible = Visible {
        floor: frame.current_floor,
        paused: frame.paused,
        passengers: frame.passengers,
        message: frame.message.clone(),
    };

    if last.as_ref() != Some(&visible) {
        let state = if frame.paused { "dwelling" } else { "moving" };
        info!(
            "[tick {}] {} {} towards floor {}, y={}, {} | {}",
            frame.tick,
            state,
            frame.direction,
            frame.current_floor,
            frame.car.y,
            frame.occupancy,
            frame.message
        );
        *last = Some(visible);
    } else {
        debug!("[tick {}] y={}", frame.tick, frame.car.y);
    }
}

/// Draws the frame as text, top floor first, marking the floor closest to the car.
pub fn render_ascii(frame: &Frame) -> String {
    let car_floor = frame
        .floor_lines
        .iter()
        .min_by_key(|line| (line.y - frame.car.height - frame.car.y).abs())
        .map(|line| line.floor);

    let car = match (frame.paused, frame.direction) {
        (true, _) => "[==]",
        (false, Direction::Up) => "[^^]",
        (false, Direction::Down) => "[vv]",
    };

    let mut lines = vec![
        frame.credits.clone(),
        frame.occupancy.clone(),
        frame.message.clone(),
    ];
    for line in frame.floor_lines.iter().rev() {
        let cell = if Some(line.floor) == car_floor { car } else { "    " };
        lines.push(format!("Floor {} |{}|", line.floor, cell));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
