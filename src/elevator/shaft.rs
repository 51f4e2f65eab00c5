/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::BuildingConfig;
use crate::shared::{CarRect, FloorLine};

/**
 * Fixed geometry of the shaft and the floor-to-pixel mapping.
 *
 * Pixel y grows downwards, so higher floors map to smaller y.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Shaft {
    n_floors: u8,
    window_width: i32,
    window_height: i32,
    floor_height: i32,
    car_width: i32,
    car_height: i32,
}

impl Shaft {
    pub fn new(config: &BuildingConfig) -> Shaft {
        Shaft {
            n_floors: config.n_floors,
            window_width: config.window_width,
            window_height: config.window_height,
            floor_height: config.floor_height,
            car_width: config.car_width,
            car_height: config.car_height,
        }
    }

    pub fn n_floors(&self) -> u8 {
        self.n_floors
    }

    pub fn window_width(&self) -> i32 {
        self.window_width
    }

    pub fn window_height(&self) -> i32 {
        self.window_height
    }

    /// Top-left y of the car when it stands at `floor`.
    pub fn y_for_floor(&self, floor: u8) -> i32 {
        self.window_height - floor as i32 * self.floor_height - self.car_height
    }

    /// Where the car sits before its first trip, below the first floor line.
    pub fn ground_y(&self) -> i32 {
        self.window_height - self.car_height
    }

    pub fn is_terminus(&self, floor: u8) -> bool {
        floor == 1 || floor == self.n_floors
    }

    pub fn floor_lines(&self) -> Vec<FloorLine> {
        (1..=self.n_floors)
            .map(|floor| FloorLine {
                floor,
                y: self.y_for_floor(floor) + self.car_height,
            })
            .collect()
    }

    pub fn car_rect(&self, y: i32) -> CarRect {
        CarRect {
            x: self.window_width / 2 - self.car_width / 2,
            y,
            width: self.car_width,
            height: self.car_height,
        }
    }
}
