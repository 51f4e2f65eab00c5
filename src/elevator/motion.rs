/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::Config;
use crate::elevator::passengers::{
    Boarding, Exchange, PassengerModel, FULL_CAPACITY_MESSAGE, UNKNOWN_FLOOR_MESSAGE,
};
use crate::elevator::rng::RandomSource;
use crate::elevator::shaft::Shaft;
use crate::shared::{Direction, Frame};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Car {
    /// Floor the car is heading for, or standing at while paused.
    pub current_floor: u8,
    pub y: i32,
    pub direction: Direction,
    pub paused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub floor: u8,
    pub exchange: Exchange,
    /// Floor picked by a random reversal at a terminus.
    pub relocated_to: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Paused,
    Moved,
    Arrived(Arrival),
}

/**
 * Complete simulation state: the car, its passengers and the text shown to the user.
 *
 * The owner of a `Simulation` is its only writer. Timers live outside; `tick`
 * reports an arrival and the caller is expected to call `resume` once the dwell
 * time has elapsed.
 *
 * # Fields
 * - `car`:                     Position, target floor, direction and paused flag.
 * - `passengers`:              Occupancy and pending exits.
 * - `shaft`:                   Floor-to-pixel geometry.
 * - `message`:                 Status message, cleared on resume.
 * - `credits`:                 Static credits line.
 * - `speed`:                   Pixels moved per tick.
 * - `reversal_probability`:    Chance of a random reversal on reaching a terminus.
 * - `passengers_to_remove`:    Riders removed by the manual remove action.
 * - `rng`:                     Source of every random draw.
 * - `ticks`:                   Ticks processed so far, paused ones included.
 */
pub struct Simulation<R: RandomSource> {
    car: Car,
    passengers: PassengerModel,
    shaft: Shaft,
    message: String,
    credits: String,
    speed: i32,
    reversal_probability: f64,
    passengers_to_remove: u32,
    rng: R,
    ticks: u64,
}

/***************************************/
/*             Public API              */
/***************************************/
impl<R: RandomSource> Simulation<R> {
    pub fn new(config: &Config, rng: R) -> Simulation<R> {
        let shaft = Shaft::new(&config.building);
        Simulation {
            car: Car {
                current_floor: 1,
                y: shaft.ground_y(),
                direction: Direction::Up,
                paused: false,
            },
            passengers: PassengerModel::new(config.building.max_capacity),
            shaft,
            message: String::new(),
            credits: config.building.credits.clone(),
            speed: config.simulation.speed,
            reversal_probability: config.simulation.reversal_probability,
            passengers_to_remove: config.building.passengers_to_remove,
            rng,
            ticks: 0,
        }
    }

    pub fn car(&self) -> &Car {
        &self.car
    }

    pub fn passengers(&self) -> &PassengerModel {
        &self.passengers
    }

    pub fn shaft(&self) -> &Shaft {
        &self.shaft
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances the car one step towards its target floor unless it is dwelling.
    pub fn tick(&mut self) -> TickOutcome {
        self.ticks += 1;
        if self.car.paused {
            return TickOutcome::Paused;
        }

        let target_y = self.shaft.y_for_floor(self.car.current_floor);
        let reached = match self.car.direction {
            Direction::Up => {
                self.car.y -= self.speed;
                self.car.y <= target_y
            }
            Direction::Down => {
                self.car.y += self.speed;
                self.car.y >= target_y
            }
        };

        if !reached {
            return TickOutcome::Moved;
        }

        self.car.y = target_y;
        let arrival = self.handle_arrival();
        self.advance_target();
        TickOutcome::Arrived(arrival)
    }

    /// Ends the dwell started by the last arrival.
    pub fn resume(&mut self) {
        debug!("Resuming from floor {}", self.car.current_floor);
        self.car.paused = false;
        self.message.clear();
    }

    pub fn go_up(&mut self) {
        self.car.direction = Direction::Up;
        self.message = "Going up".to_string();
    }

    pub fn go_down(&mut self) {
        self.car.direction = Direction::Down;
        self.message = "Going down".to_string();
    }

    /// Boards a single rider bound for a random floor other than the current target.
    pub fn add_passenger(&mut self) -> Boarding {
        let destination = self
            .rng
            .floor_except(self.shaft.n_floors(), self.car.current_floor);
        self.add_passengers(1, destination)
    }

    /// Removes the configured number of riders.
    pub fn remove_passenger(&mut self) -> u32 {
        self.remove_passengers(self.passengers_to_remove)
    }

    pub fn add_passengers(&mut self, count: u32, destination: u8) -> Boarding {
        // Riders bound for a floor outside the shaft could never get out.
        if !(1..=self.shaft.n_floors()).contains(&destination) {
            debug!("Rejected {} passengers for unknown floor {}", count, destination);
            self.message = UNKNOWN_FLOOR_MESSAGE.to_string();
            return Boarding::Rejected;
        }

        let boarding = self.passengers.add_passengers(count, destination);
        if boarding == Boarding::Rejected {
            self.message = FULL_CAPACITY_MESSAGE.to_string();
        }
        boarding
    }

    pub fn remove_passengers(&mut self, count: u32) -> u32 {
        let removed = self.passengers.remove_passengers(count);
        self.message = format!("Removed {} passengers.", removed);
        removed
    }

    pub fn exchange_at_floor(&mut self, floor: u8) -> Exchange {
        let exchange =
            self.passengers
                .exchange_at_floor(floor, self.shaft.n_floors(), &mut self.rng);
        self.message = exchange.message();
        exchange
    }

    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.ticks,
            window_width: self.shaft.window_width(),
            window_height: self.shaft.window_height(),
            floor_lines: self.shaft.floor_lines(),
            car: self.shaft.car_rect(self.car.y),
            credits: self.credits.clone(),
            occupancy: format!(
                "Passengers: {}/{}",
                self.passengers.count(),
                self.passengers.capacity()
            ),
            message: self.message.clone(),
            current_floor: self.car.current_floor,
            direction: self.car.direction,
            paused: self.car.paused,
            passengers: self.passengers.count(),
        }
    }

    #[cfg(test)]
    pub fn test_set_car(&mut self, car: Car) {
        self.car = car;
    }

    #[cfg(test)]
    pub fn test_rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /***************************************/
    /*          Private helpers            */
    /***************************************/
    fn handle_arrival(&mut self) -> Arrival {
        let floor = self.car.current_floor;
        self.car.paused = true;

        let exchange = self.exchange_at_floor(floor);

        let mut relocated_to = None;
        if self.shaft.is_terminus(floor) && self.rng.chance(self.reversal_probability) {
            // Never relocate to the terminus itself, the car would not move.
            let relocation = self.rng.floor_except(self.shaft.n_floors(), floor);
            self.car.direction = self.car.direction.reversed();
            self.car.current_floor = relocation;
            relocated_to = Some(relocation);
            debug!(
                "Random reversal at floor {}, heading {} via floor {}",
                floor, self.car.direction, relocation
            );
        }

        info!(
            "Arrived at floor {}: {} out, {} in, occupancy {}/{}",
            floor,
            exchange.exited,
            exchange.boarded.map(|(entered, _)| entered).unwrap_or(0),
            self.passengers.count(),
            self.passengers.capacity()
        );

        Arrival {
            floor,
            exchange,
            relocated_to,
        }
    }

    fn advance_target(&mut self) {
        let top_floor = self.shaft.n_floors();
        match self.car.direction {
            Direction::Up => {
                if self.car.current_floor < top_floor {
                    self.car.current_floor += 1;
                } else {
                    self.car.direction = Direction::Down;
                    self.car.current_floor -= 1;
                }
            }
            Direction::Down => {
                if self.car.current_floor > 1 {
                    self.car.current_floor -= 1;
                } else {
                    self.car.direction = Direction::Up;
                    self.car.current_floor += 1;
                }
            }
        }
    }
}
