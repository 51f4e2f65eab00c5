/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;
use std::collections::BTreeMap;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::rng::RandomSource;

/***************************************/
/*       Public data structures        */
/***************************************/
pub const FULL_CAPACITY_MESSAGE: &str = "Cannot add passengers. Elevator at full capacity.";
pub const UNKNOWN_FLOOR_MESSAGE: &str = "Cannot add passengers. No such floor.";

/**
 * Occupancy bookkeeping for the car.
 *
 * # Fields
 * - `count`:           Riders currently inside the car.
 * - `capacity`:        Hard ceiling for `count`.
 * - `destinations`:    Pending exits per destination floor. Entries are zeroed, never removed.
 *
 * The sum of all pending exits never exceeds `count`.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerModel {
    count: u32,
    capacity: u32,
    destinations: BTreeMap<u8, u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boarding {
    Admitted,
    Rejected,
}

/// Result of stopping at a floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub floor: u8,
    pub exited: u32,
    /// Riders that boarded and their shared destination, `None` when the car was full.
    pub boarded: Option<(u32, u8)>,
}

impl Exchange {
    pub fn message(&self) -> String {
        let mut message = format!("Passengers exiting at floor {}: {}", self.floor, self.exited);
        if let Some((entered, _)) = self.boarded {
            message.push_str(&format!(" | Passengers entering: {}", entered));
        }
        message
    }
}

impl PassengerModel {
    pub fn new(capacity: u32) -> PassengerModel {
        PassengerModel {
            count: 0,
            capacity,
            destinations: BTreeMap::new(),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn destinations(&self) -> &BTreeMap<u8, u32> {
        &self.destinations
    }

    pub fn pending_for(&self, floor: u8) -> u32 {
        self.destinations.get(&floor).copied().unwrap_or(0)
    }

    pub fn total_pending(&self) -> u32 {
        self.destinations.values().sum()
    }

    /// Boards `count` riders bound for `destination`, or none of them if that would exceed capacity.
    pub fn add_passengers(&mut self, count: u32, destination: u8) -> Boarding {
        let over_capacity = self
            .count
            .checked_add(count)
            .map_or(true, |total| total > self.capacity);
        if over_capacity {
            debug!(
                "Rejected {} passengers for floor {}, occupancy {}/{}",
                count, destination, self.count, self.capacity
            );
            return Boarding::Rejected;
        }

        self.count += count;
        *self.destinations.entry(destination).or_insert(0) += count;
        Boarding::Admitted
    }

    /// Removes up to `count` riders and returns how many actually left.
    pub fn remove_passengers(&mut self, count: u32) -> u32 {
        let removed = count.min(self.count);
        self.count -= removed;

        // Riders leaving without a stop take their pending exits with them, lowest floor first.
        let mut excess = self.total_pending().saturating_sub(self.count);
        for pending in self.destinations.values_mut() {
            if excess == 0 {
                break;
            }
            let drained = excess.min(*pending);
            *pending -= drained;
            excess -= drained;
        }

        removed
    }

    /// Lets out everyone bound for `floor`, then boards a random group for one random other floor.
    pub fn exchange_at_floor<R: RandomSource>(
        &mut self,
        floor: u8,
        n_floors: u8,
        rng: &mut R,
    ) -> Exchange {
        let pending = self.pending_for(floor);
        let exited = pending.min(self.count);
        self.count -= exited;
        self.destinations.insert(floor, 0);

        let mut boarded = None;
        if self.count < self.capacity {
            let free = self.capacity - self.count;
            let entering = rng.range_inclusive(0, free);
            let destination = rng.floor_except(n_floors, floor);
            self.add_passengers(entering, destination);
            boarded = Some((entering, destination));
        }

        Exchange {
            floor,
            exited,
            boarded,
        }
    }
}
