pub mod driver;
pub mod motion;
pub mod passengers;
pub mod rng;
pub mod shaft;

mod driver_tests;

pub use driver::SimulationDriver;
pub use motion::Simulation;
pub use rng::SimRng;
