pub mod input;

mod input_tests;

pub use input::ControlInput;
