pub mod macros;
pub mod structs;

pub use structs::CarRect;
pub use structs::Command;
pub use structs::Direction;
pub use structs::FloorLine;
pub use structs::Frame;
