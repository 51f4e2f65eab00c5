pub mod sink;


pub use sink::FrameSink;
pub use sink::SinkKind;
