pub mod bus;
pub mod sink;

pub use bus::Bus;
pub use sink::SampleSink;
