pub mod sdsp;
pub mod timer;

pub use sdsp::Sdsp;
pub use timer::Timer;
