pub mod core;
pub mod cpu;
pub mod device;
pub mod machine;

pub mod prelude {
    pub use crate::core::{Bus, SampleSink};
    pub use crate::cpu::spc700::{Spc700, Spc700Regs, Step};
    pub use crate::machine::{Apu, OverlayPolicy, RunOutcome, StopReason};
}
