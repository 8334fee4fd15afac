/// One of the three APU interval timers.
///
/// A timer is a fractional divider: while enabled, each tick of its input
/// clock (8 kHz for T0/T1, 64 kHz for T2) increments an internal counter,
/// and reaching the target wraps the counter and signals the 4-bit output
/// stage. The divider reload value is latched from TxDIV only on the
/// disabled-to-enabled edge of the CTRL bit; a reload value of 0 divides
/// by 256.
#[derive(Clone, Copy, Debug, Default)]
pub struct Timer {
    cycles: u16,
    target: u16,
    enabled: bool,
}

impl Timer {
    /// A timer that has never been enabled.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Enable edge: latch the divider and restart counting from zero.
    pub fn start(div_reg: u8) -> Self {
        Self {
            cycles: 0,
            target: if div_reg == 0 { 0x100 } else { div_reg as u16 },
            enabled: true,
        }
    }

    pub fn stop(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Advance one input-clock tick. Returns true when the divider wraps
    /// (the caller bumps the corresponding TxOUT stage).
    pub fn tick(&mut self) -> bool {
        if !self.enabled {
            return false;
        }

        self.cycles += 1;
        if self.cycles >= self.target {
            self.cycles = 0;
            return true;
        }
        false
    }
}
