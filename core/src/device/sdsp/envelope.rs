//! Envelope generators and the global counter network that gates them.

use super::regs::{
    ADSR1_ATTACK_RATE_MASK, ADSR1_DECAY_RATE_MASK, ADSR1_DECAY_RATE_SHIFT, ADSR1_USE_ADSR,
    ADSR2_SUSTAIN_LEVEL_SHIFT, ADSR2_SUSTAIN_RATE_MASK, GAIN_MODE_CUSTOM, GAIN_MODE_MASK,
    GAIN_MODE_SHIFT, GAIN_RATE_MASK,
};
use super::voice::Voice;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvMode {
    #[default]
    Release,
    Attack,
    Decay,
    Sustain,
}

// Which counter serves each 5-bit rate (0xff marks rate 0, which never
// fires), and the phase mask the counter must clear for the rate to fire.
#[rustfmt::skip]
const CTR_NUMBER: [u8; 32] = [
    0xff,
          0, 1,
    2, 0, 1,
    2, 0, 1,
    2, 0, 1,
    2, 0, 1,
    2, 0, 1,
    2, 0, 1,
    2, 0, 1,
    2, 0, 1,
    2, 0, 1,
          0,
          0,
];
#[rustfmt::skip]
const CTR_MASK: [u16; 32] = [
    0,
                  0x7ff, 0x1ff,
    0x0ff, 0x3ff, 0x0ff,
    0x07f, 0x1ff, 0x07f,
    0x03f, 0x0ff, 0x03f,
    0x01f, 0x07f, 0x01f,
    0x00f, 0x03f, 0x00f,
    0x007, 0x01f, 0x007,
    0x003, 0x00f, 0x003,
    0x001, 0x007, 0x001,
    0x000, 0x003, 0x000,
                  0x001,
                  0x000,
];

const CTR_RATE: [u8; 3] = [1, 3, 5];
const CTR_INTERNAL_INIT: [u8; 3] = [1, 2, 3];
const CTR_INITIAL: [u32; 3] = [0u32, (-347i32) as u32, (-107i32) as u32];

/// Three free-running sample counters: counter 0 advances every sample,
/// counter 1 every third, counter 2 every fifth. The staggered initial
/// values spread envelope steps of equal rates across voices.
#[derive(Clone, Debug)]
pub struct CounterNetwork {
    internal: [u8; 3],
    out: [u32; 3],
}

impl Default for CounterNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterNetwork {
    pub fn new() -> Self {
        Self {
            internal: CTR_INTERNAL_INIT,
            out: CTR_INITIAL,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance one DSP sample.
    pub fn run(&mut self) {
        self.out[0] = self.out[0].wrapping_add(1);

        self.internal[1] -= 1;
        if self.internal[1] == 0 {
            self.internal[1] = 3;
            self.out[1] = self.out[1].wrapping_add(1);
        }
        self.internal[2] -= 1;
        if self.internal[2] == 0 {
            self.internal[2] = 5;
            self.out[2] = self.out[2].wrapping_add(1);
        }
    }

    /// Does an envelope step at this rate commit on the current sample?
    pub fn fires(&self, rate: u8) -> bool {
        if rate == 0 {
            return false;
        }

        let nr = CTR_NUMBER[rate as usize] as usize;
        if self.out[nr] & CTR_MASK[rate as usize] as u32 != 0 {
            return false;
        }
        // The slower counters only count on their own divider phase.
        self.internal[nr] == CTR_RATE[nr]
    }
}

/// A candidate envelope step: the next level and the rate that gates it.
struct Envelope {
    env: i32,
    rate: u8,
}

impl Voice {
    fn adsr_step(&self, adsr1: u8, adsr2: u8) -> Envelope {
        match self.env_mode {
            EnvMode::Attack => {
                let rate = (adsr1 & ADSR1_ATTACK_RATE_MASK) * 2 + 1;
                Envelope {
                    env: self.env + if rate == 0x1f { 0x400 } else { 0x20 },
                    rate,
                }
            }
            EnvMode::Decay => Envelope {
                env: self.env - ((self.env >> 8) + 1),
                rate: 0x10 + ((adsr1 >> ADSR1_DECAY_RATE_SHIFT) & ADSR1_DECAY_RATE_MASK),
            },
            EnvMode::Sustain => Envelope {
                env: self.env - ((self.env >> 8) + 1),
                rate: adsr2 & ADSR2_SUSTAIN_RATE_MASK,
            },
            EnvMode::Release => unreachable!("release is stepped before mode dispatch"),
        }
    }

    fn gain_step(&self, gain: u8) -> Envelope {
        if gain & GAIN_MODE_CUSTOM == 0 {
            // Direct mode: the level is programmed outright, always applied.
            return Envelope {
                env: (gain as i32) * 0x10,
                rate: 31,
            };
        }

        let mode = (gain >> GAIN_MODE_SHIFT) & GAIN_MODE_MASK;
        let env = match mode {
            0 => self.env - 0x20,                    // linear decrease
            1 => self.env - ((self.env >> 8) + 1),   // exponential decrease
            2 | 3 => self.env + 0x20,                // linear / bent increase
            _ => unreachable!(),
        };
        Envelope {
            env,
            rate: gain & GAIN_RATE_MASK,
        }
    }

    /// Advance the envelope one sample. Mode transitions happen every
    /// sample; the level itself only commits when the counter network
    /// fires for the step's rate.
    pub(crate) fn run_envelope(&mut self, ctr: &CounterNetwork, adsr1: u8, adsr2: u8, gain: u8) {
        if self.env_mode == EnvMode::Release {
            // Release ramps the same way in every mode.
            if self.env > 8 {
                self.env -= 8;
            } else {
                self.env = 0;
            }
            return;
        }

        let (sustain_target, step) = if adsr1 & ADSR1_USE_ADSR != 0 {
            (adsr2 >> ADSR2_SUSTAIN_LEVEL_SHIFT, self.adsr_step(adsr1, adsr2))
        } else {
            (gain >> ADSR2_SUSTAIN_LEVEL_SHIFT, self.gain_step(gain))
        };
        let Envelope { mut env, rate } = step;

        if (env >> 8) == sustain_target as i32 && self.env_mode == EnvMode::Decay {
            self.env_mode = EnvMode::Sustain;
        }

        if !(0..=0x7ff).contains(&env) {
            env = if env < 0 { 0 } else { 0x7ff };
            if self.env_mode == EnvMode::Attack {
                self.env_mode = EnvMode::Decay;
            }
        }

        if ctr.fires(rate) {
            self.env = env;
        }
    }
}
