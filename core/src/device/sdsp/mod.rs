//! S-DSP: the 8-voice sample playback engine.
//!
//! The chip owns a 128-byte register file the CPU programs through the
//! ACR's address/data window, plus per-voice pipeline state. Once every 32
//! audio sub-cycles `run_sample` advances all eight voices one step and
//! produces a single stereo frame.

pub mod brr;
pub mod envelope;
mod gauss;
pub mod regs;
mod voice;

use brr::{BLOCK_SIZE, HDR_END, HDR_FLAGS, clamp16};
use envelope::{CounterNetwork, EnvMode};
use regs::*;
use voice::Voice;

/// One 32 kHz stereo output frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub left: i16,
    pub right: i16,
}

impl Frame {
    /// Mix two frames with per-channel saturation.
    pub fn blend(self, other: Frame) -> Frame {
        Frame {
            left: clamp16(self.left as i32 + other.left as i32) as i16,
            right: clamp16(self.right as i32 + other.right as i32) as i16,
        }
    }
}

/// A sample-directory entry: where the BRR stream starts, and where it
/// continues when a block with the loop flag ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirEntry {
    pub base: u16,
    pub loop_addr: u16,
}

fn read_aram_word(aram: &[u8; 0x10000], addr: u16) -> u16 {
    let lo = aram[addr as usize];
    let hi = aram[addr.wrapping_add(1) as usize];
    u16::from_le_bytes([lo, hi])
}

/// Look up directory entry `srcn` for directory page `dir`.
pub fn dir_entry(aram: &[u8; 0x10000], dir: u8, srcn: u8) -> DirEntry {
    let addr = ((dir as u16) << 8).wrapping_add((srcn as u16) << 2);
    DirEntry {
        base: read_aram_word(aram, addr),
        loop_addr: read_aram_word(aram, addr.wrapping_add(2)),
    }
}

pub struct Sdsp {
    regs: [u8; 0x80],
    voices: [Voice; VOICES],
    ctr: CounterNetwork,

    /// Newly keyed-on bits as of the most recent polling sample.
    kon: u8,
    /// KON register value at the previous poll, for edge detection.
    prev_kon: u8,
    koff: u8,
    /// Flips every sample; KON/KOFF are only polled on the clear phase.
    toggle: bool,

    bad_reg_accesses: u64,
}

impl Default for Sdsp {
    fn default() -> Self {
        Self::new()
    }
}

impl Sdsp {
    pub fn new() -> Self {
        Self {
            regs: [0; 0x80],
            voices: [Voice::default(); VOICES],
            ctr: CounterNetwork::new(),
            kon: 0,
            prev_kon: 0,
            koff: 0,
            toggle: false,
            bad_reg_accesses: 0,
        }
    }

    /// Install the register image from a snapshot. The voice pipelines
    /// start quiet; whatever plays next comes from KON processing.
    pub fn restore(&mut self, saved: &[u8; 0x80]) {
        self.regs = *saved;
        self.voices = [Voice::default(); VOICES];
        self.ctr.reset();
        self.kon = 0;
        self.prev_kon = 0;
        self.koff = 0;
        self.toggle = false;
    }

    pub fn reset(&mut self) {
        self.regs = [0; 0x80];
        self.ctr.reset();
    }

    /// Store through the ACR data window. Addresses with bit 7 set have no
    /// register behind them; the store is dropped and counted.
    pub fn store(&mut self, addr: u8, byte: u8) {
        if addr & 0x80 != 0 {
            self.bad_reg_accesses += 1;
            return;
        }

        match addr {
            // Any write clears the end-of-sample latches.
            REG_ENDX => self.regs[REG_ENDX as usize] = 0,
            _ => self.regs[addr as usize] = byte,
        }
    }

    /// Load through the ACR data window; open bus above 0x7F.
    pub fn load(&mut self, addr: u8) -> u8 {
        if addr & 0x80 != 0 {
            self.bad_reg_accesses += 1;
            return 0xff;
        }
        self.regs[addr as usize]
    }

    /// Raw register file, for state dumps and tests.
    pub fn regs(&self) -> &[u8; 0x80] {
        &self.regs
    }

    /// How many stores/loads hit nonexistent register addresses so far.
    pub fn bad_reg_accesses(&self) -> u64 {
        self.bad_reg_accesses
    }

    fn reg(&self, addr: u8) -> u8 {
        self.regs[addr as usize]
    }

    /// Run all eight voices for one sample period and mix their outputs.
    pub fn run_sample(&mut self, aram: &[u8; 0x10000]) -> Frame {
        self.toggle = !self.toggle;
        if !self.toggle {
            // Edge-detect KON so a held bit only keys on once; KOFF is
            // level-sensitive.
            let kon_reg = self.reg(REG_KON);
            self.kon = kon_reg & !self.prev_kon;
            self.prev_kon = kon_reg;
            self.koff = self.reg(REG_KOFF);
        }

        self.ctr.run();

        let mut frame = Frame::default();
        for i in 0..VOICES {
            self.voice_run(i, aram);
            frame = frame.blend(self.voice_sample(i));
        }
        frame
    }

    fn voice_run(&mut self, i: usize, aram: &[u8; 0x10000]) {
        let bit = 1u8 << i;
        let pitch_lo = self.reg(voice_reg(i, VREG_PITCH_LO));
        let pitch_hi = self.reg(voice_reg(i, VREG_PITCH_HI));
        let srcn = self.reg(voice_reg(i, VREG_SRCN));
        let adsr1 = self.reg(voice_reg(i, VREG_ADSR1));
        let adsr2 = self.reg(voice_reg(i, VREG_ADSR2));
        let gain = self.reg(voice_reg(i, VREG_GAIN));
        let dir = self.reg(REG_DIR);
        let flg = self.reg(REG_FLG);
        let envx_reg = voice_reg(i, VREG_ENVX) as usize;
        let outx_reg = voice_reg(i, VREG_OUTX) as usize;

        let st = &mut self.voices[i];

        st.srcn_ptr = ((dir as u16) << 8).wrapping_add((srcn as u16) << 2);

        // Once the warm-up is over the voice tracks the loop half of the
        // directory entry; during warm-up it still points at the base.
        if st.attack_delay == 0 {
            st.srcn_ptr = st.srcn_ptr.wrapping_add(2);
        }
        st.next_brr_addr = read_aram_word(aram, st.srcn_ptr);

        st.pitch = u16::from_le_bytes([pitch_lo, pitch_hi]) & 0x3fff;
        st.brr_hdr = aram[st.brr_addr as usize];

        // PMON would modulate st.pitch with the previous voice's output
        // here; pitch modulation is not implemented.

        if st.attack_delay > 0 {
            if st.attack_delay == 5 {
                st.brr_addr = st.next_brr_addr;
                st.brr_off = 1;
                st.buf_pos = 0;
                st.brr_hdr = 0;
            }

            st.attack_delay -= 1;
            st.interp_pos = if st.attack_delay <= 3 { 0x4000 } else { 0 };
            st.pitch = 0;
            st.env = 0;
        }

        if st.env != 0 {
            // NON-flagged voices would take the noise generator here; the
            // unimplemented path falls back to interpolated BRR output.
            st.output_sample = st.interpolate() as i16;
            self.regs[outx_reg] = (st.output_sample >> 8) as u8;

            st.output_sample = (((st.output_sample as i32 * st.env) >> 11) & !1) as i16;
            self.regs[envx_reg] = (st.env >> 4) as u8;
        } else {
            self.regs[outx_reg] = 0;
            self.regs[envx_reg] = 0;
            st.output_sample = 0;
        }

        // Soft reset silences every voice outright.
        if flg & FLG_SOFT_RESET != 0 {
            st.env_mode = EnvMode::Release;
            st.env = 0;
        }

        if !self.toggle {
            if self.koff & bit != 0 && st.env_mode != EnvMode::Release {
                st.env_mode = EnvMode::Release;
            }
            if self.kon & bit != 0 {
                st.env_mode = EnvMode::Attack;
                st.attack_delay = 5;
            }
        }

        if st.attack_delay == 0 {
            st.run_envelope(&self.ctr, adsr1, adsr2, gain);
            if st.env_mode == EnvMode::Release && st.env == 0 {
                return;
            }
        }

        if st.interp_pos >= 0x4000 {
            st.brr_sample4(aram);
            if st.brr_off as usize >= BLOCK_SIZE {
                st.brr_addr = st.brr_addr.wrapping_add(BLOCK_SIZE as u16);
                if st.brr_hdr & HDR_END != 0 {
                    st.brr_addr = st.next_brr_addr;
                    self.regs[REG_ENDX as usize] |= bit;
                    // End of a one-shot stream: let the voice ring down
                    // through the release ramp.
                    if st.brr_hdr & HDR_FLAGS == HDR_END {
                        st.env_mode = EnvMode::Release;
                    }
                }
                st.brr_off = 1;
            }
        }

        st.interp_pos = (st.interp_pos & 0x3fff) + st.pitch as i32;
        if st.interp_pos > 0x7fff {
            st.interp_pos = 0x7fff;
        }

        // A key-on this very sample clears the voice's ENDX latch.
        if st.attack_delay == 5 {
            self.regs[REG_ENDX as usize] &= !bit;
        }
    }

    fn voice_sample(&self, i: usize) -> Frame {
        let st = &self.voices[i];
        let voll = self.reg(voice_reg(i, VREG_VOLL)) as i8 as i32;
        let volr = self.reg(voice_reg(i, VREG_VOLR)) as i8 as i32;

        Frame {
            left: ((st.output_sample as i32 * voll) >> 7) as i16,
            right: ((st.output_sample as i32 * volr) >> 7) as i16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_blend_saturates() {
        let a = Frame {
            left: 0x7000,
            right: -0x7000,
        };
        let b = Frame {
            left: 0x7000,
            right: -0x7000,
        };
        let mixed = a.blend(b);
        assert_eq!(mixed.left, 0x7fff);
        assert_eq!(mixed.right, -0x8000);
    }

    #[test]
    fn endx_write_clears_regardless_of_value() {
        let mut dsp = Sdsp::new();
        dsp.store(REG_ENDX, 0xff);
        assert_eq!(dsp.load(REG_ENDX), 0);
    }

    #[test]
    fn out_of_range_register_is_open_bus() {
        let mut dsp = Sdsp::new();
        dsp.store(0x80, 0x55);
        assert_eq!(dsp.load(0xff), 0xff);
        assert_eq!(dsp.bad_reg_accesses(), 2);
        assert_eq!(dsp.regs()[0], 0);
    }
}
