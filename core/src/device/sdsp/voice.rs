use super::brr::{self, clamp16};
use super::envelope::EnvMode;
use super::gauss::GAUSS;

pub(crate) const BRR_BUF_SZ: usize = 12;

/// Runtime state of one voice. The register-file side (volumes, pitch,
/// ADSR, GAIN, SRCN) stays in the chip's register bytes; this is only what
/// the sample pipeline needs to carry between samples.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Voice {
    pub interp_pos: i32,
    pub env: i32,
    pub output_sample: i16,
    pub srcn_ptr: u16,
    pub next_brr_addr: u16,
    pub brr_addr: u16,
    pub pitch: u16,
    pub env_mode: EnvMode,
    pub brr_hdr: u8,
    /// Next byte to consume within the current BRR block; the header at
    /// offset 0 is read separately, so this walks 1 through 8 and resets
    /// when the ninth byte has been eaten.
    pub brr_off: u8,
    pub buf_pos: u8,
    pub attack_delay: u8,
    /// Ring of decoded samples the interpolator reads from.
    pub buf: [i16; BRR_BUF_SZ],
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            interp_pos: 0,
            env: 0,
            output_sample: 0,
            srcn_ptr: 0,
            next_brr_addr: 0,
            brr_addr: 0,
            pitch: 0,
            env_mode: EnvMode::Release,
            brr_hdr: 0,
            brr_off: 1,
            buf_pos: 0,
            attack_delay: 0,
            buf: [0; BRR_BUF_SZ],
        }
    }
}

/// Ring index arithmetic; positions only ever overshoot by a decode group
/// plus the interpolator's 3-sample lookahead.
fn wrap12(val: u8) -> usize {
    debug_assert!(val as usize <= BRR_BUF_SZ + 7 + 3);
    if val as usize >= BRR_BUF_SZ {
        val as usize - BRR_BUF_SZ
    } else {
        val as usize
    }
}

impl Voice {
    /// The two samples preceding the current write position, feeding the
    /// prediction filters of the next decode group.
    fn filter_state(&self) -> (i32, i32) {
        if self.buf_pos != 0 {
            (
                self.buf[self.buf_pos as usize - 2] as i32,
                self.buf[self.buf_pos as usize - 1] as i32,
            )
        } else {
            (
                self.buf[BRR_BUF_SZ - 2] as i32,
                self.buf[BRR_BUF_SZ - 1] as i32,
            )
        }
    }

    fn brr_byte(&mut self, aram: &[u8; 0x10000]) -> u8 {
        let byte = aram[self.brr_addr.wrapping_add(self.brr_off as u16) as usize];
        self.brr_off += 1;
        byte
    }

    /// Decode the next group of four samples from the current block into
    /// the ring buffer.
    pub(crate) fn brr_sample4(&mut self, aram: &[u8; 0x10000]) {
        let filter = brr::hdr_filter(self.brr_hdr);
        let shift = brr::hdr_shift(self.brr_hdr);
        let (older, old) = self.filter_state();

        let bytes = [self.brr_byte(aram), self.brr_byte(aram)];
        let mut input = [0i32; 4];
        for (pair, byte) in bytes.into_iter().enumerate() {
            let nybs = brr::nybbles(byte);
            input[pair * 2] = brr::prescale(nybs[0], shift);
            input[pair * 2 + 1] = brr::prescale(nybs[1], shift);
        }

        let [s0, s1, s2, s3] = input;
        let (a, b, c, d) = match filter {
            0 => (s0, s1, s2, s3),
            1 => {
                let a = brr::filter1(s0, old);
                let b = brr::filter1(s1, a);
                let c = brr::filter1(s2, b);
                let d = brr::filter1(s3, c);
                (a, b, c, d)
            }
            2 => {
                let a = brr::filter2(s0, old, older);
                let b = brr::filter2(s1, a, old);
                let c = brr::filter2(s2, b, a);
                let d = brr::filter2(s3, c, b);
                (a, b, c, d)
            }
            3 => {
                let a = brr::filter3(s0, old, older);
                let b = brr::filter3(s1, a, old);
                let c = brr::filter3(s2, b, a);
                let d = brr::filter3(s3, c, b);
                (a, b, c, d)
            }
            _ => unreachable!(),
        };

        let pos = self.buf_pos as usize;
        self.buf[pos] = clamp16(a) as i16;
        self.buf[pos + 1] = clamp16(b) as i16;
        self.buf[pos + 2] = clamp16(c) as i16;
        self.buf[pos + 3] = clamp16(d) as i16;

        self.buf_pos += 4;
        if self.buf_pos as usize >= BRR_BUF_SZ {
            self.buf_pos = 0;
        }
    }

    /// Four-tap gaussian interpolation at the current fractional position.
    /// The result is truncated, not clamped; the envelope multiply that
    /// follows brings it back into range.
    pub(crate) fn interpolate(&self) -> i32 {
        let interp_hi = ((self.interp_pos >> 12) & 0x7) as u8;
        let interp_mid = (self.interp_pos >> 4) as u8 as usize;
        let buf_pos = self.buf_pos + interp_hi;

        let input = [
            self.buf[wrap12(buf_pos)] as i32,
            self.buf[wrap12(buf_pos + 1)] as i32,
            self.buf[wrap12(buf_pos + 2)] as i32,
            self.buf[wrap12(buf_pos + 3)] as i32,
        ];

        let mut out = 0i32;
        out += (GAUSS[255 - interp_mid] as i32 * input[0]) >> 11;
        out += (GAUSS[511 - interp_mid] as i32 * input[1]) >> 11;
        out += (GAUSS[256 + interp_mid] as i32 * input[2]) >> 11;
        out += (GAUSS[interp_mid] as i32 * input[3]) >> 11;

        out & !1
    }
}
