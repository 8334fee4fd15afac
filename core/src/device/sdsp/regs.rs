//! S-DSP register map. The 128-byte file splits into eight 16-byte voice
//! slots (low nybble selects the per-voice register) with the global
//! registers sprinkled through the 0xC and 0xD columns.

pub const VOICES: usize = 8;

// Per-voice register offsets (within a voice's 16-byte slot).
pub const VREG_VOLL: u8 = 0x0;
pub const VREG_VOLR: u8 = 0x1;
pub const VREG_PITCH_LO: u8 = 0x2;
pub const VREG_PITCH_HI: u8 = 0x3;
pub const VREG_SRCN: u8 = 0x4;
pub const VREG_ADSR1: u8 = 0x5;
pub const VREG_ADSR2: u8 = 0x6;
pub const VREG_GAIN: u8 = 0x7;
pub const VREG_ENVX: u8 = 0x8;
pub const VREG_OUTX: u8 = 0x9;
pub const VREG_COEF: u8 = 0xf;

/// Register address of per-voice register `vreg` for voice `chan`.
pub fn voice_reg(chan: usize, vreg: u8) -> u8 {
    assert!(chan < VOICES);
    (chan as u8) << 4 | vreg
}

// Global registers, 0xC column.
pub const REG_MVOLL: u8 = 0x0c;
pub const REG_MVOLR: u8 = 0x1c;
pub const REG_EVOLL: u8 = 0x2c;
pub const REG_EVOLR: u8 = 0x3c;
pub const REG_KON: u8 = 0x4c;
pub const REG_KOFF: u8 = 0x5c;
pub const REG_FLG: u8 = 0x6c;
pub const REG_ENDX: u8 = 0x7c;

// Global registers, 0xD column.
pub const REG_EFB: u8 = 0x0d;
pub const REG_PMON: u8 = 0x2d; // pitch modulation
pub const REG_NON: u8 = 0x3d; // noise
pub const REG_EON: u8 = 0x4d; // echo
pub const REG_DIR: u8 = 0x5d; // sample directory (page number)
pub const REG_ESA: u8 = 0x6d; // echo buffer (page number)
pub const REG_EDL: u8 = 0x7d; // echo delay, 4 bits

// FLG bits; the bottom 5 bits are the noise frequency.
pub const FLG_SOFT_RESET: u8 = 1 << 7;
pub const FLG_MUTE: u8 = 1 << 6;
pub const FLG_ECHO_DISABLED: u8 = 1 << 5;

// ADSR1/ADSR2/GAIN field layout.
pub const ADSR1_USE_ADSR: u8 = 0x80;
pub const ADSR1_DECAY_RATE_SHIFT: u8 = 3;
pub const ADSR1_DECAY_RATE_MASK: u8 = 0x0e;
pub const ADSR1_ATTACK_RATE_MASK: u8 = 0x0f;

pub const ADSR2_SUSTAIN_RATE_MASK: u8 = 0x1f;
pub const ADSR2_SUSTAIN_LEVEL_SHIFT: u8 = 5;

pub const GAIN_MODE_CUSTOM: u8 = 0x80;
pub const GAIN_MODE_SHIFT: u8 = 5;
pub const GAIN_MODE_MASK: u8 = 0x03;
pub const GAIN_RATE_MASK: u8 = 0x1f;

/// Human-readable register name, for state dumps.
pub fn reg_name(addr: u8) -> String {
    let chan = addr >> 4;
    let vreg = match addr & 0x0f {
        0x0 => Some("VOLL"),
        0x1 => Some("VOLR"),
        0x2 => Some("P(lo)"),
        0x3 => Some("P(hi)"),
        0x4 => Some("SRCN"),
        0x5 => Some("ADSR1"),
        0x6 => Some("ADSR2"),
        0x7 => Some("GAIN"),
        0x8 => Some("ENVX"),
        0x9 => Some("OUTX"),
        0xf => Some("COEF"),
        _ => None,
    };
    if let Some(name) = vreg {
        return format!("V{chan}{name}");
    }

    match addr {
        REG_MVOLL => "MVOLL".into(),
        REG_MVOLR => "MVOLR".into(),
        REG_EVOLL => "EVOLL".into(),
        REG_EVOLR => "EVOLR".into(),
        REG_KON => "KON".into(),
        REG_KOFF => "KOFF".into(),
        REG_FLG => "FLG".into(),
        REG_ENDX => "ENDX".into(),
        REG_EFB => "EFB".into(),
        REG_PMON => "PMON".into(),
        REG_NON => "NON".into(),
        REG_EON => "EON".into(),
        REG_DIR => "DIR".into(),
        REG_ESA => "ESA".into(),
        REG_EDL => "EDL".into(),
        _ => format!("REG${addr:02x}"),
    }
}
