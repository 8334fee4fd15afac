//! SPC snapshot file decoding.
//!
//! A snapshot is a fixed 0x10200-byte little-endian blob: a text format id,
//! the CPU register block, 210 bytes of ID666 metadata (text or binary
//! encoded), the 64 KiB RAM image, the 128-byte DSP register image, and the
//! 64 bytes of RAM shadowed by the boot ROM.

use std::fmt;
use std::path::Path;

use spc_core::cpu::spc700::Spc700Regs;
use thiserror::Error;

pub const SPC_FILE_SIZE: usize = 0x10200;

const FORMAT_ID: &[u8; 33] = b"SNES-SPC700 Sound File Data v0.30";
const MAGIC: u16 = 0x1a1a;
const ID666_TEXT: u8 = 0x1a;
const ID666_BINARY: u8 = 0x1b;

const REGS_OFF: usize = 0x25;
const ID666_OFF: usize = 0x2e;
const RAM_OFF: usize = 0x100;
const DSP_OFF: usize = 0x10100;
const EXTRA_OFF: usize = 0x101c0;

#[derive(Debug, Error)]
pub enum SpcFileError {
    #[error("wrong size: {0} bytes, expected {SPC_FILE_SIZE}")]
    WrongSize(usize),
    #[error("not an SPC file (format id mismatch)")]
    BadFormatId,
    #[error("bad magic {0:#06x}")]
    BadMagic(u16),
    #[error("unknown ID666 tag status {0:#04x}")]
    BadTagStatus(u8),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// ID666 metadata, text variant. Fixed-width ASCII fields, trimmed.
#[derive(Debug, Clone, Default)]
pub struct Id666Text {
    pub song_title: String,
    pub game_title: String,
    pub dumper: String,
    pub comments: String,
    pub dump_date: String,
    pub song_secs: String,
    pub fade_msecs: String,
    pub artist: String,
    pub channel_disables: u8,
    pub emulator: u8,
}

/// ID666 metadata, binary variant: the date and fade are integers and the
/// field offsets shift.
#[derive(Debug, Clone, Default)]
pub struct Id666Binary {
    pub song_title: String,
    pub game_title: String,
    pub dumper: String,
    pub comments: String,
    pub dump_date: u32,
    pub song_secs: u32,
    pub fade_msecs: u32,
    pub artist: String,
    pub channel_disables: u8,
    pub emulator: u8,
}

#[derive(Debug, Clone)]
pub enum Id666 {
    Text(Id666Text),
    Binary(Id666Binary),
}

impl Id666 {
    /// Song length in seconds, when the tag carries one.
    pub fn song_seconds(&self) -> Option<u64> {
        match self {
            Id666::Text(t) => {
                let secs: u64 = t.song_secs.trim().parse().ok()?;
                (secs > 0).then_some(secs)
            }
            Id666::Binary(b) => (b.song_secs > 0).then_some(b.song_secs as u64),
        }
    }

    pub fn song_title(&self) -> &str {
        match self {
            Id666::Text(t) => &t.song_title,
            Id666::Binary(b) => &b.song_title,
        }
    }
}

impl fmt::Display for Id666 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id666::Text(t) => write!(
                f,
                "\"{}\" from \"{}\" ({} secs)",
                t.song_title,
                t.game_title,
                if t.song_secs.trim().is_empty() {
                    "?"
                } else {
                    t.song_secs.trim()
                }
            ),
            Id666::Binary(b) => write!(
                f,
                "\"{}\" from \"{}\" ({} secs)",
                b.song_title, b.game_title, b.song_secs
            ),
        }
    }
}

fn ascii_field(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim_end().to_string()
}

fn u24_le(bytes: &[u8]) -> u32 {
    bytes[0] as u32 | (bytes[1] as u32) << 8 | (bytes[2] as u32) << 16
}

fn u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn parse_id666_text(tag: &[u8]) -> Id666Text {
    Id666Text {
        song_title: ascii_field(&tag[0x00..0x20]),
        game_title: ascii_field(&tag[0x20..0x40]),
        dumper: ascii_field(&tag[0x40..0x50]),
        comments: ascii_field(&tag[0x50..0x70]),
        dump_date: ascii_field(&tag[0x70..0x7b]),
        song_secs: ascii_field(&tag[0x7b..0x7e]),
        fade_msecs: ascii_field(&tag[0x7e..0x83]),
        artist: ascii_field(&tag[0x83..0xa3]),
        channel_disables: tag[0xa3],
        emulator: tag[0xa4],
    }
}

fn parse_id666_binary(tag: &[u8]) -> Id666Binary {
    Id666Binary {
        song_title: ascii_field(&tag[0x00..0x20]),
        game_title: ascii_field(&tag[0x20..0x40]),
        dumper: ascii_field(&tag[0x40..0x50]),
        comments: ascii_field(&tag[0x50..0x70]),
        dump_date: u32_le(&tag[0x70..0x74]),
        // 7 unused bytes, then the 3-byte length and 4-byte fade.
        song_secs: u24_le(&tag[0x7b..0x7e]),
        fade_msecs: u32_le(&tag[0x7e..0x82]),
        artist: ascii_field(&tag[0x82..0xa2]),
        channel_disables: tag[0xa2],
        emulator: tag[0xa3],
    }
}

/// A decoded snapshot, split into the pieces the machine restores from.
pub struct SpcFile {
    pub regs: Spc700Regs,
    pub id666: Id666,
    pub ram: Box<[u8; 0x10000]>,
    pub dsp_regs: [u8; 0x80],
    pub extra_ram: [u8; 0x40],
}

impl SpcFile {
    pub fn parse(data: &[u8]) -> Result<Self, SpcFileError> {
        if data.len() != SPC_FILE_SIZE {
            return Err(SpcFileError::WrongSize(data.len()));
        }
        if &data[..FORMAT_ID.len()] != FORMAT_ID {
            return Err(SpcFileError::BadFormatId);
        }
        let magic = u16::from_le_bytes([data[0x21], data[0x22]]);
        if magic != MAGIC {
            return Err(SpcFileError::BadMagic(magic));
        }

        let r = &data[REGS_OFF..];
        let regs = Spc700Regs {
            pc: u16::from_le_bytes([r[0], r[1]]),
            a: r[2],
            x: r[3],
            y: r[4],
            psw: r[5],
            sp: r[6],
        };

        let tag = &data[ID666_OFF..RAM_OFF];
        let id666 = match data[0x23] {
            ID666_TEXT => Id666::Text(parse_id666_text(tag)),
            ID666_BINARY => Id666::Binary(parse_id666_binary(tag)),
            other => return Err(SpcFileError::BadTagStatus(other)),
        };

        let mut ram = Box::new([0u8; 0x10000]);
        ram.copy_from_slice(&data[RAM_OFF..RAM_OFF + 0x10000]);

        let mut dsp_regs = [0u8; 0x80];
        dsp_regs.copy_from_slice(&data[DSP_OFF..DSP_OFF + 0x80]);

        let mut extra_ram = [0u8; 0x40];
        extra_ram.copy_from_slice(&data[EXTRA_OFF..EXTRA_OFF + 0x40]);

        Ok(Self {
            regs,
            id666,
            ram,
            dsp_regs,
            extra_ram,
        })
    }

    pub fn load(path: &Path) -> Result<Self, SpcFileError> {
        let data = std::fs::read(path)?;
        Self::parse(&data)
    }
}
