//! WAV output: a RIFF container around the raw 32 kHz stereo s16 stream,
//! with the header sizes patched in when the writer is finalized.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use spc_core::core::SampleSink;

pub const SAMPLE_RATE: u32 = 32_000;

fn hound_to_io(err: hound::Error) -> io::Error {
    match err {
        hound::Error::IoError(err) => err,
        other => io::Error::other(other),
    }
}

pub struct WavSink {
    writer: Option<WavWriter<BufWriter<File>>>,
}

impl WavSink {
    pub fn create(path: &Path) -> io::Result<Self> {
        let spec = WavSpec {
            channels: 2,
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let writer = WavWriter::create(path, spec).map_err(hound_to_io)?;
        Ok(Self {
            writer: Some(writer),
        })
    }
}

impl SampleSink for WavSink {
    fn write_samples(&mut self, samples: &[i16]) -> io::Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Err(io::Error::other("wav sink already finalized"));
        };
        for &sample in samples {
            writer.write_sample(sample).map_err(hound_to_io)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if let Some(writer) = self.writer.take() {
            writer.finalize().map_err(hound_to_io)?;
        }
        Ok(())
    }
}

/// Mono writer used by the sample ripper.
pub struct MonoWav {
    writer: WavWriter<BufWriter<File>>,
}

impl MonoWav {
    pub fn create(path: &Path) -> io::Result<Self> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let writer = WavWriter::create(path, spec).map_err(hound_to_io)?;
        Ok(Self { writer })
    }

    pub fn write(&mut self, samples: &[i16]) -> io::Result<()> {
        for &sample in samples {
            self.writer.write_sample(sample).map_err(hound_to_io)?;
        }
        Ok(())
    }

    pub fn finish(self) -> io::Result<()> {
        self.writer.finalize().map_err(hound_to_io)
    }
}
