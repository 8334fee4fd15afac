use std::io;

/// Destination for the rendered audio stream.
///
/// The machine emits interleaved stereo frames (left then right) of signed
/// 16-bit PCM at 32,000 Hz. A write failure aborts the run; the error is
/// returned from the run loop untouched.
pub trait SampleSink {
    fn write_samples(&mut self, samples: &[i16]) -> io::Result<()>;

    /// Finalize the stream (e.g. patch up a container header). Called once
    /// after the run loop returns successfully.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that discards everything. Useful for benchmarks and tests that only
/// care about machine state.
#[derive(Default)]
pub struct NullSink;

impl SampleSink for NullSink {
    fn write_samples(&mut self, _samples: &[i16]) -> io::Result<()> {
        Ok(())
    }
}
