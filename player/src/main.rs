mod config;
mod spc_file;
mod wav;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use spc_core::core::SampleSink;
use spc_core::device::sdsp::{self, Sdsp, brr, regs};
use spc_core::prelude::*;

use config::Config;
use spc_file::{Id666, SpcFile};
use wav::{MonoWav, SAMPLE_RATE, WavSink};

/// Offline renderer for SPC700 snapshot files.
#[derive(Parser)]
#[command(name = "spcplay", version, about = "Render SPC snapshot files to WAV")]
struct Args {
    /// Snapshot files to render, one output WAV per input.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Seconds of audio to render. Defaults to the ID666 song length,
    /// then the config file, then 60.
    #[arg(long)]
    seconds: Option<u64>,

    /// Directory for rendered files (default: alongside each input).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Use the copy-in/copy-out boot ROM overlay instead of the read
    /// override.
    #[arg(long)]
    naive_overlay: bool,

    /// Also dump the 64 KiB RAM image beside the output.
    #[arg(long)]
    dump_ram: bool,

    /// Also decode each keyed-on voice's BRR stream to src-<n>.wav.
    #[arg(long)]
    dump_samples: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let config = Config::load();

    let mut failures = 0usize;
    for file in &args.files {
        if let Err(err) = render(file, &args, &config) {
            log::error!("{}: {err:#}", file.display());
            failures += 1;
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn log_id666(id666: &Id666) {
    match id666 {
        Id666::Text(t) => {
            info!("song title: {}", t.song_title);
            info!("game title: {}", t.game_title);
            info!("dumper: {}", t.dumper);
            if !t.comments.is_empty() {
                info!("comments: {}", t.comments);
            }
            info!("dump date: {}", t.dump_date);
            info!("song length: {} secs", t.song_secs);
            info!("fade length: {} msec", t.fade_msecs);
            info!("artist: {}", t.artist);
            debug!("channel disables: {:#04x}", t.channel_disables);
            debug!("emulator: {:#04x}", t.emulator);
        }
        Id666::Binary(b) => {
            info!("song title: {}", b.song_title);
            info!("game title: {}", b.game_title);
            info!("dumper: {}", b.dumper);
            if !b.comments.is_empty() {
                info!("comments: {}", b.comments);
            }
            info!("dump date: {:08}", b.dump_date);
            info!("song length: {} secs", b.song_secs);
            info!("fade length: {} msec", b.fade_msecs);
            info!("artist: {}", b.artist);
            debug!("channel disables: {:#04x}", b.channel_disables);
            debug!("emulator: {:#04x}", b.emulator);
        }
    }
}

fn log_dsp_state(dsp: &Sdsp) {
    let r = dsp.regs();
    debug!(
        "DSP: KON=${:02x} KOFF=${:02x} FLG=${:02x} DIR=${:02x}00 MVOL={}/{}",
        r[regs::REG_KON as usize],
        r[regs::REG_KOFF as usize],
        r[regs::REG_FLG as usize],
        r[regs::REG_DIR as usize],
        r[regs::REG_MVOLL as usize] as i8,
        r[regs::REG_MVOLR as usize] as i8,
    );
    for v in 0..regs::VOICES {
        let vol_l = r[regs::voice_reg(v, regs::VREG_VOLL) as usize] as i8;
        let vol_r = r[regs::voice_reg(v, regs::VREG_VOLR) as usize] as i8;
        let pitch = u16::from_le_bytes([
            r[regs::voice_reg(v, regs::VREG_PITCH_LO) as usize],
            r[regs::voice_reg(v, regs::VREG_PITCH_HI) as usize],
        ]) & 0x3fff;
        debug!(
            "V{v}: SRCN=${:02x} P=${pitch:04x} VOL={vol_l}/{vol_r} ADSR=${:02x}{:02x} GAIN=${:02x}",
            r[regs::voice_reg(v, regs::VREG_SRCN) as usize],
            r[regs::voice_reg(v, regs::VREG_ADSR1) as usize],
            r[regs::voice_reg(v, regs::VREG_ADSR2) as usize],
            r[regs::voice_reg(v, regs::VREG_GAIN) as usize],
        );
    }
}

fn output_dir(input: &Path, args: &Args, config: &Config) -> PathBuf {
    args.out_dir
        .clone()
        .or_else(|| config.out_dir.clone())
        .unwrap_or_else(|| {
            match input.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            }
        })
}

fn render(path: &Path, args: &Args, config: &Config) -> Result<()> {
    info!("load: {}", path.display());
    let spc = SpcFile::load(path).context("reading snapshot")?;
    log_id666(&spc.id666);

    let seconds = args
        .seconds
        .or_else(|| spc.id666.song_seconds())
        .or(config.seconds)
        .unwrap_or(60);

    let out_dir = output_dir(path, args, config);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let stem = path.file_stem().unwrap_or_default();
    let out_path = out_dir.join(stem).with_extension("wav");

    let mut apu = if args.naive_overlay {
        Apu::with_policy(OverlayPolicy::Naive)
    } else {
        Apu::new()
    };
    apu.restore(spc.regs, &spc.ram, &spc.extra_ram, &spc.dsp_regs);
    log_dsp_state(apu.bus().dsp());

    if args.dump_ram {
        let ram_path = out_dir.join(stem).with_extension("aram.bin");
        info!("dumping 64 KiB of RAM to {}", ram_path.display());
        std::fs::write(&ram_path, &spc.ram[..]).context("dumping RAM")?;
    }
    if args.dump_samples {
        dump_samples(&apu, &out_dir)?;
    }

    let mut sink =
        WavSink::create(&out_path).with_context(|| format!("creating {}", out_path.display()))?;

    info!(
        "rendering \"{}\" for {seconds} s to {}",
        spc.id666.song_title(),
        out_path.display()
    );
    let outcome = apu
        .run(&mut sink, seconds * SAMPLE_RATE as u64)
        .context("writing samples")?;
    sink.finish().context("finalizing wav")?;

    match outcome.reason {
        StopReason::Halted { pc, opcode } => {
            info!("halt: ${pc:04x} opcode ${opcode:02x}");
        }
        StopReason::SampleQuota => {}
    }
    info!(
        "{} samples, {} instructions",
        outcome.samples, outcome.instructions
    );
    if outcome.bad_dsp_accesses > 0 {
        warn!(
            "{} accesses to nonexistent DSP registers",
            outcome.bad_dsp_accesses
        );
    }

    Ok(())
}

/// Decode the BRR streams of every keyed-on voice into standalone WAV
/// files, following each stream's loop entry once when it ends looping
/// somewhere new.
fn dump_samples(apu: &Apu, out_dir: &Path) -> Result<()> {
    let dsp = apu.bus().dsp();
    let aram = apu.bus().aram();
    let kon = dsp.regs()[regs::REG_KON as usize];
    let dir = dsp.regs()[regs::REG_DIR as usize];

    for voice in 0..regs::VOICES {
        if kon & (1 << voice) == 0 {
            continue;
        }
        let srcn = dsp.regs()[regs::voice_reg(voice, regs::VREG_SRCN) as usize];
        let entry = sdsp::dir_entry(aram, dir, srcn);
        let wav_path = out_dir.join(format!("src-{srcn}.wav"));
        info!("V{voice} SRCN=${srcn:02x} base ${:04x} -> {}", entry.base, wav_path.display());

        let mut wav = MonoWav::create(&wav_path)
            .with_context(|| format!("creating {}", wav_path.display()))?;
        let looped = rip_stream(aram, entry.base, &mut wav)?;
        if looped && entry.loop_addr != entry.base {
            info!("loop ${:04x}", entry.loop_addr);
            rip_stream(aram, entry.loop_addr, &mut wav)?;
        }
        wav.finish().context("finalizing rip")?;
    }
    Ok(())
}

/// Decode blocks from `addr` until one carries the end flag. Returns
/// whether that block also asked to loop. The walk is bounded by the
/// address space so a malformed stream cannot rip forever.
fn rip_stream(aram: &[u8; 0x10000], mut addr: u16, wav: &mut MonoWav) -> Result<bool> {
    let mut state = (0i16, 0i16);
    for _ in 0..0x10000 / brr::BLOCK_SIZE {
        let mut block = [0u8; brr::BLOCK_SIZE];
        for (i, byte) in block.iter_mut().enumerate() {
            *byte = aram[addr.wrapping_add(i as u16) as usize];
        }

        let decoded = brr::decode_block(&block, state.0, state.1);
        state = (
            decoded.samples[brr::BLOCK_SAMPLES - 2],
            decoded.samples[brr::BLOCK_SAMPLES - 1],
        );
        wav.write(&decoded.samples).context("writing rip")?;

        if decoded.end {
            return Ok(decoded.looped);
        }
        addr = addr.wrapping_add(brr::BLOCK_SIZE as u16);
    }
    warn!("BRR stream at ${addr:04x} never ended");
    Ok(false)
}
