//! The APU board: ARAM, the control-register block, the three timers, the
//! S-DSP, the boot-ROM overlay, and the clock driver that interleaves CPU
//! execution with audio ticks.

use std::io;

use crate::core::{Bus, SampleSink};
use crate::cpu::spc700::{Spc700, Spc700Regs, Step};
use crate::device::sdsp::{Frame, Sdsp};
use crate::device::timer::Timer;

// The 16 control registers live at $00F0-$00FF in the address space.
pub const APU_TEST: u16 = 0x00f0;
pub const APU_CTRL: u16 = 0x00f1;
pub const APU_DSP_ADDR: u16 = 0x00f2;
pub const APU_DSP_DATA: u16 = 0x00f3;
pub const APU_IO0: u16 = 0x00f4;
pub const APU_IO1: u16 = 0x00f5;
pub const APU_IO2: u16 = 0x00f6;
pub const APU_IO3: u16 = 0x00f7;
pub const APU_AUX0: u16 = 0x00f8;
pub const APU_AUX1: u16 = 0x00f9;
pub const APU_T0DIV: u16 = 0x00fa;
pub const APU_T1DIV: u16 = 0x00fb;
pub const APU_T2DIV: u16 = 0x00fc;
pub const APU_T0OUT: u16 = 0x00fd;
pub const APU_T1OUT: u16 = 0x00fe;
pub const APU_T2OUT: u16 = 0x00ff;

pub const CTRL_T0: u8 = 1 << 0;
pub const CTRL_T1: u8 = 1 << 1;
pub const CTRL_T2: u8 = 1 << 2;
pub const CTRL_IOC01: u8 = 1 << 4;
pub const CTRL_IOC23: u8 = 1 << 5;
pub const CTRL_BOOT_ROM: u8 = 1 << 7;

const MMIO_BASE: u16 = 0x00f0;

fn mmio_address(addr: u16) -> bool {
    addr & 0xfff0 == MMIO_BASE
}

pub const IPL_ROM_BASE: u16 = 0xffc0;
pub const IPL_ROM_SIZE: usize = 0x40;

fn ipl_rom_address(addr: u16) -> bool {
    addr & 0xffc0 == IPL_ROM_BASE
}

/// The 64-byte boot program masked into the top of the address space.
/// It clears the zero page, raises the AA/BB greeting on the I/O ports,
/// waits for CC, then either uploads blocks pushed through the ports or
/// jumps to the address the host supplies. The reset vector at the end
/// points back at $FFC0.
pub static IPL_ROM: [u8; IPL_ROM_SIZE] = [
    // Set up the stack.
    0xcd, 0xef, //        mov  x,#$ef
    0xbd, //              mov  sp,x
    // Clear the zero page, stopping short of the registers at $f0.
    0xe8, 0x00, // @loop: mov  a,#$00
    0xc6, //              mov  (x),a
    0x1d, //              dec  x
    0xd0, 0xfc, //        bne  @loop   ; $ffc5
    // Greet the host with AA/BB and wait for CC.
    0x8f, 0xaa, 0xf4, //  mov  $f4,#$aa
    0x8f, 0xbb, 0xf5, //  mov  $f5,#$bb
    0x78, 0xcc, 0xf4, // @wait: cmp $f4,#$cc
    0xd0, 0xfb, //        bne  @wait   ; $ffcf
    0x2f, 0x19, //        bra  @main   ; $ffef
    // Transfer a block of data from the host into RAM.
    0xeb, 0xf4, // block: mov  y,$f4
    0xd0, 0xfc, //        bne  block   ; $ffd6
    0x7e, 0xf4, // @bytes: cmp y,$f4
    0xd0, 0x0b, //        bne  @retry  ; $ffe9
    0xe4, 0xf5, //        mov  a,$f5
    0xcb, 0xf4, //        mov  $f4,y
    0xd7, 0x00, //        mov  ($00)+y,a
    0xfc, //              inc  y
    0xd0, 0xf3, //        bne  @bytes  ; $ffda
    0xab, 0x01, //        inc  $01
    0x10, 0xef, // @retry: bpl @bytes  ; $ffda
    0x7e, 0xf4, //        cmp  y,$f4
    0x10, 0xeb, //        bpl  @bytes  ; $ffda
    // Either fetch another block or jump to the uploaded entry point.
    0xba, 0xf6, // @main: movw ya,$f6
    0xda, 0x00, //        movw $00,ya
    0xba, 0xf4, //        movw ya,$f4
    0xc4, 0xf4, //        mov  $f4,a
    0xdd, //              mov  a,y
    0x5d, //              mov  x,a
    0xd0, 0xdb, //        bne  block   ; $ffd6
    0x1f, 0x00, 0x00, //  jmp  ($0000+x)
    // Reset vector: back to $ffc0.
    0xc0, 0xff,
];

/// How the boot-ROM overlay is realized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayPolicy {
    /// Reads see the ROM while it is visible; the RAM underneath is
    /// untouched.
    #[default]
    Accurate,
    /// The ROM is physically copied over the top of RAM on the off-to-on
    /// edge, and the saved bytes copied back on the on-to-off edge.
    Naive,
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The CPU hit an opcode with no implementation.
    Halted { pc: u16, opcode: u8 },
    /// The requested number of output samples was rendered.
    SampleQuota,
}

#[derive(Clone, Copy, Debug)]
pub struct RunOutcome {
    pub reason: StopReason,
    /// Stereo frames emitted during this run.
    pub samples: u64,
    /// Instructions retired during this run.
    pub instructions: u64,
    /// Lifetime count of DSP accesses to nonexistent register addresses.
    pub bad_dsp_accesses: u64,
}

/// Everything on the board except the CPU, so the CPU can borrow it as its
/// bus while stepping.
pub struct ApuBus {
    aram: [u8; 0x10000],
    dsp: Sdsp,

    /// MMIO shadow of the 16 control registers.
    regs: [u8; 16],
    /// Host-to-coprocessor port latches (what CPU loads of $F4-$F7 see).
    io_in: [u8; 4],
    /// Coprocessor-to-host port latches (what CPU stores to $F4-$F7 set).
    io_out: [u8; 4],
    timers: [Timer; 3],

    extra_ram: [u8; IPL_ROM_SIZE],
    show_rom: bool,
    policy: OverlayPolicy,
}

impl ApuBus {
    fn new(policy: OverlayPolicy) -> Self {
        Self {
            aram: [0; 0x10000],
            dsp: Sdsp::new(),
            regs: [0; 16],
            io_in: [0; 4],
            io_out: [0; 4],
            timers: [Timer::idle(); 3],
            extra_ram: [0; IPL_ROM_SIZE],
            show_rom: false,
            policy,
        }
    }

    pub fn aram(&self) -> &[u8; 0x10000] {
        &self.aram
    }

    pub fn dsp(&self) -> &Sdsp {
        &self.dsp
    }

    pub fn show_rom(&self) -> bool {
        self.show_rom
    }

    /// What the coprocessor last wrote to the outward port latches.
    pub fn io_out(&self) -> [u8; 4] {
        self.io_out
    }

    /// Feed a byte into an inward port latch, as the host CPU would.
    pub fn set_io_in(&mut self, port: usize, byte: u8) {
        self.io_in[port] = byte;
    }

    fn set_show_rom(&mut self, show: bool) {
        match self.policy {
            OverlayPolicy::Accurate => self.show_rom = show,
            OverlayPolicy::Naive => {
                if show == self.show_rom {
                    return;
                }
                self.show_rom = show;

                let top = IPL_ROM_BASE as usize;
                if show {
                    self.extra_ram.copy_from_slice(&self.aram[top..]);
                    self.aram[top..].copy_from_slice(&IPL_ROM);
                } else {
                    self.aram[top..].copy_from_slice(&self.extra_ram);
                }
            }
        }
    }

    /// Enable edge for timer `i`: latch the divider, restart, clear TxOUT.
    /// Re-writing an already-set enable bit is a no-op.
    fn timer_enable(&mut self, i: usize) {
        if self.timers[i].is_enabled() {
            return;
        }
        let div = self.regs[(APU_T0DIV - MMIO_BASE) as usize + i];
        self.timers[i] = Timer::start(div);
        self.regs[(APU_T0OUT - MMIO_BASE) as usize + i] = 0;
    }

    fn tick_timer(&mut self, i: usize) {
        if self.timers[i].tick() {
            let out = (APU_T0OUT - MMIO_BASE) as usize + i;
            self.regs[out] = (self.regs[out] + 1) & 0x0f;
        }
    }

    fn ctrl_store(&mut self, byte: u8) {
        for i in 0..3 {
            if byte & (1 << i) != 0 {
                self.timer_enable(i);
            } else {
                self.timers[i].stop();
            }
        }

        if byte & CTRL_IOC01 != 0 {
            self.io_in[0] = 0;
            self.io_in[1] = 0;
            self.regs[(APU_IO0 - MMIO_BASE) as usize] = 0;
            self.regs[(APU_IO1 - MMIO_BASE) as usize] = 0;
        }
        if byte & CTRL_IOC23 != 0 {
            self.io_in[2] = 0;
            self.io_in[3] = 0;
            self.regs[(APU_IO2 - MMIO_BASE) as usize] = 0;
            self.regs[(APU_IO3 - MMIO_BASE) as usize] = 0;
        }

        self.set_show_rom(byte & CTRL_BOOT_ROM != 0);
    }

    fn mmio_store(&mut self, addr: u16, byte: u8) {
        let reg = (addr & 0x0f) as usize;
        self.regs[reg] = byte;

        match addr {
            APU_TEST => {}
            APU_CTRL => self.ctrl_store(byte),
            APU_DSP_ADDR => {}
            APU_DSP_DATA => {
                let dsp_addr = self.regs[(APU_DSP_ADDR - MMIO_BASE) as usize];
                self.dsp.store(dsp_addr, byte);
            }
            APU_IO0..=APU_IO3 => {
                // The in/out port pairs are split: stores land on the
                // outward latches and never alias what loads return.
                self.io_out[(addr - APU_IO0) as usize] = byte;
            }
            APU_AUX0 | APU_AUX1 => {} // plain RAM
            // Divider writes take effect on the next enable edge.
            APU_T0DIV..=APU_T2DIV => {}
            APU_T0OUT..=APU_T2OUT => {}
            _ => unreachable!(),
        }
    }

    fn mmio_load(&mut self, addr: u16) -> u8 {
        let reg = (addr & 0x0f) as usize;
        let byte = self.regs[reg];

        match addr {
            APU_DSP_DATA => {
                let dsp_addr = self.regs[(APU_DSP_ADDR - MMIO_BASE) as usize];
                self.dsp.load(dsp_addr)
            }
            APU_IO0..=APU_IO3 => self.io_in[(addr - APU_IO0) as usize],
            // Reading an output stage hands over the count and rearms it.
            APU_T0OUT..=APU_T2OUT => {
                self.regs[reg] = 0;
                byte
            }
            _ => byte,
        }
    }

    /// Advance the audio-side clocks; called every 16 sub-cycles. T2 runs
    /// at 64 kHz, the DSP emits a frame at 32 kHz, T0/T1 run at 8 kHz.
    fn update_clocks(&mut self, cycle: u32) -> Option<Frame> {
        debug_assert!(cycle & 0x0f == 0);

        self.tick_timer(2);

        let mut frame = None;
        if cycle & 0x1f == 0 {
            frame = Some(self.dsp.run_sample(&self.aram));
        }

        if cycle & 0x7f == 0 {
            self.tick_timer(0);
            self.tick_timer(1);
        }

        frame
    }
}

impl Bus for ApuBus {
    fn load(&mut self, addr: u16) -> u8 {
        if mmio_address(addr) {
            return self.mmio_load(addr);
        }
        if self.policy == OverlayPolicy::Accurate && self.show_rom && ipl_rom_address(addr) {
            return IPL_ROM[(addr - IPL_ROM_BASE) as usize];
        }
        self.aram[addr as usize]
    }

    fn store(&mut self, addr: u16, byte: u8) {
        if mmio_address(addr) {
            self.mmio_store(addr, byte);
        }
        // Store-through: RAM mirrors every write, MMIO included.
        self.aram[addr as usize] = byte;
    }

    fn fetch(&mut self, addr: u16) -> u8 {
        if self.policy == OverlayPolicy::Accurate && self.show_rom && ipl_rom_address(addr) {
            return IPL_ROM[(addr - IPL_ROM_BASE) as usize];
        }
        self.aram[addr as usize]
    }
}

/// The assembled machine.
pub struct Apu {
    cpu: Spc700,
    bus: ApuBus,
    cycle: u32,
    instructions: u64,
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}

impl Apu {
    pub fn new() -> Self {
        Self::with_policy(OverlayPolicy::Accurate)
    }

    pub fn with_policy(policy: OverlayPolicy) -> Self {
        Self {
            cpu: Spc700::new(),
            bus: ApuBus::new(policy),
            cycle: 0,
            instructions: 0,
        }
    }

    pub fn cpu(&self) -> &Spc700 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Spc700 {
        &mut self.cpu
    }

    pub fn bus(&self) -> &ApuBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut ApuBus {
        &mut self.bus
    }

    /// Instructions retired across the machine's lifetime.
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    /// Install a complete machine state from snapshot pieces: CPU
    /// registers, the RAM image (whose $F0-$FF bytes double as the control
    /// register state), the 64 bytes shadowed by the boot ROM, and the DSP
    /// register image.
    pub fn restore(
        &mut self,
        regs: Spc700Regs,
        ram: &[u8; 0x10000],
        extra: &[u8; IPL_ROM_SIZE],
        dsp_regs: &[u8; 0x80],
    ) {
        self.cpu.restore(regs);
        self.bus.aram = *ram;
        self.bus.extra_ram = *extra;
        // Start from a quiet board so the CTRL decode below sees clean
        // enable edges and an invisible ROM.
        self.bus.timers = [Timer::idle(); 3];
        self.bus.show_rom = false;

        let mut acr = [0u8; 16];
        acr.copy_from_slice(&ram[0xf0..0x100]);

        // Decoding CTRL arms the timers and the overlay, but its side
        // effects on the register bytes themselves (port clears, TxOUT
        // resets) must not override the snapshot image.
        self.bus.regs = acr;
        self.bus.ctrl_store(acr[(APU_CTRL - MMIO_BASE) as usize]);
        self.bus.regs = acr;
        self.bus
            .io_in
            .copy_from_slice(&acr[(APU_IO0 - MMIO_BASE) as usize..(APU_AUX0 - MMIO_BASE) as usize]);

        self.bus.dsp.restore(dsp_regs);
    }

    /// Power-on state: everything cleared, boot ROM visible, PC at the
    /// reset vector.
    pub fn reset(&mut self) {
        self.bus.regs = [0; 16];
        self.bus.io_in = [0; 4];
        self.bus.io_out = [0; 4];
        self.bus.timers = [Timer::idle(); 3];
        self.bus.dsp.reset();
        self.bus.set_show_rom(true);
        self.cpu.reset(&mut self.bus);
    }

    /// Run until the CPU halts, the sink fails, or `max_samples` stereo
    /// frames have been written.
    pub fn run<S: SampleSink + ?Sized>(
        &mut self,
        sink: &mut S,
        max_samples: u64,
    ) -> io::Result<RunOutcome> {
        let mut samples = 0u64;
        let mut instructions = 0u64;

        loop {
            match self.cpu.step(&mut self.bus) {
                Step::Ran(cycles) => {
                    instructions += 1;
                    self.cycle = self.cycle.wrapping_add(cycles);
                }
                Step::Halted { pc, opcode } => {
                    self.instructions += instructions;
                    return Ok(RunOutcome {
                        reason: StopReason::Halted { pc, opcode },
                        samples,
                        instructions,
                        bad_dsp_accesses: self.bus.dsp.bad_reg_accesses(),
                    });
                }
            }

            if self.cycle & 0x0f == 0 {
                if let Some(frame) = self.bus.update_clocks(self.cycle) {
                    sink.write_samples(&[frame.left, frame.right])?;
                    samples += 1;
                    if samples >= max_samples {
                        self.instructions += instructions;
                        return Ok(RunOutcome {
                            reason: StopReason::SampleQuota,
                            samples,
                            instructions,
                            bad_dsp_accesses: self.bus.dsp.bad_reg_accesses(),
                        });
                    }
                }
            }
        }
    }
}
