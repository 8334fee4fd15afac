use serde::{Deserialize, Serialize};
use spc_core::core::Bus;
use spc_core::cpu::spc700::{Spc700, Spc700Regs};

// --- TracingBus: flat 64KB memory with per-access recording ---

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BusOp {
    Read,
    Write,
}

impl BusOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BusOp::Read => "read",
            BusOp::Write => "write",
        }
    }
}

#[derive(Clone, Debug)]
pub struct BusAccess {
    pub addr: u16,
    pub data: u8,
    pub op: BusOp,
}

pub struct TracingBus {
    pub memory: [u8; 0x10000],
    pub accesses: Vec<BusAccess>,
}

impl TracingBus {
    pub fn new() -> Self {
        Self {
            memory: [0; 0x10000],
            accesses: Vec::new(),
        }
    }

    pub fn load_program(&mut self, addr: u16, data: &[u8]) {
        let start = addr as usize;
        self.memory[start..start + data.len()].copy_from_slice(data);
    }

    pub fn clear_accesses(&mut self) {
        self.accesses.clear();
    }
}

impl Default for TracingBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for TracingBus {
    fn load(&mut self, addr: u16) -> u8 {
        let data = self.memory[addr as usize];
        self.accesses.push(BusAccess {
            addr,
            data,
            op: BusOp::Read,
        });
        data
    }

    fn store(&mut self, addr: u16, data: u8) {
        self.memory[addr as usize] = data;
        self.accesses.push(BusAccess {
            addr,
            data,
            op: BusOp::Write,
        });
    }
}

// --- JSON test vector types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spc700TestCase {
    pub name: String,
    pub initial: Spc700CpuState,
    #[serde(rename = "final")]
    pub final_state: Spc700CpuState,
    /// Bus traffic in order: (addr, data, "read"/"write").
    pub accesses: Vec<(u16, u8, String)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spc700CpuState {
    pub pc: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub psw: u8,
    pub ram: Vec<(u16, u8)>,
}

impl Spc700CpuState {
    pub fn capture(cpu: &Spc700) -> Self {
        Self {
            pc: cpu.pc,
            a: cpu.a,
            x: cpu.x,
            y: cpu.y,
            sp: cpu.sp,
            psw: cpu.psw(),
            ram: Vec::new(),
        }
    }

    pub fn install(&self, cpu: &mut Spc700) {
        cpu.restore(Spc700Regs {
            pc: self.pc,
            a: self.a,
            x: self.x,
            y: self.y,
            psw: self.psw,
            sp: self.sp,
        });
    }
}

/// Opcodes the interpreter implements (everything except the halt slots).
pub fn implemented_opcodes() -> Vec<u8> {
    const HALT_SLOTS: &[u8] = &[
        0x0f, 0x1e, 0x3e, 0x4f, 0x50, 0x5e, 0x70, 0x7f, 0xaf, 0xbe, 0xbf, 0xd9, 0xdf, 0xef, 0xf9,
        0xff,
    ];
    (0u16..=0xff)
        .map(|op| op as u8)
        .filter(|op| !HALT_SLOTS.contains(op))
        .collect()
}
