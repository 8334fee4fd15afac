use spc_core::core::Bus;

/// Minimal bus for CPU testing: flat 64KB read/write memory, no
/// peripherals.
pub struct TestBus {
    pub memory: [u8; 0x10000],
}

impl TestBus {
    pub fn new() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }

    pub fn load_program(&mut self, addr: u16, data: &[u8]) {
        let start = addr as usize;
        self.memory[start..start + data.len()].copy_from_slice(data);
    }
}

impl Bus for TestBus {
    fn load(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn store(&mut self, addr: u16, data: u8) {
        self.memory[addr as usize] = data;
    }
}
