use super::Spc700;
use crate::core::Bus;

/// Shift and rotate instructions, plus XCN.
impl Spc700 {
    /// Read-modify-write a memory operand through one of the shift
    /// primitives.
    #[inline]
    fn shift_at<B, F>(&mut self, bus: &mut B, addr: u16, operation: F)
    where
        B: Bus + ?Sized,
        F: FnOnce(&mut Self, u8) -> u8,
    {
        let operand = bus.load(addr);
        let result = operation(self, operand);
        bus.store(addr, result);
    }

    // ---- ASL ----

    pub(crate) fn op_asl_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        self.shift_at(bus, addr, Self::alu_asl);
    }

    pub(crate) fn op_asl_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        self.shift_at(bus, addr, Self::alu_asl);
    }

    pub(crate) fn op_asl_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        self.shift_at(bus, addr, Self::alu_asl);
    }

    pub(crate) fn op_asl_a(&mut self) {
        self.a = self.alu_asl(self.a);
    }

    // ---- ROL ----

    pub(crate) fn op_rol_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        self.shift_at(bus, addr, Self::alu_rol);
    }

    pub(crate) fn op_rol_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        self.shift_at(bus, addr, Self::alu_rol);
    }

    pub(crate) fn op_rol_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        self.shift_at(bus, addr, Self::alu_rol);
    }

    pub(crate) fn op_rol_a(&mut self) {
        self.a = self.alu_rol(self.a);
    }

    // ---- LSR ----

    pub(crate) fn op_lsr_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        self.shift_at(bus, addr, Self::alu_lsr);
    }

    pub(crate) fn op_lsr_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        self.shift_at(bus, addr, Self::alu_lsr);
    }

    pub(crate) fn op_lsr_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        self.shift_at(bus, addr, Self::alu_lsr);
    }

    pub(crate) fn op_lsr_a(&mut self) {
        self.a = self.alu_lsr(self.a);
    }

    // ---- ROR ----

    pub(crate) fn op_ror_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        self.shift_at(bus, addr, Self::alu_ror);
    }

    pub(crate) fn op_ror_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        self.shift_at(bus, addr, Self::alu_ror);
    }

    pub(crate) fn op_ror_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        self.shift_at(bus, addr, Self::alu_ror);
    }

    pub(crate) fn op_ror_a(&mut self) {
        self.a = self.alu_ror(self.a);
    }

    /// XCN: exchange the accumulator's nybbles. Sets Z/N.
    pub(crate) fn op_xcn(&mut self) {
        let result = self.a << 4 | self.a >> 4;
        self.set_zn(result);
        self.a = result;
    }
}
