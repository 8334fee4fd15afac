use super::Spc700;
use crate::core::Bus;

/// Relative branches, the compare-and-branch forms, and the jumps.
/// A taken branch adds the signed displacement to the PC already advanced
/// past the operand bytes; cycle cost is flat either way.
impl Spc700 {
    #[inline]
    fn branch_if<B: Bus + ?Sized>(&mut self, bus: &mut B, taken: bool) {
        let disp = self.relative(bus);
        if taken {
            self.pc = self.pc.wrapping_add(disp as u16);
        }
    }

    pub(crate) fn op_bra<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.branch_if(bus, true);
    }

    pub(crate) fn op_bpl<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let taken = !self.negative;
        self.branch_if(bus, taken);
    }

    pub(crate) fn op_bmi<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let taken = self.negative;
        self.branch_if(bus, taken);
    }

    pub(crate) fn op_bcc<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let taken = !self.carry;
        self.branch_if(bus, taken);
    }

    pub(crate) fn op_bcs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let taken = self.carry;
        self.branch_if(bus, taken);
    }

    pub(crate) fn op_bne<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let taken = !self.zero;
        self.branch_if(bus, taken);
    }

    pub(crate) fn op_beq<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let taken = self.zero;
        self.branch_if(bus, taken);
    }

    /// BBS d.b,rel - branch when the memory bit is set. No flags.
    pub(crate) fn op_bbs<B: Bus + ?Sized>(&mut self, bus: &mut B, bit: u8) {
        let addr = self.direct_page(bus);
        let operand = bus.load(addr);
        let taken = operand & (1 << bit) != 0;
        self.branch_if(bus, taken);
    }

    /// BBC d.b,rel - branch when the memory bit is clear. No flags.
    pub(crate) fn op_bbc<B: Bus + ?Sized>(&mut self, bus: &mut B, bit: u8) {
        let addr = self.direct_page(bus);
        let operand = bus.load(addr);
        let taken = operand & (1 << bit) == 0;
        self.branch_if(bus, taken);
    }

    /// CBNE d,rel - branch when the operand differs from A. No flags.
    pub(crate) fn op_cbne_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        let operand = bus.load(addr);
        let taken = operand != self.a;
        self.branch_if(bus, taken);
    }

    /// CBNE d+X,rel
    pub(crate) fn op_cbne_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        let operand = bus.load(addr);
        let taken = operand != self.a;
        self.branch_if(bus, taken);
    }

    /// DBNZ d,rel - decrement the operand, branch while non-zero. Writes Z.
    pub(crate) fn op_dbnz_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        let operand = bus.load(addr);
        let result = operand.wrapping_sub(1);

        self.zero = result == 0;
        let taken = !self.zero;
        self.branch_if(bus, taken);

        bus.store(addr, result);
    }

    /// DBNZ Y,rel - decrement Y, branch while non-zero. No flags.
    pub(crate) fn op_dbnz_y<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let result = self.y.wrapping_sub(1);
        self.branch_if(bus, result != 0);
        self.y = result;
    }

    pub(crate) fn op_jmp_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.pc = self.absolute(bus);
    }

    pub(crate) fn op_jmp_absx_ind<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.pc = self.absolute_x_indirect(bus);
    }
}
