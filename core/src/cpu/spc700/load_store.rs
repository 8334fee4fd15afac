use super::Spc700;
use crate::core::Bus;

/// MOV in all its forms. Loads and register-to-register transfers set Z/N
/// from the moved value (with the lone exception of `MOV X,d`, which leaves
/// the flags alone); stores never touch flags.
impl Spc700 {
    #[inline]
    fn load_a<B: Bus + ?Sized>(&mut self, bus: &mut B, addr: u16) {
        let operand = bus.load(addr);
        self.set_zn(operand);
        self.a = operand;
    }

    // ---- Loads into A ----

    pub(crate) fn op_mov_a_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let operand = self.immediate(bus);
        self.set_zn(operand);
        self.a = operand;
    }

    pub(crate) fn op_mov_a_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        self.load_a(bus, addr);
    }

    pub(crate) fn op_mov_a_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        self.load_a(bus, addr);
    }

    pub(crate) fn op_mov_a_ix<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.indirect_x();
        self.load_a(bus, addr);
    }

    pub(crate) fn op_mov_a_dxi<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x_indirect(bus);
        self.load_a(bus, addr);
    }

    pub(crate) fn op_mov_a_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        self.load_a(bus, addr);
    }

    pub(crate) fn op_mov_a_absx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_x(bus);
        self.load_a(bus, addr);
    }

    pub(crate) fn op_mov_a_absy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_y(bus);
        self.load_a(bus, addr);
    }

    pub(crate) fn op_mov_a_dpiy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_indirect_y(bus);
        self.load_a(bus, addr);
    }

    // ---- Loads into X ----

    pub(crate) fn op_mov_x_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let operand = self.immediate(bus);
        self.set_zn(operand);
        self.x = operand;
    }

    pub(crate) fn op_mov_x_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        let operand = bus.load(addr);
        self.set_zn(operand);
        self.x = operand;
    }

    pub(crate) fn op_mov_x_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        self.x = bus.load(addr);
    }

    // ---- Loads into Y ----

    pub(crate) fn op_mov_y_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let operand = self.immediate(bus);
        self.set_zn(operand);
        self.y = operand;
    }

    pub(crate) fn op_mov_y_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        let operand = bus.load(addr);
        self.set_zn(operand);
        self.y = operand;
    }

    pub(crate) fn op_mov_y_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        let operand = bus.load(addr);
        self.set_zn(operand);
        self.y = operand;
    }

    pub(crate) fn op_mov_y_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        let operand = bus.load(addr);
        self.set_zn(operand);
        self.y = operand;
    }

    // ---- Register transfers ----

    pub(crate) fn op_mov_x_a(&mut self) {
        self.set_zn(self.a);
        self.x = self.a;
    }

    pub(crate) fn op_mov_x_sp(&mut self) {
        self.set_zn(self.sp);
        self.x = self.sp;
    }

    /// MOV SP,X - the only way to write the stack pointer. No flags.
    pub(crate) fn op_mov_sp_x(&mut self) {
        self.sp = self.x;
    }

    pub(crate) fn op_mov_a_x(&mut self) {
        self.set_zn(self.x);
        self.a = self.x;
    }

    pub(crate) fn op_mov_a_y(&mut self) {
        self.set_zn(self.y);
        self.a = self.y;
    }

    pub(crate) fn op_mov_y_a(&mut self) {
        self.set_zn(self.a);
        self.y = self.a;
    }

    // ---- Stores from A ----

    pub(crate) fn op_mov_dp_a<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        bus.store(addr, self.a);
    }

    pub(crate) fn op_mov_abs_a<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        bus.store(addr, self.a);
    }

    pub(crate) fn op_mov_ix_a<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.indirect_x();
        bus.store(addr, self.a);
    }

    pub(crate) fn op_mov_dxi_a<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        bus.store(addr, self.a);
    }

    pub(crate) fn op_mov_dpx_a<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        bus.store(addr, self.a);
    }

    pub(crate) fn op_mov_absx_a<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_x(bus);
        bus.store(addr, self.a);
    }

    pub(crate) fn op_mov_absy_a<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_y(bus);
        bus.store(addr, self.a);
    }

    pub(crate) fn op_mov_dpiy_a<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_indirect_y(bus);
        bus.store(addr, self.a);
    }

    // ---- Stores from X / Y ----

    pub(crate) fn op_mov_abs_x<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        bus.store(addr, self.x);
    }

    pub(crate) fn op_mov_dp_x<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        bus.store(addr, self.x);
    }

    pub(crate) fn op_mov_dp_y<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        bus.store(addr, self.y);
    }

    pub(crate) fn op_mov_abs_y<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        bus.store(addr, self.y);
    }

    pub(crate) fn op_mov_dpx_y<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        bus.store(addr, self.y);
    }

    // ---- Memory-to-memory ----

    pub(crate) fn op_mov_dp_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let imm = self.immediate(bus);
        let addr = self.direct_page(bus);
        bus.store(addr, imm);
    }

    pub(crate) fn op_mov_dp_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let src = self.direct_page(bus);
        let dst = self.direct_page(bus);
        let operand = bus.load(src);
        bus.store(dst, operand);
    }
}
