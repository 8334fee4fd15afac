use super::Spc700;
use crate::core::Bus;

/// Two-operand ALU instructions (OR/AND/EOR/CMP/ADC/SBC) across every
/// addressing form the part supports. Each family shares the same shape:
/// resolve the address(es), run the ALU primitive, write the result back to
/// the accumulator or to memory.
impl Spc700 {
    /// A ← op(A, mem[addr])
    #[inline]
    fn alu_a_at<B, F>(&mut self, bus: &mut B, addr: u16, operation: F)
    where
        B: Bus + ?Sized,
        F: FnOnce(&mut Self, u8, u8) -> u8,
    {
        let operand = bus.load(addr);
        self.a = operation(self, self.a, operand);
    }

    /// A ← op(A, #imm)
    #[inline]
    fn alu_a_imm<B, F>(&mut self, bus: &mut B, operation: F)
    where
        B: Bus + ?Sized,
        F: FnOnce(&mut Self, u8, u8) -> u8,
    {
        let imm = self.immediate(bus);
        self.a = operation(self, self.a, imm);
    }

    /// d(dst) ← op(src operand, dst operand). The source operand byte is
    /// fetched first, matching the encoding order.
    #[inline]
    fn alu_dp_dp<B, F>(&mut self, bus: &mut B, operation: F)
    where
        B: Bus + ?Sized,
        F: FnOnce(&mut Self, u8, u8) -> u8,
    {
        let src = self.direct_page(bus);
        let dst = self.direct_page(bus);
        let src_val = bus.load(src);
        let dst_val = bus.load(dst);
        let result = operation(self, src_val, dst_val);
        bus.store(dst, result);
    }

    /// d ← op(d operand, #imm). The immediate byte precedes the page byte.
    #[inline]
    fn alu_dp_imm<B, F>(&mut self, bus: &mut B, operation: F)
    where
        B: Bus + ?Sized,
        F: FnOnce(&mut Self, u8, u8) -> u8,
    {
        let imm = self.immediate(bus);
        let addr = self.direct_page(bus);
        let operand = bus.load(addr);
        let result = operation(self, operand, imm);
        bus.store(addr, result);
    }

    /// (X) ← op((Y) operand, (X) operand)
    #[inline]
    fn alu_ix_iy<B, F>(&mut self, bus: &mut B, operation: F)
    where
        B: Bus + ?Sized,
        F: FnOnce(&mut Self, u8, u8) -> u8,
    {
        let dst = self.indirect_x();
        let src = self.indirect_y();
        let src_val = bus.load(src);
        let dst_val = bus.load(dst);
        let result = operation(self, src_val, dst_val);
        bus.store(dst, result);
    }

    // ---- OR ----

    pub(crate) fn op_or_a_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        self.alu_a_at(bus, addr, Self::alu_or);
    }

    pub(crate) fn op_or_a_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        self.alu_a_at(bus, addr, Self::alu_or);
    }

    pub(crate) fn op_or_a_ix<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.indirect_x();
        self.alu_a_at(bus, addr, Self::alu_or);
    }

    pub(crate) fn op_or_a_dxi<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x_indirect(bus);
        self.alu_a_at(bus, addr, Self::alu_or);
    }

    pub(crate) fn op_or_a_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_a_imm(bus, Self::alu_or);
    }

    pub(crate) fn op_or_dp_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_dp_dp(bus, Self::alu_or);
    }

    pub(crate) fn op_or_a_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        self.alu_a_at(bus, addr, Self::alu_or);
    }

    pub(crate) fn op_or_a_absx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_x(bus);
        self.alu_a_at(bus, addr, Self::alu_or);
    }

    pub(crate) fn op_or_a_absy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_y(bus);
        self.alu_a_at(bus, addr, Self::alu_or);
    }

    pub(crate) fn op_or_a_dpiy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_indirect_y(bus);
        self.alu_a_at(bus, addr, Self::alu_or);
    }

    pub(crate) fn op_or_dp_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_dp_imm(bus, Self::alu_or);
    }

    pub(crate) fn op_or_ix_iy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_ix_iy(bus, Self::alu_or);
    }

    // ---- AND ----

    pub(crate) fn op_and_a_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        self.alu_a_at(bus, addr, Self::alu_and);
    }

    pub(crate) fn op_and_a_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        self.alu_a_at(bus, addr, Self::alu_and);
    }

    pub(crate) fn op_and_a_ix<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.indirect_x();
        self.alu_a_at(bus, addr, Self::alu_and);
    }

    pub(crate) fn op_and_a_dxi<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x_indirect(bus);
        self.alu_a_at(bus, addr, Self::alu_and);
    }

    pub(crate) fn op_and_a_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_a_imm(bus, Self::alu_and);
    }

    pub(crate) fn op_and_dp_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_dp_dp(bus, Self::alu_and);
    }

    pub(crate) fn op_and_a_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        self.alu_a_at(bus, addr, Self::alu_and);
    }

    pub(crate) fn op_and_a_absx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_x(bus);
        self.alu_a_at(bus, addr, Self::alu_and);
    }

    pub(crate) fn op_and_a_absy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_y(bus);
        self.alu_a_at(bus, addr, Self::alu_and);
    }

    pub(crate) fn op_and_a_dpiy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_indirect_y(bus);
        self.alu_a_at(bus, addr, Self::alu_and);
    }

    pub(crate) fn op_and_dp_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_dp_imm(bus, Self::alu_and);
    }

    pub(crate) fn op_and_ix_iy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_ix_iy(bus, Self::alu_and);
    }

    // ---- EOR ----

    pub(crate) fn op_eor_a_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        self.alu_a_at(bus, addr, Self::alu_eor);
    }

    pub(crate) fn op_eor_a_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        self.alu_a_at(bus, addr, Self::alu_eor);
    }

    pub(crate) fn op_eor_a_ix<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.indirect_x();
        self.alu_a_at(bus, addr, Self::alu_eor);
    }

    pub(crate) fn op_eor_a_dxi<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x_indirect(bus);
        self.alu_a_at(bus, addr, Self::alu_eor);
    }

    pub(crate) fn op_eor_a_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_a_imm(bus, Self::alu_eor);
    }

    pub(crate) fn op_eor_dp_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_dp_dp(bus, Self::alu_eor);
    }

    pub(crate) fn op_eor_a_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        self.alu_a_at(bus, addr, Self::alu_eor);
    }

    pub(crate) fn op_eor_a_absx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_x(bus);
        self.alu_a_at(bus, addr, Self::alu_eor);
    }

    pub(crate) fn op_eor_a_absy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_y(bus);
        self.alu_a_at(bus, addr, Self::alu_eor);
    }

    pub(crate) fn op_eor_a_dpiy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_indirect_y(bus);
        self.alu_a_at(bus, addr, Self::alu_eor);
    }

    pub(crate) fn op_eor_dp_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_dp_imm(bus, Self::alu_eor);
    }

    pub(crate) fn op_eor_ix_iy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_ix_iy(bus, Self::alu_eor);
    }

    // ---- CMP ----
    // Compare never writes back; flags only.

    pub(crate) fn op_cmp_a_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        let operand = bus.load(addr);
        self.alu_cmp(self.a, operand);
    }

    pub(crate) fn op_cmp_a_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        let operand = bus.load(addr);
        self.alu_cmp(self.a, operand);
    }

    pub(crate) fn op_cmp_a_ix<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.indirect_x();
        let operand = bus.load(addr);
        self.alu_cmp(self.a, operand);
    }

    pub(crate) fn op_cmp_a_dxi<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x_indirect(bus);
        let operand = bus.load(addr);
        self.alu_cmp(self.a, operand);
    }

    pub(crate) fn op_cmp_a_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let imm = self.immediate(bus);
        self.alu_cmp(self.a, imm);
    }

    pub(crate) fn op_cmp_dp_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let src = self.direct_page(bus);
        let dst = self.direct_page(bus);
        let src_val = bus.load(src);
        let dst_val = bus.load(dst);
        self.alu_cmp(src_val, dst_val);
    }

    pub(crate) fn op_cmp_a_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        let operand = bus.load(addr);
        self.alu_cmp(self.a, operand);
    }

    pub(crate) fn op_cmp_a_absx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_x(bus);
        let operand = bus.load(addr);
        self.alu_cmp(self.a, operand);
    }

    pub(crate) fn op_cmp_a_absy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_y(bus);
        let operand = bus.load(addr);
        self.alu_cmp(self.a, operand);
    }

    pub(crate) fn op_cmp_a_dpiy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_indirect_y(bus);
        let operand = bus.load(addr);
        self.alu_cmp(self.a, operand);
    }

    pub(crate) fn op_cmp_dp_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let imm = self.immediate(bus);
        let addr = self.direct_page(bus);
        let operand = bus.load(addr);
        self.alu_cmp(operand, imm);
    }

    pub(crate) fn op_cmp_ix_iy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let dst = self.indirect_x();
        let src = self.indirect_y();
        let src_val = bus.load(src);
        let dst_val = bus.load(dst);
        self.alu_cmp(src_val, dst_val);
    }

    pub(crate) fn op_cmp_y_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        let operand = bus.load(addr);
        self.alu_cmp(self.y, operand);
    }

    pub(crate) fn op_cmp_y_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let imm = self.immediate(bus);
        self.alu_cmp(self.y, imm);
    }

    pub(crate) fn op_cmp_x_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let imm = self.immediate(bus);
        self.alu_cmp(self.x, imm);
    }

    // ---- ADC ----

    pub(crate) fn op_adc_a_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        self.alu_a_at(bus, addr, Self::alu_adc);
    }

    pub(crate) fn op_adc_a_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        self.alu_a_at(bus, addr, Self::alu_adc);
    }

    pub(crate) fn op_adc_a_ix<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.indirect_x();
        self.alu_a_at(bus, addr, Self::alu_adc);
    }

    pub(crate) fn op_adc_a_dxi<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x_indirect(bus);
        self.alu_a_at(bus, addr, Self::alu_adc);
    }

    pub(crate) fn op_adc_a_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_a_imm(bus, Self::alu_adc);
    }

    pub(crate) fn op_adc_dp_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_dp_dp(bus, Self::alu_adc);
    }

    pub(crate) fn op_adc_a_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        self.alu_a_at(bus, addr, Self::alu_adc);
    }

    pub(crate) fn op_adc_a_absx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_x(bus);
        self.alu_a_at(bus, addr, Self::alu_adc);
    }

    pub(crate) fn op_adc_a_absy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_y(bus);
        self.alu_a_at(bus, addr, Self::alu_adc);
    }

    pub(crate) fn op_adc_a_dpiy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_indirect_y(bus);
        self.alu_a_at(bus, addr, Self::alu_adc);
    }

    pub(crate) fn op_adc_dp_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_dp_imm(bus, Self::alu_adc);
    }

    pub(crate) fn op_adc_ix_iy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_ix_iy(bus, Self::alu_adc);
    }

    // ---- SBC ----

    pub(crate) fn op_sbc_a_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        self.alu_a_at(bus, addr, Self::alu_sbc);
    }

    pub(crate) fn op_sbc_a_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        self.alu_a_at(bus, addr, Self::alu_sbc);
    }

    pub(crate) fn op_sbc_a_ix<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.indirect_x();
        self.alu_a_at(bus, addr, Self::alu_sbc);
    }

    pub(crate) fn op_sbc_a_dxi<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x_indirect(bus);
        self.alu_a_at(bus, addr, Self::alu_sbc);
    }

    pub(crate) fn op_sbc_a_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_a_imm(bus, Self::alu_sbc);
    }

    pub(crate) fn op_sbc_dp_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_dp_dp(bus, Self::alu_sbc);
    }

    pub(crate) fn op_sbc_a_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        self.alu_a_at(bus, addr, Self::alu_sbc);
    }

    pub(crate) fn op_sbc_a_absx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_x(bus);
        self.alu_a_at(bus, addr, Self::alu_sbc);
    }

    pub(crate) fn op_sbc_a_absy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute_y(bus);
        self.alu_a_at(bus, addr, Self::alu_sbc);
    }

    pub(crate) fn op_sbc_a_dpiy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_indirect_y(bus);
        self.alu_a_at(bus, addr, Self::alu_sbc);
    }

    pub(crate) fn op_sbc_dp_imm<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_dp_imm(bus, Self::alu_sbc);
    }

    pub(crate) fn op_sbc_ix_iy<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.alu_ix_iy(bus, Self::alu_sbc);
    }
}
