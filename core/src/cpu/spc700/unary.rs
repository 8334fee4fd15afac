use super::Spc700;
use crate::core::Bus;

/// INC/DEC over registers and memory. All forms set Z/N and nothing else.
impl Spc700 {
    #[inline]
    fn step_at<B: Bus + ?Sized>(&mut self, bus: &mut B, addr: u16, delta: u8) {
        let operand = bus.load(addr);
        let result = operand.wrapping_add(delta);
        self.set_zn(result);
        bus.store(addr, result);
    }

    pub(crate) fn op_dec_a(&mut self) {
        self.a = self.a.wrapping_sub(1);
        let result = self.a;
        self.set_zn(result);
    }

    pub(crate) fn op_inc_a(&mut self) {
        self.a = self.a.wrapping_add(1);
        let result = self.a;
        self.set_zn(result);
    }

    pub(crate) fn op_dec_x(&mut self) {
        self.x = self.x.wrapping_sub(1);
        let result = self.x;
        self.set_zn(result);
    }

    pub(crate) fn op_inc_x(&mut self) {
        self.x = self.x.wrapping_add(1);
        let result = self.x;
        self.set_zn(result);
    }

    pub(crate) fn op_dec_y(&mut self) {
        self.y = self.y.wrapping_sub(1);
        let result = self.y;
        self.set_zn(result);
    }

    pub(crate) fn op_inc_y(&mut self) {
        self.y = self.y.wrapping_add(1);
        let result = self.y;
        self.set_zn(result);
    }

    pub(crate) fn op_dec_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        self.step_at(bus, addr, 0xff);
    }

    pub(crate) fn op_dec_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        self.step_at(bus, addr, 0xff);
    }

    pub(crate) fn op_dec_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        self.step_at(bus, addr, 0xff);
    }

    pub(crate) fn op_inc_dp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page(bus);
        self.step_at(bus, addr, 1);
    }

    pub(crate) fn op_inc_abs<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.absolute(bus);
        self.step_at(bus, addr, 1);
    }

    pub(crate) fn op_inc_dpx<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.direct_page_x(bus);
        self.step_at(bus, addr, 1);
    }
}
