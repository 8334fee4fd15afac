use spc_core::core::Bus;
use spc_core::device::sdsp::regs::{REG_ENDX, REG_KON};
use spc_core::machine::{
    APU_CTRL, APU_DSP_ADDR, APU_DSP_DATA, APU_IO0, APU_IO1, APU_T0DIV, APU_T0OUT, Apu, CTRL_IOC01,
};

#[test]
fn test_mmio_store_through_to_ram() {
    let mut apu = Apu::new();
    let bus = apu.bus_mut();

    for (i, addr) in (0x00f0u16..=0x00ff).enumerate() {
        bus.store(addr, 0x40 + i as u8);
        assert_eq!(bus.aram()[addr as usize], 0x40 + i as u8, "ARAM at {addr:#06x}");
    }
}

#[test]
fn test_all_registers_read_zero_after_reset() {
    let mut apu = Apu::new();
    // Dirty some state first.
    apu.bus_mut().store(APU_DSP_ADDR, 0x31);
    apu.bus_mut().store(0x00f8, 0xaa);
    apu.reset();

    let bus = apu.bus_mut();
    for addr in 0x00f0u16..=0x00ff {
        assert_eq!(bus.load(addr), 0, "register at {addr:#06x}");
    }
}

#[test]
fn test_dsp_window_proxies_addr_and_data() {
    let mut apu = Apu::new();
    let bus = apu.bus_mut();

    bus.store(APU_DSP_ADDR, REG_KON);
    bus.store(APU_DSP_DATA, 0x81);

    assert_eq!(bus.dsp().regs()[REG_KON as usize], 0x81);
    assert_eq!(bus.load(APU_DSP_DATA), 0x81);
}

#[test]
fn test_dsp_endx_write_clears() {
    let mut apu = Apu::new();
    let bus = apu.bus_mut();

    bus.store(APU_DSP_ADDR, REG_ENDX);
    bus.store(APU_DSP_DATA, 0xff);

    assert_eq!(bus.load(APU_DSP_DATA), 0x00);
}

#[test]
fn test_dsp_window_above_7f_is_open_bus() {
    let mut apu = Apu::new();
    let bus = apu.bus_mut();

    bus.store(APU_DSP_ADDR, 0x80);
    bus.store(APU_DSP_DATA, 0x55);

    assert_eq!(bus.load(APU_DSP_DATA), 0xff);
    assert_eq!(bus.dsp().regs()[0], 0x00);
    assert_eq!(bus.dsp().bad_reg_accesses(), 2);
}

#[test]
fn test_io_ports_are_split_pairs() {
    let mut apu = Apu::new();
    let bus = apu.bus_mut();

    // A CPU store reaches the outward latch only.
    bus.store(APU_IO0, 0x12);
    assert_eq!(bus.io_out()[0], 0x12);
    assert_eq!(bus.load(APU_IO0), 0x00);

    // A host byte lands on the inward latch only.
    bus.set_io_in(0, 0xcc);
    assert_eq!(bus.load(APU_IO0), 0xcc);
    assert_eq!(bus.io_out()[0], 0x12);
}

#[test]
fn test_ioc01_clears_input_latches() {
    let mut apu = Apu::new();
    let bus = apu.bus_mut();

    bus.set_io_in(0, 0x11);
    bus.set_io_in(1, 0x22);
    bus.set_io_in(2, 0x33);

    bus.store(APU_CTRL, CTRL_IOC01);

    assert_eq!(bus.load(APU_IO0), 0);
    assert_eq!(bus.load(APU_IO1), 0);
    // Channel 2 is untouched by IOC01.
    assert_eq!(bus.load(0x00f6), 0x33);
}

#[test]
fn test_tdiv_store_is_inert_until_enable_edge() {
    let mut apu = Apu::new();
    let bus = apu.bus_mut();

    bus.store(APU_T0DIV, 0x05);
    // No enable edge: the divider byte just reads back.
    assert_eq!(bus.load(APU_T0DIV), 0x05);
    assert_eq!(bus.load(APU_T0OUT), 0);
}

#[test]
fn test_tout_stores_do_not_tick_anything() {
    let mut apu = Apu::new();
    let bus = apu.bus_mut();

    bus.store(APU_T0OUT, 0x0f);
    // The byte lands in the shadow (and RAM, via store-through), but the
    // counter logic is untouched; a read still hands the byte over and
    // rearms.
    assert_eq!(bus.load(APU_T0OUT), 0x0f);
    assert_eq!(bus.load(APU_T0OUT), 0x00);
}

#[test]
fn test_aux_registers_act_like_ram() {
    let mut apu = Apu::new();
    let bus = apu.bus_mut();

    bus.store(0x00f8, 0x5a);
    bus.store(0x00f9, 0xa5);
    assert_eq!(bus.load(0x00f8), 0x5a);
    assert_eq!(bus.load(0x00f9), 0xa5);
}
