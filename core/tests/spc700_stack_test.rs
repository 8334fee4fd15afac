use spc_core::cpu::spc700::{Spc700, Step};

mod common;
use common::TestBus;

fn step(cpu: &mut Spc700, bus: &mut TestBus) {
    assert!(matches!(cpu.step(bus), Step::Ran(4)));
}

#[test]
fn test_psw_compose_decompose_identity() {
    let mut cpu = Spc700::new();
    for byte in 0..=0xffu8 {
        cpu.set_psw(byte);
        assert_eq!(cpu.psw(), byte, "psw {byte:#04x}");
    }
}

#[test]
fn test_push_pop_registers() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    // PUSH A ; PUSH X ; POP A ; POP X - swaps A and X through the stack.
    bus.load_program(0, &[0x2d, 0x4d, 0xae, 0xce]);
    cpu.sp = 0xef;
    cpu.a = 0x11;
    cpu.x = 0x22;

    step(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0x01ef], 0x11);
    assert_eq!(cpu.sp, 0xee);

    step(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0x01ee], 0x22);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x22);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.x, 0x11);
    assert_eq!(cpu.sp, 0xef);
}

#[test]
fn test_push_pop_psw() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    // PUSH PSW ; POP PSW
    bus.load_program(0, &[0x0d, 0x8e]);
    cpu.sp = 0xef;
    cpu.set_psw(0xa5);

    step(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0x01ef], 0xa5);

    cpu.set_psw(0x00);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.psw(), 0xa5);
}

#[test]
fn test_call_pushes_return_and_ret_pops() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    // CALL !$4000 ; at $4000: RET
    bus.load_program(0x0200, &[0x3f, 0x00, 0x40]);
    bus.load_program(0x4000, &[0x6f]);
    cpu.pc = 0x0200;
    cpu.sp = 0xef;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x4000);
    // Return address $0203, pushed high byte first.
    assert_eq!(bus.memory[0x01ef], 0x02);
    assert_eq!(bus.memory[0x01ee], 0x03);
    assert_eq!(cpu.sp, 0xed);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x0203);
    assert_eq!(cpu.sp, 0xef);
}

#[test]
fn test_tcall_slot_addressing() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    cpu.sp = 0xef;

    // Slot n lives at $FFC0 + ((15 - n) << 1): slot 0 at $FFDE, slot 9 at
    // $FFCC, slot 15 at $FFC0.
    bus.load_program(0xffde, &[0x00, 0x30]); // slot 0 -> $3000
    bus.load_program(0xffcc, &[0x00, 0x90]); // slot 9 -> $9000
    bus.load_program(0xffc0, &[0x00, 0xf0]); // slot 15 -> $F000

    // TCALL 0
    bus.load_program(0x0100, &[0x01]);
    cpu.pc = 0x0100;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x3000);

    // TCALL 9 dispatches slot 9, not slot 0.
    bus.load_program(0x0110, &[0x91]);
    cpu.pc = 0x0110;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x9000);

    // TCALL 15
    bus.load_program(0x0120, &[0xf1]);
    cpu.pc = 0x0120;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0xf000);

    // Each call pushed a return address.
    assert_eq!(cpu.sp, 0xef - 6);
}

#[test]
fn test_stack_pointer_wraps_within_page_1() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    // PUSH A with SP=$00 wraps to $FF, staying in page 1.
    bus.load_program(0, &[0x2d]);
    cpu.sp = 0x00;
    cpu.a = 0x77;

    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x0100], 0x77);
    assert_eq!(cpu.sp, 0xff);
}
