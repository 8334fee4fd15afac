use spc_core::cpu::spc700::{Spc700, Step};

mod common;
use common::TestBus;

fn step(cpu: &mut Spc700, bus: &mut TestBus) {
    assert!(matches!(cpu.step(bus), Step::Ran(4)));
}

#[test]
fn test_mov_imm_store_load_round_trip() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    // MOV A,#$12 ; MOV $20,A ; MOV A,$20
    bus.load_program(0, &[0xe8, 0x12, 0xc4, 0x20, 0xe4, 0x20]);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x12);

    step(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0x0020], 0x12);

    cpu.a = 0;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x12);
    assert_eq!(cpu.pc, 6);
}

#[test]
fn test_direct_page_flag_selects_page_1() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    // SETP ; MOV $20,A - with P set the store lands at $0120.
    bus.load_program(0, &[0x40, 0xc4, 0x20]);
    cpu.a = 0x99;

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x0120], 0x99);
    assert_eq!(bus.memory[0x0020], 0x00);
}

#[test]
fn test_mov_a_load_sets_flags() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    bus.memory[0x0044] = 0x80;
    bus.memory[0x0045] = 0x00;
    // MOV A,$44 ; MOV A,$45
    bus.load_program(0, &[0xe4, 0x44, 0xe4, 0x45]);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x80);
    assert!(cpu.negative);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x00);
    assert!(cpu.zero);
}

#[test]
fn test_mov_x_dp_leaves_flags() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    bus.memory[0x0010] = 0x80;
    // MOV X,$10
    bus.load_program(0, &[0xf8, 0x10]);
    cpu.zero = true;

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.x, 0x80);
    assert!(cpu.zero);
    assert!(!cpu.negative);
}

#[test]
fn test_indexed_direct_page_wraps_in_page() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    bus.memory[0x0010] = 0xab;
    // MOV A,$F0+X with X=$20: $F0+$20 wraps to $10 within the page.
    bus.load_program(0, &[0xf4, 0xf0]);
    cpu.x = 0x20;

    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0xab);
}

#[test]
fn test_indirect_y_addressing() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    // MOV ($30)+Y,A: pointer at $30 -> $2000, Y=5 -> $2005.
    bus.load_program(0, &[0xd7, 0x30]);
    bus.memory[0x0030] = 0x00;
    bus.memory[0x0031] = 0x20;
    cpu.a = 0x5a;
    cpu.y = 0x05;

    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x2005], 0x5a);
}

#[test]
fn test_indirect_x_load_store() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    // MOV (X),A ; MOV A,(X) after clearing A
    bus.load_program(0, &[0xc6, 0xe6]);
    cpu.x = 0x77;
    cpu.a = 0x33;

    step(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0x0077], 0x33);

    cpu.a = 0;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x33);
}

#[test]
fn test_absolute_indexed_stores() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    // MOV !$1200+X,A ; MOV !$1200+Y,A
    bus.load_program(0, &[0xd5, 0x00, 0x12, 0xd6, 0x00, 0x12]);
    cpu.a = 0x42;
    cpu.x = 0x01;
    cpu.y = 0x02;

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x1201], 0x42);
    assert_eq!(bus.memory[0x1202], 0x42);
}

#[test]
fn test_register_transfers_set_flags() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    // MOV X,A ; MOV Y,A ; MOV A,X
    bus.load_program(0, &[0x5d, 0xfd, 0x7d]);
    cpu.a = 0x80;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.x, 0x80);
    assert!(cpu.negative);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.y, 0x80);

    cpu.x = 0;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0);
    assert!(cpu.zero);
}

#[test]
fn test_mov_dp_imm_and_dp_dp() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    // MOV $40,#$77 ; MOV $41,$40
    bus.load_program(0, &[0x8f, 0x77, 0x40, 0xfa, 0x40, 0x41]);

    step(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0x0040], 0x77);

    step(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0x0041], 0x77);
}

#[test]
fn test_mov_stores_leave_flags() {
    let mut cpu = Spc700::new();
    let mut bus = TestBus::new();
    // MOV !$1234,A with a negative-looking A
    bus.load_program(0, &[0xc5, 0x34, 0x12]);
    cpu.a = 0x80;
    cpu.zero = true;

    step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x1234], 0x80);
    assert!(cpu.zero);
    assert!(!cpu.negative);
}
