use super::*;
use crate::config::MachineConfig;
use crate::interrupts::{Interrupt, InterruptController, InterruptFlags};

/// Flat 64 KiB bus that counts machine cycles.
struct TestBus {
    memory: [u8; 0x10000],
    cycles: u32,
    ic: InterruptController,
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
            cycles: 0,
            ic: InterruptController::new(),
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.cycles += 1;
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.cycles += 1;
        self.memory[addr as usize] = value;
    }

    fn idle(&mut self) {
        self.cycles += 1;
    }

    fn interrupts(&mut self) -> &mut InterruptController {
        &mut self.ic
    }
}

impl TestBus {
    fn with_program(program: &[u8]) -> Self {
        let mut bus = Self::default();
        bus.memory[0x0100..0x0100 + program.len()].copy_from_slice(program);
        bus
    }

    fn word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.memory[addr as usize], self.memory[addr as usize + 1]])
    }
}

/// Reset a CPU onto `program` at 0x0100 and zero the cycle counter.
fn boot(program: &[u8]) -> (Cpu, TestBus) {
    boot_with(program, &MachineConfig::default())
}

fn boot_with(program: &[u8], config: &MachineConfig) -> (Cpu, TestBus) {
    let mut bus = TestBus::with_program(program);
    let mut cpu = Cpu::with_config(config);
    cpu.reset(&mut bus);
    bus.cycles = 0;
    (cpu, bus)
}

/// Machine cycles of one step, with `f` applied after reset.
fn cycles_of(program: &[u8], f: impl FnOnce(&mut Cpu)) -> u32 {
    let (mut cpu, mut bus) = boot(program);
    f(&mut cpu);
    cpu.step(&mut bus);
    bus.cycles
}

/// F value that makes condition `cc` (NZ, Z, NC, C) evaluate to `taken`.
fn flags_for(cc: u8, taken: bool) -> u8 {
    match (cc, taken) {
        (0, true) | (1, false) => 0x00,
        (0, false) | (1, true) => 0x80,
        (2, true) | (3, false) => 0x00,
        _ => 0x10,
    }
}

fn is_conditional(opcode: u8) -> bool {
    matches!(opcode & 0xE7, 0x20 | 0xC0 | 0xC2 | 0xC4)
}

#[rustfmt::skip]
const BASE_CYCLES: [u32; 256] = [
//  0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
    1, 3, 2, 2, 1, 1, 2, 1, 5, 2, 2, 2, 1, 1, 2, 1, // 0x
    2, 3, 2, 2, 1, 1, 2, 1, 3, 2, 2, 2, 1, 1, 2, 1, // 1x
    3, 3, 2, 2, 1, 1, 2, 1, 3, 2, 2, 2, 1, 1, 2, 1, // 2x
    3, 3, 2, 2, 3, 3, 3, 1, 3, 2, 2, 2, 1, 1, 2, 1, // 3x
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 4x
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 5x
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 6x
    2, 2, 2, 2, 2, 2, 1, 2, 1, 1, 1, 1, 1, 1, 2, 1, // 7x
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 8x
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 9x
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // Ax
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // Bx
    5, 3, 4, 4, 6, 4, 2, 4, 5, 4, 4, 2, 6, 6, 2, 4, // Cx
    5, 3, 4, 1, 6, 4, 2, 4, 5, 4, 4, 1, 6, 1, 2, 4, // Dx
    3, 3, 2, 1, 1, 4, 2, 4, 4, 1, 4, 1, 1, 1, 2, 4, // Ex
    3, 3, 2, 1, 1, 4, 2, 4, 3, 2, 4, 1, 1, 1, 2, 4, // Fx
];

#[test]
fn every_base_opcode_takes_documented_cycles() {
    for opcode in 0..=0xFFu8 {
        let cycles = cycles_of(&[opcode, 0x00, 0x00], |cpu| {
            if is_conditional(opcode) {
                cpu.regs.f = flags_for((opcode >> 3) & 0x03, true);
            }
        });
        assert_eq!(
            cycles, BASE_CYCLES[opcode as usize],
            "opcode {opcode:#04x} took {cycles} cycles"
        );
    }
}

#[test]
fn conditional_branches_skip_extra_cycles_when_not_taken() {
    let not_taken = [(0x20, 2), (0xC0, 2), (0xC2, 3), (0xC4, 3)];
    for (base, expected) in not_taken {
        for cc in 0..4u8 {
            let opcode = base | (cc << 3);
            let cycles = cycles_of(&[opcode, 0x00, 0x00], |cpu| {
                cpu.regs.f = flags_for(cc, false);
            });
            assert_eq!(cycles, expected, "opcode {opcode:#04x} not taken");
        }
    }
}

#[test]
fn every_cb_opcode_takes_documented_cycles() {
    for cb in 0..=0xFFu8 {
        let expected = match (cb >> 6, cb & 0x07) {
            (_, z) if z != 6 => 2,
            (1, _) => 3,
            _ => 4,
        };
        let cycles = cycles_of(&[0xCB, cb], |_| {});
        assert_eq!(cycles, expected, "CB {cb:#04x} took {cycles} cycles");
    }
}

#[test]
fn reset_loads_post_boot_state_and_prefetches() {
    let mut bus = TestBus::with_program(&[0xAF]);
    let mut cpu = Cpu::new();
    cpu.regs = Registers::default();
    cpu.reset(&mut bus);

    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert_eq!(cpu.opcode(), 0xAF);
    assert_eq!(cpu.state(), RunState::Running);
    assert_eq!(bus.cycles, 1);
}

#[test]
fn ld_a_immediate_takes_two_cycles() {
    let (mut cpu, mut bus) = boot(&[0x3E, 0x42]);
    assert_eq!(cpu.step(&mut bus), StepOutcome::Continue);
    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(bus.cycles, 2);
}

#[test]
fn call_pushes_resume_address() {
    let (mut cpu, mut bus) = boot(&[0xCD, 0x00, 0x02]);
    cpu.step(&mut bus);

    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.word(cpu.regs.sp), 0x0103);
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(bus.cycles, 6);
}

#[test]
fn call_then_ret_round_trips_pc_and_sp() {
    let (mut cpu, mut bus) = boot(&[0xCD, 0x00, 0x02, 0x00]);
    bus.memory[0x0200] = 0xC9;
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.opcode(), 0x00);
}

#[test]
fn inc_and_dec_wrap_with_flags() {
    let (mut cpu, mut bus) = boot(&[0x04, 0x0D]);
    cpu.regs.b = 0xFF;
    cpu.regs.c = 0x00;
    cpu.regs.f = 0x10;

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::C), "INC keeps carry");

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.c, 0xFF);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::C), "DEC keeps carry");
}

#[test]
fn inc_hl_memory_reads_then_writes() {
    let (mut cpu, mut bus) = boot(&[0x34]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x0F;
    cpu.step(&mut bus);
    assert_eq!(bus.memory[0xC000], 0x10);
    assert!(cpu.get_flag(Flag::H));
    assert_eq!(bus.cycles, 3);
}

#[test]
fn daa_corrects_overflowing_sum() {
    // LD A,0x90; ADD A,0x0A; DAA
    let (mut cpu, mut bus) = boot(&[0x3E, 0x90, 0xC6, 0x0A, 0x27]);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x9A);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::C));
    assert!(cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::H));
}

#[test]
fn daa_adjusts_low_digit() {
    // 0x09 + 0x01 = 0x0A, adjusted to BCD 10.
    let (mut cpu, mut bus) = boot(&[0x3E, 0x09, 0xC6, 0x01, 0x27]);
    for _ in 0..3 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.regs.a, 0x10);
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn daa_uses_half_carry_from_addition() {
    // 0x0F + 0x01 sets H; the correction adds 6 to the low digit.
    let (mut cpu, mut bus) = boot(&[0x3E, 0x0F, 0xC6, 0x01, 0x27]);
    for _ in 0..3 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.regs.a, 0x16);
    assert!(!cpu.get_flag(Flag::H));
}

#[test]
fn daa_after_subtraction() {
    // 0x10 - 0x01 = 0x0F with H; BCD result is 09.
    let (mut cpu, mut bus) = boot(&[0x3E, 0x10, 0xD6, 0x01, 0x27]);
    for _ in 0..3 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.regs.a, 0x09);
    assert!(cpu.get_flag(Flag::N));
}

#[test]
fn sub_and_compare_flags() {
    let (mut cpu, mut bus) = boot(&[0x3E, 0x3E, 0xFE, 0x40, 0xD6, 0x3E]);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x3E, "CP leaves A");
    assert!(cpu.get_flag(Flag::C));
    assert!(cpu.get_flag(Flag::N));
    assert!(!cpu.get_flag(Flag::Z));
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn adc_and_sbc_consume_carry() {
    // SCF; LD A,0x0F; ADC A,0x00; SCF; SBC A,0x00
    let (mut cpu, mut bus) = boot(&[0x37, 0x3E, 0x0F, 0xCE, 0x00, 0x37, 0xDE, 0x00]);
    for _ in 0..3 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.regs.a, 0x10);
    assert!(cpu.get_flag(Flag::H));
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x0F);
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::N));
}

#[test]
fn add_hl_sets_half_carry_from_bit_11() {
    let (mut cpu, mut bus) = boot(&[0x09]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x0001);
    cpu.regs.f = 0x80;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
    assert!(cpu.get_flag(Flag::Z), "Z untouched");
}

#[test]
fn sp_relative_arithmetic() {
    // ADD SP,+1 then LD HL,SP-2
    let (mut cpu, mut bus) = boot(&[0xE8, 0x01, 0xF8, 0xFE]);
    cpu.regs.sp = 0x00FF;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.sp, 0x0100);
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.hl(), 0x00FE);
    assert_eq!(cpu.regs.sp, 0x0100);
}

#[test]
fn pop_af_masks_low_nibble() {
    let (mut cpu, mut bus) = boot(&[0xF1]);
    cpu.regs.sp = 0xC000;
    bus.memory[0xC000] = 0xFF;
    bus.memory[0xC001] = 0x12;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.af(), 0x12F0);
    assert_eq!(cpu.regs.sp, 0xC002);
}

#[test]
fn hl_post_increment_and_decrement() {
    let (mut cpu, mut bus) = boot(&[0x22, 0x3A]);
    cpu.regs.set_hl(0xC000);
    cpu.regs.a = 0x55;
    cpu.step(&mut bus);
    assert_eq!(bus.memory[0xC000], 0x55);
    assert_eq!(cpu.regs.hl(), 0xC001);
    bus.memory[0xC001] = 0x77;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x77);
    assert_eq!(cpu.regs.hl(), 0xC000);
}

#[test]
fn high_page_loads() {
    let (mut cpu, mut bus) = boot(&[0xE0, 0x80, 0xF2]);
    cpu.regs.a = 0x99;
    cpu.step(&mut bus);
    assert_eq!(bus.memory[0xFF80], 0x99);
    cpu.regs.c = 0x81;
    bus.memory[0xFF81] = 0x11;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x11);
}

#[test]
fn ld_a16_sp_stores_little_endian() {
    let (mut cpu, mut bus) = boot(&[0x08, 0x00, 0xC0]);
    cpu.regs.sp = 0xBEEF;
    cpu.step(&mut bus);
    assert_eq!(bus.word(0xC000), 0xBEEF);
}

#[test]
fn jr_backwards() {
    let (mut cpu, mut bus) = boot(&[0x00, 0x18, 0xFD]);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn rst_jumps_to_fixed_vector() {
    let (mut cpu, mut bus) = boot(&[0xEF]);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(bus.word(cpu.regs.sp), 0x0101);
}

#[test]
fn rotate_a_clears_zero() {
    let (mut cpu, mut bus) = boot(&[0x07, 0xCB, 0x07]);
    cpu.regs.a = 0x00;
    cpu.step(&mut bus);
    assert!(!cpu.get_flag(Flag::Z), "RLCA never sets Z");
    cpu.step(&mut bus);
    assert!(cpu.get_flag(Flag::Z), "RLC A does");
}

#[test]
fn cb_operations_on_registers_and_memory() {
    // SWAP B; BIT 7,(HL); RES 0,(HL); SET 3,E; SRA D
    let (mut cpu, mut bus) = boot(&[0xCB, 0x30, 0xCB, 0x7E, 0xCB, 0x86, 0xCB, 0xDB, 0xCB, 0x2A]);
    cpu.regs.b = 0xA5;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x81;
    cpu.regs.e = 0x00;
    cpu.regs.d = 0x81;
    cpu.regs.f = 0x10;

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b, 0x5A);
    assert!(!cpu.get_flag(Flag::C));

    cpu.regs.f = 0x10;
    cpu.step(&mut bus);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C), "BIT keeps carry");

    cpu.step(&mut bus);
    assert_eq!(bus.memory[0xC000], 0x80);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.e, 0x08);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.d, 0xC0);
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn interrupt_dispatch_takes_five_cycles() {
    let (mut cpu, mut bus) = boot(&[0x00]);
    bus.ic.write_enable(InterruptFlags::TIMER.bits());
    bus.ic.master_enable = true;
    bus.ic.request(Interrupt::Timer);
    bus.memory[0x0050] = 0x3C;

    cpu.step(&mut bus);
    assert_eq!(bus.cycles, 5);
    assert_eq!(cpu.regs.pc, 0x0050);
    assert_eq!(cpu.opcode(), 0x3C);
    assert_eq!(bus.word(cpu.regs.sp), 0x0100);
    assert!(!bus.ic.master_enable);
    assert!(bus.ic.pending().is_empty());
}

#[test]
fn dispatch_honours_priority() {
    let (mut cpu, mut bus) = boot(&[0x00]);
    bus.ic.write_enable(0x1F);
    bus.ic.master_enable = true;
    bus.ic.request(Interrupt::Timer);
    bus.ic.request(Interrupt::VBlank);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.ic.pending(), InterruptFlags::TIMER);
}

#[test]
fn reti_enables_immediately() {
    let (mut cpu, mut bus) = boot(&[0xD9]);
    cpu.regs.sp = 0xC000;
    bus.memory[0xC000] = 0x34;
    bus.memory[0xC001] = 0x12;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x1234);
    assert!(bus.ic.master_enable);
}

#[test]
fn ei_takes_effect_after_next_instruction() {
    let (mut cpu, mut bus) = boot(&[0xFB, 0x00, 0x00]);
    bus.ic.write_enable(InterruptFlags::VBLANK.bits());
    bus.ic.request(Interrupt::VBlank);

    cpu.step(&mut bus); // EI
    assert!(!bus.ic.master_enable);
    cpu.step(&mut bus); // NOP runs before the interrupt
    assert_eq!(cpu.regs.pc, 0x0102);
    assert!(bus.ic.master_enable);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.word(cpu.regs.sp), 0x0102);
}

#[test]
fn di_cancels_queued_ei() {
    let (mut cpu, mut bus) = boot(&[0xFB, 0xF3, 0x00]);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert!(!bus.ic.master_enable);
    assert!(!bus.ic.enable_queued);
}

#[test]
fn halt_with_ime_idles_until_interrupt() {
    let (mut cpu, mut bus) = boot(&[0x76, 0x00]);
    bus.ic.master_enable = true;
    bus.ic.write_enable(InterruptFlags::JOYPAD.bits());

    cpu.step(&mut bus);
    assert_eq!(cpu.state(), RunState::Halted);
    assert_eq!(bus.cycles, 1);

    for _ in 0..10 {
        cpu.step(&mut bus);
    }
    assert_eq!(bus.cycles, 11);
    assert_eq!(cpu.regs.pc, 0x0101);

    bus.ic.request(Interrupt::Joypad);
    bus.cycles = 0;
    cpu.step(&mut bus);
    assert_eq!(cpu.state(), RunState::Running);
    assert_eq!(cpu.regs.pc, 0x0060);
    assert_eq!(bus.word(cpu.regs.sp), 0x0101);
    assert_eq!(bus.cycles, 5);
}

#[test]
fn halt_without_ime_wakes_without_dispatch() {
    let (mut cpu, mut bus) = boot(&[0x76, 0x3C]);
    bus.ic.write_enable(InterruptFlags::SERIAL.bits());

    cpu.step(&mut bus);
    assert_eq!(cpu.state(), RunState::HaltPrepare);
    assert!(cpu.is_halted());
    cpu.step(&mut bus);
    assert_eq!(cpu.state(), RunState::Halted);
    cpu.step(&mut bus);
    assert_eq!(cpu.state(), RunState::Halted);
    assert!(cpu.is_halted());

    bus.ic.request(Interrupt::Serial);
    let a = cpu.regs.a;
    cpu.step(&mut bus);
    assert_eq!(cpu.state(), RunState::Running);
    assert!(!cpu.is_halted());
    assert_eq!(cpu.regs.a, a.wrapping_add(1));
    assert_eq!(cpu.regs.pc, 0x0102);
    assert!(bus.ic.pending().contains(InterruptFlags::SERIAL));
}

#[test]
fn halt_bug_repeats_following_byte() {
    let (mut cpu, mut bus) = boot(&[0x76, 0x3C, 0x00]);
    bus.ic.write_enable(InterruptFlags::TIMER.bits());
    bus.ic.request(Interrupt::Timer);
    cpu.regs.a = 0x00;

    cpu.step(&mut bus); // HALT
    cpu.step(&mut bus); // prepare resolves with a pending source
    assert_eq!(cpu.state(), RunState::Running);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0101);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x02);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn halt_bug_can_be_disabled() {
    let config = MachineConfig::builder().emulate_halt_bug(false).build();
    let (mut cpu, mut bus) = boot_with(&[0x76, 0x3C, 0x00], &config);
    bus.ic.write_enable(InterruptFlags::TIMER.bits());
    bus.ic.request(Interrupt::Timer);
    cpu.regs.a = 0x00;

    for _ in 0..4 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.regs.a, 0x01);
    assert_eq!(cpu.regs.pc, 0x0103);
}

#[test]
fn ei_then_halt_returns_to_halt() {
    let (mut cpu, mut bus) = boot(&[0xFB, 0x76, 0x00]);
    bus.ic.write_enable(InterruptFlags::TIMER.bits());
    bus.ic.request(Interrupt::Timer);

    cpu.step(&mut bus); // EI
    cpu.step(&mut bus); // HALT, IME comes on afterwards
    assert_eq!(cpu.state(), RunState::HaltPrepare);
    cpu.step(&mut bus);
    cpu.step(&mut bus); // dispatch
    assert_eq!(cpu.regs.pc, 0x0050);
    assert_eq!(bus.word(cpu.regs.sp), 0x0101);
}

#[test]
fn undefined_opcode_crashes_but_keeps_cycling() {
    let (mut cpu, mut bus) = boot(&[0xD3, 0x00]);
    cpu.step(&mut bus);
    assert!(cpu.is_crashed());
    assert_eq!(bus.cycles, 1);

    let pc = cpu.regs.pc;
    for _ in 0..5 {
        assert_eq!(cpu.step(&mut bus), StepOutcome::Continue);
    }
    assert_eq!(bus.cycles, 6);
    assert_eq!(cpu.regs.pc, pc);
    assert!(cpu.is_crashed());
}

#[test]
fn crashed_core_ignores_interrupts() {
    let (mut cpu, mut bus) = boot(&[0xFD]);
    cpu.step(&mut bus);
    bus.ic.write_enable(0x1F);
    bus.ic.master_enable = true;
    bus.ic.request(Interrupt::VBlank);
    cpu.step(&mut bus);
    assert!(cpu.is_crashed());
    assert!(bus.ic.pending().contains(InterruptFlags::VBLANK));
}

#[test]
fn stop_requests_low_power() {
    let (mut cpu, mut bus) = boot(&[0x10, 0x00, 0x00]);
    assert_eq!(cpu.step(&mut bus), StepOutcome::EnterLowPower);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(bus.cycles, 2);
    assert_eq!(cpu.state(), RunState::Running);
    assert_eq!(cpu.step(&mut bus), StepOutcome::Continue);
}

#[test]
fn stop_with_nonzero_operand_crashes() {
    let (mut cpu, mut bus) = boot(&[0x10, 0x01]);
    assert_eq!(cpu.step(&mut bus), StepOutcome::Continue);
    assert!(cpu.is_crashed());
}
