//! Opcode dispatch tables.
//!
//! Both pages are 256-entry arrays of plain function pointers built at
//! compile time from the x/y/z/p/q opcode fields. Handlers that cover a
//! whole group (e.g. `LD r,r'`) decode their operands from the opcode
//! themselves, so each entry only captures the addressing strategy.

use super::{Bus, Cpu};

pub(super) type Handler = fn(&mut Cpu, &mut dyn Bus);

pub(super) static BASE_OPS: [Handler; 256] = build_base_table();
pub(super) static CB_OPS: [Handler; 256] = build_cb_table();

const fn base_handler(opcode: u8) -> Handler {
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 0x01;

    match opcode >> 6 {
        0 => match z {
            0 => match y {
                0 => Cpu::op_nop,
                1 => Cpu::op_ld_a16_sp,
                2 => Cpu::op_stop,
                3 => Cpu::op_jr,
                _ => Cpu::op_jr_cc,
            },
            1 if q == 0 => Cpu::op_ld_rr_d16,
            1 => Cpu::op_add_hl_rr,
            2 if q == 0 => Cpu::op_ld_indirect_a,
            2 => Cpu::op_ld_a_indirect,
            3 if q == 0 => Cpu::op_inc_rr,
            3 => Cpu::op_dec_rr,
            4 => Cpu::op_inc_r,
            5 => Cpu::op_dec_r,
            6 => Cpu::op_ld_r_d8,
            _ => match y {
                0..=3 => Cpu::op_rotate_a,
                4 => Cpu::op_daa,
                5 => Cpu::op_cpl,
                6 => Cpu::op_scf,
                _ => Cpu::op_ccf,
            },
        },
        1 if opcode == 0x76 => Cpu::op_halt,
        1 => Cpu::op_ld_r_r,
        2 => Cpu::op_alu_a_r,
        _ => match z {
            0 => match y {
                0..=3 => Cpu::op_ret_cc,
                4 => Cpu::op_ldh_a8_a,
                5 => Cpu::op_add_sp_e,
                6 => Cpu::op_ldh_a_a8,
                _ => Cpu::op_ld_hl_sp_e,
            },
            1 if q == 0 => Cpu::op_pop,
            1 => match p {
                0 => Cpu::op_ret,
                1 => Cpu::op_reti,
                2 => Cpu::op_jp_hl,
                _ => Cpu::op_ld_sp_hl,
            },
            2 => match y {
                0..=3 => Cpu::op_jp_cc,
                4 => Cpu::op_ld_c_a,
                5 => Cpu::op_ld_a16_a,
                6 => Cpu::op_ld_a_c,
                _ => Cpu::op_ld_a_a16,
            },
            3 => match y {
                0 => Cpu::op_jp,
                1 => Cpu::op_prefix_cb,
                6 => Cpu::op_di,
                7 => Cpu::op_ei,
                _ => Cpu::op_undefined,
            },
            4 if y < 4 => Cpu::op_call_cc,
            5 if q == 0 => Cpu::op_push,
            5 if p == 0 => Cpu::op_call,
            6 => Cpu::op_alu_a_d8,
            7 => Cpu::op_rst,
            _ => Cpu::op_undefined,
        },
    }
}

const fn build_base_table() -> [Handler; 256] {
    let mut table = [Cpu::op_undefined as Handler; 256];
    let mut opcode = 0;
    while opcode < 256 {
        table[opcode] = base_handler(opcode as u8);
        opcode += 1;
    }
    table
}

const fn build_cb_table() -> [Handler; 256] {
    let mut table = [Cpu::cb_shift as Handler; 256];
    let mut opcode = 0;
    while opcode < 256 {
        table[opcode] = match opcode >> 6 {
            0 => Cpu::cb_shift,
            1 => Cpu::cb_bit,
            2 => Cpu::cb_res,
            _ => Cpu::cb_set,
        };
        opcode += 1;
    }
    table
}
