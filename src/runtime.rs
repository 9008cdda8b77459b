use std::io::Write;

use colored::Colorize;

use crate::alu::{self, AluOp, AluResult, Flag};
use crate::error::RuntimeError;
use crate::ops::Opcode;

/// LS-8 can address 256 bytes of memory.
pub const MEMORY_MAX: usize = 256;

/// The stack pointer starts here and grows downward, leaving room below
/// for a program loaded at address 0.
pub const SP_INIT: u8 = 0xF4;

/// Register reserved as the stack pointer.
const SP: usize = 7;

/// Represents complete machine state during execution.
///
/// All program-visible output (PRN and MUL lines, unrecognized-opcode
/// notices) goes through the sink, so callers decide where it lands and
/// tests can capture it from a byte buffer.
pub struct RunState<W> {
    /// System memory - 256 bytes in size.
    mem: [u8; MEMORY_MAX],
    /// Program counter
    pc: u8,
    /// 8x 8-bit registers
    reg: [u8; 8],
    /// Condition code
    flag: Flag,
    /// Cleared only by HLT
    running: bool,
    /// One past the last loaded byte; the stack may not descend into it
    program_end: usize,
    /// Emit a trace line to stderr before each instruction
    trace: bool,
    /// Receives program output
    sink: W,
}

impl<W: Write> RunState<W> {
    /// Build a machine with `image` written to memory starting at address 0.
    ///
    /// The loader never produces an image larger than memory.
    pub fn new(image: &[u8], sink: W) -> RunState<W> {
        debug_assert!(image.len() <= MEMORY_MAX);
        let mut mem = [0; MEMORY_MAX];
        mem[..image.len()].copy_from_slice(image);

        RunState {
            mem,
            pc: 0,
            reg: [0, 0, 0, 0, 0, 0, 0, SP_INIT],
            flag: Flag::Uninit,
            running: true,
            program_end: image.len(),
            trace: false,
            sink,
        }
    }

    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    pub fn pc(&self) -> u8 {
        self.pc
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Give back the sink once execution is over.
    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Run with preset memory until HLT.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        while self.running {
            self.step()?;
        }
        self.sink.flush()?;
        Ok(())
    }

    /// One fetch-decode-execute cycle.
    ///
    /// Both operand bytes are fetched speculatively: an instruction that
    /// takes fewer operands never looks at them, so reading bytes that
    /// belong to the next instruction is harmless.
    pub fn step(&mut self) -> Result<(), RuntimeError> {
        let ir = self.mem(self.pc);
        let op_a = self.mem(self.pc.wrapping_add(1));
        let op_b = self.mem(self.pc.wrapping_add(2));

        if self.trace {
            self.trace_line(ir, op_a, op_b);
        }

        let Some(opcode) = Opcode::decode(ir) else {
            // Deliberately non-fatal: report the byte and skip it
            writeln!(self.sink, "{ir} is not recognized")?;
            self.pc = self.pc.wrapping_add(1);
            return Ok(());
        };

        match opcode {
            Opcode::Hlt => {
                self.running = false;
                self.advance(opcode);
            }
            Opcode::Ldi => {
                self.set_reg(op_a, op_b)?;
                self.advance(opcode);
            }
            Opcode::Prn => {
                let val = self.reg(op_a)?;
                writeln!(self.sink, "{val}")?;
                self.advance(opcode);
            }
            // Multiply-and-print without going through the ALU: no register
            // changes, and the product is printed untruncated
            Opcode::Mul => {
                let product = u16::from(self.reg(op_a)?) * u16::from(self.reg(op_b)?);
                writeln!(self.sink, "{product}")?;
                self.advance(opcode);
            }
            Opcode::Add => {
                self.alu_op(AluOp::Add, op_a, op_b)?;
                self.advance(opcode);
            }
            Opcode::Cmp => {
                self.alu_op(AluOp::Cmp, op_a, op_b)?;
                self.advance(opcode);
            }
            Opcode::Push => {
                let val = self.reg(op_a)?;
                self.push_val(val)?;
                self.advance(opcode);
            }
            Opcode::Pop => {
                let val = self.pop_val();
                self.set_reg(op_a, val)?;
                self.advance(opcode);
            }
            Opcode::Call => {
                self.push_val(self.pc.wrapping_add(2))?;
                self.pc = self.reg(op_a)?;
            }
            Opcode::Ret => {
                self.pc = self.pop_val();
            }
            Opcode::Jmp => {
                self.pc = self.reg(op_a)?;
            }
            Opcode::Jeq => {
                if self.flag == Flag::Equal {
                    self.pc = self.reg(op_a)?;
                } else {
                    self.advance(opcode);
                }
            }
            Opcode::Jne => {
                if self.flag != Flag::Equal {
                    self.pc = self.reg(op_a)?;
                } else {
                    self.advance(opcode);
                }
            }
        }

        Ok(())
    }

    fn advance(&mut self, opcode: Opcode) {
        self.pc = self.pc.wrapping_add(opcode.len());
    }

    #[inline]
    fn mem(&self, addr: u8) -> u8 {
        // 256 cells: any u8 address is in bounds by construction
        self.mem[usize::from(addr)]
    }

    #[inline]
    fn mem_write(&mut self, addr: u8, val: u8) {
        self.mem[usize::from(addr)] = val;
    }

    fn reg(&self, idx: u8) -> Result<u8, RuntimeError> {
        self.reg
            .get(usize::from(idx))
            .copied()
            .ok_or(RuntimeError::RegisterOutOfBounds(idx))
    }

    fn set_reg(&mut self, idx: u8, val: u8) -> Result<(), RuntimeError> {
        match self.reg.get_mut(usize::from(idx)) {
            Some(slot) => {
                *slot = val;
                Ok(())
            }
            None => Err(RuntimeError::RegisterOutOfBounds(idx)),
        }
    }

    /// Route a two-register instruction through the ALU and apply whichever
    /// result it yields.
    fn alu_op(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<(), RuntimeError> {
        let a = self.reg(reg_a)?;
        let b = self.reg(reg_b)?;
        match alu::execute(op, a, b)? {
            AluResult::Value(val) => self.set_reg(reg_a, val)?,
            AluResult::Flag(flag) => self.flag = flag,
        }
        Ok(())
    }

    fn push_val(&mut self, val: u8) -> Result<(), RuntimeError> {
        // Decrement stack
        let sp = self.reg[SP].wrapping_sub(1);
        if usize::from(sp) < self.program_end {
            return Err(RuntimeError::StackOverflow {
                sp,
                program_end: self.program_end,
            });
        }
        self.reg[SP] = sp;
        // Save onto stack
        self.mem_write(sp, val);
        Ok(())
    }

    fn pop_val(&mut self) -> u8 {
        let sp = self.reg[SP];
        let val = self.mem(sp);
        self.reg[SP] = sp.wrapping_add(1);
        val
    }

    fn trace_line(&self, ir: u8, op_a: u8, op_b: u8) {
        let mut line = format!(
            "TRACE: {:02X} | {ir:02X} {op_a:02X} {op_b:02X} |",
            self.pc
        );
        for reg in &self.reg {
            line.push_str(&format!(" {reg:02X}"));
        }
        eprintln!("{}", line.dimmed());
    }
}
