use std::fmt;

/// Every instruction byte the LS-8 dispatcher understands.
///
/// Discriminants are the opcode bytes from the LS-8 listing format, so a
/// fetched byte can be decoded straight into a variant. The high two bits
/// of each byte happen to encode the operand count, but the table below is
/// kept explicit rather than derived from the encoding.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Opcode {
    /// Stop execution
    Hlt = 0b0000_0001,
    /// Pop the return address into PC
    Ret = 0b0001_0001,
    /// Push a register onto the stack
    Push = 0b0100_0101,
    /// Pop the stack into a register
    Pop = 0b0100_0110,
    /// Print a register as a decimal line
    Prn = 0b0100_0111,
    /// Push the return address and jump to the address in a register
    Call = 0b0101_0000,
    /// Jump to the address in a register
    Jmp = 0b0101_0100,
    /// Jump if the EQUAL flag is set
    Jeq = 0b0101_0101,
    /// Jump if the EQUAL flag is not set
    Jne = 0b0101_0110,
    /// ALU addition into the first register
    Add = 0b1010_0000,
    /// Load an immediate into a register
    Ldi = 0b1000_0010,
    /// Print the product of two registers; changes no register
    Mul = 0b1010_0010,
    /// ALU comparison, setting the flag register
    Cmp = 0b1010_0111,
}

impl Opcode {
    pub fn decode(byte: u8) -> Option<Opcode> {
        let opcode = match byte {
            0b0000_0001 => Opcode::Hlt,
            0b0001_0001 => Opcode::Ret,
            0b0100_0101 => Opcode::Push,
            0b0100_0110 => Opcode::Pop,
            0b0100_0111 => Opcode::Prn,
            0b0101_0000 => Opcode::Call,
            0b0101_0100 => Opcode::Jmp,
            0b0101_0101 => Opcode::Jeq,
            0b0101_0110 => Opcode::Jne,
            0b1010_0000 => Opcode::Add,
            0b1000_0010 => Opcode::Ldi,
            0b1010_0010 => Opcode::Mul,
            0b1010_0111 => Opcode::Cmp,
            _ => return None,
        };
        Some(opcode)
    }

    /// Total instruction length in bytes, opcode included.
    pub fn len(self) -> u8 {
        match self {
            Opcode::Hlt | Opcode::Ret => 1,
            Opcode::Push
            | Opcode::Pop
            | Opcode::Prn
            | Opcode::Call
            | Opcode::Jmp
            | Opcode::Jeq
            | Opcode::Jne => 2,
            Opcode::Add | Opcode::Ldi | Opcode::Mul | Opcode::Cmp => 3,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Hlt => "HLT",
            Opcode::Ret => "RET",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Prn => "PRN",
            Opcode::Call => "CALL",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
            Opcode::Add => "ADD",
            Opcode::Ldi => "LDI",
            Opcode::Mul => "MUL",
            Opcode::Cmp => "CMP",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
