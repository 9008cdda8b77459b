use std::num::ParseIntError;
use std::ops::Range;

use miette::{miette, LabeledSpan, Report, Severity};
use thiserror::Error;

use crate::alu::AluOp;

/// Fatal faults raised by the execution core.
///
/// There is deliberately no variant for an unrecognized opcode: the
/// dispatcher recovers from unknown bytes locally, reports them through
/// the sink, and keeps running.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The dispatcher selected an operation the ALU does not implement.
    #[error("unsupported ALU operation {0:?}")]
    UnsupportedAluOp(AluOp),
    /// An operand byte named a register outside r0-r7.
    #[error("register index {0} is out of bounds (valid indices are 0-7)")]
    RegisterOutOfBounds(u8),
    /// A push would descend into the loaded program image.
    #[error(
        "stack overflow: push at 0x{sp:02x} collides with the program (ends at 0x{program_end:02x})"
    )]
    StackOverflow { sp: u8, program_end: usize },
    #[error("failed to write program output")]
    Io(#[from] std::io::Error),
}

// Loader errors

pub fn load_wrong_width(span: Range<usize>, src: &str, width: usize) -> Report {
    miette!(
        severity = Severity::Error,
        code = "load::wrong_width",
        help = "instruction bytes are written as exactly 8 binary digits, like 10000010",
        labels = vec![LabeledSpan::at(span, "expected 8 characters")],
        "Encountered an instruction literal of {width} characters.",
    )
    .with_source_code(src.to_string())
}

pub fn load_bad_literal(span: Range<usize>, src: &str, e: ParseIntError) -> Report {
    miette!(
        severity = Severity::Error,
        code = "load::bad_lit",
        help = "only the digits 0 and 1 may appear in an instruction literal",
        labels = vec![LabeledSpan::at(span, "not a binary literal")],
        "Encountered an invalid instruction literal: {e}",
    )
    .with_source_code(src.to_string())
}

pub fn load_image_too_long(span: Range<usize>, src: &str) -> Report {
    miette!(
        severity = Severity::Error,
        code = "load::too_long",
        help = "LS-8 memory holds 256 bytes; the image must fit starting at address 0",
        labels = vec![LabeledSpan::at(span, "first byte past the end of memory")],
        "Program image is too long and cannot fit in memory.",
    )
    .with_source_code(src.to_string())
}
