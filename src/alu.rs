use std::cmp::Ordering;

use crate::error::RuntimeError;

/// Condition code set by CMP, telling how the first operand compares to
/// the second. Exactly one comparison result can hold at a time, which a
/// single enum value guarantees structurally.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flag {
    LessThan,
    GreaterThan,
    Equal,
    /// No comparison has run yet.
    Uninit,
}

/// Operation selectors the dispatcher may hand to the ALU.
///
/// Sub and Mul are listed because the LS-8 image format reserves bytes for
/// them, but neither has an ALU implementation: Sub was never wired into
/// the dispatcher, and Mul is handled as a direct multiply-and-print.
/// Selecting either is an internal-consistency fault.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AluOp {
    Add,
    Sub,
    Mul,
    Cmp,
}

/// Outcome of an ALU operation: arithmetic yields a register value,
/// comparison yields a condition code.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AluResult {
    Value(u8),
    Flag(Flag),
}

/// Pure function of two register values and a selector.
///
/// Addition truncates to 8 bits.
pub fn execute(op: AluOp, a: u8, b: u8) -> Result<AluResult, RuntimeError> {
    match op {
        AluOp::Add => Ok(AluResult::Value(a.wrapping_add(b))),
        AluOp::Cmp => {
            let flag = match a.cmp(&b) {
                Ordering::Less => Flag::LessThan,
                Ordering::Equal => Flag::Equal,
                Ordering::Greater => Flag::GreaterThan,
            };
            Ok(AluResult::Flag(flag))
        }
        AluOp::Sub | AluOp::Mul => Err(RuntimeError::UnsupportedAluOp(op)),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_is_modulo_256() {
        let cases = [(0, 0, 0), (1, 2, 3), (200, 100, 44), (255, 1, 0), (255, 255, 254)];
        for (a, b, expected) in cases {
            assert_eq!(
                execute(AluOp::Add, a, b).unwrap(),
                AluResult::Value(expected),
                "{a} + {b}"
            );
        }
    }

    #[test]
    fn cmp_follows_numeric_ordering() {
        assert_eq!(execute(AluOp::Cmp, 5, 5).unwrap(), AluResult::Flag(Flag::Equal));
        assert_eq!(
            execute(AluOp::Cmp, 7, 3).unwrap(),
            AluResult::Flag(Flag::GreaterThan)
        );
        assert_eq!(
            execute(AluOp::Cmp, 3, 7).unwrap(),
            AluResult::Flag(Flag::LessThan)
        );
    }

    #[test]
    fn sub_and_mul_are_unsupported() {
        // MUL reaches the sink without the ALU; SUB has no handler at all
        for op in [AluOp::Sub, AluOp::Mul] {
            assert!(matches!(
                execute(op, 4, 2),
                Err(RuntimeError::UnsupportedAluOp(selector)) if selector == op
            ));
        }
    }
}
