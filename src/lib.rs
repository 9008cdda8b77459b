// Loading
pub mod loader;

// Running
mod runtime;
pub use runtime::RunState;
pub mod ops;

mod alu;
pub use alu::{AluOp, Flag};

mod error;
pub use error::RuntimeError;

/// Amount of lines to show as context, each side of focus line (line containing span).
pub const DIAGNOSTIC_CONTEXT_LINES: usize = 4;
