//! Error type for rejected stepper arguments.

use thiserror::Error;

/// Reasons a stepper or block helper refuses its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepperError {
    #[error("shell type must be non-negative, got {shell_type}")]
    NegativeShellType { shell_type: i32 },

    #[error("shell type {shell_type} exceeds the supported maximum {max}")]
    ShellTypeTooHigh { shell_type: i32, max: usize },

    #[error("max_nbasis {max_nbasis} is smaller than the inner shell's {nbasis} basis functions")]
    BasisWidthTooSmall { max_nbasis: usize, nbasis: usize },

    #[error("a block with rows {max_nbasis} wide does not fit in the address space")]
    BlockTooLarge { max_nbasis: usize },

    #[error("output buffer holds {len} elements, {required} required")]
    BufferTooSmall { len: usize, required: usize },
}

pub type Result<T> = std::result::Result<T, StepperError>;
