//! Interpreter error types

use thiserror::Error;

/// Errors raised while executing opcodes.
///
/// A run-level abort (unresolvable sub-call) is not an error; it is reported
/// through [`ExecutionOutcome`](crate::ExecutionOutcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvmError {
    /// A handler needed more operands than the stack holds
    #[error("stack underflow")]
    StackUnderflow,

    /// Stack overflow
    #[error("stack overflow (max 1024)")]
    StackOverflow,

    /// Byte with no handler in the dispatch table
    #[error("invalid opcode: 0x{0:02x}")]
    InvalidOpcode(u8),

    /// Offset or size does not fit the host word size
    #[error("invalid memory access")]
    InvalidMemoryAccess,

    /// Memory growth beyond the configured cap
    #[error("memory limit exceeded: requested {requested} bytes, limit {limit}")]
    MemoryLimitExceeded {
        /// Size the access would have grown memory to
        requested: usize,
        /// Configured cap
        limit: usize,
    },

    /// The driver ran out of its step budget
    #[error("step limit exceeded after {0} steps")]
    StepLimitExceeded(u64),

    /// Failure reported by the orchestrator
    #[error("orchestrator error: {0}")]
    Orchestrator(String),

    /// Misconfigured host; the process must halt
    #[error("fatal: {0}")]
    Fatal(String),
}

impl EvmError {
    /// Whether the host must stop the whole process rather than the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EvmError::Fatal(_))
    }
}

/// Result type for interpreter operations
pub type EvmResult<T> = Result<T, EvmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(EvmError::Fatal("gas price".into()).is_fatal());
        assert!(!EvmError::StackUnderflow.is_fatal());
        assert!(!EvmError::Orchestrator("gone".into()).is_fatal());
    }

    #[test]
    fn test_display() {
        assert_eq!(EvmError::InvalidOpcode(0x0c).to_string(), "invalid opcode: 0x0c");
        let err = EvmError::MemoryLimitExceeded { requested: 200, limit: 100 };
        assert_eq!(
            err.to_string(),
            "memory limit exceeded: requested 200 bytes, limit 100"
        );
    }
}
