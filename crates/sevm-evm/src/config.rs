//! Interpreter configuration

use serde::{Deserialize, Serialize};

/// Value reported by `GAS` in place of a real remaining-gas count
pub const DEFAULT_GAS_STAND_IN: u64 = 100_000_000_000;

/// Default hard cap on frame memory in bytes
pub const DEFAULT_MAX_MEMORY: usize = 100_000;

/// Default step budget for one frame
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// Default nesting cap for the reference executor
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Tunables for one interpreter instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Constant pushed by `GAS`
    pub gas_stand_in: u64,
    /// Memory cap per frame
    pub max_memory: usize,
    /// Opcode budget per frame; `JUMPI` ignores its condition, so loops never end on their own
    pub max_steps: u64,
    /// Nesting cap for nested frames
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            gas_stand_in: DEFAULT_GAS_STAND_IN,
            max_memory: DEFAULT_MAX_MEMORY,
            max_steps: DEFAULT_MAX_STEPS,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InterpreterConfig::default();
        assert_eq!(config.gas_stand_in, 100_000_000_000);
        assert_eq!(config.max_memory, 100_000);
        assert_eq!(config.max_call_depth, 1024);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: InterpreterConfig = serde_json::from_str(r#"{"max_steps": 10}"#).unwrap();
        assert_eq!(config.max_steps, 10);
        assert_eq!(config.max_memory, DEFAULT_MAX_MEMORY);
    }
}
