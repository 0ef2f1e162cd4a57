//! CLI argument parsing for sevm

use clap::Parser;
use sevm_primitives::Address;
use std::path::PathBuf;

/// Run bytecode through the speculative EVM and print its read/write set
#[derive(Parser, Debug, Clone)]
#[command(name = "sevm")]
#[command(about = "Run bytecode through the speculative EVM and print its read/write set")]
#[command(version)]
pub struct Cli {
    /// Bytecode as hex (with or without 0x)
    #[arg(long, conflicts_with = "code_file", required_unless_present = "code_file")]
    pub code: Option<String>,

    /// File holding the bytecode as hex
    #[arg(long)]
    pub code_file: Option<PathBuf>,

    /// Call data as hex
    #[arg(long, default_value = "")]
    pub input: String,

    /// Address of the executing contract
    #[arg(long, default_value = "0x000000000000000000000000000000000000c0de")]
    pub address: Address,

    /// Caller address
    #[arg(long, default_value = "0x00000000000000000000000000000000000ca11e")]
    pub caller: Address,

    /// Call value (decimal or 0x-prefixed hex)
    #[arg(long, default_value = "0")]
    pub value: String,

    /// JSON file describing committed accounts
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// JSON run configuration (interpreter limits and block context)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sevm", "--code", "600101"]).unwrap();
        assert_eq!(cli.code.as_deref(), Some("600101"));
        assert_eq!(cli.value, "0");
        assert_eq!(cli.log_level, "warn");
        assert!(!cli.pretty);
        assert_eq!(
            cli.address,
            Address::from_hex("0x000000000000000000000000000000000000c0de").unwrap()
        );
    }

    #[test]
    fn test_code_required() {
        assert!(Cli::try_parse_from(["sevm"]).is_err());
        assert!(Cli::try_parse_from(["sevm", "--code", "00", "--code-file", "x.hex"]).is_err());
    }

    #[test]
    fn test_bad_address_rejected() {
        assert!(Cli::try_parse_from(["sevm", "--code", "00", "--caller", "0x12"]).is_err());
    }
}
