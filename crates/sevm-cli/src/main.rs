//! sevm: run bytecode through the speculative EVM
//!
//! Executes one frame against an empty or JSON-described committed state,
//! resolving nested calls and creations with the reference executor, and
//! prints the outcome and read/write set as JSON.

mod cli;
mod config;
mod report;

use anyhow::{bail, Context, Result};
use cli::Cli;
use config::{decode_hex, load_run_config, load_state_file, parse_word, RunConfig};
use report::Report;
use sevm_evm::{CallFrame, Contract, Executor, RunState};
use sevm_state::InMemoryState;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let report = run(&cli)?;
    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}

/// Execute the frame described by `cli`
fn run(cli: &Cli) -> Result<Report> {
    let code = match (&cli.code, &cli.code_file) {
        (Some(code), _) => decode_hex(code).context("invalid --code")?,
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            decode_hex(&content).with_context(|| format!("invalid code in {}", path.display()))?
        }
        (None, None) => bail!("either --code or --code-file is required"),
    };
    let input = decode_hex(&cli.input).context("invalid --input")?;
    let value = parse_word(&cli.value).context("invalid --value")?;

    let config = match &cli.config {
        Some(path) => load_run_config(path)?,
        None => RunConfig::default(),
    };
    let state = match &cli.state {
        Some(path) => load_state_file(path)?,
        None => InMemoryState::new(),
    };
    let env = config.environment()?;

    tracing::info!(
        address = %cli.address,
        code_len = code.len(),
        input_len = input.len(),
        "executing frame"
    );

    let contract = Contract::new(code, cli.address, cli.caller, value, input);
    let mut frame = CallFrame::new(contract, config.interpreter.max_memory);
    let mut run_state = RunState::new();
    let mut executor = Executor::new(&env, &state).with_config(config.interpreter);

    let (output, error) = match executor.execute_frame(&mut run_state, &mut frame) {
        Ok(output) => (output, None),
        Err(err) if err.is_fatal() => bail!("fatal: {err}"),
        Err(err) => {
            tracing::warn!(error = %err, "frame stopped with error");
            (Vec::new(), Some(err.to_string()))
        }
    };

    Ok(Report::new(&frame, &run_state, &output, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn run_args(args: &[&str]) -> Result<Report> {
        let mut argv = vec!["sevm"];
        argv.extend_from_slice(args);
        run(&Cli::try_parse_from(argv)?)
    }

    #[test]
    fn test_run_arithmetic() {
        // PUSH1 2 PUSH1 3 ADD
        let report = run_args(&["--code", "6002600301"]).unwrap();
        assert_eq!(report.stack.len(), 1);
        assert!(report.stack[0].ends_with("05"));
        assert!(report.result);
        assert!(!report.abort);
        assert_eq!(report.output, "0x");
    }

    #[test]
    fn test_run_returns_output() {
        // PUSH1 0x2a PUSH1 0 MSTORE8 PUSH1 1 PUSH1 0 RETURN
        let report = run_args(&["--code", "602a60005360016000f3"]).unwrap();
        assert_eq!(report.output, "0x2a");
    }

    #[test]
    fn test_run_records_storage_write() {
        // PUSH1 7 PUSH1 1 SSTORE
        let report = run_args(&[
            "--code",
            "6007600155",
            "--address",
            "0x00000000000000000000000000000000000000aa",
        ])
        .unwrap();
        assert_eq!(
            report.writes,
            vec!["0x00000000000000000000000000000000000000aa".to_string()]
        );
        assert_eq!(report.storage.len(), 1);
    }

    #[test]
    fn test_run_with_state_file() {
        let json = r#"{ "accounts": { "0x00000000000000000000000000000000000000bb": { "balance": "0x10" } } }"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        // PUSH20 0xbb.. BALANCE
        let code = format!("73{}31", "00".repeat(19) + "bb");
        let report = run_args(&["--code", &code, "--state", &path]).unwrap();
        assert!(report.stack[0].ends_with("10"));
        assert_eq!(report.reads.len(), 1);
    }

    #[test]
    fn test_run_with_code_file_and_config() {
        let mut code = NamedTempFile::new().unwrap();
        code.write_all(b"0x4600\n").unwrap();
        let mut config = NamedTempFile::new().unwrap();
        config.write_all(br#"{ "chain_id": 10 }"#).unwrap();

        let report = run_args(&[
            "--code-file",
            code.path().to_str().unwrap(),
            "--config",
            config.path().to_str().unwrap(),
        ])
        .unwrap();
        assert!(report.stack[0].ends_with("0a"));
    }

    #[test]
    fn test_non_fatal_error_is_reported() {
        // ADD on an empty stack
        let report = run_args(&["--code", "01"]).unwrap();
        assert!(report.error.is_some());
    }

    #[test]
    fn test_fatal_error_fails_run() {
        let mut config = NamedTempFile::new().unwrap();
        let price = format!(r#"{{ "gas_price": "0x1{}" }}"#, "0".repeat(64));
        config.write_all(price.as_bytes()).unwrap();

        // GASPRICE
        let result = run_args(&["--code", "3a", "--config", config.path().to_str().unwrap()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_code_rejected() {
        assert!(run_args(&["--code", "6g"]).is_err());
    }
}
