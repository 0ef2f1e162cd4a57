//! JSON report of a finished run

use serde::Serialize;
use sevm_evm::{CallFrame, RunState};
use sevm_primitives::{word_to_bytes, Word};
use sevm_state::AccessKind;
use std::collections::BTreeMap;

/// Outcome, stack and read/write set of one run
#[derive(Debug, Serialize)]
pub struct Report {
    pub output: String,
    /// Bottom first
    pub stack: Vec<String>,
    pub abort: bool,
    pub result: bool,
    pub suicide: bool,
    /// Non-fatal error that stopped the frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub reads: Vec<String>,
    pub writes: Vec<String>,
    pub access_log: Vec<AccessEntry>,
    pub balances: BTreeMap<String, String>,
    pub storage: BTreeMap<String, BTreeMap<String, String>>,
}

/// One access in program order
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AccessEntry {
    pub address: String,
    pub kind: &'static str,
}

impl Report {
    /// Collect the report from a finished frame and its run state
    pub fn new(frame: &CallFrame, run: &RunState, output: &[u8], error: Option<String>) -> Self {
        let mut reads: Vec<String> = run.rw_set.reads().map(|a| a.to_hex()).collect();
        let mut writes: Vec<String> = run.rw_set.writes().map(|a| a.to_hex()).collect();
        reads.sort();
        writes.sort();

        let access_log = run
            .rw_set
            .log()
            .iter()
            .map(|access| AccessEntry {
                address: access.address.to_hex(),
                kind: match access.kind {
                    AccessKind::Read => "read",
                    AccessKind::Write => "write",
                },
            })
            .collect();

        let balances = run
            .mstate
            .balances()
            .map(|(address, balance)| (address.to_hex(), word_hex(balance)))
            .collect();

        let mut storage: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (key, value) in run.mstate.storage() {
            storage
                .entry(key.address.to_hex())
                .or_default()
                .insert(key.slot.to_hex(), word_hex(value));
        }

        Self {
            output: format!("0x{}", hex::encode(output)),
            stack: frame.stack.as_slice().iter().map(word_hex).collect(),
            abort: run.outcome.abort,
            result: run.outcome.result,
            suicide: run.outcome.suicide,
            error,
            reads,
            writes,
            access_log,
            balances,
            storage,
        }
    }
}

fn word_hex(word: &Word) -> String {
    format!("0x{}", hex::encode(word_to_bytes(word)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sevm_evm::Contract;
    use sevm_primitives::{Address, H256};

    #[test]
    fn test_report_collects_run_state() {
        let address = Address::from_bytes([0xaa; 20]);
        let contract = Contract::new(vec![0x00], address, Address::default(), Word::zero(), vec![]);
        let mut frame = CallFrame::new(contract, 1024);
        frame.stack.push(Word::from(2)).unwrap();

        let mut run = RunState::new();
        run.rw_set.record_write(address);
        run.rw_set.record_read(address);
        run.rw_set.record_read(Address::from_bytes([0xbb; 20]));
        run.mstate
            .set_state(address, H256::from_bytes([1u8; 32]), Word::from(7));

        let report = Report::new(&frame, &run, &[0xde, 0xad], None);
        assert_eq!(report.output, "0xdead");
        assert_eq!(report.stack.len(), 1);
        assert!(report.stack[0].ends_with("02"));
        assert_eq!(report.writes, vec![address.to_hex()]);
        assert_eq!(report.reads.len(), 1);
        assert_eq!(report.access_log.len(), 3);
        assert_eq!(report.access_log[1].kind, "read");
        assert!(report.result);
        assert_eq!(report.storage[&address.to_hex()].len(), 1);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("error").is_none());
    }
}
