use crate::provider::TransactionReceipt;
use crate::session::{QueryState, Session, SessionState, StateSnapshot, SubmitState};
use alloy_dyn_abi::DynSolValue;
use crossterm::style::Stylize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Pretty printing utilities for session output
pub struct Formatter;

impl Formatter {
    /// Render an ABI value the way a user would type it.
    pub fn format_sol_value(value: &DynSolValue) -> String {
        match value {
            DynSolValue::Bool(b) => b.to_string(),
            DynSolValue::Int(i, _) => i.to_string(),
            DynSolValue::Uint(u, _) => u.to_string(),
            DynSolValue::Address(a) => a.to_checksum(None),
            DynSolValue::FixedBytes(word, size) => format!("0x{}", hex::encode(&word[..*size])),
            DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
            DynSolValue::String(s) => s.clone(),
            DynSolValue::Array(values) | DynSolValue::FixedArray(values) => format!(
                "[{}]",
                values
                    .iter()
                    .map(Self::format_sol_value)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            DynSolValue::Tuple(values) => format!(
                "({})",
                values
                    .iter()
                    .map(Self::format_sol_value)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            other => format!("{:?}", other),
        }
    }

    /// Format a method call.
    pub fn format_method_call(name: &str, args: &[serde_json::Value]) -> String {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        format!("{}({})", name, args.join(", "))
    }

    /// Summarize a ready session.
    pub fn format_session(session: &Session) -> String {
        let contract = match session.contract().address() {
            Some(address) => address.to_checksum(None),
            None => "<not deployed on this network>".to_string(),
        };
        let mut lines = vec![
            format!("Network:  {}", session.network_id()),
            format!("Contract: {}", contract),
            "Accounts:".to_string(),
        ];
        lines.extend(session.accounts().iter().enumerate().map(|(i, account)| {
            let marker = if i == 0 { " (default)" } else { "" };
            format!("  [{}] {}{}", i, account.to_checksum(None), marker)
        }));
        lines.join("\n")
    }

    pub fn format_receipt(receipt: &TransactionReceipt) -> String {
        let block = receipt
            .block_number
            .map(|b| b.to_string())
            .unwrap_or_else(|| "pending".to_string());
        format!(
            "Transaction {}\n  block: {}\n  gas used: {}\n  status: {}",
            receipt.transaction_hash,
            block,
            receipt.gas_used,
            if receipt.status { "success" } else { "failed" }
        )
    }

    /// One-line rendering of every sub-flow of a snapshot.
    pub fn format_snapshot(snapshot: &StateSnapshot) -> String {
        let session = match &snapshot.session {
            SessionState::Failed(error) => format!("failed ({})", error),
            other => other.name().to_string(),
        };
        let query = match &snapshot.query {
            QueryState::Idle => "idle".to_string(),
            QueryState::Pending => "pending".to_string(),
            QueryState::Ready(result) => format!("ready ({})", result),
            QueryState::Failed(error) => format!("failed ({})", error),
        };
        let submission = match &snapshot.submission {
            SubmitState::Idle => "idle".to_string(),
            SubmitState::Pending => "pending".to_string(),
            SubmitState::Confirmed(receipt) => format!("confirmed ({})", receipt.transaction_hash),
            SubmitState::Failed(error) => format!("failed ({})", error),
        };
        format!(
            "session: {} | query: {} | submission: {}",
            session, query, submission
        )
    }

    pub fn info(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Info)
    }

    pub fn success(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Success)
    }

    pub fn warning(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Warning)
    }

    pub fn configure_colors(enable: bool) {
        COLOR_ENABLED.store(enable, Ordering::Relaxed);
    }

    pub fn configure_colors_from_env() {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        Self::configure_colors(!no_color);
    }

    fn apply_color(message: &str, kind: ColorKind) -> String {
        if !COLOR_ENABLED.load(Ordering::Relaxed) {
            return message.to_string();
        }

        match kind {
            ColorKind::Info => format!("{}", message.blue()),
            ColorKind::Success => format!("{}", message.green()),
            ColorKind::Warning => format!("{}", message.yellow()),
        }
    }
}

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);

#[derive(Copy, Clone)]
enum ColorKind {
    Info,
    Success,
    Warning,
}
