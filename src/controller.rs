//! Read queries and write transactions against the session's contract.

use crate::logging;
use crate::provider::{CallRequest, ProviderError, TransactionReceipt, TransactionRequest};
use crate::session::Session;
use crate::ui::Formatter;
use crate::utils::{resolve_function, ArgumentParser};
use crate::{Result, SessionError};
use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::Function;
use alloy_primitives::Address;
use serde_json::Value;
use std::fmt;

/// Decoded return values of a read call
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub method: String,
    pub values: Vec<DynSolValue>,
}

impl QueryResult {
    pub fn new(method: impl Into<String>, values: Vec<DynSolValue>) -> Self {
        Self {
            method: method.into(),
            values,
        }
    }

    /// The single return value, for methods that return exactly one
    pub fn value(&self) -> Option<&DynSolValue> {
        match self.values.as_slice() {
            [value] => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.values.as_slice() {
            [value] => write!(f, "{}", Formatter::format_sol_value(value)),
            values => {
                let rendered: Vec<_> = values.iter().map(Formatter::format_sol_value).collect();
                write!(f, "({})", rendered.join(", "))
            }
        }
    }
}

/// Performs `query` and `submit` on a ready session.
///
/// Holding a `&Session` is the readiness proof: sessions only exist once
/// every part of them is initialized. Everything that can be checked
/// locally (deployment, method, arguments, sender) is checked before the
/// provider is contacted.
#[derive(Debug, Default, Clone, Copy)]
pub struct InteractionController;

impl InteractionController {
    pub fn new() -> Self {
        Self
    }

    fn prepare(
        session: &Session,
        method: &str,
        args: &[Value],
    ) -> Result<(Address, Function, Vec<DynSolValue>)> {
        let contract = session.contract();
        let address = contract.address().ok_or(SessionError::ContractUnavailable {
            network: session.network_id(),
        })?;
        let function = resolve_function(contract.interface(), method, args.len())?;
        let values = ArgumentParser::new(function).parse_values(args)?;
        Ok((address, function.clone(), values))
    }

    /// Read from the contract. No state change, no cost.
    pub async fn query(
        &self,
        session: &Session,
        method: &str,
        args: &[Value],
        caller: Address,
    ) -> Result<QueryResult> {
        let (to, function, args) = Self::prepare(session, method, args)?;
        logging::log_query_start(method, &to, &caller);

        let request = CallRequest {
            to,
            function,
            args,
            from: caller,
        };
        match session.provider().call(&request).await {
            Ok(values) => {
                let result = QueryResult::new(method, values);
                logging::log_query_complete(method, &result.to_string());
                Ok(result)
            }
            Err(e) => {
                logging::log_query_failed(method, &e);
                Err(SessionError::ContractCallError {
                    method: method.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Send a state-changing transaction and return its receipt.
    ///
    /// `sender` must be one of the session's accounts; otherwise nothing is
    /// sent.
    pub async fn submit(
        &self,
        session: &Session,
        method: &str,
        args: &[Value],
        sender: Address,
        gas_limit: u64,
    ) -> Result<TransactionReceipt> {
        if !session.has_account(&sender) {
            return Err(SessionError::UnauthorizedSender(sender));
        }
        if gas_limit == 0 {
            return Err(SessionError::InvalidArguments(
                "gas limit must be greater than zero".to_string(),
            ));
        }
        let (to, function, args) = Self::prepare(session, method, args)?;
        logging::log_submit_start(method, &to, &sender, gas_limit);

        let request = TransactionRequest {
            to,
            function,
            args,
            sender,
            gas_limit,
        };
        let outcome = session
            .provider()
            .send(&request)
            .await
            .map_err(|e| submission_error(method, gas_limit, e))
            .and_then(|receipt| check_receipt(method, gas_limit, receipt));

        match &outcome {
            Ok(receipt) => logging::log_submit_confirmed(method, receipt),
            Err(e) => logging::log_submit_failed(method, e),
        }
        outcome
    }
}

fn submission_error(method: &str, gas_limit: u64, error: ProviderError) -> SessionError {
    match error {
        ProviderError::Rejected(reason) => SessionError::TransactionRejected(reason),
        ProviderError::Reverted(reason) => SessionError::TransactionReverted {
            method: method.to_string(),
            reason,
        },
        ProviderError::OutOfGas(_) => SessionError::GasLimitExceeded { gas_limit },
        ProviderError::Unconfirmed {
            transaction_hash,
            reason,
        } => SessionError::TransactionUnconfirmed {
            method: method.to_string(),
            transaction_hash,
            reason,
        },
        error @ (ProviderError::Transport(_)
        | ProviderError::Rpc { .. }
        | ProviderError::Decode(_)) => SessionError::TransactionNotSent {
            method: method.to_string(),
            reason: error.to_string(),
        },
    }
}

/// A mined transaction with a failed status either exhausted its gas or
/// reverted.
fn check_receipt(
    method: &str,
    gas_limit: u64,
    receipt: TransactionReceipt,
) -> Result<TransactionReceipt> {
    if receipt.status {
        return Ok(receipt);
    }
    if receipt.gas_used >= gas_limit {
        return Err(SessionError::GasLimitExceeded { gas_limit });
    }
    Err(SessionError::TransactionReverted {
        method: method.to_string(),
        reason: format!("transaction {} failed", receipt.transaction_hash),
    })
}
