use crate::binding::ContractBinding;
use crate::cli::args::{QueryArgs, SessionArgs, StatusArgs, SubmitArgs};
use crate::config::Config;
use crate::descriptor::ContractDescriptor;
use crate::logging;
use crate::provider::JsonRpcGateway;
use crate::session::SessionState;
use crate::ui::formatter::Formatter;
use crate::utils::parse_json_args;
use crate::SessionError;
use alloy_primitives::Address;
use miette::{Diagnostic, Result};
use serde_json::Value;
use std::sync::Arc;

/// Reported instead of the failing step, which only goes to the log.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{notice}", notice = logging::INITIALIZATION_FAILED_NOTICE)]
#[diagnostic(
    code(session::initialization_failed),
    help("Run with -v for the full initialization log.")
)]
struct InitializationFailed;

fn print_info(message: impl AsRef<str>) {
    println!("{}", Formatter::info(message));
}

fn print_success(message: impl AsRef<str>) {
    println!("{}", Formatter::success(message));
}

fn print_warning(message: impl AsRef<str>) {
    println!("{}", Formatter::warning(message));
}

/// Build a binding from the config file with command-line overrides applied
fn open_binding(args: &SessionArgs) -> Result<ContractBinding> {
    let mut config = Config::load_from(&args.config)?;
    if let Some(artifact) = &args.artifact {
        config.contract.artifact = Some(artifact.clone());
    }
    if !args.rpc_url.is_empty() {
        config.provider.endpoints = args.rpc_url.clone();
    }

    let descriptor = ContractDescriptor::from_file(config.artifact_path())?;

    let gateway = JsonRpcGateway::new(config.provider.endpoints.clone())
        .with_receipt_poll_interval(config.receipt_poll_interval());

    Ok(ContractBinding::new(
        Arc::new(gateway),
        Arc::new(descriptor),
        config.binding_config(),
    ))
}

fn parse_args(json: &str) -> Result<Vec<Value>> {
    Ok(parse_json_args(json).map_err(SessionError::from)?)
}

fn parse_address(address: &str) -> Result<Address> {
    address
        .parse::<Address>()
        .map_err(|e| {
            SessionError::InvalidArguments(format!("{:?} is not an address: {}", address, e))
                .into()
        })
}

/// Initialize a session through the binding, reporting failures the way a
/// user sees them.
async fn initialize(binding: &ContractBinding) -> Result<()> {
    print_info("Loading provider, accounts, and contract...");
    match binding.initialize().await {
        Ok(session) => {
            print_success("Session ready");
            print_info(Formatter::format_session(&session));
            Ok(())
        }
        Err(e) if e.is_initialization_failure() => Err(InitializationFailed.into()),
        Err(e) => Err(e.into()),
    }
}

/// Execute the status command
pub async fn status(args: StatusArgs) -> Result<()> {
    let binding = open_binding(&args.session)?;
    initialize(&binding).await?;

    let method = binding.config().query_method.clone();
    print_info(format!(
        "\nQuerying {}",
        Formatter::format_method_call(&method, &binding.config().query_args)
    ));
    match binding.refresh().await {
        Ok(result) => print_success(format!("Result: {}", result)),
        Err(e) => print_warning(format!("Query failed: {}", e)),
    }
    print_info(Formatter::format_snapshot(&binding.snapshot()));
    Ok(())
}

/// Execute the query command
pub async fn query(args: QueryArgs) -> Result<()> {
    let binding = open_binding(&args.session)?;
    initialize(&binding).await?;

    let method = args
        .method
        .unwrap_or_else(|| binding.config().query_method.clone());
    let call_args = match &args.args {
        Some(json) => parse_args(json)?,
        None => binding.config().query_args.clone(),
    };
    let caller = args.from.as_deref().map(parse_address).transpose()?;

    print_info(format!(
        "\nQuerying {}",
        Formatter::format_method_call(&method, &call_args)
    ));
    let result = binding.query(&method, &call_args, caller).await?;
    print_success(format!("Result: {}", result));
    Ok(())
}

/// Execute the submit command
pub async fn submit(args: SubmitArgs) -> Result<()> {
    let binding = open_binding(&args.session)?;
    initialize(&binding).await?;

    let method = args
        .method
        .unwrap_or_else(|| binding.config().submit_method.clone());
    let call_args = match &args.args {
        Some(json) => parse_args(json)?,
        None => binding.config().submit_args.clone(),
    };
    let sender = args.from.as_deref().map(parse_address).transpose()?;
    let gas_limit = args.gas_limit.unwrap_or(binding.config().gas_limit);

    print_info(format!(
        "\nSubmitting {} (gas limit {})",
        Formatter::format_method_call(&method, &call_args),
        gas_limit
    ));
    let receipt = binding.submit(&method, &call_args, sender, gas_limit).await?;
    print_success(Formatter::format_receipt(&receipt));

    if let SessionState::Ready(_) = binding.state().session_state() {
        print_info(Formatter::format_snapshot(&binding.snapshot()));
    }
    Ok(())
}
