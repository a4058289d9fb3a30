use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "contract-session")]
#[command(about = "Bootstrap a provider session and interact with a deployed contract")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    pub fn to_log_level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a session, run the bound query and show the state
    Status(StatusArgs),

    /// Call a read-only contract method
    Query(QueryArgs),

    /// Send a state-changing transaction to the contract
    Submit(SubmitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that opens a session
#[derive(Args, Clone, Default)]
pub struct SessionArgs {
    /// Path to the contract artifact JSON (abi + networks)
    #[arg(long)]
    pub artifact: Option<PathBuf>,

    /// JSON-RPC endpoint to use (repeatable, tried in order)
    #[arg(long = "rpc-url", value_name = "URL", env = "CONTRACT_SESSION_RPC_URL")]
    pub rpc_url: Vec<String>,

    /// Configuration file
    #[arg(long, default_value = ".contract-session.toml")]
    pub config: PathBuf,
}

#[derive(Parser)]
pub struct StatusArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

#[derive(Parser)]
pub struct QueryArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Method to call (defaults to the bound query method)
    #[arg(short, long)]
    pub method: Option<String>,

    /// Method arguments as JSON array (e.g., '["0xabc…", 1000]')
    #[arg(short, long)]
    pub args: Option<String>,

    /// Address the call is made from (defaults to the session's signer)
    #[arg(long)]
    pub from: Option<String>,
}

#[derive(Parser)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Method to invoke (defaults to the bound submit method)
    #[arg(short, long)]
    pub method: Option<String>,

    /// Method arguments as JSON array (e.g., '["0xabc…", 1000]')
    #[arg(short, long)]
    pub args: Option<String>,

    /// Sending account; must be one of the session's accounts
    #[arg(long)]
    pub from: Option<String>,

    /// Maximum gas the transaction may consume
    #[arg(long)]
    pub gas_limit: Option<u64>,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
