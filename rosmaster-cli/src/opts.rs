use anyhow::{Context, Result};
use clap::Parser;
use rosmaster::{CallerId, MasterClient, Operation};
use rosmaster_config::ClientConfig;
use std::{ffi::OsString, path::PathBuf};
use tracing::debug;

/// `ros-xmlrpc` - ROS XML-RPC client
///
/// Calls a single ROS master API method and prints the `(code, msg, val)`
/// triple it returns.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about,
    disable_help_subcommand(true),
    override_usage = "ros-xmlrpc <command> [<args>]"
)]
pub struct Args {
    /// Make logging more verbose
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Make logging less verbose
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub enum Command {
    /// Get list of authorized subscriber clients
    #[command(name = "getServiceClients")]
    ServiceClients(ServiceClients),

    /// Get list of published topics
    #[command(name = "getPublishedTopics")]
    PublishedTopics(PublishedTopics),
}

impl Command {
    pub fn operation(&self) -> Operation {
        match self {
            Command::ServiceClients(_) => Operation::ServiceClients,
            Command::PublishedTopics(_) => Operation::PublishedTopics,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ServiceClients {
    #[command(flatten)]
    pub common: CommonOptions,

    /// Service name
    pub service: String,
}

#[derive(Parser, Debug)]
pub struct PublishedTopics {
    #[command(flatten)]
    pub common: CommonOptions,

    /// Subgraph of topics, all topics when omitted
    pub subgraph: Option<String>,
}

#[derive(Parser, Debug)]
pub struct CommonOptions {
    /// Caller ID [default: anon]
    #[arg(long = "caller_id", short = 'c')]
    pub caller_id: Option<String>,

    /// ROS Master URI
    #[arg(long = "master_uri", short = 'm', env = "ROS_MASTER_URI")]
    pub master_uri: Option<String>,

    /// Path to a TOML client config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds, waits on the master indefinitely when unset
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Who is calling and which master to call
#[derive(Debug)]
pub struct Target {
    pub caller_id: CallerId,
    pub client: MasterClient,
}

impl CommonOptions {
    pub(crate) fn load_config(&self) -> Result<ClientConfig> {
        match &self.config {
            Some(path) => Ok(ClientConfig::read(path)?),
            None => Ok(ClientConfig::default()),
        }
    }

    pub(crate) fn resolve_target(&self) -> Result<Target> {
        let cfg = self.load_config()?;
        let uri = cfg.resolve_master_uri(self.master_uri.as_deref())?;
        debug!(master = %uri, local = uri.is_local(), "Resolved master URI");

        let caller_id = CallerId::new(cfg.resolve_caller_id(self.caller_id.as_deref()));
        let timeout = cfg.resolve_timeout(self.timeout);
        let client =
            MasterClient::new(uri, timeout).context("Failed to set up the master client")?;

        Ok(Target { caller_id, client })
    }
}

/// The command named on the command line, when it isn't one we know.
///
/// Only the global verbosity flags may precede the command. Any other
/// leading flag is left for clap to report.
pub fn unrecognized_command(args: &[OsString]) -> Option<String> {
    let name = args
        .iter()
        .skip(1)
        .map(|arg| arg.to_string_lossy())
        .find(|arg| !is_verbosity_flag(arg))?;
    if name.starts_with('-') {
        return None;
    }
    name.parse::<Operation>().err().map(|e| e.0)
}

/// `-v`, `--quiet`, `-vvq` and friends
fn is_verbosity_flag(arg: &str) -> bool {
    match arg {
        "--verbose" | "--quiet" => true,
        _ => match arg.strip_prefix('-') {
            Some(shorts) => !shorts.is_empty() && shorts.chars().all(|c| c == 'v' || c == 'q'),
            None => false,
        },
    }
}

/// Filter directive for the requested verbosity, `warn` by default
pub fn log_level(verbose: u8, quiet: u8) -> &'static str {
    match i16::from(verbose) - i16::from(quiet) {
        i16::MIN..=-2 => "off",
        -1 => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
