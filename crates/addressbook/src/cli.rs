//! Clap derive structures for the `addressbook` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// addressbook -- find addresses by postcode and keep an address book
#[derive(Debug, Parser)]
#[command(
    name = "addressbook",
    version,
    about = "Find addresses by postcode and keep a local address book",
    long_about = "Look up addresses by postcode and house number, attach a name,\n\
        and store the result in a local address book.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Address API base URL (overrides config)
    #[arg(long, short = 'u', env = "ADDRESSBOOK_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Directory holding the address book (overrides config)
    #[arg(long, env = "ADDRESSBOOK_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ADDRESSBOOK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "ADDRESSBOOK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up addresses for a postcode and house number
    #[command(alias = "f")]
    Find(LookupArgs),

    /// Look up an address, attach a name, and add it to the address book
    #[command(alias = "a")]
    Add(AddArgs),

    /// Show the address book
    #[command(alias = "ls")]
    List,

    /// Remove an entry from the address book
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// Remove every entry from the address book
    Clear,

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Lookup / Add ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Post code (digits only)
    #[arg(long, short = 'p', alias = "post-code")]
    pub postcode: String,

    /// House number (digits only)
    #[arg(long, short = 'n')]
    pub house_number: String,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub lookup: LookupArgs,

    /// Id of the address to add (prompted when omitted and ambiguous)
    #[arg(long, short = 'a')]
    pub address: Option<String>,

    /// First name (prompted when omitted)
    #[arg(long, short = 'f')]
    pub first_name: Option<String>,

    /// Last name (prompted when omitted)
    #[arg(long, short = 'l')]
    pub last_name: Option<String>,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Id of the entry to remove
    pub id: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file from the current flags (e.g. --base-url)
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
