//! Clap derive structures for the `modekit` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// modekit -- command-line client for the MODE IoT platform
#[derive(Debug, Parser)]
#[command(
    name = "modekit",
    version,
    about = "Manage MODE homes, devices and smart modules from the command line",
    long_about = "A CLI for the MODE IoT platform.\n\n\
        Every read goes through a normalized local cache: list pages are\n\
        fetched, stored by identity, and joined back for display.",
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
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "MODE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL (overrides profile)
    #[arg(long, env = "MODE_URL", global = true)]
    pub url: Option<String>,

    /// Bearer token (overrides keyring and profile)
    #[arg(long, env = "MODE_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MODE_OUTPUT",
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

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "MODE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "MODE_TIMEOUT", global = true)]
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
    /// Plain text, one value per line (scripting)
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
    /// Log in and store the session token
    Login(LoginArgs),

    /// Revoke the session token
    Logout,

    /// Manage homes
    #[command(alias = "h")]
    Homes(HomesArgs),

    /// Manage devices in a home
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Manage device and home key-value stores
    Kv(KvArgs),

    /// Manage smart-module entities
    #[command(alias = "ent")]
    Entities(EntitiesArgs),

    /// View time-series metadata
    Series(SeriesArgs),

    /// View and dismiss alerts
    Alerts(AlertsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Pagination arguments for paged list commands.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Zero-based page number
    #[arg(long, default_value = "0")]
    pub page: u64,

    /// Items per page (defaults to the profile's page size)
    #[arg(long, short = 'l', value_parser = clap::value_parser!(u64).range(1..=500))]
    pub page_size: Option<u64>,
}

/// The home a command operates in.
#[derive(Debug, Args)]
pub struct HomeArg {
    /// Home ID
    #[arg(long = "home", short = 'H', value_name = "HOME_ID")]
    pub home_id: u64,
}

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Keep the token in the config file instead of the system keyring
    #[arg(long)]
    pub plaintext: bool,
}

// ── Homes ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct HomesArgs {
    #[command(subcommand)]
    pub command: HomesCommand,
}

#[derive(Debug, Subcommand)]
pub enum HomesCommand {
    /// List homes of a user
    #[command(alias = "ls")]
    List {
        /// User ID (defaults to the logged-in user)
        #[arg(long)]
        user: Option<u64>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one home
    Get {
        #[arg(value_name = "HOME_ID")]
        id: u64,
    },

    /// Create a home
    Create {
        name: String,

        /// IANA timezone (e.g. Europe/Berlin)
        #[arg(long)]
        timezone: Option<String>,
    },

    /// Rename a home
    Rename {
        #[arg(value_name = "HOME_ID")]
        id: u64,
        name: String,
    },

    /// Delete a home
    #[command(alias = "rm")]
    Delete {
        #[arg(value_name = "HOME_ID")]
        id: u64,
    },
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices in a home
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        home: HomeArg,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one device
    Get {
        #[arg(value_name = "DEVICE_ID")]
        id: u64,
    },

    /// Rename a device
    Rename {
        #[command(flatten)]
        home: HomeArg,

        #[arg(value_name = "DEVICE_ID")]
        id: u64,

        name: String,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Remove a device from its home
    #[command(alias = "rm")]
    Delete {
        #[command(flatten)]
        home: HomeArg,

        #[arg(value_name = "DEVICE_ID")]
        id: u64,
    },
}

// ── Key-value ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct KvArgs {
    #[command(subcommand)]
    pub command: KvCommand,
}

/// Owner of a key-value store: exactly one of `--device` / `--home`.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct OwnerArgs {
    /// Device ID
    #[arg(long)]
    pub device: Option<u64>,

    /// Home ID
    #[arg(long = "home", short = 'H')]
    pub home: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum KvCommand {
    /// List all keys of a store
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        owner: OwnerArgs,
    },

    /// Show one key
    Get {
        #[command(flatten)]
        owner: OwnerArgs,
        key: String,
    },

    /// Set a key to a JSON value (bare words are stored as strings)
    Set {
        #[command(flatten)]
        owner: OwnerArgs,
        key: String,
        value: String,
    },

    /// Delete a key
    #[command(alias = "rm")]
    Delete {
        #[command(flatten)]
        owner: OwnerArgs,
        key: String,
    },
}

// ── Entities ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EntitiesArgs {
    #[command(subcommand)]
    pub command: EntitiesCommand,
}

#[derive(Debug, Subcommand)]
pub enum EntitiesCommand {
    /// List smart-module entities in a home
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        home: HomeArg,

        /// Only entities of this class
        #[arg(long)]
        class: Option<String>,
    },

    /// Delete an entity
    #[command(alias = "rm")]
    Delete {
        #[command(flatten)]
        home: HomeArg,

        #[arg(value_name = "ENTITY_ID")]
        id: String,
    },
}

// ── Time series ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SeriesArgs {
    #[command(subcommand)]
    pub command: SeriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeriesCommand {
    /// List time series of a home (empty when the TSDB module is absent)
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        home: HomeArg,
    },

    /// Show one time series
    Get {
        #[command(flatten)]
        home: HomeArg,

        #[arg(value_name = "SERIES_ID")]
        id: String,
    },
}

// ── Alerts ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// List alerts of a home
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        home: HomeArg,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Dismiss an alert
    #[command(alias = "rm")]
    Delete {
        #[command(flatten)]
        home: HomeArg,

        #[arg(value_name = "ALERT_ID")]
        id: u64,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Display the resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },

    /// Store a bearer token for the active profile in the system keyring
    SetToken,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
