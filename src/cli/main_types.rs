use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cms-cli")]
#[command(about = "Command line client for the tags, equations, concepts and problems backend")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true, env = "CMS_PROFILE")]
    pub profile: Option<String>,

    #[arg(long, global = true, env = "CMS_CONFIG_DIR")]
    pub config_dir: Option<String>,

    /// API key sent as x-api-key (falls back to CMS_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Retry read requests on network and 5xx failures
    #[arg(long, global = true)]
    pub retry: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the backend is up
    Health,
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Tag management
    Tag {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Equation management
    Equation {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Image management
    Image {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Concept management
    Concept {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Problem management
    Problem {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Problem variant management
    Variant {
        #[command(subcommand)]
        command: ResourceCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set a value on the active profile
    Set {
        /// One of protocol, host, port, version, timeout_seconds
        key: String,
        value: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ResourceCommands {
    /// Search records by free text
    Search {
        #[arg(default_value = "")]
        search: String,
    },
    /// Fetch one record
    Get { id: String },
    /// Create a record from JSON
    Create {
        /// JSON input, or @path to read it from a file
        #[arg(short, long)]
        data: String,

        /// Image file to upload (image create only)
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Update a record from JSON; the input carries the id
    Update {
        /// JSON input, or @path to read it from a file
        #[arg(short, long)]
        data: String,
    },
    /// Delete one record
    Delete { id: String },
}
