pub mod toml_config;

pub use toml_config::BookingConfig;

#[cfg(feature = "cli")]
use crate::core::catalog::ListingFilter;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "formation-booking")]
#[command(about = "Seminar catalog, pricing and checkout for GLI formations")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List seminars, optionally filtered
    List {
        /// Case-insensitive destination search
        #[arg(long, default_value = "")]
        search: String,

        /// all, popular or featured
        #[arg(long, default_value = "all")]
        filter: ListingFilter,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one seminar with its running total
    Show {
        #[arg(long)]
        id: u32,

        #[arg(long, default_value = "1")]
        participants: u32,

        #[arg(long)]
        locale: Option<String>,
    },

    /// Price a booking
    Quote {
        #[arg(long)]
        id: u32,

        /// Raw navigation value; unparsable input counts as 1
        #[arg(long)]
        participants: Option<String>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate a filled checkout form and submit it
    Checkout {
        #[arg(long)]
        id: u32,

        /// TOML file with the primary contact, participants and terms flag
        #[arg(long)]
        form: String,

        /// Defaults to the number of participants in the form file
        #[arg(long)]
        participants: Option<String>,

        #[arg(long)]
        locale: Option<String>,
    },

    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,
    },
}
