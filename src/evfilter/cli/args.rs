use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "evfilter", version)]
#[command(about = "Browse and filter an electric-vehicle catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding saved filters and evfilter.toml (overrides EVFILTER_DATA)
    #[arg(long, global = true, value_name = "DIR")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or change the saved filters
    #[command(alias = "f")]
    Filters {
        #[command(subcommand)]
        action: Option<FilterCommands>,
    },

    /// List cars matching the saved filters
    #[command(alias = "ls")]
    Browse {
        /// Free-text search sent to the catalog
        #[arg(short, long)]
        search: Option<String>,

        /// Ordering: price, -price, year, -year (or newest)
        #[arg(short, long)]
        ordering: Option<String>,

        /// Only fetch featured cars
        #[arg(long)]
        featured: bool,
    },

    /// Show price ranges and the slider position
    Prices {
        /// Apply the price range with this number
        #[arg(long, value_name = "N")]
        select: Option<usize>,
    },

    /// List exterior and interior colors
    Colors,

    /// List manufacturers
    Manufacturers,

    /// List upcoming events
    Events,

    /// List news articles
    News,

    /// Book a service appointment
    Book(BookArgs),
}

#[derive(Subcommand, Debug)]
pub enum FilterCommands {
    /// Print the active filters
    Show,

    /// Set one filter (e.g. `set min-year 2022`)
    Set {
        /// Filter key (manufacturer, model, min-year, max-year, min-price, max-price,
        /// category, featured, exterior-colors, interior-colors)
        key: String,

        /// New value; an empty string clears the key
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Remove one filter
    #[command(alias = "rm")]
    Unset { key: String },

    /// Remove every filter
    Clear,

    /// Select or deselect a color by name or id
    ToggleColor {
        /// exterior or interior
        kind: String,

        /// Color name (e.g. "Pearl White") or numeric id
        name: String,
    },

    /// Deselect all colors
    ResetColors,

    /// Set both price bounds at once
    Price { min: String, max: String },
}

#[derive(clap::Args, Debug)]
pub struct BookArgs {
    /// Car model
    #[arg(long)]
    pub model: Option<String>,

    /// Model year
    #[arg(long)]
    pub year: Option<String>,

    /// Service type (maintenance, battery-check, tire-service, software-update, repair)
    #[arg(long)]
    pub service: Option<String>,

    /// Preferred date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,

    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Print the request instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}
