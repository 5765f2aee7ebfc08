//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::PersonId;

/// Family tree manager: people, parent/child and spouse relationships, JSON persistence
#[derive(Parser, Debug)]
#[command(name = "kintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug output (-d, -dd, -ddd for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Data file (overrides config and KINTREE_DATA_FILE)
    #[arg(short, long, global = true, env = "KINTREE_DATA_FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a person
    Add {
        /// Full name
        name: String,
        /// Birth year (1500-2100)
        #[arg(long)]
        birth_year: Option<i32>,
        /// Death year (1500-2100)
        #[arg(long)]
        death_year: Option<i32>,
        /// Gender: M, F or Other
        #[arg(short, long)]
        gender: Option<String>,
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<String>,
        /// Death date (YYYY-MM-DD)
        #[arg(long)]
        death_date: Option<String>,
        /// City of birth
        #[arg(long)]
        birth_city: Option<String>,
    },

    /// Update a person's fields (empty string clears date/gender/city)
    Update {
        /// Person ID
        id: PersonId,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// Birth year (1500-2100)
        #[arg(long)]
        birth_year: Option<i32>,
        /// Death year (1500-2100)
        #[arg(long)]
        death_year: Option<i32>,
        /// Gender: M, F or Other
        #[arg(short, long)]
        gender: Option<String>,
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<String>,
        /// Death date (YYYY-MM-DD)
        #[arg(long)]
        death_date: Option<String>,
        /// City of birth
        #[arg(long)]
        birth_city: Option<String>,
    },

    /// Remove a person and scrub their relationships
    Remove {
        /// Person ID
        id: PersonId,
    },

    /// Link parent and child
    Link {
        /// Parent ID
        parent_id: PersonId,
        /// Child ID
        child_id: PersonId,
    },

    /// Link two people as spouses
    Marry {
        /// First person ID
        person1_id: PersonId,
        /// Second person ID
        person2_id: PersonId,
    },

    /// List all people sorted by name
    List,

    /// Show a person with all relationships
    Show {
        /// Person ID
        id: PersonId,
    },

    /// Find people by name (case-insensitive substring)
    Find {
        /// Search string
        query: String,
    },

    /// Show descendant tree
    Tree {
        /// Root person ID (default: all people without parents)
        root: Option<PersonId>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init,
}
