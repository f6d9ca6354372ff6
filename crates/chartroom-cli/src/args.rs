//! Command-line argument definitions for the Chartroom CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Without a subcommand the CLI behaves like `open`.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Chartroom diagram host
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Diagram to open when no subcommand is given
    #[arg(value_name = "DIAGRAM_ID")]
    pub id: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Folder holding the stored diagrams
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Path to the bootstrap schema document
    #[arg(long, global = true)]
    pub bootstrap: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a diagram, or let Chartroom decide which one
    Open {
        #[arg(value_name = "DIAGRAM_ID")]
        id: Option<String>,
    },
    /// List stored diagrams, most recently updated first
    List,
    /// Import a diagram from a JSON document
    Import {
        #[arg(value_name = "FILE")]
        file: String,
    },
}

impl Args {
    /// The command to run, `open` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_else(|| Command::Open {
            id: self.id.clone(),
        })
    }
}
