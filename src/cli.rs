// CLI definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mx5kbleds")]
#[command(author, version, about = "Eurocom MX5-R2 keyboard backlight control")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path (default: ~/.config/mx5kbleds/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Record opcodes in memory instead of calling firmware
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable firmware monitoring (prints every opcode and reply)
    #[arg(long, global = true)]
    pub monitor: bool,

    /// Show raw opcodes alongside decoded output
    #[arg(long, global = true)]
    pub hex: bool,

    /// Filter monitor output (all, color, brightness, mode)
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether the keyboard WMI interface is present
    Probe,

    /// List lighting modes
    #[command(visible_alias = "m")]
    Modes,

    /// Run an in-process attribute shell on stdin
    ///
    /// Lines: `<attr>` reads, `<attr> <value>` writes, `status`, `quit`.
    #[command(visible_alias = "sh")]
    Shell,

    /// Write the effective config to the config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Serve the attributes over D-Bus until Ctrl-C
    #[cfg(feature = "dbus")]
    #[command(visible_alias = "daemon")]
    Serve,

    /// Read an attribute from the running daemon
    #[cfg(feature = "dbus")]
    Get {
        /// Attribute (left, center, right, brightness, mode, modedesc)
        attr: String,
    },

    /// Write an attribute on the running daemon
    #[cfg(feature = "dbus")]
    Set {
        /// Attribute (left, center, right, brightness, mode, modedesc)
        attr: String,
        /// Value, e.g. "255 0 0" for colors or "wave" for modedesc
        #[arg(num_args = 1.., required = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },

    /// Show all attributes of the running daemon
    #[cfg(feature = "dbus")]
    #[command(visible_alias = "st")]
    Status,
}
