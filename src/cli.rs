use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "structmap")]
#[command(
    author,
    version,
    about = "Flatten struct definitions from DWARF debug info into ordered primitive field maps"
)]
#[command(
    long_about = "structmap searches the debug info of a set of binary modules for a named \
struct or union, and flattens its members into an ordered map of dotted field paths to \
primitive type prefixes, suitable for packing and unpacking raw memory buffers.\n\n\
Example:\n  structmap flatten stat statbuf /usr/lib/libc.so.6"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Flatten a named aggregate into an ordered field map
    Flatten {
        /// Name of the struct or union to flatten
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Binding name for the resulting map (the shell array name)
        #[arg(value_name = "NAME")]
        binding: String,

        /// Modules to search, in order
        #[arg(value_name = "MODULES")]
        modules: Vec<PathBuf>,

        /// Also search the modules loaded by a live process, in load order
        #[arg(long)]
        pid: Option<u32>,

        /// Output format (table, json, shell)
        #[arg(short, long, value_enum, default_value = "shell")]
        output: OutputFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Report each module as it is searched
        #[arg(short, long)]
        verbose: bool,
    },

    /// Report the declared byte size of a named aggregate
    Size {
        /// Name of the struct or union to size
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Modules to search, in order
        #[arg(value_name = "MODULES")]
        modules: Vec<PathBuf>,

        /// Also search the modules loaded by a live process, in load order
        #[arg(long)]
        pid: Option<u32>,

        /// Output format (plain, json)
        #[arg(short, long, value_enum, default_value = "plain")]
        output: SizeFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Report each module as it is searched
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Two-column field table
    Table,
    /// Versioned JSON document
    Json,
    /// Bash `declare -A` statement
    Shell,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SizeFormat {
    /// Just the byte count
    Plain,
    /// Versioned JSON document
    Json,
}
