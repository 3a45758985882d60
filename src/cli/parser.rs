use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for kmlogger
/// CLI application to record mileage check-in/check-out entries
#[derive(Parser)]
#[command(
    name = "kmlogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mileage registration CLI: record check-in/check-out entries with photos and export them to JSON, Excel or PDF",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Set the trip metadata (cycle, employee, sector, branch)
    Meta {
        #[arg(long, value_name = "YYYY-MM", help = "Cycle covered by the form")]
        cycle: Option<String>,

        #[arg(long, value_name = "NAME", help = "Employee name")]
        employee: Option<String>,

        #[arg(long, help = "Sector: ADM, COBRANÇA, CPD, COMERCIAL")]
        sector: Option<String>,

        #[arg(long, help = "Branch: IMP, AÇA, MAR, SSL")]
        branch: Option<String>,
    },

    /// Append an entry (type alternates Entrada/Saída, date defaults to today)
    Add {
        #[arg(long, value_name = "YYYY-MM-DD", help = "Use this date instead of today")]
        date: Option<String>,

        #[arg(long, value_name = "FILE", help = "Attach a photo right away")]
        image: Option<String>,
    },

    /// Change the date, type or photo of an entry
    Edit {
        /// Entry id (see `list`)
        id: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,

        #[arg(long = "type", value_name = "TYPE", help = "Entrada or Saída")]
        kind: Option<String>,

        #[arg(long, value_name = "FILE", conflicts_with = "clear_image")]
        image: Option<String>,

        #[arg(
            long,
            value_name = "MEDIA_TYPE",
            requires = "image",
            help = "Declared media type of the photo (must be image/*)"
        )]
        mime: Option<String>,

        #[arg(long = "clear-image", help = "Remove the attached photo")]
        clear_image: bool,
    },

    /// Compress and attach photos to several entries at once
    Attach {
        /// One or more ID=FILE pairs
        #[arg(required = true, value_name = "ID=FILE")]
        items: Vec<String>,

        #[arg(
            long,
            value_name = "MEDIA_TYPE",
            help = "Declared media type of every photo (must be image/*)"
        )]
        mime: Option<String>,
    },

    /// Delete an entry by id
    Del {
        /// Entry id (see `list`)
        id: String,
    },

    /// List the form header and entries
    List {
        #[arg(long, short, help = "Group entries by date, as in the print view")]
        grouped: bool,
    },

    /// Remove every stored entry and reset the metadata
    Clear {
        #[arg(long, short, help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Save a JSON backup of the form
    Backup {
        #[arg(long, value_name = "FILE", help = "Default: <export_dir>/km-data-<epoch-ms>.json")]
        file: Option<String>,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Load a JSON backup, replacing the current form
    Restore {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Export the form as spreadsheet, PDF print view or JSON
    Export {
        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
