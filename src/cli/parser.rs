use clap::{Parser, Subcommand};

/// Command-line interface definition for rTimePrompt
#[derive(Parser)]
#[command(
    name = "rtimeprompt",
    version = env!("CARGO_PKG_VERSION"),
    about = "Prompts every half hour on business days and appends time tracking entries to a CSV log",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Override log file path (useful for tests or a custom CSV)
    #[arg(global = true, long = "log")]
    pub log: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Verbose diagnostics on stderr
    #[arg(global = true, short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the CSV log
    Init {
        /// Project name (repeat for several projects)
        #[arg(long = "project", value_name = "NAME")]
        projects: Vec<String>,
    },

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration for problems")]
        check: bool,

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

    /// Create a single time tracking entry
    Add {
        /// Project name (asked interactively when missing)
        #[arg(long = "project")]
        project: Option<String>,

        /// Date of the entry (YYYY-MM-DD, default today)
        #[arg(long = "date")]
        date: Option<String>,

        /// Start time (HH:MM)
        #[arg(long = "start")]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(long = "end")]
        end: Option<String>,
    },

    /// Start the scheduler and prompt at every checkpoint
    Run,

    /// Show how to import the CSV log into Google Calendar
    Instructions,
}
