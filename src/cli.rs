use crate::core::ToolKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ToolArg {
    /// Security-issue scan
    Bandit,
    /// Complexity and maintainability metrics
    Radon,
}

impl From<ToolArg> for ToolKind {
    fn from(tool: ToolArg) -> Self {
        match tool {
            ToolArg::Bandit => ToolKind::Bandit,
            ToolArg::Radon => ToolKind::Radon,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "debtcleaner")]
#[command(about = "Security and complexity analysis service for Python code", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (defaults to ./debtcleaner.toml when present)
    #[arg(short, long, global = true, env = "DEBTCLEANER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to bind (overrides settings)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides settings)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Analyze a path once and print the normalized JSON
    Analyze {
        /// File or directory to analyze
        path: PathBuf,

        /// Tool to run; repeat for several (defaults to all)
        #[arg(short, long = "tool", value_enum)]
        tools: Vec<ToolArg>,

        /// Configuration file forwarded to bandit
        #[arg(long)]
        bandit_config: Option<PathBuf>,

        /// Do not run bandit in debug mode
        #[arg(long)]
        no_debug: bool,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the installed tool versions
    Versions,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
