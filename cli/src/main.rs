mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::{error, LevelFilter};
use plan_utils::setup_logging;

#[derive(Parser)]
#[command(name = "stackplan")]
#[command(version = env!("APP_VERSION"))]
#[command(about = "Show what a deployment would change, nested stacks included", long_about = None)]
struct Cli {
    /// Verbosity level, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the synthesized stacks with what is currently deployed
    Diff(DiffArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Stacks to diff, `*` matches any characters. All stacks when omitted
    pub stacks: Vec<String>,

    /// Cloud assembly directory containing manifest.json
    #[arg(long, env = "STACKPLAN_ASSEMBLY_DIR", default_value = "stack.out")]
    pub app: PathBuf,

    /// JSON or YAML snapshot of the deployed stacks
    #[arg(long, env = "STACKPLAN_DEPLOYED_STATE")]
    pub deployed_state: Option<PathBuf>,

    /// Exit with 1 if any stack has differences
    #[arg(long)]
    pub fail: bool,

    /// Only print stacks that have differences
    #[arg(short, long)]
    pub quiet: bool,

    /// Use change sets where the backend supports them
    #[arg(long)]
    pub change_set: bool,

    /// Only diff the requested stacks, not their dependencies
    #[arg(short, long)]
    pub exclusively: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    if let Err(e) = setup_logging(default_level) {
        eprintln!("Failed to set up logging: {}", e);
    }

    let result = match &cli.command {
        Commands::Diff(args) => commands::diff::handle_diff(args).await,
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
