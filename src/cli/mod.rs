pub mod output;
pub mod project;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use project::{
    process_preset_command, process_project_command, process_summary_command, ProjectCommand,
    RecordArgs,
};
use tracing::level_filters::LevelFilter;

use crate::{
    ledger::preset::Preset,
    utils::{
        dir::application_path,
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Daysplit", version, long_about = None)]
#[command(about = "Split your day into activities and see what they add up to", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        help = "Application directory. By default uses $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Show the activities of a starter preset")]
    Preset {
        #[arg(value_enum)]
        preset: Preset,
    },
    #[command(about = "Show average daily hours per activity of a saved plan")]
    Summary {
        #[command(flatten)]
        record: RecordArgs,
    },
    #[command(about = "Project the activities of a saved plan over a span of years")]
    Project {
        #[command(flatten)]
        command: ProjectCommand,
    },
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(
        CLI_PREFIX,
        &application_path(args.dir.as_deref())?,
        logging_level,
        args.log,
    )?;

    match args.commands {
        Commands::Preset { preset } => process_preset_command(preset),
        Commands::Summary { record } => process_summary_command(record),
        Commands::Project { command } => process_project_command(command),
    }
}
