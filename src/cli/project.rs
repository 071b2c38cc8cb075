use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing::info;

use crate::{
    ledger::{color::ColorAssigner, preset::Preset},
    record::{Plan, PlanRecord},
    summary::projection::project_ages,
    utils::{
        clock::{Clock, DefaultClock},
        time::days_in_current_month,
    },
};

use super::{
    output::{ledger_lines, projection_lines, summary_lines},
    Args,
};

#[derive(Debug, Clone, clap::Args)]
pub struct RecordArgs {
    #[arg(long, short, help = "Path to a saved plan in json format")]
    record: PathBuf,
}

#[derive(Debug, clap::Args)]
pub struct ProjectCommand {
    #[command(flatten)]
    record: RecordArgs,
    #[arg(long, short = 's', allow_hyphen_values = true, help = "Age to start counting from")]
    age_start: i64,
    #[arg(long, short = 'e', allow_hyphen_values = true, help = "Age to stop counting at")]
    age_end: i64,
}

pub fn process_preset_command(preset: Preset) -> Result<()> {
    let ledger = preset.ledger(ColorAssigner::random());
    print_lines(ledger_lines(&ledger, true));
    Ok(())
}

pub fn process_summary_command(RecordArgs { record }: RecordArgs) -> Result<()> {
    let plan = load_plan(&record)?;
    print_lines(summary_lines(&plan.summary(), true));
    Ok(())
}

/// Command to process `project` command. Shows how many hours each activity of a plan takes from
/// `age_start` until `age_end`.
pub fn process_project_command(command: ProjectCommand) -> Result<()> {
    let plan = load_plan(&command.record.record)?;
    let lines = project_lines(&plan, command.age_start, command.age_end, &DefaultClock)?;
    print_lines(lines);
    Ok(())
}

fn project_lines(
    plan: &Plan,
    age_start: i64,
    age_end: i64,
    clock: &impl Clock,
) -> Result<Vec<String>> {
    let rows = project_ages(
        &plan.summary(),
        age_start,
        age_end,
        days_in_current_month(clock),
    )
    .map_err(|e| {
        Args::command().error(
            clap::error::ErrorKind::ValueValidation,
            format!("{e} Ages {age_start} to {age_end} don't make a lifespan"),
        )
    })?;
    Ok(projection_lines(&rows, true))
}

fn load_plan(path: &Path) -> Result<Plan> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan {}", path.display()))?;
    let plan = PlanRecord::from_json(&content)?.into_plan(ColorAssigner::random())?;
    info!(
        "Loaded {} plan with {} periods from {path:?}",
        plan.time_unit(),
        plan.period_count()
    );
    Ok(plan)
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
