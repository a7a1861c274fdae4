use anyhow::{Context, Result, bail};
use colored::Colorize;
use std::path::Path;
use studyflow_application::SubmitOutcome;
use studyflow_core::upload::{Document, Level};
use studyflow_interaction::ClientConfig;

use super::{build_orchestrator, render};

/// One-shot analysis: upload `file` with the given constraints and print the plan.
pub async fn run(
    config: &ClientConfig,
    file: &Path,
    weeks: u32,
    hours: f64,
    level: Level,
) -> Result<()> {
    let document = Document::from_path(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    // Surface the rejection reason; the stage itself rejects silently
    document.validate()?;

    let orchestrator = build_orchestrator(config)?;
    orchestrator.get_started().await?;
    orchestrator.select_document(document).await;
    if !orchestrator.set_weeks(weeks).await {
        bail!("Invalid number of weeks: {weeks}");
    }
    if !orchestrator.set_hours_per_day(hours).await {
        bail!("Invalid hours per day: {hours}");
    }
    orchestrator.set_level(level).await;

    eprintln!("{}", format!("Analyzing {}...", file.display()).bright_black());
    match orchestrator.submit().await {
        SubmitOutcome::Succeeded => {
            let theme = orchestrator.theme().await;
            if let Some(view) = orchestrator.result_view().await {
                render::print_result(&view, theme);
            }
            Ok(())
        }
        SubmitOutcome::Failed(err) => {
            eprintln!("{}", err.notice().red());
            Err(err.into())
        }
        SubmitOutcome::Ignored | SubmitOutcome::Discarded => {
            bail!("Analysis was not submitted")
        }
    }
}
