//! Interactive shell over the view orchestrator.
//!
//! Slash commands drive the view transitions; any other line is a question
//! for the open topic's chat session. Chat turns run in the background so
//! further questions can be typed (and queued) while one is pending.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use studyflow_application::{SubmitOutcome, ViewOrchestrator};
use studyflow_core::upload::{Document, Level};
use studyflow_core::view::View;
use studyflow_interaction::ClientConfig;

use super::{build_orchestrator, render};

const COMMANDS: &[(&str, &str)] = &[
    ("/start", "go from the landing page to the upload form"),
    ("/upload", "<path> select a PDF or plain-text syllabus"),
    ("/weeks", "<n> number of weeks to plan for"),
    ("/hours", "<h> study hours per day"),
    ("/level", "<Beginner|Intermediate|Advanced>"),
    ("/analyze", "submit the document"),
    ("/topic", "<name> open a topic and its chat"),
    ("/close", "close the topic overlay"),
    ("/reset", "discard the result and upload again"),
    ("/home", "back to the landing page"),
    ("/theme", "toggle light/dark"),
    ("/status", "show the current state"),
    ("/help", "list commands"),
    ("/quit", "exit"),
];

/// Completion and hints for slash commands.
#[derive(Clone)]
struct ShellHelper {
    commands: Vec<&'static str>,
}

impl ShellHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|(name, _)| *name).collect(),
        }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ShellHelper {}

/// Runs the REPL until `/quit` or EOF.
pub async fn run(config: &ClientConfig) -> Result<()> {
    let orchestrator = Arc::new(build_orchestrator(config)?);

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ShellHelper::new()));

    println!("{}", "=== StudyFlow ===".bright_magenta().bold());
    println!(
        "{}",
        "Turn a syllabus into a roadmap. Type /start to begin or /help for commands."
            .bright_black()
    );
    println!();

    loop {
        let prompt = format!("{}> ", orchestrator.view().await.as_str().to_lowercase());
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if trimmed == "/quit" || trimmed == "/exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if let Some(command) = trimmed.strip_prefix('/') {
                    let (name, arg) = match command.split_once(' ') {
                        Some((name, arg)) => (name, arg.trim()),
                        None => (command, ""),
                    };
                    if let Err(e) = dispatch(&orchestrator, name, arg).await {
                        eprintln!("{}", format!("Error: {e}").red());
                    }
                } else {
                    spawn_chat_turn(&orchestrator, trimmed.to_string()).await;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}

async fn dispatch(orchestrator: &ViewOrchestrator, name: &str, arg: &str) -> Result<()> {
    match name {
        "help" => print_help(),
        "start" => orchestrator.get_started().await?,
        "upload" => upload(orchestrator, arg).await?,
        "weeks" => {
            let accepted = match arg.parse::<u32>() {
                Ok(weeks) => orchestrator.set_weeks(weeks).await,
                Err(_) => false,
            };
            report_constraint(orchestrator, accepted, "weeks").await;
        }
        "hours" => {
            let accepted = match arg.parse::<f64>() {
                Ok(hours) => orchestrator.set_hours_per_day(hours).await,
                Err(_) => false,
            };
            report_constraint(orchestrator, accepted, "hours").await;
        }
        "level" => {
            let level: Level = arg.parse().map_err(anyhow::Error::msg)?;
            let accepted = orchestrator.set_level(level).await;
            report_constraint(orchestrator, accepted, "level").await;
        }
        "analyze" => analyze(orchestrator).await,
        "topic" => {
            orchestrator.select_topic(arg).await?;
            let theme = orchestrator.theme().await;
            if let Some(detail) = orchestrator.topic_detail().await {
                render::print_topic_detail(&detail, theme);
            }
            if let Some(session) = orchestrator.chat_session().await {
                for message in session.messages() {
                    render::print_message(&message, theme);
                }
            }
        }
        "close" => orchestrator.close_topic().await,
        "reset" => orchestrator.reset().await?,
        "home" => orchestrator.back_to_home().await,
        "theme" => {
            let theme = orchestrator.toggle_theme().await;
            println!("{}", format!("Theme: {theme:?}").bright_black());
        }
        "status" => {
            render::print_status(&orchestrator.snapshot().await);
            println!("{} {}", "analysis:".bright_black(), orchestrator.analysis_status());
        }
        other => println!("{}", format!("Unknown command: /{other}").bright_black()),
    }
    Ok(())
}

async fn upload(orchestrator: &ViewOrchestrator, path: &str) -> Result<()> {
    if path.is_empty() {
        anyhow::bail!("Usage: /upload <path>");
    }
    let document = Document::from_path(path).await?;
    let name = document.file_name().to_string();
    if orchestrator.select_document(document).await {
        println!("{}", format!("Selected {name}").green());
    } else if orchestrator.view().await != View::Configuring {
        println!("{}", "Type /start before uploading.".bright_black());
    } else {
        println!(
            "{}",
            format!("{name} is not a PDF or plain-text file, ignored.").yellow()
        );
    }
    Ok(())
}

async fn report_constraint(orchestrator: &ViewOrchestrator, accepted: bool, field: &str) {
    if accepted {
        render::print_status(&orchestrator.snapshot().await);
    } else {
        println!("{}", format!("Ignored {field} change.").yellow());
    }
}

async fn analyze(orchestrator: &ViewOrchestrator) {
    println!("{}", "Analyzing your syllabus...".bright_black());
    match orchestrator.submit().await {
        SubmitOutcome::Succeeded => {
            let theme = orchestrator.theme().await;
            if let Some(view) = orchestrator.result_view().await {
                render::print_result(&view, theme);
            }
            println!();
            println!("{}", "Type /topic <name> to dig into a topic.".bright_black());
        }
        SubmitOutcome::Failed(err) => {
            tracing::debug!("Analysis failed: {:?}", err);
            println!("{}", err.notice().red());
        }
        SubmitOutcome::Ignored => {
            println!(
                "{}",
                "Nothing to submit. Select a document with /upload first.".bright_black()
            );
        }
        SubmitOutcome::Discarded => {}
    }
}

/// Sends `text` in the background and prints the reply when it lands.
async fn spawn_chat_turn(orchestrator: &Arc<ViewOrchestrator>, text: String) {
    let Some(session) = orchestrator.chat_session().await else {
        println!("{}", "Open a topic with /topic <name> to ask questions.".bright_black());
        return;
    };
    let theme = orchestrator.theme().await;

    tokio::spawn(async move {
        let outcome = session.send(&text).await;
        if let Some(reply) = outcome.reply() {
            render::print_message(reply, theme);
        }
    });
}

fn print_help() {
    for (name, description) in COMMANDS {
        println!("  {:<10} {}", name.bright_cyan(), description.bright_black());
    }
    println!(
        "  {:<10} {}",
        "<text>".bright_cyan(),
        "ask the open topic's assistant".bright_black()
    );
}
