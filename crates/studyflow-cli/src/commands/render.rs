//! Terminal rendering of results, overlays and chat messages.

use colored::{ColoredString, Colorize};
use studyflow_core::analysis::{Difficulty, ResultView, TopicDetailView};
use studyflow_core::chat::{ChatMessage, MessageRole};
use studyflow_core::view::{ShellSnapshot, Theme};

const BAR_WIDTH: usize = 30;

fn accent(text: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Dark => text.bright_cyan().bold(),
        Theme::Light => text.blue().bold(),
    }
}

fn muted(text: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Dark => text.bright_black(),
        Theme::Light => text.black(),
    }
}

fn badge(difficulty: Difficulty) -> ColoredString {
    let text = format!("[{}]", difficulty.badge());
    match difficulty {
        Difficulty::Easy => text.green(),
        Difficulty::Medium => text.yellow(),
        Difficulty::Hard => text.red(),
    }
}

pub fn print_result(view: &ResultView, theme: Theme) {
    println!("{}", accent("=== Mentor Summary ===", theme));
    for line in view.mentor_summary.lines() {
        println!("{line}");
    }
    println!();

    println!("{}", accent("=== Roadmap ===", theme));
    for entry in &view.roadmap {
        println!("{:>3}. {} {}", entry.position, entry.topic, badge(entry.difficulty));
    }
    println!();

    println!("{}", accent("=== Difficulty ===", theme));
    let total = view.histogram.total().max(1);
    for bucket in view.histogram.buckets() {
        let width = bucket.count * BAR_WIDTH / total;
        println!(
            "{:<7}{} {}",
            bucket.label(),
            "#".repeat(width),
            muted(&bucket.count.to_string(), theme)
        );
    }
    println!();

    println!("{}", accent("=== Schedule ===", theme));
    for card in &view.week_cards {
        println!("Week {}: {}", card.week, card.topics.join(", "));
    }
}

pub fn print_topic_detail(detail: &TopicDetailView, theme: Theme) {
    println!("{} {}", accent(&detail.topic, theme), badge(detail.difficulty));
    if !detail.advice.is_empty() {
        println!("{}", detail.advice);
    }
    if !detail.scheduled_weeks.is_empty() {
        let weeks: Vec<String> = detail.scheduled_weeks.iter().map(u32::to_string).collect();
        println!("{}", muted(&format!("Scheduled in week {}", weeks.join(", ")), theme));
    }
    if !detail.prerequisites.is_empty() {
        println!(
            "{}",
            muted(&format!("Builds on: {}", detail.prerequisites.join(", ")), theme)
        );
    }
    for resource in &detail.resources {
        println!("  - {} <{}>", resource.name, resource.url.underline());
    }
}

pub fn print_message(message: &ChatMessage, theme: Theme) {
    match message.role {
        MessageRole::User => println!("{}", format!("> {}", message.content).green()),
        MessageRole::Assistant => {
            for line in message.content.lines() {
                match theme {
                    Theme::Dark => println!("{}", line.bright_blue()),
                    Theme::Light => println!("{}", line.blue()),
                }
            }
        }
    }
}

pub fn print_status(snapshot: &ShellSnapshot) {
    let theme = snapshot.theme;
    let constraints = snapshot.constraints;
    println!("{} {}", muted("view:", theme), snapshot.view);
    println!(
        "{} {}",
        muted("document:", theme),
        snapshot.document_name.as_deref().unwrap_or("(none)")
    );
    println!(
        "{} {} weeks, {} h/day, {}",
        muted("constraints:", theme),
        constraints.weeks(),
        constraints.hours_per_day(),
        constraints.level()
    );
    println!("{} {}", muted("submit enabled:", theme), snapshot.submit_enabled);
    if let Some(topic) = &snapshot.selected_topic {
        println!("{} {}", muted("topic:", theme), topic);
    }
    if let Some(notice) = &snapshot.failure_notice {
        println!("{}", notice.red());
    }
}
