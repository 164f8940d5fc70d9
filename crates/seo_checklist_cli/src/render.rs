//! Terminal rendering helpers.

use colored::{ColoredString, Colorize};
use seo_checklist_core::{Catalog, ImportanceTier, Project, StoreSnapshot, ViewState};

const PROGRESS_BAR_WIDTH: usize = 20;

pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "::".blue().bold(), message);
}

/// Printed on every unchecked -> checked transition.
pub fn celebrate(item_id: &str) {
    println!("{} {}", "✔ checked".green().bold(), item_id.green());
}

pub fn print_projects(snapshot: &StoreSnapshot<'_>) {
    println!("\n{}", format!(" Projects ({}) ", snapshot.projects.len()).bold().white().on_blue());
    if snapshot.projects.is_empty() {
        println!("  no project yet, create one with `new <name>`");
        return;
    }

    let active_id = snapshot.active.map(|project| &project.id);
    for (index, project) in snapshot.projects.iter().enumerate() {
        let marker = if Some(&project.id) == active_id { ">" } else { " " };
        println!(
            "{marker} {:>2}. {:<28} {} {:>3}%",
            index + 1,
            project.name,
            progress_bar(project.progress),
            project.progress
        );
    }
}

pub fn print_checklist(project: &Project, catalog: &Catalog, view: &ViewState) {
    println!("\n{}", format!(" {} ", project.name).bold().white().on_blue());
    println!(
        "  created {}  |  {}% complete  |  notes {}",
        project.created_at.format("%Y-%m-%d"),
        project.progress,
        if view.show_notes() { "shown" } else { "hidden" }
    );

    for (index, section) in catalog.sections().iter().enumerate() {
        let expanded = view.is_expanded(&section.name);
        let chevron = if expanded { "▼" } else { "▶" };
        println!("\n[{}] {chevron} {}", index + 1, section.name.bold());
        if !expanded {
            continue;
        }

        for item in &section.items {
            let checked = project.is_checked(&item.id);
            let checkbox = if checked { "[x]".green() } else { "[ ]".normal() };
            let text = if checked {
                item.text.dimmed()
            } else {
                item.text.normal()
            };
            println!(
                "  {checkbox} {:<7} {text} {}",
                item.id,
                importance_badge(item.importance)
            );
            if let Some(note) = view.visible_note(item) {
                println!("              {}", note.italic().dimmed());
            }
        }
    }
}

fn importance_badge(importance: u8) -> ColoredString {
    let badge = format!("{importance}/10");
    match ImportanceTier::from_score(importance) {
        ImportanceTier::High => badge.red().bold(),
        ImportanceTier::Medium => badge.yellow(),
        ImportanceTier::Low => badge.cyan(),
    }
}

fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) * PROGRESS_BAR_WIDTH / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled).green(),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}
