//! Line-oriented command loop.
//!
//! One line is one user interaction; each is applied to the store before the
//! next line is read.

use crate::render;
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use log::warn;
use seo_checklist_core::{KvStore, ProjectId, ProjectStore, ViewState};
use std::io::{self, BufRead, Write};

#[derive(Debug, Parser)]
#[command(no_binary_name = true, name = "seo", disable_version_flag = true)]
struct ReplLine {
    #[command(subcommand)]
    command: ReplCommand,
}

#[derive(Debug, Subcommand)]
enum ReplCommand {
    /// Create a project and make it active.
    ///
    /// The name is taken from the raw line, so its spacing survives.
    New {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        name: Vec<String>,
    },
    /// List projects with their progress.
    #[command(alias = "ls")]
    List,
    /// Activate a project by list number or id.
    Select { target: String },
    /// Delete a project by list number or id.
    #[command(alias = "rm")]
    Delete {
        target: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Check or uncheck an item in the active project.
    #[command(alias = "toggle")]
    Check { item_id: String },
    /// Show the active project's checklist.
    Show,
    /// Show or hide item notes.
    Notes,
    /// Collapse or expand a section by number.
    Fold { section: usize },
    /// Leave the program.
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

pub fn run<S: KvStore>(
    store: &mut ProjectStore<'_, S>,
    view: &mut ViewState,
) -> Result<(), String> {
    render::print_projects(&store.snapshot());
    if let Some(project) = store.active_project() {
        render::print_checklist(project, store.catalog(), view);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\nseo> ");
        io::stdout()
            .flush()
            .map_err(|err| format!("failed to flush stdout: {err}"))?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.map_err(|err| format!("failed to read input: {err}"))?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        match ReplLine::try_parse_from(words) {
            Ok(parsed) => {
                if let Flow::Quit = apply(parsed.command, &line, store, view) {
                    return Ok(());
                }
            }
            Err(err) => {
                if let Err(io_err) = err.print() {
                    warn!("event=repl_parse module=cli status=error error={io_err}");
                }
            }
        }
    }
}

fn apply<S: KvStore>(
    command: ReplCommand,
    line: &str,
    store: &mut ProjectStore<'_, S>,
    view: &mut ViewState,
) -> Flow {
    match command {
        ReplCommand::New { .. } => {
            let name = rest_after_keyword(line);
            match store.create_project(name) {
                Some(project) => {
                    render::print_info(&format!("created `{}`", project.name));
                    render::print_checklist(&project, store.catalog(), view);
                }
                None => render::print_error("project name cannot be empty"),
            }
        }
        ReplCommand::List => render::print_projects(&store.snapshot()),
        ReplCommand::Select { target } => match resolve_target(store, &target) {
            Some(id) => {
                store.select_project(&id);
                show_active(store, view);
            }
            None => render::print_error(&format!("no project matches `{target}`")),
        },
        ReplCommand::Delete { target, yes } => match resolve_target(store, &target) {
            Some(id) => {
                let name = store
                    .project(&id)
                    .map(|project| project.name.clone())
                    .unwrap_or_default();
                if yes || confirm_delete(&name) {
                    store.delete_project(&id);
                    render::print_info(&format!("deleted `{name}`"));
                    render::print_projects(&store.snapshot());
                }
            }
            None => render::print_error(&format!("no project matches `{target}`")),
        },
        ReplCommand::Check { item_id } => {
            if store.active_project().is_none() {
                render::print_error("no active project; create or select one first");
            } else if !store.catalog().contains_item(&item_id) {
                render::print_error(&format!("unknown checklist item `{item_id}`"));
            } else if let Some(project) = store.toggle_active(&item_id) {
                render::print_info(&format!("{}: {}% complete", project.name, project.progress));
            }
        }
        ReplCommand::Show => show_active(store, view),
        ReplCommand::Notes => {
            let shown = view.toggle_notes();
            render::print_info(if shown { "notes shown" } else { "notes hidden" });
        }
        ReplCommand::Fold { section } => {
            let name = section
                .checked_sub(1)
                .and_then(|index| store.catalog().sections().get(index))
                .map(|section| section.name.clone());
            match name {
                Some(name) => {
                    view.toggle_section(&name);
                    show_active(store, view);
                }
                None => render::print_error(&format!("no section number {section}")),
            }
        }
        ReplCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Text after the leading keyword. Inner and trailing spacing is kept.
fn rest_after_keyword(line: &str) -> &str {
    let line = line.trim_start();
    line.find(char::is_whitespace)
        .map_or("", |end| line[end..].trim_start())
}

fn show_active<S: KvStore>(store: &ProjectStore<'_, S>, view: &ViewState) {
    match store.active_project() {
        Some(project) => render::print_checklist(project, store.catalog(), view),
        None => render::print_info("select a project or create a new one"),
    }
}

/// Resolves a 1-based list number or a literal project id.
fn resolve_target<S: KvStore>(store: &ProjectStore<'_, S>, target: &str) -> Option<ProjectId> {
    let projects = store.projects();
    if let Ok(number) = target.parse::<usize>() {
        if let Some(project) = number.checked_sub(1).and_then(|index| projects.get(index)) {
            return Some(project.id.clone());
        }
    }
    let id = ProjectId::from(target);
    store.project(&id).map(|project| project.id.clone())
}

fn confirm_delete(name: &str) -> bool {
    Confirm::new()
        .with_prompt(format!("Delete project `{name}`?"))
        .default(false)
        .interact()
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{apply, rest_after_keyword, resolve_target, ReplCommand, ReplLine};
    use clap::Parser;
    use seo_checklist_core::db::open_db_in_memory;
    use seo_checklist_core::{shipped_catalog, ProjectSlot, ProjectStore, SqliteKvStore, ViewState};

    fn parse(line: &str) -> ReplCommand {
        ReplLine::try_parse_from(line.split_whitespace())
            .expect("line should parse")
            .command
    }

    #[test]
    fn rest_after_keyword_keeps_inner_and_trailing_spacing() {
        assert_eq!(rest_after_keyword("  new   Site   A "), "Site   A ");
        assert_eq!(rest_after_keyword("new Site A - blog"), "Site A - blog");
        assert_eq!(rest_after_keyword("new"), "");
    }

    #[test]
    fn new_stores_the_name_as_typed() {
        let conn = open_db_in_memory().unwrap();
        let catalog = shipped_catalog();
        let mut store = ProjectStore::open(catalog, ProjectSlot::new(SqliteKvStore::new(&conn)));
        let mut view = ViewState::new(catalog);

        let line = "new   Site   A - blog ";
        assert!(matches!(parse(line), ReplCommand::New { .. }));
        apply(parse(line), line, &mut store, &mut view);

        let names: Vec<_> = store.projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Site   A - blog "]);
    }

    #[test]
    fn aliases_and_flags_parse() {
        assert!(matches!(parse("rm 2 --yes"), ReplCommand::Delete { yes: true, .. }));
        assert!(matches!(parse("toggle pla-1"), ReplCommand::Check { .. }));
        assert!(matches!(parse("exit"), ReplCommand::Quit));
        assert!(ReplLine::try_parse_from(["new"]).is_err());
    }

    #[test]
    fn targets_resolve_by_number_or_id() {
        let conn = open_db_in_memory().unwrap();
        let mut store =
            ProjectStore::open(shipped_catalog(), ProjectSlot::new(SqliteKvStore::new(&conn)));
        let first = store.create_project("A").unwrap();
        let second = store.create_project("B").unwrap();

        assert_eq!(resolve_target(&store, "1"), Some(first.id.clone()));
        assert_eq!(resolve_target(&store, second.id.as_str()), Some(second.id));
        assert_eq!(resolve_target(&store, "3"), None);
        assert_eq!(resolve_target(&store, "0"), None);
    }
}
