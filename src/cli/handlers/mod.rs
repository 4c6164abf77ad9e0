use std::error::Error;
use std::io::Write;

use crate::app::{AppState, AssumeYes, Change, Confirm, Deletion, Snapshot};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::state::{read_session, write_session};
use crate::io::store::FileStore;
use crate::model::config::Config;
use crate::ops::BoardError;
use crate::ops::report::summarize;
use crate::ops::task_ops::{self, BoardColumns};

type CmdResult = Result<(), Box<dyn Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let config = config_io::read_config()?;
    let data_dir = config_io::data_dir(cli.data_dir.as_deref(), &config);
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");

    let session = read_session(&data_dir).unwrap_or_default();
    let mut app = AppState::restore(FileStore::new(&data_dir), &session);
    if app.is_degraded() {
        eprintln!("warning: storage unavailable, changes will not be saved");
    }
    app.subscribe(|change: &Change, _: &Snapshot<'_>| {
        if let Change::StorageUnavailable(msg) = change {
            eprintln!("warning: {} (changes will not be saved)", msg);
        }
    });

    let result = match cli.command {
        Commands::Login(args) => cmd_login(&mut app, args, json),
        Commands::Logout => cmd_logout(&mut app, json),
        Commands::Whoami => cmd_whoami(&app, json),
        Commands::Projects => cmd_projects(&app, json),
        Commands::Project(cmd) => match cmd.action {
            ProjectAction::Add(args) => cmd_project_add(&mut app, args, json),
            ProjectAction::Rm(args) => cmd_project_rm(&mut app, args, &config),
            ProjectAction::Show(args) => cmd_project_show(&app, args, json),
        },
        Commands::Open(args) => cmd_open(&mut app, args, json),
        Commands::View(args) => cmd_view(&mut app, args),
        Commands::Board => cmd_board(&app, json),
        Commands::Task(cmd) => match cmd.action {
            TaskAction::Add(args) => cmd_task_add(&mut app, args, json),
            TaskAction::Rm(args) => cmd_task_rm(&mut app, args),
            TaskAction::Mv(args) => cmd_task_mv(&mut app, args),
            TaskAction::Arrange(args) => cmd_task_arrange(&mut app, args, json),
        },
        Commands::Report(args) => cmd_report(&app, args, json),
    };

    // Pointers change even when a command fails (e.g. a rejected view switch)
    let current = app.session();
    if current != session
        && let Err(e) = write_session(&data_dir, &current)
    {
        tracing::warn!(error = %e, "could not save session state");
    }

    result
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

type App = AppState<FileStore>;

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Expand a task ID prefix against the open project.
fn resolve_task_id(app: &App, prefix: &str) -> Result<String, Box<dyn Error>> {
    let name = app.active_project().ok_or(BoardError::NoActiveProject)?;
    let project = app.get_project(name)?;
    match task_ops::match_task_ids(project, prefix).as_slice() {
        [] => Err(BoardError::NotFound {
            kind: "task",
            key: prefix.to_string(),
        }
        .into()),
        [id] => Ok(id.to_string()),
        many => Err(format!(
            "ambiguous task id '{}' matches {} tasks",
            prefix,
            many.len()
        )
        .into()),
    }
}

/// Asks on stderr, reads the answer from stdin
struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{} [y/n] ", prompt);
        let _ = std::io::stderr().flush();
        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn show_board(app: &App, json: bool) -> CmdResult {
    let name = app.active_project().ok_or(BoardError::NoActiveProject)?;
    let project = app.get_project(name)?;
    if json {
        print_json(&board_to_json(name, project, app.active_counts()))
    } else {
        print_lines(&format_board(name, project, app.active_counts()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

fn cmd_login(app: &mut App, args: LoginArgs, json: bool) -> CmdResult {
    app.sign_in(&args.user)?;
    if json {
        return cmd_whoami(app, true);
    }
    println!(
        "signed in as {} ({} projects)",
        app.user().unwrap_or_default(),
        app.projects().len()
    );
    Ok(())
}

fn cmd_logout(app: &mut App, json: bool) -> CmdResult {
    app.sign_out();
    if json {
        return cmd_whoami(app, true);
    }
    println!("signed out");
    Ok(())
}

fn cmd_whoami(app: &App, json: bool) -> CmdResult {
    if json {
        return print_json(&SessionJson {
            user: app.user(),
            view: app.view(),
            active_project: app.active_project(),
            degraded: app.is_degraded(),
        });
    }
    println!("user: {}", app.user().unwrap_or("(shared)"));
    println!("view: {}", app.view());
    println!("project: {}", app.active_project().unwrap_or("(none)"));
    Ok(())
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

fn cmd_projects(app: &App, json: bool) -> CmdResult {
    let report = app.report();
    if json {
        return print_json(&report.projects);
    }
    if report.projects.is_empty() {
        println!("no projects yet (try `tb project add <name>`)");
        return Ok(());
    }
    for summary in &report.projects {
        let active = app.active_project() == Some(summary.name.as_str());
        println!("{}", format_project_line(summary, active));
    }
    Ok(())
}

fn cmd_project_add(app: &mut App, args: ProjectAddArgs, json: bool) -> CmdResult {
    let name = app.create_project(&args.name, args.deadline.as_deref())?;
    if json {
        return print_json(&summarize(&name, app.get_project(&name)?));
    }
    println!("created project {}", name);
    Ok(())
}

fn cmd_project_rm(app: &mut App, args: ProjectRmArgs, config: &Config) -> CmdResult {
    let outcome = if args.yes || !config.ui.confirm_delete {
        app.delete_project(&args.name, &mut AssumeYes)?
    } else {
        app.delete_project(&args.name, &mut PromptConfirm)?
    };
    match outcome {
        Deletion::Deleted => println!("deleted project {}", args.name),
        Deletion::Cancelled => println!("cancelled"),
    }
    Ok(())
}

fn cmd_project_show(app: &App, args: ProjectNameArg, json: bool) -> CmdResult {
    let project = app.get_project(&args.name)?;
    if json {
        return print_json(&ProjectDetailJson {
            summary: summarize(&args.name, project),
            tasks: &project.tasks,
        });
    }
    let counts = summarize(&args.name, project).counts;
    print_lines(&format_board(&args.name, project, counts));
    Ok(())
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

fn cmd_open(app: &mut App, args: OpenArgs, json: bool) -> CmdResult {
    app.open_project(&args.name)?;
    show_board(app, json)
}

fn cmd_view(app: &mut App, args: ViewArgs) -> CmdResult {
    let view = app.navigate(args.view)?;
    println!("{}", view.title());
    Ok(())
}

fn cmd_board(app: &App, json: bool) -> CmdResult {
    show_board(app, json)
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

fn cmd_task_add(app: &mut App, args: TaskAddArgs, json: bool) -> CmdResult {
    let id = app.add_task(&args.name, &args.desc)?;
    if json {
        return print_json(&CreatedJson { id: &id });
    }
    println!("added {} {}", short_id(&id), args.name.trim());
    Ok(())
}

fn cmd_task_rm(app: &mut App, args: TaskIdArg) -> CmdResult {
    let id = resolve_task_id(app, &args.id)?;
    let task = app.delete_task(&id)?;
    println!("deleted {} {}", short_id(&task.id), task.name);
    Ok(())
}

fn cmd_task_mv(app: &mut App, args: TaskMvArgs) -> CmdResult {
    let id = resolve_task_id(app, &args.id)?;
    app.move_task(&id, args.status, args.index.unwrap_or(usize::MAX))?;
    println!("moved {} to {}", short_id(&id), args.status.label());
    Ok(())
}

fn cmd_task_arrange(app: &mut App, args: ArrangeArgs, json: bool) -> CmdResult {
    // Unresolvable IDs pass through untouched; reconciliation skips them
    let resolve = |ids: Vec<String>| -> Vec<String> {
        ids.into_iter()
            .map(|prefix| resolve_task_id(app, &prefix).unwrap_or(prefix))
            .collect()
    };
    let columns = BoardColumns {
        todo: resolve(args.todo),
        inprogress: resolve(args.inprogress),
        done: resolve(args.done),
    };
    app.reconcile_from_view(&columns)?;
    show_board(app, json)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

fn cmd_report(app: &App, args: ReportArgs, json: bool) -> CmdResult {
    let mut report = app.report();
    if let Some(name) = &args.project {
        report = report.only(name).ok_or_else(|| BoardError::NotFound {
            kind: "project",
            key: name.clone(),
        })?;
    }
    if json {
        return print_json(&ReportJson {
            report: &report,
            chart: args.chart.then(|| report.chart_data()),
        });
    }
    print_lines(&format_report(&report));
    Ok(())
}
