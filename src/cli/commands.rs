use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::view::View;
use crate::model::task::TaskStatus;

#[derive(Parser)]
#[command(name = "tb", about = concat!("taskboard v", env!("CARGO_PKG_VERSION"), " - projects, boards, reports"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep data in a different directory
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, switching to your own projects
    Login(LoginArgs),
    /// Sign out and clear the session
    Logout,
    /// Show the signed-in user, view and open project
    Whoami,
    /// List projects with their progress
    Projects,
    /// Project management
    Project(ProjectCmd),
    /// Open a project's task board
    Open(OpenArgs),
    /// Switch view (projects, tasks, reports)
    View(ViewArgs),
    /// Show the open project's board
    Board,
    /// Task management on the open project
    Task(TaskCmd),
    /// Show completion reports
    Report(ReportArgs),
}

// ---------------------------------------------------------------------------
// Session args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LoginArgs {
    /// User identifier
    pub user: String,
}

#[derive(Args)]
pub struct OpenArgs {
    /// Project name
    pub name: String,
}

#[derive(Args)]
pub struct ViewArgs {
    /// Target view
    pub view: View,
}

// ---------------------------------------------------------------------------
// Project args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ProjectCmd {
    #[command(subcommand)]
    pub action: ProjectAction,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project
    Add(ProjectAddArgs),
    /// Delete a project and all its tasks
    Rm(ProjectRmArgs),
    /// Show a project's details
    Show(ProjectNameArg),
}

#[derive(Args)]
pub struct ProjectAddArgs {
    /// Project name (must be unique)
    pub name: String,
    /// Deadline label (default: N/A)
    #[arg(long)]
    pub deadline: Option<String>,
}

#[derive(Args)]
pub struct ProjectRmArgs {
    /// Project name
    pub name: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ProjectNameArg {
    /// Project name
    pub name: String,
}

// ---------------------------------------------------------------------------
// Task args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TaskCmd {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the To Do column
    Add(TaskAddArgs),
    /// Delete a task
    Rm(TaskIdArg),
    /// Move a task to a column (and position)
    Mv(TaskMvArgs),
    /// Replace the whole board layout
    Arrange(ArrangeArgs),
}

#[derive(Args)]
pub struct TaskAddArgs {
    /// Task name
    pub name: String,
    /// Task description
    #[arg(long, default_value = "")]
    pub desc: String,
}

#[derive(Args)]
pub struct TaskIdArg {
    /// Task ID (any unique prefix)
    pub id: String,
}

#[derive(Args)]
pub struct TaskMvArgs {
    /// Task ID (any unique prefix)
    pub id: String,
    /// Target column (todo, inprogress, done)
    pub status: TaskStatus,
    /// Position within the column, 0 = top (default: bottom)
    #[arg(long)]
    pub index: Option<usize>,
}

#[derive(Args)]
pub struct ArrangeArgs {
    /// To Do column, top to bottom (comma-separated IDs)
    #[arg(long, value_delimiter = ',')]
    pub todo: Vec<String>,
    /// In Progress column, top to bottom
    #[arg(long, value_delimiter = ',')]
    pub inprogress: Vec<String>,
    /// Done column, top to bottom
    #[arg(long, value_delimiter = ',')]
    pub done: Vec<String>,
}

// ---------------------------------------------------------------------------
// Report args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ReportArgs {
    /// Limit the report to one project
    #[arg(long)]
    pub project: Option<String>,
    /// Include chart series in JSON output
    #[arg(long)]
    pub chart: bool,
}
