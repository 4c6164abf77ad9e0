use serde::Serialize;

use crate::app::view::View;
use crate::model::project::Project;
use crate::model::task::{Task, TaskStatus};
use crate::ops::progress::StatusCounts;
use crate::ops::report::{ChartData, ProjectSummary, Report};
use crate::ops::task_ops::BoardColumns;

/// Characters of a task ID shown in listings
pub const SHORT_ID_LEN: usize = 8;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SessionJson<'a> {
    pub user: Option<&'a str>,
    pub view: View,
    pub active_project: Option<&'a str>,
    pub degraded: bool,
}

#[derive(Serialize)]
pub struct ProjectDetailJson<'a> {
    #[serde(flatten)]
    pub summary: ProjectSummary,
    pub tasks: &'a [Task],
}

#[derive(Serialize)]
pub struct BoardJson<'a> {
    pub project: &'a str,
    pub deadline: &'a str,
    pub percent: u8,
    pub counts: StatusCounts,
    pub columns: ColumnsJson<'a>,
}

#[derive(Serialize)]
pub struct ColumnsJson<'a> {
    pub todo: Vec<&'a Task>,
    pub inprogress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

#[derive(Serialize)]
pub struct ReportJson<'a> {
    #[serde(flatten)]
    pub report: &'a Report,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartData>,
}

#[derive(Serialize)]
pub struct CreatedJson<'a> {
    pub id: &'a str,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn board_to_json<'a>(name: &'a str, project: &'a Project, counts: StatusCounts) -> BoardJson<'a> {
    let column = move |status| project.tasks_with_status(status).collect::<Vec<_>>();
    BoardJson {
        project: name,
        deadline: &project.deadline,
        percent: counts.percent(),
        counts,
        columns: ColumnsJson {
            todo: column(TaskStatus::Todo),
            inprogress: column(TaskStatus::InProgress),
            done: column(TaskStatus::Done),
        },
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn status_char(status: TaskStatus) -> char {
    match status {
        TaskStatus::Todo => ' ',
        TaskStatus::InProgress => '>',
        TaskStatus::Done => 'x',
    }
}

/// First few characters of an ID
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// `[#####-----]` style bar, `width` cells wide
pub fn format_progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    let desc = if task.desc.is_empty() {
        String::new()
    } else {
        format!(" - {}", task.desc)
    };
    format!(
        "[{}] {} {}{}",
        status_char(task.status),
        short_id(&task.id),
        task.name,
        desc
    )
}

/// Format a project for the projects listing
pub fn format_project_line(summary: &ProjectSummary, active: bool) -> String {
    let marker = if active { '*' } else { ' ' };
    format!(
        "{} {} {} {:>3}%  {}/{} done  deadline: {}",
        marker,
        summary.name,
        format_progress_bar(summary.percent, 20),
        summary.percent,
        summary.counts.done,
        summary.total,
        summary.deadline
    )
}

/// Format a project board, one section per column
pub fn format_board(name: &str, project: &Project, counts: StatusCounts) -> Vec<String> {
    let mut lines = vec![
        format!("== {} (deadline: {}) ==", name, project.deadline),
        format!(
            "{} {}%",
            format_progress_bar(counts.percent(), 20),
            counts.percent()
        ),
    ];

    let columns = BoardColumns::from_tasks(&project.tasks);
    for status in TaskStatus::ALL {
        lines.push(String::new());
        lines.push(format!("-- {} ({}) --", status.label(), counts.get(status)));
        for id in columns.column(status) {
            if let Some(task) = project.find_task(id) {
                lines.push(format_task_line(task));
            }
        }
    }
    lines
}

/// Format the completion report
pub fn format_report(report: &Report) -> Vec<String> {
    let mut lines = Vec::new();
    for summary in &report.projects {
        lines.push(format!("{}  ({} tasks)", summary.name, summary.total));
        lines.push(format!(
            "  To Do: {} | In Progress: {} | Done: {}",
            summary.counts.todo, summary.counts.inprogress, summary.counts.done
        ));
        lines.push(format!(
            "  {} Completion: {}%",
            format_progress_bar(summary.percent, 20),
            summary.percent
        ));
    }
    if !report.projects.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Totals: To Do: {} | In Progress: {} | Done: {}",
        report.totals.todo, report.totals.inprogress, report.totals.done
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::report::aggregate;
    use crate::model::project::ProjectMap;
    use crate::ops::progress::status_counts;

    fn task(id: &str, name: &str, status: TaskStatus) -> Task {
        Task {
            id: id.into(),
            name: name.into(),
            desc: String::new(),
            status,
        }
    }

    #[test]
    fn progress_bar_widths() {
        assert_eq!(format_progress_bar(0, 10), "[----------]");
        assert_eq!(format_progress_bar(50, 10), "[#####-----]");
        assert_eq!(format_progress_bar(100, 10), "[##########]");
        assert_eq!(format_progress_bar(33, 4), "[#---]");
    }

    #[test]
    fn short_id_truncates() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn task_line() {
        let mut t = task("0123456789", "Write spec", TaskStatus::InProgress);
        assert_eq!(format_task_line(&t), "[>] 01234567 Write spec");
        t.desc = "first draft".into();
        assert_eq!(format_task_line(&t), "[>] 01234567 Write spec - first draft");
    }

    #[test]
    fn board_sections() {
        let mut project = Project::new(Some("Friday"));
        project.tasks = vec![
            task("a", "One", TaskStatus::Todo),
            task("b", "Two", TaskStatus::Done),
        ];
        let lines = format_board("Alpha", &project, status_counts(&project.tasks));
        assert_eq!(lines[0], "== Alpha (deadline: Friday) ==");
        assert!(lines.contains(&"-- To Do (1) --".to_string()));
        assert!(lines.contains(&"-- In Progress (0) --".to_string()));
        assert!(lines.contains(&"[x] b Two".to_string()));
    }

    #[test]
    fn report_totals_line() {
        let mut map = ProjectMap::new();
        let mut project = Project::new(None);
        project.tasks = vec![task("a", "One", TaskStatus::Done)];
        map.insert("Alpha".into(), project);
        let lines = format_report(&aggregate(&map));
        assert_eq!(lines[0], "Alpha  (1 tasks)");
        assert_eq!(
            lines.last().unwrap(),
            "Totals: To Do: 0 | In Progress: 0 | Done: 1"
        );
    }

    #[test]
    fn board_json_groups_columns() {
        let mut project = Project::new(None);
        project.tasks = vec![
            task("a", "One", TaskStatus::Todo),
            task("b", "Two", TaskStatus::Done),
            task("c", "Three", TaskStatus::Todo),
        ];
        let json = serde_json::to_value(board_to_json("Alpha", &project, status_counts(&project.tasks))).unwrap();
        assert_eq!(json["columns"]["todo"][1]["id"], "c");
        assert_eq!(json["counts"]["done"], 1);
        assert_eq!(json["percent"], 33);
    }
}
