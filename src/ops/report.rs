use serde::Serialize;

use crate::model::project::{Project, ProjectMap};

use super::progress::{StatusCounts, status_counts};

/// Per-project line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub deadline: String,
    pub total: usize,
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub percent: u8,
}

/// Aggregate view over all projects of a namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub projects: Vec<ProjectSummary>,
    pub totals: StatusCounts,
}

/// Plain series handed to a charting collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    /// Bar chart: project names and their completion percentages
    pub labels: Vec<String>,
    pub completion: Vec<u8>,
    /// Doughnut chart: todo, inprogress, done totals
    pub status_totals: [usize; 3],
}

/// Summarize a single project
pub fn summarize(name: &str, project: &Project) -> ProjectSummary {
    let counts = status_counts(&project.tasks);
    ProjectSummary {
        name: name.to_string(),
        deadline: project.deadline.clone(),
        total: counts.total(),
        counts,
        percent: counts.percent(),
    }
}

/// Build the full report. Recomputed from scratch on every call.
pub fn aggregate(projects: &ProjectMap) -> Report {
    let mut report = Report::default();
    for (name, project) in projects {
        let summary = summarize(name, project);
        report.totals += summary.counts;
        report.projects.push(summary);
    }
    report
}

impl Report {
    /// Restrict the report to one project; totals follow the filter.
    /// Returns `None` if no such project is in the report.
    pub fn only(&self, name: &str) -> Option<Report> {
        let summary = self.projects.iter().find(|p| p.name == name)?.clone();
        Some(Report {
            totals: summary.counts,
            projects: vec![summary],
        })
    }

    pub fn chart_data(&self) -> ChartData {
        ChartData {
            labels: self.projects.iter().map(|p| p.name.clone()).collect(),
            completion: self.projects.iter().map(|p| p.percent).collect(),
            status_totals: [self.totals.todo, self.totals.inprogress, self.totals.done],
        }
    }
}
