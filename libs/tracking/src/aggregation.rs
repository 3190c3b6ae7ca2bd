//! Duration roll-ups behind the reporting charts
//!
//! The input is the sparse output of the per-user visualization query: one
//! row per (date, project) group that has at least one work session. The
//! functions here turn it into the dense, stacked shape a bar chart needs,
//! where a missing (date, project) pair is an explicit zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Total minutes tracked for one project on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRow {
    pub date: NaiveDate,
    pub project_name: String,
    pub total_duration: i64,
}

/// One entry of the dense date x project grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenseCell {
    pub date: NaiveDate,
    pub project: String,
    pub duration: i64,
}

/// Vertical extent of one project's bar segment on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub date: NaiveDate,
    pub start: i64,
    pub end: i64,
}

/// All segments belonging to one project, one per date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub key: String,
    pub segments: Vec<Segment>,
}

/// Total minutes tracked for one project across all dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTotal {
    pub project_name: String,
    pub total_duration: i64,
}

/// Everything the reporting view renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    /// Date axis, ascending
    pub dates: Vec<NaiveDate>,
    /// Project keys in order of first appearance
    pub projects: Vec<String>,
    pub cells: Vec<DenseCell>,
    pub series: Vec<Series>,
    pub totals: Vec<ProjectTotal>,
    /// Height of the tallest stacked bar
    pub max_total: i64,
}

/// Distinct projects in order of first appearance
fn first_seen<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Distinct dates in chronological order
fn date_axis(dates: impl Iterator<Item = NaiveDate>) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = dates.collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

/// Fill the sparse rows into a dense date x project grid
///
/// Cells are ordered date-major: ascending dates, and within a date the
/// projects in the order they first appear in `rows`. Rows repeating a
/// (date, project) pair are summed.
pub fn densify(rows: &[DurationRow]) -> Vec<DenseCell> {
    let dates = date_axis(rows.iter().map(|row| row.date));
    let projects = first_seen(rows.iter().map(|row| row.project_name.as_str()));

    let mut sums: HashMap<(NaiveDate, &str), i64> = HashMap::new();
    for row in rows {
        *sums
            .entry((row.date, row.project_name.as_str()))
            .or_insert(0) += row.total_duration;
    }

    let mut cells = Vec::with_capacity(dates.len() * projects.len());
    for date in &dates {
        for project in &projects {
            let duration = sums
                .get(&(*date, project.as_str()))
                .copied()
                .unwrap_or(0);
            cells.push(DenseCell {
                date: *date,
                project: project.clone(),
                duration,
            });
        }
    }

    cells
}

/// Stack the grid into one series per project
///
/// For every date, projects are laid on top of each other in first-seen
/// order; each segment spans `[start, end)` where `start` is the sum of the
/// segments below it. Pairs absent from `cells` count as zero.
pub fn stack(cells: &[DenseCell]) -> Vec<Series> {
    let dates = date_axis(cells.iter().map(|cell| cell.date));
    let projects = first_seen(cells.iter().map(|cell| cell.project.as_str()));

    let mut durations: HashMap<(NaiveDate, &str), i64> = HashMap::new();
    for cell in cells {
        *durations
            .entry((cell.date, cell.project.as_str()))
            .or_insert(0) += cell.duration;
    }

    let mut series: Vec<Series> = projects
        .iter()
        .map(|project| Series {
            key: project.clone(),
            segments: Vec::with_capacity(dates.len()),
        })
        .collect();

    for date in &dates {
        let mut offset = 0;
        for entry in series.iter_mut() {
            let duration = durations
                .get(&(*date, entry.key.as_str()))
                .copied()
                .unwrap_or(0);
            entry.segments.push(Segment {
                date: *date,
                start: offset,
                end: offset + duration,
            });
            offset += duration;
        }
    }

    series
}

/// Sum durations per project, in order of first appearance
pub fn project_totals(rows: &[DurationRow]) -> Vec<ProjectTotal> {
    let projects = first_seen(rows.iter().map(|row| row.project_name.as_str()));

    let mut sums: HashMap<&str, i64> = HashMap::new();
    for row in rows {
        *sums.entry(row.project_name.as_str()).or_insert(0) += row.total_duration;
    }

    projects
        .into_iter()
        .map(|project_name| {
            let total_duration = sums.get(project_name.as_str()).copied().unwrap_or(0);
            ProjectTotal {
                project_name,
                total_duration,
            }
        })
        .collect()
}

/// Build the full chart payload from the sparse rows
pub fn build_chart(rows: &[DurationRow]) -> Chart {
    let cells = densify(rows);
    let series = stack(&cells);
    let max_total = series
        .last()
        .and_then(|top| top.segments.iter().map(|segment| segment.end).max())
        .unwrap_or(0);

    Chart {
        dates: date_axis(rows.iter().map(|row| row.date)),
        projects: series.iter().map(|s| s.key.clone()).collect(),
        totals: project_totals(rows),
        cells,
        series,
        max_total,
    }
}
