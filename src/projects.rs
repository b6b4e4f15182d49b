use crate::error::{LochistError, Result};
use crate::model::SCHEMA_VERSION;
use anyhow::Context;
use chrono::{DateTime, Utc};
use console::style;
use serde::{Deserialize, Deserializer, Serialize};
use std::f64::consts::TAU;
use std::path::Path;
use tracing::{debug, info};

/// Projects shown on the home page.
pub const LATEST_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "year_as_string")]
    pub year: String,
}

impl Project {
    fn fields(&self) -> [&str; 4] {
        [
            self.title.as_str(),
            self.image.as_str(),
            self.description.as_str(),
            self.year.as_str(),
        ]
    }
}

fn year_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }
    Ok(match Year::deserialize(deserializer)? {
        Year::Text(s) => s,
        Year::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Legend selection of the year pie; clicking the selected slice clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieSelection(Option<usize>);

impl PieSelection {
    pub fn selected(&self) -> Option<usize> {
        self.0
    }

    pub fn toggle(self, index: usize) -> Self {
        if self.0 == Some(index) {
            PieSelection(None)
        } else {
            PieSelection(Some(index))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub projects_path: String,
    pub query: Option<String>,
    pub year: Option<String>,
    pub projects: Vec<Project>,
    pub pie: Vec<PieSlice>,
}

pub fn load_projects<P: AsRef<Path>>(path: P) -> Result<Vec<Project>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| LochistError::Projects(format!("Cannot read {}: {e}", path.display())))?;
    let projects: Vec<Project> = serde_json::from_str(&raw)?;
    info!(path = %path.display(), count = projects.len(), "loaded projects");
    Ok(projects)
}

/// Case-insensitive substring match against every field.
pub fn search<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return projects.iter().collect();
    }
    projects
        .iter()
        .filter(|p| p.fields().iter().any(|f| f.to_lowercase().contains(&query)))
        .collect()
}

pub fn latest(projects: &[Project], n: usize) -> &[Project] {
    &projects[..n.min(projects.len())]
}

pub fn filter_by_year<'a>(projects: &[&'a Project], year: &str) -> Vec<&'a Project> {
    projects.iter().copied().filter(|p| p.year == year).collect()
}

/// Slices per year in first-seen order, angles in radians summing to a full turn.
pub fn year_pie(projects: &[&Project]) -> Vec<PieSlice> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for p in projects {
        match counts.iter_mut().find(|(year, _)| *year == p.year) {
            Some((_, n)) => *n += 1,
            None => counts.push((p.year.clone(), 1)),
        }
    }

    let total = projects.len() as f64;
    let mut angle = 0.0;
    counts
        .into_iter()
        .map(|(label, value)| {
            let start_angle = angle;
            angle += TAU * value as f64 / total;
            PieSlice {
                label,
                value,
                start_angle,
                end_angle: angle,
            }
        })
        .collect()
}

pub fn exec(
    path: &Path,
    query: Option<String>,
    year: Option<String>,
    latest_n: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let all = load_projects(path).context("Failed to load projects")?;
    let pool = match latest_n {
        Some(n) => latest(&all, n),
        None => &all[..],
    };

    let matched = search(pool, query.as_deref().unwrap_or(""));
    let pie = year_pie(&matched);
    let shown = match year.as_deref() {
        Some(y) => filter_by_year(&matched, y),
        None => matched,
    };
    debug!(shown = shown.len(), slices = pie.len(), "filtered projects");

    if json {
        let output = ProjectsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            projects_path: path.to_string_lossy().to_string(),
            query,
            year,
            projects: shown.into_iter().cloned().collect(),
            pie,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", style(format!("{} Projects", shown.len())).bold());
    println!("{}", "─".repeat(50));
    for p in &shown {
        println!("{}  {}", style(&p.title).cyan().bold(), style(format!("c. {}", p.year)).dim());
        if !p.description.is_empty() {
            println!("    {}", p.description);
        }
    }

    let total: usize = pie.iter().map(|s| s.value).sum();
    if total > 0 {
        println!("\n{}", style("By year").bold());
        for slice in &pie {
            let highlighted = year.as_deref() == Some(slice.label.as_str());
            let line = format!(
                "  {:<8} {:>3} ({:>5.1}%)",
                slice.label,
                slice.value,
                slice.value as f64 * 100.0 / total as f64
            );
            if highlighted {
                println!("{}", style(line).yellow().bold());
            } else {
                println!("{line}");
            }
        }
    }
    Ok(())
}
