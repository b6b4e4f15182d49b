use crate::cli::CommonArgs;
use crate::history::{fetch_history, files_touched, resolve_cutoff, summarize, up_to, CommitHistory};
use crate::model::{SiteSummary, SCHEMA_VERSION};
use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use console::style;
use serde::{Deserialize, Serialize};

/// One scroll step of the coding-history narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub index: usize,
    pub commit_id: String,
    pub datetime: DateTime<FixedOffset>,
    pub lines: usize,
    pub files: usize,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log_path: String,
    pub steps: Vec<Step>,
    pub active_step: Option<usize>,
    pub summary: Option<SiteSummary>,
}

pub fn build_steps(history: &CommitHistory) -> Vec<Step> {
    history
        .chronological()
        .into_iter()
        .enumerate()
        .map(|(index, commit)| {
            let files = files_touched(history, &commit.id);
            let deed = if index == 0 {
                "my first commit, and it was glorious"
            } else {
                "another glorious commit"
            };
            let text = format!(
                "On {}, I made {deed}. I edited {} lines across {files} files. \
                 Then I looked over all I had made, and I saw that it was very good.",
                commit.datetime.format("%Y-%m-%d %H:%M"),
                commit.total_lines,
            );
            Step {
                index,
                commit_id: commit.id.clone(),
                datetime: commit.datetime,
                lines: commit.total_lines,
                files,
                text,
                url: commit.url.clone(),
            }
        })
        .collect()
}

/// Entering a step shows every commit up to and including it.
pub fn cutoff_for_step(steps: &[Step], index: usize) -> Option<DateTime<FixedOffset>> {
    steps.get(index).map(|s| s.datetime)
}

/// Last step at or before `cutoff`, if the cutoff reaches any step.
pub fn step_at(steps: &[Step], cutoff: &DateTime<FixedOffset>) -> Option<usize> {
    steps.iter().rposition(|s| s.datetime <= *cutoff)
}

pub fn summary_at_step(history: &CommitHistory, steps: &[Step], index: usize) -> Option<SiteSummary> {
    let cutoff = cutoff_for_step(steps, index)?;
    let visible = up_to(history.commits(), &cutoff);
    Some(summarize(history, &visible))
}

pub fn exec(common: CommonArgs, step: Option<usize>, json: bool) -> anyhow::Result<()> {
    let history = fetch_history(&common, !json).context("Failed to load coding history")?;
    let steps = build_steps(&history);

    let cutoff = resolve_cutoff(&history, common.until.as_deref(), common.slider)
        .context("Failed to resolve cutoff")?;
    let step = match (step, cutoff) {
        (Some(_), Some(_)) => anyhow::bail!("--step cannot be combined with --until or --slider"),
        (None, Some(t)) => step_at(&steps, &t),
        (step, None) => step,
    };

    if let Some(i) = step {
        if i >= steps.len() {
            anyhow::bail!("Step {i} does not exist; the story has {} steps", steps.len());
        }
    }
    let summary = step.and_then(|i| summary_at_step(&history, &steps, i));

    if json {
        let output = StoryOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            log_path: common.log.to_string_lossy().to_string(),
            steps,
            active_step: step,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if steps.is_empty() {
        println!("No commits to tell a story about");
        return Ok(());
    }

    for s in &steps {
        let marker = if Some(s.index) == step { style(">").yellow().bold() } else { style(" ") };
        println!("{marker} {:>3}. {}", s.index + 1, s.text);
        if let Some(url) = &s.url {
            println!("       {}", style(url).dim());
        }
    }

    if let Some(summary) = summary {
        println!();
        crate::stats::print_summary(&summary);
    }
    Ok(())
}
