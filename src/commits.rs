use crate::cli::CommonArgs;
use crate::history::{brushed, fetch_history, summarize, BrushRect, PlotArea, Projection};
use crate::model::{BrushOutput, CommitSummary, CommitsOutput, SCHEMA_VERSION};
use crate::stats::{print_summary, visible_commits};
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let history = fetch_history(&common, !(json || ndjson)).context("Failed to load coding history")?;
    let (commits, cutoff) = visible_commits(&history, &common)?;

    if json {
        let output = CommitsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            log_path: common.log.to_string_lossy().to_string(),
            until: cutoff,
            commits: commits.iter().map(|&c| c.clone()).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for c in &commits {
            println!("{}", serde_json::to_string(c)?);
        }
    } else {
        output_table(&commits);
    }
    Ok(())
}

pub fn exec_brush(common: CommonArgs, corners: [f64; 4], json: bool) -> anyhow::Result<()> {
    let history = fetch_history(&common, !json).context("Failed to load coding history")?;
    let rect = BrushRect::new((corners[0], corners[1]), (corners[2], corners[3]));
    let (_, cutoff) = visible_commits(&history, &common)?;

    // the axes span the whole history; a cutoff only hides points
    let mut selected: Vec<&CommitSummary> = match Projection::for_commits(history.commits(), PlotArea::default()) {
        Some(projection) => brushed(history.commits(), Some(&rect), &projection),
        None => Vec::new(),
    };
    if let Some(t) = cutoff {
        selected.retain(|c| c.datetime <= t);
    }
    let summary = summarize(&history, &selected);

    if json {
        let output = BrushOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            log_path: common.log.to_string_lossy().to_string(),
            rect: rect.as_array(),
            until: cutoff,
            commits: selected.iter().map(|&c| c.clone()).collect(),
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if selected.is_empty() {
        println!("No commits selected");
        return Ok(());
    }
    println!("{} commits selected", style(selected.len()).cyan());
    output_table(&selected);
    println!();
    print_summary(&summary);
    Ok(())
}

fn output_table(commits: &[&CommitSummary]) {
    println!(
        "{:<10} {:<20} {:<25} {:>6} {:>8}",
        style("Commit").bold(),
        style("Author").bold(),
        style("Date").bold(),
        style("Hour").bold(),
        style("Lines").bold()
    );
    println!("{}", "─".repeat(73));
    for c in commits.iter().take(50) {
        println!(
            "{:<10} {:<20} {:<25} {:>6.2} {:>8}",
            c.short_id(),
            truncate(&c.author, 20),
            c.datetime.format("%Y-%m-%d %H:%M %:z"),
            c.hour_frac,
            c.total_lines
        );
    }
    if commits.len() > 50 {
        println!("\n... and {} more commits", commits.len() - 50);
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}
