use crate::cli::CommonArgs;
use crate::history::{fetch_history, file_breakdown, language_breakdown, resolve_cutoff, summarize, up_to, CommitHistory};
use crate::model::{CommitSummary, FileLines, FilesOutput, LanguageLines, SiteSummary, SummaryOutput, SCHEMA_VERSION};
use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use console::style;

/// Commits in view after `--until`/`--slider`, together with the cutoff used.
pub(crate) fn visible_commits<'a>(
    history: &'a CommitHistory,
    common: &CommonArgs,
) -> anyhow::Result<(Vec<&'a CommitSummary>, Option<DateTime<FixedOffset>>)> {
    let cutoff = resolve_cutoff(history, common.until.as_deref(), common.slider)
        .context("Failed to resolve cutoff")?;
    let commits = match &cutoff {
        Some(t) => up_to(history.commits(), t),
        None => history.commits().iter().collect(),
    };
    Ok((commits, cutoff))
}

pub fn exec_summary(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let history = fetch_history(&common, !(json || ndjson)).context("Failed to load coding history")?;
    let (commits, cutoff) = visible_commits(&history, &common)?;

    let summary = summarize(&history, &commits);
    let languages = language_breakdown(&history, &commits);

    if json {
        let output = SummaryOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            log_path: common.log.to_string_lossy().to_string(),
            until: cutoff,
            summary,
            languages,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        println!("{}", serde_json::to_string(&summary)?);
        for l in &languages {
            println!("{}", serde_json::to_string(l)?);
        }
    } else {
        if let Some(t) = cutoff {
            println!("Showing commits until {}", t.format("%Y-%m-%d %H:%M %:z"));
        }
        print_summary(&summary);
        println!();
        print_languages(&languages);
    }
    Ok(())
}

pub fn print_summary(summary: &SiteSummary) {
    println!("{}", style("Site Summary").bold());
    println!("{}", "─".repeat(40));
    let period = summary
        .most_active_period
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let rows: [(&str, String); 6] = [
        ("COMMITS", summary.commits.to_string()),
        ("FILES", summary.files.to_string()),
        ("TOTAL LOC", summary.total_lines.to_string()),
        ("DAYS WORKED", summary.days_worked.to_string()),
        ("MOST ACTIVE PERIOD", period),
        ("AVG. FILE LENGTH", summary.avg_file_length.to_string()),
    ];
    for (label, value) in rows {
        println!("{:<20} {}", style(label).dim(), style(value).cyan());
    }
}

fn print_languages(languages: &[LanguageLines]) {
    println!("{}", style("Languages").bold());
    println!("{}", "─".repeat(40));
    let total: usize = languages.iter().map(|l| l.lines).sum();
    if total == 0 {
        println!("No lines in view");
        return;
    }
    for l in languages {
        let share = l.lines as f64 / total as f64;
        let bar = "█".repeat(((share * 30.0).round() as usize).max(1));
        println!(
            "{:<8} {:>6} lines {:>5.1}% {}",
            if l.kind.is_empty() { "(none)" } else { l.kind.as_str() },
            l.lines,
            share * 100.0,
            style(bar).green()
        );
    }
}

pub fn exec_files(common: CommonArgs, json: bool, ndjson: bool, limit: usize) -> anyhow::Result<()> {
    let history = fetch_history(&common, !(json || ndjson)).context("Failed to load coding history")?;
    let (commits, cutoff) = visible_commits(&history, &common)?;
    let files = file_breakdown(&history, &commits);

    if json {
        let output = FilesOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            log_path: common.log.to_string_lossy().to_string(),
            until: cutoff,
            files,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for f in &files {
            println!("{}", serde_json::to_string(f)?);
        }
    } else {
        output_files_table(&files, limit);
    }
    Ok(())
}

fn output_files_table(files: &[FileLines], limit: usize) {
    println!(
        "{:<50} {:>8} {:>8} {:>8}",
        style("File").bold(),
        style("Type").bold(),
        style("Lines").bold(),
        style("Commits").bold()
    );
    println!("{}", "─".repeat(77));
    for f in files.iter().take(limit) {
        println!("{:<50} {:>8} {:>8} {:>8}", f.file, f.kind, f.lines, f.commits);
    }
    if files.len() > limit {
        println!("\n... and {} more files", files.len() - limit);
    }
}
