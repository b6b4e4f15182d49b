use crate::history::aggregate::CommitHistory;
use crate::model::{CommitSummary, EditRecord, FileLines, LanguageLines, Period, SiteSummary};
use chrono::Timelike;
use std::collections::{HashMap, HashSet};

/// Records belonging to the given commits, commit by commit.
fn subset_records<'a>(
    history: &'a CommitHistory,
    commits: &'a [&'a CommitSummary],
) -> impl Iterator<Item = &'a EditRecord> + 'a {
    commits.iter().flat_map(move |c| history.lines_of(&c.id))
}

pub fn summarize(history: &CommitHistory, commits: &[&CommitSummary]) -> SiteSummary {
    let mut files: HashSet<&str> = HashSet::new();
    let mut days = HashSet::new();
    let mut total_lines = 0usize;

    for record in subset_records(history, commits) {
        files.insert(record.file.as_str());
        days.insert(record.date);
        total_lines += 1;
    }

    let avg_file_length = if files.is_empty() {
        0
    } else {
        (total_lines as f64 / files.len() as f64).round() as usize
    };

    SiteSummary {
        commits: commits.len(),
        files: files.len(),
        total_lines,
        days_worked: days.len(),
        most_active_period: most_active_period(commits),
        avg_file_length,
    }
}

/// Period with the most commits. On a tie the period seen first wins.
pub fn most_active_period(commits: &[&CommitSummary]) -> Option<Period> {
    let mut seen: Vec<(Period, usize)> = Vec::new();
    for commit in commits {
        let period = Period::from_hour(commit.datetime.hour());
        match seen.iter_mut().find(|(p, _)| *p == period) {
            Some((_, n)) => *n += 1,
            None => seen.push((period, 1)),
        }
    }

    let mut best: Option<(Period, usize)> = None;
    for (period, count) in seen {
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((period, count));
        }
    }
    best.map(|(p, _)| p)
}

pub fn language_breakdown(history: &CommitHistory, commits: &[&CommitSummary]) -> Vec<LanguageLines> {
    let mut order: Vec<LanguageLines> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for record in subset_records(history, commits) {
        match slot.get(record.kind.as_str()) {
            Some(&i) => order[i].lines += 1,
            None => {
                slot.insert(record.kind.as_str(), order.len());
                order.push(LanguageLines {
                    kind: record.kind.clone(),
                    lines: 1,
                });
            }
        }
    }

    order.sort_by(|a, b| b.lines.cmp(&a.lines));
    order
}

pub fn file_breakdown(history: &CommitHistory, commits: &[&CommitSummary]) -> Vec<FileLines> {
    let mut order: Vec<(FileLines, HashSet<&str>)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for record in subset_records(history, commits) {
        let i = *slot.entry(record.file.as_str()).or_insert_with(|| {
            order.push((
                FileLines {
                    file: record.file.clone(),
                    kind: record.kind.clone(),
                    lines: 0,
                    commits: 0,
                },
                HashSet::new(),
            ));
            order.len() - 1
        });
        let (entry, touched) = &mut order[i];
        entry.lines += 1;
        touched.insert(record.commit.as_str());
    }

    let mut files: Vec<FileLines> = order
        .into_iter()
        .map(|(mut entry, touched)| {
            entry.commits = touched.len();
            entry
        })
        .collect();
    files.sort_by(|a, b| b.lines.cmp(&a.lines));
    files
}

/// Distinct files edited by one commit.
pub fn files_touched(history: &CommitHistory, id: &str) -> usize {
    history
        .lines_of(id)
        .map(|r| r.file.as_str())
        .collect::<HashSet<_>>()
        .len()
}
