use crate::model::{CommitSummary, EditRecord};
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Edit records grouped into commits. Summaries keep first-occurrence order
/// of commit ids; records stay in load order and are joined to their commit
/// through `lines_of`.
#[derive(Debug, Clone, Default)]
pub struct CommitHistory {
    records: Vec<EditRecord>,
    commits: Vec<CommitSummary>,
    index: HashMap<String, Vec<usize>>,
    inconsistent: Vec<String>,
}

impl CommitHistory {
    /// Fills each commit's `url` from `template`, replacing `{id}` with the
    /// full commit id.
    pub fn with_commit_urls(mut self, template: &str) -> Self {
        for commit in &mut self.commits {
            commit.url = Some(template.replace("{id}", &commit.id));
        }
        self
    }

    pub fn records(&self) -> &[EditRecord] {
        &self.records
    }

    pub fn commits(&self) -> &[CommitSummary] {
        &self.commits
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn commit(&self, id: &str) -> Option<&CommitSummary> {
        self.commits.iter().find(|c| c.id == id)
    }

    /// Records belonging to `id`, in load order. Unknown ids yield nothing.
    pub fn lines_of<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a EditRecord> + 'a {
        self.index
            .get(id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.records[i])
    }

    /// Commits whose later records disagree with the first on author or time.
    pub fn inconsistent_commits(&self) -> &[String] {
        &self.inconsistent
    }

    /// Commits sorted by timestamp; equal timestamps keep grouping order.
    pub fn chronological(&self) -> Vec<&CommitSummary> {
        let mut sorted: Vec<&CommitSummary> = self.commits.iter().collect();
        sorted.sort_by(|a, b| a.datetime.cmp(&b.datetime));
        sorted
    }

    pub fn extent(&self) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        extent(self.commits.iter())
    }

    /// Resolves a full commit id or a unique prefix of one.
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&CommitSummary> {
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self.commits.iter().filter(|c| c.id.starts_with(prefix));
        let first = matches.next()?;
        if first.id == prefix || matches.next().is_none() {
            Some(first)
        } else {
            None
        }
    }
}

pub fn extent<'a, I>(commits: I) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)>
where
    I: IntoIterator<Item = &'a CommitSummary>,
{
    commits.into_iter().fold(None, |acc, c| match acc {
        None => Some((c.datetime, c.datetime)),
        Some((lo, hi)) => Some((lo.min(c.datetime), hi.max(c.datetime))),
    })
}

/// Groups records by commit id. The first record of each commit supplies the
/// author and timestamp; disagreeing later records are logged, not rejected.
pub fn group_commits(records: Vec<EditRecord>) -> CommitHistory {
    let mut order: Vec<String> = Vec::new();
    let mut index: HashMap<String, Vec<usize>> = HashMap::new();

    for (i, record) in records.iter().enumerate() {
        let slots = index.entry(record.commit.clone()).or_insert_with(|| {
            order.push(record.commit.clone());
            Vec::new()
        });
        slots.push(i);
    }

    let mut inconsistent = Vec::new();
    let commits: Vec<CommitSummary> = order
        .iter()
        .map(|id| {
            let slots = &index[id];
            let first = &records[slots[0]];
            let disagrees = slots[1..].iter().any(|&i| {
                let r = &records[i];
                r.author != first.author || r.datetime != first.datetime
            });
            if disagrees {
                warn!(commit = %id, "records of one commit disagree on author or time; using the first");
                inconsistent.push(id.clone());
            }
            CommitSummary::from_first(first, slots.len())
        })
        .collect();

    debug!(commits = commits.len(), records = records.len(), "grouped commits");

    CommitHistory {
        records,
        commits,
        index,
        inconsistent,
    }
}
