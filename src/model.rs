use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SCHEMA_VERSION: u32 = 1;

/// One line of source code at one point in repository history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditRecord {
    pub commit: String,
    pub file: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    pub author: String,
    pub datetime: DateTime<FixedOffset>,
    pub date: NaiveDate,
    pub timezone: String,
}

/// One summary per distinct commit id. The constituent records are reached
/// through `CommitHistory::lines_of`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub id: String,
    pub author: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CommitSummary {
    pub fn from_first(record: &EditRecord, total_lines: usize) -> Self {
        Self {
            id: record.commit.clone(),
            author: record.author.clone(),
            datetime: record.datetime,
            hour_frac: hour_frac(&record.datetime),
            total_lines,
            url: None,
        }
    }

    pub fn short_id(&self) -> String {
        self.id.chars().take(8).collect()
    }
}

/// Hour of day plus minutes as a fraction, in the timestamp's own offset.
pub fn hour_frac(datetime: &DateTime<FixedOffset>) -> f64 {
    datetime.hour() as f64 + datetime.minute() as f64 / 60.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Period {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Period::Morning,
            12..=16 => Period::Afternoon,
            17..=20 => Period::Evening,
            _ => Period::Night,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::Morning => "Morning",
            Period::Afternoon => "Afternoon",
            Period::Evening => "Evening",
            Period::Night => "Night",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSummary {
    pub commits: usize,
    pub files: usize,
    pub total_lines: usize,
    pub days_worked: usize,
    pub most_active_period: Option<Period>,
    pub avg_file_length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageLines {
    pub kind: String,
    pub lines: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileLines {
    pub file: String,
    pub kind: String,
    pub lines: usize,
    pub commits: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log_path: String,
    pub until: Option<DateTime<FixedOffset>>,
    pub commits: Vec<CommitSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log_path: String,
    pub until: Option<DateTime<FixedOffset>>,
    pub summary: SiteSummary,
    pub languages: Vec<LanguageLines>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log_path: String,
    pub until: Option<DateTime<FixedOffset>>,
    pub files: Vec<FileLines>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log_path: String,
    pub rect: [f64; 4],
    pub until: Option<DateTime<FixedOffset>>,
    pub commits: Vec<CommitSummary>,
    pub summary: SiteSummary,
}
