use crate::error::{LochistError, Result};
use crate::model::EditRecord;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

const REQUIRED_COLUMNS: [&str; 3] = ["commit", "file", "datetime"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Drop malformed rows with a warning instead of failing the load.
    pub skip_invalid: bool,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    commit: String,
    file: String,
    datetime: String,
    #[serde(default)]
    line: Option<String>,
    #[serde(default)]
    depth: Option<String>,
    #[serde(default)]
    length: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
}

/// Records parsed from one edit log, with the number of rows dropped under
/// `skip_invalid`.
#[derive(Debug, Clone, Default)]
pub struct ParsedLog {
    pub records: Vec<EditRecord>,
    pub skipped: usize,
}

impl ParsedLog {
    pub fn is_complete(&self) -> bool {
        self.skipped == 0
    }
}

pub fn load_records<P: AsRef<Path>>(path: P, opts: LoadOptions) -> Result<Vec<EditRecord>> {
    load_log(path, opts).map(|log| log.records)
}

pub fn load_log<P: AsRef<Path>>(path: P, opts: LoadOptions) -> Result<ParsedLog> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading edit log");
    let file = File::open(path)?;
    parse_log(file, opts)
}

pub fn parse_records<R: Read>(reader: R, opts: LoadOptions) -> Result<Vec<EditRecord>> {
    parse_log(reader, opts).map(|log| log.records)
}

pub fn parse_log<R: Read>(reader: R, opts: LoadOptions) -> Result<ParsedLog> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LochistError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row = idx + 1;
        let parsed = result
            .map_err(|e| LochistError::record(row, e.to_string()))
            .and_then(|raw| convert_row(raw, row));
        match parsed {
            Ok(record) => records.push(record),
            Err(e) if opts.skip_invalid => {
                warn!(row, error = %e, "skipping malformed edit record");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    debug!(rows = records.len(), skipped, "parsed edit log");
    Ok(ParsedLog { records, skipped })
}

fn convert_row(raw: RawRow, row: usize) -> Result<EditRecord> {
    if raw.commit.is_empty() {
        return Err(LochistError::record(row, "empty commit id"));
    }

    let tz_offset = raw.timezone.as_deref().and_then(parse_offset);
    let datetime = parse_datetime(&raw.datetime, tz_offset)
        .ok_or_else(|| LochistError::record(row, format!("unparseable datetime '{}'", raw.datetime)))?;

    let date = match raw.date.as_deref().filter(|d| !d.is_empty()) {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| LochistError::record(row, format!("unparseable date '{d}'")))?,
        None => datetime.date_naive(),
    };

    let timezone = match raw.timezone.filter(|t| !t.is_empty()) {
        Some(t) => t,
        None => format_offset(datetime.offset()),
    };

    let kind = match raw.kind.filter(|k| !k.is_empty()) {
        Some(k) => k,
        None => kind_from_path(&raw.file),
    };

    Ok(EditRecord {
        commit: raw.commit,
        file: raw.file,
        kind,
        line: parse_count(raw.line.as_deref(), "line", row)?,
        depth: parse_count(raw.depth.as_deref(), "depth", row)?,
        length: parse_count(raw.length.as_deref(), "length", row)?,
        author: raw.author.unwrap_or_default(),
        datetime,
        date,
        timezone,
    })
}

fn parse_count(value: Option<&str>, column: &str, row: usize) -> Result<u32> {
    match value {
        None | Some("") => Ok(0),
        Some(v) => v
            .parse::<u32>()
            .map_err(|_| LochistError::record(row, format!("{column} is not a count: '{v}'"))),
    }
}

/// Parses an RFC 3339 timestamp, or a naive one in `fallback` (UTC if absent).
pub fn parse_datetime(input: &str, fallback: Option<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }
    let offset = fallback.unwrap_or_else(utc_offset);
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
}

/// Parses `+HH:MM`, `-HHMM`, `+HH` or `Z`.
pub fn parse_offset(input: &str) -> Option<FixedOffset> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("z") {
        return Some(utc_offset());
    }
    let (sign, rest) = match input.chars().next()? {
        '+' => (1, &input[1..]),
        '-' => (-1, &input[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn format_offset(offset: &FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.abs();
    format!("{sign}{:02}:{:02}", secs / 3600, (secs % 3600) / 60)
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

fn kind_from_path(file: &str) -> String {
    Path::new(file)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn offsets_parse_in_common_shapes() {
        assert_eq!(parse_offset("+05:30").map(|o| o.local_minus_utc()), Some(19800));
        assert_eq!(parse_offset("-0800").map(|o| o.local_minus_utc()), Some(-28800));
        assert_eq!(parse_offset("+02").map(|o| o.local_minus_utc()), Some(7200));
        assert_eq!(parse_offset("Z").map(|o| o.local_minus_utc()), Some(0));
        assert!(parse_offset("08:00").is_none());
        assert!(parse_offset("+8:0x").is_none());
    }

    #[test]
    fn naive_datetime_uses_row_timezone() {
        let dt = parse_datetime("2024-01-01T09:00", parse_offset("-08:00")).unwrap();
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.offset().local_minus_utc(), -28800);
    }

    #[test]
    fn rfc3339_keeps_its_own_offset() {
        let dt = parse_datetime("2024-02-08T20:59:58-08:00", parse_offset("+01:00")).unwrap();
        assert_eq!(dt.hour(), 20);
        assert_eq!(format_offset(dt.offset()), "-08:00");
    }

    #[test]
    fn kind_falls_back_to_extension() {
        let csv = "commit,file,datetime\nabc,src/Main.JS,2024-01-01T09:00:00Z\n";
        let records = parse_records(csv.as_bytes(), LoadOptions::default()).unwrap();
        assert_eq!(records[0].kind, "js");
        assert_eq!(records[0].timezone, "+00:00");
        assert_eq!(records[0].line, 0);
    }
}
