use crate::cache::Cache;
use crate::cli::CommonArgs;
use crate::error::{LochistError, Result};
use crate::history::aggregate::{group_commits, CommitHistory};
use crate::history::load::{load_records, LoadOptions};
use crate::history::scale::SliderScale;
use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

/// Loads the edit log named by `common`, through the cache unless disabled,
/// and groups it into commits.
pub fn fetch_history(common: &CommonArgs, show_progress: bool) -> anyhow::Result<CommitHistory> {
    let opts = LoadOptions {
        skip_invalid: common.skip_invalid,
    };

    let spinner = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Loading {}", common.log.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let records = if common.no_cache {
        load_records(&common.log, opts).context("Failed to load edit log")?
    } else {
        let mut cache = Cache::new(common.cache.as_deref(), &common.log).context("Failed to initialize cache")?;
        cache
            .load_records(&common.log, opts)
            .context("Failed to load edit log through cache")?
    };

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let mut history = group_commits(records);
    if let Some(template) = common.commit_url.as_deref() {
        history = history.with_commit_urls(template);
    }
    info!(commits = history.len(), records = history.records().len(), "history ready");
    Ok(history)
}

/// Turns `--until` or `--slider` into a cutoff timestamp.
pub fn resolve_cutoff(
    history: &CommitHistory,
    until: Option<&str>,
    slider: Option<u8>,
) -> Result<Option<DateTime<FixedOffset>>> {
    if let Some(u) = until {
        return parse_commit_or_date(history, u).map(Some);
    }
    if let Some(position) = slider {
        if position > SliderScale::MAX {
            return Err(LochistError::Other(format!(
                "Slider position {position} is outside 0..={}",
                SliderScale::MAX
            )));
        }
        return Ok(SliderScale::for_commits(history.commits()).map(|s| s.cutoff(position)));
    }
    Ok(None)
}

fn parse_commit_or_date(history: &CommitHistory, input: &str) -> Result<DateTime<FixedOffset>> {
    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }

    // YYYY-MM-DD, inclusive of the whole day
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_milli_opt(23, 59, 59, 999) {
            return Ok(Utc.fix().from_utc_datetime(&datetime));
        }
    }

    // Relative duration (e.g., "-90d", "2 weeks ago")
    if let Some(duration) = parse_natural_duration(input) {
        let delta = chrono::Duration::from_std(duration)
            .map_err(|_| LochistError::InvalidDate(format!("Duration overflow for '{input}'")))?;
        let target = Utc::now()
            .checked_sub_signed(delta)
            .ok_or_else(|| LochistError::InvalidDate(format!("Duration overflow for '{input}'")))?;
        return Ok(target.with_timezone(&Utc.fix()));
    }

    // Fallback to a commit id from the log
    history
        .find_by_prefix(input)
        .map(|c| c.datetime)
        .ok_or_else(|| LochistError::InvalidDate(format!("Not a date or known commit: '{input}'")))
}

fn parse_natural_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();
    let body = if let Some(rest) = input.strip_suffix("ago") {
        rest.trim()
    } else if let Some(rest) = input.strip_prefix('-') {
        rest.trim()
    } else {
        return None;
    };
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    humantime::parse_duration(&compact).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_durations() {
        assert_eq!(parse_natural_duration("3 days ago"), Some(Duration::from_secs(3 * 86400)));
        assert_eq!(parse_natural_duration("-90d"), Some(Duration::from_secs(90 * 86400)));
        assert_eq!(parse_natural_duration("2weeks ago"), Some(Duration::from_secs(14 * 86400)));
        assert_eq!(parse_natural_duration("2024-01-01"), None);
        assert_eq!(parse_natural_duration("abc123"), None);
    }

    #[test]
    fn date_only_cutoff_covers_the_day() {
        let history = CommitHistory::default();
        let dt = parse_commit_or_date(&history, "2024-01-02").unwrap();
        assert_eq!(dt, DateTime::parse_from_rfc3339("2024-01-02T23:59:59.999Z").unwrap());
    }
}
