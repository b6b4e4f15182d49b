use lochist::cache::Cache;
use lochist::error::LochistError;
use lochist::history::LoadOptions;
use pretty_assertions::assert_eq;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const CLEAN: &str = "\
commit,file,datetime
c1,a.js,2024-05-01T08:00:00Z
c2,b.js,2024-05-03T14:00:00Z
";

const ONE_BAD_ROW: &str = "\
commit,file,datetime
c1,a.js,2024-05-01T08:00:00Z
c2,b.js,not a date
";

fn write_log(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("loc.csv");
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    path
}

const STRICT: LoadOptions = LoadOptions { skip_invalid: false };
const LENIENT: LoadOptions = LoadOptions { skip_invalid: true };

#[test]
fn lenient_snapshot_does_not_satisfy_a_strict_load() {
    let dir = tempdir().unwrap();
    let log = write_log(dir.path(), ONE_BAD_ROW);
    let mut cache = Cache::new(Some(dir.path().join("cache")), &log).unwrap();

    let lenient = cache.load_records(&log, LENIENT).unwrap();
    assert_eq!(lenient.len(), 1);

    let strict = cache.load_records(&log, STRICT);
    assert!(matches!(strict, Err(LochistError::Record { row: 2, .. })), "{strict:?}");

    // the partial snapshot still serves lenient loads
    assert_eq!(cache.load_records(&log, LENIENT).unwrap().len(), 1);
}

#[test]
fn complete_snapshot_serves_both_modes() {
    let dir = tempdir().unwrap();
    let log = write_log(dir.path(), CLEAN);
    let mut cache = Cache::new(Some(dir.path().join("cache")), &log).unwrap();

    let strict = cache.load_records(&log, STRICT).unwrap();
    let lenient = cache.load_records(&log, LENIENT).unwrap();
    assert_eq!(strict, lenient);
    assert_eq!(strict.len(), 2);
}

#[test]
fn stale_fingerprint_replaces_the_snapshot() {
    let dir = tempdir().unwrap();
    let log = write_log(dir.path(), CLEAN);
    let cache_dir = dir.path().join("cache");

    let mut cache = Cache::new(Some(&cache_dir), &log).unwrap();
    assert_eq!(cache.load_records(&log, STRICT).unwrap().len(), 2);

    let mut f = OpenOptions::new().append(true).open(&log).unwrap();
    f.write_all(b"c3,c.js,2024-05-05T20:30:00Z\n").unwrap();
    f.sync_all().unwrap();
    drop(f);

    let mut reopened = Cache::new(Some(&cache_dir), &log).unwrap();
    let records = reopened.load_records(&log, STRICT).unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.commit.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2", "c3"]);
}

#[test]
fn cached_records_keep_row_order_and_fields() {
    let dir = tempdir().unwrap();
    let log = write_log(dir.path(), CLEAN);
    let mut cache = Cache::new(Some(dir.path().join("cache")), &log).unwrap();

    let fresh = cache.load_records(&log, STRICT).unwrap();
    let cached = cache.load_records(&log, STRICT).unwrap();
    assert_eq!(fresh, cached);
}
