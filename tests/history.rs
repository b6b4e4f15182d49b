use chrono::DateTime;
use lochist::history::{
    brushed, file_breakdown, group_commits, language_breakdown, parse_records, summarize, up_to, BrushRect,
    LoadOptions, PlotArea, Projection,
};
use lochist::model::{CommitSummary, Period};
use pretty_assertions::assert_eq;

const EXAMPLE: &str = "\
commit,file,datetime
a,x.js,2024-01-01T09:00
a,y.js,2024-01-01T09:00
b,x.js,2024-01-02T18:00
";

const LOG: &str = "\
commit,file,type,line,depth,length,author,date,time,timezone,datetime
c1,index.html,html,1,0,15,ana,2024-02-01,09:15:00,-08:00,2024-02-01T09:15:00-08:00
c1,index.html,html,2,1,30,ana,2024-02-01,09:15:00,-08:00,2024-02-01T09:15:00-08:00
c1,style.css,css,1,0,12,ana,2024-02-01,09:15:00,-08:00,2024-02-01T09:15:00-08:00
c2,global.js,js,1,0,40,ana,2024-02-03,13:40:00,-08:00,2024-02-03T13:40:00-08:00
c2,global.js,js,2,1,22,ana,2024-02-03,13:40:00,-08:00,2024-02-03T13:40:00-08:00
c2,index.html,html,3,1,8,ana,2024-02-03,13:40:00,-08:00,2024-02-03T13:40:00-08:00
c3,global.js,js,3,1,18,ana,2024-02-03,22:05:00,-08:00,2024-02-03T22:05:00-08:00
c4,README.md,md,1,0,60,ana,2024-02-10,23:30:00,-08:00,2024-02-10T23:30:00-08:00
c4,global.js,js,4,2,10,ana,2024-02-10,23:30:00,-08:00,2024-02-10T23:30:00-08:00
";

fn load(csv: &str) -> lochist::history::CommitHistory {
    group_commits(parse_records(csv.as_bytes(), LoadOptions::default()).unwrap())
}

fn ts(s: &str) -> DateTime<chrono::FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

#[test]
fn worked_example_groups_two_commits() {
    let history = load(EXAMPLE);
    let commits = history.commits();

    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].id, "a");
    assert_eq!(commits[0].total_lines, 2);
    assert_eq!(commits[0].hour_frac, 9.0);
    assert_eq!(commits[1].id, "b");
    assert_eq!(commits[1].total_lines, 1);
    assert_eq!(commits[1].hour_frac, 18.0);

    let all: Vec<&CommitSummary> = commits.iter().collect();
    let summary = summarize(&history, &all);
    assert_eq!(summary.commits, 2);
    assert_eq!(summary.files, 2);
    assert_eq!(summary.total_lines, 3);
    assert_eq!(summary.days_worked, 2);
    // Morning and Evening tie at one commit each; Morning was seen first.
    assert_eq!(summary.most_active_period, Some(Period::Morning));
    assert_eq!(summary.avg_file_length, 2);
}

#[test]
fn tie_goes_to_first_encountered_period() {
    let history = load(EXAMPLE);
    let reversed: Vec<&CommitSummary> = history.commits().iter().rev().collect();
    let summary = summarize(&history, &reversed);
    assert_eq!(summary.most_active_period, Some(Period::Evening));
}

#[test]
fn line_counts_are_conserved() {
    let history = load(LOG);
    let total: usize = history.commits().iter().map(|c| c.total_lines).sum();
    assert_eq!(total, history.records().len());
    for c in history.commits() {
        assert_eq!(c.total_lines, history.lines_of(&c.id).count());
        assert!((0.0..24.0).contains(&c.hour_frac));
    }
}

#[test]
fn grouping_keeps_first_occurrence_order() {
    let csv = "\
commit,file,datetime
z,a.rs,2024-03-02T10:00:00Z
y,b.rs,2024-03-01T10:00:00Z
z,c.rs,2024-03-02T10:00:00Z
";
    let history = load(csv);
    let ids: Vec<&str> = history.commits().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["z", "y"]);

    let chrono_ids: Vec<&str> = history.chronological().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(chrono_ids, vec!["y", "z"]);
}

#[test]
fn first_record_wins_and_disagreement_is_reported() {
    let csv = "\
commit,file,author,datetime
a,x.rs,ana,2024-03-01T10:00:00Z
a,y.rs,bo,2024-03-01T11:00:00Z
b,x.rs,ana,2024-03-02T10:00:00Z
";
    let history = load(csv);
    let a = history.commit("a").unwrap();
    assert_eq!(a.author, "ana");
    assert_eq!(a.hour_frac, 10.0);
    assert_eq!(history.inconsistent_commits(), &["a".to_string()]);
}

#[test]
fn cutoff_is_inclusive_and_monotonic() {
    let history = load(LOG);
    let commits = history.commits();

    assert!(up_to(commits, &ts("2024-01-01T00:00:00Z")).is_empty());
    assert_eq!(up_to(commits, &ts("2024-02-01T09:15:00-08:00")).len(), 1);

    let cutoffs = [
        "2024-01-31T00:00:00Z",
        "2024-02-02T00:00:00Z",
        "2024-02-03T13:40:00-08:00",
        "2024-02-04T12:00:00Z",
        "2024-03-01T00:00:00Z",
    ];
    let mut previous: Vec<String> = Vec::new();
    for c in cutoffs {
        let ids: Vec<String> = up_to(commits, &ts(c)).iter().map(|c| c.id.clone()).collect();
        assert!(previous.iter().all(|id| ids.contains(id)), "cutoff {c} dropped a commit");
        previous = ids;
    }
    assert_eq!(previous.len(), commits.len());
}

#[test]
fn empty_brush_selects_nothing_and_full_canvas_selects_all() {
    let history = load(LOG);
    let area = PlotArea::default();
    let projection = Projection::for_commits(history.commits(), area).unwrap();

    assert!(brushed(history.commits(), None, &projection).is_empty());

    let full = BrushRect::new((0.0, 0.0), (area.width, area.height));
    assert_eq!(brushed(history.commits(), Some(&full), &projection).len(), history.len());
}

#[test]
fn brush_edges_are_inclusive() {
    let history = load(LOG);
    let projection = Projection::for_commits(history.commits(), PlotArea::default()).unwrap();
    let first = &history.commits()[0];
    let (x, y) = projection.project(first);

    // Zero-area rectangle exactly on the point, corners given in reverse.
    let rect = BrushRect::new((x, y), (x, y));
    let hit = brushed(history.commits(), Some(&rect), &projection);
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].id, first.id);
}

#[test]
fn summary_over_a_subset_only_counts_its_records() {
    let history = load(LOG);
    let subset: Vec<&CommitSummary> = up_to(history.commits(), &ts("2024-02-03T23:59:00-08:00"));
    let summary = summarize(&history, &subset);

    assert_eq!(summary.commits, 3);
    assert_eq!(summary.total_lines, 7);
    assert_eq!(summary.files, 3);
    assert_eq!(summary.days_worked, 2);
    assert_eq!(summary.avg_file_length, 2);
    assert_eq!(summary.most_active_period, Some(Period::Morning));
}

#[test]
fn average_file_length_rounds_and_handles_empty() {
    let history = load(LOG);
    let all: Vec<&CommitSummary> = history.commits().iter().collect();
    let summary = summarize(&history, &all);
    // 9 lines over 4 files
    assert_eq!(summary.avg_file_length, (9.0f64 / 4.0).round() as usize);

    let none = summarize(&history, &[]);
    assert_eq!(none.files, 0);
    assert_eq!(none.avg_file_length, 0);
    assert_eq!(none.most_active_period, None);
}

#[test]
fn night_bucket_wraps_midnight() {
    assert_eq!(Period::from_hour(4), Period::Night);
    assert_eq!(Period::from_hour(5), Period::Morning);
    assert_eq!(Period::from_hour(11), Period::Morning);
    assert_eq!(Period::from_hour(12), Period::Afternoon);
    assert_eq!(Period::from_hour(17), Period::Evening);
    assert_eq!(Period::from_hour(20), Period::Evening);
    assert_eq!(Period::from_hour(21), Period::Night);
}

#[test]
fn language_and_file_breakdowns() {
    let history = load(LOG);
    let all: Vec<&CommitSummary> = history.commits().iter().collect();

    let languages: Vec<(String, usize)> = language_breakdown(&history, &all)
        .into_iter()
        .map(|l| (l.kind, l.lines))
        .collect();
    assert_eq!(
        languages,
        vec![
            ("js".to_string(), 4),
            ("html".to_string(), 3),
            ("css".to_string(), 1),
            ("md".to_string(), 1),
        ]
    );

    let files = file_breakdown(&history, &all);
    assert_eq!(files[0].file, "global.js");
    assert_eq!(files[0].lines, 4);
    assert_eq!(files[0].commits, 3);
}

#[test]
fn malformed_rows_fail_or_are_skipped() {
    let csv = "\
commit,file,datetime
a,x.rs,2024-03-01T10:00:00Z
b,y.rs,not a date
";
    let err = parse_records(csv.as_bytes(), LoadOptions::default()).unwrap_err();
    assert!(err.to_string().contains("row 2"), "{err}");

    let records = parse_records(csv.as_bytes(), LoadOptions { skip_invalid: true }).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn missing_required_column_is_reported() {
    let csv = "commit,file\na,x.rs\n";
    let err = parse_records(csv.as_bytes(), LoadOptions::default()).unwrap_err();
    assert!(err.to_string().contains("datetime"), "{err}");
}

#[test]
fn commit_prefix_lookup_requires_uniqueness() {
    let csv = "\
commit,file,datetime
abc123,x.rs,2024-03-01T10:00:00Z
abd456,y.rs,2024-03-02T10:00:00Z
";
    let history = load(csv);
    assert_eq!(history.find_by_prefix("abc").map(|c| c.id.as_str()), Some("abc123"));
    assert!(history.find_by_prefix("ab").is_none());
    assert!(history.find_by_prefix("zz").is_none());
}
