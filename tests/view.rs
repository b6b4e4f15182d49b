use lochist::history::{group_commits, parse_records, LoadOptions, PlotArea, Selection};
use lochist::story::{build_steps, cutoff_for_step, step_at, summary_at_step};
use lochist::view::ViewState;
use pretty_assertions::assert_eq;

const LOG: &str = "\
commit,file,datetime
c2,b.js,2024-05-03T14:00:00Z
c1,a.js,2024-05-01T08:00:00Z
c1,b.js,2024-05-01T08:00:00Z
c3,a.js,2024-05-05T20:30:00Z
";

fn history() -> lochist::history::CommitHistory {
    group_commits(parse_records(LOG.as_bytes(), LoadOptions::default()).unwrap())
}

#[test]
fn steps_follow_chronological_order() {
    let history = history();
    let steps = build_steps(&history);

    let ids: Vec<&str> = steps.iter().map(|s| s.commit_id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2", "c3"]);
    assert!(steps[0].text.contains("my first commit, and it was glorious"));
    assert!(steps[1].text.contains("another glorious commit"));
    assert_eq!(steps[0].lines, 2);
    assert_eq!(steps[0].files, 2);

    assert_eq!(cutoff_for_step(&steps, 1), Some(steps[1].datetime));
    assert_eq!(cutoff_for_step(&steps, 9), None);
    assert_eq!(summary_at_step(&history, &steps, 1).map(|s| s.commits), Some(2));
}

#[test]
fn slider_end_shows_everything_and_start_shows_first() {
    let history = history();
    let view = ViewState::new(&history, PlotArea::default());
    assert_eq!(view.visible(&history).len(), 3);
    assert!(view.selected(&history).is_empty());

    let at_end = view.with_slider(100);
    assert_eq!(at_end.visible(&history).len(), 3);

    let at_start = view.with_slider(0);
    let ids: Vec<&str> = at_start.visible(&history).iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1"]);

    assert_eq!(at_start.nudge_slider(-5).slider, 0);
    assert_eq!(at_start.nudge_slider(150).slider, 100);
}

#[test]
fn brush_over_the_whole_canvas_selects_all() {
    let history = history();
    let area = PlotArea::default();
    let view = ViewState::new(&history, area)
        .move_cursor(-5000.0, -5000.0)
        .begin_brush()
        .move_cursor(5000.0, 5000.0)
        .finish_brush();

    assert!(!view.is_brushing());
    assert_eq!(view.cursor, (area.width, area.height));
    assert_eq!(view.selected(&history).len(), 3);
    // brushing never hides points
    assert_eq!(view.visible(&history).len(), 3);

    let cleared = view.clear_selection();
    assert_eq!(cleared.selection, Selection::None);
    assert!(cleared.selected(&history).is_empty());
}

#[test]
fn entering_a_step_replaces_a_brush_with_its_cutoff() {
    let history = history();
    let steps = build_steps(&history);
    let view = ViewState::new(&history, PlotArea::default())
        .begin_brush()
        .enter_step(1, &steps);

    assert_eq!(view.step, Some(1));
    assert_eq!(view.selection, Selection::Cutoff(steps[1].datetime));
    assert!(!view.is_brushing());
    assert_eq!(view.visible(&history).len(), 2);
    assert!(view.selected(&history).is_empty());
}

#[test]
fn hover_finds_the_nearest_commit() {
    let history = history();
    let view = ViewState::new(&history, PlotArea::default());
    let projection = view.projection.unwrap();
    let target = history.commit("c2").unwrap();
    let (x, y) = projection.project(target);

    let mut at = view;
    at.cursor = (x + 3.0, y - 4.0);
    assert_eq!(at.hovered(&history, 15.0).map(|c| c.id.as_str()), Some("c2"));

    at.cursor = (x + 40.0, y + 40.0);
    assert!(at.hovered(&history, 15.0).map(|c| c.id.as_str()) != Some("c2"));
}

#[test]
fn starting_cutoff_parks_the_slider_and_picks_a_step() {
    let history = history();
    let steps = build_steps(&history);
    let c2 = history.commit("c2").unwrap().datetime;

    let view = ViewState::new(&history, PlotArea::default()).with_cutoff(c2);
    assert_eq!(view.selection, Selection::Cutoff(c2));
    assert_eq!(view.visible(&history).len(), 2);
    assert!(view.slider > 0 && view.slider < 100);

    assert_eq!(step_at(&steps, &c2), Some(1));
    let before_first = steps[0].datetime - chrono::Duration::hours(1);
    assert_eq!(step_at(&steps, &before_first), None);
}
