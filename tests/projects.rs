use lochist::projects::{filter_by_year, latest, search, year_pie, Project};
use pretty_assertions::assert_eq;
use std::f64::consts::TAU;

fn project(title: &str, description: &str, year: &str) -> Project {
    Project {
        title: title.to_string(),
        image: format!("images/{}.png", title.to_lowercase().replace(' ', "-")),
        description: description.to_string(),
        year: year.to_string(),
    }
}

fn catalog() -> Vec<Project> {
    vec![
        project("Lab Notes", "Weekly writeups", "2024"),
        project("Bike Map", "Routes around the bay, drafted in 2023", "2022"),
        project("Portfolio", "This site", "2023"),
        project("Weather Bot", "Chat bot", "2023"),
        project("Shader Toy", "GLSL experiments", "2021"),
    ]
}

#[test]
fn search_matches_any_field_case_insensitively() {
    let projects = catalog();

    let hits: Vec<&str> = search(&projects, "2023").iter().map(|p| p.title.as_str()).collect();
    assert_eq!(hits, vec!["Bike Map", "Portfolio", "Weather Bot"]);

    let hits: Vec<&str> = search(&projects, "gLsL").iter().map(|p| p.title.as_str()).collect();
    assert_eq!(hits, vec!["Shader Toy"]);

    // image paths are fields too
    assert_eq!(search(&projects, "weather-bot.png").len(), 1);
    assert_eq!(search(&projects, "").len(), projects.len());
    assert!(search(&projects, "nothing like this").is_empty());
}

#[test]
fn pie_resums_to_the_filtered_count() {
    let projects = catalog();
    let matched = search(&projects, "2023");
    let pie = year_pie(&matched);

    let total: usize = pie.iter().map(|s| s.value).sum();
    assert_eq!(total, matched.len());

    let labels: Vec<(&str, usize)> = pie.iter().map(|s| (s.label.as_str(), s.value)).collect();
    assert_eq!(labels, vec![("2022", 1), ("2023", 2)]);

    assert_eq!(pie[0].start_angle, 0.0);
    assert!((pie.last().unwrap().end_angle - TAU).abs() < 1e-9);
    assert_eq!(pie[0].end_angle, pie[1].start_angle);
}

#[test]
fn empty_selection_gives_empty_pie() {
    let pie = year_pie(&[]);
    assert!(pie.is_empty());
}

#[test]
fn year_filter_and_latest() {
    let projects = catalog();
    let all: Vec<&Project> = projects.iter().collect();
    let in_2023: Vec<&str> = filter_by_year(&all, "2023").iter().map(|p| p.title.as_str()).collect();
    assert_eq!(in_2023, vec!["Portfolio", "Weather Bot"]);

    assert_eq!(latest(&projects, 3).len(), 3);
    assert_eq!(latest(&projects, 3)[0].title, "Lab Notes");
    assert_eq!(latest(&projects, 10).len(), projects.len());
}
