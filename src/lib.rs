pub mod cache;
pub mod cli;
pub mod commits;
pub mod error;
pub mod history;
pub mod model;
pub mod projects;
pub mod stats;
pub mod story;
pub mod tui;
pub mod view;
