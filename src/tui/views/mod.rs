mod help;
mod scatter;
mod story;
mod summary;

pub use help::draw_help_overlay;
pub use scatter::draw_scatter_view;
pub use story::draw_story_view;
pub use summary::draw_summary_view;
