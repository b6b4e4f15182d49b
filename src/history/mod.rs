pub mod aggregate;
pub mod fetch;
pub mod filter;
pub mod load;
pub mod scale;
pub mod summary;

pub use aggregate::{group_commits, CommitHistory};
pub use fetch::{fetch_history, resolve_cutoff};
pub use filter::{apply, brushed, up_to, BrushRect, Selection};
pub use load::{load_log, load_records, parse_log, parse_records, LoadOptions, ParsedLog};
pub use scale::{LinearScale, PlotArea, Projection, SliderScale, TimeScale};
pub use summary::{file_breakdown, files_touched, language_breakdown, most_active_period, summarize};
