use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lochist")]
#[command(about = "Coding history analysis for line-of-code edit logs and portfolio projects")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, env = "LOCHIST_LOG", default_value = "loc.csv", help = "Path to the line-of-code edit log (CSV)")]
    pub log: PathBuf,

    #[arg(long, help = "Directory for the cache database")]
    pub cache: Option<PathBuf>,

    #[arg(long, help = "Parse the log directly without the cache", default_value_t = false)]
    pub no_cache: bool,

    #[arg(long, help = "Skip malformed rows instead of failing", default_value_t = false)]
    pub skip_invalid: bool,

    #[arg(
        long,
        conflicts_with = "slider",
        help = "Only commits up to this point (RFC3339, YYYY-MM-DD, '3 days ago', or commit id)"
    )]
    pub until: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100), help = "Cutoff as a position on the 0-100 time slider")]
    pub slider: Option<u8>,

    #[arg(
        long,
        env = "LOCHIST_COMMIT_URL",
        help = "Link template for commits, e.g. https://github.com/owner/repo/commit/{id}"
    )]
    pub commit_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    Commits {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    Summary {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    Files {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, default_value_t = 50, help = "Rows shown in the table")]
        limit: usize,
    },
    Brush {
        #[arg(long, allow_negative_numbers = true, help = "First corner x (pixels on the 1000x600 plot)")]
        x0: f64,

        #[arg(long, allow_negative_numbers = true, help = "First corner y")]
        y0: f64,

        #[arg(long, allow_negative_numbers = true, help = "Second corner x")]
        x1: f64,

        #[arg(long, allow_negative_numbers = true, help = "Second corner y")]
        y1: f64,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    Story {
        #[arg(long, help = "Step to enter (0-based); prints the summary at its cutoff")]
        step: Option<usize>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    Projects {
        #[arg(long, default_value = "lib/projects.json", help = "Path to the project list (JSON)")]
        path: PathBuf,

        #[arg(long, short, help = "Case-insensitive search across all fields")]
        query: Option<String>,

        #[arg(long, help = "Only projects from this year (pie slice)")]
        year: Option<String>,

        #[arg(long, conflicts_with = "home", help = "Only the first N projects")]
        latest: Option<usize>,

        #[arg(long, help = "Only the projects shown on the home page")]
        home: bool,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    #[command(alias = "tui", alias = "ui")]
    Interactive,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Commits { json, ndjson } => crate::commits::exec(self.common, json, ndjson),
            Commands::Summary { json, ndjson } => crate::stats::exec_summary(self.common, json, ndjson),
            Commands::Files { json, ndjson, limit } => crate::stats::exec_files(self.common, json, ndjson, limit),
            Commands::Brush { x0, y0, x1, y1, json } => {
                crate::commits::exec_brush(self.common, [x0, y0, x1, y1], json)
            }
            Commands::Story { step, json } => crate::story::exec(self.common, step, json),
            Commands::Projects { path, query, year, latest, home, json } => {
                let latest = if home { Some(crate::projects::LATEST_COUNT) } else { latest };
                crate::projects::exec(&path, query, year, latest, json)
            }
            Commands::Interactive => crate::tui::run(&self.common).map_err(|e| anyhow::anyhow!(e)),
        }
    }
}
