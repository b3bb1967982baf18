mod util;

use clap::{Args, Parser, Subcommand};
use name_dedup::{find_exact_duplicates, find_fuzzy_duplicates, profile_missing};
use name_dedup::{ExactConfig, FuzzyConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Duplicate detection for person-name tables")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct CommonArgs {
    /// Input CSV file with a header row.
    input: PathBuf,

    /// Column holding given names.
    #[arg(long, default_value = "FirstName")]
    given_name_field: String,

    /// Column holding surnames.
    #[arg(long, default_value = "Surname")]
    surname_field: String,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Emit pretty JSON instead of CSV.
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Report groups of records sharing a literal (given name, surname) pair.
    Exact {
        #[command(flatten)]
        common: CommonArgs,

        /// Minimum group size to report.
        #[arg(long, default_value_t = 2)]
        min_count: usize,

        /// Keep first-appearance order instead of sorting by count.
        #[arg(long)]
        no_sort: bool,
    },
    /// Report pairs of records with approximately matching full names.
    Fuzzy {
        #[command(flatten)]
        common: CommonArgs,

        /// Minimum similarity score (0-100) to report a pair.
        #[arg(long, default_value_t = 90)]
        score_cutoff: u8,
    },
    /// Summarize missing values per column.
    Profile {
        /// Input CSV file with a header row.
        input: PathBuf,

        /// Write the report to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Emit pretty JSON instead of CSV.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_env("NAME_DEDUP_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match Cli::parse().command {
        Command::Exact {
            common,
            min_count,
            no_sort,
        } => exact(common, min_count, no_sort),
        Command::Fuzzy {
            common,
            score_cutoff,
        } => fuzzy(common, score_cutoff),
        Command::Profile {
            input,
            output,
            json,
        } => profile(input, output, json),
    }
}

fn exact(common: CommonArgs, min_count: usize, no_sort: bool) -> anyhow::Result<()> {
    let config = ExactConfig {
        given_name_field: common.given_name_field,
        surname_field: common.surname_field,
        min_count,
        sort_descending: !no_sort,
    };
    let start = Instant::now();
    let table = util::read_table(&common.input)?;
    info!(
        rows = table.len(),
        "loaded input in {:.4} secs",
        start.elapsed().as_secs_f64()
    );
    let start = Instant::now();
    let groups = find_exact_duplicates(&table, &config)?;
    info!(
        groups = groups.len(),
        "grouping completed in {:.4} secs",
        start.elapsed().as_secs_f64()
    );
    util::write_exact_report(&groups, &config, common.output.as_deref(), common.json)
}

fn fuzzy(common: CommonArgs, score_cutoff: u8) -> anyhow::Result<()> {
    let config = FuzzyConfig {
        given_name_field: common.given_name_field,
        surname_field: common.surname_field,
        score_cutoff,
    };
    let start = Instant::now();
    let table = util::read_table(&common.input)?;
    info!(
        rows = table.len(),
        "loaded input in {:.4} secs",
        start.elapsed().as_secs_f64()
    );
    let start = Instant::now();
    let pairs = find_fuzzy_duplicates(&table, &config)?;
    info!(
        pairs = pairs.len(),
        "pairwise scan completed in {:.4} secs",
        start.elapsed().as_secs_f64()
    );
    util::write_fuzzy_report(&pairs, &config, common.output.as_deref(), common.json)
}

fn profile(input: PathBuf, output: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let table = util::read_table(&input)?;
    info!(
        rows = table.len(),
        "loaded input in {:.4} secs",
        start.elapsed().as_secs_f64()
    );
    let profiles = profile_missing(&table);
    util::write_profile_report(&profiles, output.as_deref(), json)
}
