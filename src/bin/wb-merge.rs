use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use wb_merge::pipeline::{self, JobParams};
use wb_merge::{Client, YearRange};

#[derive(Parser, Debug)]
#[command(
    name = "wb-merge",
    version,
    about = "Fetch a World Bank indicator and merge it with a local country reference CSV"
)]
struct Cli {
    /// Indicator code (e.g., SP.POP.TOTL)
    #[arg(short, long, default_value = pipeline::DEFAULT_INDICATOR)]
    indicator: String,
    /// Inclusive year range as YYYY:YYYY
    #[arg(short = 'd', long, default_value = "2015:2024")]
    date: String,
    /// Local reference CSV of countries (arbitrary header accepted)
    #[arg(short = 'c', long, default_value = "all_countries.csv")]
    countries_file: PathBuf,
    /// Directory for raw/ and processed/ outputs
    #[arg(short, long, default_value = "data")]
    out_dir: PathBuf,
}

fn parse_years(s: &str) -> Option<YearRange> {
    let (a, b) = s.split_once(':')?;
    Some(YearRange::new(a.parse().ok()?, b.parse().ok()?))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let years = parse_years(&cli.date)
        .ok_or_else(|| anyhow::anyhow!("invalid --date, expected YYYY:YYYY"))?;

    let params = JobParams {
        indicator: cli.indicator,
        years,
        reference_csv: cli.countries_file,
        out_dir: cli.out_dir,
    };
    let summary = pipeline::run(&Client::default(), &params)?;

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
