mod config;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chartlet_chart::ChartKind;
use chartlet_data::{load_csv, CsvOptions};
use clap::{Args, Parser, Subcommand};
use log::{error, info};

use crate::config::{ChartConfig, Overrides};

/// Compute chart geometry from a CSV file and print it as JSON
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with per-chart settings; flags take precedence
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write the geometry here instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Time series line chart (date x, numeric y)
    Line(ChartArgs),

    /// Scatter plot of two numeric fields, optionally colored by a third
    Scatter(ChartArgs),

    /// Histogram of one numeric field
    Histogram(ChartArgs),
}

#[derive(Args)]
struct ChartArgs {
    /// Path to the CSV file
    csv: PathBuf,

    /// Field on the x axis (the binned field for histograms)
    #[arg(long)]
    x: Option<String>,

    #[arg(long)]
    y: Option<String>,

    /// Numeric field mapped to point color
    #[arg(long)]
    color: Option<String>,

    /// Number of histogram bins
    #[arg(long)]
    bins: Option<usize>,

    #[arg(long)]
    width: Option<f64>,

    #[arg(long)]
    height: Option<f64>,

    #[arg(long)]
    x_title: Option<String>,

    #[arg(long)]
    y_title: Option<String>,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,
}

impl ChartArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            x: self.x.clone(),
            y: self.y.clone(),
            color: self.color.clone(),
            bins: self.bins,
            width: self.width,
            height: self.height,
            x_title: self.x_title.clone(),
            y_title: self.y_title.clone(),
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let (kind, args) = match &cli.command {
        Commands::Line(args) => (ChartKind::Line, args),
        Commands::Scatter(args) => (ChartKind::Scatter, args),
        Commands::Histogram(args) => (ChartKind::Histogram, args),
    };

    let mut config = match &cli.config {
        Some(path) => ChartConfig::from_file(path)?,
        None => ChartConfig::default(),
    };
    config.apply(kind, args.overrides());

    let delimiter = u8::try_from(args.delimiter)
        .with_context(|| format!("Delimiter {:?} is not a single byte", args.delimiter))?;
    let dataset = load_csv(&args.csv, &CsvOptions::default().with_delimiter(delimiter))
        .with_context(|| format!("Failed to load {}", args.csv.display()))?;
    info!("Loaded {} records from {}", dataset.len(), args.csv.display());

    let geometry = config
        .chart(kind)
        .build(&dataset)
        .with_context(|| format!("Failed to build {kind} chart"))?;
    let json = serde_json::to_string_pretty(&geometry)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {kind} geometry to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("{err:#}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
