use anyhow::{Context, Result};
use autochart::data::csv_to_records_json;
use autochart::logging::{init_logging, LogConfig};
use autochart::{generate_chart_spec_with, process_data_with, ChartOptions};
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "autochart")]
#[command(about = "Infer a Vega-Lite chart from tabular JSON or CSV read on stdin", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Read CSV from stdin instead of JSON
    #[arg(long, global = true)]
    csv: bool,

    /// JSON file with chart options (width, height, colors, ...)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long, global = true)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a chart from a free-text description (e.g. "compare sales vs volume by region")
    Chart {
        description: String,
    },
    /// Analyze the data: auto, visualize, summarize, format, or chart:<line|bar|scatter|pie>
    Process {
        #[arg(long, short, default_value = "auto")]
        mode: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&LogConfig::from_verbosity(args.verbose))?;

    let options = match &args.config {
        Some(path) => ChartOptions::from_file(path)?,
        None => ChartOptions::default(),
    };

    // Read data from stdin
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read data from stdin")?;
    let data = if args.csv {
        csv_to_records_json(input.as_bytes()).context("Failed to read CSV from stdin")?
    } else {
        input
    };

    let output = match &args.command {
        Commands::Chart { description } => generate_chart_spec_with(description, &data, &options),
        Commands::Process { mode } => process_data_with(&data, mode, &options),
    };

    let output = if args.pretty {
        let value: serde_json::Value =
            serde_json::from_str(&output).context("Failed to re-read output JSON")?;
        serde_json::to_string_pretty(&value).context("Failed to format output JSON")?
    } else {
        output
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", output).context("Failed to write JSON to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
