use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use retireplan::{init_logging, load_user_data};
use retireplan_core::date_math::MonthStamp;
use retireplan_core::{ProjectionOptions, compare_scenarios, project};

#[derive(Parser, Debug)]
#[command(name = "retireplan")]
#[command(about = "Month-by-month retirement savings and depletion projections")]
struct Args {
    /// UserData document (.json, .yaml or .yml); repeat to compare scenarios
    #[arg(short, long, required = true)]
    input: Vec<PathBuf>,

    /// Month of simulation month 0, as YYYY-MM (default: the current month)
    #[arg(short, long)]
    anchor: Option<MonthStamp>,

    /// Print the full projection with monthly series and ledger
    #[arg(short, long)]
    series: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let _guard = init_logging(&args.log_level, args.log_file.as_deref())?;

    let anchor = args
        .anchor
        .unwrap_or_else(|| MonthStamp::from(jiff::Zoned::now().date()));
    let options = ProjectionOptions::anchored(anchor).with_series(args.series);
    tracing::info!(%anchor, inputs = args.input.len(), "Starting projection");

    let scenarios = args
        .input
        .iter()
        .map(|path| load_user_data(path))
        .collect::<color_eyre::Result<Vec<_>>>()?;

    let output = if let [data] = scenarios.as_slice() {
        let projection = project(data, &options)?;
        if args.series {
            serde_json::to_string_pretty(&projection)?
        } else {
            serde_json::to_string_pretty(&projection.result)?
        }
    } else {
        let results = compare_scenarios(&scenarios, &options)
            .into_iter()
            .zip(&args.input)
            .map(|(result, path)| result.map_err(|e| eyre!("{}: {e}", path.display())))
            .collect::<color_eyre::Result<Vec<_>>>()?;
        serde_json::to_string_pretty(&results).wrap_err("failed to serialize results")?
    };

    println!("{output}");
    Ok(())
}
