use clap::{Parser, Subcommand};
use ohlcv_pipeline::cli::params::build_request;
use ohlcv_pipeline::io::{export, render};
use ohlcv_pipeline::models::period::Period;
use ohlcv_pipeline::pipeline::{self, ranking};
use ohlcv_pipeline::providers::Source;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch history and print the metrics table
    Fetch {
        /// Ticker symbol (e.g. "AAPL", "GGAL.BA")
        #[arg(long)]
        symbol: String,

        /// Start date, YYYY-MM-DD (inclusive, 1980-01-01 or later)
        #[arg(long)]
        start: String,

        /// End date, YYYY-MM-DD (inclusive)
        #[arg(short, long)]
        end: String,

        /// Data source: yahoo or broker
        #[arg(long, default_value = "yahoo")]
        source: String,

        /// Sampling period: daily, weekly or monthly
        #[arg(long, default_value = "daily")]
        period: String,

        /// Also write the report as CSV to the temp directory and print the path
        #[arg(long)]
        export: bool,
    },

    /// Rank the most volatile days by intraday range
    Rank {
        /// Ticker symbol (e.g. "AAPL", "GGAL.BA")
        #[arg(long)]
        symbol: String,

        /// Start date, YYYY-MM-DD (inclusive, 1980-01-01 or later)
        #[arg(long)]
        start: String,

        /// End date, YYYY-MM-DD (inclusive)
        #[arg(short, long)]
        end: String,

        /// Data source: yahoo or broker
        #[arg(long, default_value = "yahoo")]
        source: String,

        /// How many days to rank
        #[arg(long, default_value_t = ranking::DEFAULT_TOP_N)]
        top: usize,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(code) = run(cli).await {
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<(), i32> {
    match cli.command {
        Commands::Fetch {
            symbol,
            start,
            end,
            source,
            period,
            export: export_csv,
        } => {
            let request = build_request(&symbol, &start, &end).map_err(fail)?;
            let period = Period::parse(&period).map_err(fail)?;
            let provider = Source::parse(&source)
                .map_err(fail)?
                .provider()
                .map_err(fail)?;

            let report = match pipeline::run(provider.as_ref(), &request, period).await {
                Ok(report) => report,
                Err(e) if e.is_informational() => {
                    println!("{e}");
                    return Ok(());
                }
                Err(e) => return Err(fail(e)),
            };

            print!("{}", render::render_table(&report));

            if export_csv {
                let path = export::write_report_to_temp(&report, &request.symbol).map_err(fail)?;
                // Path on its own line so scripts can capture it.
                println!("{}", path.display());
            }
        }

        Commands::Rank {
            symbol,
            start,
            end,
            source,
            top,
        } => {
            let request = build_request(&symbol, &start, &end).map_err(fail)?;
            let provider = Source::parse(&source)
                .map_err(fail)?
                .provider()
                .map_err(fail)?;

            let report = match pipeline::run(provider.as_ref(), &request, Period::Daily).await {
                Ok(report) => report,
                Err(e) if e.is_informational() => {
                    println!("{e}");
                    return Ok(());
                }
                Err(e) => return Err(fail(e)),
            };

            let ranked = ranking::top_volatile(&report, top);
            print!("{}", render::render_ranking(&request.symbol, &ranked));
        }
    }

    Ok(())
}

fn fail(error: impl std::fmt::Display) -> i32 {
    log::error!("{error}");
    eprintln!("ERROR: {error}");
    1
}
