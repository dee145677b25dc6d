use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use analyze_form::config::AppConfig;
use analyze_form::form::fields::FormFields;
use analyze_form::form::FormController;
use analyze_form::render::{ConsoleView, FileWindowOpener};
use analyze_form::transport::HttpTransport;
use analyze_form::utils;

#[derive(Parser)]
#[command(
    name = "analyze-form",
    about = "Submit a moving-average crossover analysis and open the result",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Fill in the form, submit it once and write the returned document
    Analyze {
        /// Ticker symbol (upper-cased as typed)
        ticker: String,

        /// End date, YYYY-MM-DD (default: today)
        #[arg(long, conflicts_with = "no_end_date")]
        end_date: Option<String>,

        /// Clear the end date so the server picks its own
        #[arg(long)]
        no_end_date: bool,

        /// Lookback window in days (values below 1 become 1)
        #[arg(long, allow_hyphen_values = true)]
        lookback_days: Option<String>,

        /// Crossover window in days (values below 1 become 1)
        #[arg(long, allow_hyphen_values = true)]
        crossover_days: Option<String>,
    },

    /// Print the default end date
    Today,

    /// Print the effective configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "analyze_form=info,warn",
        1 => "analyze_form=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;

    match cli.command {
        Command::Analyze {
            ticker,
            end_date,
            no_end_date,
            lookback_days,
            crossover_days,
        } => {
            let transport = Arc::new(HttpTransport::new(&config.client)?);
            info!("Endpoint: {}", transport.url());

            let mut form = FormController::new(
                FormFields::new(config.form.lookback_days, config.form.crossover_days),
                ConsoleView::new(std::io::stderr()),
                FileWindowOpener::new(&config.output),
                transport,
            );
            form.on_load(utils::local_today());

            // Arguments go through the same keystroke filters as typed input.
            let fields = form.fields_mut();
            fields.on_ticker_input(&ticker);
            if no_end_date {
                fields.on_end_date_input("");
            } else if let Some(d) = end_date {
                fields.on_end_date_input(&d);
            }
            if let Some(v) = lookback_days {
                fields.on_lookback_input(&v);
            }
            if let Some(v) = crossover_days {
                fields.on_crossover_input(&v);
            }

            if form.submit().await.is_err() {
                // Already shown by the view.
                return Ok(ExitCode::FAILURE);
            }

            if let Some(path) = form.opener().opened().pop() {
                println!("{}", path.display());
            }
        }

        Command::Today => {
            println!("{}", utils::local_today().format("%Y-%m-%d"));
        }

        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
