use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use paye_engine::api::{AppState, CalculationRequest, CalculationResponse, create_router};
use paye_engine::config::{ConfigLoader, TaxSchedule};
use paye_engine::models::{CalculationOptions, Period};

/// Nigerian PAYE take-home pay engine.
#[derive(Parser, Debug)]
#[command(name = "paye-engine")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API
    Serve {
        /// Schedule directory containing schedule.yaml, brackets.yaml and rates.yaml
        #[arg(short, long, env = "PAYE_CONFIG_DIR")]
        config: Option<PathBuf>,

        /// Address to listen on
        #[arg(short, long, env = "PAYE_BIND_ADDR", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },

    /// Run one calculation and print the response JSON
    Calculate {
        /// Gross income for one period
        #[arg(short, long)]
        gross: Decimal,

        /// Period the gross income is expressed in
        #[arg(short, long, value_enum, default_value_t = PeriodArg::Monthly)]
        period: PeriodArg,

        /// Do not deduct the pension contribution
        #[arg(long, default_value_t = false)]
        no_pension: bool,

        /// Do not deduct the housing fund contribution
        #[arg(long, default_value_t = false)]
        no_housing_fund: bool,

        /// Annual rent paid
        #[arg(long, default_value_t = Decimal::ZERO)]
        rent: Decimal,

        /// Annual life assurance premium paid
        #[arg(long, default_value_t = Decimal::ZERO)]
        life_assurance: Decimal,

        /// Number of dependents
        #[arg(long, default_value_t = 0)]
        dependents: u32,

        /// Claim the disability relief
        #[arg(long, default_value_t = false)]
        disability: bool,

        /// Schedule directory; the built-in NTA 2025 schedule is used if omitted
        #[arg(short, long, env = "PAYE_CONFIG_DIR")]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PeriodArg {
    Monthly,
    Annual,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Monthly => Period::Monthly,
            PeriodArg::Annual => Period::Annual,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    // stdout is reserved for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_schedule(config: Option<&PathBuf>) -> Result<TaxSchedule> {
    let loader = match config {
        Some(dir) => ConfigLoader::load(dir)
            .with_context(|| format!("Failed to load schedule from: {}", dir.display()))?,
        None => {
            info!("No schedule directory given, using built-in NTA 2025 schedule");
            ConfigLoader::from_schedule(TaxSchedule::nta_2025())
        }
    };
    info!(schedule = %loader.metadata().name, "Using schedule");
    Ok(loader.into_schedule())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, bind } => {
            let schedule = load_schedule(config.as_ref())?;
            info!(
                schedule = %schedule.metadata().code,
                effective_date = %schedule.metadata().effective_date,
                "Schedule ready"
            );

            let router = create_router(AppState::new(schedule));
            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .with_context(|| format!("Failed to bind: {}", bind))?;
            info!(address = %bind, "Listening");

            axum::serve(listener, router)
                .await
                .context("Server terminated unexpectedly")?;
        }
        Command::Calculate {
            gross,
            period,
            no_pension,
            no_housing_fund,
            rent,
            life_assurance,
            dependents,
            disability,
            config,
        } => {
            let schedule = load_schedule(config.as_ref())?;
            let request = CalculationRequest {
                gross_income: gross,
                period: period.into(),
                options: CalculationOptions {
                    include_pension: !no_pension,
                    include_housing_fund: !no_housing_fund,
                    annual_rent: rent,
                    life_assurance_premium: life_assurance,
                    dependents,
                    has_disability: disability,
                    ..CalculationOptions::default()
                },
            };

            let response = CalculationResponse::calculate(&request, &schedule)
                .context("Calculation rejected")?;
            let json = serde_json::to_string_pretty(&response)
                .context("Failed to serialize response")?;
            println!("{}", json);
        }
    }

    Ok(())
}
