//! remit-rank CLI
//!
//! Provides commands for:
//! - `quote`: Rank providers from a JSON file for one transfer
//! - `schemas`: Print the JSON schemas of the request and response contracts

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use remit_rank::application::{QuoteRequest, QuoteResponse, QuoteService};
use remit_rank::config::AppConfig;
use remit_rank::domain::value_objects::{CurrencyCode, SpotRate};
use remit_rank::infrastructure::persistence::InMemoryProviderRepository;
use remit_rank::infrastructure::rates::{ExchangeRateSource, StaticExchangeRateSource};
use remit_rank::telemetry::{LogFormat, init_tracing};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Money-transfer provider ranking
#[derive(Parser)]
#[command(name = "remit-rank")]
#[command(about = "Rank money-transfer providers by landing amount, fees and quality")]
#[command(version)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogArg::Pretty, global = true)]
    log_format: LogArg,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogArg {
    Pretty,
    Json,
}

impl From<LogArg> for LogFormat {
    fn from(arg: LogArg) -> Self {
        match arg {
            LogArg::Pretty => Self::Pretty,
            LogArg::Json => Self::Json,
        }
    }
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Rank providers for one transfer and print the response as JSON
    Quote(QuoteArgs),
    /// Print request and response JSON schemas
    Schemas,
}

#[derive(clap::Args)]
struct QuoteArgs {
    /// JSON array of provider records
    #[arg(long)]
    providers: PathBuf,

    /// Source currency
    #[arg(long)]
    from: String,

    /// Target currency
    #[arg(long)]
    to: String,

    /// Amount to send
    #[arg(long)]
    amount: Decimal,

    /// Fixed spot rate; the configured HTTP source is used when omitted
    #[arg(long)]
    rate: Option<Decimal>,

    /// Maximum number of results
    #[arg(long)]
    top_n: Option<usize>,

    /// Weight override, repeatable (e.g. --weight fees_fx=0.7)
    #[arg(long = "weight", value_parser = parse_weight)]
    weights: Vec<(String, f64)>,

    /// Criteria labels echoed in the response
    #[arg(long = "criterion")]
    criteria: Vec<String>,

    /// Settings file (extension optional)
    #[arg(long)]
    config: Option<String>,
}

fn parse_weight(raw: &str) -> Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("bad weight for '{key}': {e}"))?;
    Ok((key.trim().to_string(), value))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_format.into(), &cli.log_level)
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing: {e}"))?;

    match cli.command {
        Commands::Quote(args) => run_quote(args).await,
        Commands::Schemas => print_schemas(),
    }
}

async fn run_quote(args: QuoteArgs) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;
    config.ranking.validate().context("invalid ranking settings")?;

    let json = tokio::fs::read_to_string(&args.providers)
        .await
        .with_context(|| format!("reading {}", args.providers.display()))?;
    let repository = InMemoryProviderRepository::from_json(&json)?;

    let rates: Arc<dyn ExchangeRateSource> = match args.rate {
        Some(rate) => Arc::new(StaticExchangeRateSource::single(
            CurrencyCode::new(&args.from)?,
            CurrencyCode::new(&args.to)?,
            SpotRate::new(rate)?,
        )),
        None => Arc::new(config.rates.http_source()?),
    };

    let service = QuoteService::new(
        Arc::new(repository),
        rates,
        Arc::new(config.ranking.strategy()?),
        config.ranking.weight_resolver()?,
        config.quote_config(),
    );

    let mut request = QuoteRequest::new(args.from, args.to, args.amount);
    if let Some(top_n) = args.top_n {
        request = request.with_top_n(top_n);
    }
    if !args.weights.is_empty() {
        request = request.with_weights(args.weights.into_iter().collect());
    }
    if !args.criteria.is_empty() {
        request = request.with_criteria(args.criteria);
    }

    let response = service.quote(request).await?;
    if let Some(best) = response.best() {
        tracing::info!(
            provider = %best.code,
            landing = %best.landing,
            score = best.composite_score,
            "best provider"
        );
    }
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn print_schemas() -> Result<()> {
    let schemas = BTreeMap::from([
        ("QuoteRequest", schemars::schema_for!(QuoteRequest)),
        ("QuoteResponse", schemars::schema_for!(QuoteResponse)),
    ]);
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}
