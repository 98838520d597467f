use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use zayt_advisor::{AdvisorConfig, OilAdvisor, DEFAULT_CACHE_TTL_MINUTES};
use zayt_catalog::CatalogData;
use zayt_core::{format_outcome, DEFAULT_LOCATION};
use zayt_observability::{init_tracing, AppMetrics};

#[derive(Debug, Parser)]
#[command(name = "zayt")]
#[command(about = "Engine oil and filter recommendations from Arabic car descriptions")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct Settings {
    /// Specification table JSON; the bundled table is used when absent.
    #[arg(long, env = "ZAYT_SPECS_PATH", global = true)]
    specs: Option<PathBuf>,

    /// Oils catalog JSON; the bundled catalog is used when absent.
    #[arg(long, env = "ZAYT_OILS_PATH", global = true)]
    oils: Option<PathBuf>,

    /// Cache lifetime in minutes, capped at one year.
    #[arg(
        long,
        env = "ZAYT_CACHE_TTL_MINUTES",
        default_value_t = DEFAULT_CACHE_TTL_MINUTES,
        global = true
    )]
    cache_ttl_minutes: i64,

    /// Market whose hot, dusty climate defaults apply.
    #[arg(long, env = "ZAYT_PRIMARY_LOCATION", default_value = DEFAULT_LOCATION, global = true)]
    primary_location: String,

    #[arg(long, env = "ZAYT_HEAVY_OIL_BRAND", global = true)]
    heavy_oil_brand: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend oil for one message.
    Recommend {
        message: String,
        #[arg(long)]
        json: bool,
    },
    /// Show the structured car data read from a message.
    Extract { message: String },
    /// Interactive session; repeated questions are answered from cache.
    Chat,
}

fn main() -> Result<()> {
    init_tracing("zayt_cli");
    let cli = Cli::parse();

    let advisor = build_advisor(&cli.settings)?;

    match cli.command {
        Command::Recommend { message, json } => {
            let outcome = advisor.analyze_car_and_recommend_oil(&message);
            if json {
                let payload = match &outcome {
                    Ok(rec) => serde_json::to_value(rec)?,
                    Err(err) => serde_json::json!({
                        "error_message": err.to_string(),
                        "kind": err.kind(),
                    }),
                };
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{}", format_outcome(&outcome));
            }
        }
        Command::Extract { message } => {
            let data = advisor.extract_car_data(&message);
            let year_category = advisor.determine_year_category(&data);
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "car_data": data,
                    "year_category": year_category.unwrap_or_default(),
                }))?
            );
        }
        Command::Chat => run_chat(&advisor)?,
    }

    Ok(())
}

fn run_chat(advisor: &OilAdvisor) -> Result<()> {
    println!("اكتب نوع سيارتك وموديلها وسنة الصنع والمسافة المقطوعة. اكتب exit للخروج.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        if message.is_empty() {
            continue;
        }

        let outcome = advisor.analyze_car_and_recommend_oil(message);
        println!("\n{}\n", format_outcome(&outcome));
    }

    let snapshot = advisor.metrics_snapshot();
    tracing::info!(
        requests = snapshot.requests_total,
        cache_hits = snapshot.cache_hits_total,
        failures = snapshot.failures_total,
        "chat session finished"
    );
    Ok(())
}

fn build_advisor(settings: &Settings) -> Result<OilAdvisor> {
    let catalog = CatalogData::load(settings.specs.as_deref(), settings.oils.as_deref())?;

    let mut config = AdvisorConfig::default()
        .with_cache_ttl_minutes(settings.cache_ttl_minutes)
        .with_primary_location(settings.primary_location.clone());
    if let Some(brand) = &settings.heavy_oil_brand {
        config = config.with_heavy_oil_brand(brand);
    }

    Ok(OilAdvisor::new(catalog, config, AppMetrics::shared()))
}
