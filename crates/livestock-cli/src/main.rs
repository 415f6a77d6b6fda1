//! Operator entry point for the livestock inventory ledger.
//!
//! Wires tracing, loads configuration, builds the connection pool, runs
//! migrations idempotently before any subcommand that touches data, then
//! dispatches to the requested operation.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use livestock_db::config::AppConfig;
use livestock_db::postgres::{PostgresConfig, PostgresPool};
use livestock_db::report_queries::ReportQueries;
use livestock_db::seed;
use livestock_types::{AnimalCategoryId, FarmId};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Operator CLI for the livestock inventory ledger.
#[derive(Parser)]
#[command(name = "livestock-cli")]
#[command(about = "Migrations, seeding, and reports for the livestock inventory ledger")]
#[command(version)]
struct Cli {
    /// Path to an optional YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply all pending database migrations.
    Migrate,

    /// Sync the nine system-defined animal categories and backfill balances.
    Seed,

    /// Print a report for a farm/category.
    Report {
        #[command(subcommand)]
        report: ReportCommand,
    },
}

#[derive(Subcommand)]
enum ReportCommand {
    /// The balance as of the start of a given date.
    Opening {
        /// Farm identifier.
        #[arg(long)]
        farm: Uuid,
        /// Category identifier.
        #[arg(long)]
        category: Uuid,
        /// Start-of-period date, `YYYY-MM-DD`.
        #[arg(long)]
        date: NaiveDate,
    },

    /// The balance at the end of a given date range.
    Closing {
        /// Farm identifier.
        #[arg(long)]
        farm: Uuid,
        /// Category identifier.
        #[arg(long)]
        category: Uuid,
        /// Start date, `YYYY-MM-DD`.
        #[arg(long)]
        start: NaiveDate,
        /// End date, `YYYY-MM-DD`.
        #[arg(long)]
        end: NaiveDate,
    },

    /// Compare the stored snapshot against the ledger-derived balance.
    Consistency {
        /// Farm identifier.
        #[arg(long)]
        farm: Uuid,
        /// Category identifier.
        #[arg(long)]
        category: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = AppConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&app_config.logging.filter)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    tracing::info!("livestock-cli starting");

    let pool_config = PostgresConfig::new(&app_config.database.url)
        .with_max_connections(app_config.database.max_connections)
        .with_connect_timeout(app_config.database.connect_timeout())
        .with_idle_timeout(app_config.database.idle_timeout());
    let pool = PostgresPool::connect(&pool_config).await?;
    pool.run_migrations().await?;

    match cli.command {
        Command::Migrate => {
            tracing::info!("migrations applied, nothing further to do");
        }
        Command::Seed => {
            let summary = seed::sync_system_categories(pool.pool()).await?;
            println!(
                "created={} updated={} unchanged={} balances_created={}",
                summary.created, summary.updated, summary.unchanged, summary.balances_created
            );
        }
        Command::Report { report } => {
            let reports = ReportQueries::new(pool.pool().clone());
            run_report(&reports, report).await?;
        }
    }

    pool.close().await;
    Ok(())
}

async fn run_report(reports: &ReportQueries, report: ReportCommand) -> anyhow::Result<()> {
    match report {
        ReportCommand::Opening {
            farm,
            category,
            date,
        } => {
            let quantity = reports
                .opening_stock(FarmId::from(farm), AnimalCategoryId::from(category), date)
                .await?;
            println!("opening_stock={quantity}");
        }
        ReportCommand::Closing {
            farm,
            category,
            start,
            end,
        } => {
            let quantity = reports
                .closing_stock(
                    FarmId::from(farm),
                    AnimalCategoryId::from(category),
                    start,
                    end,
                )
                .await?;
            println!("closing_stock={quantity}");
        }
        ReportCommand::Consistency { farm, category } => {
            let report = reports
                .verify_consistency(FarmId::from(farm), AnimalCategoryId::from(category))
                .await?;
            println!(
                "stored={} reconciled={} discrepancy={} consistent={}",
                report.stored_quantity,
                report.reconciled_quantity,
                report.discrepancy,
                report.is_consistent()
            );
        }
    }
    Ok(())
}
