//! Sales ledger CLI
//!
//! Usage:
//!   sales-ledger [--config ledger.toml] monthly
//!   sales-ledger sellers [--rates]
//!   sales-ledger orders
//!   sales-ledger months
//!   sales-ledger export <sellers|orders|monthly> [--out DIR]
//!   sales-ledger volume --length 30 --width 20 --height 10
//!
//! Reports go to stdout and logs go to stderr, so `sales-ledger monthly > report.txt`
//! captures only the table.

use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use sales_ledger::{
    config::{database, ledger},
    core::{export, month, order, report, seed},
    errors::Result,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LEDGER: &str = "ledger.toml";

/// Log filter used when `RUST_LOG` is unset. sqlx logs every statement at INFO.
const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";

#[derive(Parser)]
#[command(name = "sales-ledger")]
#[command(about = "Seller and order record keeping with monthly revenue reports")]
struct Cli {
    /// Seed ledger loaded into the in-memory store before running the command
    #[arg(long, env = "LEDGER_CONFIG", default_value = DEFAULT_LEDGER)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show revenue per month, newest first
    Monthly,
    /// Show each seller's revenue and share of the total
    Sellers {
        /// List every seller with its billing rates instead
        #[arg(long)]
        rates: bool,
    },
    /// List recorded orders
    Orders,
    /// List the months available for order entry
    Months,
    /// Write a CSV export
    Export {
        /// What to export
        #[arg(value_enum)]
        what: ExportKind,
        /// Directory to write the file into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Convert package dimensions in centimetres to cubic metres
    Volume {
        #[arg(long)]
        length: f64,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportKind {
    Sellers,
    Orders,
    Monthly,
}

impl ExportKind {
    const fn base_name(self) -> &'static str {
        match self {
            Self::Sellers => "sellers",
            Self::Orders => "orders",
            Self::Monthly => "monthly_report",
        }
    }
}

/// Loads the seed ledger. A missing default file means an empty ledger; an explicitly
/// named file must exist.
fn load_ledger(path: &Path) -> Result<ledger::LedgerConfig> {
    if !path.exists() && path.as_os_str() == DEFAULT_LEDGER {
        warn!("No {DEFAULT_LEDGER} found, starting with an empty ledger");
        return Ok(ledger::LedgerConfig::default());
    }

    ledger::load_config(path)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file, non-fatal: env vars can be set externally
    dotenv().ok();

    let cli = Cli::parse();

    // The dimension calculator needs no records
    if let Commands::Volume {
        length,
        width,
        height,
    } = cli.command
    {
        let volume = order::volume_from_dimensions_cm(length, width, height)?;
        println!("Volume: {}", report::format_volume(volume));
        return Ok(());
    }

    // 3. Open the in-memory store and load the seed ledger into it
    let ledger_config = load_ledger(&cli.config)?;
    let db = database::create_connection().await?;
    seed::seed_ledger(&db, &ledger_config).await?;

    // 4. Run the command against a consistent snapshot
    let snapshot = report::load_snapshot(&db).await?;

    match cli.command {
        Commands::Monthly => {
            print!("{}", report::format_monthly_table(&snapshot.monthly_stats()));
        }
        Commands::Sellers { rates: true } => {
            print!("{}", report::format_rate_table(&snapshot.sellers));
        }
        Commands::Sellers { rates: false } => {
            print!("{}", report::format_seller_table(&snapshot.seller_stats()));
        }
        Commands::Orders => {
            for row in export::order_export_rows(&snapshot.sellers, &snapshot.orders) {
                println!(
                    "{} | {} | {} | ≤3: {} | >3: {} | {}",
                    row.date,
                    row.seller_name,
                    row.month,
                    row.quantity_under_three,
                    row.quantity_over_three,
                    report::format_volume(row.volume)
                );
            }
        }
        Commands::Months => {
            for option in month::selectable_months() {
                println!("{}  {}", option.value, option.label);
            }
        }
        Commands::Export { what, out } => {
            let csv = match what {
                ExportKind::Sellers => export::export_sellers(&snapshot.sellers)?,
                ExportKind::Orders => export::export_orders(&snapshot.sellers, &snapshot.orders)?,
                ExportKind::Monthly => export::export_monthly_stats(&snapshot.monthly_stats())?,
            };

            let today = chrono::Local::now().date_naive();
            let path = out.join(export::export_filename(what.base_name(), today));
            std::fs::write(&path, csv)?;
            info!("Exported {} to {}", what.base_name(), path.display());
        }
        Commands::Volume { .. } => {}
    }

    Ok(())
}
