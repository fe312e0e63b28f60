mod commands;

use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dr_client::ApiClient;
use dr_core::config::Config;

/// dealroom -- inspect and move deals on the M&A pipeline board.
#[derive(Parser)]
#[command(name = "dealroom", version, about)]
struct Cli {
    /// API base URL (defaults to config / DEALROOM_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every stage column with its deals (default).
    Board,

    /// Print the KPI dashboard.
    Kpi,

    /// Move a deal to another stage.
    Move {
        /// Deal id.
        deal_id: i64,
        /// Target stage code, e.g. LOI.
        stage: String,
    },

    /// Create a deal between a buyer and a seller.
    CreateDeal {
        #[arg(long)]
        buyer: i64,
        #[arg(long)]
        seller: i64,
        /// Defaults to "<buyer> – <seller>".
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        /// Estimated EV, e.g. 85000000 or 85,000,000.
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        currency: Option<String>,
        /// low, medium or high.
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Person in charge (employee id).
        #[arg(long)]
        pic: Option<i64>,
        /// Target close date, YYYY-MM-DD.
        #[arg(long)]
        close_date: Option<NaiveDate>,
    },

    /// Show a seller profile.
    Seller {
        /// Seller id.
        id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load_with_api_url(cli.api_url)?;
    dr_telemetry::logging::init(
        "dealroom",
        &config.general.log_level,
        cli.json_logs || config.general.json_logs,
    );

    let client = ApiClient::from_config(&config.api);
    tracing::debug!(api = client.base_url(), "using api");

    match cli.command {
        None | Some(Commands::Board) => {
            let refresh = (config.board.auto_refresh_secs > 0)
                .then(|| Duration::from_secs(config.board.auto_refresh_secs));
            commands::board::run(&client, refresh).await?;
        }
        Some(Commands::Kpi) => {
            commands::kpi::run(&client).await?;
        }
        Some(Commands::Move { deal_id, stage }) => {
            commands::move_deal::run(client, deal_id, &stage).await?;
        }
        Some(Commands::CreateDeal {
            buyer,
            seller,
            name,
            industry,
            value,
            currency,
            priority,
            pic,
            close_date,
        }) => {
            let args = commands::create_deal::CreateDealArgs {
                buyer,
                seller,
                name,
                industry,
                value,
                currency: currency.unwrap_or_else(|| config.board.default_currency.clone()),
                priority,
                pic,
                close_date,
            };
            commands::create_deal::run(&client, args).await?;
        }
        Some(Commands::Seller { id }) => {
            commands::seller::run(&client, id).await?;
        }
    }

    Ok(())
}
