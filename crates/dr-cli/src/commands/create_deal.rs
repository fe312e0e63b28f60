use chrono::NaiveDate;
use dr_client::ApiClient;
use dr_core::format::format_deal_value;
use dr_core::types::{Deal, PickerOption, Priority};
use dr_core::wizard::CreateDealForm;

use super::friendly_error;

pub struct CreateDealArgs {
    pub buyer: i64,
    pub seller: i64,
    pub name: Option<String>,
    pub industry: Option<String>,
    pub value: Option<String>,
    pub currency: String,
    pub priority: String,
    pub pic: Option<i64>,
    pub close_date: Option<NaiveDate>,
}

fn pick(options: Vec<PickerOption>, id: i64, kind: &str) -> anyhow::Result<PickerOption> {
    options
        .into_iter()
        .find(|o| o.id == id)
        .ok_or_else(|| anyhow::anyhow!("No {kind} with id {id}."))
}

/// Run the `create-deal` subcommand.
pub async fn run(client: &ApiClient, args: CreateDealArgs) -> anyhow::Result<()> {
    let deal = create(client, args).await?;
    println!(
        "Created deal {}: {} ({}, stage {})",
        deal.id,
        deal.name,
        format_deal_value(&deal.estimate),
        deal.stage
    );
    Ok(())
}

pub async fn create(client: &ApiClient, args: CreateDealArgs) -> anyhow::Result<Deal> {
    let (buyers, sellers) = tokio::try_join!(client.fetch_buyers(), client.fetch_sellers())
        .map_err(friendly_error)?;

    let mut form = CreateDealForm::new();
    form.select_buyer(Some(pick(buyers, args.buyer, "buyer")?));
    form.select_seller(Some(pick(sellers, args.seller, "seller")?));
    if let Some(name) = args.name {
        form.set_name(name);
    }
    form.industry = args.industry.unwrap_or_default();
    form.ev_value = args.value.unwrap_or_default();
    form.ev_currency = args.currency;
    form.priority = Priority::parse(&args.priority);
    form.pic_user_id = args.pic;
    form.target_close_date = args.close_date;

    let request = form.to_request()?;
    tracing::info!(name = %request.name, "creating deal");
    client.create_deal(&request).await.map_err(friendly_error)
}
