use dr_client::ApiClient;
use dr_core::format::format_deal_value;
use dr_core::types::{Money, SellerProfile};

use super::friendly_error;

/// Run the `seller` subcommand: print the three profile sections.
pub async fn run(client: &ApiClient, id: i64) -> anyhow::Result<()> {
    let profile = client.fetch_seller(id).await.map_err(friendly_error)?;
    print!("{}", render(&profile));
    Ok(())
}

fn field(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        out.push_str(&format!("  {label:<18} {value}\n"));
    }
}

pub fn render(profile: &SellerProfile) -> String {
    let mut out = format!("{}  (seller {})\n", profile.display_name(), profile.id);
    let overview = &profile.company_overview;

    out.push_str("\nCompany Overview\n");
    field(&mut out, "Industry", overview.industry.as_deref());
    field(&mut out, "Country", overview.country.as_deref());
    field(&mut out, "Rank", overview.rank.as_deref());
    field(&mut out, "Website", overview.website.as_deref());
    field(
        &mut out,
        "Founded",
        overview.year_founded.map(|y| y.to_string()).as_deref(),
    );
    field(
        &mut out,
        "Employees",
        overview.employee_count.map(|c| c.to_string()).as_deref(),
    );
    for contact in &overview.contacts {
        let title = contact.title.as_deref().unwrap_or("");
        field(
            &mut out,
            "Contact",
            Some(format!("{} {}", contact.name, title).trim()),
        );
    }
    for holder in &overview.shareholders {
        let share = holder
            .percentage
            .as_deref()
            .map(|p| format!(" ({p}%)"))
            .unwrap_or_default();
        field(
            &mut out,
            "Shareholder",
            Some(format!("{}{share}", holder.name).as_str()),
        );
    }

    out.push_str("\nFinancial Details\n");
    match &profile.financial_details {
        None => out.push_str("  (not submitted)\n"),
        Some(fin) => {
            let currency = fin.currency.clone().unwrap_or_default();
            let amount = |value: Option<f64>| {
                value.map(|v| {
                    format_deal_value(&Money {
                        value: Some(v),
                        currency: currency.clone(),
                    })
                })
            };
            field(&mut out, "Currency", fin.currency.as_deref());
            field(&mut out, "Annual revenue", amount(fin.annual_revenue).as_deref());
            field(&mut out, "EBITDA", amount(fin.ebitda).as_deref());
            field(&mut out, "Net profit", amount(fin.net_profit).as_deref());
            field(&mut out, "Total assets", amount(fin.total_assets).as_deref());
            field(
                &mut out,
                "Total liabilities",
                amount(fin.total_liabilities).as_deref(),
            );
            field(&mut out, "Asking price", amount(fin.asking_price).as_deref());
        }
    }

    out.push_str("\nTeaser Center\n");
    match &profile.teaser_center {
        None => out.push_str("  (not submitted)\n"),
        Some(teaser) => {
            field(&mut out, "Headline", teaser.headline.as_deref());
            for highlight in &teaser.highlights {
                field(&mut out, "Highlight", Some(highlight.as_str()));
            }
            field(&mut out, "Thesis", teaser.investment_thesis.as_deref());
            field(
                &mut out,
                "Visibility",
                Some(if teaser.is_public { "public" } else { "private" }),
            );
        }
    }
    out
}
