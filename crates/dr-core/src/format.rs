//! Display formatting for deal cards and the KPI dashboard.

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::{KpiSnapshot, Money, SellerProfile};

/// Shown in a KPI card while loading or when no snapshot is available.
pub const PLACEHOLDER: &str = "\u{2014}";

fn round_half_away(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Fixed-precision formatting that rounds half away from zero (`4.5` → `5`).
/// `format!` alone rounds ties to even.
fn fixed(value: f64, decimals: usize) -> String {
    let rounded = round_half_away(value, decimals);
    format!("{rounded:.decimals$}")
}

/// `(scale, suffix, decimals)`, largest first.
const UNITS: [(f64, &str, usize); 4] = [(1e9, "B", 1), (1e6, "M", 0), (1e3, "K", 0), (1.0, "", 0)];

/// Abbreviate a magnitude: `1.5B`, `85M`, `5K`, `400`. A value that rounds up
/// to 1000 of a unit moves to the next one (`999_500` → `1M`).
pub fn abbreviate(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    let mut idx = UNITS
        .iter()
        .position(|(scale, _, _)| abs >= *scale)
        .unwrap_or(UNITS.len() - 1);
    let (scale, _, decimals) = UNITS[idx];
    if idx > 0 && round_half_away(abs / scale, decimals) >= 1000.0 {
        idx -= 1;
    }
    let (scale, suffix, decimals) = UNITS[idx];
    format!("{sign}{}{suffix}", fixed(abs / scale, decimals))
}

/// Dollar amount for the KPI dashboard, e.g. `$1.5B`.
pub fn format_currency_short(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", abbreviate(-value))
    } else {
        format!("${}", abbreviate(value))
    }
}

pub fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.trim().to_ascii_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("\u{20AC}"),
        "GBP" => Some("\u{00A3}"),
        "JPY" => Some("\u{00A5}"),
        "IDR" => Some("Rp"),
        "SGD" => Some("S$"),
        _ => None,
    }
}

/// Approximate deal value for a card: `~$85M`, `~SGD 12M` style, `N/A` when
/// the estimate is missing.
pub fn format_deal_value(money: &Money) -> String {
    let Some(value) = money.value else {
        return "N/A".to_string();
    };
    let prefix = match currency_symbol(&money.currency) {
        Some(symbol) => symbol.to_string(),
        None if money.currency.trim().is_empty() => String::new(),
        None => format!("{} ", money.currency.trim().to_ascii_uppercase()),
    };
    format!("~{prefix}{}", abbreviate(value))
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", fixed(value, 1))
}

pub fn format_ratio(value: f64) -> String {
    format!("{}x", fixed(value, 2))
}

pub fn format_close_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "No target date".to_string(),
    }
}

/// Coarse "updated ... ago" label for card footers.
pub fn format_updated(updated_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ts) = updated_at else {
        return String::new();
    };
    let secs = (now - ts).num_seconds().max(0);
    match secs {
        0..=59 => "just now".to_string(),
        60..=3_599 => format!("{}m ago", secs / 60),
        3_600..=86_399 => format!("{}h ago", secs / 3_600),
        _ => format!("{}d ago", secs / 86_400),
    }
}

/// Plain-text seller summary for the clipboard.
pub fn seller_summary(profile: &SellerProfile) -> String {
    let overview = &profile.company_overview;
    let mut lines = vec![profile.display_name()];
    let location = [overview.industry.as_deref(), overview.country.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    if !location.is_empty() {
        lines.push(location);
    }
    if let Some(fin) = &profile.financial_details {
        let currency = fin.currency.clone().unwrap_or_default();
        let money = |label: &str, value: Option<f64>| {
            value.map(|v| {
                format_deal_value(&Money {
                    value: Some(v),
                    currency: currency.clone(),
                })
                .replacen('~', &format!("{label}: "), 1)
            })
        };
        lines.extend(money("Revenue", fin.annual_revenue));
        lines.extend(money("EBITDA", fin.ebitda));
        lines.extend(money("Asking price", fin.asking_price));
    }
    if let Some(headline) = profile
        .teaser_center
        .as_ref()
        .and_then(|t| t.headline.as_deref())
    {
        lines.push(headline.to_string());
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: String,
    pub hint: &'static str,
}

fn card(
    snapshot: Option<&KpiSnapshot>,
    label: &'static str,
    hint: &'static str,
    value: impl Fn(&KpiSnapshot) -> String,
) -> KpiCard {
    KpiCard {
        label,
        value: snapshot.map(value).unwrap_or_else(|| PLACEHOLDER.to_string()),
        hint,
    }
}

/// The five dashboard cards, in display order.
pub fn kpi_cards(snapshot: Option<&KpiSnapshot>, loading: bool) -> Vec<KpiCard> {
    let snapshot = if loading { None } else { snapshot };
    vec![
        card(
            snapshot,
            "Expected Transaction Value",
            "Sum of estimated EV across open deals",
            |k| format_currency_short(k.expected_transaction_value),
        ),
        card(
            snapshot,
            "Active Deals",
            "Deals currently in the pipeline",
            |k| k.active_deals.to_string(),
        ),
        card(
            snapshot,
            "Late-Stage Deals",
            "LOI and beyond",
            |k| k.late_stage_deals.to_string(),
        ),
        card(
            snapshot,
            "Average Progress",
            "Mean completion across active deals",
            |k| format_percent(k.average_progress),
        ),
        card(
            snapshot,
            "Velocity Score",
            "Stage moves relative to the trailing average",
            |k| format_ratio(k.velocity_score),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_rounds_half_away_from_zero() {
        assert_eq!(fixed(4.5, 0), "5");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(1.25, 1), "1.3");
    }

    #[test]
    fn negative_values_keep_their_sign() {
        assert_eq!(abbreviate(-2_000_000.0), "-2M");
        assert_eq!(format_currency_short(-4_500.0), "-$5K");
    }

    #[test]
    fn updated_label_buckets() {
        let now = Utc::now();
        assert_eq!(format_updated(Some(now), now), "just now");
        assert_eq!(
            format_updated(Some(now - chrono::Duration::minutes(5)), now),
            "5m ago"
        );
        assert_eq!(
            format_updated(Some(now - chrono::Duration::hours(3)), now),
            "3h ago"
        );
        assert_eq!(
            format_updated(Some(now - chrono::Duration::days(2)), now),
            "2d ago"
        );
        assert_eq!(format_updated(None, now), "");
    }
}
