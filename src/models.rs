// src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use crate::db::QueryResult;

/// One row of the organizations listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrganizationRow {
    pub organization_id: Uuid,
    pub organization_name: String,
    pub industry: String,
    pub subscription_tier: String,
    pub created_at: DateTime<Utc>,
}

/// Single row returned by a COUNT(*) query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CountRow {
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrganizationMetricsRow {
    pub organization_name: String,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub gross_profit: f64,
    pub net_profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RevenueSourceRow {
    pub month: NaiveDate,
    pub subscription_revenue: f64,
    pub product_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductCategoryRow {
    pub category: String,
    pub items_sold: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubscriptionMetricsRow {
    pub plan_name: String,
    pub subscriber_count: i64,
    pub monthly_recurring_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailySalesRow {
    pub sale_date: NaiveDate,
    pub transaction_count: i64,
    pub daily_revenue: f64,
}

/// Subscription tiers as shown on the listing badge. The store keeps the
/// tier as free text, so parsing is lenient and unknown values fall back to
/// `Other`.
#[derive(Debug, Clone, Copy, PartialEq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum SubscriptionTier {
    Free,
    Basic,
    Pro,
    Enterprise,
    Other,
}

impl SubscriptionTier {
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or(SubscriptionTier::Other)
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "badge-free",
            SubscriptionTier::Basic => "badge-basic",
            SubscriptionTier::Pro => "badge-pro",
            SubscriptionTier::Enterprise => "badge-enterprise",
            SubscriptionTier::Other => "badge-other",
        }
    }
}

/// Combined result of the row and count queries for one listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    pub rows: Vec<T>,
    pub total_count: i64,
}

/// Outcome of combining the row and count queries. Same tagged shape as
/// `QueryResult`, but the success payload is the single combined listing
/// rather than a result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ListingResult<T> {
    Success(Listing<T>),
    Failure(String),
}

impl<T> ListingResult<T> {
    pub fn is_failure(&self) -> bool {
        matches!(self, ListingResult::Failure(_))
    }
}

/// Per-section results for the revenue dashboard. Sections fail
/// independently; one errored query must not blank the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViewModel {
    pub organization_metrics: QueryResult<OrganizationMetricsRow>,
    pub revenue_sources: QueryResult<RevenueSourceRow>,
    pub product_categories: QueryResult<ProductCategoryRow>,
    pub subscription_metrics: QueryResult<SubscriptionMetricsRow>,
    pub daily_sales: QueryResult<DailySalesRow>,
}

/// Totals reduced over the per-organization metric rows, shown as the four
/// summary cards at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MetricTotals {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub gross_profit: f64,
    pub net_profit: f64,
}

impl MetricTotals {
    pub fn from_rows(rows: &[OrganizationMetricsRow]) -> Self {
        rows.iter().fold(MetricTotals::default(), |acc, row| MetricTotals {
            total_revenue: acc.total_revenue + row.total_revenue,
            total_cost: acc.total_cost + row.total_cost,
            gross_profit: acc.gross_profit + row.gross_profit,
            net_profit: acc.net_profit + row.net_profit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_tier_parses_case_insensitively() {
        assert_eq!(SubscriptionTier::parse_lenient("enterprise"), SubscriptionTier::Enterprise);
        assert_eq!(SubscriptionTier::parse_lenient("Pro"), SubscriptionTier::Pro);
    }

    #[test]
    fn unknown_subscription_tier_falls_back_to_other() {
        assert_eq!(SubscriptionTier::parse_lenient("platinum-plus"), SubscriptionTier::Other);
        assert_eq!(SubscriptionTier::parse_lenient(""), SubscriptionTier::Other);
    }

    #[test]
    fn metric_totals_sum_every_column() {
        let rows = vec![
            OrganizationMetricsRow {
                organization_name: "Acme".to_string(),
                total_revenue: 100.0,
                total_cost: 40.0,
                gross_profit: 60.0,
                net_profit: 30.0,
            },
            OrganizationMetricsRow {
                organization_name: "Globex".to_string(),
                total_revenue: 50.0,
                total_cost: 10.0,
                gross_profit: 40.0,
                net_profit: 25.0,
            },
        ];
        let totals = MetricTotals::from_rows(&rows);
        assert_eq!(totals.total_revenue, 150.0);
        assert_eq!(totals.total_cost, 50.0);
        assert_eq!(totals.gross_profit, 100.0);
        assert_eq!(totals.net_profit, 55.0);
    }

    #[test]
    fn metric_totals_are_zero_for_no_rows() {
        assert_eq!(MetricTotals::from_rows(&[]), MetricTotals::default());
    }
}
