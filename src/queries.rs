// src/queries.rs

use std::marker::PhantomData;

use sqlx::PgPool;
use sqlx::postgres::PgRow;

use crate::db::{self, QueryResult};
use crate::models::{
    CountRow, DailySalesRow, OrganizationMetricsRow, OrganizationRow, ProductCategoryRow,
    RevenueSourceRow, SubscriptionMetricsRow,
};

/// A named read query with a fixed positional arity and a row type fixed at
/// definition time.
pub struct QueryDef<T> {
    pub name: &'static str,
    pub sql: &'static str,
    pub arity: usize,
    row: PhantomData<fn() -> T>,
}

impl<T> QueryDef<T> {
    pub const fn new(name: &'static str, sql: &'static str, arity: usize) -> Self {
        Self {
            name,
            sql,
            arity,
            row: PhantomData,
        }
    }
}

impl<T> QueryDef<T>
where
    T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    /// Executes the query through the execution collaborator. A collaborator
    /// failure passes through unchanged; an arity mismatch never reaches the
    /// database.
    pub async fn run(&self, pool: &PgPool, params: &[String]) -> QueryResult<T> {
        if params.len() != self.arity {
            return QueryResult::Failure(format!(
                "query '{}' expects {} parameters, got {}",
                self.name,
                self.arity,
                params.len()
            ));
        }
        tracing::debug!("Executing query '{}' with params {:?}", self.name, params);
        db::execute_query(pool, self.sql, params).await
    }
}

pub const ORGANIZATIONS: QueryDef<OrganizationRow> = QueryDef::new(
    "organizations",
    r#"
    SELECT organization_id, organization_name, industry, subscription_tier, created_at
    FROM organizations
    ORDER BY organization_name
    LIMIT $1::bigint
    OFFSET $2::bigint
    "#,
    2,
);

pub const ORGANIZATIONS_COUNT: QueryDef<CountRow> = QueryDef::new(
    "organizations_count",
    r#"
    SELECT COUNT(*)::bigint AS total
    FROM organizations
    "#,
    0,
);

pub const ORGANIZATION_METRICS: QueryDef<OrganizationMetricsRow> = QueryDef::new(
    "organization_metrics",
    r#"
    SELECT o.organization_name,
           SUM(r.total_revenue)::float8 AS total_revenue,
           SUM(r.total_cost)::float8 AS total_cost,
           SUM(r.gross_profit)::float8 AS gross_profit,
           SUM(r.net_profit)::float8 AS net_profit
    FROM organizations o
    JOIN revenue r ON o.organization_id = r.organization_id
    GROUP BY o.organization_name
    ORDER BY total_revenue DESC
    "#,
    0,
);

pub const REVENUE_SOURCES: QueryDef<RevenueSourceRow> = QueryDef::new(
    "revenue_sources",
    r#"
    SELECT date_trunc('month', r.date)::date AS month,
           SUM(r.subscription_revenue)::float8 AS subscription_revenue,
           SUM(r.product_revenue)::float8 AS product_revenue
    FROM revenue r
    GROUP BY date_trunc('month', r.date)
    ORDER BY month DESC
    LIMIT 12
    "#,
    0,
);

pub const PRODUCT_CATEGORIES: QueryDef<ProductCategoryRow> = QueryDef::new(
    "product_categories",
    r#"
    SELECT p.category,
           COUNT(si.sale_item_id)::bigint AS items_sold,
           SUM(si.total_price)::float8 AS total_revenue
    FROM products p
    JOIN sale_items si ON p.product_id = si.product_id
    GROUP BY p.category
    ORDER BY total_revenue DESC
    "#,
    0,
);

pub const SUBSCRIPTION_METRICS: QueryDef<SubscriptionMetricsRow> = QueryDef::new(
    "subscription_metrics",
    r#"
    SELECT s.plan_name,
           COUNT(s.subscription_id)::bigint AS subscriber_count,
           SUM(s.monthly_price)::float8 AS monthly_recurring_revenue
    FROM subscriptions s
    WHERE s.status = 'active'
    GROUP BY s.plan_name
    ORDER BY monthly_recurring_revenue DESC
    "#,
    0,
);

pub const DAILY_SALES: QueryDef<DailySalesRow> = QueryDef::new(
    "daily_sales",
    r#"
    SELECT date_trunc('day', s.sale_date)::date AS sale_date,
           COUNT(s.sale_id)::bigint AS transaction_count,
           SUM(s.total_amount)::float8 AS daily_revenue
    FROM sales s
    WHERE s.sale_date >= CURRENT_DATE - INTERVAL '30 days'
    GROUP BY date_trunc('day', s.sale_date)
    ORDER BY sale_date DESC
    "#,
    0,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_queries_take_limit_and_offset() {
        assert_eq!(ORGANIZATIONS.arity, 2);
        assert!(ORGANIZATIONS.sql.contains("LIMIT $1"));
        assert!(ORGANIZATIONS.sql.contains("OFFSET $2"));
    }

    #[test]
    fn count_and_dashboard_queries_take_no_parameters() {
        assert_eq!(ORGANIZATIONS_COUNT.arity, 0);
        assert_eq!(ORGANIZATION_METRICS.arity, 0);
        assert_eq!(REVENUE_SOURCES.arity, 0);
        assert_eq!(PRODUCT_CATEGORIES.arity, 0);
        assert_eq!(SUBSCRIPTION_METRICS.arity, 0);
        assert_eq!(DAILY_SALES.arity, 0);
    }
}
