// src/htmx_handlers.rs

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use maud::{Markup, html};

use crate::controller;
use crate::db::QueryResult;
use crate::errors::AppError;
use crate::filters::ListingParams;
use crate::models::{
    DailySalesRow, DashboardViewModel, ListingResult, MetricTotals, OrganizationRow,
    ProductCategoryRow, RevenueSourceRow, SubscriptionMetricsRow, SubscriptionTier,
};
use crate::pagination::{LoadPhase, PageRequest, PageState};
use crate::queries;
use crate::response::build_response;
use crate::state::AppState;

/// Fixed action endpoint of the organizations listing; every pagination
/// control points back here.
const LISTING_ACTION_PATH: &str = "/htmx/organizations";

pub async fn overview_page(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    tracing::info!("GET /");

    let count = queries::ORGANIZATIONS_COUNT
        .run(&app_state.db_pool, &[])
        .await;

    let content = match count {
        QueryResult::Success(rows) => {
            let total = rows.first().map_or(0, |row| row.total);
            render_overview(total, app_state.page_size)
        }
        QueryResult::Failure(message) => render_error(&message),
    };

    build_response(headers, content).await
}

pub async fn organizations_page(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    tracing::info!("GET /organizations");

    let request = PageRequest::new(1, app_state.page_size);
    let state = PageState::new(app_state.page_size);
    let (state, result) = controller::load_listing(
        &app_state.db_pool,
        &queries::ORGANIZATIONS,
        &queries::ORGANIZATIONS_COUNT,
        request,
        state,
    )
    .await;

    let phase = LoadPhase::Idle.begin().settle(result.is_failure());
    let content = match result {
        ListingResult::Success(listing) => html! {
            div .page {
                h1 { "Organizations" }
                (render_organizations_table(&listing.rows, &state, phase))
            }
        },
        ListingResult::Failure(message) => render_error(&message),
    };

    build_response(headers, content).await
}

pub async fn revenue_dashboard_page(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    tracing::info!("GET /revenue-dashboard");

    let dashboard = controller::load_dashboard(&app_state.db_pool).await;
    build_response(headers, render_revenue_dashboard(&dashboard)).await
}

/// The listing's `submit` endpoint: returns the table partial for the
/// requested page. Overlapping requests are accepted as-is; the client swap
/// applies whichever response completes last.
pub async fn organizations_table_htmx(
    State(app_state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Markup, AppError> {
    tracing::info!("HTMX: {} with params: {:?}", LISTING_ACTION_PATH, params);

    let request = PageRequest::new(params.page(), app_state.page_size);
    let state = PageState::new(app_state.page_size);
    let (state, result) = controller::load_listing(
        &app_state.db_pool,
        &queries::ORGANIZATIONS,
        &queries::ORGANIZATIONS_COUNT,
        request,
        state,
    )
    .await;

    let phase = LoadPhase::Loading.settle(result.is_failure());
    Ok(match result {
        ListingResult::Success(listing) => render_organizations_table(&listing.rows, &state, phase),
        ListingResult::Failure(message) => render_error(&message),
    })
}

// --- maud renderers; these never fetch ---

pub fn render_error(message: &str) -> Markup {
    html! {
        div .error-panel role="alert" {
            p .error-title { "Something went wrong" }
            p .error-message { (message) }
        }
    }
}

fn render_overview(organizations_count: i64, page_size: i64) -> Markup {
    html! {
        div .page {
            h1 { "Welcome to the analytics dashboard" }
            div .card-grid {
                div .quick-info-card {
                    h3 { "Organizations" }
                    p .card-description { "Total organizations on record" }
                    p .card-value { (organizations_count) }
                }
            }
            // The table shell renders in the Loading phase and HTMX fetches
            // page 1 as soon as the panel mounts.
            div #organizations-panel
                hx-get=(format!("{}?page=1", LISTING_ACTION_PATH))
                hx-trigger="load"
                hx-swap="innerHTML"
            {
                (render_organizations_table(&[], &PageState::new(page_size), LoadPhase::Idle.begin()))
            }
        }
    }
}

pub fn render_organizations_table(
    organizations: &[OrganizationRow],
    state: &PageState,
    phase: LoadPhase,
) -> Markup {
    html! {
        div #organizations-table .table-card {
            div .table-card-header {
                h2 { "Organizations" }
                p .table-card-description { "List of all organizations" }
            }
            table {
                thead {
                    tr {
                        th { "Organization Name" }
                        th { "Industry" }
                        th { "Subscription Tier" }
                        th { "Created At" }
                    }
                }
                tbody {
                    @if phase.is_loading() {
                        tr { td .centered colspan="4" { span .spinner { "Loading..." } } }
                    } @else if organizations.is_empty() {
                        tr { td .centered colspan="4" { "No organizations found" } }
                    } @else {
                        @for org in organizations {
                            tr {
                                td { (org.organization_name) }
                                td { (org.industry) }
                                td {
                                    @let tier = SubscriptionTier::parse_lenient(&org.subscription_tier);
                                    span class=(format!("badge {}", tier.badge_class())) {
                                        (tier)
                                    }
                                }
                                td { (org.created_at.format("%Y-%m-%d")) }
                            }
                        }
                    }
                }
            }
            (render_pagination_controls(state))
        }
    }
}

fn render_pagination_controls(state: &PageState) -> Markup {
    html! {
        div .pagination {
            span .pagination-label { "Page " (state.current_page) " of " (state.total_pages()) }
            div .pagination-buttons {
                button
                    hx-get=(format!("{}?page={}", LISTING_ACTION_PATH, state.current_page - 1))
                    hx-target="#organizations-table"
                    hx-swap="outerHTML"
                    disabled[!state.has_previous()]
                { "Previous" }
                button
                    hx-get=(format!("{}?page={}", LISTING_ACTION_PATH, state.current_page + 1))
                    hx-target="#organizations-table"
                    hx-swap="outerHTML"
                    disabled[!state.has_next()]
                { "Next" }
            }
        }
    }
}

fn render_revenue_dashboard(dashboard: &DashboardViewModel) -> Markup {
    html! {
        div .page {
            h1 { "Revenue Dashboard" }
            @match &dashboard.organization_metrics {
                QueryResult::Success(rows) => { (render_metric_cards(&MetricTotals::from_rows(rows))) },
                QueryResult::Failure(message) => { (render_error(message)) },
            }
            div .section-grid {
                @match &dashboard.revenue_sources {
                    QueryResult::Success(rows) => { (render_revenue_sources(rows)) },
                    QueryResult::Failure(message) => { (render_error(message)) },
                }
                @match &dashboard.product_categories {
                    QueryResult::Success(rows) => { (render_product_categories(rows)) },
                    QueryResult::Failure(message) => { (render_error(message)) },
                }
            }
            div .section-grid {
                @match &dashboard.subscription_metrics {
                    QueryResult::Success(rows) => { (render_subscription_metrics(rows)) },
                    QueryResult::Failure(message) => { (render_error(message)) },
                }
                @match &dashboard.daily_sales {
                    QueryResult::Success(rows) => { (render_daily_sales(rows)) },
                    QueryResult::Failure(message) => { (render_error(message)) },
                }
            }
        }
    }
}

fn render_metric_cards(totals: &MetricTotals) -> Markup {
    html! {
        div .card-grid {
            (render_metric_card("Total Revenue", "Overall revenue across all organizations", totals.total_revenue))
            (render_metric_card("Total Cost", "Combined costs and expenses", totals.total_cost))
            (render_metric_card("Gross Profit", "Revenue minus cost of goods sold", totals.gross_profit))
            (render_metric_card("Net Profit", "Final profit after all deductions", totals.net_profit))
        }
    }
}

fn render_metric_card(title: &str, description: &str, value: f64) -> Markup {
    html! {
        div .quick-info-card {
            h3 { (title) }
            p .card-description { (description) }
            p .card-value { (format!("{:.2}", value)) }
        }
    }
}

fn render_revenue_sources(rows: &[RevenueSourceRow]) -> Markup {
    html! {
        div .chart-card {
            h2 { "Revenue Sources Over Time" }
            p .chart-card-description { "Monthly breakdown of subscription vs product revenue" }
            table {
                thead {
                    tr { th { "Month" } th { "Subscription Revenue" } th { "Product Revenue" } }
                }
                tbody {
                    @if rows.is_empty() {
                        tr { td .centered colspan="3" { "No data" } }
                    } @else {
                        @for row in rows {
                            tr {
                                td { (row.month) }
                                td { (format!("{:.2}", row.subscription_revenue)) }
                                td { (format!("{:.2}", row.product_revenue)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_product_categories(rows: &[ProductCategoryRow]) -> Markup {
    html! {
        div .chart-card {
            h2 { "Revenue by Product Category" }
            p .chart-card-description { "Performance analysis by product category" }
            table {
                thead {
                    tr { th { "Category" } th { "Items Sold" } th { "Revenue" } }
                }
                tbody {
                    @if rows.is_empty() {
                        tr { td .centered colspan="3" { "No data" } }
                    } @else {
                        @for row in rows {
                            tr {
                                td { (row.category) }
                                td { (row.items_sold) }
                                td { (format!("{:.2}", row.total_revenue)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_subscription_metrics(rows: &[SubscriptionMetricsRow]) -> Markup {
    let total_mrr: f64 = rows.iter().map(|row| row.monthly_recurring_revenue).sum();
    let total_subscribers: i64 = rows.iter().map(|row| row.subscriber_count).sum();

    html! {
        div .chart-card {
            h2 { "Subscription Distribution" }
            p .chart-card-description { "Active subscribers and MRR by plan" }
            p .chart-card-summary {
                (format!("{:.2}", total_mrr)) " MRR / " (total_subscribers) " subscribers"
            }
            table {
                thead {
                    tr { th { "Plan" } th { "Subscribers" } th { "MRR" } }
                }
                tbody {
                    @if rows.is_empty() {
                        tr { td .centered colspan="3" { "No data" } }
                    } @else {
                        @for row in rows {
                            tr {
                                td { (row.plan_name) }
                                td { (row.subscriber_count) }
                                td { (format!("{:.2}", row.monthly_recurring_revenue)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_daily_sales(rows: &[DailySalesRow]) -> Markup {
    html! {
        div .chart-card {
            h2 { "Daily Sales Trends" }
            p .chart-card-description { "Revenue and transaction volume for the last 30 days" }
            table {
                thead {
                    tr { th { "Date" } th { "Transactions" } th { "Revenue" } }
                }
                tbody {
                    @if rows.is_empty() {
                        tr { td .centered colspan="3" { "No data" } }
                    } @else {
                        @for row in rows {
                            tr {
                                td { (row.sale_date) }
                                td { (row.transaction_count) }
                                td { (format!("{:.2}", row.daily_revenue)) }
                            }
                        }
                    }
                }
            }
        }
    }
}
