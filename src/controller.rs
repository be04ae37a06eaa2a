// src/controller.rs

use sqlx::PgPool;
use sqlx::postgres::PgRow;

use crate::db::QueryResult;
use crate::models::{CountRow, DashboardViewModel, Listing, ListingResult};
use crate::pagination::{PageRequest, PageState};
use crate::queries::{self, QueryDef};

/// Combines the independent row and count results. Any constituent failure
/// fails the whole listing; the row query's message wins when both fail.
pub fn combine<T>(rows: QueryResult<T>, count: QueryResult<CountRow>) -> ListingResult<T> {
    let rows = match rows {
        QueryResult::Success(rows) => rows,
        QueryResult::Failure(message) => return ListingResult::Failure(message),
    };
    let total_count = match count {
        QueryResult::Success(counts) => counts.first().map_or(0, |row| row.total),
        QueryResult::Failure(message) => return ListingResult::Failure(message),
    };
    ListingResult::Success(Listing { rows, total_count })
}

/// Loads one page of a listing. The row and count queries are issued
/// concurrently and awaited jointly. On success the returned state carries
/// the requested page and the fresh total; on failure the incoming state is
/// returned untouched so the view keeps its last known pagination.
pub async fn load_listing<T>(
    pool: &PgPool,
    rows_query: &QueryDef<T>,
    count_query: &QueryDef<CountRow>,
    request: PageRequest,
    state: PageState,
) -> (PageState, ListingResult<T>)
where
    T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    let params = vec![
        request.page_size().to_string(),
        request.offset().to_string(),
    ];

    let (rows, count) = futures::join!(
        rows_query.run(pool, &params),
        count_query.run(pool, &[]),
    );

    match combine(rows, count) {
        ListingResult::Success(listing) => {
            let state = PageState {
                current_page: request.page(),
                total_count: listing.total_count,
                page_size: request.page_size(),
            };
            (state, ListingResult::Success(listing))
        }
        ListingResult::Failure(message) => (state, ListingResult::Failure(message)),
    }
}

/// Loads every dashboard section concurrently. Sections stay independent:
/// each carries its own result and the view renders an error block only for
/// the sections that failed.
pub async fn load_dashboard(pool: &PgPool) -> DashboardViewModel {
    let (organization_metrics, revenue_sources, product_categories, subscription_metrics, daily_sales) = futures::join!(
        queries::ORGANIZATION_METRICS.run(pool, &[]),
        queries::REVENUE_SOURCES.run(pool, &[]),
        queries::PRODUCT_CATEGORIES.run(pool, &[]),
        queries::SUBSCRIPTION_METRICS.run(pool, &[]),
        queries::DAILY_SALES.run(pool, &[]),
    );

    DashboardViewModel {
        organization_metrics,
        revenue_sources,
        product_categories,
        subscription_metrics,
        daily_sales,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(total: i64) -> QueryResult<CountRow> {
        QueryResult::Success(vec![CountRow { total }])
    }

    #[test]
    fn combines_rows_and_total_on_success() {
        let rows = QueryResult::Success(vec!["a".to_string(), "b".to_string()]);
        match combine(rows, count(25)) {
            ListingResult::Success(listing) => {
                assert_eq!(listing.rows, vec!["a".to_string(), "b".to_string()]);
                assert_eq!(listing.total_count, 25);
            }
            ListingResult::Failure(message) => panic!("unexpected failure: {message}"),
        }
    }

    #[test]
    fn combined_success_is_one_listing_not_a_result_set() {
        // The combined payload has a different shape from the per-query one:
        // a single Listing carrying both the rows and the fresh total.
        let combined = combine(QueryResult::Success(vec!["a".to_string()]), count(1));
        assert_eq!(
            combined,
            ListingResult::Success(Listing {
                rows: vec!["a".to_string()],
                total_count: 1,
            })
        );
    }

    #[test]
    fn row_failure_fails_the_whole_listing() {
        let rows: QueryResult<String> = QueryResult::Failure("rows exploded".to_string());
        assert_eq!(
            combine(rows, count(25)),
            ListingResult::Failure("rows exploded".to_string())
        );
    }

    #[test]
    fn count_failure_fails_the_whole_listing() {
        // Ten perfectly good rows are still discarded: no partial rendering.
        let rows = QueryResult::Success(vec!["row".to_string(); 10]);
        let combined = combine(rows, QueryResult::Failure("count exploded".to_string()));
        assert_eq!(combined, ListingResult::Failure("count exploded".to_string()));
    }

    #[test]
    fn row_failure_wins_when_both_fail() {
        let rows: QueryResult<String> = QueryResult::Failure("rows down".to_string());
        let combined = combine(rows, QueryResult::Failure("count down".to_string()));
        assert_eq!(combined, ListingResult::Failure("rows down".to_string()));
    }

    #[test]
    fn missing_count_row_defaults_to_zero() {
        let rows: QueryResult<String> = QueryResult::Success(vec![]);
        match combine(rows, QueryResult::Success(vec![])) {
            ListingResult::Success(listing) => assert_eq!(listing.total_count, 0),
            ListingResult::Failure(message) => panic!("unexpected failure: {message}"),
        }
    }

    #[test]
    fn combining_identical_inputs_yields_identical_results() {
        let build = || {
            (
                QueryResult::Success(vec!["a".to_string()]),
                count(1),
            )
        };
        let (rows_a, count_a) = build();
        let (rows_b, count_b) = build();
        assert_eq!(combine(rows_a, count_a), combine(rows_b, count_b));
    }
}
