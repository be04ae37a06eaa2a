// src/handlers.rs
use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use crate::controller;
use crate::errors::AppError;
use crate::filters::ListingParams;
use crate::models::{DashboardViewModel, ListingResult, OrganizationRow};
use crate::pagination::{PageState, Paginated};
use crate::queries;
use crate::state::AppState;

pub async fn list_organizations_api(
    State(app_state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<Paginated<OrganizationRow>>, AppError> {
    tracing::info!("GET /api/organizations with params: {:?}", params);
    params.validate()?;

    let request = params.page_request();
    let state = PageState::new(request.page_size());
    let (state, result) = controller::load_listing(
        &app_state.db_pool,
        &queries::ORGANIZATIONS,
        &queries::ORGANIZATIONS_COUNT,
        request,
        state,
    )
    .await;

    match result {
        ListingResult::Success(listing) => Ok(Json(Paginated::new(&state, listing.rows))),
        ListingResult::Failure(message) => Err(AppError::Query(message)),
    }
}

/// All five sections in one payload. Sections carry their own status, so a
/// failed query shows up inside the payload instead of failing the request.
pub async fn revenue_dashboard_api(
    State(app_state): State<AppState>,
) -> Json<DashboardViewModel> {
    tracing::info!("GET /api/revenue-dashboard");
    Json(controller::load_dashboard(&app_state.db_pool).await)
}
