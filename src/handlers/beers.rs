use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use super::common::{
    created_response, json_body, no_content_response, path_param, success_response,
    validate_input,
};
use crate::{
    errors::ApiError,
    models::{Beer, BeerType, NewBeer},
    AppState,
};

/// Request body for registering a beer
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Brahma",
    "brand": "Ambev",
    "max": 50,
    "quantity": 10,
    "type": "LAGER"
}))]
pub struct BeerRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub brand: String,
    /// Maximum stock the beer may hold
    #[validate(range(min = 0, max = 500))]
    pub max: i32,
    #[validate(range(min = 0, max = 100))]
    pub quantity: i32,
    #[serde(rename = "type")]
    pub category: BeerType,
}

impl From<BeerRequest> for NewBeer {
    fn from(request: BeerRequest) -> Self {
        NewBeer {
            name: request.name,
            brand: request.brand,
            max_capacity: request.max,
            quantity: request.quantity,
            category: request.category,
        }
    }
}

/// Request body for stock adjustments
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct QuantityRequest {
    #[validate(range(min = 1, max = 100))]
    pub quantity: i32,
}

/// Creates the router for beer endpoints.
///
/// The single-segment route is shared: GET reads it as a name, DELETE as an id.
pub fn beer_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_beer).get(list_beers))
        .route("/:key", get(get_beer_by_name).delete(delete_beer))
        .route("/:key/increment", patch(increment_beer))
        .route("/:key/decrement", patch(decrement_beer))
}

/// Register a new beer
#[utoipa::path(
    post,
    path = "/api/v1/beers",
    request_body = BeerRequest,
    responses(
        (status = 201, description = "Beer registered", body = Beer,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already registered", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "beers"
)]
pub async fn create_beer(
    State(state): State<AppState>,
    payload: Result<Json<BeerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = json_body(payload)?;
    validate_input(&request)?;

    let beer = state.beer_service.create(request.into()).await?;
    info!(id = beer.id, name = %beer.name, "beer created");
    Ok(created_response(beer))
}

/// List every registered beer
#[utoipa::path(
    get,
    path = "/api/v1/beers",
    responses(
        (status = 200, description = "All beers", body = [Beer]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "beers"
)]
pub async fn list_beers(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let beers = state.beer_service.list_all().await?;
    Ok(success_response(beers))
}

/// Get a beer by its exact name
#[utoipa::path(
    get,
    path = "/api/v1/beers/{name}",
    params(
        ("name" = String, Path, description = "Beer name, case-sensitive")
    ),
    responses(
        (status = 200, description = "Beer found", body = Beer),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "beers"
)]
pub async fn get_beer_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let beer = state.beer_service.find_by_name(&name).await?;
    Ok(success_response(beer))
}

/// Delete a beer by id
#[utoipa::path(
    delete,
    path = "/api/v1/beers/{id}",
    params(
        ("id" = i64, Path, description = "Beer ID")
    ),
    responses(
        (status = 204, description = "Beer deleted"),
        (status = 400, description = "Malformed id", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "beers"
)]
pub async fn delete_beer(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = path_param(id)?;
    state.beer_service.delete_by_id(id).await?;
    info!(id, "beer deleted");
    Ok(no_content_response())
}

/// Add stock to a beer
#[utoipa::path(
    patch,
    path = "/api/v1/beers/{id}/increment",
    params(
        ("id" = i64, Path, description = "Beer ID")
    ),
    request_body = QuantityRequest,
    responses(
        (status = 200, description = "Stock incremented", body = Beer),
        (status = 400, description = "Invalid request or capacity exceeded", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Concurrent modification", body = crate::errors::ErrorResponse)
    ),
    tag = "beers"
)]
pub async fn increment_beer(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<QuantityRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = path_param(id)?;
    let request = json_body(payload)?;
    validate_input(&request)?;

    let beer = state.beer_service.increment(id, request.quantity).await?;
    Ok(success_response(beer))
}

/// Remove stock from a beer
#[utoipa::path(
    patch,
    path = "/api/v1/beers/{id}/decrement",
    params(
        ("id" = i64, Path, description = "Beer ID")
    ),
    request_body = QuantityRequest,
    responses(
        (status = 200, description = "Stock decremented", body = Beer),
        (status = 400, description = "Invalid request or stock below zero", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Concurrent modification", body = crate::errors::ErrorResponse)
    ),
    tag = "beers"
)]
pub async fn decrement_beer(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<QuantityRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = path_param(id)?;
    let request = json_body(payload)?;
    validate_input(&request)?;

    let beer = state.beer_service.decrement(id, request.quantity).await?;
    Ok(success_response(beer))
}
