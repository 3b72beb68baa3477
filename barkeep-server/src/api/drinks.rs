use crate::auth::{permission_guard, permissions, Claims};
use crate::errors::ApiError;
use crate::models::{Drink, DrinkPayload, ShortDrink};
use crate::openapi::DRINKS_TAG;
use crate::state::AppState;
use crate::store::{DrinkStore, StoreError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, get, patch, post};
use axum::{middleware, Extension, Json, Router};
use log::{debug, error};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ShortListResponse {
    success: bool,
    drinks: Vec<ShortDrink>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LongListResponse {
    success: bool,
    drinks: Vec<Drink>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct DrinkResponse {
    success: bool,
    drinks: Drink,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct DeleteResponse {
    success: bool,
    delete: String,
}

/// Combines the drinks routes into a single router.
///
/// The authorization guard is composed explicitly per route at registration
/// time; handlers themselves never re-check permissions.
pub(super) fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/drinks", get(list_drinks))
        .route(
            "/drinks",
            post(create_drink).layer(middleware::from_fn_with_state(
                (state.clone(), permissions::POST_DRINKS),
                permission_guard,
            )),
        )
        .route(
            "/drinks-detail",
            get(drink_detail).layer(middleware::from_fn_with_state(
                (state.clone(), permissions::GET_DRINKS_DETAIL),
                permission_guard,
            )),
        )
        .route(
            "/drinks/{id}",
            patch(update_drink).layer(middleware::from_fn_with_state(
                (state.clone(), permissions::PATCH_DRINKS),
                permission_guard,
            )),
        )
        .route(
            "/drinks/{id}",
            delete(delete_drink).layer(middleware::from_fn_with_state(
                (state.clone(), permissions::DELETE_DRINKS),
                permission_guard,
            )),
        )
}

/// Parse a create/update body, classifying every malformed input as a
/// bad request rather than leaking the extractor's own rejection format
fn parse_payload(body: Result<Json<Value>, JsonRejection>) -> Result<DrinkPayload, ApiError> {
    let Json(value) = body.map_err(|_| ApiError::bad_request("request body must be JSON"))?;
    serde_json::from_value(value)
        .map_err(|_| ApiError::bad_request("title and recipe are required"))
}

#[utoipa::path(
    get,
    path = "/drinks",
    tag = DRINKS_TAG,
    responses(
        (status = 200, description = "All drinks in their short representation", body = ShortListResponse),
        (status = 500, description = "Persistence failure")
    )
)]
pub(crate) async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<ShortListResponse>, ApiError> {
    let drinks = state.store.list().await.map_err(|e| {
        error!("Failed to list drinks: {}", e);
        ApiError::internal("unable to fetch drinks")
    })?;
    Ok(Json(ShortListResponse {
        success: true,
        drinks: drinks.iter().map(Drink::short).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = DRINKS_TAG,
    params(
        ("Authorization" = String, Header, description = "Bearer credential with get:drinks-detail"),
    ),
    responses(
        (status = 200, description = "All drinks with their full recipes", body = LongListResponse),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Credential lacks the required permission"),
        (status = 500, description = "Persistence failure")
    )
)]
pub(crate) async fn drink_detail(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<LongListResponse>, ApiError> {
    debug!("Drink detail requested by {}", claims.sub);
    let drinks = state.store.list().await.map_err(|e| {
        error!("Failed to list drinks: {}", e);
        ApiError::internal("unable to fetch drinks")
    })?;
    Ok(Json(LongListResponse {
        success: true,
        drinks,
    }))
}

#[utoipa::path(
    post,
    path = "/drinks",
    tag = DRINKS_TAG,
    request_body = DrinkPayload,
    params(
        ("Authorization" = String, Header, description = "Bearer credential with post:drinks"),
    ),
    responses(
        (status = 200, description = "The created drink with its full recipe", body = DrinkResponse),
        (status = 400, description = "Missing fields or persistence failure"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Credential lacks the required permission")
    )
)]
pub(crate) async fn create_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DrinkResponse>, ApiError> {
    let payload = parse_payload(body)?;
    let recipe = payload.recipe.into_vec();
    let drink = state
        .store
        .insert(&payload.title, &recipe)
        .await
        .map_err(|e| {
            error!("Failed to insert drink: {}", e);
            ApiError::bad_request("unable to create drink")
        })?;

    debug!("Drink {} created by {}", drink.id, claims.sub);
    Ok(Json(DrinkResponse {
        success: true,
        drinks: drink,
    }))
}

#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    tag = DRINKS_TAG,
    request_body = DrinkPayload,
    params(
        ("id" = String, Path, description = "Id of the drink to update"),
        ("Authorization" = String, Header, description = "Bearer credential with patch:drinks"),
    ),
    responses(
        (status = 200, description = "The updated drink with its full recipe", body = DrinkResponse),
        (status = 400, description = "Missing fields or persistence failure"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Credential lacks the required permission"),
        (status = 404, description = "No drink with that id")
    )
)]
pub(crate) async fn update_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DrinkResponse>, ApiError> {
    // A non-numeric id can never match a row
    let id: i32 = id
        .parse()
        .map_err(|_| ApiError::not_found("resource not found"))?;
    let payload = parse_payload(body)?;
    let recipe = payload.recipe.into_vec();

    let drink = state
        .store
        .update(id, &payload.title, &recipe)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::not_found("resource not found"),
            other => {
                error!("Failed to update drink {}: {}", id, other);
                ApiError::bad_request("unable to update drink")
            }
        })?;

    debug!("Drink {} updated by {}", id, claims.sub);
    Ok(Json(DrinkResponse {
        success: true,
        drinks: drink,
    }))
}

#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    tag = DRINKS_TAG,
    params(
        ("id" = String, Path, description = "Id of the drink to delete"),
        ("Authorization" = String, Header, description = "Bearer credential with delete:drinks"),
    ),
    responses(
        (status = 200, description = "The id of the deleted drink", body = DeleteResponse),
        (status = 400, description = "Persistence failure"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Credential lacks the required permission"),
        (status = 404, description = "No drink with that id")
    )
)]
pub(crate) async fn delete_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let row_id: i32 = id
        .parse()
        .map_err(|_| ApiError::not_found("resource not found"))?;

    state.store.delete(row_id).await.map_err(|e| match e {
        StoreError::NotFound => ApiError::not_found("resource not found"),
        other => {
            error!("Failed to delete drink {}: {}", row_id, other);
            ApiError::bad_request("unable to delete drink")
        }
    })?;

    debug!("Drink {} deleted by {}", row_id, claims.sub);
    // The id is echoed back exactly as the caller supplied it
    Ok(Json(DeleteResponse {
        success: true,
        delete: id,
    }))
}
