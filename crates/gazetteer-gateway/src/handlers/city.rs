use crate::error::{ApiJson, Result};
use crate::model::{CityPayload, CityResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list_cities_handler(State(state): State<AppState>) -> Result<Json<Vec<CityResponse>>> {
    let cities = state.directory().list_all().await?;
    Ok(Json(cities.into_iter().map(CityResponse::from).collect()))
}

pub async fn get_city_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CityResponse>> {
    let city = state.directory().get_by_id(&id).await?;
    Ok(Json(city.into()))
}

pub async fn create_city_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CityPayload>,
) -> Result<(StatusCode, Json<CityResponse>)> {
    let city = state.directory().create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(city.into())))
}

pub async fn update_city_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CityPayload>,
) -> Result<Json<CityResponse>> {
    let city = state.directory().update(&id, payload.into()).await?;
    Ok(Json(city.into()))
}

pub async fn delete_city_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    state.directory().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_capitals_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CityResponse>>> {
    let capitals = state.directory().list_capitals().await?;
    Ok(Json(capitals.into_iter().map(CityResponse::from).collect()))
}

pub async fn list_cities_by_state_handler(
    Path(state_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<CityResponse>>> {
    let cities = state.directory().list_by_state(&state_code).await?;
    Ok(Json(cities.into_iter().map(CityResponse::from).collect()))
}
