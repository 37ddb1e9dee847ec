//! # REST API for Cryptocurrency Voting
//!
//! Endpoints for listing, creating, voting on and deleting cryptocurrencies.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use serde_json::Value;
use shared::{CreateCryptoCurrencyRequest, CryptoCurrency};
use tracing::{info, warn};

use crate::domain::models::VoteKind;
use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::crypto_currency_mapper::CryptoCurrencyMapper;
use crate::AppState;

/// Create a router for cryptocurrency related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_crypto_currencies)
                .post(create_crypto_currency)
                .fallback(method_not_allowed),
        )
        .route(
            "/:id",
            get(get_crypto_currency)
                .delete(delete_crypto_currency)
                .fallback(method_not_allowed),
        )
        .route(
            "/:id/upvote",
            put(up_vote_crypto_currency).fallback(method_not_allowed),
        )
        .route(
            "/:id/downvote",
            put(down_vote_crypto_currency).fallback(method_not_allowed),
        )
}

/// Parse the raw `{id}` path segment
fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<i64, ApiError> {
    let Path(raw) = path.map_err(|e| {
        warn!("Rejected cryptocurrency path: {}", e);
        ApiError::InvalidId
    })?;

    raw.parse().map_err(|_| {
        warn!("Invalid cryptocurrency ID: {}", raw);
        ApiError::InvalidId
    })
}

/// List all cryptocurrencies
pub async fn list_crypto_currencies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CryptoCurrency>>, ApiError> {
    info!("GET /cryptovote");

    let cryptos = state
        .crypto_currency_service
        .get_all()
        .await
        .map_err(|e| ApiError::from(e).on_internal("Error getting cryptocurrencies"))?;
    Ok(Json(CryptoCurrencyMapper::to_dto_list(cryptos)))
}

/// Get a cryptocurrency by ID
pub async fn get_crypto_currency(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<CryptoCurrency>, ApiError> {
    let id = parse_id(path)?;
    info!("GET /cryptovote/{}", id);

    let crypto = state
        .crypto_currency_service
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from(e).on_internal("Error getting cryptocurrency"))?;
    Ok(Json(CryptoCurrencyMapper::to_dto(crypto)))
}

/// Create a new cryptocurrency.
///
/// The body is decoded by hand so that malformed JSON is answered with 400
/// whatever the request content type. Only a JSON object is accepted.
pub async fn create_crypto_currency(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body.map_err(|e| {
        warn!("Failed to read request body: {}", e);
        ApiError::InvalidPayload
    })?;

    let request = decode_create_request(&body)?;
    info!("POST /cryptovote - request: {:?}", request);

    let command = CryptoCurrencyMapper::to_create_command(request);
    let crypto = state
        .crypto_currency_service
        .create(command)
        .await
        .map_err(|e| ApiError::from(e).on_internal("Error creating cryptocurrency"))?;

    Ok((StatusCode::CREATED, Json(CryptoCurrencyMapper::to_dto(crypto))))
}

/// Register one up vote
pub async fn up_vote_crypto_currency(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<CryptoCurrency>, ApiError> {
    vote(state, path, VoteKind::UpVote).await
}

/// Register one down vote
pub async fn down_vote_crypto_currency(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<CryptoCurrency>, ApiError> {
    vote(state, path, VoteKind::DownVote).await
}

async fn vote(
    state: AppState,
    path: Result<Path<String>, PathRejection>,
    kind: VoteKind,
) -> Result<Json<CryptoCurrency>, ApiError> {
    let id = parse_id(path)?;
    info!("PUT /cryptovote/{}/{}", id, kind);

    let crypto = state
        .crypto_currency_service
        .apply_vote(id, kind)
        .await
        .map_err(|e| ApiError::from(e).on_internal("Error voting for cryptocurrency"))?;
    Ok(Json(CryptoCurrencyMapper::to_dto(crypto)))
}

/// Delete a cryptocurrency
pub async fn delete_crypto_currency(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(path)?;
    info!("DELETE /cryptovote/{}", id);

    state
        .crypto_currency_service
        .delete(id)
        .await
        .map_err(|e| ApiError::from(e).on_internal("Error deleting cryptocurrency"))?;
    Ok(StatusCode::NO_CONTENT)
}

// serde's derived struct visitor also binds JSON arrays positionally
fn decode_create_request(body: &[u8]) -> Result<CreateCryptoCurrencyRequest, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        warn!("Invalid create payload: {}", e);
        ApiError::InvalidPayload
    })?;

    if !value.is_object() {
        warn!("Create payload is not a JSON object");
        return Err(ApiError::InvalidPayload);
    }

    serde_json::from_value(value).map_err(|e| {
        warn!("Invalid create payload: {}", e);
        ApiError::InvalidPayload
    })
}

/// Fallback for unmatched routes
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Fallback for a known path hit with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
