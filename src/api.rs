//! HTTP API endpoints for players.
//!
//! Every endpoint maps onto one game operation. Barriers are never waited
//! on server side: clients poll by repeating the request.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::protocol::*;
use crate::state::{AppState, GameError};
use crate::types::{GameStatus, RankedPlayer};

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let (status, code) = match self {
            GameError::QuotesExhausted { .. } => (StatusCode::GONE, "QUOTES_EXHAUSTED"),
        };
        let body = ErrorResponse {
            code: code.to_string(),
            msg: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/round", post(new_round))
        .route("/api/answer", post(submit_answer))
        .route("/api/choices", get(choices))
        .route("/api/vote", post(submit_vote))
        .route("/api/results", get(results))
        .route("/api/standings", get(standings))
        .route("/api/status", get(status))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Enter the answer screen, optionally asking for the next quote.
///
/// POST /api/round
pub async fn new_round(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewRoundRequest>,
) -> Result<Json<NewRoundResponse>, GameError> {
    let entry = state
        .new_round(&req.player, req.clear)
        .await
        .map_err(|e| {
            tracing::error!(player = %req.player, "Cannot start next round: {}", e);
            e
        })?;
    Ok(Json(entry.into()))
}

/// POST /api/answer
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnswerRequest>,
) -> Json<AnswerResponse> {
    tracing::info!(player = %req.player, "Answer submitted");
    Json(state.submit_answer(&req.player, &req.answer).await.into())
}

/// GET /api/choices?player=..&answer=..
pub async fn choices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChoicesQuery>,
) -> Json<ChoicesResponse> {
    let (choices, single) = state.choices(&query.player, &query.answer).await;
    Json(ChoicesResponse::new(choices, single))
}

/// POST /api/vote
pub async fn submit_vote(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VoteRequest>,
) -> Json<VoteResponse> {
    tracing::info!(player = %req.player, "Vote submitted");
    Json(state.submit_vote(&req.player, &req.choice).await.into())
}

/// GET /api/results?player=..
///
/// Also acknowledges that the player has seen the results.
pub async fn results(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlayerQuery>,
) -> Json<ResultsResponse> {
    let (results, standings) = state.results(&query.player).await;
    Json(ResultsResponse { results, standings })
}

/// GET /api/standings
pub async fn standings(State(state): State<Arc<AppState>>) -> Json<Vec<RankedPlayer>> {
    Json(state.standings().await)
}

/// GET /api/status?player=..
pub async fn status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlayerQuery>,
) -> Json<GameStatus> {
    Json(state.status(&query.player).await)
}
