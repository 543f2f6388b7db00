use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;

use crate::config::settings::AggregationSettings;
use crate::db::match_queries;
use crate::handlers::league_error_response;
use crate::league::aggregation::AggregationService;
use crate::models::match_record::MatchRequest;
use crate::utils::date_format;

#[derive(Debug, Deserialize)]
pub struct MatchListQuery {
    pub team: Option<String>,
}

/// Record a new match and fold it into both teams' standings.
#[tracing::instrument(
    name = "Record match",
    skip(request, pool, aggregation),
    fields(team_a = %request.team_a, team_b = %request.team_b)
)]
pub async fn create_match(
    request: web::Json<MatchRequest>,
    pool: web::Data<SqlitePool>,
    aggregation: web::Data<AggregationSettings>,
) -> Result<HttpResponse> {
    if let Err(message) = validate_match_request(&request) {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": message
        })));
    }

    let service = AggregationService::new(pool.get_ref().clone(), aggregation.zeroed_policy());

    match service.record_match(&request).await {
        Ok(match_id) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": { "match_id": match_id }
        }))),
        Err(e) => {
            tracing::error!("Failed to record match: {}", e);
            Ok(league_error_response(&e))
        }
    }
}

/// Get a single match by id.
#[tracing::instrument(name = "Get match", skip(pool), fields(match_id = %path))]
pub async fn get_match(path: web::Path<i64>, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    let match_id = path.into_inner();

    match match_queries::get_match_by_id(pool.get_ref(), match_id).await {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": record
        }))),
        Ok(None) => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": format!("Match {} not found", match_id)
        }))),
        Err(e) => {
            tracing::error!("Failed to fetch match {}: {}", match_id, e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Database error"
            })))
        }
    }
}

/// List all matches, optionally filtered to those a team played in
/// either slot.
#[tracing::instrument(name = "List matches", skip(query, pool), fields(team = ?query.team))]
pub async fn list_matches(
    query: web::Query<MatchListQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    let result = match &query.team {
        Some(team) => match_queries::get_matches_by_team(pool.get_ref(), team).await,
        None => match_queries::get_all_matches(pool.get_ref()).await,
    };

    match result {
        Ok(matches) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": matches,
            "total_count": matches.len()
        }))),
        Err(e) => {
            tracing::error!("Failed to list matches: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Database error"
            })))
        }
    }
}

/// Edit a stored match: the engine retracts the old value, replaces the
/// record and applies the new value in one transaction.
#[tracing::instrument(
    name = "Edit match",
    skip(request, pool, aggregation),
    fields(match_id = %path)
)]
pub async fn update_match(
    path: web::Path<i64>,
    request: web::Json<MatchRequest>,
    pool: web::Data<SqlitePool>,
    aggregation: web::Data<AggregationSettings>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();

    if let Err(message) = validate_match_request(&request) {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": message
        })));
    }

    let service = AggregationService::new(pool.get_ref().clone(), aggregation.zeroed_policy());

    match service.edit_match(match_id, &request).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Match updated and standings reconciled"
        }))),
        Err(e) => {
            tracing::error!("Failed to edit match {}: {}", match_id, e);
            Ok(league_error_response(&e))
        }
    }
}

/// Delete a match after retracting its contribution from the standings.
#[tracing::instrument(name = "Delete match", skip(pool, aggregation), fields(match_id = %path))]
pub async fn delete_match(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
    aggregation: web::Data<AggregationSettings>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();

    let service = AggregationService::new(pool.get_ref().clone(), aggregation.zeroed_policy());

    match service.remove_match(match_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Match deleted and standings reconciled"
        }))),
        Err(e) => {
            tracing::error!("Failed to delete match {}: {}", match_id, e);
            Ok(league_error_response(&e))
        }
    }
}

/// Caller-side validation; nothing invalid reaches the engine or the
/// stores.
fn validate_match_request(request: &MatchRequest) -> Result<(), String> {
    let team_a = request.team_a.trim();
    let team_b = request.team_b.trim();

    if team_a.is_empty() || team_b.is_empty() {
        return Err("Both team names are required".to_string());
    }
    if team_a.eq_ignore_ascii_case(team_b) {
        return Err("A team cannot play against itself".to_string());
    }
    if request.city.trim().is_empty() {
        return Err("City is required".to_string());
    }
    if request.team_a_goals < 0 || request.team_b_goals < 0 {
        return Err("Goal counts cannot be negative".to_string());
    }
    if !date_format::is_valid_date(&request.match_date) {
        return Err("Match date must be a valid DD/MM/YYYY date".to_string());
    }

    Ok(())
}
